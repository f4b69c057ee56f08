//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` error whose details name the
//! offending field and a machine-readable code, so clients can highlight the
//! input without parsing messages.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use pagination::{PageParams, PageParamsError};
use serde_json::json;

use crate::domain::{
    ArticleSlug, ArticleValidationError, CommentBody, CommentId, CommentValidationError,
    CoverImage, Error,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidNumber,
    InvalidBase64,
    InvalidJson,
    EmptyBody,
    OutOfRange,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidNumber => "invalid_number",
            Self::InvalidBase64 => "invalid_base64",
            Self::InvalidJson => "invalid_json",
            Self::EmptyBody => "empty_body",
            Self::OutOfRange => "out_of_range",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

fn value_error(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        name,
        ErrorCode::MissingField.as_str(),
        format!("missing required field: {name}"),
    )
}

/// Map a domain article validation failure onto a 400 response.
pub(crate) fn article_validation_error(err: &ArticleValidationError) -> Error {
    field_error(err.field(), err.code(), err.to_string())
}

/// Parse an article slug taken from the request path.
///
/// Stored slugs are always well formed, so a malformed one names no article
/// and is reported as `not_found` rather than as a bad request.
pub(crate) fn parse_slug(raw: String) -> Result<ArticleSlug, Error> {
    ArticleSlug::new(raw).map_err(|_| Error::not_found("article not found"))
}

pub(crate) fn parse_comment_id(raw: &str, field: FieldName) -> Result<CommentId, Error> {
    raw.parse::<i64>().map(CommentId::new).map_err(|_| {
        value_error(
            field,
            ErrorCode::InvalidNumber,
            format!("{} must be an integer", field.as_str()),
            raw,
        )
    })
}

pub(crate) fn parse_comment_body(raw: Option<String>) -> Result<CommentBody, Error> {
    let field = FieldName::new("body");
    let raw = raw.ok_or_else(|| missing_field_error(field))?;
    CommentBody::new(raw).map_err(|err| match err {
        CommentValidationError::EmptyBody => {
            field_error(field.as_str(), ErrorCode::EmptyBody.as_str(), err.to_string())
        }
    })
}

fn parse_count(raw: Option<String>, field: FieldName) -> Result<Option<u32>, Error> {
    raw.map(|value| {
        value.parse::<u32>().map_err(|_| {
            value_error(
                field,
                ErrorCode::InvalidNumber,
                format!("{} must be a non-negative integer", field.as_str()),
                &value,
            )
        })
    })
    .transpose()
}

pub(crate) fn parse_page_params(
    offset: Option<String>,
    limit: Option<String>,
) -> Result<PageParams, Error> {
    let offset = parse_count(offset, FieldName::new("offset"))?;
    let limit = parse_count(limit, FieldName::new("limit"))?;
    PageParams::new(offset, limit).map_err(|err| match err {
        PageParamsError::ZeroLimit | PageParamsError::LimitTooLarge { .. } => {
            field_error("limit", ErrorCode::OutOfRange.as_str(), err.to_string())
        }
    })
}

pub(crate) fn decode_cover_image(
    file_name: String,
    content_type: String,
    data: &str,
) -> Result<CoverImage, Error> {
    let bytes = STANDARD.decode(data.trim()).map_err(|_| {
        field_error(
            "coverImage",
            ErrorCode::InvalidBase64.as_str(),
            "coverImage data must be base64 encoded",
        )
    })?;
    CoverImage::new(file_name, content_type, bytes).map_err(|err| article_validation_error(&err))
}

/// Turn JSON extractor failures into the shared error envelope.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::Deserialize(inner) => format!("invalid JSON body: {inner}"),
        other => other.to_string(),
    };
    Error::invalid_request(message)
        .with_details(json!({ "code": ErrorCode::InvalidJson.as_str() }))
        .into()
}

/// JSON extractor configuration that reports malformed bodies as
/// `invalid_request` errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}
