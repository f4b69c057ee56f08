//! Reqwest-backed image uploader.
//!
//! Owns transport details only: encoding the image as a data URI, request
//! timeout, status mapping, and decoding the hosted URL.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{UploadErrorDto, UploadResponseDto};
use crate::domain::CoverImage;
use crate::domain::ports::{ImageUploadError, ImageUploader};

/// Uploader posting unsigned uploads to a single endpoint.
pub struct HttpImageUploader {
    client: Client,
    endpoint: Url,
    upload_preset: Option<String>,
}

impl HttpImageUploader {
    /// Build an uploader with an explicit request timeout.
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use blog_backend::outbound::uploads::HttpImageUploader;
    ///
    /// let endpoint = "https://api.images.invalid/v1/upload".parse().expect("url");
    /// let uploader = HttpImageUploader::new(endpoint, Some("blog".into()), Duration::from_secs(10));
    /// assert!(uploader.is_ok());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        upload_preset: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            upload_preset,
        })
    }

    fn form(&self, image: &CoverImage) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("file", data_uri(image)),
            ("filename_override", image.file_name().to_owned()),
        ];
        if let Some(preset) = &self.upload_preset {
            form.push(("upload_preset", preset.clone()));
        }
        form
    }
}

#[async_trait]
impl ImageUploader for HttpImageUploader {
    async fn upload(&self, image: &CoverImage) -> Result<String, ImageUploadError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&self.form(image))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let url = parse_hosted_url(body.as_ref())?;
        debug!(file_name = image.file_name(), %url, "image uploaded");
        Ok(url)
    }
}

fn data_uri(image: &CoverImage) -> String {
    format!(
        "data:{};base64,{}",
        image.content_type(),
        STANDARD.encode(image.bytes())
    )
}

fn parse_hosted_url(body: &[u8]) -> Result<String, ImageUploadError> {
    let decoded: UploadResponseDto = serde_json::from_slice(body).map_err(|error| {
        ImageUploadError::decode(format!("invalid upload JSON payload: {error}"))
    })?;
    decoded.into_hosted_url().map_err(ImageUploadError::decode)
}

fn map_transport_error(error: reqwest::Error) -> ImageUploadError {
    if error.is_timeout() {
        ImageUploadError::timeout(error.to_string())
    } else {
        ImageUploadError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ImageUploadError {
    let detail = serde_json::from_slice::<UploadErrorDto>(body)
        .map(|dto| dto.error.message)
        .unwrap_or_else(|_| body_preview(body));
    let message = if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), detail)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ImageUploadError::timeout(message)
        }
        _ if status.is_client_error() => ImageUploadError::rejected(message),
        _ => ImageUploadError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
