//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint from the inbound layer together
//! with the request and response bodies they exchange. Domain error types are
//! described through the wrappers in [`crate::inbound::http::schemas`] so the
//! domain stays free of utoipa derives.
//!
//! The document backs Swagger UI in debug builds and is exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::articles::{
    ArticleEnvelope, ArticleResponse, CoverImagePayload, CreateArticleBody, UpdateArticleBody,
};
use crate::inbound::http::comments::{
    CommentEnvelope, CommentListResponse, CommentResponse, CreateCommentBody, UpdateCommentBody,
};
use crate::inbound::http::message::MessageResponse;
use crate::inbound::http::reports::{
    ReasonResponse, ReportCommentBody, ReportEnvelope, ReportResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Blog backend API",
        description = "Articles, threaded comments, and comment moderation behind session authentication.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::articles::create_article,
        crate::inbound::http::articles::get_article,
        crate::inbound::http::articles::update_article,
        crate::inbound::http::articles::delete_article,
        crate::inbound::http::comments::create_comment,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::get_comment,
        crate::inbound::http::comments::update_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::reports::report_comment,
        crate::inbound::http::reports::list_report_reasons,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        MessageResponse,
        LoginRequest,
        CoverImagePayload,
        CreateArticleBody,
        UpdateArticleBody,
        ArticleResponse,
        ArticleEnvelope,
        CreateCommentBody,
        UpdateCommentBody,
        CommentResponse,
        CommentEnvelope,
        CommentListResponse,
        ReportCommentBody,
        ReportResponse,
        ReportEnvelope,
        ReasonResponse,
    )),
    tags(
        (name = "users", description = "Session login"),
        (name = "articles", description = "Article authoring"),
        (name = "comments", description = "Threaded comments on articles"),
        (name = "reports", description = "Comment moderation reports"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
