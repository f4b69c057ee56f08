//! Comment report HTTP handlers.
//!
//! ```text
//! POST /api/v1/articles/{slug}/comments/{comment_id}/report {"reasonId":1}
//! GET  /api/v1/report-reasons
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ReportCommentRequest;
use crate::domain::{Reason, ReasonId, ReportedComment};
use crate::inbound::http::ApiResult;
use crate::inbound::http::comments::CommentPath;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

/// Request payload for reporting a comment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportCommentBody {
    /// Identifier from the report reason catalogue.
    pub reason_id: Option<i32>,
}

/// Stored report.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub user_id: String,
    pub comment_id: i64,
    pub reason_id: i32,
    pub created_at: String,
}

impl From<ReportedComment> for ReportResponse {
    fn from(report: ReportedComment) -> Self {
        Self {
            user_id: report.user_id.to_string(),
            comment_id: report.comment_id.get(),
            reason_id: report.reason_id.get(),
            created_at: report.created_at.to_rfc3339(),
        }
    }
}

/// Confirmation plus the stored report.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ReportEnvelope {
    #[schema(example = "Reported Successfully")]
    pub message: String,
    pub report: ReportResponse,
}

/// Catalogue entry clients pick a `reasonId` from.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ReasonResponse {
    pub id: i32,
    #[schema(example = "spam")]
    pub description: String,
}

impl From<Reason> for ReasonResponse {
    fn from(reason: Reason) -> Self {
        Self {
            id: reason.id.get(),
            description: reason.description,
        }
    }
}

/// Report a comment for moderation.
///
/// A user may report the same comment once per reason.
#[utoipa::path(
    post,
    path = "/api/v1/articles/{slug}/comments/{comment_id}/report",
    request_body = ReportCommentBody,
    params(
        ("slug" = String, Path, description = "Article slug"),
        ("comment_id" = i64, Path, description = "Comment identifier")
    ),
    responses(
        (status = 201, description = "Report stored", body = ReportEnvelope),
        (status = 400, description = "Invalid request or duplicate report", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Article, comment or reason not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "reportComment"
)]
#[post("/articles/{slug}/comments/{comment_id}/report")]
pub async fn report_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CommentPath>,
    payload: web::Json<ReportCommentBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let (article_slug, comment_id) = path.into_inner().parse()?;
    let reason_id = payload
        .into_inner()
        .reason_id
        .map(ReasonId::new)
        .ok_or_else(|| missing_field_error(FieldName::new("reasonId")))?;
    let report = state
        .reports
        .report(ReportCommentRequest {
            article_slug,
            comment_id,
            user_id,
            reason_id,
        })
        .await?;
    Ok(HttpResponse::Created().json(ReportEnvelope {
        message: "Reported Successfully".to_owned(),
        report: ReportResponse::from(report),
    }))
}

/// List the reasons a comment can be reported for.
#[utoipa::path(
    get,
    path = "/api/v1/report-reasons",
    responses(
        (status = 200, description = "Reason catalogue", body = [ReasonResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "listReportReasons"
)]
#[get("/report-reasons")]
pub async fn list_report_reasons(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ReasonResponse>>> {
    session.require_user_id()?;
    let reasons = state.reasons.list_reasons().await?;
    Ok(web::Json(
        reasons.into_iter().map(ReasonResponse::from).collect(),
    ))
}
