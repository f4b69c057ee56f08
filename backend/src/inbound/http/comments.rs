//! Comment HTTP handlers.
//!
//! ```text
//! POST   /api/v1/articles/{slug}/comments
//! GET    /api/v1/articles/{slug}/comments?offset=0&limit=10
//! GET    /api/v1/articles/{slug}/comments/{comment_id}
//! PATCH  /api/v1/articles/{slug}/comments/{comment_id}
//! DELETE /api/v1/articles/{slug}/comments/{comment_id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    CreateCommentRequest, DeleteCommentRequest, GetCommentRequest, ListCommentsRequest,
    UpdateCommentRequest,
};
use crate::domain::{ArticleSlug, Comment, CommentId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::message::MessageResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_comment_body, parse_comment_id, parse_page_params, parse_slug,
};
use pagination::Paginated;

#[derive(Debug, Deserialize)]
pub(crate) struct ArticlePath {
    pub(crate) slug: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentPath {
    pub(crate) slug: String,
    pub(crate) comment_id: String,
}

impl CommentPath {
    pub(crate) fn parse(self) -> Result<(ArticleSlug, CommentId), Error> {
        let slug = parse_slug(self.slug)?;
        let comment_id = parse_comment_id(&self.comment_id, FieldName::new("commentId"))?;
        Ok((slug, comment_id))
    }
}

/// Request payload for creating a comment or a reply.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentBody {
    /// Comment text; must not be blank.
    pub body: Option<String>,
    /// Comment being replied to. Replies to replies are rejected.
    pub parent_comment_id: Option<i64>,
}

/// Request payload for editing a comment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateCommentBody {
    /// Replacement text; must differ from the stored text.
    pub body: Option<String>,
}

/// Comment as returned to clients.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub article_id: i64,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub author_id: String,
    pub body: String,
    pub parent_comment_id: Option<i64>,
    /// Number of edits applied so far.
    pub iteration: u32,
    pub is_edited: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.get(),
            article_id: comment.article_id.get(),
            author_id: comment.author_id.to_string(),
            body: comment.body,
            parent_comment_id: comment.parent_comment_id.map(CommentId::get),
            iteration: comment.iteration,
            is_edited: comment.is_edited,
            created_at: comment.created_at.to_rfc3339(),
            updated_at: comment.updated_at.to_rfc3339(),
        }
    }
}

/// Confirmation plus the affected comment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CommentEnvelope {
    #[schema(example = "Comment created successfully")]
    pub message: String,
    pub comment: CommentResponse,
}

impl CommentEnvelope {
    fn new(message: &str, comment: Comment) -> Self {
        Self {
            message: message.to_owned(),
            comment: CommentResponse::from(comment),
        }
    }
}

/// One page of comments in creation order.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
    pub offset: u32,
    pub limit: u32,
    /// Number of comments on the article across all pages.
    pub total: u64,
}

impl From<Paginated<Comment>> for CommentListResponse {
    fn from(page: Paginated<Comment>) -> Self {
        let page = page.map(CommentResponse::from);
        Self {
            comments: page.data,
            offset: page.offset,
            limit: page.limit,
            total: page.total,
        }
    }
}

/// Page window for comment listings.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCommentsParams {
    /// Comments to skip. Defaults to 0.
    #[param(value_type = Option<u32>)]
    pub offset: Option<String>,
    /// Page size, 1 to 100. Defaults to 10.
    #[param(value_type = Option<u32>)]
    pub limit: Option<String>,
}

/// Comment on an article, or reply to a top-level comment.
#[utoipa::path(
    post,
    path = "/api/v1/articles/{slug}/comments",
    request_body = CreateCommentBody,
    params(
        ("slug" = String, Path, description = "Article slug")
    ),
    responses(
        (status = 201, description = "Comment created", body = CommentEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Article or parent comment not found", body = ErrorSchema),
        (status = 405, description = "Parent comment is itself a reply", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/articles/{slug}/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ArticlePath>,
    payload: web::Json<CreateCommentBody>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let article_slug = parse_slug(path.into_inner().slug)?;
    let CreateCommentBody {
        body,
        parent_comment_id,
    } = payload.into_inner();
    let request = CreateCommentRequest {
        article_slug,
        author_id,
        body: parse_comment_body(body)?,
        parent_comment_id: parent_comment_id.map(CommentId::new),
    };
    let comment = state.comments.create(request).await?;
    Ok(HttpResponse::Created().json(CommentEnvelope::new("Comment created successfully", comment)))
}

/// List comments on an article.
#[utoipa::path(
    get,
    path = "/api/v1/articles/{slug}/comments",
    params(
        ("slug" = String, Path, description = "Article slug"),
        ListCommentsParams
    ),
    responses(
        (status = 200, description = "Comments page", body = CommentListResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Article not found or has no comments", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listComments"
)]
#[get("/articles/{slug}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ArticlePath>,
    query: web::Query<ListCommentsParams>,
) -> ApiResult<web::Json<CommentListResponse>> {
    session.require_user_id()?;
    let article_slug = parse_slug(path.into_inner().slug)?;
    let ListCommentsParams { offset, limit } = query.into_inner();
    let page = parse_page_params(offset, limit)?;
    let comments = state
        .comments_query
        .list(ListCommentsRequest { article_slug, page })
        .await?;
    Ok(web::Json(CommentListResponse::from(comments)))
}

/// Fetch one comment.
#[utoipa::path(
    get,
    path = "/api/v1/articles/{slug}/comments/{comment_id}",
    params(
        ("slug" = String, Path, description = "Article slug"),
        ("comment_id" = i64, Path, description = "Comment identifier")
    ),
    responses(
        (status = 200, description = "Comment", body = CommentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "getComment"
)]
#[get("/articles/{slug}/comments/{comment_id}")]
pub async fn get_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CommentPath>,
) -> ApiResult<web::Json<CommentResponse>> {
    session.require_user_id()?;
    let (article_slug, comment_id) = path.into_inner().parse()?;
    let comment = state
        .comments_query
        .get(GetCommentRequest {
            article_slug,
            comment_id,
        })
        .await?;
    Ok(web::Json(CommentResponse::from(comment)))
}

/// Edit the text of one's own comment.
#[utoipa::path(
    patch,
    path = "/api/v1/articles/{slug}/comments/{comment_id}",
    request_body = UpdateCommentBody,
    params(
        ("slug" = String, Path, description = "Article slug"),
        ("comment_id" = i64, Path, description = "Comment identifier")
    ),
    responses(
        (status = 200, description = "Comment updated", body = CommentEnvelope),
        (status = 400, description = "Invalid request or body unchanged", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Edited concurrently", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "updateComment"
)]
#[patch("/articles/{slug}/comments/{comment_id}")]
pub async fn update_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CommentPath>,
    payload: web::Json<UpdateCommentBody>,
) -> ApiResult<web::Json<CommentEnvelope>> {
    let user_id = session.require_user_id()?;
    let (article_slug, comment_id) = path.into_inner().parse()?;
    let body = parse_comment_body(payload.into_inner().body)?;
    let comment = state
        .comments
        .update(UpdateCommentRequest {
            article_slug,
            comment_id,
            user_id,
            body,
        })
        .await?;
    Ok(web::Json(CommentEnvelope::new(
        "Comment updated successfully",
        comment,
    )))
}

/// Delete one's own comment together with its replies and reports.
#[utoipa::path(
    delete,
    path = "/api/v1/articles/{slug}/comments/{comment_id}",
    params(
        ("slug" = String, Path, description = "Article slug"),
        ("comment_id" = i64, Path, description = "Comment identifier")
    ),
    responses(
        (status = 200, description = "Comment deleted", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/articles/{slug}/comments/{comment_id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CommentPath>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user_id = session.require_user_id()?;
    let (article_slug, comment_id) = path.into_inner().parse()?;
    state
        .comments
        .delete(DeleteCommentRequest {
            article_slug,
            comment_id,
            user_id,
        })
        .await?;
    Ok(web::Json(MessageResponse::new("Comment deleted successfully")))
}

#[cfg(test)]
#[path = "comments_tests.rs"]
mod tests;
