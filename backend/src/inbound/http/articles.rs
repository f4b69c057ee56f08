//! Article HTTP handlers.
//!
//! ```text
//! POST   /api/v1/articles
//! GET    /api/v1/articles/{slug}
//! PATCH  /api/v1/articles/{slug}
//! DELETE /api/v1/articles/{slug}
//! ```
//!
//! Cover images travel inside the JSON body as base64 so a single request
//! carries both the article fields and the image.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateArticleRequest, DeleteArticleRequest, UpdateArticleRequest};
use crate::domain::{Article, ArticleContent, ArticlePatch, CategoryId, CoverImage, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::comments::ArticlePath;
use crate::inbound::http::message::MessageResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, article_validation_error, decode_cover_image, missing_field_error, parse_slug,
};

/// Base64 image attached to an article request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoverImagePayload {
    #[schema(example = "cover.png")]
    pub file_name: String,
    #[schema(example = "image/png")]
    pub content_type: String,
    /// Standard base64 encoding of the image bytes.
    pub data: String,
}

impl CoverImagePayload {
    fn decode(self) -> Result<CoverImage, Error> {
        decode_cover_image(self.file_name, self.content_type, &self.data)
    }
}

/// Request payload for creating an article.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub tag_list: Option<Vec<String>>,
    pub category_id: Option<i32>,
    pub cover_image: Option<CoverImagePayload>,
}

/// Request payload for a partial article update; omitted fields are kept.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub tag_list: Option<Vec<String>>,
    pub category_id: Option<i32>,
    pub cover_image: Option<CoverImagePayload>,
}

/// Article as returned to clients.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub id: i64,
    #[schema(example = "hello-world")]
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
    pub author_id: String,
    pub category_id: i32,
    pub cover_image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.get(),
            slug: article.slug.to_string(),
            title: article.content.title().to_owned(),
            description: article.content.description().to_owned(),
            body: article.content.body().to_owned(),
            tag_list: article.content.tag_list().to_vec(),
            author_id: article.author_id.to_string(),
            category_id: article.category_id.get(),
            cover_image_url: article.cover_image_url,
            created_at: article.created_at.to_rfc3339(),
            updated_at: article.updated_at.to_rfc3339(),
        }
    }
}

/// Confirmation plus the affected article.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ArticleEnvelope {
    #[schema(example = "Article created successfully")]
    pub message: String,
    pub article: ArticleResponse,
}

impl ArticleEnvelope {
    fn new(message: &str, article: Article) -> Self {
        Self {
            message: message.to_owned(),
            article: ArticleResponse::from(article),
        }
    }
}

struct ParsedCreate {
    content: ArticleContent,
    category_id: CategoryId,
    cover_image: Option<CoverImage>,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(FieldName::new(field)))
}

fn parse_create(payload: CreateArticleBody) -> Result<ParsedCreate, Error> {
    let title = required(payload.title, "title")?;
    let description = required(payload.description, "description")?;
    let body = required(payload.body, "body")?;
    let category_id = payload
        .category_id
        .map(CategoryId::new)
        .ok_or_else(|| missing_field_error(FieldName::new("categoryId")))?;
    let content = ArticleContent::new(
        title,
        description,
        body,
        payload.tag_list.unwrap_or_default(),
    )
    .map_err(|err| article_validation_error(&err))?;
    let cover_image = payload
        .cover_image
        .map(CoverImagePayload::decode)
        .transpose()?;
    Ok(ParsedCreate {
        content,
        category_id,
        cover_image,
    })
}

fn parse_update(payload: UpdateArticleBody) -> Result<(ArticlePatch, Option<CoverImage>), Error> {
    let cover_image = payload
        .cover_image
        .map(CoverImagePayload::decode)
        .transpose()?;
    let patch = ArticlePatch {
        title: payload.title,
        description: payload.description,
        body: payload.body,
        tag_list: payload.tag_list,
        category_id: payload.category_id.map(CategoryId::new),
    };
    Ok((patch, cover_image))
}

/// Publish a new article.
#[utoipa::path(
    post,
    path = "/api/v1/articles",
    request_body = CreateArticleBody,
    responses(
        (status = 201, description = "Article created", body = ArticleEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Category not found", body = ErrorSchema),
        (status = 503, description = "Image upload failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["articles"],
    operation_id = "createArticle"
)]
#[post("/articles")]
pub async fn create_article(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateArticleBody>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let ParsedCreate {
        content,
        category_id,
        cover_image,
    } = parse_create(payload.into_inner())?;
    let article = state
        .articles
        .create(CreateArticleRequest {
            author_id,
            content,
            category_id,
            cover_image,
        })
        .await?;
    Ok(HttpResponse::Created().json(ArticleEnvelope::new("Article created successfully", article)))
}

/// Fetch an article by slug.
#[utoipa::path(
    get,
    path = "/api/v1/articles/{slug}",
    params(
        ("slug" = String, Path, description = "Article slug")
    ),
    responses(
        (status = 200, description = "Article", body = ArticleResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["articles"],
    operation_id = "getArticle"
)]
#[get("/articles/{slug}")]
pub async fn get_article(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ArticlePath>,
) -> ApiResult<web::Json<ArticleResponse>> {
    session.require_user_id()?;
    let slug = parse_slug(path.into_inner().slug)?;
    let article = state.articles_query.get(&slug).await?;
    Ok(web::Json(ArticleResponse::from(article)))
}

/// Update one's own article. The slug does not change with the title.
#[utoipa::path(
    patch,
    path = "/api/v1/articles/{slug}",
    request_body = UpdateArticleBody,
    params(
        ("slug" = String, Path, description = "Article slug")
    ),
    responses(
        (status = 200, description = "Article updated", body = ArticleEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Article or category not found", body = ErrorSchema),
        (status = 503, description = "Image upload failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["articles"],
    operation_id = "updateArticle"
)]
#[patch("/articles/{slug}")]
pub async fn update_article(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ArticlePath>,
    payload: web::Json<UpdateArticleBody>,
) -> ApiResult<web::Json<ArticleEnvelope>> {
    let user_id = session.require_user_id()?;
    let slug = parse_slug(path.into_inner().slug)?;
    let (patch, cover_image) = parse_update(payload.into_inner())?;
    let article = state
        .articles
        .update(UpdateArticleRequest {
            slug,
            user_id,
            patch,
            cover_image,
        })
        .await?;
    Ok(web::Json(ArticleEnvelope::new(
        "Article updated successfully",
        article,
    )))
}

/// Delete one's own article together with its comments.
#[utoipa::path(
    delete,
    path = "/api/v1/articles/{slug}",
    params(
        ("slug" = String, Path, description = "Article slug")
    ),
    responses(
        (status = 200, description = "Article deleted", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["articles"],
    operation_id = "deleteArticle"
)]
#[delete("/articles/{slug}")]
pub async fn delete_article(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ArticlePath>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user_id = session.require_user_id()?;
    let slug = parse_slug(path.into_inner().slug)?;
    state
        .articles
        .delete(DeleteArticleRequest { slug, user_id })
        .await?;
    Ok(web::Json(MessageResponse::new("Article deleted successfully")))
}

#[cfg(test)]
#[path = "articles_tests.rs"]
mod tests;
