//! Article domain service.
//!
//! Implements [`ArticlesCommand`] and [`ArticlesQuery`] on top of the
//! article repository and the image uploader.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    ArticleRepository, ArticleRepositoryError, ArticlesCommand, ArticlesQuery,
    CreateArticleRequest, DeleteArticleRequest, ImageUploader, UpdateArticleRequest,
};
use crate::domain::{
    Article, ArticleSlug, ArticleValidationError, CategoryId, CoverImage, Error, NewArticle,
    UserId,
};

fn map_article_repository_error(error: ArticleRepositoryError) -> Error {
    match error {
        ArticleRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("article repository unavailable: {message}"))
        }
        ArticleRepositoryError::Query { message } => {
            Error::internal(format!("article repository error: {message}"))
        }
        ArticleRepositoryError::SlugTaken { slug } => Error::conflict("article slug already taken")
            .with_details(json!({ "slug": slug, "code": "slug_taken" })),
        ArticleRepositoryError::CategoryNotFound { .. } => {
            Error::not_found("category does not exist")
        }
        ArticleRepositoryError::ArticleNotFound { .. } => Error::not_found("article not found"),
    }
}

/// Resolve an article by slug or fail with `not_found`.
pub(crate) async fn find_article<A>(articles: &A, slug: &ArticleSlug) -> Result<Article, Error>
where
    A: ArticleRepository + ?Sized,
{
    articles
        .find_by_slug(slug)
        .await
        .map_err(map_article_repository_error)?
        .ok_or_else(|| Error::not_found("article not found"))
}

/// Record a hosted cover whose article row was never written.
fn log_orphaned_cover(url: Option<&str>) {
    if let Some(url) = url {
        warn!(cover_image_url = url, "article write failed; uploaded cover is orphaned");
    }
}

fn invalid_article(err: &ArticleValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": err.code() }))
}

/// Article service implementing the article driving ports.
///
/// The uploader may be a trait object so the host can be chosen at startup.
#[derive(Clone)]
pub struct ArticleService<A, U: ?Sized> {
    articles: Arc<A>,
    uploader: Arc<U>,
}

impl<A, U: ?Sized> ArticleService<A, U> {
    /// Create a new service with the given repository and uploader.
    pub fn new(articles: Arc<A>, uploader: Arc<U>) -> Self {
        Self { articles, uploader }
    }
}

impl<A, U: ?Sized> ArticleService<A, U>
where
    A: ArticleRepository,
    U: ImageUploader,
{
    async fn ensure_category(&self, category_id: CategoryId) -> Result<(), Error> {
        self.articles
            .find_category(category_id)
            .await
            .map_err(map_article_repository_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found("category does not exist"))
    }

    async fn upload_cover(&self, image: Option<&CoverImage>) -> Result<Option<String>, Error> {
        let Some(image) = image else {
            return Ok(None);
        };
        match self.uploader.upload(image).await {
            Ok(url) => Ok(Some(url)),
            Err(err) => {
                warn!(error = %err, file_name = image.file_name(), "cover image upload failed");
                Err(Error::service_unavailable("image upload failed"))
            }
        }
    }

    async fn available_slug(&self, title: &str) -> Result<ArticleSlug, Error> {
        let slug = ArticleSlug::from_title(title);
        let taken = self
            .articles
            .slug_exists(&slug)
            .await
            .map_err(map_article_repository_error)?;
        Ok(if taken { slug.with_random_suffix() } else { slug })
    }

    async fn find_owned(&self, slug: &ArticleSlug, user_id: &UserId) -> Result<Article, Error> {
        let article = find_article(self.articles.as_ref(), slug).await?;
        if !article.is_authored_by(user_id) {
            return Err(Error::forbidden("only the author can modify this article"));
        }
        Ok(article)
    }
}

#[async_trait]
impl<A, U: ?Sized> ArticlesCommand for ArticleService<A, U>
where
    A: ArticleRepository,
    U: ImageUploader,
{
    async fn create(&self, request: CreateArticleRequest) -> Result<Article, Error> {
        self.ensure_category(request.category_id).await?;
        let slug = self.available_slug(request.content.title()).await?;
        let cover_image_url = self.upload_cover(request.cover_image.as_ref()).await?;

        let mut new_article = NewArticle {
            slug,
            content: request.content,
            author_id: request.author_id,
            category_id: request.category_id,
            cover_image_url,
        };
        let first_attempt = self.articles.insert(&new_article).await;
        let inserted = match first_attempt {
            Err(ArticleRepositoryError::SlugTaken { slug }) => {
                debug!(%slug, "slug claimed concurrently; retrying with a suffix");
                new_article.slug =
                    ArticleSlug::from_title(new_article.content.title()).with_random_suffix();
                self.articles.insert(&new_article).await
            }
            other => other,
        };
        let article = inserted.map_err(|err| {
            log_orphaned_cover(new_article.cover_image_url.as_deref());
            map_article_repository_error(err)
        })?;
        info!(slug = %article.slug, article_id = %article.id, "article created");
        Ok(article)
    }

    async fn update(&self, request: UpdateArticleRequest) -> Result<Article, Error> {
        let mut article = self.find_owned(&request.slug, &request.user_id).await?;

        match request.patch.category_id {
            Some(category_id) if category_id != article.category_id => {
                self.ensure_category(category_id).await?;
                article.category_id = category_id;
            }
            _ => {}
        }

        article.content = request
            .patch
            .merge_content(&article.content)
            .map_err(|err| invalid_article(&err))?;

        let uploaded = self.upload_cover(request.cover_image.as_ref()).await?;
        if uploaded.is_some() {
            article.cover_image_url.clone_from(&uploaded);
        }

        self.articles.update(&article).await.map_err(|err| {
            log_orphaned_cover(uploaded.as_deref());
            map_article_repository_error(err)
        })
    }

    async fn delete(&self, request: DeleteArticleRequest) -> Result<(), Error> {
        self.find_owned(&request.slug, &request.user_id).await?;
        let deleted = self
            .articles
            .delete_by_slug(&request.slug)
            .await
            .map_err(map_article_repository_error)?;
        if !deleted {
            return Err(Error::not_found("article not found"));
        }
        info!(slug = %request.slug, "article deleted");
        Ok(())
    }
}

#[async_trait]
impl<A, U: ?Sized> ArticlesQuery for ArticleService<A, U>
where
    A: ArticleRepository,
    U: ImageUploader,
{
    async fn get(&self, slug: &ArticleSlug) -> Result<Article, Error> {
        find_article(self.articles.as_ref(), slug).await
    }
}
