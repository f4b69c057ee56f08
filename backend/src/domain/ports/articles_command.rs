//! Driving ports for articles.
//!
//! Articles are the parents of every comment. The command port covers
//! authoring; the query port resolves a slug for readers.

use async_trait::async_trait;

use crate::domain::{
    Article, ArticleContent, ArticlePatch, ArticleSlug, CategoryId, CoverImage, Error, UserId,
};

/// Request to publish an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateArticleRequest {
    /// Authenticated author.
    pub author_id: UserId,
    /// Validated title, description, body, and tags.
    pub content: ArticleContent,
    /// Catalogue category.
    pub category_id: CategoryId,
    /// Optional cover image forwarded to the image host.
    pub cover_image: Option<CoverImage>,
}

/// Request to edit an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateArticleRequest {
    /// Article to edit.
    pub slug: ArticleSlug,
    /// Authenticated caller; must be the author.
    pub user_id: UserId,
    /// Fields to replace.
    pub patch: ArticlePatch,
    /// Replacement cover image.
    pub cover_image: Option<CoverImage>,
}

/// Request to delete an article and everything under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteArticleRequest {
    /// Article to delete.
    pub slug: ArticleSlug,
    /// Authenticated caller; must be the author.
    pub user_id: UserId,
}

/// Driving port for article authoring.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticlesCommand: Send + Sync {
    /// Publish a new article under a slug derived from its title.
    async fn create(&self, request: CreateArticleRequest) -> Result<Article, Error>;

    /// Apply a partial update. The slug never changes.
    async fn update(&self, request: UpdateArticleRequest) -> Result<Article, Error>;

    /// Delete an article, cascading to its comments and their reports.
    async fn delete(&self, request: DeleteArticleRequest) -> Result<(), Error>;
}

/// Driving port for article reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticlesQuery: Send + Sync {
    /// Resolve an article by slug.
    async fn get(&self, slug: &ArticleSlug) -> Result<Article, Error>;
}
