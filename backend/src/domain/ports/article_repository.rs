//! Port for article and category persistence.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Article, ArticleId, ArticleSlug, Category, CategoryId, NewArticle};

use super::define_port_error;

define_port_error! {
    /// Errors raised by article repository adapters.
    pub enum ArticleRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "article repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "article repository query failed: {message}",
        /// Another article already owns the slug.
        SlugTaken { slug: String } =>
            "article slug already taken: {slug}",
        /// Referenced category does not exist.
        CategoryNotFound { category_id: i32 } =>
            "category not found: {category_id}",
        /// The article disappeared before the mutation ran.
        ArticleNotFound { slug: String } =>
            "article not found: {slug}",
    }
}

/// Port for article storage and the category catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Fetch an article by slug, returning `None` when absent.
    async fn find_by_slug(
        &self,
        slug: &ArticleSlug,
    ) -> Result<Option<Article>, ArticleRepositoryError>;

    /// Whether any article already uses `slug`.
    async fn slug_exists(&self, slug: &ArticleSlug) -> Result<bool, ArticleRepositoryError>;

    /// Fetch a category from the catalogue.
    async fn find_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Option<Category>, ArticleRepositoryError>;

    /// Insert a new article and return the stored row.
    ///
    /// A concurrent insert with the same slug yields
    /// [`ArticleRepositoryError::SlugTaken`].
    async fn insert(&self, article: &NewArticle) -> Result<Article, ArticleRepositoryError>;

    /// Overwrite the editable fields of an existing article, matched by id.
    ///
    /// Returns [`ArticleRepositoryError::ArticleNotFound`] when no row matched.
    async fn update(&self, article: &Article) -> Result<Article, ArticleRepositoryError>;

    /// Delete an article by slug, cascading to its comments.
    ///
    /// Returns `Ok(false)` when no row matched.
    async fn delete_by_slug(&self, slug: &ArticleSlug) -> Result<bool, ArticleRepositoryError>;
}

/// Fixture implementation for running without a database.
///
/// Lookups find nothing and writes echo their input without persisting it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureArticleRepository;

#[async_trait]
impl ArticleRepository for FixtureArticleRepository {
    async fn find_by_slug(
        &self,
        _slug: &ArticleSlug,
    ) -> Result<Option<Article>, ArticleRepositoryError> {
        Ok(None)
    }

    async fn slug_exists(&self, _slug: &ArticleSlug) -> Result<bool, ArticleRepositoryError> {
        Ok(false)
    }

    async fn find_category(
        &self,
        _category_id: CategoryId,
    ) -> Result<Option<Category>, ArticleRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, article: &NewArticle) -> Result<Article, ArticleRepositoryError> {
        let now = Utc::now();
        Ok(Article {
            id: ArticleId::new(1),
            slug: article.slug.clone(),
            content: article.content.clone(),
            author_id: article.author_id.clone(),
            category_id: article.category_id,
            cover_image_url: article.cover_image_url.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(&self, article: &Article) -> Result<Article, ArticleRepositoryError> {
        Err(ArticleRepositoryError::article_not_found(
            article.slug.to_string(),
        ))
    }

    async fn delete_by_slug(&self, _slug: &ArticleSlug) -> Result<bool, ArticleRepositoryError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArticleContent, UserId};

    #[tokio::test]
    async fn fixture_finds_nothing() {
        let repo = FixtureArticleRepository;
        let slug = ArticleSlug::new("missing").expect("valid slug");
        assert!(repo.find_by_slug(&slug).await.expect("lookup").is_none());
        assert!(!repo.slug_exists(&slug).await.expect("lookup"));
        assert!(!repo.delete_by_slug(&slug).await.expect("delete"));
    }

    #[tokio::test]
    async fn fixture_insert_echoes_input() {
        let repo = FixtureArticleRepository;
        let new_article = NewArticle {
            slug: ArticleSlug::from_title("Fixture post"),
            content: ArticleContent::new("Fixture post", "d", "b", vec![]).expect("content"),
            author_id: UserId::random(),
            category_id: CategoryId::new(1),
            cover_image_url: None,
        };
        let stored = repo.insert(&new_article).await.expect("insert");
        assert_eq!(stored.slug, new_article.slug);
        assert_eq!(stored.content, new_article.content);
    }
}
