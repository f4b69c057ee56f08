//! PostgreSQL-backed `ArticleRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ArticleRepository, ArticleRepositoryError};
use crate::domain::{Article, ArticleSlug, Category, CategoryId, NewArticle};

use super::diesel_helpers::{
    StoreFailure, classify_diesel_error, is_constraint, map_pool_error_message,
};
use super::models::{ArticleRow, ArticleUpdate, CategoryRow, NewArticleRow};
use super::pool::{DbPool, PoolError};
use super::schema::{articles, categories};

const SLUG_UNIQUE: &str = "articles_slug_key";
const CATEGORY_FKEY: &str = "articles_category_id_fkey";

/// Diesel-backed implementation of the article repository port.
#[derive(Clone)]
pub struct DieselArticleRepository {
    pool: DbPool,
}

impl DieselArticleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ArticleRepositoryError {
    ArticleRepositoryError::connection(map_pool_error_message(error))
}

/// Context of the write being mapped, used to fill error fields.
#[derive(Debug, Clone, Copy)]
struct WriteTarget<'a> {
    slug: &'a str,
    category_id: i32,
}

fn map_diesel_error(
    error: diesel::result::Error,
    target: Option<WriteTarget<'_>>,
) -> ArticleRepositoryError {
    match (classify_diesel_error(error), target) {
        (StoreFailure::Unique { constraint }, Some(target))
            if is_constraint(constraint.as_deref(), SLUG_UNIQUE) =>
        {
            ArticleRepositoryError::slug_taken(target.slug)
        }
        (StoreFailure::ForeignKey { constraint }, Some(target))
            if is_constraint(constraint.as_deref(), CATEGORY_FKEY) =>
        {
            ArticleRepositoryError::category_not_found(target.category_id)
        }
        (StoreFailure::Connection, _) => {
            ArticleRepositoryError::connection("database connection error")
        }
        (StoreFailure::Query { message }, _) => ArticleRepositoryError::query(message),
        (failure, _) => {
            warn!(?failure, "unexpected constraint violation on articles");
            ArticleRepositoryError::query("constraint violation")
        }
    }
}

fn row_to_article(row: ArticleRow) -> Result<Article, ArticleRepositoryError> {
    Article::try_from(row).map_err(ArticleRepositoryError::query)
}

#[async_trait]
impl ArticleRepository for DieselArticleRepository {
    async fn find_by_slug(
        &self,
        slug: &ArticleSlug,
    ) -> Result<Option<Article>, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ArticleRow> = articles::table
            .filter(articles::slug.eq(slug.as_ref()))
            .select(ArticleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_article).transpose()
    }

    async fn slug_exists(&self, slug: &ArticleSlug) -> Result<bool, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            articles::table.filter(articles::slug.eq(slug.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, None))
    }

    async fn find_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Option<Category>, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CategoryRow> = categories::table
            .find(category_id.get())
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        Ok(row.map(Category::from))
    }

    async fn insert(&self, article: &NewArticle) -> Result<Article, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = WriteTarget {
            slug: article.slug.as_ref(),
            category_id: article.category_id.get(),
        };

        let new_row = NewArticleRow {
            slug: article.slug.as_ref(),
            title: article.content.title(),
            description: article.content.description(),
            body: article.content.body(),
            tag_list: article.content.tag_list().to_vec(),
            author_id: *article.author_id.as_uuid(),
            category_id: article.category_id.get(),
            cover_image_url: article.cover_image_url.as_deref(),
        };

        let row: ArticleRow = diesel::insert_into(articles::table)
            .values(&new_row)
            .returning(ArticleRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(target)))?;

        row_to_article(row)
    }

    async fn update(&self, article: &Article) -> Result<Article, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = WriteTarget {
            slug: article.slug.as_ref(),
            category_id: article.category_id.get(),
        };

        let changeset = ArticleUpdate {
            title: article.content.title(),
            description: article.content.description(),
            body: article.content.body(),
            tag_list: article.content.tag_list().to_vec(),
            category_id: article.category_id.get(),
            cover_image_url: article.cover_image_url.as_deref(),
            updated_at: Utc::now(),
        };

        let row: Option<ArticleRow> = diesel::update(articles::table.find(article.id.get()))
            .set(&changeset)
            .returning(ArticleRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, Some(target)))?;

        match row {
            Some(row) => row_to_article(row),
            None => Err(ArticleRepositoryError::article_not_found(
                article.slug.to_string(),
            )),
        }
    }

    async fn delete_by_slug(&self, slug: &ArticleSlug) -> Result<bool, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(articles::table.filter(articles::slug.eq(slug.as_ref())))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        Ok(deleted > 0)
    }
}
