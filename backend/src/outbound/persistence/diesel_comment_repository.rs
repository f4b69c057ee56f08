//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.
//!
//! Edits run as `UPDATE ... WHERE id = $1 AND iteration = $2`. A zero-row
//! update is followed by a lookup to tell a stale iteration from a deleted
//! comment.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use pagination::PageParams;
use tracing::warn;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{ArticleId, Comment, CommentBody, CommentId, CommentPage, NewComment};

use super::diesel_helpers::{
    StoreFailure, cast_iteration, cast_iteration_for_db, classify_diesel_error, is_constraint,
    map_pool_error_message,
};
use super::models::{CommentRow, NewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::comments;

const ARTICLE_FKEY: &str = "comments_article_id_fkey";
const PARENT_FKEY: &str = "comments_parent_comment_id_fkey";
const PARENT_ARTICLE_CHECK: &str = "comments_parent_article_check";
const DEPTH_CHECK: &str = "comments_depth_check";

/// Diesel-backed implementation of the comment repository port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommentRepositoryError {
    CommentRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(
    error: diesel::result::Error,
    target: Option<&NewComment>,
) -> CommentRepositoryError {
    let failure = classify_diesel_error(error);
    if let Some(comment) = target {
        if let Some(mapped) = map_insert_violation(&failure, comment) {
            return mapped;
        }
    }
    match failure {
        StoreFailure::Connection => CommentRepositoryError::connection("database connection error"),
        StoreFailure::Query { message } => CommentRepositoryError::query(message),
        failure => {
            warn!(?failure, "unexpected constraint violation on comments");
            CommentRepositoryError::query("constraint violation")
        }
    }
}

fn map_insert_violation(
    failure: &StoreFailure,
    comment: &NewComment,
) -> Option<CommentRepositoryError> {
    let parent = comment.parent_comment_id.map_or(0, CommentId::get);
    match failure {
        StoreFailure::ForeignKey { constraint } => {
            let constraint = constraint.as_deref();
            if is_constraint(constraint, ARTICLE_FKEY) {
                Some(CommentRepositoryError::article_not_found(
                    comment.article_id.get(),
                ))
            } else if is_constraint(constraint, PARENT_FKEY) {
                Some(CommentRepositoryError::parent_not_found(parent))
            } else {
                None
            }
        }
        StoreFailure::Check { constraint } => {
            let constraint = constraint.as_deref();
            if is_constraint(constraint, DEPTH_CHECK) {
                Some(CommentRepositoryError::depth_exceeded(parent))
            } else if is_constraint(constraint, PARENT_ARTICLE_CHECK) {
                Some(CommentRepositoryError::parent_not_found(parent))
            } else {
                None
            }
        }
        _ => None,
    }
}

async fn find_row(
    conn: &mut AsyncPgConnection,
    comment_id: CommentId,
) -> Result<Option<CommentRow>, CommentRepositoryError> {
    comments::table
        .find(comment_id.get())
        .select(CommentRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(|err| map_diesel_error(err, None))
}

/// Explain why a guarded update touched no rows.
fn disambiguate_update_failure(
    current: Option<CommentRow>,
    comment_id: CommentId,
    expected_iteration: u32,
) -> CommentRepositoryError {
    match current {
        Some(row) => {
            CommentRepositoryError::iteration_mismatch(expected_iteration, cast_iteration(row.iteration))
        }
        None => CommentRepositoryError::comment_not_found(comment_id.get()),
    }
}

fn to_total(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn find_by_id(
        &self,
        comment_id: CommentId,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        Ok(find_row(&mut conn, comment_id).await?.map(Comment::from))
    }

    async fn list_for_article(
        &self,
        article_id: ArticleId,
        page: PageParams,
    ) -> Result<CommentPage, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Window and total come from one snapshot.
        let (rows, total) = conn
            .transaction(|conn| {
                async move {
                    let total: i64 = comments::table
                        .filter(comments::article_id.eq(article_id.get()))
                        .count()
                        .get_result(conn)
                        .await?;
                    let rows: Vec<CommentRow> = comments::table
                        .filter(comments::article_id.eq(article_id.get()))
                        .select(CommentRow::as_select())
                        .order_by((comments::created_at.asc(), comments::id.asc()))
                        .offset(i64::from(page.offset()))
                        .limit(i64::from(page.limit()))
                        .load(conn)
                        .await?;
                    Ok((rows, total))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        Ok(CommentPage {
            comments: rows.into_iter().map(Comment::from).collect(),
            total: to_total(total),
        })
    }

    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCommentRow {
            article_id: comment.article_id.get(),
            author_id: *comment.author_id.as_uuid(),
            body: comment.body.as_ref(),
            parent_comment_id: comment.parent_comment_id.map(CommentId::get),
        };

        let row: CommentRow = diesel::insert_into(comments::table)
            .values(&new_row)
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(comment)))?;

        Ok(Comment::from(row))
    }

    async fn update_body(
        &self,
        comment_id: CommentId,
        body: &CommentBody,
        expected_iteration: u32,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated: Option<CommentRow> = diesel::update(
            comments::table
                .filter(comments::id.eq(comment_id.get()))
                .filter(comments::iteration.eq(cast_iteration_for_db(expected_iteration))),
        )
        .set((
            comments::body.eq(body.as_ref()),
            comments::iteration.eq(comments::iteration + 1),
            comments::is_edited.eq(true),
            comments::updated_at.eq(Utc::now()),
        ))
        .returning(CommentRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_diesel_error(err, None))?;

        match updated {
            Some(row) => Ok(Comment::from(row)),
            None => {
                let current = find_row(&mut conn, comment_id).await?;
                Err(disambiguate_update_failure(
                    current,
                    comment_id,
                    expected_iteration,
                ))
            }
        }
    }

    async fn delete(&self, comment_id: CommentId) -> Result<bool, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(comments::table.find(comment_id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        Ok(deleted > 0)
    }
}
