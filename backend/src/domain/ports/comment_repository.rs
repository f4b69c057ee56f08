//! Port for comment persistence.
//!
//! The [`CommentRepository`] trait stores comments of articles and guards
//! edits with an optimistic check on the `iteration` counter. Adapters are
//! expected to enforce thread depth and foreign keys at store level as well,
//! reporting violations through the dedicated error variants.

use async_trait::async_trait;
use chrono::Utc;
use pagination::PageParams;

use crate::domain::{ArticleId, Comment, CommentBody, CommentId, CommentPage, NewComment};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "comment repository query failed: {message}",
        /// Optimistic concurrency check failed.
        IterationMismatch { expected: u32, actual: u32 } =>
            "iteration mismatch: expected {expected}, found {actual}",
        /// The comment does not exist (any more).
        CommentNotFound { comment_id: i64 } =>
            "comment not found: {comment_id}",
        /// Referenced parent comment does not exist.
        ParentNotFound { comment_id: i64 } =>
            "parent comment not found: {comment_id}",
        /// Referenced article does not exist.
        ArticleNotFound { article_id: i64 } =>
            "article not found: {article_id}",
        /// The parent is itself a reply.
        DepthExceeded { comment_id: i64 } =>
            "comment {comment_id} cannot receive replies",
    }
}

/// Port for comment storage and retrieval.
///
/// # Iteration semantics
///
/// - New comments start at iteration 0 and are not marked as edited.
/// - [`CommentRepository::update_body`] succeeds only when the stored
///   iteration equals `expected_iteration`; it then stores
///   `expected_iteration + 1` and marks the comment as edited.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Fetch a comment by id, returning `None` when absent.
    async fn find_by_id(
        &self,
        comment_id: CommentId,
    ) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Fetch a window of an article's comments in creation order together
    /// with the article's total comment count.
    async fn list_for_article(
        &self,
        article_id: ArticleId,
        page: PageParams,
    ) -> Result<CommentPage, CommentRepositoryError>;

    /// Insert a comment and return the stored row.
    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError>;

    /// Replace the body of a comment guarded by its current iteration.
    async fn update_body(
        &self,
        comment_id: CommentId,
        body: &CommentBody,
        expected_iteration: u32,
    ) -> Result<Comment, CommentRepositoryError>;

    /// Delete a comment, cascading to replies and reports.
    ///
    /// Returns `Ok(false)` when no row matched.
    async fn delete(&self, comment_id: CommentId) -> Result<bool, CommentRepositoryError>;
}

/// Fixture implementation for running without a database.
///
/// Lookups find nothing and inserts echo their input without persisting it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentRepository;

#[async_trait]
impl CommentRepository for FixtureCommentRepository {
    async fn find_by_id(
        &self,
        _comment_id: CommentId,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        Ok(None)
    }

    async fn list_for_article(
        &self,
        _article_id: ArticleId,
        _page: PageParams,
    ) -> Result<CommentPage, CommentRepositoryError> {
        Ok(CommentPage::default())
    }

    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        let now = Utc::now();
        Ok(Comment {
            id: CommentId::new(1),
            article_id: comment.article_id,
            author_id: comment.author_id.clone(),
            body: comment.body.as_ref().to_owned(),
            parent_comment_id: comment.parent_comment_id,
            iteration: 0,
            is_edited: false,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_body(
        &self,
        comment_id: CommentId,
        _body: &CommentBody,
        _expected_iteration: u32,
    ) -> Result<Comment, CommentRepositoryError> {
        Err(CommentRepositoryError::comment_not_found(comment_id.get()))
    }

    async fn delete(&self, _comment_id: CommentId) -> Result<bool, CommentRepositoryError> {
        Ok(false)
    }
}
