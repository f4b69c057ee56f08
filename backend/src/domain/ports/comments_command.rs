//! Driving port for comment mutations.
//!
//! The [`CommentsCommand`] trait is the inbound contract for creating,
//! editing, and deleting comments. All requests address the comment through
//! its article slug so a comment id from another article is never touched.

use async_trait::async_trait;

use crate::domain::{ArticleSlug, Comment, CommentBody, CommentId, Error, UserId};

/// Request to post a comment or a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentRequest {
    /// Article being commented on.
    pub article_slug: ArticleSlug,
    /// Authenticated author.
    pub author_id: UserId,
    /// Validated comment text.
    pub body: CommentBody,
    /// Comment being replied to, if any.
    pub parent_comment_id: Option<CommentId>,
}

/// Request to replace the body of a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommentRequest {
    /// Article owning the comment.
    pub article_slug: ArticleSlug,
    /// Comment to edit.
    pub comment_id: CommentId,
    /// Authenticated caller; must be the author.
    pub user_id: UserId,
    /// Replacement text.
    pub body: CommentBody,
}

/// Request to delete a comment and its replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCommentRequest {
    /// Article owning the comment.
    pub article_slug: ArticleSlug,
    /// Comment to delete.
    pub comment_id: CommentId,
    /// Authenticated caller; must be the author.
    pub user_id: UserId,
}

/// Driving port for comment mutations.
///
/// # Errors
///
/// Implementations report failures with domain [`Error`] codes:
/// - `not_found` for an unknown article, comment, or parent comment.
/// - `not_allowed` when replying to a reply.
/// - `forbidden` when the caller does not own the comment.
/// - `invalid_request` when an edit leaves the body unchanged.
/// - `conflict` when a concurrent edit won the iteration check.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    /// Create a top-level comment or a reply.
    async fn create(&self, request: CreateCommentRequest) -> Result<Comment, Error>;

    /// Replace a comment body, bumping its iteration.
    async fn update(&self, request: UpdateCommentRequest) -> Result<Comment, Error>;

    /// Delete a comment together with its replies and reports.
    async fn delete(&self, request: DeleteCommentRequest) -> Result<(), Error>;
}
