//! Driving port for reading comments.

use async_trait::async_trait;
use pagination::{PageParams, Paginated};

use crate::domain::{ArticleSlug, Comment, CommentId, Error};

/// Request for one page of an article's comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCommentsRequest {
    /// Article whose comments are listed.
    pub article_slug: ArticleSlug,
    /// Window into the creation-ordered comment list.
    pub page: PageParams,
}

/// Request for a single comment of an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCommentRequest {
    /// Article owning the comment.
    pub article_slug: ArticleSlug,
    /// Comment to fetch.
    pub comment_id: CommentId,
}

/// Driving port for comment reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsQuery: Send + Sync {
    /// List comments in creation order.
    ///
    /// An article without comments yields a `not_found` error rather than an
    /// empty page.
    async fn list(&self, request: ListCommentsRequest) -> Result<Paginated<Comment>, Error>;

    /// Fetch one comment scoped to its article.
    async fn get(&self, request: GetCommentRequest) -> Result<Comment, Error>;
}
