//! Comment domain service.
//!
//! Implements the comment driving ports. Every operation first resolves the
//! article from its slug and then only touches comments that belong to it.
//! Threads are capped at [`MAX_COMMENT_DEPTH`]; edits are guarded by the
//! comment's `iteration` counter.
//!
//! [`MAX_COMMENT_DEPTH`]: crate::domain::MAX_COMMENT_DEPTH

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Paginated;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::articles::find_article;
use crate::domain::ports::{
    ArticleRepository, CommentRepository, CommentRepositoryError, CommentsCommand, CommentsQuery,
    CreateCommentRequest, DeleteCommentRequest, GetCommentRequest, ListCommentsRequest,
    UpdateCommentRequest,
};
use crate::domain::{
    Article, ArticleSlug, Comment, CommentId, Error, ErrorCode, NewComment, UserId,
};

fn map_comment_repository_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
        CommentRepositoryError::IterationMismatch { expected, actual } => {
            Error::conflict("comment was modified concurrently").with_details(json!({
                "expectedIteration": expected,
                "actualIteration": actual,
                "code": "iteration_mismatch",
            }))
        }
        CommentRepositoryError::CommentNotFound { .. } => Error::not_found("comment not found"),
        CommentRepositoryError::ParentNotFound { .. } => {
            Error::not_found("parent comment not found")
        }
        CommentRepositoryError::ArticleNotFound { .. } => Error::not_found("article not found"),
        CommentRepositoryError::DepthExceeded { .. } => reply_depth_exceeded(),
    }
}

fn reply_depth_exceeded() -> Error {
    Error::not_allowed("replies to replies are not allowed")
}

/// Fetch a comment that belongs to `article`.
///
/// Comments of other articles are reported exactly like missing ones.
pub(crate) async fn find_article_comment<C>(
    comments: &C,
    article: &Article,
    comment_id: CommentId,
) -> Result<Comment, Error>
where
    C: CommentRepository + ?Sized,
{
    comments
        .find_by_id(comment_id)
        .await
        .map_err(map_comment_repository_error)?
        .filter(|comment| comment.article_id == article.id)
        .ok_or_else(|| Error::not_found("comment not found"))
}

/// Comment service implementing [`CommentsCommand`] and [`CommentsQuery`].
#[derive(Clone)]
pub struct CommentService<A, C> {
    articles: Arc<A>,
    comments: Arc<C>,
}

impl<A, C> CommentService<A, C> {
    /// Create a new service with the given repositories.
    pub fn new(articles: Arc<A>, comments: Arc<C>) -> Self {
        Self { articles, comments }
    }
}

impl<A, C> CommentService<A, C>
where
    A: ArticleRepository,
    C: CommentRepository,
{
    async fn find_owned(
        &self,
        slug: &ArticleSlug,
        comment_id: CommentId,
        user_id: &UserId,
    ) -> Result<Comment, Error> {
        let article = find_article(self.articles.as_ref(), slug).await?;
        let comment = find_article_comment(self.comments.as_ref(), &article, comment_id).await?;
        if !comment.is_authored_by(user_id) {
            return Err(Error::forbidden("only the author can modify this comment"));
        }
        Ok(comment)
    }

    async fn resolve_parent(
        &self,
        article: &Article,
        parent_id: CommentId,
    ) -> Result<Comment, Error> {
        let parent = find_article_comment(self.comments.as_ref(), article, parent_id)
            .await
            .map_err(|err| {
                if err.code() == ErrorCode::NotFound {
                    Error::not_found("parent comment not found")
                } else {
                    err
                }
            })?;
        if !parent.accepts_replies() {
            debug!(parent_id = %parent.id, "rejected reply to a reply");
            return Err(reply_depth_exceeded());
        }
        Ok(parent)
    }
}

#[async_trait]
impl<A, C> CommentsCommand for CommentService<A, C>
where
    A: ArticleRepository,
    C: CommentRepository,
{
    async fn create(&self, request: CreateCommentRequest) -> Result<Comment, Error> {
        let article = find_article(self.articles.as_ref(), &request.article_slug).await?;
        if let Some(parent_id) = request.parent_comment_id {
            self.resolve_parent(&article, parent_id).await?;
        }

        let new_comment = NewComment {
            article_id: article.id,
            author_id: request.author_id,
            body: request.body,
            parent_comment_id: request.parent_comment_id,
        };
        let comment = self
            .comments
            .insert(&new_comment)
            .await
            .map_err(map_comment_repository_error)?;
        info!(
            comment_id = %comment.id,
            article = %request.article_slug,
            reply = comment.parent_comment_id.is_some(),
            "comment created"
        );
        Ok(comment)
    }

    async fn update(&self, request: UpdateCommentRequest) -> Result<Comment, Error> {
        let current = self
            .find_owned(&request.article_slug, request.comment_id, &request.user_id)
            .await?;
        if current.has_body(&request.body) {
            return Err(Error::invalid_request("comment not modified")
                .with_details(json!({ "field": "body", "code": "not_modified" })));
        }

        let updated = self
            .comments
            .update_body(current.id, &request.body, current.iteration)
            .await
            .map_err(map_comment_repository_error)?;
        info!(comment_id = %updated.id, iteration = updated.iteration, "comment updated");
        Ok(updated)
    }

    async fn delete(&self, request: DeleteCommentRequest) -> Result<(), Error> {
        let comment = self
            .find_owned(&request.article_slug, request.comment_id, &request.user_id)
            .await?;
        let deleted = self
            .comments
            .delete(comment.id)
            .await
            .map_err(map_comment_repository_error)?;
        if !deleted {
            return Err(Error::not_found("comment not found"));
        }
        info!(comment_id = %comment.id, "comment deleted");
        Ok(())
    }
}

#[async_trait]
impl<A, C> CommentsQuery for CommentService<A, C>
where
    A: ArticleRepository,
    C: CommentRepository,
{
    async fn list(&self, request: ListCommentsRequest) -> Result<Paginated<Comment>, Error> {
        let article = find_article(self.articles.as_ref(), &request.article_slug).await?;
        let page = self
            .comments
            .list_for_article(article.id, request.page)
            .await
            .map_err(map_comment_repository_error)?;
        if page.total == 0 {
            return Err(Error::not_found("no comments found"));
        }
        Ok(Paginated::new(page.comments, request.page, page.total))
    }

    async fn get(&self, request: GetCommentRequest) -> Result<Comment, Error> {
        let article = find_article(self.articles.as_ref(), &request.article_slug).await?;
        find_article_comment(self.comments.as_ref(), &article, request.comment_id).await
    }
}
