//! Report domain service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::articles::find_article;
use crate::domain::comments::find_article_comment;
use crate::domain::ports::{
    ArticleRepository, CommentRepository, ReasonsQuery, ReportCommand, ReportCommentRequest,
    ReportRepository, ReportRepositoryError,
};
use crate::domain::{Error, NewReport, Reason, ReasonId, ReportedComment};

fn duplicate_report() -> Error {
    Error::invalid_request("cannot report this comment twice with the same comment reason")
        .with_details(json!({ "code": "duplicate_report" }))
}

fn map_report_repository_error(error: ReportRepositoryError) -> Error {
    match error {
        ReportRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("report repository unavailable: {message}"))
        }
        ReportRepositoryError::Query { message } => {
            Error::internal(format!("report repository error: {message}"))
        }
        ReportRepositoryError::DuplicateReport => duplicate_report(),
        ReportRepositoryError::CommentNotFound { .. } => Error::not_found("comment not found"),
        ReportRepositoryError::ReasonNotFound { .. } => Error::not_found("reason does not exist"),
    }
}

/// Report service implementing [`ReportCommand`] and [`ReasonsQuery`].
#[derive(Clone)]
pub struct ReportService<A, C, R> {
    articles: Arc<A>,
    comments: Arc<C>,
    reports: Arc<R>,
}

impl<A, C, R> ReportService<A, C, R> {
    /// Create a new service with the given repositories.
    pub fn new(articles: Arc<A>, comments: Arc<C>, reports: Arc<R>) -> Self {
        Self {
            articles,
            comments,
            reports,
        }
    }
}

impl<A, C, R> ReportService<A, C, R>
where
    R: ReportRepository,
{
    async fn ensure_reason(&self, reason_id: ReasonId) -> Result<(), Error> {
        self.reports
            .find_reason(reason_id)
            .await
            .map_err(map_report_repository_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found("reason does not exist"))
    }
}

#[async_trait]
impl<A, C, R> ReportCommand for ReportService<A, C, R>
where
    A: ArticleRepository,
    C: CommentRepository,
    R: ReportRepository,
{
    async fn report(&self, request: ReportCommentRequest) -> Result<ReportedComment, Error> {
        let article = find_article(self.articles.as_ref(), &request.article_slug).await?;
        self.ensure_reason(request.reason_id).await?;
        let comment =
            find_article_comment(self.comments.as_ref(), &article, request.comment_id).await?;

        let report = NewReport {
            user_id: request.user_id,
            comment_id: comment.id,
            reason_id: request.reason_id,
        };
        if self
            .reports
            .exists(&report)
            .await
            .map_err(map_report_repository_error)?
        {
            return Err(duplicate_report());
        }

        let stored = self
            .reports
            .insert(&report)
            .await
            .map_err(map_report_repository_error)?;
        info!(
            comment_id = %stored.comment_id,
            reason_id = %stored.reason_id,
            "comment reported"
        );
        Ok(stored)
    }
}

#[async_trait]
impl<A, C, R> ReasonsQuery for ReportService<A, C, R>
where
    A: Send + Sync,
    C: Send + Sync,
    R: ReportRepository,
{
    async fn list_reasons(&self) -> Result<Vec<Reason>, Error> {
        self.reports
            .list_reasons()
            .await
            .map_err(map_report_repository_error)
    }
}
