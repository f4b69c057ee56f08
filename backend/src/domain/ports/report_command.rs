//! Driving ports for comment reports.

use async_trait::async_trait;

use crate::domain::{ArticleSlug, CommentId, Error, Reason, ReasonId, ReportedComment, UserId};

/// Request to report a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCommentRequest {
    /// Article owning the comment.
    pub article_slug: ArticleSlug,
    /// Comment being reported.
    pub comment_id: CommentId,
    /// Authenticated reporter.
    pub user_id: UserId,
    /// Catalogue reason.
    pub reason_id: ReasonId,
}

/// Driving port for filing reports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportCommand: Send + Sync {
    /// File a report.
    ///
    /// Reporting the same comment twice for the same reason yields an
    /// `invalid_request` error.
    async fn report(&self, request: ReportCommentRequest) -> Result<ReportedComment, Error>;
}

/// Driving port for the reason catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReasonsQuery: Send + Sync {
    /// List every report reason ordered by id.
    async fn list_reasons(&self) -> Result<Vec<Reason>, Error>;
}
