//! Port for comment reports and the reason catalogue.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{NewReport, Reason, ReasonId, ReportedComment};

use super::define_port_error;

define_port_error! {
    /// Errors raised by report repository adapters.
    pub enum ReportRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "report repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "report repository query failed: {message}",
        /// The (user, comment, reason) triple is already stored.
        DuplicateReport =>
            "comment already reported for this reason",
        /// Referenced comment does not exist.
        CommentNotFound { comment_id: i64 } =>
            "comment not found: {comment_id}",
        /// Referenced reason does not exist.
        ReasonNotFound { reason_id: i32 } =>
            "reason not found: {reason_id}",
    }
}

/// Port for report storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Fetch a catalogue reason, returning `None` when absent.
    async fn find_reason(&self, reason_id: ReasonId)
    -> Result<Option<Reason>, ReportRepositoryError>;

    /// List the full reason catalogue ordered by id.
    async fn list_reasons(&self) -> Result<Vec<Reason>, ReportRepositoryError>;

    /// Whether the exact triple has been reported before.
    async fn exists(&self, report: &NewReport) -> Result<bool, ReportRepositoryError>;

    /// Store a report.
    ///
    /// A concurrent duplicate surfaces as
    /// [`ReportRepositoryError::DuplicateReport`].
    async fn insert(&self, report: &NewReport) -> Result<ReportedComment, ReportRepositoryError>;
}

/// Fixture implementation for running without a database.
///
/// Serves a small static reason catalogue; reports are echoed, not stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReportRepository;

const FIXTURE_REASONS: [(i32, &str); 3] = [
    (1, "spam"),
    (2, "harassment"),
    (3, "off-topic"),
];

fn fixture_reasons() -> Vec<Reason> {
    FIXTURE_REASONS
        .iter()
        .map(|(id, description)| Reason {
            id: ReasonId::new(*id),
            description: (*description).to_owned(),
        })
        .collect()
}

#[async_trait]
impl ReportRepository for FixtureReportRepository {
    async fn find_reason(
        &self,
        reason_id: ReasonId,
    ) -> Result<Option<Reason>, ReportRepositoryError> {
        Ok(fixture_reasons()
            .into_iter()
            .find(|reason| reason.id == reason_id))
    }

    async fn list_reasons(&self) -> Result<Vec<Reason>, ReportRepositoryError> {
        Ok(fixture_reasons())
    }

    async fn exists(&self, _report: &NewReport) -> Result<bool, ReportRepositoryError> {
        Ok(false)
    }

    async fn insert(&self, report: &NewReport) -> Result<ReportedComment, ReportRepositoryError> {
        Ok(ReportedComment {
            user_id: report.user_id.clone(),
            comment_id: report.comment_id,
            reason_id: report.reason_id,
            created_at: Utc::now(),
        })
    }
}
