//! Comment moderation reports.
//!
//! A report ties a user, a comment, and a reason from the fixed catalogue.
//! Each triple can be filed once; the same user may still report the same
//! comment under a different reason.

mod service;
#[cfg(test)]
mod service_tests;

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::{CommentId, UserId};

pub use service::ReportService;

/// Reason catalogue identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReasonId(i32);

impl ReasonId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ReasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entry of the read-only reason catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reason {
    /// Catalogue identifier.
    pub id: ReasonId,
    /// Human-readable description, e.g. "spam".
    pub description: String,
}

/// The deduplication key of a report.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NewReport {
    /// Reporting user.
    pub user_id: UserId,
    /// Reported comment.
    pub comment_id: CommentId,
    /// Catalogue reason.
    pub reason_id: ReasonId,
}

/// Stored report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedComment {
    /// Reporting user.
    pub user_id: UserId,
    /// Reported comment.
    pub comment_id: CommentId,
    /// Catalogue reason.
    pub reason_id: ReasonId,
    /// Time the report was filed.
    pub created_at: DateTime<Utc>,
}
