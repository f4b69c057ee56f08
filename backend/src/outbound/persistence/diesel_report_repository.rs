//! PostgreSQL-backed `ReportRepository` implementation using Diesel ORM.
//!
//! The `(user_id, comment_id, reason_id)` primary key makes duplicate
//! reports fail at store level even when two requests race past
//! [`ReportRepository::exists`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ReportRepository, ReportRepositoryError};
use crate::domain::{NewReport, Reason, ReasonId, ReportedComment};

use super::diesel_helpers::{
    StoreFailure, classify_diesel_error, is_constraint, map_pool_error_message,
};
use super::models::{NewReportRow, ReasonRow, ReportRow};
use super::pool::{DbPool, PoolError};
use super::schema::{report_reasons, reported_comments};

const REPORT_PKEY: &str = "reported_comments_pkey";
const COMMENT_FKEY: &str = "reported_comments_comment_id_fkey";
const REASON_FKEY: &str = "reported_comments_reason_id_fkey";

/// Diesel-backed implementation of the report repository port.
#[derive(Clone)]
pub struct DieselReportRepository {
    pool: DbPool,
}

impl DieselReportRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReportRepositoryError {
    ReportRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(
    error: diesel::result::Error,
    target: Option<&NewReport>,
) -> ReportRepositoryError {
    match (classify_diesel_error(error), target) {
        (StoreFailure::Unique { constraint }, Some(_))
            if is_constraint(constraint.as_deref(), REPORT_PKEY) =>
        {
            ReportRepositoryError::duplicate_report()
        }
        (StoreFailure::ForeignKey { constraint }, Some(report))
            if is_constraint(constraint.as_deref(), COMMENT_FKEY) =>
        {
            ReportRepositoryError::comment_not_found(report.comment_id.get())
        }
        (StoreFailure::ForeignKey { constraint }, Some(report))
            if is_constraint(constraint.as_deref(), REASON_FKEY) =>
        {
            ReportRepositoryError::reason_not_found(report.reason_id.get())
        }
        (StoreFailure::Connection, _) => {
            ReportRepositoryError::connection("database connection error")
        }
        (StoreFailure::Query { message }, _) => ReportRepositoryError::query(message),
        (failure, _) => {
            warn!(?failure, "unexpected constraint violation on reported_comments");
            ReportRepositoryError::query("constraint violation")
        }
    }
}

#[async_trait]
impl ReportRepository for DieselReportRepository {
    async fn find_reason(
        &self,
        reason_id: ReasonId,
    ) -> Result<Option<Reason>, ReportRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ReasonRow> = report_reasons::table
            .find(reason_id.get())
            .select(ReasonRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        Ok(row.map(Reason::from))
    }

    async fn list_reasons(&self) -> Result<Vec<Reason>, ReportRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ReasonRow> = report_reasons::table
            .select(ReasonRow::as_select())
            .order_by(report_reasons::id)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        Ok(rows.into_iter().map(Reason::from).collect())
    }

    async fn exists(&self, report: &NewReport) -> Result<bool, ReportRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(reported_comments::table.find((
            *report.user_id.as_uuid(),
            report.comment_id.get(),
            report.reason_id.get(),
        ))))
        .get_result(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, None))
    }

    async fn insert(&self, report: &NewReport) -> Result<ReportedComment, ReportRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewReportRow {
            user_id: *report.user_id.as_uuid(),
            comment_id: report.comment_id.get(),
            reason_id: report.reason_id.get(),
        };

        let row: ReportRow = diesel::insert_into(reported_comments::table)
            .values(&new_row)
            .returning(ReportRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(report)))?;

        Ok(ReportedComment::from(row))
    }
}
