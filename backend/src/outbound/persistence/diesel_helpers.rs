//! Shared helpers for Diesel repository implementations.
//!
//! Repositories translate Diesel failures into their own port errors. The
//! helpers here classify a failure once so each adapter only has to decide
//! what a given constraint means for its port.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Extract a readable message from a pool error.
pub fn map_pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Store-level failure reduced to what repositories branch on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreFailure {
    /// Unique index or primary key collision.
    Unique { constraint: Option<String> },
    /// Referenced row is missing.
    ForeignKey { constraint: Option<String> },
    /// Check constraint or trigger guard rejected the row.
    Check { constraint: Option<String> },
    /// Connection dropped mid-operation.
    Connection,
    /// Anything else.
    Query { message: &'static str },
}

/// Classify a Diesel error and emit debug context.
pub fn classify_diesel_error(error: DieselError) -> StoreFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => StoreFailure::Query {
            message: "record not found",
        },
        DieselError::QueryBuilderError(_) => StoreFailure::Query {
            message: "database query error",
        },
        DieselError::DatabaseError(kind, info) => {
            let constraint = info.constraint_name().map(str::to_owned);
            match kind {
                DatabaseErrorKind::UniqueViolation => StoreFailure::Unique { constraint },
                DatabaseErrorKind::ForeignKeyViolation => StoreFailure::ForeignKey { constraint },
                DatabaseErrorKind::CheckViolation => StoreFailure::Check { constraint },
                DatabaseErrorKind::ClosedConnection => StoreFailure::Connection,
                _ => StoreFailure::Query {
                    message: "database error",
                },
            }
        }
        _ => StoreFailure::Query {
            message: "database error",
        },
    }
}

/// Whether `constraint` names the given constraint.
pub fn is_constraint(constraint: Option<&str>, name: &str) -> bool {
    constraint == Some(name)
}

/// Cast a stored iteration (`INTEGER`) to the domain counter.
///
/// A check constraint keeps the column non-negative.
#[expect(
    clippy::cast_sign_loss,
    reason = "iteration is constrained to be non-negative"
)]
pub fn cast_iteration(iteration: i32) -> u32 {
    iteration as u32
}

/// Cast a domain iteration to its stored form.
#[expect(
    clippy::cast_possible_wrap,
    reason = "iteration counts edits and stays far below i32::MAX"
)]
pub fn cast_iteration_for_db(iteration: u32) -> i32 {
    iteration as i32
}

/// Collect row conversion results, mapping the first error through `map_err`.
pub fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}
