//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the article, comment, and report repository
//! ports backed by PostgreSQL via `diesel-async` and `bb8` pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Lifecycle rules live in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Store-level invariants**: constraint and trigger violations are
//!   mapped onto the dedicated port error variants.
//!
//! # Example
//!
//! ```no_run
//! use blog_backend::outbound::persistence::{
//!     DbPool, DieselCommentRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://blog@localhost/blog";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let comments = DieselCommentRepository::new(pool);
//! # let _ = comments;
//! # Ok(())
//! # }
//! ```

mod diesel_article_repository;
mod diesel_comment_repository;
pub(crate) mod diesel_helpers;
mod diesel_report_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_article_repository::DieselArticleRepository;
pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_report_repository::DieselReportRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
