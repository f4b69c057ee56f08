//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed entities for articles, threaded comments,
//! and moderation reports, plus the services that enforce their lifecycle
//! rules. Adapters reach the domain only through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - Article, Comment, ReportedComment: stored aggregates.
//! - ArticleService, CommentService, ReportService: driving-port
//!   implementations.

pub mod articles;
pub mod auth;
pub mod comments;
pub mod error;
pub mod ports;
pub mod reports;
pub mod trace_id;
pub mod user;

pub use self::articles::{
    Article, ArticleContent, ArticleId, ArticlePatch, ArticleService, ArticleSlug,
    ArticleValidationError, Category, CategoryId, CoverImage, NewArticle, TITLE_MAX,
};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::comments::{
    Comment, CommentBody, CommentId, CommentPage, CommentService, CommentValidationError,
    MAX_COMMENT_DEPTH, NewComment,
};
pub use self::error::{Error, ErrorCode};
pub use self::reports::{NewReport, Reason, ReasonId, ReportService, ReportedComment};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserIdValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use blog_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
