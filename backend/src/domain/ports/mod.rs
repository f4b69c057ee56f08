//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod article_repository;
mod articles_command;
mod comment_repository;
mod comments_command;
mod comments_query;
mod image_uploader;
mod login_service;
mod report_command;
mod report_repository;

#[cfg(test)]
pub use article_repository::MockArticleRepository;
pub use article_repository::{ArticleRepository, ArticleRepositoryError, FixtureArticleRepository};
#[cfg(test)]
pub use articles_command::{MockArticlesCommand, MockArticlesQuery};
pub use articles_command::{
    ArticlesCommand, ArticlesQuery, CreateArticleRequest, DeleteArticleRequest,
    UpdateArticleRequest,
};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError, FixtureCommentRepository};
#[cfg(test)]
pub use comments_command::MockCommentsCommand;
pub use comments_command::{
    CommentsCommand, CreateCommentRequest, DeleteCommentRequest, UpdateCommentRequest,
};
#[cfg(test)]
pub use comments_query::MockCommentsQuery;
pub use comments_query::{CommentsQuery, GetCommentRequest, ListCommentsRequest};
#[cfg(test)]
pub use image_uploader::MockImageUploader;
pub use image_uploader::{
    FIXTURE_IMAGE_BASE_URL, FixtureImageUploader, ImageUploadError, ImageUploader,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use report_command::{MockReasonsQuery, MockReportCommand};
pub use report_command::{ReasonsQuery, ReportCommand, ReportCommentRequest};
#[cfg(test)]
pub use report_repository::MockReportRepository;
pub use report_repository::{FixtureReportRepository, ReportRepository, ReportRepositoryError};
