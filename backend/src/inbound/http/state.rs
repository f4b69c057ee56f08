//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only ever see
//! driving ports, so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ArticlesCommand, ArticlesQuery, CommentsCommand, CommentsQuery, LoginService, ReasonsQuery,
    ReportCommand,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Credential check used by `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Article mutations.
    pub articles: Arc<dyn ArticlesCommand>,
    /// Article reads.
    pub articles_query: Arc<dyn ArticlesQuery>,
    /// Comment mutations.
    pub comments: Arc<dyn CommentsCommand>,
    /// Comment reads.
    pub comments_query: Arc<dyn CommentsQuery>,
    /// Comment reporting.
    pub reports: Arc<dyn ReportCommand>,
    /// Report reason catalogue.
    pub reasons: Arc<dyn ReasonsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential check used by `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Article mutations.
    pub articles: Arc<dyn ArticlesCommand>,
    /// Article reads.
    pub articles_query: Arc<dyn ArticlesQuery>,
    /// Comment mutations.
    pub comments: Arc<dyn CommentsCommand>,
    /// Comment reads.
    pub comments_query: Arc<dyn CommentsQuery>,
    /// Comment reporting.
    pub reports: Arc<dyn ReportCommand>,
    /// Report reason catalogue.
    pub reasons: Arc<dyn ReasonsQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use blog_backend::domain::ports::{
    ///     FixtureArticleRepository, FixtureCommentRepository, FixtureImageUploader,
    ///     FixtureLoginService, FixtureReportRepository,
    /// };
    /// use blog_backend::domain::{ArticleService, CommentService, ReportService};
    /// use blog_backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let articles_repo = Arc::new(FixtureArticleRepository);
    /// let comments_repo = Arc::new(FixtureCommentRepository);
    /// let articles = Arc::new(ArticleService::new(
    ///     articles_repo.clone(),
    ///     Arc::new(FixtureImageUploader),
    /// ));
    /// let comments = Arc::new(CommentService::new(articles_repo.clone(), comments_repo.clone()));
    /// let reports = Arc::new(ReportService::new(
    ///     articles_repo,
    ///     comments_repo,
    ///     Arc::new(FixtureReportRepository),
    /// ));
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: Arc::new(FixtureLoginService),
    ///     articles: articles.clone(),
    ///     articles_query: articles,
    ///     comments: comments.clone(),
    ///     comments_query: comments,
    ///     reports: reports.clone(),
    ///     reasons: reports,
    /// });
    /// let _login = state.login.clone();
    /// ```
    #[must_use]
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            articles,
            articles_query,
            comments,
            comments_query,
            reports,
            reasons,
        } = ports;
        Self {
            login,
            articles,
            articles_query,
            comments,
            comments_query,
            reports,
            reasons,
        }
    }
}
