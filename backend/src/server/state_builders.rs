//! Builders for HTTP state ports from repository and uploader adapters.

use std::sync::Arc;

use actix_web::web;

use blog_backend::domain::ports::{
    ArticleRepository, CommentRepository, FixtureArticleRepository, FixtureCommentRepository,
    FixtureImageUploader, FixtureLoginService, FixtureReportRepository, ImageUploader,
    LoginService, ReportRepository,
};
use blog_backend::domain::{ArticleService, CommentService, ReportService};
use blog_backend::inbound::http::state::{HttpState, HttpStatePorts};
use blog_backend::outbound::persistence::{
    DieselArticleRepository, DieselCommentRepository, DieselReportRepository,
};

use super::ServerConfig;

/// Wire the domain services over one set of repositories.
///
/// Articles, comments, and reports share the same article and comment
/// repositories so lookups stay consistent across services.
fn wire_services<A, C, R>(
    articles_repo: Arc<A>,
    comments_repo: Arc<C>,
    reports_repo: Arc<R>,
    uploader: Arc<dyn ImageUploader>,
    login: Arc<dyn LoginService>,
) -> HttpStatePorts
where
    A: ArticleRepository + 'static,
    C: CommentRepository + 'static,
    R: ReportRepository + 'static,
{
    let articles = Arc::new(ArticleService::new(articles_repo.clone(), uploader));
    let comments = Arc::new(CommentService::new(
        articles_repo.clone(),
        comments_repo.clone(),
    ));
    let reports = Arc::new(ReportService::new(articles_repo, comments_repo, reports_repo));

    HttpStatePorts {
        login,
        articles: articles.clone(),
        articles_query: articles,
        comments: comments.clone(),
        comments_query: comments,
        reports: reports.clone(),
        reasons: reports,
    }
}

fn build_ports(config: &ServerConfig) -> HttpStatePorts {
    let uploader = config
        .image_uploader
        .clone()
        .unwrap_or_else(|| Arc::new(FixtureImageUploader) as Arc<dyn ImageUploader>);
    let login: Arc<dyn LoginService> = Arc::new(FixtureLoginService);

    match &config.db_pool {
        Some(pool) => wire_services(
            Arc::new(DieselArticleRepository::new(pool.clone())),
            Arc::new(DieselCommentRepository::new(pool.clone())),
            Arc::new(DieselReportRepository::new(pool.clone())),
            uploader,
            login,
        ),
        None => wire_services(
            Arc::new(FixtureArticleRepository),
            Arc::new(FixtureCommentRepository),
            Arc::new(FixtureReportRepository),
            uploader,
            login,
        ),
    }
}

/// Build the shared HTTP state from configured adapters and fixture fallbacks.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(build_ports(config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::{Key, SameSite};
    use blog_backend::domain::{ArticleSlug, ErrorCode, LoginCredentials};
    use blog_backend::inbound::http::session_config::SessionSettings;
    use rstest::{fixture, rstest};

    #[fixture]
    fn config() -> ServerConfig {
        ServerConfig::new(
            SessionSettings {
                key: Key::generate(),
                cookie_secure: false,
                same_site: SameSite::Lax,
            },
            "127.0.0.1:0".parse().expect("socket address"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_wiring_serves_the_reason_catalogue(config: ServerConfig) {
        let ports = build_ports(&config);

        let reasons = ports.reasons.list_reasons().await.expect("reasons");
        assert_eq!(reasons.len(), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_wiring_accepts_the_development_login(config: ServerConfig) {
        let ports = build_ports(&config);
        let credentials =
            LoginCredentials::try_from_parts("admin", "password").expect("credentials shape");

        let user = ports.login.authenticate(&credentials).await.expect("login");
        assert_eq!(user.as_ref(), FixtureLoginService::USER_ID);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_article_lookups_are_not_found(config: ServerConfig) {
        let ports = build_ports(&config);
        let slug = ArticleSlug::new("missing").expect("slug");

        let err = ports.articles_query.get(&slug).await.expect_err("no articles");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
