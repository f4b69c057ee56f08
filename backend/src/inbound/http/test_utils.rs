//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use serde_json::json;

use crate::domain::ports::{
    ArticlesCommand, ArticlesQuery, CommentsCommand, CommentsQuery, FixtureLoginService,
    LoginService, MockArticlesCommand, MockArticlesQuery, MockCommentsCommand, MockCommentsQuery,
    MockReasonsQuery, MockReportCommand, ReasonsQuery, ReportCommand,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Driving-port doubles for handler tests; unset ports reject every call.
pub struct TestPorts {
    pub articles: MockArticlesCommand,
    pub articles_query: MockArticlesQuery,
    pub comments: MockCommentsCommand,
    pub comments_query: MockCommentsQuery,
    pub reports: MockReportCommand,
    pub reasons: MockReasonsQuery,
}

impl Default for TestPorts {
    fn default() -> Self {
        Self {
            articles: MockArticlesCommand::new(),
            articles_query: MockArticlesQuery::new(),
            comments: MockCommentsCommand::new(),
            comments_query: MockCommentsQuery::new(),
            reports: MockReportCommand::new(),
            reasons: MockReasonsQuery::new(),
        }
    }
}

impl From<TestPorts> for HttpState {
    fn from(ports: TestPorts) -> Self {
        HttpState::new(HttpStatePorts {
            login: Arc::new(FixtureLoginService) as Arc<dyn LoginService>,
            articles: Arc::new(ports.articles) as Arc<dyn ArticlesCommand>,
            articles_query: Arc::new(ports.articles_query) as Arc<dyn ArticlesQuery>,
            comments: Arc::new(ports.comments) as Arc<dyn CommentsCommand>,
            comments_query: Arc::new(ports.comments_query) as Arc<dyn CommentsQuery>,
            reports: Arc::new(ports.reports) as Arc<dyn ReportCommand>,
            reasons: Arc::new(ports.reasons) as Arc<dyn ReasonsQuery>,
        })
    }
}

/// Log in with the fixture account and return the session cookie.
pub async fn login_cookie<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": "admin", "password": "password" }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "fixture login succeeds");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
