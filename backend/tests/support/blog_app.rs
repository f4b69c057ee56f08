//! Actix application wired over the in-memory store.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use blog_backend::Trace;
use blog_backend::domain::ports::{FixtureImageUploader, FixtureLoginService};
use blog_backend::domain::{ArticleService, CommentService, ReportService};
use blog_backend::inbound::http::state::{HttpState, HttpStatePorts};
use blog_backend::inbound::http::validation::json_config;
use blog_backend::inbound::http::{articles, comments, reports, users};
use serde_json::json;

use super::memory_store::MemoryStore;

/// Build shared HTTP state whose services all read and write `store`.
pub fn http_state(store: &MemoryStore) -> HttpState {
    let shared = Arc::new(store.clone());
    let articles = Arc::new(ArticleService::new(
        shared.clone(),
        Arc::new(FixtureImageUploader),
    ));
    let comments = Arc::new(CommentService::new(shared.clone(), shared.clone()));
    let reports = Arc::new(ReportService::new(shared.clone(), shared.clone(), shared));

    HttpState::new(HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        articles: articles.clone(),
        articles_query: articles,
        comments: comments.clone(),
        comments_query: comments,
        reports: reports.clone(),
        reasons: reports,
    })
}

/// Application exposing every blog route under `/api/v1`.
pub fn blog_app(
    store: &MemoryStore,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();

    App::new()
        .app_data(web::Data::new(http_state(store)))
        .app_data(json_config())
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session)
                .service(users::login)
                .service(reports::list_report_reasons)
                .service(reports::report_comment)
                .service(comments::create_comment)
                .service(comments::list_comments)
                .service(comments::get_comment)
                .service(comments::update_comment)
                .service(comments::delete_comment)
                .service(articles::create_article)
                .service(articles::get_article)
                .service(articles::update_article)
                .service(articles::delete_article),
        )
}

/// Log in with the development account and return the session cookie.
pub async fn login<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": "admin", "password": "password" }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "development login succeeds");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}
