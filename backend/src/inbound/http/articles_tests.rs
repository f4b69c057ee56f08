//! Tests for article HTTP handlers.

use super::*;
use crate::domain::{ArticleId, ArticleSlug, ErrorCode, UserId};
use crate::inbound::http::test_utils::{TestPorts, login_cookie, test_session_middleware};
use crate::inbound::http::users::login;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use chrono::Utc;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const FIXTURE_USER: &str = "123e4567-e89b-12d3-a456-426614174000";

fn test_app(
    ports: TestPorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::from(ports)))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(login)
                .service(create_article)
                .service(get_article)
                .service(update_article)
                .service(delete_article),
        )
}

#[fixture]
fn article() -> Article {
    let now = Utc::now();
    Article {
        id: ArticleId::new(7),
        slug: ArticleSlug::new("hello-world").expect("valid slug"),
        content: ArticleContent::new("Hello, World", "Greeting", "Body", vec!["intro".into()])
            .expect("valid content"),
        author_id: UserId::new(FIXTURE_USER).expect("fixture user"),
        category_id: CategoryId::new(1),
        cover_image_url: None,
        created_at: now,
        updated_at: now,
    }
}

#[rstest]
#[actix_web::test]
async fn create_decodes_cover_and_returns_created(article: Article) {
    let mut ports = TestPorts::default();
    let stored = Article {
        cover_image_url: Some("https://images.blog.invalid/cover.png".to_owned()),
        ..article
    };
    ports
        .articles
        .expect_create()
        .withf(|request| {
            request.content.title() == "Hello, World"
                && request.category_id == CategoryId::new(1)
                && request
                    .cover_image
                    .as_ref()
                    .is_some_and(|image| image.bytes() == b"png!")
        })
        .return_once(move |_| Ok(stored));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/articles")
            .cookie(cookie)
            .set_json(json!({
                "title": "Hello, World",
                "description": "Greeting",
                "body": "Body",
                "tagList": ["intro"],
                "categoryId": 1,
                "coverImage": {
                    "fileName": "cover.png",
                    "contentType": "image/png",
                    "data": "cG5nIQ=="
                }
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["message"], "Article created successfully");
    assert_eq!(value["article"]["slug"], "hello-world");
    assert_eq!(
        value["article"]["coverImageUrl"],
        "https://images.blog.invalid/cover.png"
    );
    assert_eq!(value["article"]["tagList"], json!(["intro"]));
}

#[rstest]
#[case(json!({ "description": "d", "body": "b", "categoryId": 1 }), "title", "missing_field")]
#[case(json!({ "title": " ", "description": "d", "body": "b", "categoryId": 1 }), "title", "empty_field")]
#[case(json!({ "title": "t", "description": "d", "body": "b" }), "categoryId", "missing_field")]
#[case(
    json!({
        "title": "t", "description": "d", "body": "b", "categoryId": 1,
        "coverImage": { "fileName": "a.txt", "contentType": "text/plain", "data": "aGk=" }
    }),
    "coverImage",
    "unsupported_media_type"
)]
#[actix_web::test]
async fn create_rejects_invalid_payloads(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(TestPorts::default())).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/articles")
            .cookie(cookie)
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["details"]["field"], field);
    assert_eq!(value["details"]["code"], code);
}

#[actix_web::test]
async fn upload_outage_is_service_unavailable() {
    let mut ports = TestPorts::default();
    ports
        .articles
        .expect_create()
        .return_once(|_| Err(Error::service_unavailable("image upload failed")));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/articles")
            .cookie(cookie)
            .set_json(json!({
                "title": "t", "description": "d", "body": "b", "categoryId": 1,
                "coverImage": { "fileName": "c.png", "contentType": "image/png", "data": "aGk=" }
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[rstest]
#[actix_web::test]
async fn get_returns_article(article: Article) {
    let mut ports = TestPorts::default();
    ports
        .articles_query
        .expect_get()
        .withf(|slug| slug.as_ref() == "hello-world")
        .return_once(move |_| Ok(article));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/articles/hello-world")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["title"], "Hello, World");
    assert_eq!(value["authorId"], FIXTURE_USER);
}

#[rstest]
#[actix_web::test]
async fn update_forwards_only_supplied_fields(article: Article) {
    let mut ports = TestPorts::default();
    ports
        .articles
        .expect_update()
        .withf(|request| {
            request.patch.title.as_deref() == Some("Renamed")
                && request.patch.body.is_none()
                && request.patch.category_id.is_none()
                && request.cover_image.is_none()
        })
        .return_once(move |_| Ok(article));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/v1/articles/hello-world")
            .cookie(cookie)
            .set_json(json!({ "title": "Renamed" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["message"], "Article updated successfully");
}

#[rstest]
#[case(Error::forbidden("only the author can modify this article"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("article not found"), StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn delete_failures_keep_their_status(#[case] error: Error, #[case] status: StatusCode) {
    let mut ports = TestPorts::default();
    ports
        .articles
        .expect_delete()
        .return_once(move |_| Err(error));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/articles/hello-world")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), status);
}

#[actix_web::test]
async fn delete_confirms_removal() {
    let mut ports = TestPorts::default();
    ports.articles.expect_delete().return_once(|_| Ok(()));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/articles/hello-world")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["message"], "Article deleted successfully");
}

#[rstest]
fn parse_update_keeps_omitted_fields_empty() {
    let (patch, cover) = parse_update(UpdateArticleBody {
        category_id: Some(3),
        ..UpdateArticleBody::default()
    })
    .expect("valid patch");

    assert_eq!(patch.category_id, Some(CategoryId::new(3)));
    assert!(patch.title.is_none());
    assert!(cover.is_none());
}

#[rstest]
fn parse_create_rejects_bad_base64() {
    let err = parse_create(CreateArticleBody {
        title: Some("t".into()),
        description: Some("d".into()),
        body: Some("b".into()),
        tag_list: None,
        category_id: Some(1),
        cover_image: Some(CoverImagePayload {
            file_name: "c.png".into(),
            content_type: "image/png".into(),
            data: "%%%".into(),
        }),
    })
    .err()
    .expect("invalid image");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}
