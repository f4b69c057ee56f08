//! Tests for comment HTTP handlers.

use super::*;
use crate::domain::{ArticleId, UserId};
use crate::inbound::http::test_utils::{TestPorts, login_cookie, test_session_middleware};
use crate::inbound::http::users::login;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use chrono::{TimeZone, Utc};
use pagination::PageParams;
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
                .service(create_comment)
                .service(list_comments)
                .service(get_comment)
                .service(update_comment)
                .service(delete_comment),
        )
}

#[fixture]
fn stored_comment() -> Comment {
    let created = Utc
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    Comment {
        id: CommentId::new(42),
        article_id: ArticleId::new(7),
        author_id: UserId::new(FIXTURE_USER).expect("fixture user"),
        body: "First!".to_owned(),
        parent_comment_id: None,
        iteration: 0,
        is_edited: false,
        created_at: created,
        updated_at: created,
    }
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_envelope(stored_comment: Comment) {
    let mut ports = TestPorts::default();
    let reply = Comment {
        id: CommentId::new(43),
        parent_comment_id: Some(CommentId::new(42)),
        body: "Agreed".to_owned(),
        ..stored_comment
    };
    ports
        .comments
        .expect_create()
        .withf(|request| {
            request.article_slug.as_ref() == "hello-world"
                && request.parent_comment_id == Some(CommentId::new(42))
                && request.author_id.as_ref() == FIXTURE_USER
        })
        .times(1)
        .return_once(move |_| Ok(reply));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/articles/hello-world/comments")
            .cookie(cookie)
            .set_json(json!({ "body": "Agreed", "parentCommentId": 42 }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["message"], "Comment created successfully");
    assert_eq!(value["comment"]["id"], 43);
    assert_eq!(value["comment"]["parentCommentId"], 42);
    assert_eq!(value["comment"]["iteration"], 0);
    assert_eq!(value["comment"]["isEdited"], false);
    assert_eq!(value["comment"]["authorId"], FIXTURE_USER);
}

#[actix_web::test]
async fn create_requires_session() {
    let app = actix_test::init_service(test_app(TestPorts::default())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/articles/hello-world/comments")
            .set_json(json!({ "body": "Hi" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case(json!({ "body": "   " }), "empty_body")]
#[case(json!({}), "missing_field")]
#[actix_web::test]
async fn create_rejects_unusable_bodies(#[case] payload: Value, #[case] code: &str) {
    let app = actix_test::init_service(test_app(TestPorts::default())).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/articles/hello-world/comments")
            .cookie(cookie)
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["details"]["field"], "body");
    assert_eq!(value["details"]["code"], code);
}

#[actix_web::test]
async fn reply_to_reply_maps_to_method_not_allowed() {
    let mut ports = TestPorts::default();
    ports
        .comments
        .expect_create()
        .return_once(|_| Err(Error::not_allowed("replies to replies are not allowed")));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/articles/hello-world/comments")
            .cookie(cookie)
            .set_json(json!({ "body": "Deeper", "parentCommentId": 43 }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "not_allowed");
}

#[rstest]
#[actix_web::test]
async fn list_passes_window_and_reports_total(stored_comment: Comment) {
    let mut ports = TestPorts::default();
    ports
        .comments_query
        .expect_list()
        .withf(|request| request.page.offset() == 1 && request.page.limit() == 2)
        .return_once(move |request| Ok(Paginated::new(vec![stored_comment], request.page, 3)));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/articles/hello-world/comments?offset=1&limit=2")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["offset"], 1);
    assert_eq!(value["limit"], 2);
    assert_eq!(value["total"], 3);
    assert_eq!(value["comments"][0]["body"], "First!");
}

#[rstest]
#[case("limit=0")]
#[case("limit=500")]
#[case("offset=minus")]
#[actix_web::test]
async fn list_rejects_bad_windows(#[case] query: &str) {
    let app = actix_test::init_service(test_app(TestPorts::default())).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/articles/hello-world/comments?{query}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn empty_article_listing_is_not_found() {
    let mut ports = TestPorts::default();
    ports
        .comments_query
        .expect_list()
        .return_once(|_| Err(Error::not_found("no comments found")));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/articles/hello-world/comments")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn get_returns_comment(stored_comment: Comment) {
    let mut ports = TestPorts::default();
    ports
        .comments_query
        .expect_get()
        .withf(|request| request.comment_id == CommentId::new(42))
        .return_once(move |_| Ok(stored_comment));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/articles/hello-world/comments/42")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["articleId"], 7);
    assert_eq!(value["createdAt"], "2024-05-01T12:00:00+00:00");
}

#[actix_web::test]
async fn non_numeric_comment_id_is_rejected() {
    let app = actix_test::init_service(test_app(TestPorts::default())).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/articles/hello-world/comments/forty-two")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["details"]["field"], "commentId");
}

#[rstest]
#[actix_web::test]
async fn update_returns_edited_comment(stored_comment: Comment) {
    let mut ports = TestPorts::default();
    let edited = Comment {
        body: "First, edited".to_owned(),
        iteration: 1,
        is_edited: true,
        ..stored_comment
    };
    ports
        .comments
        .expect_update()
        .withf(|request| request.body.as_ref() == "First, edited")
        .return_once(move |_| Ok(edited));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/v1/articles/hello-world/comments/42")
            .cookie(cookie)
            .set_json(json!({ "body": "First, edited" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["message"], "Comment updated successfully");
    assert_eq!(value["comment"]["iteration"], 1);
    assert_eq!(value["comment"]["isEdited"], true);
}

#[rstest]
#[case(Error::invalid_request("comment not modified"), StatusCode::BAD_REQUEST)]
#[case(Error::forbidden("only the author can modify this comment"), StatusCode::FORBIDDEN)]
#[case(Error::conflict("comment was modified concurrently"), StatusCode::CONFLICT)]
#[case(Error::not_found("comment not found"), StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn update_failures_keep_their_status(#[case] error: Error, #[case] status: StatusCode) {
    let mut ports = TestPorts::default();
    ports
        .comments
        .expect_update()
        .return_once(move |_| Err(error));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/v1/articles/hello-world/comments/42")
            .cookie(cookie)
            .set_json(json!({ "body": "First!" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), status);
}

#[actix_web::test]
async fn delete_confirms_removal() {
    let mut ports = TestPorts::default();
    ports
        .comments
        .expect_delete()
        .withf(|request| {
            request.comment_id == CommentId::new(42) && request.user_id.as_ref() == FIXTURE_USER
        })
        .return_once(|_| Ok(()));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/articles/hello-world/comments/42")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value, json!({ "message": "Comment deleted successfully" }));
}

#[rstest]
fn list_response_flattens_page(stored_comment: Comment) {
    let page = Paginated::new(vec![stored_comment], PageParams::default(), 1);

    let response = CommentListResponse::from(page);
    assert_eq!(response.comments.len(), 1);
    assert_eq!(response.limit, 10);
    assert_eq!(response.total, 1);
}
