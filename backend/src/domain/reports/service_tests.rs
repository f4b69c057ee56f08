//! Tests for the report service.

use std::sync::Arc;

use chrono::Utc;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockArticleRepository, MockCommentRepository, MockReportRepository, ReasonsQuery,
    ReportCommand, ReportCommentRequest, ReportRepositoryError,
};
use crate::domain::{
    Article, ArticleContent, ArticleId, ArticleSlug, CategoryId, Comment, ErrorCode,
};

type Service = ReportService<MockArticleRepository, MockCommentRepository, MockReportRepository>;

#[fixture]
fn reporter() -> UserId {
    UserId::random()
}

fn article() -> Article {
    let now = Utc::now();
    Article {
        id: ArticleId::new(1),
        slug: ArticleSlug::new("reported-post").expect("slug"),
        content: ArticleContent::new("Reported post", "d", "b", vec![]).expect("content"),
        author_id: UserId::random(),
        category_id: CategoryId::new(1),
        cover_image_url: None,
        created_at: now,
        updated_at: now,
    }
}

fn comment(id: i64) -> Comment {
    let now = Utc::now();
    Comment {
        id: CommentId::new(id),
        article_id: ArticleId::new(1),
        author_id: UserId::random(),
        body: "buy cheap watches".to_owned(),
        parent_comment_id: None,
        iteration: 0,
        is_edited: false,
        created_at: now,
        updated_at: now,
    }
}

fn spam() -> Reason {
    Reason {
        id: ReasonId::new(1),
        description: "spam".to_owned(),
    }
}

fn articles() -> MockArticleRepository {
    let mut repo = MockArticleRepository::new();
    repo.expect_find_by_slug()
        .returning(|_| Ok(Some(article())));
    repo
}

fn comments() -> MockCommentRepository {
    let mut repo = MockCommentRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(comment(id.get()))));
    repo
}

fn make_service(reports: MockReportRepository) -> Service {
    ReportService::new(Arc::new(articles()), Arc::new(comments()), Arc::new(reports))
}

fn request(user_id: UserId, reason: i32) -> ReportCommentRequest {
    ReportCommentRequest {
        article_slug: ArticleSlug::new("reported-post").expect("slug"),
        comment_id: CommentId::new(12),
        user_id,
        reason_id: ReasonId::new(reason),
    }
}

#[rstest]
#[tokio::test]
async fn first_report_is_stored(reporter: UserId) {
    let mut reports = MockReportRepository::new();
    reports
        .expect_find_reason()
        .return_once(|_| Ok(Some(spam())));
    reports.expect_exists().return_once(|_| Ok(false));
    reports.expect_insert().times(1).returning(|report| {
        Ok(ReportedComment {
            user_id: report.user_id.clone(),
            comment_id: report.comment_id,
            reason_id: report.reason_id,
            created_at: Utc::now(),
        })
    });

    let stored = make_service(reports)
        .report(request(reporter.clone(), 1))
        .await
        .expect("report stored");
    assert_eq!(stored.user_id, reporter);
    assert_eq!(stored.comment_id, CommentId::new(12));
}

#[rstest]
#[tokio::test]
async fn repeated_report_is_rejected(reporter: UserId) {
    let mut reports = MockReportRepository::new();
    reports
        .expect_find_reason()
        .return_once(|_| Ok(Some(spam())));
    reports.expect_exists().return_once(|_| Ok(true));
    reports.expect_insert().never();

    let err = make_service(reports)
        .report(request(reporter, 1))
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.message(),
        "cannot report this comment twice with the same comment reason"
    );
}

#[rstest]
#[tokio::test]
async fn racing_duplicate_insert_is_rejected(reporter: UserId) {
    let mut reports = MockReportRepository::new();
    reports
        .expect_find_reason()
        .return_once(|_| Ok(Some(spam())));
    reports.expect_exists().return_once(|_| Ok(false));
    reports
        .expect_insert()
        .return_once(|_| Err(ReportRepositoryError::duplicate_report()));

    let err = make_service(reports)
        .report(request(reporter, 1))
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn unknown_reason_is_not_found(reporter: UserId) {
    let mut reports = MockReportRepository::new();
    reports.expect_find_reason().return_once(|_| Ok(None));
    reports.expect_exists().never();
    reports.expect_insert().never();

    let err = make_service(reports)
        .report(request(reporter, 99))
        .await
        .expect_err("unknown reason");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "reason does not exist");
}

#[rstest]
#[tokio::test]
async fn unknown_comment_is_not_found(reporter: UserId) {
    let mut comments = MockCommentRepository::new();
    comments.expect_find_by_id().return_once(|_| Ok(None));
    let mut reports = MockReportRepository::new();
    reports
        .expect_find_reason()
        .return_once(|_| Ok(Some(spam())));
    reports.expect_insert().never();

    let service = ReportService::new(Arc::new(articles()), Arc::new(comments), Arc::new(reports));
    let err = service
        .report(request(reporter, 1))
        .await
        .expect_err("unknown comment");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "comment not found");
}

#[tokio::test]
async fn reasons_are_listed_from_the_catalogue() {
    let mut reports = MockReportRepository::new();
    reports.expect_list_reasons().return_once(|| {
        Ok(vec![
            spam(),
            Reason {
                id: ReasonId::new(2),
                description: "harassment".to_owned(),
            },
        ])
    });

    let reasons = make_service(reports).list_reasons().await.expect("reasons");
    assert_eq!(reasons.len(), 2);
    assert_eq!(reasons[0].description, "spam");
}
