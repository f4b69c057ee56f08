//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types validate
//! stored values again and fail with a message instead of panicking.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Article, ArticleContent, ArticleId, ArticleSlug, Category, CategoryId, Comment, CommentId,
    Reason, ReasonId, ReportedComment, UserId,
};

use super::diesel_helpers::cast_iteration;
use super::schema::{articles, categories, comments, report_reasons, reported_comments};

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i32,
    pub name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
        }
    }
}

/// Row struct for reading from the articles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ArticleRow {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
    pub author_id: Uuid,
    pub category_id: i32,
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = String;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let slug = ArticleSlug::new(row.slug)
            .map_err(|err| format!("invalid stored slug for article {}: {err}", row.id))?;
        let content = ArticleContent::new(row.title, row.description, row.body, row.tag_list)
            .map_err(|err| format!("invalid stored content for article {}: {err}", row.id))?;
        Ok(Self {
            id: ArticleId::new(row.id),
            slug,
            content,
            author_id: UserId::from_uuid(row.author_id),
            category_id: CategoryId::new(row.category_id),
            cover_image_url: row.cover_image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for new articles.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = articles)]
pub(crate) struct NewArticleRow<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub body: &'a str,
    pub tag_list: Vec<String>,
    pub author_id: Uuid,
    pub category_id: i32,
    pub cover_image_url: Option<&'a str>,
}

/// Changeset for the editable article columns.
///
/// The slug and author never change after insert.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = articles)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ArticleUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub body: &'a str,
    pub tag_list: Vec<String>,
    pub category_id: i32,
    pub cover_image_url: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Row struct for reading from the comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i64,
    pub article_id: i64,
    pub author_id: Uuid,
    pub body: String,
    pub parent_comment_id: Option<i64>,
    pub iteration: i32,
    pub is_edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: CommentId::new(row.id),
            article_id: ArticleId::new(row.article_id),
            author_id: UserId::from_uuid(row.author_id),
            body: row.body,
            parent_comment_id: row.parent_comment_id.map(CommentId::new),
            iteration: cast_iteration(row.iteration),
            is_edited: row.is_edited,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for new comments; iteration and edit flag default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub article_id: i64,
    pub author_id: Uuid,
    pub body: &'a str,
    pub parent_comment_id: Option<i64>,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = report_reasons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReasonRow {
    pub id: i32,
    pub description: String,
}

impl From<ReasonRow> for Reason {
    fn from(row: ReasonRow) -> Self {
        Self {
            id: ReasonId::new(row.id),
            description: row.description,
        }
    }
}

/// Row struct for reading from the reported_comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reported_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReportRow {
    pub user_id: Uuid,
    pub comment_id: i64,
    pub reason_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<ReportRow> for ReportedComment {
    fn from(row: ReportRow) -> Self {
        Self {
            user_id: UserId::from_uuid(row.user_id),
            comment_id: CommentId::new(row.comment_id),
            reason_id: ReasonId::new(row.reason_id),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reported_comments)]
pub(crate) struct NewReportRow {
    pub user_id: Uuid,
    pub comment_id: i64,
    pub reason_id: i32,
}
