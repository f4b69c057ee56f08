//! In-memory repositories mirroring the PostgreSQL constraints.
//!
//! One [`MemoryStore`] backs the article, comment, and report ports so
//! cascades and foreign keys behave as they do against the real schema:
//! deleting an article drops its comments, deleting a comment drops its
//! replies and reports, and inserts reject dangling references.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use blog_backend::domain::ports::{
    ArticleRepository, ArticleRepositoryError, CommentRepository, CommentRepositoryError,
    ReportRepository, ReportRepositoryError,
};
use blog_backend::domain::{
    Article, ArticleId, ArticleSlug, Category, CategoryId, Comment, CommentBody, CommentId,
    CommentPage, MAX_COMMENT_DEPTH, NewArticle, NewComment, NewReport, Reason, ReasonId,
    ReportedComment,
};
use chrono::Utc;
use pagination::PageParams;

const CATEGORIES: [(i32, &str); 3] = [(1, "general"), (2, "technology"), (3, "lifestyle")];
const REASONS: [(i32, &str); 3] = [(1, "spam"), (2, "harassment"), (3, "off-topic")];

#[derive(Default)]
struct Tables {
    articles: BTreeMap<i64, Article>,
    comments: BTreeMap<i64, Comment>,
    reports: Vec<ReportedComment>,
    next_article_id: i64,
    next_comment_id: i64,
}

impl Tables {
    fn drop_comment_tree(&mut self, comment_id: i64) {
        let replies: Vec<i64> = self
            .comments
            .values()
            .filter(|comment| comment.parent_comment_id.map(CommentId::get) == Some(comment_id))
            .map(|comment| comment.id.get())
            .collect();
        for reply in replies {
            self.drop_comment_tree(reply);
        }
        self.comments.remove(&comment_id);
        self.reports
            .retain(|report| report.comment_id.get() != comment_id);
    }
}

/// Shared in-memory tables implementing every repository port.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store lock")
    }

    /// Number of reports stored against `comment_id`.
    pub fn report_count(&self, comment_id: i64) -> usize {
        self.lock()
            .reports
            .iter()
            .filter(|report| report.comment_id.get() == comment_id)
            .count()
    }
}

#[async_trait]
impl ArticleRepository for MemoryStore {
    async fn find_by_slug(
        &self,
        slug: &ArticleSlug,
    ) -> Result<Option<Article>, ArticleRepositoryError> {
        Ok(self
            .lock()
            .articles
            .values()
            .find(|article| &article.slug == slug)
            .cloned())
    }

    async fn slug_exists(&self, slug: &ArticleSlug) -> Result<bool, ArticleRepositoryError> {
        Ok(self.find_by_slug(slug).await?.is_some())
    }

    async fn find_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Option<Category>, ArticleRepositoryError> {
        Ok(CATEGORIES
            .iter()
            .find(|(id, _)| *id == category_id.get())
            .map(|(id, name)| Category {
                id: CategoryId::new(*id),
                name: (*name).to_owned(),
            }))
    }

    async fn insert(&self, article: &NewArticle) -> Result<Article, ArticleRepositoryError> {
        if !CATEGORIES
            .iter()
            .any(|(id, _)| *id == article.category_id.get())
        {
            return Err(ArticleRepositoryError::category_not_found(
                article.category_id.get(),
            ));
        }
        let mut tables = self.lock();
        if tables
            .articles
            .values()
            .any(|stored| stored.slug == article.slug)
        {
            return Err(ArticleRepositoryError::slug_taken(article.slug.to_string()));
        }
        tables.next_article_id += 1;
        let now = Utc::now();
        let stored = Article {
            id: ArticleId::new(tables.next_article_id),
            slug: article.slug.clone(),
            content: article.content.clone(),
            author_id: article.author_id.clone(),
            category_id: article.category_id,
            cover_image_url: article.cover_image_url.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.articles.insert(stored.id.get(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, article: &Article) -> Result<Article, ArticleRepositoryError> {
        let mut tables = self.lock();
        let Some(stored) = tables.articles.get_mut(&article.id.get()) else {
            return Err(ArticleRepositoryError::article_not_found(
                article.slug.to_string(),
            ));
        };
        *stored = Article {
            updated_at: Utc::now(),
            ..article.clone()
        };
        Ok(stored.clone())
    }

    async fn delete_by_slug(&self, slug: &ArticleSlug) -> Result<bool, ArticleRepositoryError> {
        let mut tables = self.lock();
        let Some(article_id) = tables
            .articles
            .values()
            .find(|article| &article.slug == slug)
            .map(|article| article.id)
        else {
            return Ok(false);
        };
        tables.articles.remove(&article_id.get());
        let orphaned: Vec<i64> = tables
            .comments
            .values()
            .filter(|comment| comment.article_id == article_id)
            .map(|comment| comment.id.get())
            .collect();
        for comment_id in orphaned {
            tables.drop_comment_tree(comment_id);
        }
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(
        &self,
        comment_id: CommentId,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        Ok(self.lock().comments.get(&comment_id.get()).cloned())
    }

    async fn list_for_article(
        &self,
        article_id: ArticleId,
        page: PageParams,
    ) -> Result<CommentPage, CommentRepositoryError> {
        let tables = self.lock();
        let matching: Vec<&Comment> = tables
            .comments
            .values()
            .filter(|comment| comment.article_id == article_id)
            .collect();
        let total = matching.len() as u64;
        let comments = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();
        Ok(CommentPage { comments, total })
    }

    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        let mut tables = self.lock();
        if !tables.articles.contains_key(&comment.article_id.get()) {
            return Err(CommentRepositoryError::article_not_found(
                comment.article_id.get(),
            ));
        }
        if let Some(parent_id) = comment.parent_comment_id {
            let Some(parent) = tables.comments.get(&parent_id.get()) else {
                return Err(CommentRepositoryError::parent_not_found(parent_id.get()));
            };
            if parent.article_id != comment.article_id {
                return Err(CommentRepositoryError::parent_not_found(parent_id.get()));
            }
            if parent.depth() >= MAX_COMMENT_DEPTH {
                return Err(CommentRepositoryError::depth_exceeded(parent_id.get()));
            }
        }
        tables.next_comment_id += 1;
        let now = Utc::now();
        let stored = Comment {
            id: CommentId::new(tables.next_comment_id),
            article_id: comment.article_id,
            author_id: comment.author_id.clone(),
            body: comment.body.as_ref().to_owned(),
            parent_comment_id: comment.parent_comment_id,
            iteration: 0,
            is_edited: false,
            created_at: now,
            updated_at: now,
        };
        tables.comments.insert(stored.id.get(), stored.clone());
        Ok(stored)
    }

    async fn update_body(
        &self,
        comment_id: CommentId,
        body: &CommentBody,
        expected_iteration: u32,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut tables = self.lock();
        let Some(stored) = tables.comments.get_mut(&comment_id.get()) else {
            return Err(CommentRepositoryError::comment_not_found(comment_id.get()));
        };
        if stored.iteration != expected_iteration {
            return Err(CommentRepositoryError::iteration_mismatch(
                expected_iteration,
                stored.iteration,
            ));
        }
        stored.body = body.as_ref().to_owned();
        stored.iteration += 1;
        stored.is_edited = true;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, comment_id: CommentId) -> Result<bool, CommentRepositoryError> {
        let mut tables = self.lock();
        if !tables.comments.contains_key(&comment_id.get()) {
            return Ok(false);
        }
        tables.drop_comment_tree(comment_id.get());
        Ok(true)
    }
}

fn reason(id: ReasonId) -> Option<Reason> {
    REASONS
        .iter()
        .find(|(raw, _)| *raw == id.get())
        .map(|(raw, description)| Reason {
            id: ReasonId::new(*raw),
            description: (*description).to_owned(),
        })
}

#[async_trait]
impl ReportRepository for MemoryStore {
    async fn find_reason(
        &self,
        reason_id: ReasonId,
    ) -> Result<Option<Reason>, ReportRepositoryError> {
        Ok(reason(reason_id))
    }

    async fn list_reasons(&self) -> Result<Vec<Reason>, ReportRepositoryError> {
        Ok(REASONS
            .iter()
            .filter_map(|(id, _)| reason(ReasonId::new(*id)))
            .collect())
    }

    async fn exists(&self, report: &NewReport) -> Result<bool, ReportRepositoryError> {
        Ok(self.lock().reports.iter().any(|stored| {
            stored.user_id == report.user_id
                && stored.comment_id == report.comment_id
                && stored.reason_id == report.reason_id
        }))
    }

    async fn insert(&self, report: &NewReport) -> Result<ReportedComment, ReportRepositoryError> {
        if reason(report.reason_id).is_none() {
            return Err(ReportRepositoryError::reason_not_found(
                report.reason_id.get(),
            ));
        }
        if self.exists(report).await? {
            return Err(ReportRepositoryError::duplicate_report());
        }
        let mut tables = self.lock();
        if !tables.comments.contains_key(&report.comment_id.get()) {
            return Err(ReportRepositoryError::comment_not_found(
                report.comment_id.get(),
            ));
        }
        let stored = ReportedComment {
            user_id: report.user_id.clone(),
            comment_id: report.comment_id,
            reason_id: report.reason_id,
            created_at: Utc::now(),
        };
        tables.reports.push(stored.clone());
        Ok(stored)
    }
}
