//! Comment lifecycle: threaded discussion attached to articles.
//!
//! Threads are at most two levels deep. A top-level comment may receive
//! replies, but a reply can never itself be replied to. Every edit bumps the
//! comment's `iteration` counter and flags it as edited.

mod service;

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::{ArticleId, UserId};

pub(crate) use service::find_article_comment;
pub use service::CommentService;

/// Deepest allowed thread level; top-level comments sit at depth 1.
pub const MAX_COMMENT_DEPTH: u8 = 2;

/// Store-assigned comment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommentId(i64);

impl CommentId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failures for comment text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    /// Body was blank once trimmed.
    #[error("comment must not be empty")]
    EmptyBody,
}

/// Non-blank comment text.
///
/// The text is stored verbatim; whitespace only matters for the blank check,
/// so duplicate-edit detection compares exactly what the author sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBody(String);

impl CommentBody {
    /// Validate comment text.
    ///
    /// # Examples
    /// ```
    /// use blog_backend::domain::CommentBody;
    ///
    /// assert!(CommentBody::new("Nice post").is_ok());
    /// assert!(CommentBody::new("   ").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, CommentValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(CommentValidationError::EmptyBody);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for CommentBody {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<CommentBody> for String {
    fn from(value: CommentBody) -> Self {
        value.0
    }
}

/// Stored comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Store-assigned identifier.
    pub id: CommentId,
    /// Article the comment belongs to.
    pub article_id: ArticleId,
    /// Author of the comment.
    pub author_id: UserId,
    /// Current text.
    pub body: String,
    /// Parent comment for replies.
    pub parent_comment_id: Option<CommentId>,
    /// Number of successful edits.
    pub iteration: u32,
    /// Whether the comment was edited at least once.
    pub is_edited: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Thread level of this comment: 1 for top-level, 2 for replies.
    #[must_use]
    pub const fn depth(&self) -> u8 {
        match self.parent_comment_id {
            Some(_) => 2,
            None => 1,
        }
    }

    /// Whether a reply to this comment would stay within
    /// [`MAX_COMMENT_DEPTH`].
    #[must_use]
    pub const fn accepts_replies(&self) -> bool {
        self.depth() < MAX_COMMENT_DEPTH
    }

    /// Whether `body` matches the stored text exactly.
    #[must_use]
    pub fn has_body(&self, body: &CommentBody) -> bool {
        self.body == body.as_ref()
    }

    /// Whether `user_id` wrote this comment.
    #[must_use]
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }
}

/// Comment ready to be inserted with `iteration = 0` and `is_edited = false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Article the comment belongs to.
    pub article_id: ArticleId,
    /// Author of the comment.
    pub author_id: UserId,
    /// Comment text.
    pub body: CommentBody,
    /// Parent comment for replies.
    pub parent_comment_id: Option<CommentId>,
}

/// Comments of one article in creation order, plus the article's total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentPage {
    /// Comments inside the requested window.
    pub comments: Vec<Comment>,
    /// Number of comments on the article.
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn comment(parent: Option<i64>) -> Comment {
        let now = Utc::now();
        Comment {
            id: CommentId::new(7),
            article_id: ArticleId::new(1),
            author_id: UserId::random(),
            body: "hello".to_owned(),
            parent_comment_id: parent.map(CommentId::new),
            iteration: 0,
            is_edited: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    #[case(None, 1, true)]
    #[case(Some(3), 2, false)]
    fn depth_controls_replies(
        #[case] parent: Option<i64>,
        #[case] depth: u8,
        #[case] accepts: bool,
    ) {
        let comment = comment(parent);
        assert_eq!(comment.depth(), depth);
        assert_eq!(comment.accepts_replies(), accepts);
    }

    #[rstest]
    #[case("hello", true)]
    #[case("hello ", false)]
    #[case("Hello", false)]
    fn body_comparison_is_exact(#[case] candidate: &str, #[case] same: bool) {
        let body = CommentBody::new(candidate).expect("valid body");
        assert_eq!(comment(None).has_body(&body), same);
    }

    #[rstest]
    fn body_keeps_surrounding_whitespace() {
        let body = CommentBody::new("  spaced  ").expect("valid body");
        assert_eq!(body.as_ref(), "  spaced  ");
    }
}
