//! Article aggregate: authored posts that comments hang off.
//!
//! Articles are addressed externally by slug. The slug is derived from the
//! title once, at creation, and stays stable across later title edits.

mod service;
pub(crate) mod slug;

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::UserId;

pub(crate) use service::find_article;
pub use service::ArticleService;

/// Maximum length of an article title, in characters.
pub const TITLE_MAX: usize = 200;

/// Validation failures for article inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArticleValidationError {
    /// Title was blank.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Title exceeded [`TITLE_MAX`].
    #[error("title must be at most {max} characters")]
    TitleTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Description was blank.
    #[error("description must not be empty")]
    EmptyDescription,
    /// Body was blank.
    #[error("body must not be empty")]
    EmptyBody,
    /// A tag was blank.
    #[error("tags must not be empty")]
    EmptyTag {
        /// Position of the offending tag.
        index: usize,
    },
    /// Slug did not match the slug grammar.
    #[error("slug must contain lowercase letters, digits, and single hyphens")]
    InvalidSlug,
    /// Cover image contained no bytes.
    #[error("cover image must not be empty")]
    EmptyImage,
    /// Cover image was not an image media type.
    #[error("cover image content type must be an image type, got {content_type}")]
    UnsupportedImageType {
        /// Media type supplied by the caller.
        content_type: String,
    },
}

impl ArticleValidationError {
    /// Request field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::EmptyDescription => "description",
            Self::EmptyBody => "body",
            Self::EmptyTag { .. } => "tagList",
            Self::InvalidSlug => "slug",
            Self::EmptyImage | Self::UnsupportedImageType { .. } => "coverImage",
        }
    }

    /// Machine-readable reason.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::EmptyDescription | Self::EmptyBody | Self::EmptyTag { .. } => {
                "empty_field"
            }
            Self::TitleTooLong { .. } => "too_long",
            Self::InvalidSlug => "invalid_slug",
            Self::EmptyImage => "empty_image",
            Self::UnsupportedImageType { .. } => "unsupported_media_type",
        }
    }
}

/// Store-assigned article identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleId(i64);

impl ArticleId {
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

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category catalogue identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryId(i32);

impl CategoryId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only category entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Catalogue identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
}

/// URL-safe article handle.
///
/// # Examples
/// ```
/// use blog_backend::domain::ArticleSlug;
///
/// let slug = ArticleSlug::from_title("Hello, World!");
/// assert_eq!(slug.as_ref(), "hello-world");
/// assert!(ArticleSlug::new("Not A Slug").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleSlug(String);

impl ArticleSlug {
    /// Validate an existing slug, e.g. one taken from a request path.
    pub fn new(raw: impl Into<String>) -> Result<Self, ArticleValidationError> {
        let raw = raw.into();
        if slug::is_valid_slug(&raw) {
            Ok(Self(raw))
        } else {
            Err(ArticleValidationError::InvalidSlug)
        }
    }

    /// Derive a slug from an article title.
    #[must_use]
    pub fn from_title(title: &str) -> Self {
        Self(slug::slugify(title))
    }

    /// Same slug with a random suffix, used when the plain form is taken.
    #[must_use]
    pub fn with_random_suffix(&self) -> Self {
        Self(slug::with_random_suffix(&self.0))
    }
}

impl AsRef<str> for ArticleSlug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ArticleSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated editable fields of an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent {
    title: String,
    description: String,
    body: String,
    tag_list: Vec<String>,
}

impl ArticleContent {
    /// Validate article fields. Tags are trimmed; blank text is rejected.
    ///
    /// # Examples
    /// ```
    /// use blog_backend::domain::ArticleContent;
    ///
    /// let content = ArticleContent::new("Title", "Summary", "Body", vec![" rust ".into()])
    ///     .expect("valid content");
    /// assert_eq!(content.tag_list(), ["rust".to_owned()]);
    /// ```
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        body: impl Into<String>,
        tag_list: Vec<String>,
    ) -> Result<Self, ArticleValidationError> {
        let title = title.into();
        let description = description.into();
        let body = body.into();
        if title.trim().is_empty() {
            return Err(ArticleValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(ArticleValidationError::TitleTooLong { max: TITLE_MAX });
        }
        if description.trim().is_empty() {
            return Err(ArticleValidationError::EmptyDescription);
        }
        if body.trim().is_empty() {
            return Err(ArticleValidationError::EmptyBody);
        }
        let tag_list = tag_list
            .into_iter()
            .enumerate()
            .map(|(index, tag)| {
                let trimmed = tag.trim();
                if trimmed.is_empty() {
                    Err(ArticleValidationError::EmptyTag { index })
                } else {
                    Ok(trimmed.to_owned())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            title,
            description,
            body,
            tag_list,
        })
    }

    /// Article title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Short summary.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Full article text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Tags in caller order.
    #[must_use]
    pub fn tag_list(&self) -> &[String] {
        &self.tag_list
    }
}

/// Cover image bytes to hand to the upload collaborator.
#[derive(Clone, PartialEq, Eq)]
pub struct CoverImage {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl CoverImage {
    /// Validate an image payload.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, ArticleValidationError> {
        let content_type = content_type.into();
        if bytes.is_empty() {
            return Err(ArticleValidationError::EmptyImage);
        }
        if !content_type.starts_with("image/") {
            return Err(ArticleValidationError::UnsupportedImageType { content_type });
        }
        Ok(Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        })
    }

    /// Original file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Media type, e.g. `image/png`.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Raw image bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for CoverImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverImage")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Stored article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Store-assigned identifier.
    pub id: ArticleId,
    /// Stable public handle.
    pub slug: ArticleSlug,
    /// Editable fields.
    pub content: ArticleContent,
    /// Author of the article.
    pub author_id: UserId,
    /// Category the article is filed under.
    pub category_id: CategoryId,
    /// Hosted cover image, if one was uploaded.
    pub cover_image_url: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Whether `user_id` wrote this article.
    #[must_use]
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }
}

/// Article ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    /// Unique slug chosen for the article.
    pub slug: ArticleSlug,
    /// Editable fields.
    pub content: ArticleContent,
    /// Author of the article.
    pub author_id: UserId,
    /// Category the article is filed under.
    pub category_id: CategoryId,
    /// Hosted cover image, if one was uploaded.
    pub cover_image_url: Option<String>,
}

/// Partial article update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement body.
    pub body: Option<String>,
    /// Replacement tag list.
    pub tag_list: Option<Vec<String>>,
    /// Replacement category.
    pub category_id: Option<CategoryId>,
}

impl ArticlePatch {
    /// Merge the patch over `current`, re-validating the result.
    ///
    /// # Examples
    /// ```
    /// use blog_backend::domain::{ArticleContent, ArticlePatch};
    ///
    /// let current = ArticleContent::new("Old", "Summary", "Body", vec![]).expect("valid");
    /// let patch = ArticlePatch { title: Some("New".into()), ..ArticlePatch::default() };
    /// let merged = patch.merge_content(&current).expect("valid merge");
    /// assert_eq!(merged.title(), "New");
    /// assert_eq!(merged.body(), "Body");
    /// ```
    pub fn merge_content(
        &self,
        current: &ArticleContent,
    ) -> Result<ArticleContent, ArticleValidationError> {
        ArticleContent::new(
            self.title.clone().unwrap_or_else(|| current.title.clone()),
            self.description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
            self.body.clone().unwrap_or_else(|| current.body.clone()),
            self.tag_list
                .clone()
                .unwrap_or_else(|| current.tag_list.clone()),
        )
    }
}
