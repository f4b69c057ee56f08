//! Port for the image hosting collaborator.
//!
//! The domain only ever keeps the URL returned by the host; image bytes are
//! forwarded and then dropped.

use async_trait::async_trait;

use crate::domain::CoverImage;

use super::define_port_error;

define_port_error! {
    /// Errors raised by image upload adapters.
    pub enum ImageUploadError {
        /// Host did not answer in time.
        Timeout { message: String } => "image upload timed out: {message}",
        /// Transport-level failure or host-side error.
        Transport { message: String } => "image upload failed: {message}",
        /// Host refused the image.
        Rejected { message: String } => "image upload rejected: {message}",
        /// Host answered with a payload we could not interpret.
        Decode { message: String } => "image upload response invalid: {message}",
    }
}

/// Port for uploading images to an external host.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Upload `image` and return its public URL.
    async fn upload(&self, image: &CoverImage) -> Result<String, ImageUploadError>;
}

/// Deterministic uploader for development and tests.
///
/// Returns a URL derived from the file name without contacting any host.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureImageUploader;

/// Base URL handed out by [`FixtureImageUploader`].
pub const FIXTURE_IMAGE_BASE_URL: &str = "https://images.blog.invalid";

#[async_trait]
impl ImageUploader for FixtureImageUploader {
    async fn upload(&self, image: &CoverImage) -> Result<String, ImageUploadError> {
        Ok(format!("{FIXTURE_IMAGE_BASE_URL}/{}", image.file_name()))
    }
}
