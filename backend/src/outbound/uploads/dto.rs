//! DTOs for decoding image host responses.

use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
pub(super) struct UploadResponseDto {
    pub(super) secure_url: Option<String>,
    pub(super) url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UploadErrorDto {
    pub(super) error: UploadErrorBodyDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct UploadErrorBodyDto {
    pub(super) message: String,
}

impl UploadResponseDto {
    /// Hosted URL, preferring the HTTPS variant.
    pub(super) fn into_hosted_url(self) -> Result<String, String> {
        let raw = self
            .secure_url
            .or(self.url)
            .ok_or_else(|| "response carries no image URL".to_owned())?;
        let parsed = Url::parse(&raw).map_err(|err| format!("invalid image URL {raw:?}: {err}"))?;
        match parsed.scheme() {
            "https" | "http" => Ok(parsed.into()),
            scheme => Err(format!("unsupported image URL scheme {scheme:?}")),
        }
    }
}
