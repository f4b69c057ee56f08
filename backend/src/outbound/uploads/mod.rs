//! Image hosting outbound adapters.
//!
//! Provides a reqwest implementation of the `ImageUploader` port that posts
//! images to an unsigned upload endpoint and keeps only the returned URL.

mod dto;
mod http_uploader;

pub use http_uploader::HttpImageUploader;
