//! Extractor abstraction: resolves a page URL into a direct media stream URL plus metadata.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::Result;

/// Subset of the info JSON yt-dlp prints for a single resolved format.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaInfo {
    /// Direct stream URL of the selected format. Missing when yt-dlp selected merged formats.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub duration: Option<f64>,
    /// Headers the extractor used; some hosts reject downloads without them.
    #[serde(default)]
    pub http_headers: HashMap<String, String>,
}

impl MediaInfo {
    /// Stream URL, if present and non-empty.
    pub fn audio_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

/// Resolves page URLs to [`MediaInfo`]. `Ok(None)` means the extractor ran but found nothing.
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<Option<MediaInfo>>;
}
