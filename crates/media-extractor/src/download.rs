//! Size-limited HTTP download of a resolved audio stream.

use futures_util::StreamExt;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::error::{MediaError, Result};

pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Downloads whole response bodies into memory, refusing anything larger than the caller's limit.
#[derive(Clone)]
pub struct AudioDownloader {
    client: reqwest::Client,
}

impl AudioDownloader {
    /// Client with the given total request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Reuses an existing client (its own timeout applies).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GETs `url` with `headers` and returns the body.
    ///
    /// A declared `Content-Length` above `max_bytes` fails before any body is read; otherwise the body is
    /// streamed and the transfer is abandoned as soon as more than `max_bytes` arrive.
    #[instrument(skip(self, url, headers))]
    pub async fn download(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        max_bytes: u64,
    ) -> Result<Vec<u8>> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?.error_for_status()?;

        if let Some(declared) = response.content_length() {
            if declared > max_bytes {
                warn!(declared, max_bytes, "Declared content length over limit");
                return Err(MediaError::TooLarge {
                    limit_bytes: max_bytes,
                });
            }
        }

        let mut data = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if (data.len() + chunk.len()) as u64 > max_bytes {
                warn!(received = data.len(), max_bytes, "Body over limit, download aborted");
                return Err(MediaError::TooLarge {
                    limit_bytes: max_bytes,
                });
            }
            data.extend_from_slice(&chunk);
        }

        info!(bytes = data.len(), "Download complete");
        Ok(data)
    }
}
