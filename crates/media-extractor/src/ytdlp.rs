//! [`MediaExtractor`] backed by the `yt-dlp` command line tool.
//!
//! yt-dlp is run once per request with `--dump-single-json --no-download`; stdout is the info JSON of the
//! selected format. The child is killed if it outlives the configured timeout.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use crate::error::{MediaError, Result};
use crate::extractor::{MediaExtractor, MediaInfo};

pub const DEFAULT_BINARY: &str = "yt-dlp";
pub const DEFAULT_AUDIO_FORMAT: &str = "bestaudio[ext=mp3]/bestaudio/best";
pub const DEFAULT_EXTRACT_TIMEOUT: Duration = Duration::from_secs(120);

/// How yt-dlp is invoked.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub binary: String,
    pub format: String,
    pub cookies_file: Option<PathBuf>,
    pub timeout: Duration,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            format: DEFAULT_AUDIO_FORMAT.to_string(),
            cookies_file: None,
            timeout: DEFAULT_EXTRACT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct YtDlpExtractor {
    config: ExtractorConfig,
}

impl YtDlpExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Command line arguments for `url`. The URL goes after `--` so it is never parsed as an option.
    pub fn build_args(&self, url: &str) -> Vec<String> {
        let mut args: Vec<String> = [
            "--dump-single-json",
            "--no-download",
            "--no-playlist",
            "--quiet",
            "--no-warnings",
            "--no-check-certificates",
            "-f",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        args.push(self.config.format.clone());
        if let Some(cookies) = &self.config.cookies_file {
            args.push("--cookies".to_string());
            args.push(cookies.display().to_string());
        }
        args.push("--".to_string());
        args.push(url.to_string());
        args
    }
}

/// Last non-empty stderr line; yt-dlp prints the actual `ERROR: ...` reason there.
fn last_stderr_line(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("no error output")
        .to_string()
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    #[instrument(skip(self), fields(binary = %self.config.binary))]
    async fn extract(&self, url: &str) -> Result<Option<MediaInfo>> {
        let args = self.build_args(url);
        debug!(args = ?args, "Running extractor");

        let child = Command::new(&self.config.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| MediaError::Spawn {
                binary: self.config.binary.clone(),
                source,
            })?;

        let output = match tokio::time::timeout(self.config.timeout, child.wait_with_output())
            .await
        {
            Ok(result) => result.map_err(|source| MediaError::Spawn {
                binary: self.config.binary.clone(),
                source,
            })?,
            Err(_) => {
                warn!(timeout = ?self.config.timeout, "Extractor timed out, child killed");
                return Err(MediaError::Timeout(self.config.timeout));
            }
        };

        if !output.status.success() {
            let reason = last_stderr_line(&output.stderr);
            warn!(status = %output.status, reason = %reason, "Extractor exited with failure");
            return Err(MediaError::Extractor(reason));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        if stdout.is_empty() || stdout == "null" {
            info!("Extractor returned no info");
            return Ok(None);
        }

        let info: MediaInfo = serde_json::from_str(stdout)?;
        info!(
            title = ?info.title,
            ext = ?info.ext,
            has_url = info.audio_url().is_some(),
            "Extractor resolved media"
        );
        Ok(Some(info))
    }
}
