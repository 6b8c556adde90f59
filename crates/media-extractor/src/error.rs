use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("failed to start extractor `{binary}`: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("extractor timed out after {0:?}")]
    Timeout(Duration),

    #[error("extractor failed: {0}")]
    Extractor(String),

    #[error("invalid extractor output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("file exceeds {limit_bytes} bytes")]
    TooLarge { limit_bytes: u64 },
}

pub type Result<T> = std::result::Result<T, MediaError>;
