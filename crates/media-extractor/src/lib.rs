//! # media-extractor
//!
//! Turns a page link into audio bytes: [`YtDlpExtractor`] resolves the stream URL and title,
//! [`AudioDownloader`] fetches the stream under a size limit, [`sanitize_filename`] makes the title safe as a file name.

mod download;
mod error;
mod extractor;
mod filename;
mod ytdlp;

pub use download::{AudioDownloader, DEFAULT_DOWNLOAD_TIMEOUT};
pub use error::{MediaError, Result};
pub use extractor::{MediaExtractor, MediaInfo};
pub use filename::{sanitize_filename, MAX_FILENAME_CHARS};
pub use ytdlp::{
    ExtractorConfig, YtDlpExtractor, DEFAULT_AUDIO_FORMAT, DEFAULT_BINARY,
    DEFAULT_EXTRACT_TIMEOUT,
};
