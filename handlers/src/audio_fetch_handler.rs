//! Link → audio pipeline: validate the URL, resolve the stream with the extractor, download it under the
//! size limit, and upload it to the chat. Every failure ends in a short text reply.

use async_trait::async_trait;
use dbot_core::{AudioFile, Bot, DbotError, Handler, HandlerError, HandlerResponse, Message, Result};
use media_extractor::{sanitize_filename, AudioDownloader, MediaError, MediaExtractor};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::replies::{error_reply, too_large_reply, INVALID_URL_REPLY, NO_AUDIO_REPLY};

const DEFAULT_TITLE: &str = "audio";

/// Accepts text that starts with `http` and parses as an absolute http(s) URL.
pub fn parse_audio_url(text: &str) -> std::result::Result<reqwest::Url, HandlerError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(HandlerError::NoText);
    }
    if !text.starts_with("http") {
        return Err(HandlerError::InvalidUrl(text.to_string()));
    }
    match reqwest::Url::parse(text) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => Ok(url),
        _ => Err(HandlerError::InvalidUrl(text.to_string())),
    }
}

#[derive(Debug, Error)]
enum FetchError {
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error(transparent)]
    Bot(#[from] DbotError),
}

enum FetchOutcome {
    Sent { title: String, bytes: usize },
    NoAudio,
}

pub struct AudioFetchHandler {
    bot: Arc<dyn Bot>,
    extractor: Arc<dyn MediaExtractor>,
    downloader: AudioDownloader,
    max_file_size_mb: u64,
}

impl AudioFetchHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        extractor: Arc<dyn MediaExtractor>,
        downloader: AudioDownloader,
        max_file_size_mb: u64,
    ) -> Self {
        Self {
            bot,
            extractor,
            downloader,
            max_file_size_mb,
        }
    }

    fn max_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }

    async fn reply(&self, message: &Message, text: String) -> Result<HandlerResponse> {
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn fetch_and_send(
        &self,
        message: &Message,
        url: &str,
    ) -> std::result::Result<FetchOutcome, FetchError> {
        let info = match self.extractor.extract(url).await? {
            Some(info) => info,
            None => return Ok(FetchOutcome::NoAudio),
        };
        let audio_url = match info.audio_url() {
            Some(u) => u,
            None => return Ok(FetchOutcome::NoAudio),
        };

        let title = sanitize_filename(info.title.as_deref().unwrap_or(DEFAULT_TITLE));
        let data = self
            .downloader
            .download(audio_url, &info.http_headers, self.max_bytes())
            .await?;
        let bytes = data.len();

        self.bot
            .send_audio(&message.chat, AudioFile::mp3(data, title.clone()))
            .await?;

        Ok(FetchOutcome::Sent { title, bytes })
    }
}

#[async_trait]
impl Handler for AudioFetchHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_text() || message.is_command() {
            return Ok(HandlerResponse::Ignore);
        }

        let url = match parse_audio_url(&message.content) {
            Ok(url) => url,
            Err(e) => {
                info!(reason = %e, "Rejected message without a valid URL");
                return self.reply(message, INVALID_URL_REPLY.to_string()).await;
            }
        };

        info!(url = %url, "step: fetching audio");
        match self.fetch_and_send(message, url.as_str()).await {
            Ok(FetchOutcome::Sent { title, bytes }) => {
                info!(title = %title, bytes, "✅ Sent audio");
                Ok(HandlerResponse::Stop)
            }
            Ok(FetchOutcome::NoAudio) => {
                info!(url = %url, "Extractor found no audio stream");
                self.reply(message, NO_AUDIO_REPLY.to_string()).await
            }
            Err(FetchError::Media(MediaError::TooLarge { limit_bytes })) => {
                info!(limit_bytes, "Audio over size limit");
                self.reply(message, too_large_reply(self.max_file_size_mb))
                    .await
            }
            Err(e) => {
                error!(error = %e, url = %url, "Error fetching audio");
                self.reply(message, error_reply(&e)).await
            }
        }
    }
}
