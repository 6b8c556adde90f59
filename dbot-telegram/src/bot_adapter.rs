//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code sends messages via Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use dbot_core::{AudioFile, Bot as CoreBot, Chat, DbotError, Result};
use teloxide::payloads::SendAudioSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile};
use tracing::{info, warn};

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    /// Sends as audio; if Telegram rejects it as audio (unknown codec, bad tags), retries once as a document.
    async fn send_audio(&self, chat: &Chat, audio: AudioFile) -> Result<()> {
        let chat_id = ChatId(chat.id);
        let AudioFile {
            data,
            file_name,
            title,
        } = audio;

        let as_audio = InputFile::memory(data.clone()).file_name(file_name.clone());
        match self.bot.send_audio(chat_id, as_audio).title(title).await {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(
                    chat_id = chat.id,
                    file_name = %file_name,
                    error = %e,
                    "Failed to send audio as native media; falling back to document"
                );
                let as_document = InputFile::memory(data).file_name(file_name);
                self.bot
                    .send_document(chat_id, as_document)
                    .await
                    .map_err(|e| DbotError::Bot(e.to_string()))?;
                info!(chat_id = chat.id, "Sent audio as document");
                Ok(())
            }
        }
    }
}
