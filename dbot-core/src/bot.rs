//! Bot abstraction for sending text and audio.
//!
//! [`Bot`] trait is transport-agnostic; dbot-telegram implements it via teloxide and tests substitute a recording mock.

use crate::error::Result;
use crate::types::{AudioFile, Chat, Message};
use async_trait::async_trait;

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
    /// Uploads an audio file to the given chat.
    async fn send_audio(&self, chat: &Chat, audio: AudioFile) -> Result<()>;
}
