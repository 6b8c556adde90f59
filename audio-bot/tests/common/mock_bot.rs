//! Mock implementation of [`dbot_core::Bot`] for integration tests.
//!
//! Records every text and audio send so tests can assert on what the user would see without hitting Telegram.

use async_trait::async_trait;
use dbot_core::{AudioFile, Bot, Chat, Result};
use std::sync::Mutex;

/// One recorded outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    Text { chat_id: i64, text: String },
    Audio { chat_id: i64, file_name: String, bytes: usize },
}

#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<Outgoing>>,
}

impl MockBot {
    pub fn sent(&self) -> Vec<Outgoing> {
        self.sent.lock().unwrap().clone()
    }

    /// Drains and returns recorded sends.
    pub fn take(&self) -> Vec<Outgoing> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(Outgoing::Text {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_audio(&self, chat: &Chat, audio: AudioFile) -> Result<()> {
        self.sent.lock().unwrap().push(Outgoing::Audio {
            chat_id: chat.id,
            file_name: audio.file_name,
            bytes: audio.data.len(),
        });
        Ok(())
    }
}
