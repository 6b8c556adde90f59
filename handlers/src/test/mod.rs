//! Unit test module
//!
//! Handler unit tests live here, separate from source files.
//! Tests interact with handlers via public and pub(crate) APIs.

mod logging_handler_test;

use chrono::Utc;
use dbot_core::{Chat, Message, MessageDirection, User};

/// Builds an incoming text message from `user_id` in a private chat with the same id.
pub(crate) fn text_message(user_id: i64, content: &str) -> Message {
    Message {
        id: "msg-1".to_string(),
        user: User {
            id: user_id,
            username: Some("listener".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: user_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    }
}

/// Non-text message (sticker, photo, ...): empty content, type "other".
pub(crate) fn other_message(user_id: i64) -> Message {
    Message {
        message_type: "other".to_string(),
        ..text_message(user_id, "")
    }
}
