pub mod mock_bot;

use audio_bot::BotConfig;
use chrono::Utc;
use dbot_core::{Chat, Message, MessageDirection, User};
use dbot_telegram::TelegramConfig;
use std::time::Duration;

/// Config for chain tests: real defaults except a short download timeout and the given rate limit.
pub fn test_config(rate_limit: Duration, max_file_size_mb: u64) -> BotConfig {
    BotConfig {
        telegram: TelegramConfig::new("test_bot_token_12345".to_string(), None).unwrap(),
        rate_limit,
        max_file_size_mb,
        cookies_file: None,
        ytdlp_path: "yt-dlp".to_string(),
        audio_format: media_extractor::DEFAULT_AUDIO_FORMAT.to_string(),
        extract_timeout: Duration::from_secs(5),
        download_timeout: Duration::from_secs(5),
        health_addr: "127.0.0.1:0".parse().unwrap(),
        log_file: "logs/test.log".to_string(),
    }
}

pub fn user_message(user_id: i64, content: &str) -> Message {
    Message {
        id: format!("{}-{}", user_id, content.len()),
        user: User {
            id: user_id,
            username: Some(format!("user{}", user_id)),
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
