//! Telegram 接入最小配置：仅 token 与 API URL。
//! 与外部交互：从环境变量 BOT_TOKEN、TELEGRAM_API_URL（或 TELOXIDE_API_URL）加载。

use anyhow::{Context, Result};
use std::env;
use tracing::error;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// 未替换的占位 token，视为未配置。
pub const PLACEHOLDER_TOKEN: &str = "YOUR_TELEGRAM_BOT_TOKEN";

/// Telegram Bot 接入配置。
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
}

/// 空 token 或占位 token 返回错误。
pub fn validate_token(token: &str) -> Result<()> {
    let token = token.trim();
    if token.is_empty() || token == PLACEHOLDER_TOKEN {
        anyhow::bail!("BOT_TOKEN is not set; put your real bot token in the environment");
    }
    Ok(())
}

impl TelegramConfig {
    /// 从环境变量加载：BOT_TOKEN 必填，TELEGRAM_API_URL、TELOXIDE_API_URL 可选。
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN").context("BOT_TOKEN not set")?;
        Self::new(bot_token, api_url_from_env())
    }

    /// 使用给定 token 构造，并校验 token。
    pub fn new(bot_token: String, telegram_api_url: Option<String>) -> Result<Self> {
        validate_token(&bot_token)?;
        Ok(Self {
            bot_token: bot_token.trim().to_string(),
            telegram_api_url,
        })
    }

    /// API 基础 URL（去掉末尾 `/`），未配置时为官方地址。
    pub fn api_base(&self) -> &str {
        self.telegram_api_url
            .as_deref()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
    }

    /// 构造 teloxide Bot；配置了 API URL 时指向该地址（测试时指向 mock 服务器）。
    pub fn build_bot(&self) -> teloxide::Bot {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match self.telegram_api_url.as_deref() {
            Some(url_str) => match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            },
            None => bot,
        }
    }
}

/// TELEGRAM_API_URL 优先，其次 TELOXIDE_API_URL。
pub fn api_url_from_env() -> Option<String> {
    env::var("TELEGRAM_API_URL")
        .or_else(|_| env::var("TELOXIDE_API_URL"))
        .ok()
        .filter(|s| !s.trim().is_empty())
}
