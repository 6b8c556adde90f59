use anyhow::{Context, Result};
use dbot_telegram::{api_url_from_env, TelegramConfig};
use media_extractor::{ExtractorConfig, DEFAULT_AUDIO_FORMAT, DEFAULT_BINARY};
use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_RATE_LIMIT_SECONDS: i64 = 10;
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 50;
pub const DEFAULT_EXTRACT_TIMEOUT_SECONDS: u64 = 120;
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECONDS: u64 = 60;
pub const DEFAULT_HEALTH_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_LOG_FILE: &str = "logs/bot.log";
/// Picked up automatically when present in the working directory.
pub const DEFAULT_COOKIES_FILE: &str = "cookies.txt";

/// Bot configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub rate_limit: Duration,
    pub max_file_size_mb: u64,
    pub cookies_file: Option<PathBuf>,
    pub ytdlp_path: String,
    pub audio_format: String,
    pub extract_timeout: Duration,
    pub download_timeout: Duration,
    pub health_addr: SocketAddr,
    pub log_file: String,
}

/// Reads `name`, falling back to `default` when unset or blank. A present but unparsable value is an error.
fn env_parse<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {}={:?}: {}", name, raw, e)),
        _ => Ok(default),
    }
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl BotConfig {
    /// Loads from the environment; `token` overrides BOT_TOKEN when given.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let telegram = TelegramConfig::new(bot_token, api_url_from_env())?;

        // Zero or negative disables throttling.
        let rate_limit_secs: i64 = env_parse("RATE_LIMIT_SECONDS", DEFAULT_RATE_LIMIT_SECONDS)?;
        let rate_limit = Duration::from_secs(rate_limit_secs.max(0).unsigned_abs());
        let max_file_size_mb = env_parse("MAX_FILE_SIZE_MB", DEFAULT_MAX_FILE_SIZE_MB)?;
        if max_file_size_mb == 0 {
            anyhow::bail!("MAX_FILE_SIZE_MB must be at least 1");
        }

        let cookies_file = match env::var("COOKIES_FILE") {
            Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path.trim())),
            _ if Path::new(DEFAULT_COOKIES_FILE).exists() => Some(PathBuf::from(DEFAULT_COOKIES_FILE)),
            _ => None,
        };

        let extract_timeout = Duration::from_secs(env_parse(
            "EXTRACT_TIMEOUT_SECONDS",
            DEFAULT_EXTRACT_TIMEOUT_SECONDS,
        )?);
        let download_timeout = Duration::from_secs(env_parse(
            "DOWNLOAD_TIMEOUT_SECONDS",
            DEFAULT_DOWNLOAD_TIMEOUT_SECONDS,
        )?);
        let health_addr = env_parse(
            "HEALTH_ADDR",
            DEFAULT_HEALTH_ADDR
                .parse::<SocketAddr>()
                .context("default health address")?,
        )?;

        Ok(Self {
            telegram,
            rate_limit,
            max_file_size_mb,
            cookies_file,
            ytdlp_path: env_string("YTDLP_PATH", DEFAULT_BINARY),
            audio_format: env_string("AUDIO_FORMAT", DEFAULT_AUDIO_FORMAT),
            extract_timeout,
            download_timeout,
            health_addr,
            log_file: env_string("LOG_FILE", DEFAULT_LOG_FILE),
        })
    }

    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            binary: self.ytdlp_path.clone(),
            format: self.audio_format.clone(),
            cookies_file: self.cookies_file.clone(),
            timeout: self.extract_timeout,
        }
    }
}
