//! Bot API liveness probe: `GET {api}/bot<token>/getMe`.
//! Used by the container health check; a non-success answer or any transport error fails the probe.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::config::TelegramConfig;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct GetMeResponse {
    ok: bool,
    #[serde(default)]
    result: Option<BotIdentity>,
    #[serde(default)]
    description: Option<String>,
}

/// Identity returned by `getMe`.
#[derive(Debug, Clone, Deserialize)]
pub struct BotIdentity {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: String,
}

/// Masks a secret for logs: first 7 and last 4 characters kept; 11 characters or fewer become `***`.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        "***".to_string()
    } else {
        let head: String = chars[..7].iter().collect();
        let tail: String = chars[len - 4..].iter().collect();
        format!("{}***{}", head, tail)
    }
}

/// Calls `getMe` once. Succeeds only on a 2xx answer with `"ok": true` within `timeout`.
#[instrument(skip(config), fields(token = %mask_token(&config.bot_token)))]
pub async fn check_health(config: &TelegramConfig, timeout: Duration) -> Result<BotIdentity> {
    let url = format!("{}/bot{}/getMe", config.api_base(), config.bot_token);
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build HTTP client")?;

    // Drop the URL from transport errors: it contains the token.
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("getMe request failed: {}", e.without_url()))?;
    let status = response.status();
    let body: GetMeResponse = response
        .json()
        .await
        .map_err(|e| anyhow::anyhow!("getMe returned unreadable body ({}): {}", status, e.without_url()))?;

    if !status.is_success() || !body.ok {
        let reason = body.description.unwrap_or_else(|| status.to_string());
        warn!(status = %status, reason = %reason, "getMe rejected");
        anyhow::bail!("getMe failed: {}", reason);
    }

    let identity = body.result.context("getMe response has no result")?;
    info!(bot_id = identity.id, username = ?identity.username, "getMe ok");
    Ok(identity)
}
