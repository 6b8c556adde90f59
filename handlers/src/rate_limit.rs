//! Per-user request throttling for link messages.

use async_trait::async_trait;
use dbot_core::{Bot, Handler, Message, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{info, instrument};

use crate::replies::RATE_LIMITED_REPLY;

/// Table size above which entries older than the window are dropped on the next accepted request.
const PRUNE_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited { retry_after: Duration },
}

/// Remembers the time of each user's last accepted request.
pub struct RateLimiter {
    window: Duration,
    last_request: Mutex<HashMap<i64, Instant>>,
}

impl RateLimiter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_request: Mutex::new(HashMap::new()),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Accepts the request and records `now` unless the previous accepted request of `user_id`
    /// was less than the window ago. Rejected requests do not move the window.
    pub fn check(&self, user_id: i64, now: Instant) -> RateDecision {
        if self.window.is_zero() {
            return RateDecision::Allowed;
        }

        let mut last = self
            .last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(previous) = last.get(&user_id) {
            let elapsed = now.saturating_duration_since(*previous);
            if elapsed < self.window {
                return RateDecision::Limited {
                    retry_after: self.window - elapsed,
                };
            }
        }

        if last.len() >= PRUNE_THRESHOLD {
            let window = self.window;
            last.retain(|_, t| now.saturating_duration_since(*t) < window);
        }
        last.insert(user_id, now);
        RateDecision::Allowed
    }

    /// Number of users currently tracked.
    pub fn tracked_users(&self) -> usize {
        self.last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Stops the chain and tells the user to wait when they send links faster than the window allows.
/// Commands and non-text messages are never throttled.
pub struct RateLimitHandler {
    bot: Arc<dyn Bot>,
    limiter: RateLimiter,
}

impl RateLimitHandler {
    pub fn new(bot: Arc<dyn Bot>, window: Duration) -> Self {
        Self {
            bot,
            limiter: RateLimiter::new(window),
        }
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }
}

#[async_trait]
impl Handler for RateLimitHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn before(&self, message: &Message) -> Result<bool> {
        if !message.is_text() || message.is_command() {
            return Ok(true);
        }

        match self.limiter.check(message.user.id, Instant::now()) {
            RateDecision::Allowed => Ok(true),
            RateDecision::Limited { retry_after } => {
                info!(
                    retry_after_ms = retry_after.as_millis() as u64,
                    "Rate limited, asking user to wait"
                );
                self.bot.reply_to(message, RATE_LIMITED_REPLY).await?;
                Ok(false)
            }
        }
    }
}
