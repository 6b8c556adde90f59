//! # dbot-telegram
//!
//! Telegram transport layer: adapters, [`dbot_core::Bot`] implementation, minimal config, dispatcher runner,
//! the HTTP liveness endpoint and the `getMe` probe. Handles only Telegram connectivity and handler-chain
//! execution; no extraction or download logic.

mod adapters;
mod bot_adapter;
mod config;
mod health;
mod probe;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{api_url_from_env, validate_token, TelegramConfig, DEFAULT_API_URL, PLACEHOLDER_TOKEN};
pub use health::{health_router, spawn_health_server, HEALTH_BODY};
pub use probe::{check_health, mask_token, BotIdentity, DEFAULT_PROBE_TIMEOUT};
pub use runner::{run_dispatcher, shutdown_signal};
