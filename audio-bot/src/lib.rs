//! # audio-bot
//!
//! Wires dbot-telegram, handler-chain, handlers and media-extractor. Loads config from env and runs the dispatcher.

pub mod cli;
pub mod config;
pub mod runner;

pub use cli::{Cli, Commands};
pub use config::BotConfig;
pub use runner::{build_handler_chain, healthcheck, run_bot};
