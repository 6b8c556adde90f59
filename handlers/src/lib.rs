//! # Handlers for the audio bot
//!
//! Chain handlers: logging, per-user rate limiting, the `/start` greeting, and the link → audio pipeline.

mod audio_fetch_handler;
mod logging;
mod rate_limit;
pub mod replies;
mod start_handler;

#[cfg(test)]
mod test;

pub use audio_fetch_handler::{parse_audio_url, AudioFetchHandler};
pub use logging::LoggingHandler;
pub use rate_limit::{RateDecision, RateLimitHandler, RateLimiter};
pub use start_handler::StartCommandHandler;
