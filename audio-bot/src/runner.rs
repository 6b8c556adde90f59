use anyhow::Result;
use dbot_core::{init_tracing, Bot};
use dbot_telegram::{
    check_health, mask_token, run_dispatcher, shutdown_signal, spawn_health_server,
    TelegramBotAdapter, TelegramConfig,
};
use handler_chain::HandlerChain;
use handlers::{AudioFetchHandler, LoggingHandler, RateLimitHandler, StartCommandHandler};
use media_extractor::{AudioDownloader, MediaExtractor, YtDlpExtractor};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use crate::config::BotConfig;

/// Logging → rate limit → /start → link handling.
pub fn build_handler_chain(
    config: &BotConfig,
    bot: Arc<dyn Bot>,
    extractor: Arc<dyn MediaExtractor>,
) -> Result<HandlerChain> {
    let downloader = AudioDownloader::new(config.download_timeout)?;

    Ok(HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(RateLimitHandler::new(bot.clone(), config.rate_limit)))
        .add_handler(Arc::new(StartCommandHandler::new(bot.clone())))
        .add_handler(Arc::new(AudioFetchHandler::new(
            bot,
            extractor,
            downloader,
            config.max_file_size_mb,
        ))))
}

/// Main entry: init logging, build the chain, start the health server, then poll until SIGINT/SIGTERM.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    init_tracing(&config.log_file)?;

    info!(
        token = %mask_token(&config.telegram.bot_token),
        rate_limit_secs = config.rate_limit.as_secs(),
        max_file_size_mb = config.max_file_size_mb,
        cookies_file = ?config.cookies_file,
        ytdlp = %config.ytdlp_path,
        "Initializing bot"
    );

    let teloxide_bot = config.telegram.build_bot();
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let extractor: Arc<dyn MediaExtractor> =
        Arc::new(YtDlpExtractor::new(config.extractor_config()));
    let handler_chain = build_handler_chain(&config, bot, extractor)?;

    let (health_stop_tx, health_stop_rx) = oneshot::channel::<()>();
    let (_, health_task) = spawn_health_server(config.health_addr, async move {
        let _ = health_stop_rx.await;
    })
    .await?;

    info!("🤖 Bot started successfully");
    run_dispatcher(teloxide_bot, handler_chain, shutdown_signal()).await?;

    let _ = health_stop_tx.send(());
    join_background("health server", health_task).await;
    info!("Bot stopped");

    Ok(())
}

/// Waits for a background task; a panic or cancellation is logged and reported as `false`.
pub(crate) async fn join_background(name: &str, task: JoinHandle<()>) -> bool {
    match task.await {
        Ok(()) => true,
        Err(e) => {
            warn!(task = name, error = %e, "Background task ended abnormally");
            false
        }
    }
}

/// One-shot getMe probe for container health checks. Reads only BOT_TOKEN and the API URL override.
pub async fn healthcheck(timeout: Duration) -> ExitCode {
    let result = match TelegramConfig::from_env() {
        Ok(config) => check_health(&config, timeout).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(identity) => {
            println!(
                "ok: @{}",
                identity.username.as_deref().unwrap_or(&identity.first_name)
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("unhealthy: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_join_background_reports_panic() {
        let task = tokio::spawn(async { panic!("health server crashed") });
        assert!(!join_background("health server", task).await);
    }

    #[tokio::test]
    async fn test_join_background_clean_exit() {
        let task = tokio::spawn(async {});
        assert!(join_background("health server", task).await);
    }
}
