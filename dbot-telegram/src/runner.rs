//! Dispatcher 运行：将 teloxide 消息转为 core::Message 后交给 HandlerChain 处理。
//! 每条消息在独立任务中处理，下载较慢时不阻塞其他用户；收到 SIGINT / SIGTERM 后停止拉取更新，并等待进行中的任务完成。

use anyhow::Result;
use dbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use std::future::Future;
use std::time::Duration;
use teloxide::prelude::*;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

const SHUTDOWN_RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Resolves on Ctrl-C, or on SIGTERM where available (container stop).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(signal = "SIGINT", "Shutdown signal received"),
        _ = terminate => info!(signal = "SIGTERM", "Shutdown signal received"),
    }
}

/// Polls updates until `shutdown` resolves. Every message (text or not) goes through `handler_chain`
/// on its own task; returns only after every started chain run has finished.
#[instrument(skip(bot, handler_chain, shutdown))]
pub async fn run_dispatcher<S>(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    shutdown: S,
) -> Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    match bot.get_me().await {
        Ok(me) => info!(
            username = %me.user.username.as_deref().unwrap_or("unknown"),
            "Connected to Telegram"
        ),
        Err(e) => warn!(error = %e, "getMe failed before dispatch; polling anyway"),
    }

    let tracker = TaskTracker::new();
    let chain = handler_chain;
    let tasks = tracker.clone();
    let handler = Update::filter_message().endpoint(move |msg: teloxide::types::Message| {
        let chain = chain.clone();
        let tasks = tasks.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            debug!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_type = %core_msg.message_type,
                "Update received"
            );

            tasks.spawn(async move {
                if let Err(e) = chain.handle(&core_msg).await {
                    error!(
                        error = %e,
                        user_id = core_msg.user.id,
                        chat_id = core_msg.chat.id,
                        "Handler chain failed"
                    );
                }
            });

            respond(())
        }
    });

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .default_handler(|update| async move {
            debug!(update_id = ?update.id, "Ignoring non-message update");
        })
        .build();

    let token = dispatcher.shutdown_token();
    let stopper = tokio::spawn(async move {
        shutdown.await;
        info!("🛑 Bot shutting down gracefully...");
        // The token refuses while the dispatcher is still starting; keep asking until it is running.
        loop {
            match token.shutdown() {
                Ok(stopped) => break stopped.await,
                Err(_) => tokio::time::sleep(SHUTDOWN_RETRY_INTERVAL).await,
            }
        }
    });

    dispatcher.dispatch().await;
    stopper.abort();

    tracker.close();
    if !tracker.is_empty() {
        info!(in_flight = tracker.len(), "Waiting for in-flight messages");
    }
    tracker.wait().await;
    info!("Dispatcher stopped");

    Ok(())
}
