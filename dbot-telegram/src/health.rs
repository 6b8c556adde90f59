//! Liveness endpoint for container orchestration.
//!
//! Answers `GET`/`HEAD` on any path with `200 Bot is running`. It only proves the process is up;
//! Bot API reachability is checked separately by [`crate::check_health`].

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub const HEALTH_BODY: &str = "Bot is running";

async fn health(method: Method) -> Response {
    if method == Method::GET || method == Method::HEAD {
        (StatusCode::OK, HEALTH_BODY).into_response()
    } else {
        StatusCode::METHOD_NOT_ALLOWED.into_response()
    }
}

pub fn health_router() -> Router {
    Router::new().fallback(health)
}

/// Binds `addr` and serves the health endpoint in a background task until `shutdown` resolves.
/// Returns the bound address (useful with port 0) and the task handle.
pub async fn spawn_health_server<S>(
    addr: SocketAddr,
    shutdown: S,
) -> anyhow::Result<(SocketAddr, JoinHandle<()>)>
where
    S: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "Health server listening");

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_router())
            .with_graceful_shutdown(shutdown)
            .await
        {
            error!(error = %e, "Health server failed");
        }
    });

    Ok((local_addr, handle))
}
