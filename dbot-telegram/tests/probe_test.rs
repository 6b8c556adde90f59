//! Integration tests for [`dbot_telegram::check_health`] against a mock Bot API.
//!
//! Request path format is `/bot<token>/getMe`.

use dbot_telegram::{check_health, TelegramConfig};
use std::time::Duration;

const TEST_BOT_TOKEN: &str = "test_bot_token_12345";

fn config_for(server_url: String) -> TelegramConfig {
    TelegramConfig::new(TEST_BOT_TOKEN.to_string(), Some(server_url)).unwrap()
}

fn get_me_path() -> String {
    format!("/bot{}/getMe", TEST_BOT_TOKEN)
}

/// **Test: getMe with ok=true passes and returns the bot identity.**
#[tokio::test]
async fn test_probe_healthy() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", get_me_path().as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "ok": true,
            "result": {
                "id": 123456789,
                "is_bot": true,
                "first_name": "KukuAudio",
                "username": "kukuaudiobot"
            }
        }"#,
        )
        .create_async()
        .await;

    let identity = check_health(&config_for(server.url()), Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(identity.id, 123456789);
    assert_eq!(identity.username.as_deref(), Some("kukuaudiobot"));
    mock.assert_async().await;
}

/// **Test: Invalid token (401, ok=false) fails with Telegram's description.**
#[tokio::test]
async fn test_probe_invalid_token() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", get_me_path().as_str())
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#)
        .create_async()
        .await;

    let err = check_health(&config_for(server.url()), Duration::from_secs(5))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Unauthorized"));
}

/// **Test: A non-JSON answer (proxy error page) fails the probe.**
#[tokio::test]
async fn test_probe_unreadable_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", get_me_path().as_str())
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    assert!(check_health(&config_for(server.url()), Duration::from_secs(5))
        .await
        .is_err());
}

/// **Test: A server that accepts but never answers fails at the timeout, and the error hides the token.**
#[tokio::test]
async fn test_probe_timeout() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let err = check_health(
        &config_for(format!("http://{}", addr)),
        Duration::from_millis(300),
    )
    .await
    .unwrap_err();

    assert!(!err.to_string().contains(TEST_BOT_TOKEN));
    drop(listener);
}

/// **Test: Nothing listening fails the probe.**
#[tokio::test]
async fn test_probe_connection_refused() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    assert!(check_health(
        &config_for(format!("http://{}", addr)),
        Duration::from_secs(2)
    )
    .await
    .is_err());
}
