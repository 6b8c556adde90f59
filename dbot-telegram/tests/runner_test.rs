//! Integration tests for [`dbot_telegram::run_dispatcher`] against a mock Bot API.
//!
//! teloxide POSTs every method to `/bot<token>/<Method>`; method names are matched case-insensitively.

use async_trait::async_trait;
use dbot_core::{Handler, HandlerResponse, Message, Result};
use dbot_telegram::{run_dispatcher, TelegramConfig};
use handler_chain::HandlerChain;
use mockito::{Matcher, Mock, ServerGuard};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

const TEST_BOT_TOKEN: &str = "test_bot_token_12345";

fn method(name: &str) -> Matcher {
    Matcher::Regex(format!(r"(?i)^/bot[^/]+/{}$", name))
}

const GET_ME_BODY: &str = r#"{
    "ok": true,
    "result": {
        "id": 987654321,
        "is_bot": true,
        "first_name": "KukuAudio",
        "username": "kukuaudiobot",
        "can_join_groups": true,
        "can_read_all_group_messages": false,
        "supports_inline_queries": false,
        "can_connect_to_business": false,
        "has_main_web_app": false
    }
}"#;

const ONE_UPDATE_BODY: &str = r#"{
    "ok": true,
    "result": [{
        "update_id": 1,
        "message": {
            "message_id": 10,
            "date": 1700000000,
            "chat": {"id": 42, "type": "private", "first_name": "Asha"},
            "from": {"id": 42, "is_bot": false, "first_name": "Asha", "username": "asha"},
            "text": "https://kukufm.com/episode/1"
        }
    }]
}"#;

const NO_UPDATES_BODY: &str = r#"{"ok": true, "result": []}"#;

/// getMe, deleteWebhook, and getUpdates that yields `first_batch` once and then nothing.
async fn mock_bot_api(server: &mut ServerGuard, first_batch: &'static str) -> Vec<Mock> {
    let get_me = server
        .mock("POST", method("getMe"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(GET_ME_BODY)
        .create_async()
        .await;
    let delete_webhook = server
        .mock("POST", method("deleteWebhook"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": true, "result": true}"#)
        .create_async()
        .await;
    let calls = Arc::new(AtomicUsize::new(0));
    let get_updates = server
        .mock("POST", method("getUpdates"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body_from_request(move |_| {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                first_batch.as_bytes().to_vec()
            } else {
                NO_UPDATES_BODY.as_bytes().to_vec()
            }
        })
        .create_async()
        .await;
    vec![get_me, delete_webhook, get_updates]
}

fn test_bot(server: &ServerGuard) -> teloxide::Bot {
    TelegramConfig::new(TEST_BOT_TOKEN.to_string(), Some(server.url()))
        .unwrap()
        .build_bot()
}

/// Signals when a message arrives, then keeps working for a while before finishing.
struct SlowHandler {
    started: Arc<Notify>,
    finished: Arc<AtomicBool>,
}

#[async_trait]
impl Handler for SlowHandler {
    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        self.started.notify_one();
        tokio::time::sleep(Duration::from_millis(300)).await;
        self.finished.store(true, Ordering::SeqCst);
        Ok(HandlerResponse::Stop)
    }
}

/// **Test: A shutdown requested mid-message waits for that message's chain to finish.**
#[tokio::test]
async fn test_shutdown_waits_for_in_flight_message() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = mock_bot_api(&mut server, ONE_UPDATE_BODY).await;

    let started = Arc::new(Notify::new());
    let finished = Arc::new(AtomicBool::new(false));
    let chain = HandlerChain::new().add_handler(Arc::new(SlowHandler {
        started: started.clone(),
        finished: finished.clone(),
    }));

    let shutdown = async move { started.notified().await };
    tokio::time::timeout(
        Duration::from_secs(15),
        run_dispatcher(test_bot(&server), chain, shutdown),
    )
    .await
    .expect("dispatcher did not stop")
    .unwrap();

    assert!(finished.load(Ordering::SeqCst));
}

/// **Test: A shutdown that arrives before polling starts still stops the dispatcher.**
#[tokio::test]
async fn test_early_shutdown_is_not_lost() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = mock_bot_api(&mut server, NO_UPDATES_BODY).await;

    tokio::time::timeout(
        Duration::from_secs(15),
        run_dispatcher(test_bot(&server), HandlerChain::new(), async {}),
    )
    .await
    .expect("dispatcher did not stop")
    .unwrap();
}
