//! Unit tests for LoggingHandler.

use super::text_message;
use crate::LoggingHandler;
use dbot_core::{Handler, HandlerResponse};

#[tokio::test]
async fn test_logging_handler_before_continues() {
    let handler = LoggingHandler;
    let msg = text_message(1, "hello");
    assert!(handler.before(&msg).await.unwrap());
}

#[tokio::test]
async fn test_logging_handler_handle_continues_and_after_ok() {
    let handler = LoggingHandler;
    let msg = text_message(1, "hello");
    assert_eq!(handler.handle(&msg).await.unwrap(), HandlerResponse::Continue);
    let response = HandlerResponse::Reply("hi".to_string());
    assert!(handler.after(&msg, &response).await.is_ok());
}
