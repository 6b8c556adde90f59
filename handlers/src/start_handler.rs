use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::replies::START_REPLY;

/// Answers `/start` with the greeting. Every other command is ignored without a reply.
pub struct StartCommandHandler {
    bot: Arc<dyn Bot>,
}

impl StartCommandHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for StartCommandHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_text() {
            return Ok(HandlerResponse::Ignore);
        }
        match message.command_name() {
            Some("start") => {
                self.bot.reply_to(message, START_REPLY).await?;
                info!("Sent start greeting");
                Ok(HandlerResponse::Reply(START_REPLY.to_string()))
            }
            _ => Ok(HandlerResponse::Ignore),
        }
    }
}
