pub mod message;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::types::{Me, Message, Update};

use crate::bot::context::BotContext;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub struct BotHandler {
    pub ctx: BotContext,
}

impl BotHandler {
    pub fn new(ctx: BotContext) -> Self {
        Self { ctx }
    }

    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        let ctx = self.ctx.clone();

        Update::filter_message().endpoint(move |msg: Message, me: Me| {
            let ctx = ctx.clone();
            async move { message::message_handler(msg, me, ctx).await }
        })
    }
}
