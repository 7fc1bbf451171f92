pub mod callback;
pub mod message;

use teloxide::{
    dispatching::UpdateHandler,
    prelude::*,
};
use crate::bot::assistant::Assistant;

pub struct BotHandler {
    pub assistant: Assistant,
}

impl BotHandler {
    pub fn new(assistant: Assistant) -> Self {
        Self { assistant }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        let assistant_cmd = self.assistant.clone();
        let assistant_text = self.assistant.clone();
        let assistant_callback = self.assistant.clone();
        
        dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<crate::bot::commands::Command>()
                    .endpoint(move |bot, msg, cmd| {
                        let assistant = assistant_cmd.clone();
                        async move { message::command_handler(bot, msg, cmd, assistant).await.map_err(Into::into) }
                    }),
            )
            .branch(Update::filter_message().endpoint(move |bot, msg| {
                let assistant = assistant_text.clone();
                async move { message::text_handler(bot, msg, assistant).await.map_err(Into::into) }
            }))
            .branch(Update::filter_callback_query().endpoint(move |bot, q| {
                let assistant = assistant_callback.clone();
                async move { callback::callback_handler(bot, q, assistant).await.map_err(Into::into) }
            }))
    }
}
