use teloxide::prelude::*;
use crate::bot::assistant::{Assistant, Reply, CHOOSE_OPTION_MESSAGE};
use crate::bot::handlers::message::send_reply;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    assistant: Assistant,
) -> ResponseResult<()> {
    let user_id = q.from.id.0;
    let Some(data) = q.data.as_deref() else {
        bot.answer_callback_query(q.id.clone())
            .text("Opção inválida")
            .await?;
        return Ok(());
    };

    tracing::info!("Callback received: '{}' from user {}", data, user_id);

    let Some(reply) = assistant.handle_callback(user_id, data).await else {
        bot.answer_callback_query(q.id.clone())
            .text("Opção desconhecida")
            .await?;
        return Ok(());
    };

    bot.answer_callback_query(q.id.clone()).await?;

    if let Some(message) = q.message.as_ref() {
        bot.edit_message_text(message.chat.id, message.id, reply.text).await?;

        // reply keyboards cannot be attached by editing, so the menu goes in a new message
        if reply.show_main_menu {
            send_reply(&bot, message.chat.id, Reply::with_main_menu(CHOOSE_OPTION_MESSAGE)).await?;
        }
    }

    Ok(())
}
