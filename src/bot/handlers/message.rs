use teloxide::prelude::*;
use crate::bot::assistant::{Assistant, Reply};
use crate::bot::commands::Command;
use crate::utils::text::{split_message, TELEGRAM_MAX_MESSAGE_CHARS};

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    assistant: Assistant,
) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let user_id = user.id.0;

    let reply = match cmd {
        Command::Start => assistant.start(user_id).await,
        Command::Off => assistant.off(user_id).await,
    };

    send_reply(&bot, msg.chat.id, reply).await
}

/// Every non-command message. Only text is interpreted; stickers, photos and
/// the like are ignored.
pub async fn text_handler(
    bot: Bot,
    msg: Message,
    assistant: Assistant,
) -> ResponseResult<()> {
    let (Some(user), Some(text)) = (msg.from(), msg.text()) else {
        return Ok(());
    };

    let reply = if text.starts_with('/') {
        let command = text.split_whitespace().next().unwrap_or(text);
        Assistant::unknown_command(command)
    } else {
        assistant.handle_text(user.id.0, text).await
    };

    send_reply(&bot, msg.chat.id, reply).await
}

/// Sends a reply, split into several messages when it exceeds Telegram's
/// length limit. The keyboard goes with the last one.
pub async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> ResponseResult<()> {
    let chunks = split_message(&reply.text, TELEGRAM_MAX_MESSAGE_CHARS);
    let last = chunks.len().saturating_sub(1);

    for (index, chunk) in chunks.into_iter().enumerate() {
        let request = bot.send_message(chat_id, chunk);
        match reply.keyboard.markup() {
            Some(markup) if index == last => request.reply_markup(markup).await?,
            _ => request.await?,
        };
    }
    Ok(())
}
