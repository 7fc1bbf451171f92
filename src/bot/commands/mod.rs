use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Comandos disponíveis:")]
pub enum Command {
    #[command(description = "Mostrar o menu principal")]
    Start,
    #[command(description = "Desativar o bot e limpar a conversa")]
    Off,
}
