use teloxide::{prelude::Requester, types::Message, utils::command::BotCommands, Bot};

use crate::{handlers, trainer, HandlerResult, UserDialogue};

#[derive(Debug, Clone, BotCommands)]
#[command(rename_rule = "lowercase", description = "Тренажёр английских слов.")]
pub enum Command {
    #[command(description = "начать тренировку.")]
    Start,
    #[command(description = "показать новую карточку.")]
    Cards,
    #[command(description = "показать эту справку.")]
    Help,
    #[command(description = "остановить тренировку.")]
    Cancel,
}

pub(crate) async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

pub(crate) async fn cancel(bot: Bot, dialogue: UserDialogue, msg: Message) -> HandlerResult {
    tracing::info!("Chat {} cancels the training", msg.chat.id.0);
    handlers::respond(&bot, &dialogue, msg.chat.id, trainer::cancel()).await
}
