use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};
use teloxide::{
    payloads::SendMessageSetters,
    prelude::Requester,
    types::{ChatId, Message},
    Bot,
};
use tracing::instrument;

use crate::{
    database::{
        connection::{EditDictionary, RegisterPerson, RetreivePerson, RetreiveWords},
        word::Word,
    },
    settings::Settings,
    state::TrainerState,
    trainer::{self, Outcome},
    HandlerResult, UserDialogue,
};

pub(crate) async fn respond(
    bot: &Bot,
    dialogue: &UserDialogue,
    chat_id: ChatId,
    outcome: Outcome,
) -> HandlerResult {
    for reply in outcome.replies {
        let request = bot.send_message(chat_id, reply.text);
        match reply.keyboard {
            Some(keyboard) => request.reply_markup(keyboard).await?,
            None => request.await?,
        };
    }
    dialogue.update(outcome.state).await?;
    Ok(())
}

#[instrument(level = "info", skip(bot, dialogue, connection, settings))]
pub(crate) async fn cards<Storage>(
    bot: Bot,
    dialogue: UserDialogue,
    msg: Message,
    connection: Arc<Storage>,
    settings: Arc<Settings>,
) -> HandlerResult
where
    Storage: RetreivePerson + RegisterPerson + RetreiveWords,
{
    let mut rng = StdRng::from_entropy();
    let outcome = trainer::open_cards(
        connection.as_ref(),
        msg.chat.id.0,
        settings.start_words_num,
        settings.prompts_num,
        &mut rng,
    )
    .await?;

    respond(&bot, &dialogue, msg.chat.id, outcome).await
}

#[instrument(level = "info", skip(bot, dialogue, connection, settings))]
pub(crate) async fn delete_word<Storage>(
    bot: Bot,
    dialogue: UserDialogue,
    msg: Message,
    state: TrainerState,
    connection: Arc<Storage>,
    settings: Arc<Settings>,
) -> HandlerResult
where
    Storage: RetreiveWords + EditDictionary,
{
    let mut rng = StdRng::from_entropy();
    let outcome = trainer::delete_current(
        connection.as_ref(),
        msg.chat.id.0,
        state,
        settings.prompts_num,
        &mut rng,
    )
    .await?;

    respond(&bot, &dialogue, msg.chat.id, outcome).await
}

#[instrument(level = "info", skip(bot, dialogue))]
pub(crate) async fn add_word(
    bot: Bot,
    dialogue: UserDialogue,
    msg: Message,
    state: TrainerState,
) -> HandlerResult {
    respond(&bot, &dialogue, msg.chat.id, trainer::begin_adding(state)).await
}

#[instrument(level = "info", skip(bot, dialogue, connection, settings))]
pub(crate) async fn receive_pair<Storage>(
    bot: Bot,
    dialogue: UserDialogue,
    msg: Message,
    text: String,
    card: Option<Word>,
    connection: Arc<Storage>,
    settings: Arc<Settings>,
) -> HandlerResult
where
    Storage: RetreivePerson + RegisterPerson + RetreiveWords + EditDictionary,
{
    let outcome = trainer::receive_pair(
        connection.as_ref(),
        msg.chat.id.0,
        &text,
        card,
        settings.start_words_num,
    )
    .await?;

    respond(&bot, &dialogue, msg.chat.id, outcome).await
}

#[instrument(level = "info", skip(bot, dialogue))]
pub(crate) async fn check_guess(
    bot: Bot,
    dialogue: UserDialogue,
    msg: Message,
    text: String,
    (card, options): (Word, Vec<String>),
) -> HandlerResult {
    let outcome = trainer::check_guess(card, options, &text);
    respond(&bot, &dialogue, msg.chat.id, outcome).await
}

#[instrument(level = "info", skip(bot, dialogue))]
pub(crate) async fn idle(bot: Bot, dialogue: UserDialogue, msg: Message) -> HandlerResult {
    respond(&bot, &dialogue, msg.chat.id, trainer::idle()).await
}
