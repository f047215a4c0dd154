use std::error::Error;

use teloxide::{
    dispatching::{
        dialogue::{self, InMemStorage},
        DpHandlerDescription, UpdateFilterExt, UpdateHandler,
    },
    dptree::{self, Handler},
    prelude::{DependencyMap, Requester},
    types::{Message, Update},
    Bot,
};
use tracing::instrument;

use crate::{
    commands::{cancel, help, Command},
    database::connection::Connection,
    handlers,
    keyboard::{ADD_WORD, DELETE_WORD, NEXT},
    state::TrainerState,
    HandlerResult,
};

/// What a non-command message asks for. Keyboard buttons win over the dialogue
/// state, so a button press never lands in the answer or pair handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    Unsupported,
    Next,
    AddWord,
    DeleteWord,
    Reply(String),
}

pub(crate) fn route(text: Option<&str>) -> Route {
    match text {
        None => Route::Unsupported,
        Some(NEXT) => Route::Next,
        Some(ADD_WORD) => Route::AddWord,
        Some(DELETE_WORD) => Route::DeleteWord,
        Some(text) => Route::Reply(text.to_owned()),
    }
}

pub fn schema() -> UpdateHandler<Box<dyn Error + Send + Sync + 'static>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Help].endpoint(help))
        .branch(case![Command::Start].endpoint(handlers::cards::<Connection>))
        .branch(case![Command::Cards].endpoint(handlers::cards::<Connection>))
        .branch(case![Command::Cancel].endpoint(cancel));

    let handler = Update::filter_message()
        .branch(command_handler)
        .branch(messages_scheme());

    dialogue::enter::<Update, InMemStorage<TrainerState>, TrainerState, _>().branch(handler)
}

#[instrument(level = "debug")]
fn messages_scheme() -> Handler<
    'static,
    DependencyMap,
    Result<(), Box<dyn Error + Send + Sync + 'static>>,
    DpHandlerDescription,
> {
    use dptree::case;

    tracing::debug!("Building a dispatching tree for plain messages");
    dptree::map(|msg: Message| route(msg.text()))
        .branch(case![Route::Unsupported].endpoint(invalid_state))
        .branch(case![Route::Next].endpoint(handlers::cards::<Connection>))
        .branch(case![Route::AddWord].endpoint(handlers::add_word))
        .branch(case![Route::DeleteWord].endpoint(handlers::delete_word::<Connection>))
        .branch(
            case![Route::Reply(text)]
                .branch(
                    case![TrainerState::AddingWord { card }]
                        .endpoint(handlers::receive_pair::<Connection>),
                )
                .branch(
                    case![TrainerState::Answering { card, options }]
                        .endpoint(handlers::check_guess),
                )
                .branch(case![TrainerState::Idle].endpoint(handlers::idle)),
        )
}

#[instrument(level = "info")]
async fn invalid_state(bot: Bot, msg: Message) -> HandlerResult {
    tracing::info!("Chat {}: unable to handle a message without text", msg.chat.id.0);
    bot.send_message(
        msg.chat.id,
        "Не получилось обработать сообщение. Отправь /help, чтобы увидеть команды.",
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_route_to_their_actions() {
        assert_eq!(route(Some(NEXT)), Route::Next);
        assert_eq!(route(Some(ADD_WORD)), Route::AddWord);
        assert_eq!(route(Some(DELETE_WORD)), Route::DeleteWord);
    }

    #[test]
    fn delete_button_is_not_taken_for_a_pair() {
        // While adding a word the pair handler sees only `Route::Reply`.
        assert_ne!(route(Some(DELETE_WORD)), Route::Reply(DELETE_WORD.to_owned()));
    }

    #[test]
    fn messages_without_text_are_unsupported() {
        // Stickers, photos and voice notes carry no text, whatever the state.
        assert_eq!(route(None), Route::Unsupported);
    }

    #[test]
    fn other_text_is_a_reply_to_the_current_state() {
        assert_eq!(
            route(Some("apple - яблоко")),
            Route::Reply("apple - яблоко".to_owned())
        );
        assert_eq!(route(Some("red")), Route::Reply("red".to_owned()));
        assert_eq!(route(Some(" Дальше")), Route::Reply(" Дальше".to_owned()));
    }
}
