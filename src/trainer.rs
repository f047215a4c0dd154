use std::error::Error;

use rand::Rng;
use teloxide::types::KeyboardMarkup;
use tracing::{info, warn};

use crate::{
    cards::{self, Deal},
    database::{
        connection::{EditDictionary, RegisterPerson, RetreivePerson, RetreiveWords},
        word::Word,
    },
    keyboard::{cards_keyboard, controls_keyboard},
    state::TrainerState,
};

const GREETING: &str = "Привет 👋\nДавай попрактикуемся в английском языке. \
Тренировки можешь проходить в удобном для себя темпе.\n\n\
У тебя есть возможность использовать тренажёр, как конструктор, \
и собирать свою собственную базу для обучения. Для этого воспользуйся инструментами:\n\n\
добавить слово ➕,\nудалить слово 🔙.\n\nНу что, начнём ⬇️";
const EMPTY_DICTIONARY: &str = "В твоём словаре пока нет слов. Нажми «Добавить слово».";
const NO_CARD: &str = "Сейчас нет слова для удаления. Отправь /cards, чтобы начать.";
const PAIR_FORMAT: &str = "Введите пару 'английское слово' - 'русское слово'";
const IDLE_HINT: &str = "Отправь /cards, чтобы начать тренировку.";
const CANCELLED: &str = "Тренировка остановлена. Отправь /cards, чтобы продолжить.";

type FlowResult = Result<Outcome, Box<dyn Error + Send + Sync>>;

#[derive(Debug, Clone)]
pub(crate) struct Reply {
    pub(crate) text: String,
    pub(crate) keyboard: Option<KeyboardMarkup>,
}

impl Reply {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    fn with_keyboard(text: impl Into<String>, keyboard: KeyboardMarkup) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

/// What to send back and which state the chat moves to.
#[derive(Debug, Clone)]
pub(crate) struct Outcome {
    pub(crate) replies: Vec<Reply>,
    pub(crate) state: TrainerState,
}

impl Outcome {
    fn prepend(mut self, mut replies: Vec<Reply>) -> Self {
        replies.append(&mut self.replies);
        self.replies = replies;
        self
    }
}

async fn ensure_registered<S>(
    storage: &S,
    chat_id: i64,
    start_words: i64,
) -> Result<Option<Reply>, Box<dyn Error + Send + Sync>>
where
    S: RetreivePerson + RegisterPerson,
{
    if storage.person_exists(chat_id).await? {
        return Ok(None);
    }

    storage.add_person(chat_id, start_words).await?;
    info!("Registered chat {} with {} starter words", chat_id, start_words);
    Ok(Some(Reply::plain(GREETING)))
}

async fn draw_card<S, R>(storage: &S, chat_id: i64, prompts: usize, rng: &mut R) -> FlowResult
where
    S: RetreiveWords,
    R: Rng + ?Sized,
{
    let words = storage.words(chat_id).await?;

    match cards::deal(words, prompts, rng) {
        Some(Deal { card, options }) => {
            info!("Chat {} gets card '{}' out of {:?}", chat_id, card.english(), options);
            Ok(Outcome {
                replies: vec![Reply::with_keyboard(
                    format!("Выбери перевод слова:\n🇷🇺 {}", card.russian()),
                    cards_keyboard(&options),
                )],
                state: TrainerState::Answering { card, options },
            })
        }
        None => {
            info!("Chat {} has an empty dictionary", chat_id);
            Ok(Outcome {
                replies: vec![Reply::with_keyboard(EMPTY_DICTIONARY, controls_keyboard())],
                state: TrainerState::Idle,
            })
        }
    }
}

/// `/start`, `/cards` and the "next" button: greet newcomers, then show a card.
pub(crate) async fn open_cards<S, R>(
    storage: &S,
    chat_id: i64,
    start_words: i64,
    prompts: usize,
    rng: &mut R,
) -> FlowResult
where
    S: RetreivePerson + RegisterPerson + RetreiveWords,
    R: Rng + ?Sized,
{
    let greeting = ensure_registered(storage, chat_id, start_words).await?;
    let outcome = draw_card(storage, chat_id, prompts, rng).await?;

    Ok(outcome.prepend(greeting.into_iter().collect()))
}

pub(crate) async fn delete_current<S, R>(
    storage: &S,
    chat_id: i64,
    state: TrainerState,
    prompts: usize,
    rng: &mut R,
) -> FlowResult
where
    S: RetreiveWords + EditDictionary,
    R: Rng + ?Sized,
{
    let Some(card) = state.card().cloned() else {
        return Ok(Outcome {
            replies: vec![Reply::with_keyboard(NO_CARD, controls_keyboard())],
            state,
        });
    };

    let reply = if storage.remove_word(chat_id, card.english()).await? {
        info!("Chat {} removed '{}'", chat_id, card.english());
        format!("Удалено слово \"{}\"", card.english())
    } else {
        warn!("Chat {} tried to remove '{}' twice", chat_id, card.english());
        format!("Слово \"{}\" уже удалено", card.english())
    };

    let outcome = draw_card(storage, chat_id, prompts, rng).await?;
    Ok(outcome.prepend(vec![Reply::plain(reply)]))
}

pub(crate) fn begin_adding(state: TrainerState) -> Outcome {
    Outcome {
        replies: vec![Reply::with_keyboard(PAIR_FORMAT, controls_keyboard())],
        state: TrainerState::AddingWord {
            card: state.card().cloned(),
        },
    }
}

pub(crate) async fn receive_pair<S>(
    storage: &S,
    chat_id: i64,
    text: &str,
    card: Option<Word>,
    start_words: i64,
) -> FlowResult
where
    S: RetreivePerson + RegisterPerson + RetreiveWords + EditDictionary,
{
    let (english, russian) = match cards::parse_pair(text) {
        Ok(pair) => pair,
        Err(e) => {
            info!("Chat {} sent a malformed pair {:?}: {}", chat_id, text, e);
            return Ok(Outcome {
                replies: vec![Reply::plain(cards::show_hint(&[
                    e.to_string().as_str(),
                    PAIR_FORMAT,
                ]))],
                state: TrainerState::AddingWord { card },
            });
        }
    };

    let greeting = ensure_registered(storage, chat_id, start_words).await?;
    let word = storage.add_word(chat_id, &english, &russian).await?;
    let total = storage.count_words(chat_id).await?;
    info!("Chat {} added '{}', dictionary has {} words", chat_id, word, total);

    let outcome = Outcome {
        replies: vec![Reply::with_keyboard(
            cards::show_hint(&[
                word.to_string().as_str(),
                cards::dictionary_size(total).as_str(),
            ]),
            controls_keyboard(),
        )],
        state: TrainerState::Answering {
            card: word,
            options: Vec::new(),
        },
    };
    Ok(outcome.prepend(greeting.into_iter().collect()))
}

pub(crate) fn check_guess(card: Word, mut options: Vec<String>, guess: &str) -> Outcome {
    if cards::is_correct(&card, guess) {
        info!("Correct guess '{}'", card.english());
        Outcome {
            replies: vec![Reply::with_keyboard(
                cards::show_hint(&["Отлично!❤", card.to_string().as_str()]),
                controls_keyboard(),
            )],
            state: TrainerState::Answering {
                card,
                options: Vec::new(),
            },
        }
    } else {
        info!("Wrong guess {:?} for '{}'", guess, card.english());
        cards::mark_wrong(&mut options, guess);
        Outcome {
            replies: vec![Reply::with_keyboard(
                cards::show_hint(&[
                    "Допущена ошибка!",
                    format!("Попробуй ещё раз вспомнить слово 🇷🇺{}", card.russian()).as_str(),
                ]),
                cards_keyboard(&options),
            )],
            state: TrainerState::Answering { card, options },
        }
    }
}

pub(crate) fn idle() -> Outcome {
    Outcome {
        replies: vec![Reply::with_keyboard(IDLE_HINT, controls_keyboard())],
        state: TrainerState::Idle,
    }
}

/// `/cancel`: forget the current card, whatever the state.
pub(crate) fn cancel() -> Outcome {
    Outcome {
        replies: vec![Reply::with_keyboard(CANCELLED, controls_keyboard())],
        state: TrainerState::Idle,
    }
}
