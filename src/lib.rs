use state::TrainerState;
use teloxide::{dispatching::dialogue::InMemStorage, prelude::Dialogue};

pub mod cards;
pub mod commands;
pub mod database;
pub mod error;
pub mod handlers;
pub mod keyboard;
pub mod schema;
pub mod settings;
pub mod state;
pub mod trainer;

type UserDialogue = Dialogue<TrainerState, InMemStorage<TrainerState>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;
