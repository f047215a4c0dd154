use crate::database::word::Word;

#[derive(Debug, Clone, Default)]
pub enum TrainerState {
    #[default]
    Idle,
    Answering {
        card: Word,
        // labels currently on the keyboard, wrong guesses marked
        options: Vec<String>,
    },
    AddingWord {
        card: Option<Word>,
    },
}

impl TrainerState {
    /// The word the user is currently practising, if any.
    pub fn card(&self) -> Option<&Word> {
        match self {
            TrainerState::Answering { card, .. } => Some(card),
            TrainerState::AddingWord { card } => card.as_ref(),
            TrainerState::Idle => None,
        }
    }
}
