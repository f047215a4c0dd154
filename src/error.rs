use thiserror::Error;

/// Why a "english - russian" message could not become a dictionary entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairError {
    #[error("Не нашёл дефис между словами.")]
    MissingSeparator,

    #[error("Одно из слов пустое.")]
    EmptyPart,

    #[error("Слово длиннее {max} символов.")]
    TooLong { max: usize },
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("{0} should be set.")]
    Missing(&'static str),

    #[error("{key} can't be parsed: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("No person registered for chat {0}")]
    UnknownPerson(i64),
}
