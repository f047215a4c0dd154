use std::fmt;

/// A vocabulary pair. Stored once globally and linked to people through `person_word`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, sqlx::FromRow)]
pub struct Word {
    english: String,
    russian: String,
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.english, self.russian)
    }
}

impl Word {
    pub fn new(english: impl Into<String>, russian: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            russian: russian.into(),
        }
    }

    pub fn english(&self) -> &str {
        &self.english
    }

    pub fn russian(&self) -> &str {
        &self.russian
    }
}
