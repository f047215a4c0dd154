use teloxide::types::{KeyboardButton, KeyboardMarkup};

pub(crate) const ADD_WORD: &str = "Добавить слово";
pub(crate) const DELETE_WORD: &str = "Удалить слово";
pub(crate) const NEXT: &str = "Дальше";

fn controls_row() -> Vec<KeyboardButton> {
    vec![
        KeyboardButton::new(ADD_WORD),
        KeyboardButton::new(DELETE_WORD),
        KeyboardButton::new(NEXT),
    ]
}

/// Answer options two per row, then the controls.
pub(crate) fn cards_keyboard(options: &[String]) -> KeyboardMarkup {
    let mut keyboard: Vec<Vec<KeyboardButton>> = options
        .chunks(2)
        .map(|row| row.iter().map(KeyboardButton::new).collect())
        .collect();
    keyboard.push(controls_row());

    KeyboardMarkup::new(keyboard)
}

pub(crate) fn controls_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![controls_row()])
}
