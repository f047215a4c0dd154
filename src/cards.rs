use rand::{seq::SliceRandom, Rng};

use crate::{database::word::Word, error::PairError};

pub(crate) const MAX_WORD_LEN: usize = 50;
pub(crate) const WRONG_MARK: &str = "❌";

/// A drawn card: the word to guess and the English options offered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Deal {
    pub(crate) card: Word,
    pub(crate) options: Vec<String>,
}

/// Samples up to `prompts` words and picks the target among them.
/// Returns `None` when the dictionary is empty.
pub(crate) fn deal<R>(mut words: Vec<Word>, prompts: usize, rng: &mut R) -> Option<Deal>
where
    R: Rng + ?Sized,
{
    words.shuffle(rng);
    words.truncate(prompts.max(1));

    let card = words.choose(rng)?.clone();
    let options = words
        .into_iter()
        .map(|word| word.english().to_owned())
        .collect();

    Some(Deal { card, options })
}

pub(crate) fn parse_pair(text: &str) -> Result<(String, String), PairError> {
    let text = text.replace(['—', '–'], "-");

    let (english, russian) = text
        .split_once(" - ")
        .or_else(|| text.split_once('-'))
        .ok_or(PairError::MissingSeparator)?;

    let (english, russian) = (english.trim(), russian.trim());
    if english.is_empty() || russian.is_empty() {
        return Err(PairError::EmptyPart);
    }
    if english.chars().count() > MAX_WORD_LEN || russian.chars().count() > MAX_WORD_LEN {
        return Err(PairError::TooLong { max: MAX_WORD_LEN });
    }

    Ok((english.to_owned(), russian.to_owned()))
}

pub(crate) fn is_correct(card: &Word, guess: &str) -> bool {
    guess.trim() == card.english()
}

pub(crate) fn mark_wrong(options: &mut [String], guess: &str) {
    let guess = guess.trim();
    if let Some(option) = options
        .iter_mut()
        .find(|option| option.as_str() == guess && !option.ends_with(WRONG_MARK))
    {
        option.push_str(WRONG_MARK);
    }
}

pub(crate) fn show_hint(lines: &[&str]) -> String {
    lines.join("\n")
}

/// "В Вашем словаре N слов" with the noun agreeing with N.
pub(crate) fn dictionary_size(count: i64) -> String {
    let noun = match (count % 10, count % 100) {
        (1, rem) if rem != 11 => "слово",
        (2..=4, rem) if !(12..=14).contains(&rem) => "слова",
        _ => "слов",
    };
    format!("В Вашем словаре {count} {noun}")
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn vocabulary(size: usize) -> Vec<Word> {
        (0..size)
            .map(|i| Word::new(format!("word{i}"), format!("слово{i}")))
            .collect()
    }

    #[test]
    fn deal_offers_at_most_prompts_options_including_the_target() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let deal = deal(vocabulary(10), 4, &mut rng).unwrap();
            assert_eq!(deal.options.len(), 4);
            assert!(deal.options.contains(&deal.card.english().to_owned()));
        }
    }

    #[test]
    fn deal_with_small_dictionary_uses_every_word() {
        let mut rng = StdRng::seed_from_u64(1);

        let deal = deal(vocabulary(2), 4, &mut rng).unwrap();
        let mut options = deal.options.clone();
        options.sort();
        assert_eq!(options, vec!["word0", "word1"]);
    }

    #[test]
    fn deal_on_empty_dictionary_is_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(deal(Vec::new(), 4, &mut rng), None);
    }

    #[test]
    fn deal_eventually_targets_every_word() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..200 {
            seen.insert(deal(vocabulary(5), 4, &mut rng).unwrap().card);
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn pairs_are_split_and_trimmed() {
        assert_eq!(
            parse_pair("  apple -  яблоко "),
            Ok(("apple".into(), "яблоко".into()))
        );
        assert_eq!(parse_pair("cat-кошка"), Ok(("cat".into(), "кошка".into())));
        assert_eq!(parse_pair("dog — собака"), Ok(("dog".into(), "собака".into())));
    }

    #[test]
    fn spaced_dash_keeps_hyphenated_terms() {
        assert_eq!(
            parse_pair("well-known - известный"),
            Ok(("well-known".into(), "известный".into()))
        );
    }

    #[test]
    fn malformed_pairs_are_rejected() {
        assert_eq!(parse_pair("apple яблоко"), Err(PairError::MissingSeparator));
        assert_eq!(parse_pair("apple - "), Err(PairError::EmptyPart));
        assert_eq!(parse_pair(" - яблоко"), Err(PairError::EmptyPart));

        let long = "a".repeat(MAX_WORD_LEN + 1);
        assert_eq!(
            parse_pair(&format!("{long} - длинное")),
            Err(PairError::TooLong { max: MAX_WORD_LEN })
        );
    }

    #[test]
    fn guesses_match_the_english_term() {
        let card = Word::new("house", "дом");
        assert!(is_correct(&card, "house"));
        assert!(is_correct(&card, " house "));
        assert!(!is_correct(&card, "House"));
        assert!(!is_correct(&card, "home"));
    }

    #[test]
    fn wrong_guess_is_marked_once() {
        let mut options = vec!["red".to_owned(), "green".to_owned()];

        mark_wrong(&mut options, "green");
        assert_eq!(options, vec!["red", "green❌"]);

        mark_wrong(&mut options, "green❌");
        mark_wrong(&mut options, "blue");
        assert_eq!(options, vec!["red", "green❌"]);
    }

    #[test]
    fn dictionary_size_agrees_with_the_number() {
        assert_eq!(dictionary_size(1), "В Вашем словаре 1 слово");
        assert_eq!(dictionary_size(3), "В Вашем словаре 3 слова");
        assert_eq!(dictionary_size(8), "В Вашем словаре 8 слов");
        assert_eq!(dictionary_size(11), "В Вашем словаре 11 слов");
        assert_eq!(dictionary_size(12), "В Вашем словаре 12 слов");
        assert_eq!(dictionary_size(21), "В Вашем словаре 21 слово");
        assert_eq!(dictionary_size(24), "В Вашем словаре 24 слова");
        assert_eq!(dictionary_size(0), "В Вашем словаре 0 слов");
    }
}
