use std::{
    collections::HashMap,
    error::Error,
    sync::Mutex,
};

use super::{
    connection::{EditDictionary, RegisterPerson, RetreivePerson, RetreiveWords},
    word::Word,
};
use crate::error::StorageError;

type StorageResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Storage double mirroring the `word`/`person`/`person_word` tables.
#[derive(Default)]
pub(crate) struct MemoryStorage {
    vocabulary: Mutex<Vec<Word>>,
    people: Mutex<HashMap<i64, Vec<usize>>>,
}

impl MemoryStorage {
    pub(crate) fn with_vocabulary(pairs: &[(&str, &str)]) -> Self {
        let vocabulary = pairs
            .iter()
            .map(|(english, russian)| Word::new(*english, *russian))
            .collect();

        Self {
            vocabulary: Mutex::new(vocabulary),
            people: Mutex::default(),
        }
    }

    pub(crate) fn links(&self, chat_id: i64) -> Vec<String> {
        let vocabulary = self.vocabulary.lock().unwrap();
        self.people
            .lock()
            .unwrap()
            .get(&chat_id)
            .map(|ids| ids.iter().map(|&id| vocabulary[id].english().to_owned()).collect())
            .unwrap_or_default()
    }
}

impl RetreivePerson for MemoryStorage {
    async fn person_exists(&self, chat_id: i64) -> StorageResult<bool> {
        Ok(self.people.lock().unwrap().contains_key(&chat_id))
    }
}

impl RegisterPerson for MemoryStorage {
    async fn add_person(&self, chat_id: i64, start_words: i64) -> StorageResult<()> {
        let available = self.vocabulary.lock().unwrap().len();
        let starter = (0..available).take(start_words as usize).collect();
        self.people.lock().unwrap().entry(chat_id).or_insert(starter);
        Ok(())
    }
}

impl RetreiveWords for MemoryStorage {
    async fn words(&self, chat_id: i64) -> StorageResult<Vec<Word>> {
        let vocabulary = self.vocabulary.lock().unwrap();
        let mut ids = self
            .people
            .lock()
            .unwrap()
            .get(&chat_id)
            .cloned()
            .unwrap_or_default();
        ids.sort_unstable();
        Ok(ids.into_iter().map(|id| vocabulary[id].clone()).collect())
    }

    async fn count_words(&self, chat_id: i64) -> StorageResult<i64> {
        Ok(self
            .people
            .lock()
            .unwrap()
            .get(&chat_id)
            .map_or(0, |ids| ids.len() as i64))
    }
}

impl EditDictionary for MemoryStorage {
    async fn add_word(&self, chat_id: i64, english: &str, russian: &str) -> StorageResult<Word> {
        let mut vocabulary = self.vocabulary.lock().unwrap();
        let mut people = self.people.lock().unwrap();
        let links = people
            .get_mut(&chat_id)
            .ok_or(StorageError::UnknownPerson(chat_id))?;

        let id = match vocabulary.iter().position(|word| word.english() == english) {
            Some(id) => id,
            None => {
                vocabulary.push(Word::new(english, russian));
                vocabulary.len() - 1
            }
        };

        if !links.contains(&id) {
            links.push(id);
        }

        Ok(vocabulary[id].clone())
    }

    async fn remove_word(&self, chat_id: i64, english: &str) -> StorageResult<bool> {
        let vocabulary = self.vocabulary.lock().unwrap();
        let Some(id) = vocabulary.iter().position(|word| word.english() == english) else {
            return Ok(false);
        };

        let mut people = self.people.lock().unwrap();
        let Some(links) = people.get_mut(&chat_id) else {
            return Ok(false);
        };

        let before = links.len();
        links.retain(|&linked| linked != id);
        Ok(links.len() < before)
    }
}
