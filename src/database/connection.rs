use std::error::Error;

use sqlx::postgres::{PgPool, PgPoolOptions};

use super::word::Word;
use crate::error::StorageError;

pub struct Connection {
    pool: PgPool,
}

impl Connection {
    pub async fn connect(connection_string: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        tracing::debug!("Applying migrations");
        sqlx::migrate!().run(&self.pool).await
    }
}

type StorageResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

pub(crate) trait RetreivePerson {
    async fn person_exists(&self, chat_id: i64) -> StorageResult<bool>;
}

pub(crate) trait RegisterPerson {
    /// Registers the chat and links it to the first `start_words` words.
    /// Does nothing for a chat that is already registered.
    async fn add_person(&self, chat_id: i64, start_words: i64) -> StorageResult<()>;
}

pub(crate) trait RetreiveWords {
    async fn words(&self, chat_id: i64) -> StorageResult<Vec<Word>>;

    async fn count_words(&self, chat_id: i64) -> StorageResult<i64>;
}

pub(crate) trait EditDictionary {
    /// Links the pair to the chat. An existing English term is reused as stored.
    async fn add_word(&self, chat_id: i64, english: &str, russian: &str) -> StorageResult<Word>;

    /// Unlinks the word from this chat only. Returns whether a link was removed.
    async fn remove_word(&self, chat_id: i64, english: &str) -> StorageResult<bool>;
}

impl RetreivePerson for Connection {
    async fn person_exists(&self, chat_id: i64) -> StorageResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM person WHERE chat_id = $1)",
        )
        .bind(chat_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

impl RegisterPerson for Connection {
    async fn add_person(&self, chat_id: i64, start_words: i64) -> StorageResult<()> {
        let mut tx = self.pool.begin().await?;

        let person_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO person (chat_id) VALUES ($1) \
             ON CONFLICT (chat_id) DO NOTHING RETURNING id",
        )
        .bind(chat_id)
        .fetch_optional(&mut *tx)
        .await?;

        match person_id {
            Some(person_id) => {
                tracing::debug!("Linking {} starter words to person {}", start_words, person_id);
                sqlx::query(
                    "INSERT INTO person_word (id_word, id_person) \
                     SELECT id, $1 FROM word ORDER BY id LIMIT $2 \
                     ON CONFLICT (id_word, id_person) DO NOTHING",
                )
                .bind(person_id)
                .bind(start_words)
                .execute(&mut *tx)
                .await?;
            }
            None => tracing::debug!("Chat {} is already registered", chat_id),
        }

        tx.commit().await?;

        Ok(())
    }
}

impl RetreiveWords for Connection {
    async fn words(&self, chat_id: i64) -> StorageResult<Vec<Word>> {
        let words = sqlx::query_as::<_, Word>(
            "SELECT word.english, word.russian FROM word \
             INNER JOIN person_word ON person_word.id_word = word.id \
             INNER JOIN person ON person.id = person_word.id_person \
             WHERE person.chat_id = $1 ORDER BY word.id",
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(words)
    }

    async fn count_words(&self, chat_id: i64) -> StorageResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM person_word \
             INNER JOIN person ON person.id = person_word.id_person \
             WHERE person.chat_id = $1",
        )
        .bind(chat_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

impl EditDictionary for Connection {
    async fn add_word(&self, chat_id: i64, english: &str, russian: &str) -> StorageResult<Word> {
        let mut tx = self.pool.begin().await?;

        let person_id =
            sqlx::query_scalar::<_, i32>("SELECT id FROM person WHERE chat_id = $1")
                .bind(chat_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(StorageError::UnknownPerson(chat_id))?;

        sqlx::query(
            "INSERT INTO word (english, russian) VALUES ($1, $2) ON CONFLICT (english) DO NOTHING",
        )
        .bind(english)
        .bind(russian)
        .execute(&mut *tx)
        .await?;

        let (word_id, english, russian) = sqlx::query_as::<_, (i32, String, String)>(
            "SELECT id, english, russian FROM word WHERE english = $1",
        )
        .bind(english)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO person_word (id_word, id_person) VALUES ($1, $2) \
             ON CONFLICT (id_word, id_person) DO NOTHING",
        )
        .bind(word_id)
        .bind(person_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Word::new(english, russian))
    }

    async fn remove_word(&self, chat_id: i64, english: &str) -> StorageResult<bool> {
        let removed = sqlx::query(
            "DELETE FROM person_word USING person, word \
             WHERE person_word.id_person = person.id AND person_word.id_word = word.id \
             AND person.chat_id = $1 AND word.english = $2",
        )
        .bind(chat_id)
        .bind(english)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(removed > 0)
    }
}
