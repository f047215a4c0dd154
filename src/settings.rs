use std::{env, net::SocketAddr, str::FromStr};

use tracing::warn;
use url::Url;

use crate::error::SettingsError;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_PROMPTS_NUM: usize = 4;
const DEFAULT_START_WORDS_NUM: i64 = 8;

#[derive(Debug, Clone)]
pub struct Settings {
    pub token: String,
    pub database_url: String,
    pub log_level: String,
    /// How many answer options a card offers.
    pub prompts_num: usize,
    /// How many starter words a new person gets linked to.
    pub start_words_num: i64,
    pub webhook: Option<Webhook>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Webhook {
    pub url: Url,
    pub addr: SocketAddr,
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(SettingsError::Missing(key));

        let prompts_num = parse_or(&lookup, "PROMPTS_NUM", DEFAULT_PROMPTS_NUM)?;
        if prompts_num < 1 {
            return Err(SettingsError::Invalid {
                key: "PROMPTS_NUM",
                reason: "at least one option is needed".into(),
            });
        }

        let start_words_num = parse_or(&lookup, "START_WORDS_NUM", DEFAULT_START_WORDS_NUM)?;
        if start_words_num < 0 {
            return Err(SettingsError::Invalid {
                key: "START_WORDS_NUM",
                reason: "can't be negative".into(),
            });
        }

        Ok(Self {
            token: required("TELOXIDE_TOKEN")?,
            database_url: required("DATABASE_URL")?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.into()),
            prompts_num,
            start_words_num,
            webhook: webhook(&lookup)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, SettingsError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| SettingsError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn webhook<F>(lookup: &F) -> Result<Option<Webhook>, SettingsError>
where
    F: Fn(&str) -> Option<String>,
{
    match (lookup("NGROK_URL"), lookup("NGROK_ADDR")) {
        (Some(url), Some(addr)) => {
            let url = url.parse::<Url>().map_err(|e| SettingsError::Invalid {
                key: "NGROK_URL",
                reason: e.to_string(),
            })?;
            let addr = addr.parse::<SocketAddr>().map_err(|e| SettingsError::Invalid {
                key: "NGROK_ADDR",
                reason: e.to_string(),
            })?;
            Ok(Some(Webhook { url, addr }))
        }
        (None, None) => Ok(None),
        _ => {
            warn!("Only one of NGROK_URL and NGROK_ADDR is set, falling back to polling");
            Ok(None)
        }
    }
}
