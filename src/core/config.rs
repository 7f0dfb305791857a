use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error};

use crate::core::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_TIME: u64 = 600;
pub const DEFAULT_LOG_FILE: &str = "program.log";

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const PRACTICUM_ENDPOINT: &str = "PRACTICUM_ENDPOINT";
pub const RETRY_TIME: &str = "RETRY_TIME";
pub const BOT_LOG_FILE: &str = "BOT_LOG_FILE";

/// What happened to the `.env` file. Kept on the config so it can be logged
/// once the subscriber is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotenvStatus {
    Loaded(PathBuf),
    NotFound,
    Failed(String),
}

impl DotenvStatus {
    pub fn from_result(result: dotenvy::Result<PathBuf>) -> Self {
        match result {
            Ok(path) => DotenvStatus::Loaded(path),
            Err(e) if e.not_found() => DotenvStatus::NotFound,
            Err(e) => DotenvStatus::Failed(e.to_string()),
        }
    }

    pub fn log(&self) {
        match self {
            DotenvStatus::Loaded(path) => debug!("Loaded environment from {}", path.display()),
            DotenvStatus::NotFound => debug!("No .env file, using the process environment"),
            DotenvStatus::Failed(e) => error!("Failed to read .env file: {}", e),
        }
    }
}

/// Everything the bot reads from its environment. Built once at startup and
/// handed to the poller by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub endpoint: String,
    pub retry_interval: Duration,
    pub log_file: PathBuf,
    pub dotenv: DotenvStatus,
}

impl Config {
    /// Loads `.env` from the working directory if there is one, then reads
    /// the process environment. Missing tokens are left empty so that
    /// [`Config::check_tokens`] can report them.
    pub fn from_env() -> Result<Self, ConfigError> {
        let dotenv = DotenvStatus::from_result(dotenvy::dotenv());
        let mut config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.dotenv = dotenv;
        Ok(config)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let retry_interval = match non_empty(RETRY_TIME) {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs.unsigned_abs()),
                _ => return Err(ConfigError::InvalidRetryTime(raw)),
            },
            None => Duration::from_secs(DEFAULT_RETRY_TIME),
        };

        Ok(Self {
            practicum_token: lookup(PRACTICUM_TOKEN).unwrap_or_default(),
            telegram_token: lookup(TELEGRAM_TOKEN).unwrap_or_default(),
            telegram_chat_id: lookup(TELEGRAM_CHAT_ID).unwrap_or_default(),
            endpoint: non_empty(PRACTICUM_ENDPOINT).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            retry_interval,
            log_file: non_empty(BOT_LOG_FILE)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            dotenv: DotenvStatus::NotFound,
        })
    }

    pub fn missing_tokens(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN, &self.practicum_token),
            (TELEGRAM_TOKEN, &self.telegram_token),
            (TELEGRAM_CHAT_ID, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// True when all three credentials are present.
    pub fn check_tokens(&self) -> bool {
        debug!("Checking environment variables");
        let missing = self.missing_tokens();
        if !missing.is_empty() {
            error!(critical = true, "Проверьте переменные окружения: {}", missing.join(", "));
        }
        missing.is_empty()
    }

    /// Same check as [`Config::check_tokens`], as a startup error.
    pub fn require_tokens(&self) -> Result<(), ConfigError> {
        if self.check_tokens() {
            Ok(())
        } else {
            Err(ConfigError::MissingTokens(self.missing_tokens()))
        }
    }
}
