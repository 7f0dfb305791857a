use thiserror::Error;

/// Failures of a single poll cycle. None of them stop the bot: the poller
/// reports each distinct one once and retries on the next cycle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BotError {
    #[error("{0}")]
    ApiUnavailable(String),

    #[error("Пустой словарь в response")]
    EmptyResponse,

    #[error("{0}")]
    TypeMismatch(String),

    #[error("Недокументированный статус работы - \"{0}\"")]
    UnknownStatus(String),

    #[error("Ответ API не является JSON: {0}")]
    InvalidJson(String),
}

/// Startup configuration problems. These are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Проблема с переменными окружения, завершение программы! Отсутствуют: {}", .0.join(", "))]
    MissingTokens(Vec<&'static str>),

    #[error("RETRY_TIME должен быть положительным целым числом секунд, получено \"{0}\"")]
    InvalidRetryTime(String),
}
