use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error};

use crate::core::error::BotError;

pub const HOMEWORKS_KEY: &str = "homeworks";

/// Review status of a submission. The set is closed: anything the API sends
/// outside of it is reported as [`BotError::UnknownStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(BotError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct HomeworkRecord {
    homework_name: String,
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    reviewer_comment: Option<Value>,
}

impl HomeworkRecord {
    fn status(&self) -> Result<HomeworkStatus, BotError> {
        match &self.status {
            Some(Value::String(code)) => code.parse(),
            Some(other) => Err(BotError::UnknownStatus(other.to_string())),
            None => Err(BotError::UnknownStatus("null".to_string())),
        }
    }

    /// Only a string comment is kept; anything else is dropped.
    fn comment(&self) -> Option<String> {
        match &self.reviewer_comment {
            Some(Value::String(comment)) => Some(comment.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub homework_name: String,
    pub status: HomeworkStatus,
    pub reviewer_comment: Option<String>,
}

impl StatusUpdate {
    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.homework_name,
            self.status.verdict()
        )
    }

    /// Message plus the reviewer comment, used as the animation caption.
    pub fn caption(&self) -> String {
        match self.reviewer_comment.as_deref() {
            Some(comment) if !comment.trim().is_empty() => {
                format!("{}\nКомментарий:\n{}", self.message(), comment)
            }
            _ => self.message(),
        }
    }
}

/// Checks the shape of an API answer and returns the `homeworks` array as is.
pub fn check_response(response: Value) -> Result<Vec<Value>, BotError> {
    debug!("Checking API response shape");
    let mut map = match response {
        Value::Object(map) => map,
        other => {
            let message = format!(
                "Тип response отличный от словаря - {}",
                json_type_name(&other)
            );
            error!("{}", message);
            return Err(BotError::TypeMismatch(message));
        }
    };

    if map.is_empty() {
        error!("Пустой словарь в response");
        return Err(BotError::EmptyResponse);
    }

    match map.remove(HOMEWORKS_KEY) {
        Some(Value::Array(homeworks)) => Ok(homeworks),
        _ => {
            let message = "Ключ \"homeworks\" имеет тип данных отличный от list".to_string();
            error!("{}", message);
            Err(BotError::TypeMismatch(message))
        }
    }
}

/// Turns one homework record into a [`StatusUpdate`].
pub fn parse_status(homework: &Value) -> Result<StatusUpdate, BotError> {
    debug!("Parsing homework status");
    let record = HomeworkRecord::deserialize(homework).map_err(|e| {
        let message = format!("Некорректная запись о домашней работе: {}", e);
        error!("{}", message);
        BotError::TypeMismatch(message)
    })?;

    let status = record.status().inspect_err(|e| {
        error!("{}", e);
    })?;
    let reviewer_comment = record.comment();

    Ok(StatusUpdate {
        homework_name: record.homework_name,
        status,
        reviewer_comment,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
