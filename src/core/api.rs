use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use std::error::Error as _;
use tracing::{debug, error};

use crate::core::config::Config;
use crate::core::error::BotError;

/// Client for the homework status endpoint.
pub struct PracticumClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.endpoint.clone(), config.practicum_token.clone())
    }

    /// Requests every status change since `from_date` (unix seconds) and
    /// returns the JSON body without looking inside it.
    pub async fn fetch_updates(&self, from_date: i64) -> Result<Value, BotError> {
        debug!("Requesting homework statuses from_date={}", from_date);
        let res = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                let message = format!("Не успешный запрос к API! Ошибка - {}", describe(e));
                error!("{}", message);
                BotError::ApiUnavailable(message)
            })?;

        let status = res.status();
        if status != StatusCode::OK {
            let message = format!("ENDPOINT неккоректен или недоступен! Код ответа - {}", status);
            error!("{}", message);
            return Err(BotError::ApiUnavailable(message));
        }

        res.json::<Value>().await.map_err(|e| {
            let cause = describe(e);
            error!("Failed to decode API response: {}", cause);
            BotError::InvalidJson(cause)
        })
    }
}

/// Renders a reqwest error with its causes but without the request URL, so
/// the text stays the same from one window to the next.
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
