use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use teloxide::prelude::*;
use teloxide::types::{InputFile, Recipient};
use tracing::info;

use crate::core::config::Config;
use crate::core::notifier::Messenger;

/// Accepts a numeric chat id or an `@channel` username.
pub fn parse_recipient(chat_id: &str) -> Recipient {
    let chat_id = chat_id.trim();
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.to_string()),
    }
}

/// Sends notifications to one Telegram chat through the Bot API.
pub struct TelegramMessenger {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramMessenger {
    pub fn new(token: &str, chat_id: &str) -> Self {
        Self {
            bot: Bot::new(token),
            recipient: parse_recipient(chat_id),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        info!("Telegram messenger targeting chat {}", config.telegram_chat_id);
        Self::new(&config.telegram_token, &config.telegram_chat_id)
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, text: &str) -> Result<()> {
        self.bot
            .send_message(self.recipient.clone(), text)
            .await
            .context("sendMessage failed")?;
        Ok(())
    }

    async fn send_animation(&self, url: &str, caption: &str) -> Result<()> {
        let url = Url::parse(url).with_context(|| format!("invalid animation url {}", url))?;
        self.bot
            .send_animation(self.recipient.clone(), InputFile::url(url))
            .caption(caption)
            .await
            .context("sendAnimation failed")?;
        Ok(())
    }
}
