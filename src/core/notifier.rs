use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::core::homework::{HomeworkStatus, StatusUpdate};

pub const APPROVED_ANIMATION: &str = "https://i.gifer.com/C6b.gif";
pub const REJECTED_ANIMATION: &str = "https://partnerkin.com/storage/files/file_1573820864.gif";

/// Outbound transport. Implementations address a single fixed chat.
#[async_trait]
pub trait Messenger {
    async fn send_text(&self, text: &str) -> Result<()>;
    async fn send_animation(&self, url: &str, caption: &str) -> Result<()>;
}

pub fn animation_for(status: HomeworkStatus) -> Option<&'static str> {
    match status {
        HomeworkStatus::Approved => Some(APPROVED_ANIMATION),
        HomeworkStatus::Rejected => Some(REJECTED_ANIMATION),
        HomeworkStatus::Reviewing => None,
    }
}

/// Delivers messages through a [`Messenger`]. Send failures are logged and
/// never returned to the caller.
pub struct Notifier<M> {
    messenger: M,
}

impl<M: Messenger> Notifier<M> {
    pub fn new(messenger: M) -> Self {
        Self { messenger }
    }

    #[cfg(test)]
    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Returns whether the message went out.
    pub async fn send_message(&self, text: &str) -> bool {
        debug!("Sending message");
        match self.messenger.send_text(text).await {
            Ok(()) => {
                info!("Сообщение отправлено");
                true
            }
            Err(e) => {
                error!("Сообщение не было отправлено!!! Ошибка - {}", e);
                false
            }
        }
    }

    async fn send_animation(&self, url: &str, caption: &str) -> bool {
        debug!("Sending animation {}", url);
        match self.messenger.send_animation(url, caption).await {
            Ok(()) => {
                info!("Сообщение с анимацией отправлено");
                true
            }
            Err(e) => {
                error!("Анимация не была отправлена!!! Ошибка - {}", e);
                false
            }
        }
    }

    /// Sends the status message, then for final verdicts an animation
    /// captioned with the message and reviewer comment.
    pub async fn notify_status(&self, update: &StatusUpdate) {
        self.send_message(&update.message()).await;

        if let Some(url) = animation_for(update.status) {
            self.send_animation(url, &update.caption()).await;
        }
    }
}
