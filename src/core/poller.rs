use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::core::api::PracticumClient;
use crate::core::error::BotError;
use crate::core::homework::{HomeworkStatus, StatusUpdate, check_response, parse_status};
use crate::core::notifier::{Messenger, Notifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The API returned no homework in the window.
    NoUpdate,
    Notified(HomeworkStatus),
    /// A failure whose text had not been sent before.
    ErrorReported,
    /// A failure already reported by an earlier cycle.
    ErrorSuppressed,
}

pub fn failure_message(err: &BotError) -> String {
    format!("Сбой в работе программы!\n\n{}", err)
}

/// The poll-check-notify loop. Owns the set of failure texts already sent so
/// a persistent outage is reported once per process lifetime.
pub struct Poller<M> {
    client: PracticumClient,
    notifier: Notifier<M>,
    retry_interval: Duration,
    seen_errors: HashSet<String>,
}

impl<M: Messenger> Poller<M> {
    pub fn new(client: PracticumClient, notifier: Notifier<M>, retry_interval: Duration) -> Self {
        Self {
            client,
            notifier,
            retry_interval,
            seen_errors: HashSet::new(),
        }
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &Notifier<M> {
        &self.notifier
    }

    /// The window always looks back one interval from `now`; it does not
    /// resume from the last successful poll.
    pub fn window_start(&self, now: i64) -> i64 {
        let back = i64::try_from(self.retry_interval.as_secs()).unwrap_or(i64::MAX);
        now.saturating_sub(back)
    }

    async fn check_updates(&self, now: i64) -> Result<Option<StatusUpdate>, BotError> {
        let answer = self.client.fetch_updates(self.window_start(now)).await?;
        let homeworks = check_response(answer)?;
        match homeworks.first() {
            Some(homework) => parse_status(homework).map(Some),
            None => Ok(None),
        }
    }

    pub async fn run_cycle(&mut self, now: i64) -> CycleOutcome {
        match self.check_updates(now).await {
            Ok(Some(update)) => {
                info!(
                    homework = %update.homework_name,
                    status = %update.status,
                    "Homework status changed"
                );
                self.notifier.notify_status(&update).await;
                CycleOutcome::Notified(update.status)
            }
            Ok(None) => {
                debug!("Новый статус отсутствует.");
                CycleOutcome::NoUpdate
            }
            Err(err) => self.report_failure(err).await,
        }
    }

    async fn report_failure(&mut self, err: BotError) -> CycleOutcome {
        match &err {
            BotError::ApiUnavailable(reason) => warn!("Review API unavailable: {}", reason),
            BotError::EmptyResponse | BotError::TypeMismatch(_) | BotError::InvalidJson(_) => {
                error!("Unexpected review API answer: {}", err)
            }
            BotError::UnknownStatus(status) => error!("Unknown homework status: {}", status),
        }

        let message = failure_message(&err);
        if self.seen_errors.contains(&message) {
            debug!("Failure already reported, not sending it again");
            return CycleOutcome::ErrorSuppressed;
        }
        self.notifier.send_message(&message).await;
        self.seen_errors.insert(message);
        CycleOutcome::ErrorReported
    }

    /// Polls until the process is killed.
    pub async fn run_forever(&mut self) {
        info!(
            "Polling homework statuses every {}s",
            self.retry_interval.as_secs()
        );
        loop {
            let now = chrono::Utc::now().timestamp();
            let outcome = self.run_cycle(now).await;
            debug!("Cycle finished: {:?}", outcome);
            tokio::time::sleep(self.retry_interval).await;
        }
    }
}
