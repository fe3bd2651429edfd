//! Long-polling update loop.
//!
//! Each recognised command is handled on its own task so a slow
//! `/container` export never blocks `/apps` in another chat. The loop
//! exits on cancellation or on an error that retrying cannot fix.

use std::sync::Arc;
use std::time::Duration;

use dynopull_core::{BotCommand, BotService, ChatRequest};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::client::TelegramClient;
use crate::error::TelegramResult;
use crate::http::HttpBackend;
use crate::models::Update;

const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);
const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Drives `getUpdates` and dispatches commands to the bot service.
pub struct Poller<B: HttpBackend> {
    client: Arc<TelegramClient<B>>,
    service: Arc<BotService>,
    bot_username: Option<String>,
    retry_delay: Duration,
    shutdown_grace: Duration,
}

impl<B: HttpBackend + 'static> Poller<B> {
    pub fn new(client: Arc<TelegramClient<B>>, service: Arc<BotService>) -> Self {
        Self {
            client,
            service,
            bot_username: None,
            retry_delay: DEFAULT_RETRY_DELAY,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }

    /// Only accept `/cmd@name` mentions addressed to this username.
    #[must_use]
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    /// Delay between retries after a failed poll.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// How long in-flight commands may run after shutdown is requested.
    #[must_use]
    pub const fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    /// Poll until `cancel` fires or a fatal error occurs.
    pub async fn run(&self, cancel: CancellationToken) -> TelegramResult<()> {
        let mut offset: Option<i64> = None;
        let mut tasks = JoinSet::new();
        info!("Polling for updates");

        loop {
            while let Some(joined) = tasks.try_join_next() {
                if let Err(e) = joined {
                    error!(error = %e, "Command task panicked");
                }
            }

            let polled = tokio::select! {
                () = cancel.cancelled() => break,
                polled = self.client.get_updates(offset) => polled,
            };

            match polled {
                Ok(updates) => {
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        let Some(request) = to_request(&update, self.bot_username.as_deref())
                        else {
                            debug!(update_id = update.update_id, "Skipping update");
                            continue;
                        };
                        let service = Arc::clone(&self.service);
                        tasks.spawn(async move { service.handle(request).await });
                    }
                }
                Err(e) if e.is_fatal() => {
                    error!(error = %e, "Polling stopped");
                    self.drain(tasks).await;
                    return Err(e);
                }
                Err(e) => {
                    let wait = e.retry_after().map_or(self.retry_delay, Duration::from_secs);
                    warn!(error = %e, retry_in_secs = wait.as_secs(), "Polling failed, retrying");
                    tokio::select! {
                        () = cancel.cancelled() => break,
                        () = tokio::time::sleep(wait) => {}
                    }
                }
            }
        }

        info!(in_flight = tasks.len(), "Shutting down");
        self.drain(tasks).await;
        Ok(())
    }

    async fn drain(&self, mut tasks: JoinSet<()>) {
        let finished = tokio::time::timeout(self.shutdown_grace, async {
            while let Some(joined) = tasks.join_next().await {
                if let Err(e) = joined {
                    error!(error = %e, "Command task panicked");
                }
            }
        })
        .await;

        if finished.is_err() {
            warn!(
                aborted = tasks.len(),
                "Shutdown grace period elapsed, aborting commands"
            );
            tasks.abort_all();
        }
    }
}

/// Turn an update into a command request.
///
/// Returns `None` for non-message updates, non-command text, and commands
/// mentioning a different bot (`/apps@other_bot`).
pub fn to_request(update: &Update, bot_username: Option<&str>) -> Option<ChatRequest> {
    let message = update.message.as_ref()?;
    let text = message.text.as_deref()?;

    if let (Some(ours), Some(target)) = (bot_username, mention(text)) {
        if !target.eq_ignore_ascii_case(ours) {
            return None;
        }
    }

    let command = BotCommand::parse(text)?;
    Some(ChatRequest::new(
        message.chat.id,
        message.from.as_ref().map(|user| user.id),
        message.message_id,
        command,
    ))
}

fn mention(text: &str) -> Option<&str> {
    let head = text.split_whitespace().next()?.strip_prefix('/')?;
    head.split_once('@').map(|(_, target)| target)
}
