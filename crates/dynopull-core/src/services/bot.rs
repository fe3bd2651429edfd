//! Chat command handlers.
//!
//! `BotService` is the application facade: one method per chat command,
//! each a short linear script over the Heroku gateway, the archiver and the
//! chat transport. Failures are caught in [`BotService::handle`] and
//! reported back to the chat as plain text.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{ApiKey, AppName, BotCommand, ChatId, ChatRequest, MessageId, UserId};
use crate::error::BotError;
use crate::ports::{Archiver, ChatTransport, OutgoingDocument};
use crate::settings::DEFAULT_MAX_DOCUMENT_MB;
use crate::utils::{TELEGRAM_MESSAGE_LIMIT, split_message};

use super::credentials::CredentialStore;
use super::heroku::HerokuGateway;

pub const WELCOME_MESSAGE: &str =
    "Welcome! Use /apps to list Heroku apps or /setapi to set your Heroku API key.";

pub const HELP_MESSAGE: &str = "Commands:\n\
    /setapi <api_key> - set the Heroku API key\n\
    /apps - list your Heroku apps\n\
    /container <app_name> - download the app's /app directory as a zip\n\
    /help - show this message";

pub const MISSING_KEY_MESSAGE: &str = "Please set your Heroku API key using /setapi <api_key>.";

pub const UNAUTHORIZED_MESSAGE: &str = "You are not authorized to use this bot.";

pub const EMPTY_OUTPUT_MESSAGE: &str = "(no output)";

const SETAPI_USAGE: &str = "/setapi <api_key>";
const CONTAINER_USAGE: &str = "/container <app_name>";

/// Handler configuration that is not part of the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotServiceConfig {
    /// Users allowed to run commands; empty allows everyone.
    pub allowed_users: Vec<UserId>,
    /// Largest archive that will be uploaded.
    pub max_document_bytes: u64,
    /// Parent for per-request working directories (system temp if unset).
    pub work_dir: Option<PathBuf>,
}

impl Default for BotServiceConfig {
    fn default() -> Self {
        Self {
            allowed_users: Vec::new(),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_MB * 1024 * 1024,
            work_dir: None,
        }
    }
}

/// Command handlers for the bot.
pub struct BotService {
    config: BotServiceConfig,
    credentials: Arc<CredentialStore>,
    heroku: HerokuGateway,
    archiver: Arc<dyn Archiver>,
    transport: Arc<dyn ChatTransport>,
}

impl BotService {
    pub fn new(
        config: BotServiceConfig,
        credentials: Arc<CredentialStore>,
        heroku: HerokuGateway,
        archiver: Arc<dyn Archiver>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            config,
            credentials,
            heroku,
            archiver,
            transport,
        }
    }

    /// Whether `user` may issue commands.
    pub fn is_authorized(&self, user: Option<UserId>) -> bool {
        if self.config.allowed_users.is_empty() {
            return true;
        }
        user.is_some_and(|id| self.config.allowed_users.contains(&id))
    }

    /// Handle one command end to end.
    ///
    /// Never fails: handler errors become an `Error: ...` reply, and a
    /// reply that cannot be delivered is logged.
    pub async fn handle(&self, request: ChatRequest) {
        let chat = request.chat_id;
        let command = request.command.name().to_string();
        info!(chat_id = chat, user_id = ?request.user_id, command = %command, "Handling command");

        if !self.is_authorized(request.user_id) {
            warn!(chat_id = chat, user_id = ?request.user_id, "Rejected unauthorized user");
            self.reply_or_log(chat, UNAUTHORIZED_MESSAGE).await;
            return;
        }

        if let Err(e) = self.dispatch(request).await {
            warn!(chat_id = chat, command = %command, error = %e, "Command failed");
            self.reply_or_log(chat, &e.user_message()).await;
        }
    }

    async fn dispatch(&self, request: ChatRequest) -> Result<(), BotError> {
        let chat = request.chat_id;
        match request.command {
            BotCommand::Start => self.start(chat).await,
            BotCommand::Help => self.help(chat).await,
            BotCommand::SetApi { key } => {
                self.set_api(chat, request.message_id, key.as_deref())
                    .await
            }
            BotCommand::Apps => self.list_apps(chat).await,
            BotCommand::Container { app } => self.container(chat, app.as_deref()).await,
            BotCommand::Unknown { name } => {
                self.reply(chat, &format!("Unknown command /{name}. Try /help."))
                    .await
            }
        }
    }

    /// `/start`
    pub async fn start(&self, chat: ChatId) -> Result<(), BotError> {
        self.reply(chat, WELCOME_MESSAGE).await
    }

    /// `/help`
    pub async fn help(&self, chat: ChatId) -> Result<(), BotError> {
        self.reply(chat, HELP_MESSAGE).await
    }

    /// `/setapi <key>`: replace the shared credential.
    ///
    /// The message carrying the key is deleted on a best-effort basis.
    pub async fn set_api(
        &self,
        chat: ChatId,
        message: MessageId,
        raw_key: Option<&str>,
    ) -> Result<(), BotError> {
        let raw_key = raw_key.ok_or(BotError::Usage(SETAPI_USAGE))?;
        let key = ApiKey::new(raw_key)?;
        let masked = key.masked();
        self.credentials.set(key).await;
        info!(chat_id = chat, key = %masked, "Heroku API key updated");

        if let Err(e) = self.transport.delete_message(chat, message).await {
            debug!(chat_id = chat, error = %e, "Could not delete message containing API key");
        }

        self.reply(chat, &format!("Heroku API key set to: {masked}"))
            .await
    }

    /// `/apps`: forward `heroku apps --json` output.
    pub async fn list_apps(&self, chat: ChatId) -> Result<(), BotError> {
        let Some(key) = self.credentials.get().await else {
            return self.reply(chat, MISSING_KEY_MESSAGE).await;
        };

        let stdout = self.heroku.list_apps(&key).await?;
        let chunks = split_message(&stdout, TELEGRAM_MESSAGE_LIMIT);
        if chunks.is_empty() {
            return self.reply(chat, EMPTY_OUTPUT_MESSAGE).await;
        }
        for chunk in &chunks {
            self.reply(chat, chunk).await?;
        }
        Ok(())
    }

    /// `/container <app>`: export the app image's filesystem as a zip.
    pub async fn container(&self, chat: ChatId, raw_app: Option<&str>) -> Result<(), BotError> {
        let Some(key) = self.credentials.get().await else {
            return self.reply(chat, MISSING_KEY_MESSAGE).await;
        };
        let raw_app = raw_app.ok_or(BotError::Usage(CONTAINER_USAGE))?;
        let app = AppName::parse(raw_app)?;

        let workspace = self.create_workspace()?;
        debug!(app = %app, dir = %workspace.path().display(), "Created working directory");

        self.reply(
            chat,
            &format!("Pulling {}:latest ...", self.heroku.image_ref(&app)),
        )
        .await?;
        self.heroku.container_login(&key).await?;
        self.heroku.pull_image(&app).await?;
        let container_id = self.heroku.create_container(&app).await?;

        let result = self
            .export_container(chat, &app, &container_id, workspace.path())
            .await;

        // The container exists now, remove it whatever happened above
        if let Err(e) = self.heroku.remove_container(&container_id).await {
            warn!(app = %app, container = %container_id, error = %e, "Failed to remove container");
        }
        if let Err(e) = workspace.close() {
            warn!(app = %app, error = %e, "Failed to remove working directory");
        }

        result
    }

    async fn export_container(
        &self,
        chat: ChatId,
        app: &AppName,
        container_id: &str,
        workdir: &Path,
    ) -> Result<(), BotError> {
        let app_dir = workdir.join("app");
        self.heroku
            .copy_from_container(container_id, &app_dir)
            .await?;

        self.reply(chat, &format!("Packaging files from {app} ..."))
            .await?;
        let file_name = format!("{app}.zip");
        let archive_path = workdir.join(&file_name);
        let summary = self
            .archiver
            .zip_dir(&app_dir, workdir, &archive_path)
            .await?;
        info!(app = %app, files = summary.files, bytes = summary.bytes, "Archive created");

        if summary.bytes > self.config.max_document_bytes {
            return Err(BotError::ArchiveTooLarge {
                file_name,
                size: summary.bytes,
                limit: self.config.max_document_bytes,
            });
        }

        let document = OutgoingDocument::new(file_name, summary.path)
            .with_caption(format!("{app}: {} files", summary.files));
        self.transport.send_document(chat, &document).await?;
        Ok(())
    }

    fn create_workspace(&self) -> Result<tempfile::TempDir, BotError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("dynopull-");
        let dir = match &self.config.work_dir {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        };
        dir.map_err(|e| BotError::Workspace(e.to_string()))
    }

    async fn reply(&self, chat: ChatId, text: &str) -> Result<(), BotError> {
        self.transport.send_text(chat, text).await?;
        Ok(())
    }

    async fn reply_or_log(&self, chat: ChatId, text: &str) {
        if let Err(e) = self.transport.send_text(chat, text).await {
            warn!(chat_id = chat, error = %e, "Failed to deliver reply");
        }
    }
}
