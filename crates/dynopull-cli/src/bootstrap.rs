//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together.
//! All concrete implementations are instantiated here:
//! - Process runner and zip archiver (via dynopull-runtime)
//! - Telegram client and transport (via dynopull-telegram)
//! - Credential store, Heroku gateway and bot service (via dynopull-core)

use std::sync::Arc;
use std::time::Duration;

use dynopull_core::{
    ApiKey, BotService, CredentialStore, HerokuGateway, Settings, validate_settings,
};
use dynopull_runtime::{TokioCommandRunner, ZipArchiver};
use dynopull_telegram::{DefaultTelegramClient, Poller, TelegramClientConfig, TelegramTransport};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::CliError;

/// Fully composed bot, ready to poll.
pub struct BotContext {
    pub client: Arc<DefaultTelegramClient>,
    pub service: Arc<BotService>,
}

/// Validate settings and wire every component.
pub fn bootstrap(settings: &Settings) -> Result<BotContext, CliError> {
    validate_settings(settings)?;

    if let Some(dir) = &settings.work_dir {
        std::fs::create_dir_all(dir)?;
    }

    let initial_key = settings
        .heroku_api_key
        .as_deref()
        .map(ApiKey::new)
        .transpose()?;
    let credentials = Arc::new(CredentialStore::new(initial_key));

    let telegram_config = TelegramClientConfig::new(&settings.telegram_token)
        // Exports can be tens of megabytes
        .with_upload_timeout(Duration::from_secs(600));
    let client = Arc::new(DefaultTelegramClient::new(&telegram_config)?);
    let transport = Arc::new(TelegramTransport::new(Arc::clone(&client)));

    let runner = Arc::new(TokioCommandRunner::new(settings.command_timeout()));
    let heroku = HerokuGateway::new(runner, settings.gateway_config());
    let archiver = Arc::new(ZipArchiver::new());

    let service = Arc::new(BotService::new(
        settings.bot_config(),
        credentials,
        heroku,
        archiver,
        transport,
    ));

    info!(
        process_type = %settings.process_type,
        allowed_users = settings.allowed_users.len(),
        heroku_key_set = settings.heroku_api_key.is_some(),
        "Bot composed"
    );

    Ok(BotContext { client, service })
}

/// Check the token, then poll until `cancel` fires.
pub async fn run(context: BotContext, cancel: CancellationToken) -> Result<(), CliError> {
    let me = context.client.get_me().await?;
    info!(bot_id = me.id, username = ?me.username, "Connected to Telegram");

    let mut poller = Poller::new(context.client, context.service);
    if let Some(username) = me.username {
        poller = poller.with_bot_username(username);
    }
    poller.run(cancel).await?;
    Ok(())
}
