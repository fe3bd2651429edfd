//! Chat command parsing.

/// Telegram chat identifier.
pub type ChatId = i64;

/// Telegram user identifier.
pub type UserId = i64;

/// Telegram message identifier, unique within a chat.
pub type MessageId = i64;

/// A slash command received from a chat.
///
/// Arguments are kept raw here; handlers validate them so that a bad
/// argument can be answered with a readable message instead of dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// `/start`
    Start,
    /// `/help`
    Help,
    /// `/setapi <key>`
    SetApi { key: Option<String> },
    /// `/apps`
    Apps,
    /// `/container <app_name>`
    Container { app: Option<String> },
    /// Any other slash command.
    Unknown { name: String },
}

impl BotCommand {
    /// Parse a message text into a command.
    ///
    /// Returns `None` for text that is not a slash command. A `@botname`
    /// suffix on the command (as Telegram adds in group chats) is ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split_whitespace();
        let head = parts.next()?.strip_prefix('/')?;
        let name = head.split_once('@').map_or(head, |(name, _)| name);
        if name.is_empty() {
            return None;
        }
        let first_arg = parts.next().map(str::to_string);

        let command = match name.to_ascii_lowercase().as_str() {
            "start" => Self::Start,
            "help" => Self::Help,
            "setapi" => Self::SetApi { key: first_arg },
            "apps" => Self::Apps,
            "container" => Self::Container { app: first_arg },
            _ => Self::Unknown {
                name: name.to_string(),
            },
        };
        Some(command)
    }

    /// Command name without the leading slash, for logging.
    pub fn name(&self) -> &str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::SetApi { .. } => "setapi",
            Self::Apps => "apps",
            Self::Container { .. } => "container",
            Self::Unknown { name } => name,
        }
    }
}

/// A parsed command together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub chat_id: ChatId,
    /// Sender, absent for anonymous channel posts.
    pub user_id: Option<UserId>,
    pub message_id: MessageId,
    pub command: BotCommand,
}

impl ChatRequest {
    pub const fn new(
        chat_id: ChatId,
        user_id: Option<UserId>,
        message_id: MessageId,
        command: BotCommand,
    ) -> Self {
        Self {
            chat_id,
            user_id,
            message_id,
            command,
        }
    }
}
