use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrossbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// A command descriptor is inconsistent. Raised once, when the command is
    /// built or registered, never per request.
    #[error("Invalid command `{command}`: {reason}")]
    InvalidCommand { command: String, reason: String },

    #[error("Alias `{alias}` is already registered")]
    DuplicateAlias { alias: String },

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Malformed callback payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl CrossbotError {
    /// Short, stable error code for logs and adapter responses.
    pub fn code(&self) -> &'static str {
        match self {
            CrossbotError::Config(_) => "CONFIG_ERROR",
            CrossbotError::InvalidCommand { .. } => "INVALID_COMMAND",
            CrossbotError::DuplicateAlias { .. } => "DUPLICATE_ALIAS",
            CrossbotError::UnknownPlatform(_) => "UNKNOWN_PLATFORM",
            CrossbotError::Payload(_) => "PAYLOAD_ERROR",
        }
    }

    pub fn invalid_command(command: &str, reason: impl Into<String>) -> Self {
        CrossbotError::InvalidCommand {
            command: command.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CrossbotError>;
