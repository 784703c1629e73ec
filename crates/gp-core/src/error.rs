use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Symbol dictionary error: {0}")]
    Dictionary(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PromptError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Only transport-level failures are worth retrying; bad input and a
    /// corrupt dictionary fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Other(_))
    }
}

pub type Result<T> = std::result::Result<T, PromptError>;
