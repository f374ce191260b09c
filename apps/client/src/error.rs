use thiserror::Error;

use crate::errors::domain::DomainError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Transport error: {detail}")]
    Transport { detail: String },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ClientError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::transport(err.to_string())
    }
}
