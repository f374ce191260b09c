//! Client configuration read from the environment.
//!
//! - `COORDINATOR_URL` (default `ws://localhost:8000/ws`)
//! - `COORDINATOR_SUBPROTOCOL` (default `echo`; empty disables it)
//! - `HEARTBEAT_INTERVAL_SECS` (default 15) or `HEARTBEAT_INTERVAL_MS`
//! - `COORDINATOR_CARD_FORMAT` (`object` or `compact`, default `object`)

use std::time::Duration;

use crate::domain::CardFormat;
use crate::error::ClientError;

pub const DEFAULT_COORDINATOR_URL: &str = "ws://localhost:8000/ws";
pub const DEFAULT_SUBPROTOCOL: &str = "echo";
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub coordinator_url: String,
    pub subprotocol: Option<String>,
    pub heartbeat_interval: Duration,
    /// Card encoding in outbound combination steps.
    pub card_format: CardFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COORDINATOR_URL)
    }
}

impl ClientConfig {
    pub fn new(coordinator_url: impl Into<String>) -> Self {
        Self {
            coordinator_url: coordinator_url.into(),
            subprotocol: Some(DEFAULT_SUBPROTOCOL.to_string()),
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
            card_format: CardFormat::default(),
        }
    }

    pub fn with_subprotocol(mut self, subprotocol: Option<String>) -> Self {
        self.subprotocol = subprotocol;
        self
    }

    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    pub fn with_card_format(mut self, card_format: CardFormat) -> Self {
        self.card_format = card_format;
        self
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` uses the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("COORDINATOR_URL").unwrap_or_else(|| DEFAULT_COORDINATOR_URL.to_string());
        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            return Err(ClientError::config(format!(
                "COORDINATOR_URL must be a ws:// or wss:// URL, got {url}"
            )));
        }

        let subprotocol = match lookup("COORDINATOR_SUBPROTOCOL") {
            Some(p) if p.trim().is_empty() => None,
            Some(p) => Some(p),
            None => Some(DEFAULT_SUBPROTOCOL.to_string()),
        };

        let heartbeat_interval = if let Some(ms) = lookup("HEARTBEAT_INTERVAL_MS") {
            Duration::from_millis(parse_positive("HEARTBEAT_INTERVAL_MS", &ms)?)
        } else if let Some(secs) = lookup("HEARTBEAT_INTERVAL_SECS") {
            Duration::from_secs(parse_positive("HEARTBEAT_INTERVAL_SECS", &secs)?)
        } else {
            DEFAULT_HEARTBEAT_INTERVAL
        };

        let card_format = match lookup("COORDINATOR_CARD_FORMAT") {
            Some(raw) => CardFormat::from_name(&raw).ok_or_else(|| {
                ClientError::config(format!(
                    "COORDINATOR_CARD_FORMAT must be object or compact, got {raw:?}"
                ))
            })?,
            None => CardFormat::default(),
        };

        Ok(Self {
            coordinator_url: url,
            subprotocol,
            heartbeat_interval,
            card_format,
        })
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.heartbeat_interval.is_zero() {
            return Err(ClientError::config("heartbeat interval must be positive"));
        }
        Ok(())
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<u64, ClientError> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(ClientError::config(format!(
            "{key} must be a positive integer, got {raw:?}"
        ))),
        Ok(v) => Ok(v),
    }
}
