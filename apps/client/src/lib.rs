#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod state;
pub mod ws;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::ClientConfig;
pub use domain::{Card, Rank, RoundState, SelectionSet, Suit};
pub use error::ClientError;
pub use errors::DomainError;
pub use state::{PlayerId, SessionOutcome, SessionPhase, SessionState};
pub use ws::dispatcher::{dispatch, dispatch_control_frame, dispatch_frame, heartbeat};
pub use ws::{run_session, SessionEvent, Transport, UserCommand, WsTransport};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
