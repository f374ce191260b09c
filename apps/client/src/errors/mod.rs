//! Error handling for the game client.

pub mod domain;

pub use domain::{DomainError, ValidationKind};
