//! Domain layer: pure card, round and session-timing logic.

pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod health;
pub mod round;
pub mod selection;
pub mod turn_timer;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_cards;

// Re-exports for ergonomics
pub use crate::errors::domain::{DomainError, ValidationKind};
pub use cards_parsing::{decode, encode};
pub use cards_serde::{CardFormat, CompactCard};
pub use cards_types::{canonical, compare, Card, Rank, Suit, ALL_RANKS, ALL_SUITS, NUMBER_OF_CARDS};
pub use health::{ConnectionHealth, HealthStatus, TickReport};
pub use round::{Board, Combination, RoundPayload, RoundState};
pub use selection::SelectionSet;
pub use turn_timer::TurnTimer;
