//! Round state: passive vs. active round with a declared combination.

use serde::{Deserialize, Serialize};

use super::cards_types::{canonical, Card};

/// The grouping currently required to be matched or beaten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub cards: Vec<Card>,
}

/// Body of an active round as pushed by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub comb: Combination,
    pub cards: Vec<Card>,
}

/// Wire form: `"Passive"` or `{"Active": {"comb": {"cards": [..]}, "cards": [..]}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPayload {
    Active(Board),
    Passive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoundState {
    #[default]
    Passive,
    Active {
        /// Declared combination, canonical order.
        combination: Combination,
        /// Every card visible in the round, canonical order.
        board: Vec<Card>,
        /// `board` minus the combination's cards, canonical order.
        playable: Vec<Card>,
    },
}

impl RoundState {
    /// Replaces the round wholesale from a coordinator payload.
    ///
    /// The playable board is recomputed from scratch on every call.
    pub fn apply(payload: RoundPayload) -> Self {
        match payload {
            RoundPayload::Passive => RoundState::Passive,
            RoundPayload::Active(Board { comb, cards }) => {
                let combination = Combination {
                    cards: canonical(comb.cards),
                };
                let board = canonical(cards);
                let playable = board_minus_combination(&board, &combination);
                RoundState::Active {
                    combination,
                    board,
                    playable,
                }
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RoundState::Active { .. })
    }

    pub fn combination(&self) -> Option<&Combination> {
        match self {
            RoundState::Passive => None,
            RoundState::Active { combination, .. } => Some(combination),
        }
    }

    /// Cards offered for counter-play; empty in a passive round.
    pub fn playable(&self) -> &[Card] {
        match self {
            RoundState::Passive => &[],
            RoundState::Active { playable, .. } => playable,
        }
    }
}

/// `board \ combination.cards` by card equality, canonical order, no duplicates.
pub fn board_minus_combination(board: &[Card], combination: &Combination) -> Vec<Card> {
    canonical(
        board
            .iter()
            .copied()
            .filter(|c| !combination.cards.contains(c)),
    )
}
