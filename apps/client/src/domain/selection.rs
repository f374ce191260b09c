//! The local player's in-progress choice of cards to submit.

use std::collections::HashSet;

use super::cards_parsing::decode;
use super::cards_types::{canonical, Card};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    cards: HashSet<Card>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of the card named by `identity`.
    ///
    /// Returns `true` when the card is selected afterwards. A malformed
    /// identity leaves the set untouched.
    pub fn toggle(&mut self, identity: &str) -> Result<bool, DomainError> {
        let card = decode(identity)?;
        Ok(self.toggle_card(card))
    }

    pub fn toggle_card(&mut self, card: Card) -> bool {
        if self.cards.remove(&card) {
            false
        } else {
            self.cards.insert(card);
            true
        }
    }

    /// Membership test by identity; malformed identities are never selected.
    pub fn contains(&self, identity: &str) -> bool {
        decode(identity)
            .map(|card| self.cards.contains(&card))
            .unwrap_or(false)
    }

    pub fn contains_card(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Drops every member not present in `hand`.
    pub fn retain_in(&mut self, hand: &[Card]) {
        self.cards.retain(|c| hand.contains(c));
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Members in canonical order, as submitted to the coordinator.
    pub fn to_sorted_vec(&self) -> Vec<Card> {
        canonical(self.cards.iter().copied())
    }
}
