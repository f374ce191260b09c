//! Owned per-connection session state.
//!
//! Coordinator-driven fields are only mutated through the dispatcher
//! (`crate::ws::dispatcher`); the selection is the one player-driven part.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::{
    canonical, decode, Card, ConnectionHealth, DomainError, HealthStatus, RoundState,
    SelectionSet, TurnTimer, ValidationKind,
};
use crate::ws::protocol::{Step, StepKind};

/// Opaque player identifier assigned by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(pub String);

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Won,
    Lost,
    /// Another socket of this player is already in a game.
    AlreadyPlaying,
    /// Heartbeat timeout tier reached.
    ConnectionLost,
    /// Coordinator closed the connection without an outcome.
    Closed,
    /// The local player left.
    Exited,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Waiting,
    Playing,
    Over(SessionOutcome),
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    identity: Option<PlayerId>,
    phase: SessionPhase,
    hand: Vec<Card>,
    deck_size: usize,
    opponent_deck_size: Option<usize>,
    round: RoundState,
    selection: SelectionSet,
    health: ConnectionHealth,
    timer: TurnTimer,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> Option<&PlayerId> {
        self.identity.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        match self.phase {
            SessionPhase::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Current hand, canonical order, no duplicates.
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    pub fn opponent_deck_size(&self) -> Option<usize> {
        self.opponent_deck_size
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn health(&self) -> &ConnectionHealth {
        &self.health
    }

    pub fn health_status(&self) -> HealthStatus {
        self.health.status()
    }

    pub fn timer(&self) -> &TurnTimer {
        &self.timer
    }

    pub fn timer_display(&self) -> Option<i64> {
        self.timer.display()
    }

    /// Player card tap. Only cards currently in hand can be selected.
    pub fn toggle_selection(&mut self, identity: &str) -> Result<bool, DomainError> {
        if self.is_over() {
            return Err(DomainError::validation(
                ValidationKind::SessionOver,
                "Session is over",
            ));
        }
        let card = decode(identity)?;
        if !self.hand.contains(&card) {
            return Err(DomainError::validation(
                ValidationKind::CardNotInHand,
                format!("Card not in hand: {identity}"),
            ));
        }
        Ok(self.selection.toggle_card(card))
    }

    /// Builds the move to submit from the current selection.
    pub fn build_step(&self, kind: StepKind) -> Result<Step, DomainError> {
        if self.is_over() {
            return Err(DomainError::validation(
                ValidationKind::SessionOver,
                "Session is over",
            ));
        }
        let step = match kind {
            StepKind::GetCard => Step::GetCard,
            StepKind::GetComb => Step::GetComb,
            StepKind::GiveComb | StepKind::TransComb => {
                if self.selection.is_empty() {
                    return Err(DomainError::validation(
                        ValidationKind::EmptySelection,
                        format!("{kind:?} needs at least one selected card"),
                    ));
                }
                let cards = self.selection.to_sorted_vec();
                if kind == StepKind::GiveComb {
                    Step::GiveComb(cards)
                } else {
                    Step::TransComb(cards)
                }
            }
        };
        Ok(step)
    }

    // Dispatcher-side mutators below.

    /// Sets the identity once; later assignments are refused.
    pub(crate) fn assign_identity(&mut self, id: PlayerId) -> bool {
        if self.identity.is_some() {
            return false;
        }
        self.identity = Some(id);
        true
    }

    /// Leaves the waiting phase. Returns `true` on the transition.
    pub(crate) fn start_playing(&mut self) -> bool {
        if self.phase == SessionPhase::Waiting {
            self.phase = SessionPhase::Playing;
            true
        } else {
            false
        }
    }

    /// Enters the terminal phase. The first outcome wins.
    pub(crate) fn finish(&mut self, outcome: SessionOutcome) -> bool {
        if self.is_over() {
            return false;
        }
        self.phase = SessionPhase::Over(outcome);
        self.timer.stop();
        true
    }

    /// Replaces the hand wholesale; the selection narrows to what is still held.
    pub(crate) fn replace_hand(&mut self, cards: Vec<Card>, deck_size: usize) {
        self.hand = canonical(cards);
        self.deck_size = deck_size;
        self.selection.retain_in(&self.hand);
    }

    pub(crate) fn set_opponent_deck_size(&mut self, size: usize) {
        self.opponent_deck_size = Some(size);
    }

    pub(crate) fn set_round(&mut self, round: RoundState) {
        self.round = round;
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub(crate) fn health_mut(&mut self) -> &mut ConnectionHealth {
        &mut self.health
    }

    pub(crate) fn timer_mut(&mut self) -> &mut TurnTimer {
        &mut self.timer
    }
}
