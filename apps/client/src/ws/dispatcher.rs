//! Protocol dispatcher: routes decoded coordinator messages and heartbeat
//! ticks onto [`SessionState`] and reports what changed.
//!
//! Holds no state of its own. Every handler runs to completion and returns
//! the notifications for the presentation layer in the order they happened.

use tracing::{debug, info, trace, warn};

use crate::domain::{Card, HealthStatus, RoundState};
use crate::state::{PlayerId, SessionOutcome, SessionState};
use crate::ws::protocol::{InboundMsg, StepErrorKind};

/// State-change notification for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    IdentityAssigned(PlayerId),
    /// Waiting for opponents is over; the first hand arrived.
    SessionStarted,
    HandUpdated { hand: Vec<Card>, deck_size: usize },
    OpponentDeckUpdated(usize),
    RoundUpdated(RoundState),
    TurnStarted { seconds_remaining: i64 },
    TurnEnded,
    TimerTick { seconds_remaining: i64 },
    SelectionChanged,
    HealthChanged(HealthStatus),
    StepRejected(StepErrorKind),
    ChatMessage(String),
    /// The coordinator could not parse the last outbound frame.
    OutboundRejected,
    SessionOver(SessionOutcome),
}

/// What the driver must do after one heartbeat interval.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heartbeat {
    pub send_ping: bool,
    pub close: bool,
    pub events: Vec<SessionEvent>,
}

/// Handles one raw text frame. Any frame counts as liveness, even one that
/// does not decode.
pub fn dispatch_frame(state: &mut SessionState, text: &str) -> Vec<SessionEvent> {
    if state.is_over() {
        trace!("[DISPATCH] frame after session end ignored");
        return Vec::new();
    }

    let mut events = frame_arrived(state);
    match InboundMsg::decode(text) {
        Some(msg) => events.extend(dispatch(state, msg)),
        None => debug!(raw = %text, "[DISPATCH] unrecognized frame ignored"),
    }
    events
}

/// Handles a non-text transport frame: liveness only.
pub fn dispatch_control_frame(state: &mut SessionState) -> Vec<SessionEvent> {
    if state.is_over() {
        return Vec::new();
    }
    frame_arrived(state)
}

fn frame_arrived(state: &mut SessionState) -> Vec<SessionEvent> {
    if state.health_mut().frame_received() {
        info!("[DISPATCH] connection healthy again");
        vec![SessionEvent::HealthChanged(HealthStatus::Connected)]
    } else {
        Vec::new()
    }
}

/// Applies a decoded message. Liveness is the caller's concern.
pub fn dispatch(state: &mut SessionState, msg: InboundMsg) -> Vec<SessionEvent> {
    if state.is_over() {
        return Vec::new();
    }

    if msg == InboundMsg::Pong {
        trace!("[DISPATCH] pong");
    } else {
        debug!(kind = msg.kind(), "[DISPATCH] inbound");
    }

    let mut events = Vec::new();
    match msg {
        InboundMsg::Pong => {}

        InboundMsg::YourCards { hand, deck_size } => {
            state.replace_hand(hand, deck_size);
            clear_selection(state, &mut events);
            events.push(hand_updated(state));
            if state.start_playing() {
                info!(deck_size, "[DISPATCH] session started");
                events.push(SessionEvent::SessionStarted);
            }
        }

        InboundMsg::YourTurn {
            round,
            hand,
            deck_size,
            opponent_deck_size,
            timeout_seconds,
        } => {
            if state.start_playing() {
                info!(deck_size, "[DISPATCH] session started on first turn");
                events.push(SessionEvent::SessionStarted);
            }
            state.timer_mut().start(timeout_seconds);
            events.push(SessionEvent::TurnStarted {
                seconds_remaining: timeout_seconds,
            });

            let selected_before = state.selection().len();
            state.replace_hand(hand, deck_size);
            if state.selection().len() != selected_before {
                events.push(SessionEvent::SelectionChanged);
            }
            events.push(hand_updated(state));

            state.set_opponent_deck_size(opponent_deck_size);
            events.push(SessionEvent::OpponentDeckUpdated(opponent_deck_size));

            state.set_round(RoundState::apply(round));
            events.push(SessionEvent::RoundUpdated(state.round().clone()));
        }

        InboundMsg::YouMadeStep {
            round,
            hand,
            deck_size,
            opponent_deck_size,
        } => {
            if state.timer().is_local_turn() {
                state.timer_mut().stop();
                events.push(SessionEvent::TurnEnded);
            }

            state.replace_hand(hand, deck_size);
            events.push(hand_updated(state));

            if let Some(size) = opponent_deck_size {
                state.set_opponent_deck_size(size);
                events.push(SessionEvent::OpponentDeckUpdated(size));
            }

            state.set_round(RoundState::apply(round));
            events.push(SessionEvent::RoundUpdated(state.round().clone()));

            clear_selection(state, &mut events);
        }

        InboundMsg::GameWinner => finish(state, SessionOutcome::Won, &mut events),
        InboundMsg::GameLoser => finish(state, SessionOutcome::Lost, &mut events),
        InboundMsg::YouArePlaying => {
            warn!("[DISPATCH] player already has a live session elsewhere");
            finish(state, SessionOutcome::AlreadyPlaying, &mut events);
        }

        InboundMsg::Id(id) => {
            if state.assign_identity(id.clone()) {
                info!(player_id = %id, "[DISPATCH] identity assigned");
                events.push(SessionEvent::IdentityAssigned(id));
            } else {
                debug!(player_id = %id, "[DISPATCH] repeated identity ignored");
            }
        }

        InboundMsg::StepError(kind) => {
            info!(reason = kind.as_str(), "[DISPATCH] step rejected");
            events.push(SessionEvent::StepRejected(kind));
        }

        InboundMsg::Message(text) => events.push(SessionEvent::ChatMessage(text)),

        InboundMsg::JsonError => {
            warn!("[DISPATCH] coordinator rejected our last frame");
            events.push(SessionEvent::OutboundRejected);
        }
    }
    events
}

/// Advances liveness and the turn countdown by one heartbeat interval.
pub fn heartbeat(state: &mut SessionState) -> Heartbeat {
    if state.is_over() {
        return Heartbeat::default();
    }

    let mut beat = Heartbeat::default();
    let report = state.health_mut().tick();
    let ticks = state.health().ticks_since_pong();

    if report.changed {
        match report.status {
            HealthStatus::Connected => {}
            HealthStatus::Degraded => {
                info!(ticks_since_pong = ticks, "[DISPATCH] connection degraded")
            }
            HealthStatus::Lost => {
                warn!(ticks_since_pong = ticks, "[DISPATCH] connection lost")
            }
        }
        beat.events.push(SessionEvent::HealthChanged(report.status));
    }

    if report.close {
        beat.close = true;
        finish(state, SessionOutcome::ConnectionLost, &mut beat.events);
        return beat;
    }

    if let Some(seconds_remaining) = state.timer_mut().tick() {
        trace!(seconds_remaining, "[DISPATCH] turn timer");
        beat.events.push(SessionEvent::TimerTick { seconds_remaining });
    }

    beat.send_ping = true;
    beat
}

fn hand_updated(state: &SessionState) -> SessionEvent {
    SessionEvent::HandUpdated {
        hand: state.hand().to_vec(),
        deck_size: state.deck_size(),
    }
}

fn clear_selection(state: &mut SessionState, events: &mut Vec<SessionEvent>) {
    if !state.selection().is_empty() {
        state.clear_selection();
        events.push(SessionEvent::SelectionChanged);
    }
}

fn finish(state: &mut SessionState, outcome: SessionOutcome, events: &mut Vec<SessionEvent>) {
    let was_local_turn = state.timer().is_local_turn();
    if state.finish(outcome) {
        info!(?outcome, "[DISPATCH] session over");
        if was_local_turn {
            events.push(SessionEvent::TurnEnded);
        }
        events.push(SessionEvent::SessionOver(outcome));
    }
}
