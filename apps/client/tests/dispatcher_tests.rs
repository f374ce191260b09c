// Protocol dispatcher scenarios driven through raw coordinator frames.
//
// Run:
//   cargo test --test dispatcher_tests

mod support;

use client::domain::{Combination, HealthStatus};
use client::ws::dispatcher::{dispatch_control_frame, dispatch_frame, heartbeat};
use client::ws::SessionEvent;
use client::{Card, Rank, RoundState, SessionOutcome, SessionPhase, SessionState, Suit};

#[test]
fn your_cards_starts_the_session() {
    let mut state = SessionState::new();
    assert_eq!(state.phase(), SessionPhase::Waiting);

    let events = dispatch_frame(
        &mut state,
        r#"{"YourCards":[[{"rank":"Ace","suit":"Spades"}], 5]}"#,
    );

    assert_eq!(state.hand(), &[Card::new(Rank::Ace, Suit::Spades)]);
    assert_eq!(state.deck_size(), 5);
    assert_eq!(state.phase(), SessionPhase::Playing);
    assert!(events.contains(&SessionEvent::SessionStarted));
}

#[test]
fn your_turn_as_first_frame_starts_the_session() {
    let mut state = SessionState::new();

    let events = dispatch_frame(&mut state, r#"{"YourTurn":["Passive",[],10,4,30]}"#);

    assert_eq!(state.phase(), SessionPhase::Playing);
    assert!(events.contains(&SessionEvent::SessionStarted));
    assert!(events.contains(&SessionEvent::TurnStarted {
        seconds_remaining: 30
    }));

    // Later turns do not announce the start again
    let again = dispatch_frame(&mut state, r#"{"YourTurn":["Passive",[],9,4,30]}"#);
    assert!(!again.contains(&SessionEvent::SessionStarted));
}

#[test]
fn json_error_reports_rejected_outbound_frame() {
    let mut state = SessionState::new();
    dispatch_frame(&mut state, r#"{"YourCards":[[],5]}"#);

    let events = dispatch_frame(&mut state, r#""JsonError""#);

    assert_eq!(events, vec![SessionEvent::OutboundRejected]);
    assert_eq!(state.phase(), SessionPhase::Playing);
}

#[test]
fn control_frame_restores_health() {
    let mut state = SessionState::new();
    for _ in 0..7 {
        heartbeat(&mut state);
    }
    assert_eq!(state.health().ticks_since_pong(), 7);
    assert_eq!(state.health_status(), HealthStatus::Degraded);

    let events = dispatch_control_frame(&mut state);

    assert_eq!(
        events,
        vec![SessionEvent::HealthChanged(HealthStatus::Connected)]
    );
    assert_eq!(state.health().ticks_since_pong(), 0);
    assert_eq!(state.phase(), SessionPhase::Waiting);
}

#[test]
fn you_made_step_resolves_the_move() {
    let mut state = SessionState::new();
    dispatch_frame(
        &mut state,
        r#"{"YourTurn":["Passive",[{"rank":"Ace","suit":"Spades"}],10,4,30]}"#,
    );
    state.toggle_selection("Ace Spades").unwrap();
    assert!(state.timer().is_local_turn());

    let events = dispatch_frame(
        &mut state,
        r#"{"YouMadeStep":[{"Active":{"comb":{"cards":[]},"cards":[]}},[],3]}"#,
    );

    assert!(state.selection().is_empty());
    assert!(!state.timer().is_local_turn());
    assert_eq!(state.timer_display(), None);
    assert_eq!(
        state.round(),
        &RoundState::Active {
            combination: Combination::default(),
            board: vec![],
            playable: vec![],
        }
    );
    assert_eq!(state.deck_size(), 3);
    assert!(events.contains(&SessionEvent::TurnEnded));
    assert!(events.contains(&SessionEvent::SelectionChanged));
}

#[test]
fn turn_timer_counts_heartbeats() {
    let mut state = SessionState::new();
    dispatch_frame(&mut state, r#"{"YourTurn":["Passive",[],10,4,10]}"#);

    for _ in 0..3 {
        let beat = heartbeat(&mut state);
        assert!(beat.send_ping);
    }

    assert_eq!(state.timer().seconds_remaining(), 7);
    assert!(state.timer().is_local_turn());
    assert_eq!(state.timer_display(), Some(7));
}

#[test]
fn game_winner_is_terminal_and_stops_heartbeats() {
    let mut state = SessionState::new();
    dispatch_frame(&mut state, r#"{"YourCards":[[],5]}"#);

    let events = dispatch_frame(&mut state, r#""GameWinner""#);
    assert_eq!(events, vec![SessionEvent::SessionOver(SessionOutcome::Won)]);
    assert_eq!(state.phase(), SessionPhase::Over(SessionOutcome::Won));

    for _ in 0..20 {
        let beat = heartbeat(&mut state);
        assert!(!beat.send_ping);
        assert!(!beat.close);
    }
}

#[test]
fn health_tiers_over_silent_heartbeats() {
    let mut state = SessionState::new();

    for _ in 0..4 {
        assert!(heartbeat(&mut state).send_ping);
    }
    assert_eq!(state.health_status(), HealthStatus::Connected);

    let fifth = heartbeat(&mut state);
    assert!(fifth.send_ping);
    assert_eq!(
        fifth.events,
        vec![SessionEvent::HealthChanged(HealthStatus::Degraded)]
    );

    for _ in 6..15 {
        assert!(heartbeat(&mut state).send_ping);
    }

    let fifteenth = heartbeat(&mut state);
    assert!(fifteenth.close);
    assert!(!fifteenth.send_ping);
    assert_eq!(state.health_status(), HealthStatus::Lost);
    assert_eq!(
        state.phase(),
        SessionPhase::Over(SessionOutcome::ConnectionLost)
    );
    assert!(fifteenth
        .events
        .contains(&SessionEvent::SessionOver(SessionOutcome::ConnectionLost)));
}

#[test]
fn any_frame_resets_liveness() {
    let mut state = SessionState::new();
    for _ in 0..10 {
        heartbeat(&mut state);
    }
    assert_eq!(state.health_status(), HealthStatus::Degraded);

    // Game traffic, not just Pong, counts
    dispatch_frame(&mut state, r#"{"Message":"hello"}"#);
    assert_eq!(state.health_status(), HealthStatus::Connected);

    for _ in 0..14 {
        heartbeat(&mut state);
    }
    assert_eq!(state.health_status(), HealthStatus::Degraded);
    dispatch_frame(&mut state, r#""Pong""#);
    assert_eq!(state.health().ticks_since_pong(), 0);
}

#[test]
fn unknown_frames_are_ignored() {
    let mut state = SessionState::new();
    for raw in [
        r#"{"Surprise":{"a":1}}"#,
        r#""Unheard""#,
        "[1,2,3]",
        "{not json",
        r#"{"YourTurn":"wrong"}"#,
    ] {
        let events = dispatch_frame(&mut state, raw);
        assert!(events.is_empty(), "{raw} produced {events:?}");
    }
    assert_eq!(state.phase(), SessionPhase::Waiting);
    assert!(state.hand().is_empty());
}

#[test]
fn identity_is_assigned_once() {
    let mut state = SessionState::new();
    let first = dispatch_frame(&mut state, r#"{"ID":12345}"#);
    let second = dispatch_frame(&mut state, r#"{"ID":999}"#);

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(state.identity().map(|id| id.0.as_str()), Some("12345"));
}

#[test]
fn active_round_board_excludes_combination() {
    let mut state = SessionState::new();
    dispatch_frame(
        &mut state,
        r#"{"YourTurn":[{"Active":{"comb":{"cards":[["Q","♥"],["Q","♠"]]},
            "cards":[["Q","♥"],["3","♣"],["Q","♠"],["J","♦"]]}},[],8,6,45]}"#,
    );

    let round = state.round();
    assert_eq!(
        round.combination().unwrap().cards,
        vec![
            Card::new(Rank::Queen, Suit::Spades),
            Card::new(Rank::Queen, Suit::Hearts),
        ]
    );
    assert_eq!(
        round.playable(),
        &[
            Card::new(Rank::Three, Suit::Clubs),
            Card::new(Rank::Jack, Suit::Diamonds),
        ]
    );
    assert_eq!(state.opponent_deck_size(), Some(6));
}

#[test]
fn passive_round_clears_previous_board() {
    let mut state = SessionState::new();
    dispatch_frame(
        &mut state,
        r#"{"YourTurn":[{"Active":{"comb":{"cards":[["2","♠"]]},"cards":[["2","♠"],["5","♠"]]}},[],8,6,45]}"#,
    );
    assert!(state.round().is_active());

    dispatch_frame(&mut state, r#"{"YouMadeStep":["Passive",[],8]}"#);
    assert_eq!(state.round(), &RoundState::Passive);
    assert!(state.round().playable().is_empty());
}
