//! Session driver: serialises heartbeat ticks, inbound frames and player
//! commands onto one sequential path over the dispatcher.

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::domain::CardFormat;
use crate::error::ClientError;
use crate::state::{SessionOutcome, SessionState};
use crate::ws::dispatcher::{self, SessionEvent};
use crate::ws::protocol::{OutboundMsg, StepKind};
use crate::ws::transport::{InboundFrame, Transport};

/// Player interaction forwarded to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Card tap by identity ("Ace Spades").
    Toggle(String),
    Submit(StepKind),
    Say(String),
    Exit,
}

impl UserCommand {
    /// Parses a console line: `toggle <card>`, `card`, `give`, `trans`,
    /// `take`, `say <text>`, `exit`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        match (verb, rest.is_empty()) {
            ("toggle", false) => Some(UserCommand::Toggle(rest.to_string())),
            ("say", false) => Some(UserCommand::Say(rest.to_string())),
            ("card", true) => Some(UserCommand::Submit(StepKind::GetCard)),
            ("give", true) => Some(UserCommand::Submit(StepKind::GiveComb)),
            ("trans", true) => Some(UserCommand::Submit(StepKind::TransComb)),
            ("take", true) => Some(UserCommand::Submit(StepKind::GetComb)),
            ("exit", true) => Some(UserCommand::Exit),
            _ => None,
        }
    }
}

/// Runs one session to its terminal outcome.
///
/// Notifications go to `events`; a dropped receiver is not an error. When
/// the command channel closes the session keeps running on coordinator
/// traffic alone. A transport failure ends the session as
/// [`SessionOutcome::Closed`] and is returned as the error.
pub async fn run_session<T: Transport>(
    mut transport: T,
    config: &ClientConfig,
    mut commands: mpsc::UnboundedReceiver<UserCommand>,
    events: mpsc::UnboundedSender<SessionEvent>,
) -> Result<SessionOutcome, ClientError> {
    config.validate()?;

    let mut state = SessionState::new();
    info!(
        heartbeat_ms = config.heartbeat_interval.as_millis() as u64,
        "[WS SESSION] started"
    );

    let outcome = match drive(&mut transport, config, &mut state, &mut commands, &events).await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(error = %err, "[WS SESSION] transport error");
            end(&mut state, &events, SessionOutcome::Closed);
            return Err(err);
        }
    };

    if outcome != SessionOutcome::Closed {
        if let Err(err) = transport.close().await {
            debug!(error = %err, "[WS SESSION] close after session end failed");
        }
    }
    info!(?outcome, "[WS SESSION] stopped");
    Ok(outcome)
}

async fn drive<T: Transport>(
    transport: &mut T,
    config: &ClientConfig,
    state: &mut SessionState,
    commands: &mut mpsc::UnboundedReceiver<UserCommand>,
    events: &mpsc::UnboundedSender<SessionEvent>,
) -> Result<SessionOutcome, ClientError> {
    let period = config.heartbeat_interval;
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let ping = OutboundMsg::Ping.encode()?;
    let mut commands_open = true;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let beat = dispatcher::heartbeat(state);
                publish(events, beat.events);
                if beat.send_ping {
                    transport.send_text(ping.clone()).await?;
                }
            }

            frame = transport.next_frame() => {
                match frame {
                    Some(Ok(InboundFrame::Text(text))) => {
                        publish(events, dispatcher::dispatch_frame(state, &text));
                    }
                    Some(Ok(InboundFrame::Control)) => {
                        publish(events, dispatcher::dispatch_control_frame(state));
                    }
                    Some(Err(err)) => return Err(err),
                    None => {
                        info!("[WS SESSION] coordinator closed the connection");
                        end(state, events, SessionOutcome::Closed);
                    }
                }
            }

            cmd = commands.recv(), if commands_open => {
                match cmd {
                    Some(cmd) => {
                        handle_command(state, transport, events, config.card_format, cmd).await?
                    }
                    None => {
                        debug!("[WS SESSION] command channel closed");
                        commands_open = false;
                    }
                }
            }
        }

        if let Some(outcome) = state.outcome() {
            return Ok(outcome);
        }
    }
}

async fn handle_command<T: Transport>(
    state: &mut SessionState,
    transport: &mut T,
    events: &mpsc::UnboundedSender<SessionEvent>,
    card_format: CardFormat,
    cmd: UserCommand,
) -> Result<(), ClientError> {
    let outbound = match cmd {
        UserCommand::Toggle(identity) => {
            match state.toggle_selection(&identity) {
                Ok(_) => publish(events, vec![SessionEvent::SelectionChanged]),
                Err(err) => debug!(error = %err, "[WS SESSION] toggle rejected"),
            }
            return Ok(());
        }
        UserCommand::Submit(kind) => match state.build_step(kind) {
            Ok(step) => OutboundMsg::MakeStep(step),
            Err(err) => {
                debug!(error = %err, "[WS SESSION] step not built");
                return Ok(());
            }
        },
        UserCommand::Say(text) => OutboundMsg::SendMessage(text),
        UserCommand::Exit => OutboundMsg::Exit,
    };

    if state.is_over() {
        return Ok(());
    }
    transport.send_text(outbound.encode_with(card_format)?).await?;

    if outbound == OutboundMsg::Exit {
        end(state, events, SessionOutcome::Exited);
    }
    Ok(())
}

fn end(
    state: &mut SessionState,
    events: &mpsc::UnboundedSender<SessionEvent>,
    outcome: SessionOutcome,
) {
    if state.finish(outcome) {
        publish(events, vec![SessionEvent::SessionOver(outcome)]);
    }
}

fn publish(events: &mpsc::UnboundedSender<SessionEvent>, batch: Vec<SessionEvent>) {
    for event in batch {
        let _ = events.send(event);
    }
}
