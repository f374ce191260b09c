use std::io::BufRead;
use std::process::ExitCode;

use client::domain::encode;
use client::ws::SessionEvent;
use client::{run_session, ClientConfig, SessionOutcome, UserCommand, WsTransport};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

mod telemetry;

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // COORDINATOR_URL, COORDINATOR_SUBPROTOCOL, HEARTBEAT_INTERVAL_SECS,
    // COORDINATOR_CARD_FORMAT
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("🃏 Connecting to {}", config.coordinator_url);

    let transport = match WsTransport::connect(&config).await {
        Ok(transport) => transport,
        Err(e) => {
            eprintln!("❌ Failed to connect: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();

    // Console input blocks, so it gets its own thread rather than a runtime task.
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match UserCommand::parse(&line) {
                Some(cmd) => {
                    if commands_tx.send(cmd).is_err() {
                        break;
                    }
                }
                None => warn!(input = %line, "[CLIENT] unknown command"),
            }
        }
    });

    let printer = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            log_event(&event);
        }
    });

    let result = run_session(transport, &config, commands_rx, events_tx).await;
    let _ = printer.await;

    match result {
        Ok(SessionOutcome::ConnectionLost) => {
            eprintln!("❌ Connection to the coordinator was lost");
            ExitCode::FAILURE
        }
        Ok(outcome) => {
            println!("✅ Session finished: {outcome:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "[CLIENT] session failed");
            ExitCode::FAILURE
        }
    }
}

fn log_event(event: &SessionEvent) {
    match event {
        SessionEvent::HandUpdated { hand, deck_size } => {
            let cards: Vec<String> = hand.iter().map(encode).collect();
            info!(?cards, deck_size, "[CLIENT] hand");
        }
        SessionEvent::RoundUpdated(round) => {
            let combination: Vec<String> = round
                .combination()
                .map(|c| c.cards.iter().map(encode).collect())
                .unwrap_or_default();
            let playable: Vec<String> = round.playable().iter().map(encode).collect();
            info!(active = round.is_active(), ?combination, ?playable, "[CLIENT] round");
        }
        SessionEvent::TimerTick { seconds_remaining } => {
            info!(seconds_remaining, "[CLIENT] your turn");
        }
        other => info!(event = ?other, "[CLIENT] event"),
    }
}
