// Shared helpers for client integration tests

#![allow(dead_code)]

use std::time::Duration;

use client::ws::SessionEvent;
use client::{ClientConfig, WsTransport};
use tokio::sync::mpsc;

// Auto-initialize logging for integration tests
#[ctor::ctor]
fn init_test_logging() {
    client_test_support::logging::init();
}

/// Config pointing at a scripted coordinator with a fast heartbeat.
pub fn fast_config(url: &str, heartbeat: Duration) -> ClientConfig {
    ClientConfig::new(url).with_heartbeat_interval(heartbeat)
}

pub async fn connect(config: &ClientConfig) -> Result<WsTransport, Box<dyn std::error::Error>> {
    Ok(WsTransport::connect(config).await?)
}

/// Drains every event already queued.
pub fn drain_events(rx: &mut mpsc::UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut out = Vec::new();
    while let Ok(event) = rx.try_recv() {
        out.push(event);
    }
    out
}

/// Waits until an event matching `pred` arrives, with a timeout.
pub async fn wait_for_event<P>(
    rx: &mut mpsc::UnboundedReceiver<SessionEvent>,
    timeout: Duration,
    pred: P,
) -> Result<SessionEvent, Box<dyn std::error::Error>>
where
    P: Fn(&SessionEvent) -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        let event = tokio::time::timeout_at(deadline, rx.recv())
            .await
            .map_err(|_| "Timeout waiting for event")?
            .ok_or("Event channel closed")?;
        if pred(&event) {
            return Ok(event);
        }
    }
}
