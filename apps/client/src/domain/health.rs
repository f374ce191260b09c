//! Connection liveness tiers derived from heartbeat ticks without traffic.

/// Ticks without traffic before liveness becomes uncertain.
pub const DEGRADED_AFTER_TICKS: u32 = 5;
/// Ticks without traffic before the connection is given up.
pub const LOST_AFTER_TICKS: u32 = 15;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Connected,
    Degraded,
    Lost,
}

impl HealthStatus {
    pub fn from_ticks(ticks_since_pong: u32) -> Self {
        if ticks_since_pong < DEGRADED_AFTER_TICKS {
            HealthStatus::Connected
        } else if ticks_since_pong < LOST_AFTER_TICKS {
            HealthStatus::Degraded
        } else {
            HealthStatus::Lost
        }
    }
}

/// Outcome of one heartbeat interval.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub status: HealthStatus,
    /// Status differs from the one before this tick.
    pub changed: bool,
    /// Caller must close the transport; no further pings.
    pub close: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionHealth {
    ticks_since_pong: u32,
    lost: bool,
}

impl ConnectionHealth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticks_since_pong(&self) -> u32 {
        self.ticks_since_pong
    }

    pub fn status(&self) -> HealthStatus {
        if self.lost {
            HealthStatus::Lost
        } else {
            HealthStatus::from_ticks(self.ticks_since_pong)
        }
    }

    /// Any inbound frame. Returns `true` if the status changed.
    ///
    /// Lost is terminal: frames arriving after it do not revive the monitor.
    pub fn frame_received(&mut self) -> bool {
        if self.lost {
            return false;
        }
        let before = self.status();
        self.ticks_since_pong = 0;
        before != HealthStatus::Connected
    }

    /// Advances one heartbeat interval.
    pub fn tick(&mut self) -> TickReport {
        if self.lost {
            return TickReport {
                status: HealthStatus::Lost,
                changed: false,
                close: false,
            };
        }
        let before = self.status();
        self.ticks_since_pong = self.ticks_since_pong.saturating_add(1);
        let status = self.status();
        let close = status == HealthStatus::Lost;
        self.lost = close;
        TickReport {
            status,
            changed: status != before,
            close,
        }
    }
}
