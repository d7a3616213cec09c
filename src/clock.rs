//! Elapsed-time sources driving the simulation.

use std::cell::Cell;
use std::time::Instant;

use chrono::{DateTime, Utc};

pub trait Clock {
    /// Milliseconds since the clock started. Never decreases.
    fn elapsed_millis(&self) -> u64;

    fn elapsed_seconds(&self) -> f32 {
        self.elapsed_millis() as f32 / 1000.0
    }
}

/// Real time since construction.
///
/// Elapsed readings come from the monotonic `Instant`, so wall-clock
/// adjustments (NTP steps in either direction) never reach the simulation.
/// `started_at` is the wall-clock stamp of construction, for display only.
#[derive(Debug)]
pub struct SystemClock {
    started_at: DateTime<Utc>,
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            origin: Instant::now(),
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_millis(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Hand-driven clock for headless runs and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_millis(&self, millis: u64) {
        self.millis.set(millis.max(self.millis.get()));
    }

    pub fn advance_millis(&self, delta: u64) {
        self.millis.set(self.millis.get().saturating_add(delta));
    }
}

impl Clock for ManualClock {
    fn elapsed_millis(&self) -> u64 {
        self.millis.get()
    }
}
