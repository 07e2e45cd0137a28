//! Countdown engine.
//!
//! A tick-driven state machine. It does not own a clock - the caller holds a
//! [`Ticker`](super::Ticker) and calls `tick()` once per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped -> Running -> (Paused -> Running)* -> Finished
//!    ^__________________ reset ___________________|
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut countdown = Countdown::new(90);
//! countdown.start();
//! // Once per second:
//! countdown.tick(); // Returns Some(Event::CountdownCompleted) exactly once
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::display::format_hms;
use crate::error::ValidationError;
use crate::events::Event;

/// Core countdown engine.
///
/// Invariant: `remaining_secs <= total_secs`. All mutation goes through the
/// command methods below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCountdown")]
pub struct Countdown {
    total_secs: u64,
    remaining_secs: u64,
    running: bool,
    /// Set when the completion event has been handed out for this run.
    /// Cleared by `reset` and `set_total`.
    completion_fired: bool,
}

/// Wire form of [`Countdown`], checked before it becomes one.
#[derive(Deserialize)]
struct RawCountdown {
    total_secs: u64,
    remaining_secs: u64,
    running: bool,
    #[serde(default)]
    completion_fired: bool,
}

impl TryFrom<RawCountdown> for Countdown {
    type Error = ValidationError;

    fn try_from(raw: RawCountdown) -> Result<Self, Self::Error> {
        if raw.remaining_secs > raw.total_secs {
            return Err(ValidationError::OutOfRange {
                field: "remaining_secs".into(),
                value: i64::try_from(raw.remaining_secs).unwrap_or(i64::MAX),
                min: 0,
                max: i64::try_from(raw.total_secs).unwrap_or(i64::MAX),
            });
        }
        Ok(Self {
            total_secs: raw.total_secs,
            remaining_secs: raw.remaining_secs,
            // A finished countdown cannot be running.
            running: raw.running && raw.remaining_secs > 0,
            completion_fired: raw.completion_fired,
        })
    }
}

/// Read-only view of a countdown, suitable for rendering or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub total_secs: u64,
    pub remaining_secs: u64,
    pub running: bool,
    pub display: String,
    pub progress: f64,
}

impl Countdown {
    /// Create a stopped countdown with the full duration remaining.
    pub fn new(total_secs: u64) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
            running: false,
            completion_fired: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the start control is enabled.
    pub fn can_start(&self) -> bool {
        self.remaining_secs > 0
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_secs == 0 && self.total_secs > 0
    }

    /// 0.0 .. 1.0 elapsed fraction. Zero for an empty countdown.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        self.total_secs.saturating_sub(self.remaining_secs) as f64 / self.total_secs as f64
    }

    pub fn display(&self) -> String {
        format_hms(self.remaining_secs)
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            total_secs: self.total_secs,
            remaining_secs: self.remaining_secs,
            running: self.running,
            display: self.display(),
            progress: self.progress(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume. No-op when already running or nothing remains.
    pub fn start(&mut self) -> Option<Event> {
        if self.running || !self.can_start() {
            return None;
        }
        self.running = true;
        Some(Event::CountdownStarted {
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            at: Utc::now(),
        })
    }

    /// Stop decrementing. `remaining_secs` is left untouched.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::CountdownPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// The single start/pause control.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.running {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.running = false;
        self.remaining_secs = self.total_secs;
        self.completion_fired = false;
        Some(Event::CountdownReset {
            total_secs: self.total_secs,
            at: Utc::now(),
        })
    }

    /// Replace the duration and rewind to it. Stops the countdown.
    pub fn set_total(&mut self, total_secs: u64) {
        self.total_secs = total_secs;
        self.remaining_secs = total_secs;
        self.running = false;
        self.completion_fired = false;
    }

    /// Call once per elapsed second.
    ///
    /// Returns `Some(Event::CountdownCompleted)` on the tick that reaches
    /// zero, and never again until the countdown is reset.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        self.running = false;
        if self.completion_fired {
            return None;
        }
        self.completion_fired = true;
        Some(Event::CountdownCompleted {
            total_secs: self.total_secs,
            at: Utc::now(),
        })
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(0)
    }
}
