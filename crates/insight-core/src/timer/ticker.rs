//! The one-second tick source for a running timer.
//!
//! A [`Ticker`] holds at most one repeating interval. `sync` arms it when the
//! owning timer runs and drops the interval on every other state, so a
//! paused, reset, switched, or finished timer never receives a stale tick.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Anything that counts down on a one-second tick.
pub trait Tickable {
    fn is_running(&self) -> bool;
    fn tick(&mut self) -> Option<crate::events::Event>;
}

#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    interval: Option<Interval>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Arm if `running` and not yet armed; release otherwise.
    /// Idempotent, so it can be called after every command.
    pub fn sync(&mut self, running: bool) {
        match (running, self.interval.is_some()) {
            (true, false) => {
                // First tick lands one full period after starting.
                let mut interval = interval_at(Instant::now() + self.period, self.period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.interval = Some(interval);
            }
            (false, true) => self.interval = None,
            _ => {}
        }
    }

    pub fn release(&mut self) {
        self.interval = None;
    }

    /// Resolves on the next tick. Pending forever while disarmed, which keeps
    /// it usable as a `tokio::select!` branch.
    pub async fn next(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }

    /// Wait for one tick, apply it to `timer`, then re-sync with its state.
    pub async fn drive<T: Tickable>(&mut self, timer: &mut T) -> Option<crate::events::Event> {
        self.sync(timer.is_running());
        self.next().await;
        let event = timer.tick();
        self.sync(timer.is_running());
        event
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tickable for super::Countdown {
    fn is_running(&self) -> bool {
        super::Countdown::is_running(self)
    }

    fn tick(&mut self) -> Option<crate::events::Event> {
        super::Countdown::tick(self)
    }
}

impl Tickable for super::PomodoroSession {
    fn is_running(&self) -> bool {
        super::PomodoroSession::is_running(self)
    }

    fn tick(&mut self) -> Option<crate::events::Event> {
        super::PomodoroSession::tick(self)
    }
}

impl Tickable for super::GeneralTimer {
    fn is_running(&self) -> bool {
        super::GeneralTimer::is_running(self)
    }

    fn tick(&mut self) -> Option<crate::events::Event> {
        super::GeneralTimer::tick(self)
    }
}
