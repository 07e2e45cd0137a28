//! Pomodoro session state machine.
//!
//! Cycles work / short break / long break phases on top of a [`Countdown`].
//! A long break follows every fourth completed work phase.
//!
//! ```text
//! work --(done, cycles % 4 != 0)--> shortBreak --(done)--> work
//! work --(done, cycles % 4 == 0)--> longBreak  --(done)--> work
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::countdown::{Countdown, CountdownSnapshot};
use super::display::format_ms;
use crate::events::Event;

/// Work phases per long break.
pub const CYCLES_PER_LONG_BREAK: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PomodoroMode {
    Work,
    ShortBreak,
    LongBreak,
}

impl PomodoroMode {
    /// Fixed phase length in seconds.
    pub fn duration_secs(self) -> u64 {
        match self {
            PomodoroMode::Work => 25 * 60,
            PomodoroMode::ShortBreak => 5 * 60,
            PomodoroMode::LongBreak => 15 * 60,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PomodoroMode::Work => "Focus Time",
            PomodoroMode::ShortBreak => "Short Break",
            PomodoroMode::LongBreak => "Long Break",
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, PomodoroMode::Work)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PomodoroSession {
    id: Uuid,
    mode: PomodoroMode,
    completed_cycles: u32,
    countdown: Countdown,
}

/// JSON-friendly view of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroSnapshot {
    pub id: Uuid,
    pub mode: PomodoroMode,
    pub label: String,
    pub completed_cycles: u32,
    pub cycles_toward_long_break: u32,
    pub display: String,
    pub countdown: CountdownSnapshot,
}

impl PomodoroSession {
    /// A fresh session: work mode, nothing completed, not running.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            mode: PomodoroMode::Work,
            completed_cycles: 0,
            countdown: Countdown::new(PomodoroMode::Work.duration_secs()),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mode(&self) -> PomodoroMode {
        self.mode
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    /// Filled dots on the "until long break" indicator.
    pub fn cycles_toward_long_break(&self) -> u32 {
        self.completed_cycles % CYCLES_PER_LONG_BREAK
    }

    /// `MM:SS` face.
    pub fn display(&self) -> String {
        format_ms(self.countdown.remaining_secs())
    }

    pub fn snapshot(&self) -> PomodoroSnapshot {
        PomodoroSnapshot {
            id: self.id,
            mode: self.mode,
            label: self.mode.label().to_string(),
            completed_cycles: self.completed_cycles,
            cycles_toward_long_break: self.cycles_toward_long_break(),
            display: self.display(),
            countdown: self.countdown.snapshot(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn toggle(&mut self) -> Option<Event> {
        self.countdown.toggle()
    }

    /// Stop and rewind the current phase. Mode and cycle count are kept.
    pub fn reset(&mut self) -> Option<Event> {
        self.countdown.reset()
    }

    /// Jump to a mode tab. Stops the countdown, loads the full duration,
    /// and leaves the cycle count alone.
    pub fn switch_mode(&mut self, mode: PomodoroMode) -> Option<Event> {
        let from = self.mode;
        self.load(mode);
        tracing::debug!(session = %self.id, ?from, to = ?mode, "pomodoro mode switched");
        Some(Event::PomodoroModeSwitched {
            from,
            to: mode,
            at: Utc::now(),
        })
    }

    /// Call once per elapsed second.
    ///
    /// When the phase runs out, advances to the next phase and returns
    /// `Some(Event::PomodoroPhaseCompleted)`. The next phase is not started.
    pub fn tick(&mut self) -> Option<Event> {
        let completed = self.countdown.tick()?;
        if !completed.is_completion() {
            return None;
        }

        let from = self.mode;
        let to = match from {
            PomodoroMode::Work => {
                self.completed_cycles += 1;
                if self.completed_cycles % CYCLES_PER_LONG_BREAK == 0 {
                    PomodoroMode::LongBreak
                } else {
                    PomodoroMode::ShortBreak
                }
            }
            PomodoroMode::ShortBreak | PomodoroMode::LongBreak => PomodoroMode::Work,
        };
        self.load(to);

        tracing::info!(
            session = %self.id,
            ?from,
            ?to,
            completed_cycles = self.completed_cycles,
            "pomodoro phase completed"
        );
        Some(Event::PomodoroPhaseCompleted {
            from,
            to,
            completed_cycles: self.completed_cycles,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn load(&mut self, mode: PomodoroMode) {
        self.mode = mode;
        self.countdown.set_total(mode.duration_secs());
    }
}

impl Default for PomodoroSession {
    fn default() -> Self {
        Self::new()
    }
}
