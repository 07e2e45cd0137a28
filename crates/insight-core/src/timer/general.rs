//! General-purpose countdown with an edit/run toggle.
//!
//! While editing, every field change recomputes the countdown duration.
//! Once started, the countdown runs on its own and the fields are locked
//! until `reset` returns the timer to editing.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::countdown::{Countdown, CountdownSnapshot};
use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeField {
    Hours,
    Minutes,
    Seconds,
}

impl TimeField {
    pub fn max(self) -> u8 {
        match self {
            TimeField::Hours => 23,
            TimeField::Minutes | TimeField::Seconds => 59,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeField::Hours => "HRS",
            TimeField::Minutes => "MIN",
            TimeField::Seconds => "SEC",
        }
    }
}

/// A quick-set button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub label: &'static str,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

pub const PRESETS: [Preset; 5] = [
    Preset { label: "5m", hours: 0, minutes: 5, seconds: 0 },
    Preset { label: "10m", hours: 0, minutes: 10, seconds: 0 },
    Preset { label: "15m", hours: 0, minutes: 15, seconds: 0 },
    Preset { label: "30m", hours: 0, minutes: 30, seconds: 0 },
    Preset { label: "1h", hours: 1, minutes: 0, seconds: 0 },
];

pub fn find_preset(label: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.label.eq_ignore_ascii_case(label))
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneralTimer {
    hours: u8,
    minutes: u8,
    seconds: u8,
    editing: bool,
    countdown: Countdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralTimerSnapshot {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub editing: bool,
    pub countdown: CountdownSnapshot,
}

impl GeneralTimer {
    /// Start in editing mode with the given minutes (clamped to 0..=59).
    pub fn new(default_minutes: u8) -> Self {
        let minutes = default_minutes.min(TimeField::Minutes.max());
        let mut timer = Self {
            hours: 0,
            minutes,
            seconds: 0,
            editing: true,
            countdown: Countdown::default(),
        };
        timer.sync_total();
        timer
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn fields(&self) -> (u8, u8, u8) {
        (self.hours, self.minutes, self.seconds)
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Duration the fields describe.
    pub fn field_total_secs(&self) -> u64 {
        self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64
    }

    /// Whether the start/pause control is enabled.
    pub fn can_toggle(&self) -> bool {
        self.countdown.total_secs() > 0
    }

    pub fn display(&self) -> String {
        self.countdown.display()
    }

    pub fn snapshot(&self) -> GeneralTimerSnapshot {
        GeneralTimerSnapshot {
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
            editing: self.editing,
            countdown: self.countdown.snapshot(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Increment/decrement one field, clamped to its range.
    /// Ignored outside editing mode.
    pub fn adjust(&mut self, field: TimeField, delta: i32) -> Option<Event> {
        if !self.editing {
            return None;
        }
        let current = self.field(field) as i32;
        let next = (current + delta).clamp(0, field.max() as i32) as u8;
        *self.field_mut(field) = next;
        self.edited(Some(field))
    }

    /// Set all three fields at once. Ignored outside editing mode.
    pub fn set_fields(
        &mut self,
        hours: u8,
        minutes: u8,
        seconds: u8,
    ) -> Result<Option<Event>, ValidationError> {
        for (field, value) in [
            (TimeField::Hours, hours),
            (TimeField::Minutes, minutes),
            (TimeField::Seconds, seconds),
        ] {
            if value > field.max() {
                return Err(ValidationError::OutOfRange {
                    field: field.label().to_lowercase(),
                    value: value as i64,
                    min: 0,
                    max: field.max() as i64,
                });
            }
        }
        if !self.editing {
            return Ok(None);
        }
        self.hours = hours;
        self.minutes = minutes;
        self.seconds = seconds;
        Ok(self.edited(None))
    }

    pub fn apply_preset(&mut self, preset: &Preset) -> Option<Event> {
        if !self.editing {
            return None;
        }
        self.hours = preset.hours;
        self.minutes = preset.minutes;
        self.seconds = preset.seconds;
        self.edited(None)
    }

    /// Start/pause. The first start leaves editing mode.
    /// Disabled (returns `None`) while the duration is zero.
    pub fn toggle(&mut self) -> Option<Event> {
        if !self.can_toggle() {
            return None;
        }
        self.editing = false;
        self.countdown.toggle()
    }

    /// Back to editing with the countdown rewound to the field duration.
    pub fn reset(&mut self) -> Option<Event> {
        self.editing = true;
        self.sync_total();
        self.countdown.reset()
    }

    /// Call once per elapsed second.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.countdown.tick()?;
        if !event.is_completion() {
            return None;
        }
        tracing::info!(total_secs = self.countdown.total_secs(), "general timer finished");
        Some(Event::GeneralTimerFinished {
            total_secs: self.countdown.total_secs(),
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn field(&self, field: TimeField) -> u8 {
        match field {
            TimeField::Hours => self.hours,
            TimeField::Minutes => self.minutes,
            TimeField::Seconds => self.seconds,
        }
    }

    fn field_mut(&mut self, field: TimeField) -> &mut u8 {
        match field {
            TimeField::Hours => &mut self.hours,
            TimeField::Minutes => &mut self.minutes,
            TimeField::Seconds => &mut self.seconds,
        }
    }

    fn sync_total(&mut self) {
        self.countdown.set_total(self.field_total_secs());
    }

    fn edited(&mut self, field: Option<TimeField>) -> Option<Event> {
        self.sync_total();
        Some(Event::GeneralTimerEdited {
            field,
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
            total_secs: self.countdown.total_secs(),
            at: Utc::now(),
        })
    }
}

impl Default for GeneralTimer {
    fn default() -> Self {
        Self::new(5)
    }
}
