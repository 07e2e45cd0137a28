use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{PomodoroMode, TimeField};

/// Every state change in the system produces an Event.
/// The CLI turns them into output lines and notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CountdownStarted {
        remaining_secs: u64,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Remaining time reached zero while running. Emitted once per run.
    CountdownCompleted {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownReset {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    /// A Pomodoro phase ran to zero and the next phase was loaded.
    PomodoroPhaseCompleted {
        from: PomodoroMode,
        to: PomodoroMode,
        completed_cycles: u32,
        at: DateTime<Utc>,
    },
    /// The user picked a mode tab. Never counts as a completion.
    PomodoroModeSwitched {
        from: PomodoroMode,
        to: PomodoroMode,
        at: DateTime<Utc>,
    },
    GeneralTimerEdited {
        field: Option<TimeField>,
        hours: u8,
        minutes: u8,
        seconds: u8,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    /// The general timer finished its countdown.
    GeneralTimerFinished {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    FeynmanStepChanged {
        step_index: usize,
        at: DateTime<Utc>,
    },
    FeynmanCompleted {
        concept: String,
        at: DateTime<Utc>,
    },
    FeynmanReset {
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Wire name of the event, matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::CountdownStarted { .. } => "CountdownStarted",
            Event::CountdownPaused { .. } => "CountdownPaused",
            Event::CountdownCompleted { .. } => "CountdownCompleted",
            Event::CountdownReset { .. } => "CountdownReset",
            Event::PomodoroPhaseCompleted { .. } => "PomodoroPhaseCompleted",
            Event::PomodoroModeSwitched { .. } => "PomodoroModeSwitched",
            Event::GeneralTimerEdited { .. } => "GeneralTimerEdited",
            Event::GeneralTimerFinished { .. } => "GeneralTimerFinished",
            Event::FeynmanStepChanged { .. } => "FeynmanStepChanged",
            Event::FeynmanCompleted { .. } => "FeynmanCompleted",
            Event::FeynmanReset { .. } => "FeynmanReset",
        }
    }

    /// True for events that mark a timer running out on its own.
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Event::CountdownCompleted { .. }
                | Event::PomodoroPhaseCompleted { .. }
                | Event::GeneralTimerFinished { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_tag_matches_kind() {
        let event = Event::PomodoroModeSwitched {
            from: PomodoroMode::Work,
            to: PomodoroMode::LongBreak,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.kind());
        assert_eq!(json["to"], "longBreak");
    }

    #[test]
    fn only_run_outs_are_completions() {
        let now = Utc::now();
        assert!(Event::CountdownCompleted { total_secs: 5, at: now }.is_completion());
        assert!(!Event::CountdownReset { total_secs: 5, at: now }.is_completion());
        assert!(!Event::PomodoroModeSwitched {
            from: PomodoroMode::Work,
            to: PomodoroMode::ShortBreak,
            at: now,
        }
        .is_completion());
    }
}
