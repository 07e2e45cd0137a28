//! Clock-face formatting for remaining time.

use serde::{Deserialize, Serialize};

/// Remaining seconds split into clock fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hms {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Hms {
    pub fn from_secs(secs: u64) -> Self {
        Self {
            hours: secs / 3600,
            minutes: (secs % 3600) / 60,
            seconds: secs % 60,
        }
    }

    /// Zero-padded `(HH, MM, SS)` strings.
    pub fn padded(&self) -> (String, String, String) {
        (
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        )
    }
}

/// `HH:MM:SS`.
pub fn format_hms(secs: u64) -> String {
    let (h, m, s) = Hms::from_secs(secs).padded();
    format!("{h}:{m}:{s}")
}

/// `MM:SS` with minutes uncapped, as the Pomodoro face shows it.
pub fn format_ms(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
