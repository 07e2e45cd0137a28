//! Transient user-facing notices.
//!
//! Timers and API calls never fail loudly; they surface a dismissible
//! notification and the UI stays interactive.

use serde::{Deserialize, Serialize};

use crate::analyzer::ApiResponse;
use crate::events::Event;
use crate::timer::PomodoroMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn new(level: NotificationLevel, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: None,
        }
    }

    /// Notices for a timer event. Only natural completions produce any.
    pub fn for_event(event: &Event) -> Vec<Notification> {
        match event {
            Event::PomodoroPhaseCompleted { from, .. } if from.is_break() => vec![
                Notification::success("Break over! Ready for another focus session?"),
            ],
            Event::PomodoroPhaseCompleted { to, .. } => {
                let mut notices = vec![Notification::success(
                    "Great focus session! Time for a break.",
                )];
                if *to == PomodoroMode::LongBreak {
                    notices.push(Notification::info(
                        "You've completed 4 pomodoros! Take a longer break.",
                    ));
                }
                notices
            }
            Event::GeneralTimerFinished { .. } => vec![Notification::success("Time's up!")],
            _ => Vec::new(),
        }
    }

    pub fn for_analysis<T>(resp: &ApiResponse<T>) -> Notification {
        if resp.success {
            Notification::success("Analysis complete!")
                .with_description("Your learning resource has been analyzed.")
        } else {
            let mut notice = Notification::error("Analysis failed");
            notice.description = resp.error.clone();
            notice
        }
    }

    pub fn for_history<T>(resp: &ApiResponse<T>) -> Notification {
        if resp.success {
            Notification::success("History loaded successfully")
        } else {
            Notification::error(
                resp.error
                    .clone()
                    .unwrap_or_else(|| "Failed to load history".into()),
            )
        }
    }

    pub fn for_sign_out<T>(resp: &ApiResponse<T>) -> Notification {
        if resp.success {
            Notification::success("Signed out successfully")
        } else {
            Notification::error(
                resp.error
                    .clone()
                    .unwrap_or_else(|| "Failed to sign out".into()),
            )
        }
    }
}
