//! Feynman technique journaling wizard.
//!
//! Four linear steps, one free-text answer each. "Next" needs a non-blank
//! answer; "Back" is always allowed. Submitting the last step completes the
//! session and unlocks the summary.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeynmanStep {
    pub title: &'static str,
    pub description: &'static str,
    pub placeholder: &'static str,
    /// Step 0 takes a single line; the rest take free-form paragraphs.
    pub multiline: bool,
}

pub const STEP_COUNT: usize = 4;

pub const STEPS: [FeynmanStep; STEP_COUNT] = [
    FeynmanStep {
        title: "Choose a Concept",
        description: "Write down the topic or concept you want to understand.",
        placeholder: "e.g., Quantum Entanglement, Machine Learning, Photosynthesis...",
        multiline: false,
    },
    FeynmanStep {
        title: "Teach It Simply",
        description: "Explain it as if teaching a 5-year-old. Use simple words and analogies.",
        placeholder: "Imagine you're explaining this to a curious child who asks \"why\" a lot...",
        multiline: true,
    },
    FeynmanStep {
        title: "Identify Gaps",
        description: "Where did you struggle? What parts were hard to explain simply?",
        placeholder: "I couldn't explain... I got confused when... I need to review...",
        multiline: true,
    },
    FeynmanStep {
        title: "Review & Simplify",
        description: "Go back to your sources, fill the gaps, and try explaining again.",
        placeholder: "Now I understand that... A better way to explain it is...",
        multiline: true,
    },
];

const NOT_FILLED: &str = "Not filled";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeynmanSession {
    id: Uuid,
    step_index: usize,
    answers: [String; STEP_COUNT],
    complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub title: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeynmanSummary {
    pub concept: String,
    pub entries: Vec<SummaryEntry>,
}

impl FeynmanSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            step_index: 0,
            answers: Default::default(),
            complete: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn current_step(&self) -> &'static FeynmanStep {
        &STEPS[self.step_index]
    }

    pub fn answers(&self) -> &[String; STEP_COUNT] {
        &self.answers
    }

    pub fn current_answer(&self) -> &str {
        &self.answers[self.step_index]
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_last_step(&self) -> bool {
        self.step_index == STEP_COUNT - 1
    }

    /// Whether "Next" (or "Complete" on the last step) is enabled.
    pub fn can_advance(&self) -> bool {
        !self.current_answer().trim().is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.step_index > 0
    }

    /// 25 / 50 / 75 / 100, by the step being shown.
    pub fn progress_pct(&self) -> f64 {
        (self.step_index + 1) as f64 / STEP_COUNT as f64 * 100.0
    }

    /// Available once the session is complete.
    pub fn summary(&self) -> Option<FeynmanSummary> {
        if !self.complete {
            return None;
        }
        let entries = STEPS
            .iter()
            .zip(self.answers.iter())
            .map(|(step, answer)| SummaryEntry {
                title: step.title.to_string(),
                answer: if answer.is_empty() {
                    NOT_FILLED.to_string()
                } else {
                    answer.clone()
                },
            })
            .collect();
        Some(FeynmanSummary {
            concept: self.answers[0].clone(),
            entries,
        })
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the answer for the step being shown. Ignored once complete.
    pub fn set_answer(&mut self, text: impl Into<String>) {
        if self.complete {
            return;
        }
        self.answers[self.step_index] = text.into();
    }

    /// Advance, or complete on the last step.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] when the current answer is blank;
    /// the step index is left unchanged.
    pub fn next(&mut self) -> Result<Option<Event>, ValidationError> {
        if self.complete {
            return Ok(None);
        }
        if !self.can_advance() {
            return Err(ValidationError::Required(
                self.current_step().title.to_string(),
            ));
        }
        if self.is_last_step() {
            self.complete = true;
            tracing::info!(session = %self.id, "feynman session completed");
            return Ok(Some(Event::FeynmanCompleted {
                concept: self.answers[0].clone(),
                at: Utc::now(),
            }));
        }
        self.step_index += 1;
        Ok(Some(self.step_changed()))
    }

    /// Go back one step, floored at the first.
    pub fn back(&mut self) -> Option<Event> {
        if self.complete || !self.can_go_back() {
            return None;
        }
        self.step_index -= 1;
        Some(self.step_changed())
    }

    /// Clear everything and start over.
    pub fn reset(&mut self) -> Option<Event> {
        self.step_index = 0;
        self.answers = Default::default();
        self.complete = false;
        Some(Event::FeynmanReset { at: Utc::now() })
    }

    fn step_changed(&self) -> Event {
        tracing::debug!(session = %self.id, step = self.step_index, "feynman step changed");
        Event::FeynmanStepChanged {
            step_index: self.step_index,
            at: Utc::now(),
        }
    }
}

impl Default for FeynmanSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answered(session: &mut FeynmanSession, text: &str) {
        session.set_answer(text);
        session.next().unwrap();
    }

    #[test]
    fn blank_answers_are_rejected_at_every_step() {
        let mut session = FeynmanSession::new();
        for step in 0..STEP_COUNT {
            assert_eq!(session.step_index(), step);
            session.set_answer("   \n\t");
            assert!(session.next().is_err());
            assert_eq!(session.step_index(), step);
            answered(&mut session, "something");
        }
        assert!(session.is_complete());
    }

    #[test]
    fn completing_last_step_builds_summary() {
        let mut session = FeynmanSession::new();
        let answers = [
            "Photosynthesis",
            "Plants eat sunlight.\nThey make sugar.",
            "  Where the oxygen comes from  ",
            "Water is split; oxygen is released.",
        ];
        for answer in answers {
            answered(&mut session, answer);
        }
        assert!(session.is_complete());
        assert_eq!(session.step_index(), 3);

        let summary = session.summary().unwrap();
        assert_eq!(summary.concept, "Photosynthesis");
        assert_eq!(summary.entries.len(), 4);
        for ((entry, step), answer) in summary.entries.iter().zip(STEPS.iter()).zip(answers) {
            assert_eq!(entry.title, step.title);
            assert_eq!(entry.answer, answer);
        }
    }

    #[test]
    fn back_needs_no_validation_and_floors_at_zero() {
        let mut session = FeynmanSession::new();
        assert!(session.back().is_none());
        answered(&mut session, "Rust ownership");
        assert_eq!(session.step_index(), 1);
        assert!(session.back().is_some());
        assert_eq!(session.step_index(), 0);
        assert_eq!(session.current_answer(), "Rust ownership");
    }

    #[test]
    fn summary_hidden_until_complete() {
        let mut session = FeynmanSession::new();
        answered(&mut session, "Entropy");
        assert!(session.summary().is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = FeynmanSession::new();
        for answer in ["a", "b", "c", "d"] {
            answered(&mut session, answer);
        }
        session.reset();
        assert!(!session.is_complete());
        assert_eq!(session.step_index(), 0);
        assert!(session.answers().iter().all(String::is_empty));
    }

    #[test]
    fn progress_tracks_step() {
        let mut session = FeynmanSession::new();
        assert_eq!(session.progress_pct(), 25.0);
        answered(&mut session, "Tides");
        assert_eq!(session.progress_pct(), 50.0);
    }

    #[test]
    fn only_first_step_is_single_line() {
        assert!(!STEPS[0].multiline);
        assert!(STEPS[1..].iter().all(|s| s.multiline));
    }
}
