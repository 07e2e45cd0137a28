//! # Insight Core Library
//!
//! Business logic for Insight, a learning-resource analyzer with a study
//! timer surface. Everything user-facing lives in the `insight` CLI; this
//! crate holds the state machines and the client for the analysis backend.
//!
//! ## Architecture
//!
//! - **Timers**: tick-driven state machines. The caller owns a [`Ticker`]
//!   and calls `tick()` once per elapsed second while the timer runs.
//!   [`Countdown`] is the shared engine; [`PomodoroSession`] and
//!   [`GeneralTimer`] are built on top of it.
//! - **Feynman wizard**: a four-step journaling flow with no timing.
//! - **Analyzer**: form state, request packaging, and [`AnalysisClient`],
//!   which folds every failure into a uniform [`ApiResponse`].
//! - **Storage**: TOML-based configuration.
//!
//! Every state transition produces an [`Event`]; user-facing notices are
//! derived from events and API results as [`Notification`]s.

pub mod analyzer;
pub mod error;
pub mod events;
pub mod feynman;
pub mod notification;
pub mod storage;
pub mod timer;

pub use analyzer::{
    AnalysisClient, AnalysisResult, AnalyzeRequest, AnalyzerForm, ApiResponse, ResourceSource,
    ResourceType, UploadFile,
};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use feynman::{FeynmanSession, FeynmanSummary};
pub use notification::{Notification, NotificationLevel};
pub use storage::Config;
pub use timer::{
    Countdown, CountdownSnapshot, GeneralTimer, PomodoroMode, PomodoroSession, TimeField, Ticker,
};
