mod countdown;
pub mod display;
mod general;
mod pomodoro;
mod ticker;

pub use countdown::{Countdown, CountdownSnapshot};
pub use display::{format_hms, format_ms, Hms};
pub use general::{find_preset, GeneralTimer, GeneralTimerSnapshot, Preset, TimeField, PRESETS};
pub use pomodoro::{PomodoroMode, PomodoroSession, PomodoroSnapshot, CYCLES_PER_LONG_BREAK};
pub use ticker::{Tickable, Ticker, TICK_PERIOD};
