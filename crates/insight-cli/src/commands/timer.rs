use std::io::Write;

use clap::Subcommand;
use insight_core::timer::{find_preset, PRESETS};
use insight_core::{Config, Event, GeneralTimer, Notification, PomodoroMode, PomodoroSession, Ticker};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{block_on, notify};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Interactive Pomodoro session (25m focus, 5m/15m breaks)
    Pomodoro {
        /// Emit events as JSON lines instead of a live clock
        #[arg(long)]
        json: bool,
    },
    /// Count down a custom duration
    Countdown {
        /// Hours (0-23)
        #[arg(long)]
        hours: Option<u8>,
        /// Minutes (0-59)
        #[arg(long)]
        minutes: Option<u8>,
        /// Seconds (0-59)
        #[arg(long)]
        seconds: Option<u8>,
        /// Quick preset: 5m, 10m, 15m, 30m, 1h
        #[arg(long, conflicts_with_all = ["hours", "minutes", "seconds"])]
        preset: Option<String>,
        /// Emit events as JSON lines instead of a live clock
        #[arg(long)]
        json: bool,
    },
}

/// One keyboard line from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Toggle,
    Reset,
    Switch(PomodoroMode),
    Quit,
    Help,
}

fn parse_key(line: &str) -> Key {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "p" | "space" => Key::Toggle,
        "r" => Key::Reset,
        "w" | "f" => Key::Switch(PomodoroMode::Work),
        "s" => Key::Switch(PomodoroMode::ShortBreak),
        "l" => Key::Switch(PomodoroMode::LongBreak),
        "q" | "quit" | "exit" => Key::Quit,
        _ => Key::Help,
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    match action {
        TimerAction::Pomodoro { json } => block_on(pomodoro(config, json)),
        TimerAction::Countdown {
            hours,
            minutes,
            seconds,
            preset,
            json,
        } => {
            let mut timer = GeneralTimer::new(config.timer.default_minutes);
            if let Some(label) = preset {
                let preset = find_preset(&label).ok_or_else(|| {
                    let labels: Vec<_> = PRESETS.iter().map(|p| p.label).collect();
                    format!("unknown preset '{label}' (expected one of {})", labels.join(", "))
                })?;
                timer.apply_preset(preset);
            } else if hours.is_some() || minutes.is_some() || seconds.is_some() {
                timer.set_fields(
                    hours.unwrap_or(0),
                    minutes.unwrap_or(0),
                    seconds.unwrap_or(0),
                )?;
            }
            if !timer.can_toggle() {
                return Err("duration must be greater than zero".into());
            }
            block_on(countdown(config, timer, json))
        }
    }
}

async fn pomodoro(config: Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = PomodoroSession::new();
    let mut ticker = Ticker::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    if !json {
        eprintln!("Pomodoro: 25 min focus, 5 min break, long break after 4 cycles");
        print_pomodoro_help();
        render_pomodoro(&session);
    }

    loop {
        if !stdin_open && !session.is_running() {
            break;
        }
        tokio::select! {
            event = ticker.drive(&mut session) => {
                if let Some(event) = event {
                    report(&config, &event, json)?;
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    continue;
                };
                let event = match parse_key(&line) {
                    Key::Toggle => session.toggle(),
                    Key::Reset => session.reset(),
                    Key::Switch(mode) => session.switch_mode(mode),
                    Key::Quit => break,
                    Key::Help => {
                        print_pomodoro_help();
                        None
                    }
                };
                ticker.sync(session.is_running());
                if let Some(event) = event {
                    report(&config, &event, json)?;
                }
            }
        }
        if !json {
            render_pomodoro(&session);
        }
    }

    ticker.release();
    if json {
        println!("{}", serde_json::to_string(&session.snapshot())?);
    } else {
        eprintln!();
        eprintln!("completed cycles: {}", session.completed_cycles());
    }
    Ok(())
}

async fn countdown(
    config: Config,
    mut timer: GeneralTimer,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticker = Ticker::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    if let Some(event) = timer.toggle() {
        report(&config, &event, json)?;
    }
    if !json {
        eprintln!("p/Enter: start/pause  r: reset  q: quit");
        render_countdown(&timer);
    }

    loop {
        if !stdin_open && !timer.is_running() {
            break;
        }
        tokio::select! {
            event = ticker.drive(&mut timer) => {
                if let Some(event) = event {
                    report(&config, &event, json)?;
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    continue;
                };
                let event = match parse_key(&line) {
                    Key::Toggle => timer.toggle(),
                    Key::Reset => timer.reset(),
                    Key::Quit => break,
                    Key::Switch(_) | Key::Help => {
                        eprintln!("p/Enter: start/pause  r: reset  q: quit");
                        None
                    }
                };
                ticker.sync(timer.is_running());
                if let Some(event) = event {
                    report(&config, &event, json)?;
                }
            }
        }
        if !json {
            render_countdown(&timer);
        }
    }

    ticker.release();
    if json {
        println!("{}", serde_json::to_string(&timer.snapshot())?);
    } else {
        render_countdown(&timer);
        eprintln!();
    }
    Ok(())
}

fn report(config: &Config, event: &Event, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(event)?);
    }
    let notices = Notification::for_event(event);
    if !notices.is_empty() && !json {
        eprintln!();
    }
    for notice in &notices {
        notify(config, notice);
    }
    Ok(())
}

fn print_pomodoro_help() {
    eprintln!("p/Enter: start/pause  r: reset  w/s/l: focus/short/long  q: quit");
}

fn render_pomodoro(session: &PomodoroSession) {
    let filled = session.cycles_toward_long_break() as usize;
    let dots: String = (0..4).map(|i| if i < filled { '●' } else { '○' }).collect();
    let state = if session.is_running() { "running" } else { "paused " };
    eprint!(
        "\r[{:<11}] {}  {}  {} until long break  cycles: {}   ",
        session.mode().label(),
        session.display(),
        state,
        dots,
        session.completed_cycles()
    );
    let _ = std::io::stderr().flush();
}

fn render_countdown(timer: &GeneralTimer) {
    let state = if timer.is_editing() {
        "editing"
    } else if timer.is_running() {
        "running"
    } else {
        "paused "
    };
    eprint!(
        "\r{}  {}  {:>3.0}%   ",
        timer.display(),
        state,
        timer.countdown().progress() * 100.0
    );
    let _ = std::io::stderr().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys() {
        assert_eq!(parse_key(""), Key::Toggle);
        assert_eq!(parse_key(" P "), Key::Toggle);
        assert_eq!(parse_key("r"), Key::Reset);
        assert_eq!(parse_key("l"), Key::Switch(PomodoroMode::LongBreak));
        assert_eq!(parse_key("q"), Key::Quit);
        assert_eq!(parse_key("??"), Key::Help);
    }
}
