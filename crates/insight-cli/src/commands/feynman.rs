use std::io::BufRead;

use insight_core::feynman::STEP_COUNT;
use insight_core::{FeynmanSession, FeynmanSummary};

const BACK: &str = ":back";
const RESET: &str = ":reset";

/// What the user typed for one step.
enum Input {
    Answer(String),
    Back,
    Reset,
    Eof,
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut session = FeynmanSession::new();

    eprintln!("Feynman Technique");
    eprintln!("If you can't explain it simply, you don't understand it well enough.");
    eprintln!("Type {BACK} to go back or {RESET} to start over.");

    while !session.is_complete() {
        let step = session.current_step();
        eprintln!();
        eprintln!(
            "Step {} of {STEP_COUNT} ({:.0}% complete): {}",
            session.step_index() + 1,
            session.progress_pct(),
            step.title
        );
        eprintln!("{}", step.description);
        if step.multiline {
            eprintln!("({}  End with an empty line.)", step.placeholder);
        } else {
            eprintln!("({})", step.placeholder);
        }

        match read_input(&mut lines, step.multiline)? {
            Input::Back => {
                session.back();
            }
            Input::Reset => {
                session.reset();
            }
            Input::Eof => return Err("input ended before the session was complete".into()),
            Input::Answer(text) => {
                session.set_answer(text);
                if let Err(e) = session.next() {
                    eprintln!("{e}; please write something before continuing.");
                }
            }
        }
    }

    let summary = session.summary().ok_or("session finished without a summary")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn read_input<B: BufRead>(
    lines: &mut std::io::Lines<B>,
    multiline: bool,
) -> Result<Input, Box<dyn std::error::Error>> {
    let mut collected: Vec<String> = Vec::new();
    loop {
        let Some(line) = lines.next().transpose()? else {
            return Ok(if collected.is_empty() {
                Input::Eof
            } else {
                Input::Answer(collected.join("\n"))
            });
        };
        if collected.is_empty() {
            match line.trim() {
                BACK => return Ok(Input::Back),
                RESET => return Ok(Input::Reset),
                _ => {}
            }
        }
        if !multiline {
            return Ok(Input::Answer(line));
        }
        if line.trim().is_empty() {
            return Ok(Input::Answer(collected.join("\n")));
        }
        collected.push(line);
    }
}

fn print_summary(summary: &FeynmanSummary) {
    println!("Great Work!");
    println!("You've completed the Feynman Technique for: {}", summary.concept);
    for entry in &summary.entries {
        println!();
        println!("{}", entry.title);
        println!("{}", entry.answer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lines(text: &str) -> std::io::Lines<Cursor<Vec<u8>>> {
        Cursor::new(text.as_bytes().to_vec()).lines()
    }

    #[test]
    fn single_line_takes_first_line() {
        let mut input = lines("Entropy\nleftover\n");
        match read_input(&mut input, false).unwrap() {
            Input::Answer(text) => assert_eq!(text, "Entropy"),
            _ => panic!("Expected answer"),
        }
    }

    #[test]
    fn multiline_stops_at_blank_line() {
        let mut input = lines("first\nsecond\n\nnext step\n");
        match read_input(&mut input, true).unwrap() {
            Input::Answer(text) => assert_eq!(text, "first\nsecond"),
            _ => panic!("Expected answer"),
        }
    }

    #[test]
    fn commands_and_eof() {
        assert!(matches!(read_input(&mut lines(":back\n"), true).unwrap(), Input::Back));
        assert!(matches!(read_input(&mut lines(" :reset \n"), false).unwrap(), Input::Reset));
        assert!(matches!(read_input(&mut lines(""), true).unwrap(), Input::Eof));
    }
}
