use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "insight", version, about = "Insight learning-resource analyzer and study timers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Study timers (Pomodoro and general countdown)
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Walk through the Feynman technique
    Feynman {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Analyze a learning resource
    Analyze {
        #[command(subcommand)]
        action: commands::analyze::AnalyzeAction,
    },
    /// Show previous analyses
    History,
    /// Sign out of the analysis backend
    Logout,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Used when `RUST_LOG` is unset. Matches both `insight_core` and `insight_cli` targets.
const DEFAULT_FILTER: &str = "insight=info";

fn init_tracing() {
    // stderr keeps stdout clean for JSON output.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Feynman { json } => commands::feynman::run(json),
        Commands::Analyze { action } => commands::analyze::run(action),
        Commands::History => commands::analyze::history(),
        Commands::Logout => commands::analyze::logout(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
