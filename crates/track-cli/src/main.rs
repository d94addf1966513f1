//! Track CLI - encode tracking events and push them through the logger backend.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod errors;
mod input;

use commands::{encode, send};

#[derive(Parser)]
#[command(name = "track")]
#[command(about = "Tracking event encoding and logging CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the encoded form of each JSON event (one per line)
    Encode {
        /// Input file with one JSON event per line (or stdin if not provided)
        input: Option<PathBuf>,
        /// Escape non-ASCII characters as \uXXXX
        #[arg(long)]
        ascii_only: bool,
    },
    /// Send each JSON event (one per line) through the logger backend
    Send {
        /// Input file with one JSON event per line (or stdin if not provided)
        input: Option<PathBuf>,
        /// TOML configuration file (TRACK_* environment variables override it)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Logging channel name
        #[arg(long)]
        name: Option<String>,
        /// Cut records longer than N characters (0 disables the cap)
        #[arg(long)]
        max_event_size: Option<usize>,
        /// Escape non-ASCII characters as \uXXXX
        #[arg(long)]
        ascii_only: bool,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode { input, ascii_only } => encode::run(input, ascii_only),
        Commands::Send {
            input,
            config,
            name,
            max_event_size,
            ascii_only,
        } => send::run(send::SendArgs {
            input,
            config,
            name,
            max_event_size,
            ascii_only,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
