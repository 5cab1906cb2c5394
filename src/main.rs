mod calc;
mod cmd;
mod data;
mod model;
mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "almanac", about = "month + agenda terminal calendar")]
struct Cli {
    /// Path to the data directory containing config and data files (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize data files
    Init,
    /// Print the agenda for the coming days
    Agenda {
        /// Number of days to list
        #[arg(short, long, default_value_t = 7)]
        days: u32,
    },
    /// Add an event without opening the calendar
    Add {
        /// Event date (YYYY-MM-DD)
        date: String,
        /// Event title
        title: String,
        /// Start time (HH:MM); omit for an all-day event
        #[arg(short, long)]
        time: Option<String>,
        /// Last day (YYYY-MM-DD) for multi-day events
        #[arg(short, long)]
        end: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve data_dir to an absolute path so file I/O works regardless of
    // future directory changes within the process.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir.clone());

    // Auto-init when the data directory is missing or empty and the user did
    // not explicitly invoke the `init` subcommand.
    let is_init_command = matches!(cli.command, Some(Commands::Init));
    if !is_init_command && dir_needs_init(&data_dir) {
        eprintln!(
            "Data directory '{}' is missing or empty — running init...",
            data_dir.display()
        );
        cmd::init::run()?;
    }

    match cli.command {
        None => cmd::root::run(),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Agenda { days }) => cmd::agenda::run(days),
        Some(Commands::Add {
            date,
            title,
            time,
            end,
        }) => cmd::add::run(&date, &title, time.as_deref(), end.as_deref()),
    }
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &std::path::Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
