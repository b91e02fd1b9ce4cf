mod app;
mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fraza-cli", about = "Fraza phrase trainer CLI", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List all phrases with their review counters
    List,

    /// Add a new phrase
    Add {
        /// The phrase to learn
        text: String,
        /// Its translation
        translation: String,
    },

    /// Edit a phrase's text and/or translation
    Edit {
        /// Phrase id (prefix) or exact text
        phrase: String,
        /// New phrase text
        #[arg(long)]
        text: Option<String>,
        /// New translation
        #[arg(long)]
        translation: Option<String>,
    },

    /// Delete a phrase
    Delete {
        /// Phrase id (prefix) or exact text
        phrase: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Substring search over phrases and translations
    Search {
        /// Search query
        query: String,
    },

    /// Show per-phrase risk scores and collection totals
    Stats,

    /// Run a timed recall drill
    Train,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && stdout_is_tty();

    let app = app::App::new(cli.data_dir.as_deref())?;

    match cli.command {
        Command::List => {
            commands::list::run(&app, &cli.format, use_color)?;
        }
        Command::Add { text, translation } => {
            commands::add::run(&app, &text, &translation, &cli.format)?;
        }
        Command::Edit { phrase, text, translation } => {
            commands::edit::run(&app, &phrase, text.as_deref(), translation.as_deref(), &cli.format)?;
        }
        Command::Delete { phrase, yes } => {
            commands::delete::run(&app, &phrase, yes)?;
        }
        Command::Search { query } => {
            commands::search::run(&app, &query, &cli.format, use_color)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Command::Train => {
            commands::train::run(&app, use_color)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn stdout_is_tty() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
