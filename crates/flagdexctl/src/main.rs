//! Flagdex Control - CLI for the flag explorer progress engine
//!
//! Records flag views, quizzes and other activity, shows level and
//! achievement progress, and moves progress in and out of the data dir.

use anyhow::Result;
use clap::{Parser, Subcommand};
use flagdexctl::commands::{self, Session, VERSION};
use flagdexctl::{errors, logging};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flagdexctl")]
#[command(about = "Flagdex - flag explorer progress and achievements", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Override the data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a flag view
    View {
        /// Country code (e.g. FRA)
        code: String,

        /// Continent the country belongs to (repeatable)
        #[arg(long = "continent")]
        continents: Vec<String>,
    },

    /// Record a finished quiz
    Quiz {
        #[arg(long)]
        score: u64,

        #[arg(long)]
        total: u64,

        /// Longest run of correct answers
        #[arg(long, default_value_t = 0)]
        streak: u64,
    },

    /// Set the current number of favorite flags
    Favorite { count: u64 },

    /// Record a question to Vexy
    Ask,

    /// Record a flag comparison
    Compare,

    /// Show level, XP and statistics
    Status,

    /// List achievements with progress
    Achievements {
        /// Only this category (exploration, continents, quiz, collection, assistant, comparison)
        #[arg(long)]
        category: Option<String>,

        #[arg(long, conflicts_with = "locked")]
        unlocked: bool,

        #[arg(long)]
        locked: bool,
    },

    /// Force-unlock an achievement without granting XP
    Unlock { id: String },

    /// Write a progress export file
    Export {
        /// Target directory
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replace progress with an export file
    Import { file: PathBuf },

    /// Delete all progress
    Reset {
        #[arg(long)]
        yes: bool,
    },

    /// Apply a JSON-lines file of events
    Replay { file: PathBuf },

    /// Show effective configuration
    Config,
}

fn run(cli: Cli) -> Result<()> {
    let (config, config_path) = commands::load_config(cli.config.as_deref(), cli.data_dir)?;
    logging::init(&config.log.level);

    if let Commands::Config = cli.command {
        return commands::show_config(&config, &config_path);
    }

    let mut session = Session::open(config);
    let result = match cli.command {
        Commands::View { code, continents } => commands::view(&mut session, &code, &continents),
        Commands::Quiz {
            score,
            total,
            streak,
        } => commands::quiz(&mut session, score, total, streak),
        Commands::Favorite { count } => commands::favorite(&mut session, count),
        Commands::Ask => commands::ask(&mut session),
        Commands::Compare => commands::compare(&mut session),
        Commands::Status => commands::status(&session),
        Commands::Achievements {
            category,
            unlocked,
            locked,
        } => commands::achievements(&session, category.as_deref(), unlocked, locked),
        Commands::Unlock { id } => commands::unlock(&mut session, &id),
        Commands::Export { out } => commands::export(&session, out),
        Commands::Import { file } => commands::import(&mut session, &file),
        Commands::Reset { yes } => commands::reset(&mut session, yes),
        Commands::Replay { file } => commands::replay(&mut session, &file),
        Commands::Config => Ok(()),
    };
    session.close();
    result
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(errors::exit_code(&err));
    }
    std::process::exit(errors::EXIT_SUCCESS);
}
