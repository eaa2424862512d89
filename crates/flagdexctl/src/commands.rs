//! Command implementations for flagdexctl.
//!
//! Each invocation is one session: the engine is opened from the data
//! directory, the command runs, queued unlock notifications are shown as
//! toasts, and the engine is torn down.

use crate::display;
use anyhow::{bail, Context as _, Result};
use flagdex_common::config::{self, FlagdexConfig};
use flagdex_common::events;
use flagdex_common::progression::catalog;
use flagdex_common::{Category, EngineOptions, FileStore, ProgressEngine};
use owo_colors::OwoColorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Version embedded at build time
pub const VERSION: &str = env!("FLAGDEX_VERSION");

/// Loaded configuration plus an open engine
pub struct Session {
    pub config: FlagdexConfig,
    pub engine: ProgressEngine<FileStore>,
}

/// Resolve configuration without opening the engine
pub fn load_config(
    config_path: Option<&Path>,
    data_dir: Option<PathBuf>,
) -> Result<(FlagdexConfig, PathBuf)> {
    let (mut config, path) = match config_path {
        Some(path) => {
            let config = FlagdexConfig::load_from(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            (config, path.to_path_buf())
        }
        None => (FlagdexConfig::load(), config::config_path()),
    };
    if let Some(dir) = data_dir {
        config.storage.data_dir = Some(dir);
    }
    Ok((config, path))
}

impl Session {
    pub fn open(config: FlagdexConfig) -> Self {
        let store = FileStore::new(config.storage.resolved_data_dir());
        let engine = ProgressEngine::init(store, EngineOptions::from_config(&config));
        info!(data_dir = %engine.store().dir().display(), "progress store opened");
        Self { config, engine }
    }

    /// Show pending toasts and release the store
    pub fn close(mut self) {
        display::drain_notifications(&mut self.engine);
        self.engine.teardown();
    }
}

pub fn view(session: &mut Session, code: &str, continents: &[String]) -> Result<()> {
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        bail!("country code must not be empty");
    }

    if session.engine.stats().has_viewed(&code) {
        println!("{} already viewed", code);
    } else {
        session.engine.track_flag_view(&code, continents);
        println!(
            "Viewed {} ({} flags so far)",
            code.bold(),
            session.engine.stats().viewed_flags.len()
        );
    }
    Ok(())
}

pub fn quiz(session: &mut Session, score: u64, total: u64, streak: u64) -> Result<()> {
    if score > total {
        bail!("score {} cannot exceed total {}", score, total);
    }
    session.engine.track_quiz_result(score, total, streak);
    let perfect = if score == total { " - perfect!" } else { "" };
    println!("Quiz recorded: {}/{}{}", score, total, perfect);
    Ok(())
}

pub fn favorite(session: &mut Session, count: u64) -> Result<()> {
    session.engine.track_favorite(count);
    println!("Favorites: {}", count);
    Ok(())
}

pub fn ask(session: &mut Session) -> Result<()> {
    session.engine.track_vexy_query();
    println!("Vexy queries: {}", session.engine.stats().vexy_queries);
    Ok(())
}

pub fn compare(session: &mut Session) -> Result<()> {
    session.engine.track_comparison();
    println!("Comparisons: {}", session.engine.stats().comparisons_made);
    Ok(())
}

pub fn status(session: &Session) -> Result<()> {
    let engine = &session.engine;
    display::print_status(VERSION, &engine.level_info(), engine.stats(), &engine.summary());
    Ok(())
}

pub fn achievements(
    session: &Session,
    category: Option<&str>,
    only_unlocked: bool,
    only_locked: bool,
) -> Result<()> {
    let states = match category {
        Some(name) => {
            let category = Category::parse(name).with_context(|| {
                let known: Vec<_> = Category::ALL.iter().map(|c| c.as_str()).collect();
                format!("unknown category '{}' (expected one of: {})", name, known.join(", "))
            })?;
            session.engine.achievements_in(category)
        }
        None => session.engine.achievements(),
    };

    let states: Vec<_> = states
        .into_iter()
        .filter(|s| !only_unlocked || s.is_unlocked)
        .filter(|s| !only_locked || !s.is_unlocked)
        .collect();
    display::print_achievements(&states);
    Ok(())
}

pub fn unlock(session: &mut Session, id: &str) -> Result<()> {
    if catalog::find(id).is_none() {
        bail!("unknown achievement '{}'", id);
    }
    if session.engine.unlock_achievement(id) {
        println!("Unlocked {} (no XP granted)", id);
    } else {
        println!("{} was already unlocked", id);
    }
    Ok(())
}

pub fn export(session: &Session, out: Option<PathBuf>) -> Result<()> {
    let dir = out
        .or_else(|| session.config.export.directory.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let path = session
        .engine
        .export_progress(&dir)
        .with_context(|| format!("failed to export into {}", dir.display()))?;
    println!("Progress exported to {}", path.display());
    Ok(())
}

pub fn import(session: &mut Session, file: &Path) -> Result<()> {
    let payload = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    session
        .engine
        .try_import_progress(&payload)
        .with_context(|| format!("import of {} rejected", file.display()))?;

    let summary = session.engine.summary();
    println!(
        "Imported progress: {} flags, {} XP, {}/{} achievements",
        session.engine.stats().viewed_flags.len(),
        session.engine.stats().total_xp,
        summary.unlocked,
        summary.total
    );
    Ok(())
}

pub fn reset(session: &mut Session, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("reset deletes all progress; pass --yes to confirm");
    }
    session.engine.reset_progress();
    println!("Progress reset");
    Ok(())
}

/// Apply a JSON-lines file of events, one session-wide pass
pub fn replay(session: &mut Session, file: &Path) -> Result<()> {
    let input = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let parsed = events::parse_event_lines(&input);

    for (line, error) in &parsed.skipped {
        warn!(line, error = %error, "skipping malformed event");
    }
    for event in &parsed.events {
        session.engine.apply(event);
        display::drain_notifications(&mut session.engine);
    }

    println!(
        "Replayed {} events ({} skipped)",
        parsed.events.len(),
        parsed.skipped.len()
    );
    Ok(())
}

pub fn show_config(config: &FlagdexConfig, path: &Path) -> Result<()> {
    println!("{}", format!("# {}", path.display()).dimmed());
    println!("# data_dir = {}", config.storage.resolved_data_dir().display());
    print!("{}", config.to_toml());
    Ok(())
}
