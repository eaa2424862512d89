//! Shared library for Flagdex components.
//!
//! Progress tracking for the flag explorer: user statistics, achievements,
//! XP levels, unlock notifications and their persistence.

pub mod config;
pub mod error;
pub mod events;
pub mod progression;
pub mod stats;
pub mod storage;
pub mod transfer;

pub use config::FlagdexConfig;
pub use error::ProgressError;
pub use events::ProgressEvent;
pub use progression::{
    AchievementDefinition, AchievementState, Category, EngineOptions, LevelInfo, ProgressEngine,
    Rarity,
};
pub use stats::UserStatistics;
pub use storage::{FileStore, MemoryStore, ProgressStore};
pub use transfer::ExportPayload;

/// Version of this build
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
