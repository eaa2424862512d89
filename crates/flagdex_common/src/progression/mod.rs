//! Progression Module
//!
//! Achievement tracking for the flag explorer: the static rule catalog,
//! XP levels, the unlock notification queue and the engine tying them
//! together.
//!
//! ## Level System
//!
//! - Levels start at 1, quadratic XP curve (80 XP step)
//! - Titles based on level bands
//! - XP earned from quiz answers and achievement rewards

pub mod catalog;
pub mod engine;
pub mod levels;
pub mod notifications;

pub use catalog::{AchievementDefinition, Category, Rarity, StatSelector, CATALOG};
pub use engine::{EngineOptions, ProgressEngine, ProgressSummary};
pub use levels::{level_for_xp, xp_for_level, LevelInfo, TITLE_BANDS};
pub use notifications::{AchievementState, NotificationQueue};
