//! Level System
//!
//! Levels are derived from total XP on every read and never stored.
//!
//! ## XP Curve
//!
//! level = floor(sqrt(total_xp / 80)) + 1
//! XP required to reach level L: (L - 1)^2 * 80
//!
//! This means:
//! - Level 1: 0 XP
//! - Level 2: 80 XP
//! - Level 3: 320 XP
//! - Level 10: 6,480 XP

use serde::{Deserialize, Serialize};

/// Width factor of the quadratic XP curve
pub const XP_PER_LEVEL_STEP: u64 = 80;

/// Title bands mapping level ranges to explorer titles
pub const TITLE_BANDS: &[(u64, u64, &str)] = &[
    (1, 2, "Flag Spotter"),
    (3, 5, "Explorer"),
    (6, 9, "Globetrotter"),
    (10, 14, "Cartographer"),
    (15, 19, "Vexillologist"),
    (20, u64::MAX, "World Ambassador"),
];

/// Total XP required to reach `level` (levels start at 1)
pub fn xp_for_level(level: u64) -> u64 {
    let steps = level.saturating_sub(1);
    steps.saturating_mul(steps).saturating_mul(XP_PER_LEVEL_STEP)
}

/// Level for a given XP total
pub fn level_for_xp(total_xp: u64) -> u64 {
    let ratio = total_xp / XP_PER_LEVEL_STEP;
    // Float sqrt gives the estimate, the loops correct rounding at large values
    let mut root = (ratio as f64).sqrt() as u64;
    while root > 0 && root.saturating_mul(root) > ratio {
        root -= 1;
    }
    while (root + 1).saturating_mul(root + 1) <= ratio {
        root += 1;
    }
    root + 1
}

/// Title for a level
pub fn title_for_level(level: u64) -> &'static str {
    TITLE_BANDS
        .iter()
        .find(|&&(min, max, _)| level >= min && level <= max)
        .map(|&(_, _, title)| title)
        .unwrap_or("Flag Spotter")
}

/// Level metrics derived from a total XP value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelInfo {
    pub level: u64,
    #[serde(rename = "totalXP")]
    pub total_xp: u64,
    /// XP at which the current level started
    #[serde(rename = "currentLevelXP")]
    pub current_level_xp: u64,
    /// XP at which the next level starts
    #[serde(rename = "nextLevelXP")]
    pub next_level_xp: u64,
    /// Percentage (0-100) of the current level band already earned
    pub level_progress: f64,
    pub title: String,
}

impl LevelInfo {
    pub fn from_xp(total_xp: u64) -> Self {
        let level = level_for_xp(total_xp);
        let current_level_xp = xp_for_level(level);
        let next_level_xp = xp_for_level(level + 1);
        let band = next_level_xp.saturating_sub(current_level_xp);

        let level_progress = if band == 0 {
            100.0
        } else {
            let earned = total_xp.saturating_sub(current_level_xp) as f64;
            (earned / band as f64 * 100.0).clamp(0.0, 100.0)
        };

        Self {
            level,
            total_xp,
            current_level_xp,
            next_level_xp,
            level_progress,
            title: title_for_level(level).to_string(),
        }
    }

    /// XP earned since the current level started
    pub fn xp_into_level(&self) -> u64 {
        self.total_xp.saturating_sub(self.current_level_xp)
    }

    /// XP still missing for the next level
    pub fn xp_to_next_level(&self) -> u64 {
        self.next_level_xp.saturating_sub(self.total_xp)
    }
}

impl std::fmt::Display for LevelInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Level {} {}", self.level, self.title)
    }
}
