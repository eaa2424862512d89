//! User statistics record for the progress engine.
//!
//! Field names follow the persisted JSON layout (camelCase), so a statistics
//! blob written by any earlier client loads unchanged. Missing fields fall
//! back to the initial zero state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// XP granted per correct quiz answer
pub const QUIZ_XP_PER_POINT: u64 = 5;

/// Everything the engine knows about the user's activity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStatistics {
    /// Country codes in the order they were first viewed
    pub viewed_flags: Vec<String>,
    /// Continent name -> country codes viewed on that continent
    pub viewed_by_continent: BTreeMap<String, Vec<String>>,
    pub quizzes_completed: u64,
    pub perfect_quizzes: u64,
    /// Best streak ever reported by a quiz
    pub max_streak: u64,
    /// Last absolute count reported by the favorites feature
    pub favorites_count: u64,
    pub vexy_queries: u64,
    pub comparisons_made: u64,
    #[serde(rename = "totalXP")]
    pub total_xp: u64,
    /// Epoch millis of the last persistence write (0 = never written)
    pub last_updated: i64,
}

impl UserStatistics {
    /// Initial zero state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_viewed(&self, code: &str) -> bool {
        self.viewed_flags.iter().any(|c| c == code)
    }

    /// Record a first view of `code`. Returns false if it was already viewed,
    /// in which case nothing changes.
    pub fn record_flag_view(&mut self, code: &str, continents: &[String]) -> bool {
        if self.has_viewed(code) {
            return false;
        }
        self.viewed_flags.push(code.to_string());
        for continent in continents {
            let bucket = self.viewed_by_continent.entry(continent.clone()).or_default();
            if !bucket.iter().any(|c| c == code) {
                bucket.push(code.to_string());
            }
        }
        true
    }

    /// Record a finished quiz. `score == total` counts as perfect, including 0/0.
    pub fn record_quiz(&mut self, score: u64, total: u64, streak: u64) {
        self.quizzes_completed += 1;
        if score == total {
            self.perfect_quizzes += 1;
        }
        self.max_streak = self.max_streak.max(streak);
        self.add_xp(score.saturating_mul(QUIZ_XP_PER_POINT));
    }

    pub fn set_favorites(&mut self, count: u64) {
        self.favorites_count = count;
    }

    pub fn record_vexy_query(&mut self) {
        self.vexy_queries += 1;
    }

    pub fn record_comparison(&mut self) {
        self.comparisons_made += 1;
    }

    /// XP only ever grows
    pub fn add_xp(&mut self, xp: u64) {
        self.total_xp = self.total_xp.saturating_add(xp);
    }

    /// Number of distinct flags viewed on a continent
    pub fn continent_views(&self, continent: &str) -> u64 {
        self.viewed_by_continent
            .get(continent)
            .map(|codes| codes.len() as u64)
            .unwrap_or(0)
    }

    pub fn flags_viewed(&self) -> u64 {
        self.viewed_flags.len() as u64
    }
}
