//! Progress Engine
//!
//! Owns the user statistics, the unlocked-id set and the notification queue.
//! Every tracking call mutates the statistics, runs the derivation pass and
//! writes both blobs back to the store.
//!
//! ## Derivation pass
//!
//! 1. Evaluate every catalog rule in table order
//! 2. Keep the ids not notified yet
//! 3. Mark them notified and sum their rewards
//! 4. Add the summed reward to total XP in one step
//! 5. Merge the ids into the unlocked set
//! 6. Queue one frozen snapshot per id, in table order
//!
//! The notified set is seeded from the persisted unlocked ids, so an
//! achievement is announced at most once across sessions.
//!
//! Storage problems never escape: unreadable blobs load as the initial state
//! and failed writes are logged and retried on the next change.

use super::catalog::{self, AchievementDefinition, Category, Rarity, CATALOG};
use super::levels::LevelInfo;
use super::notifications::{AchievementState, NotificationQueue};
use crate::config::{FlagdexConfig, DEFAULT_STATS_KEY, DEFAULT_UNLOCKED_KEY};
use crate::error::Result;
use crate::events::ProgressEvent;
use crate::stats::UserStatistics;
use crate::storage::ProgressStore;
use crate::transfer::{self, ExportPayload};
use chrono::Utc;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Engine settings, normally taken from `FlagdexConfig`
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    pub stats_key: String,
    pub unlocked_key: String,
    /// Drop pending notifications on reset. Off by default, so toasts queued
    /// before a reset are still shown.
    pub clear_notifications_on_reset: bool,
    pub export_prefix: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from_config(&FlagdexConfig::default())
    }
}

impl EngineOptions {
    pub fn from_config(config: &FlagdexConfig) -> Self {
        Self {
            stats_key: config.storage.stats_key.clone(),
            unlocked_key: config.storage.unlocked_key.clone(),
            clear_notifications_on_reset: config.notifications.clear_on_reset,
            export_prefix: config.export.file_prefix.clone(),
        }
    }

    fn keys_or_default(mut self) -> Self {
        if self.stats_key.is_empty() {
            self.stats_key = DEFAULT_STATS_KEY.to_string();
        }
        if self.unlocked_key.is_empty() {
            self.unlocked_key = DEFAULT_UNLOCKED_KEY.to_string();
        }
        self
    }
}

/// Completion overview
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub unlocked: usize,
    pub total: usize,
    /// 0-100
    pub completion_percent: f64,
    /// XP earned from unlocked catalog achievements
    pub achievement_xp: u64,
    /// XP available from the whole catalog
    pub total_achievement_xp: u64,
    /// Highest rarity among unlocked achievements
    pub best_rarity: Option<Rarity>,
}

/// Achievement and progress tracking engine
#[derive(Debug)]
pub struct ProgressEngine<S: ProgressStore> {
    store: S,
    options: EngineOptions,
    stats: UserStatistics,
    /// Unlocked ids in unlock order, no duplicates
    unlocked: Vec<String>,
    /// Ids already announced (or deliberately silenced)
    notified: HashSet<String>,
    queue: NotificationQueue,
    /// Set when the last write failed
    dirty: bool,
}

impl<S: ProgressStore> ProgressEngine<S> {
    /// Load persisted state from `store`. Never fails: anything unreadable
    /// starts from the initial state.
    pub fn init(store: S, options: EngineOptions) -> Self {
        let options = options.keys_or_default();
        let stats = load_stats(&store, &options.stats_key);
        let unlocked = load_unlocked(&store, &options.unlocked_key);
        let notified = unlocked.iter().cloned().collect();

        debug!(
            flags = stats.viewed_flags.len(),
            unlocked = unlocked.len(),
            total_xp = stats.total_xp,
            "progress engine initialized"
        );

        Self {
            store,
            options,
            stats,
            unlocked,
            notified,
            queue: NotificationQueue::new(),
            dirty: false,
        }
    }

    /// Flush anything a failed write left behind and hand the store back
    pub fn teardown(mut self) -> S {
        if self.dirty {
            self.persist();
        }
        self.store
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ------------------------------------------------------------------
    // Tracking
    // ------------------------------------------------------------------

    /// A country's detail was viewed. Repeat views of the same code are ignored.
    pub fn track_flag_view(&mut self, code: &str, continents: &[String]) {
        if self.stats.record_flag_view(code, continents) {
            self.commit();
        }
    }

    /// A quiz finished
    pub fn track_quiz_result(&mut self, score: u64, total: u64, streak: u64) {
        self.stats.record_quiz(score, total, streak);
        self.commit();
    }

    /// The favorites set changed size; `count` is the new absolute size
    pub fn track_favorite(&mut self, count: u64) {
        self.stats.set_favorites(count);
        self.commit();
    }

    /// A message was sent to Vexy
    pub fn track_vexy_query(&mut self) {
        self.stats.record_vexy_query();
        self.commit();
    }

    /// A head-to-head comparison was resolved
    pub fn track_comparison(&mut self) {
        self.stats.record_comparison();
        self.commit();
    }

    /// Dispatch an event to its tracking entry point
    pub fn apply(&mut self, event: &ProgressEvent) {
        match event {
            ProgressEvent::FlagViewed { code, continents } => {
                self.track_flag_view(code, continents)
            }
            ProgressEvent::QuizCompleted { score, total, streak } => {
                self.track_quiz_result(*score, *total, *streak)
            }
            ProgressEvent::FavoritesChanged { count } => self.track_favorite(*count),
            ProgressEvent::VexyQuery => self.track_vexy_query(),
            ProgressEvent::ComparisonMade => self.track_comparison(),
        }
    }

    /// Mark `id` unlocked without a notification or XP.
    /// Returns false if it was already unlocked or announced.
    pub fn unlock_achievement(&mut self, id: &str) -> bool {
        if self.notified.contains(id) {
            return false;
        }
        if catalog::find(id).is_none() {
            debug!(id, "manual unlock of an id outside the catalog");
        }
        self.notified.insert(id.to_string());
        self.insert_unlocked(id);
        self.persist();
        true
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    /// Next notification to present, if any
    pub fn current_notification(&self) -> Option<&AchievementState> {
        self.queue.head()
    }

    /// Discard the front notification. No-op when the queue is empty.
    pub fn pop_notification(&mut self) {
        self.queue.pop();
    }

    pub fn pending_notifications(&self) -> usize {
        self.queue.len()
    }

    /// Pending notifications, front first
    pub fn notifications(&self) -> impl Iterator<Item = &AchievementState> {
        self.queue.iter()
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    pub fn stats(&self) -> &UserStatistics {
        &self.stats
    }

    pub fn unlocked_ids(&self) -> &[String] {
        &self.unlocked
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|known| known == id)
    }

    /// Every achievement with live progress, in catalog order
    pub fn achievements(&self) -> Vec<AchievementState> {
        CATALOG.iter().map(|def| self.state_of(def)).collect()
    }

    pub fn achievements_in(&self, category: Category) -> Vec<AchievementState> {
        CATALOG
            .iter()
            .filter(|def| def.category == category)
            .map(|def| self.state_of(def))
            .collect()
    }

    pub fn achievement(&self, id: &str) -> Option<AchievementState> {
        catalog::find(id).map(|def| self.state_of(def))
    }

    pub fn level_info(&self) -> LevelInfo {
        LevelInfo::from_xp(self.stats.total_xp)
    }

    pub fn summary(&self) -> ProgressSummary {
        let unlocked: Vec<&AchievementDefinition> = CATALOG
            .iter()
            .filter(|def| self.is_unlocked(def.id))
            .collect();
        let total = CATALOG.len();
        let completion_percent = if total == 0 {
            0.0
        } else {
            unlocked.len() as f64 / total as f64 * 100.0
        };

        ProgressSummary {
            unlocked: unlocked.len(),
            total,
            completion_percent,
            achievement_xp: unlocked.iter().map(|def| def.xp_reward).sum(),
            total_achievement_xp: catalog::total_reward_xp(),
            best_rarity: unlocked.iter().map(|def| def.rarity).max(),
        }
    }

    fn state_of(&self, def: &AchievementDefinition) -> AchievementState {
        AchievementState::derive(def, &self.stats, self.is_unlocked(def.id))
    }

    // ------------------------------------------------------------------
    // Persistence operations
    // ------------------------------------------------------------------

    /// Snapshot for export; does not modify the engine
    pub fn export_payload(&self) -> ExportPayload {
        ExportPayload::new(self.stats.clone(), self.unlocked.clone(), Utc::now())
    }

    pub fn export_json(&self) -> Result<String> {
        self.export_payload().to_json()
    }

    /// Write the export artifact into `dir`, returning its path
    pub fn export_progress(&self, dir: &Path) -> Result<PathBuf> {
        let path = self
            .export_payload()
            .write_to_dir(dir, &self.options.export_prefix)?;
        info!(path = %path.display(), "progress exported");
        Ok(path)
    }

    /// Replace statistics and unlocked ids with an exported payload, then
    /// run the derivation pass over the imported statistics.
    /// On error nothing changes.
    pub fn try_import_progress(&mut self, payload: &str) -> Result<()> {
        let imported = transfer::parse_import(payload)?;

        self.stats = imported.stats;
        self.unlocked = imported.unlocked_ids;
        self.notified = self.unlocked.iter().cloned().collect();
        let newly = self.derive();
        self.persist();

        info!(
            unlocked = self.unlocked.len(),
            newly_unlocked = newly.len(),
            total_xp = self.stats.total_xp,
            "progress imported"
        );
        Ok(())
    }

    /// Boolean form of `try_import_progress`
    pub fn import_progress(&mut self, payload: &str) -> bool {
        match self.try_import_progress(payload) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "progress import rejected");
                false
            }
        }
    }

    /// Back to the initial state, persisted blobs deleted.
    /// Pending notifications survive unless `clear_notifications_on_reset`.
    pub fn reset_progress(&mut self) {
        self.stats = UserStatistics::new();
        self.unlocked.clear();
        self.notified.clear();
        if self.options.clear_notifications_on_reset {
            self.queue.clear();
        }

        for key in [&self.options.stats_key, &self.options.unlocked_key] {
            if let Err(e) = self.store.remove(key) {
                warn!(key = %key, error = %e, "failed to delete persisted progress");
            }
        }
        self.dirty = false;

        info!(pending = self.queue.len(), "progress reset");
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn commit(&mut self) {
        self.derive();
        self.persist();
    }

    /// Run the derivation pass; returns the ids unlocked by it
    fn derive(&mut self) -> Vec<&'static str> {
        let newly: Vec<&'static AchievementDefinition> = CATALOG
            .iter()
            .filter(|def| def.is_met(&self.stats) && !self.notified.contains(def.id))
            .collect();
        if newly.is_empty() {
            return Vec::new();
        }

        let mut reward = 0u64;
        for def in &newly {
            self.notified.insert(def.id.to_string());
            reward = reward.saturating_add(def.xp_reward);
        }
        self.stats.add_xp(reward);

        for def in &newly {
            self.insert_unlocked(def.id);
            self.queue.push(AchievementState::unlocked_snapshot(def));
            debug!(id = def.id, rarity = %def.rarity, xp = def.xp_reward, "achievement unlocked");
        }

        newly.iter().map(|def| def.id).collect()
    }

    fn insert_unlocked(&mut self, id: &str) {
        if !self.is_unlocked(id) {
            self.unlocked.push(id.to_string());
        }
    }

    /// Best-effort write of both blobs
    fn persist(&mut self) {
        self.stats.last_updated = Utc::now().timestamp_millis();

        let stats_ok = write_blob(&mut self.store, &self.options.stats_key, &self.stats);
        let ids_ok = write_blob(&mut self.store, &self.options.unlocked_key, &self.unlocked);
        self.dirty = !(stats_ok && ids_ok);
    }
}

fn write_blob<S: ProgressStore, T: Serialize>(store: &mut S, key: &str, value: &T) -> bool {
    let written = serde_json::to_string(value)
        .map_err(Into::into)
        .and_then(|json| store.save(key, &json));
    match written {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, kind = e.kind(), "failed to persist progress");
            false
        }
    }
}

fn load_stats<S: ProgressStore>(store: &S, key: &str) -> UserStatistics {
    match store.load(key) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(key, error = %e, "corrupted statistics blob, starting fresh");
            UserStatistics::new()
        }),
        Ok(None) => UserStatistics::new(),
        Err(e) => {
            warn!(key, error = %e, "unreadable statistics blob, starting fresh");
            UserStatistics::new()
        }
    }
}

fn load_unlocked<S: ProgressStore>(store: &S, key: &str) -> Vec<String> {
    let ids: Vec<String> = match store.load(key) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(key, error = %e, "corrupted unlocked-ids blob, starting fresh");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "unreadable unlocked-ids blob, starting fresh");
            Vec::new()
        }
    };

    let mut unique: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}
