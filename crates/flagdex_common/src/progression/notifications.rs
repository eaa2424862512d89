//! Achievement state snapshots and the unlock notification queue.

use super::catalog::AchievementDefinition;
use crate::stats::UserStatistics;
use serde::Serialize;
use std::collections::VecDeque;

/// An achievement together with its live progress
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementState {
    #[serde(flatten)]
    pub definition: AchievementDefinition,
    pub is_unlocked: bool,
    pub progress: u64,
}

impl AchievementState {
    /// Live state derived from current statistics
    pub fn derive(
        definition: &AchievementDefinition,
        stats: &UserStatistics,
        unlocked: bool,
    ) -> Self {
        Self {
            definition: *definition,
            is_unlocked: unlocked,
            progress: definition.progress(stats),
        }
    }

    /// Snapshot frozen at unlock time, progress pinned to the target
    pub fn unlocked_snapshot(definition: &AchievementDefinition) -> Self {
        Self {
            definition: *definition,
            is_unlocked: true,
            progress: definition.completed_progress(),
        }
    }

    pub fn id(&self) -> &'static str {
        self.definition.id
    }

    /// Progress as a percentage of the target (0-100)
    pub fn percent(&self) -> f64 {
        let target = self.definition.completed_progress();
        if target == 0 {
            return 100.0;
        }
        (self.progress as f64 / target as f64 * 100.0).min(100.0)
    }
}

/// FIFO of unlocks waiting to be shown
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: VecDeque<AchievementState>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: AchievementState) {
        self.pending.push_back(state);
    }

    /// Front of the queue, the next toast to show
    pub fn head(&self) -> Option<&AchievementState> {
        self.pending.front()
    }

    /// Drop the front entry. No-op when empty.
    pub fn pop(&mut self) -> Option<AchievementState> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &AchievementState> {
        self.pending.iter()
    }
}
