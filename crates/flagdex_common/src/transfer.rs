//! Export/import artifact for moving progress between installs.
//!
//! Format: `{ "stats": {...}, "unlockedIds": [...], "timestamp": <epoch ms>,
//! "version": "1.0" }`. Import only requires `stats` (an object) and
//! `unlockedIds` (an array of strings); `timestamp` and `version` are
//! informational.

use crate::error::{ProgressError, Result};
use crate::stats::UserStatistics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Version written into every export
pub const EXPORT_VERSION: &str = "1.0";

/// Full progress snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub stats: UserStatistics,
    pub unlocked_ids: Vec<String>,
    /// Epoch millis at export time
    pub timestamp: i64,
    pub version: String,
}

impl ExportPayload {
    pub fn new(stats: UserStatistics, unlocked_ids: Vec<String>, at: DateTime<Utc>) -> Self {
        Self {
            stats,
            unlocked_ids,
            timestamp: at.timestamp_millis(),
            version: EXPORT_VERSION.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Download-style file name, e.g. `flag-explorer-progress-2026-10-16.json`
    pub fn file_name(&self, prefix: &str) -> String {
        let date = DateTime::<Utc>::from_timestamp_millis(self.timestamp)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "undated".to_string());
        format!("{}-{}.json", prefix, date)
    }

    /// Write into `dir` and return the written path
    pub fn write_to_dir(&self, dir: &Path, prefix: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name(prefix));
        std::fs::write(&path, self.to_json()?)?;
        Ok(path)
    }
}

/// The part of an import that gets applied
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedProgress {
    pub stats: UserStatistics,
    pub unlocked_ids: Vec<String>,
}

/// Validate and decode an import payload without touching any state
pub fn parse_import(payload: &str) -> Result<ImportedProgress> {
    let value: Value = serde_json::from_str(payload)?;

    let stats_value = value
        .get("stats")
        .filter(|v| v.is_object())
        .ok_or_else(|| ProgressError::InvalidImport("missing `stats` object".to_string()))?;

    let ids_value = value
        .get("unlockedIds")
        .and_then(Value::as_array)
        .ok_or_else(|| ProgressError::InvalidImport("missing `unlockedIds` array".to_string()))?;

    let stats: UserStatistics = serde_json::from_value(stats_value.clone())
        .map_err(|e| ProgressError::InvalidImport(format!("malformed `stats`: {}", e)))?;

    let mut unlocked_ids: Vec<String> = Vec::with_capacity(ids_value.len());
    for id in ids_value {
        let id = id.as_str().ok_or_else(|| {
            ProgressError::InvalidImport(format!("non-string unlocked id: {}", id))
        })?;
        if !unlocked_ids.iter().any(|known| known == id) {
            unlocked_ids.push(id.to_string());
        }
    }

    Ok(ImportedProgress { stats, unlocked_ids })
}
