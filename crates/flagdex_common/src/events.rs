//! Tracking events in data form.
//!
//! Each variant mirrors one engine entry point, so collaborators can queue
//! or log events and hand them over later. Serialized as tagged JSON, one
//! event per line in replay files:
//!
//! ```text
//! {"event":"flag_viewed","code":"FRA","continents":["Europe"]}
//! {"event":"quiz_completed","score":9,"total":10,"streak":4}
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    FlagViewed {
        code: String,
        #[serde(default)]
        continents: Vec<String>,
    },
    QuizCompleted {
        score: u64,
        total: u64,
        #[serde(default)]
        streak: u64,
    },
    FavoritesChanged {
        count: u64,
    },
    VexyQuery,
    ComparisonMade,
}

impl ProgressEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ProgressEvent::FlagViewed { .. } => "flag_viewed",
            ProgressEvent::QuizCompleted { .. } => "quiz_completed",
            ProgressEvent::FavoritesChanged { .. } => "favorites_changed",
            ProgressEvent::VexyQuery => "vexy_query",
            ProgressEvent::ComparisonMade => "comparison_made",
        }
    }
}

/// Outcome of parsing a JSON-lines event stream
#[derive(Debug, Default)]
pub struct ParsedEvents {
    pub events: Vec<ProgressEvent>,
    /// (line number, error) for every line that failed to parse
    pub skipped: Vec<(usize, String)>,
}

/// Parse one event per line, skipping blank lines and collecting bad ones
pub fn parse_event_lines(input: &str) -> ParsedEvents {
    let mut parsed = ParsedEvents::default();
    for (idx, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<ProgressEvent>(line) {
            Ok(event) => parsed.events.push(event),
            Err(e) => parsed.skipped.push((idx + 1, e.to_string())),
        }
    }
    parsed
}
