//! Achievement catalog for the flag explorer.
//!
//! Every achievement is a data record: a stat selector, a threshold and a
//! reward. The order of `CATALOG` is the evaluation order, which is also the
//! order notifications are queued in when several unlock at once.

use crate::stats::UserStatistics;
use serde::{Deserialize, Serialize};

/// Achievement category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Exploration,
    Continents,
    Quiz,
    Collection,
    Assistant,
    Comparison,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Exploration,
        Category::Continents,
        Category::Quiz,
        Category::Collection,
        Category::Assistant,
        Category::Comparison,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Exploration => "exploration",
            Category::Continents => "continents",
            Category::Quiz => "quiz",
            Category::Collection => "collection",
            Category::Assistant => "assistant",
            Category::Comparison => "comparison",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rarity tier, ordered from most to least common
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which statistic an achievement measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatSelector {
    ViewedFlags,
    ContinentViews(&'static str),
    QuizzesCompleted,
    PerfectQuizzes,
    MaxStreak,
    FavoritesCount,
    VexyQueries,
    ComparisonsMade,
}

impl StatSelector {
    /// Current value of the selected statistic
    pub fn measure(&self, stats: &UserStatistics) -> u64 {
        match *self {
            StatSelector::ViewedFlags => stats.flags_viewed(),
            StatSelector::ContinentViews(continent) => stats.continent_views(continent),
            StatSelector::QuizzesCompleted => stats.quizzes_completed,
            StatSelector::PerfectQuizzes => stats.perfect_quizzes,
            StatSelector::MaxStreak => stats.max_streak,
            StatSelector::FavoritesCount => stats.favorites_count,
            StatSelector::VexyQueries => stats.vexy_queries,
            StatSelector::ComparisonsMade => stats.comparisons_made,
        }
    }
}

/// Static achievement definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: Category,
    pub rarity: Rarity,
    #[serde(rename = "xpReward")]
    pub xp_reward: u64,
    /// Progress target shown to the user; absent for one-shot achievements
    pub max_progress: Option<u64>,
    #[serde(skip)]
    pub selector: StatSelector,
    #[serde(skip)]
    pub threshold: u64,
}

impl AchievementDefinition {
    const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        icon: &'static str,
        category: Category,
        rarity: Rarity,
        xp_reward: u64,
        selector: StatSelector,
        threshold: u64,
    ) -> Self {
        let max_progress = if threshold > 1 { Some(threshold) } else { None };
        Self {
            id,
            name,
            description,
            icon,
            category,
            rarity,
            xp_reward,
            max_progress,
            selector,
            threshold,
        }
    }

    /// Progress selector
    pub fn progress(&self, stats: &UserStatistics) -> u64 {
        self.selector.measure(stats)
    }

    /// Unlock condition
    pub fn is_met(&self, stats: &UserStatistics) -> bool {
        self.progress(stats) >= self.threshold
    }

    /// Progress value a completed achievement displays
    pub fn completed_progress(&self) -> u64 {
        self.max_progress.unwrap_or(self.threshold)
    }
}

use Category::*;
use Rarity::*;
use StatSelector::*;

/// All achievements, in evaluation order
#[rustfmt::skip]
pub static CATALOG: &[AchievementDefinition] = &[
    // Exploration
    AchievementDefinition::new("first_steps", "First Steps", "View your first flag", "🚩", Exploration, Common, 100, ViewedFlags, 1),
    AchievementDefinition::new("curious_traveler", "Curious Traveler", "View 10 different flags", "🧭", Exploration, Common, 150, ViewedFlags, 10),
    AchievementDefinition::new("globetrotter", "Globetrotter", "View 50 different flags", "✈️", Exploration, Rare, 300, ViewedFlags, 50),
    AchievementDefinition::new("world_explorer", "World Explorer", "View 100 different flags", "🌍", Exploration, Epic, 500, ViewedFlags, 100),
    AchievementDefinition::new("flag_master", "Flag Master", "View 195 different flags", "👑", Exploration, Legendary, 1000, ViewedFlags, 195),

    // Continents
    AchievementDefinition::new("africa_explorer", "African Safari", "View 10 flags from Africa", "🦁", Continents, Rare, 200, ContinentViews("Africa"), 10),
    AchievementDefinition::new("asia_explorer", "Asian Odyssey", "View 10 flags from Asia", "🏯", Continents, Rare, 200, ContinentViews("Asia"), 10),
    AchievementDefinition::new("europe_explorer", "European Tour", "View 10 flags from Europe", "🏰", Continents, Rare, 200, ContinentViews("Europe"), 10),
    AchievementDefinition::new("north_america_explorer", "North Star", "View 5 flags from North America", "🗽", Continents, Rare, 150, ContinentViews("North America"), 5),
    AchievementDefinition::new("south_america_explorer", "Southern Cross", "View 5 flags from South America", "🦜", Continents, Rare, 150, ContinentViews("South America"), 5),
    AchievementDefinition::new("oceania_explorer", "Island Hopper", "View 5 flags from Oceania", "🏝️", Continents, Rare, 150, ContinentViews("Oceania"), 5),

    // Quiz
    AchievementDefinition::new("quiz_rookie", "Quiz Rookie", "Complete your first quiz", "📝", Quiz, Common, 50, QuizzesCompleted, 1),
    AchievementDefinition::new("quiz_enthusiast", "Quiz Enthusiast", "Complete 10 quizzes", "🎯", Quiz, Rare, 200, QuizzesCompleted, 10),
    AchievementDefinition::new("quiz_master", "Quiz Master", "Complete 50 quizzes", "🏆", Quiz, Epic, 500, QuizzesCompleted, 50),
    AchievementDefinition::new("perfectionist", "Perfectionist", "Finish a quiz without a single mistake", "💯", Quiz, Rare, 150, PerfectQuizzes, 1),
    AchievementDefinition::new("flawless_five", "Flawless Five", "Finish 5 perfect quizzes", "💎", Quiz, Epic, 400, PerfectQuizzes, 5),
    AchievementDefinition::new("on_fire", "On Fire", "Reach a streak of 5 correct answers", "🔥", Quiz, Common, 100, MaxStreak, 5),
    AchievementDefinition::new("unstoppable", "Unstoppable", "Reach a streak of 15 correct answers", "⚡", Quiz, Epic, 350, MaxStreak, 15),

    // Collection
    AchievementDefinition::new("collector", "Collector", "Keep 5 favorite flags", "⭐", Collection, Common, 100, FavoritesCount, 5),
    AchievementDefinition::new("curator", "Curator", "Keep 20 favorite flags", "🖼️", Collection, Rare, 250, FavoritesCount, 20),

    // Assistant
    AchievementDefinition::new("vexy_hello", "Hello Vexy", "Ask Vexy your first question", "💬", Assistant, Common, 50, VexyQueries, 1),
    AchievementDefinition::new("vexy_regular", "Vexy's Friend", "Ask Vexy 25 questions", "🤖", Assistant, Rare, 200, VexyQueries, 25),

    // Comparison
    AchievementDefinition::new("first_comparison", "Side by Side", "Compare two countries", "⚖️", Comparison, Common, 50, ComparisonsMade, 1),
    AchievementDefinition::new("analyst", "Analyst", "Make 20 comparisons", "📊", Comparison, Rare, 200, ComparisonsMade, 20),
];

/// Look up a definition by id
pub fn find(id: &str) -> Option<&'static AchievementDefinition> {
    CATALOG.iter().find(|def| def.id == id)
}

/// Sum of all rewards in the catalog
pub fn total_reward_xp() -> u64 {
    CATALOG.iter().map(|def| def.xp_reward).sum()
}
