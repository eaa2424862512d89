//! Terminal rendering for flagdexctl: toasts, status and achievement lists.

use flagdex_common::progression::{AchievementState, LevelInfo, ProgressEngine, ProgressSummary};
use flagdex_common::{ProgressStore, Rarity, UserStatistics};
use owo_colors::OwoColorize;

/// Horizontal rule
pub const HR: &str = "──────────────────────────────────────────────────────────";

/// Render a progress bar for a 0-100 percentage
pub fn progress_bar(percent: f64, width: usize) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(width - filled)
    )
}

fn rarity_label(rarity: Rarity) -> String {
    let label = rarity.as_str().to_uppercase();
    match rarity {
        Rarity::Common => label.white().to_string(),
        Rarity::Rare => label.bright_blue().to_string(),
        Rarity::Epic => label.bright_magenta().to_string(),
        Rarity::Legendary => label.bright_yellow().to_string(),
    }
}

/// One-line toast for an unlock notification
pub fn format_toast(state: &AchievementState) -> String {
    let def = &state.definition;
    format!(
        "{} Achievement unlocked: {} - {} [{}] +{} XP",
        def.icon,
        def.name.bold(),
        def.description,
        rarity_label(def.rarity),
        def.xp_reward
    )
}

/// Show and pop every queued notification, front first. Returns how many.
pub fn drain_notifications<S: ProgressStore>(engine: &mut ProgressEngine<S>) -> usize {
    let mut shown = 0;
    while let Some(state) = engine.current_notification() {
        println!("  {}", format_toast(state));
        engine.pop_notification();
        shown += 1;
    }
    shown
}

fn print_kv(key: &str, value: &str, width: usize) {
    println!("  {:width$} {}", key, value, width = width);
}

/// Level, XP bar and counters
pub fn print_status(
    version: &str,
    level: &LevelInfo,
    stats: &UserStatistics,
    summary: &ProgressSummary,
) {
    println!();
    println!("{}", format!("flagdexctl status v{}", version).bold());
    println!("{}", HR.dimmed());

    println!(
        "  {} {} {:.0}%",
        format!("Level {}", level.level).bold(),
        progress_bar(level.level_progress, 20).green(),
        level.level_progress
    );
    println!("  {}", level.title.cyan());
    println!(
        "  {}",
        format!(
            "XP: {} total, {} into level, {} to level {}",
            level.total_xp,
            level.xp_into_level(),
            level.xp_to_next_level(),
            level.level + 1
        )
        .dimmed()
    );
    println!();

    let kw = 18;
    print_kv("flags_viewed", &stats.viewed_flags.len().to_string(), kw);
    for (continent, codes) in &stats.viewed_by_continent {
        print_kv(&format!("  {}", continent), &codes.len().to_string(), kw);
    }
    print_kv("quizzes_completed", &stats.quizzes_completed.to_string(), kw);
    print_kv("perfect_quizzes", &stats.perfect_quizzes.to_string(), kw);
    print_kv("max_streak", &stats.max_streak.to_string(), kw);
    print_kv("favorites", &stats.favorites_count.to_string(), kw);
    print_kv("vexy_queries", &stats.vexy_queries.to_string(), kw);
    print_kv("comparisons", &stats.comparisons_made.to_string(), kw);
    println!();

    let best = summary
        .best_rarity
        .map(rarity_label)
        .unwrap_or_else(|| "none yet".dimmed().to_string());
    println!(
        "  Achievements: {}/{} ({:.0}%)   Best: {}",
        summary.unlocked, summary.total, summary.completion_percent, best
    );
    println!(
        "  {}",
        format!(
            "Achievement XP: {}/{}",
            summary.achievement_xp, summary.total_achievement_xp
        )
        .dimmed()
    );
    println!("{}", HR.dimmed());
    println!();
}

/// One line per achievement with its progress
pub fn print_achievements(states: &[AchievementState]) {
    if states.is_empty() {
        println!("  {}", "No achievements match.".dimmed());
        return;
    }

    for state in states {
        let def = &state.definition;
        let marker = if state.is_unlocked {
            "✓".green().to_string()
        } else {
            "·".dimmed().to_string()
        };
        let target = def.completed_progress();
        let progress = if state.is_unlocked {
            "done".green().to_string()
        } else {
            format!(
                "{} {}/{}",
                progress_bar(state.percent(), 10),
                state.progress.min(target),
                target
            )
        };

        println!(
            "  {} {} {:24} {:11} {:>5} XP  {}",
            marker,
            def.icon,
            def.name,
            rarity_label(def.rarity),
            def.xp_reward,
            progress
        );
        println!("        {}", def.description.dimmed());
    }
}
