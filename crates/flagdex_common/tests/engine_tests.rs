//! Tests for the progress engine: tracking, unlocks, notifications,
//! levels, import/export and reset.

use flagdex_common::progression::{EngineOptions, ProgressEngine, CATALOG};
use flagdex_common::stats::UserStatistics;
use flagdex_common::storage::{FileStore, MemoryStore, ProgressStore};
use flagdex_common::{Category, ProgressEvent};

fn fresh() -> ProgressEngine<MemoryStore> {
    ProgressEngine::init(MemoryStore::new(), EngineOptions::default())
}

fn continents(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn queued_ids<S: ProgressStore>(engine: &ProgressEngine<S>) -> Vec<&'static str> {
    engine.notifications().map(|n| n.id()).collect()
}

#[test]
fn test_first_flag_scenario() {
    let mut engine = fresh();
    engine.track_flag_view("FRA", &[]);

    assert_eq!(engine.stats().viewed_flags, vec!["FRA"]);
    assert!(engine.is_unlocked("first_steps"));
    assert_eq!(engine.stats().total_xp, 100);
    assert_eq!(engine.pending_notifications(), 1);

    let head = engine.current_notification().unwrap();
    assert_eq!(head.id(), "first_steps");
    assert!(head.is_unlocked);
    assert_eq!(head.progress, 1);
}

#[test]
fn test_repeat_view_not_double_counted() {
    let mut engine = fresh();
    engine.track_flag_view("USA", &continents(&["North America"]));
    let xp_after_first = engine.stats().total_xp;
    engine.track_flag_view("USA", &continents(&["North America"]));

    assert_eq!(engine.stats().viewed_flags, vec!["USA"]);
    assert_eq!(engine.stats().continent_views("North America"), 1);
    assert_eq!(engine.achievement("curious_traveler").unwrap().progress, 1);
    assert_eq!(engine.stats().total_xp, xp_after_first);
    assert_eq!(engine.pending_notifications(), 1);
}

#[test]
fn test_perfect_quiz_rule() {
    let mut engine = fresh();
    engine.track_quiz_result(10, 10, 0);
    assert_eq!(engine.stats().quizzes_completed, 1);
    assert_eq!(engine.stats().perfect_quizzes, 1);

    engine.track_quiz_result(9, 10, 0);
    assert_eq!(engine.stats().quizzes_completed, 2);
    assert_eq!(engine.stats().perfect_quizzes, 1);
}

#[test]
fn test_empty_quiz_is_perfect() {
    let mut engine = fresh();
    engine.track_quiz_result(0, 0, 0);
    assert_eq!(engine.stats().perfect_quizzes, 1);
    assert!(engine.is_unlocked("perfectionist"));
}

#[test]
fn test_quiz_xp_and_streak() {
    let mut engine = fresh();
    engine.track_quiz_result(4, 10, 3);
    // 4 * 5 for answers + quiz_rookie reward
    assert_eq!(engine.stats().total_xp, 20 + 50);

    engine.track_quiz_result(2, 10, 1);
    assert_eq!(engine.stats().max_streak, 3);
    assert_eq!(engine.stats().total_xp, 80);
}

#[test]
fn test_simultaneous_unlocks_follow_catalog_order() {
    let mut engine = fresh();
    // A perfect quiz with a long streak crosses three thresholds at once
    engine.track_quiz_result(5, 5, 5);

    assert_eq!(queued_ids(&engine), vec!["quiz_rookie", "perfectionist", "on_fire"]);
    assert_eq!(engine.stats().total_xp, 25 + 50 + 150 + 100);
}

#[test]
fn test_catalog_order_beats_call_order() {
    let mut engine = fresh();
    let mut stats = UserStatistics::new();
    stats.vexy_queries = 1;
    stats.comparisons_made = 1;
    stats.favorites_count = 5;
    let payload = serde_json::json!({ "stats": stats, "unlockedIds": [] }).to_string();
    assert!(engine.import_progress(&payload));

    // The import itself unlocks what the imported stats satisfy
    assert_eq!(queued_ids(&engine), vec!["collector", "vexy_hello", "first_comparison"]);
    assert_eq!(engine.stats().total_xp, 100 + 50 + 50);

    engine.track_flag_view("BRA", &continents(&["South America"]));
    assert_eq!(
        queued_ids(&engine),
        vec!["collector", "vexy_hello", "first_comparison", "first_steps"]
    );
}

#[test]
fn test_import_unlocks_crossed_thresholds() {
    let mut engine = fresh();
    assert!(engine.import_progress(r#"{"stats":{"vexyQueries":1},"unlockedIds":[]}"#));

    let vexy = engine.achievement("vexy_hello").unwrap();
    assert_eq!(vexy.progress, 1);
    assert!(vexy.is_unlocked);
    assert_eq!(queued_ids(&engine), vec!["vexy_hello"]);
    assert_eq!(engine.stats().total_xp, 50);

    // Persisted with the new unlock
    let ids: Vec<String> =
        serde_json::from_str(engine.store().get("unlocked_achievements").unwrap()).unwrap();
    assert_eq!(ids, vec!["vexy_hello"]);
}

#[test]
fn test_import_keeps_listed_ids_silent() {
    let mut engine = fresh();
    let payload = r#"{
        "stats": {"vexyQueries": 1, "comparisonsMade": 1},
        "unlockedIds": ["vexy_hello"]
    }"#;
    assert!(engine.import_progress(payload));

    assert_eq!(queued_ids(&engine), vec!["first_comparison"]);
    assert_eq!(engine.stats().total_xp, 50);
}

#[test]
fn test_no_duplicate_notifications() {
    let mut engine = fresh();
    engine.track_favorite(5);
    assert_eq!(queued_ids(&engine), vec!["collector"]);
    engine.pop_notification();

    // Dropping below and crossing again must stay silent
    engine.track_favorite(2);
    engine.track_favorite(6);
    engine.track_favorite(5);
    assert_eq!(engine.pending_notifications(), 0);
    assert_eq!(engine.unlocked_ids(), ["collector"]);
}

#[test]
fn test_favorites_progress_can_drop() {
    let mut engine = fresh();
    engine.track_favorite(12);
    engine.track_favorite(3);
    let curator = engine.achievement("curator").unwrap();
    assert_eq!(curator.progress, 3);
    assert!(engine.achievement("collector").unwrap().is_unlocked);
}

#[test]
fn test_xp_never_decreases() {
    let mut engine = fresh();
    let mut last = engine.stats().total_xp;
    let codes = ["FRA", "DEU", "ITA", "ESP", "PRT", "FRA", "NLD", "BEL"];

    for (i, code) in codes.iter().enumerate() {
        engine.track_flag_view(code, &continents(&["Europe"]));
        engine.track_quiz_result(i as u64, 8, i as u64);
        engine.track_favorite((codes.len() - i) as u64);
        engine.track_vexy_query();
        engine.track_comparison();
        engine.pop_notification();

        assert!(engine.stats().total_xp >= last);
        last = engine.stats().total_xp;
    }
}

#[test]
fn test_pop_on_empty_queue_is_noop() {
    let mut engine = fresh();
    engine.pop_notification();
    assert!(engine.current_notification().is_none());
}

#[test]
fn test_manual_unlock_is_silent() {
    let mut engine = fresh();
    assert!(engine.unlock_achievement("globetrotter"));
    assert!(!engine.unlock_achievement("globetrotter"));

    assert!(engine.is_unlocked("globetrotter"));
    assert_eq!(engine.pending_notifications(), 0);
    assert_eq!(engine.stats().total_xp, 0);
}

#[test]
fn test_manual_unlock_blocks_later_notification() {
    let mut engine = fresh();
    engine.unlock_achievement("vexy_hello");
    engine.track_vexy_query();
    assert_eq!(engine.pending_notifications(), 0);
    assert_eq!(engine.stats().total_xp, 0);
}

#[test]
fn test_level_computation() {
    let mut engine = fresh();
    assert_eq!(engine.level_info().level, 1);

    // 16 correct answers = 80 XP, plus quiz_rookie (50)
    engine.track_quiz_result(16, 20, 0);
    assert_eq!(engine.stats().total_xp, 130);
    assert_eq!(engine.level_info().level, 2);

    let info = engine.level_info();
    assert_eq!(info.current_level_xp, 80);
    assert_eq!(info.next_level_xp, 320);
}

#[test]
fn test_level_three_at_320_xp() {
    let mut engine = fresh();

    // 53 correct answers = 265 XP, plus quiz_rookie (50)
    engine.track_quiz_result(53, 60, 0);
    assert_eq!(engine.stats().total_xp, 315);
    assert_eq!(engine.level_info().level, 2);

    engine.track_quiz_result(1, 2, 0);
    assert_eq!(engine.stats().total_xp, 320);
    let info = engine.level_info();
    assert_eq!(info.level, 3);
    assert_eq!(info.current_level_xp, 320);
    assert_eq!(info.xp_into_level(), 0);
}

#[test]
fn test_invalid_import_changes_nothing() {
    let mut engine = fresh();
    engine.track_flag_view("KEN", &continents(&["Africa"]));
    engine.track_quiz_result(7, 10, 2);

    let stats_before = serde_json::to_string(engine.stats()).unwrap();
    let ids_before = engine.unlocked_ids().to_vec();

    assert!(!engine.import_progress(r#"{"not-stats": {}}"#));
    assert!(!engine.import_progress(r#"{"stats": {}, "unlockedIds": {}}"#));
    assert!(!engine.import_progress("{{{"));

    assert_eq!(serde_json::to_string(engine.stats()).unwrap(), stats_before);
    assert_eq!(engine.unlocked_ids(), ids_before.as_slice());
}

#[test]
fn test_import_reseeds_dedup_guard() {
    let mut source = fresh();
    for code in ["AUS", "NZL", "FJI", "WSM", "TON"] {
        source.track_flag_view(code, &continents(&["Oceania"]));
    }
    let exported = source.export_json().unwrap();

    let mut target = fresh();
    assert!(target.import_progress(&exported));
    assert_eq!(target.stats().viewed_flags.len(), 5);
    assert!(target.is_unlocked("oceania_explorer"));

    // Already-unlocked achievements are never re-announced
    target.track_flag_view("PNG", &continents(&["Oceania"]));
    assert!(target.notifications().all(|n| n.id() != "oceania_explorer"));
    assert!(target.notifications().all(|n| n.id() != "first_steps"));
}

#[test]
fn test_export_is_read_only() {
    let mut engine = fresh();
    engine.track_comparison();
    let before = engine.stats().clone();
    let pending = engine.pending_notifications();

    let payload = engine.export_payload();
    assert_eq!(payload.stats, before);
    assert_eq!(payload.unlocked_ids, vec!["first_comparison"]);
    assert_eq!(payload.version, "1.0");
    assert_eq!(engine.stats(), &before);
    assert_eq!(engine.pending_notifications(), pending);
}

#[test]
fn test_reset_restores_initial_state() {
    let mut engine = fresh();
    engine.track_flag_view("EGY", &continents(&["Africa"]));
    engine.track_quiz_result(10, 10, 12);
    engine.track_vexy_query();
    engine.reset_progress();

    assert_eq!(engine.stats(), &UserStatistics::new());
    assert!(engine.unlocked_ids().is_empty());
    assert!(!engine.store().contains("user_stats"));
    assert!(!engine.store().contains("unlocked_achievements"));

    // Thresholds crossed again announce again
    engine.pop_notification();
    while engine.current_notification().is_some() {
        engine.pop_notification();
    }
    engine.track_vexy_query();
    assert_eq!(queued_ids(&engine), vec!["vexy_hello"]);
}

#[test]
fn test_reset_keeps_pending_notifications_by_default() {
    let mut engine = fresh();
    engine.track_comparison();
    engine.reset_progress();
    assert_eq!(queued_ids(&engine), vec!["first_comparison"]);
}

#[test]
fn test_reset_can_clear_notifications() {
    let options = EngineOptions {
        clear_notifications_on_reset: true,
        ..EngineOptions::default()
    };
    let mut engine = ProgressEngine::init(MemoryStore::new(), options);
    engine.track_comparison();
    engine.reset_progress();
    assert_eq!(engine.pending_notifications(), 0);
}

#[test]
fn test_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut engine = ProgressEngine::init(FileStore::new(dir.path()), EngineOptions::default());
    engine.track_flag_view("JPN", &continents(&["Asia"]));
    engine.track_quiz_result(3, 3, 3);
    let stats = engine.stats().clone();
    let store = engine.teardown();

    let reopened = ProgressEngine::init(store, EngineOptions::default());
    assert_eq!(reopened.stats(), &stats);
    assert!(reopened.is_unlocked("first_steps"));
    assert!(reopened.is_unlocked("perfectionist"));
    // The queue is session state
    assert_eq!(reopened.pending_notifications(), 0);
    assert!(stats.last_updated > 0);
}

#[test]
fn test_restart_does_not_renotify() {
    let mut store = MemoryStore::new();
    store.insert("unlocked_achievements", r#"["first_steps"]"#);
    store.insert("user_stats", r#"{"viewedFlags":["FRA"],"totalXP":100}"#);

    let mut engine = ProgressEngine::init(store, EngineOptions::default());
    engine.track_flag_view("DEU", &[]);
    assert_eq!(engine.pending_notifications(), 0);
    assert_eq!(engine.stats().total_xp, 100);
}

#[test]
fn test_corrupted_storage_falls_back() {
    let mut store = MemoryStore::new();
    store.insert("user_stats", "{not json");
    store.insert("unlocked_achievements", r#"{"oops": true}"#);

    let engine = ProgressEngine::init(store, EngineOptions::default());
    assert_eq!(engine.stats(), &UserStatistics::new());
    assert!(engine.unlocked_ids().is_empty());
}

#[test]
fn test_custom_storage_keys() {
    let options = EngineOptions {
        stats_key: "stats_v2".to_string(),
        unlocked_key: "ids_v2".to_string(),
        ..EngineOptions::default()
    };
    let mut engine = ProgressEngine::init(MemoryStore::new(), options);
    engine.track_vexy_query();

    assert!(engine.store().contains("stats_v2"));
    assert!(engine.store().contains("ids_v2"));
    assert!(!engine.store().contains("user_stats"));
}

#[test]
fn test_persisted_layout() {
    let mut engine = fresh();
    engine.track_flag_view("FRA", &continents(&["Europe"]));

    let stats: serde_json::Value =
        serde_json::from_str(engine.store().get("user_stats").unwrap()).unwrap();
    assert_eq!(stats["viewedFlags"], serde_json::json!(["FRA"]));
    assert_eq!(stats["totalXP"], 100);

    let ids: Vec<String> =
        serde_json::from_str(engine.store().get("unlocked_achievements").unwrap()).unwrap();
    assert_eq!(ids, vec!["first_steps"]);
}

#[test]
fn test_apply_events() {
    let mut engine = fresh();
    let events = vec![
        ProgressEvent::FlagViewed {
            code: "CAN".to_string(),
            continents: continents(&["North America"]),
        },
        ProgressEvent::QuizCompleted { score: 6, total: 10, streak: 2 },
        ProgressEvent::FavoritesChanged { count: 1 },
        ProgressEvent::VexyQuery,
        ProgressEvent::ComparisonMade,
    ];
    for event in &events {
        engine.apply(event);
    }

    let stats = engine.stats();
    assert_eq!(stats.viewed_flags, vec!["CAN"]);
    assert_eq!(stats.quizzes_completed, 1);
    assert_eq!(stats.favorites_count, 1);
    assert_eq!(stats.vexy_queries, 1);
    assert_eq!(stats.comparisons_made, 1);
}

#[test]
fn test_achievement_listing() {
    let mut engine = fresh();
    assert_eq!(engine.achievements().len(), CATALOG.len());
    assert!(engine.achievements().iter().all(|a| !a.is_unlocked));

    engine.track_quiz_result(1, 2, 0);
    let quiz = engine.achievements_in(Category::Quiz);
    assert!(quiz.iter().all(|a| a.definition.category == Category::Quiz));
    assert!(quiz.iter().any(|a| a.id() == "quiz_rookie" && a.is_unlocked));

    let summary = engine.summary();
    assert_eq!(summary.unlocked, 1);
    assert_eq!(summary.total, CATALOG.len());
    assert!(summary.completion_percent > 0.0);
    assert_eq!(summary.achievement_xp, 50);
    assert_eq!(
        summary.total_achievement_xp,
        CATALOG.iter().map(|def| def.xp_reward).sum::<u64>()
    );
}

#[test]
fn test_summary_counts_only_catalog_rewards() {
    let mut engine = fresh();
    engine.track_flag_view("FRA", &[]);
    engine.track_comparison();
    engine.unlock_achievement("not_in_catalog");

    let summary = engine.summary();
    assert_eq!(summary.unlocked, 2);
    assert_eq!(summary.achievement_xp, 100 + 50);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["achievementXp"], 150);
    assert_eq!(json["bestRarity"], "common");
}
