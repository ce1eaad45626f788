use chrono::NaiveDate;
use lifeledger_core::db::{open_db, open_db_in_memory};
use lifeledger_core::{
    Importance, SqliteStateStore, StateStore, Task, TaskCategory, UserState,
};
use rusqlite::Connection;

fn sample_state() -> UserState {
    let mut task = Task::new("write tests", TaskCategory::Study, Importance::High, 3750);
    task.desc = "integration coverage".to_string();
    task.created_at = Some(1_756_000_000_000);

    UserState {
        name: "Acry".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1996, 6, 15),
        age: 30,
        initial_capital: 52_560_000,
        current_money: 52_559_000,
        tasks: vec![task],
        today_stats: lifeledger_core::DailyStats {
            earned: 3750,
            wasted: 200,
            auto_deducted: 45,
            tasks_completed: 1,
            focus_sessions: 2,
            last_reset_date: NaiveDate::from_ymd_opt(2026, 8, 25),
        },
        preferences: lifeledger_core::Preferences { dark_mode: true },
    }
}

#[test]
fn save_and_load_roundtrips_the_aggregate() {
    let store = SqliteStateStore::new(open_db_in_memory().unwrap());
    let state = sample_state();

    store.save(&state).unwrap();
    let loaded = store.load().unwrap().expect("state should be present");
    assert_eq!(loaded, state);
}

#[test]
fn persisted_record_uses_the_camel_case_wire_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");

    let store = SqliteStateStore::new(open_db(&path).unwrap());
    store.save(&sample_state()).unwrap();
    store.save_last_active(1_756_000_000_000).unwrap();
    drop(store);

    let conn = Connection::open(&path).unwrap();
    let raw: String = conn
        .query_row(
            "SELECT value FROM kv WHERE key = 'lifeLedgerState';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(doc["birthDate"], "1996-06-15");
    assert_eq!(doc["initialCapital"], 52_560_000);
    assert_eq!(doc["currentMoney"], 52_559_000);
    assert_eq!(doc["todayStats"]["autoDeducted"], 45);
    assert_eq!(doc["todayStats"]["tasksCompleted"], 1);
    assert_eq!(doc["todayStats"]["focusSessions"], 2);
    assert_eq!(doc["todayStats"]["lastResetDate"], "2026-08-25");
    assert_eq!(doc["preferences"]["darkMode"], true);
    assert_eq!(doc["tasks"][0]["isDone"], false);
    assert_eq!(doc["tasks"][0]["createdAt"], 1_756_000_000_000i64);
    assert_eq!(doc["tasks"][0]["category"], "Study");
    assert_eq!(doc["tasks"][0]["importance"], "high");

    // The last-active key is stored as a plain string, not JSON.
    let raw_ts: String = conn
        .query_row(
            "SELECT value FROM kv WHERE key = 'lastActiveTime';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(raw_ts, "1756000000000");
}

#[test]
fn partial_stored_record_falls_back_to_field_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.db");

    // An older record missing newer fields still loads.
    seed_raw(&path, "lifeLedgerState", r#"{"name":"old","currentMoney":42}"#);

    let store = SqliteStateStore::new(open_db(&path).unwrap());
    let loaded = store.load().unwrap().expect("partial state should load");
    assert_eq!(loaded.name, "old");
    assert_eq!(loaded.current_money, 42);
    assert!(loaded.birth_date.is_none());
    assert!(loaded.tasks.is_empty());
}

#[test]
fn malformed_state_is_dropped_and_reported_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.db");
    seed_raw(&path, "lifeLedgerState", "{not json");

    let store = SqliteStateStore::new(open_db(&path).unwrap());
    assert!(store.load().unwrap().is_none());
    drop(store);

    // The corrupt row was removed on first load.
    let conn = Connection::open(&path).unwrap();
    let rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM kv WHERE key = 'lifeLedgerState';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn malformed_last_active_is_dropped_and_reported_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("badts.db");
    seed_raw(&path, "lastActiveTime", "yesterday");

    let store = SqliteStateStore::new(open_db(&path).unwrap());
    assert!(store.load_last_active().unwrap().is_none());
    assert!(store.load_last_active().unwrap().is_none());
}

#[test]
fn last_active_roundtrips() {
    let store = SqliteStateStore::new(open_db_in_memory().unwrap());
    assert!(store.load_last_active().unwrap().is_none());

    store.save_last_active(1_756_000_123_456).unwrap();
    assert_eq!(store.load_last_active().unwrap(), Some(1_756_000_123_456));

    store.save_last_active(1_756_000_200_000).unwrap();
    assert_eq!(store.load_last_active().unwrap(), Some(1_756_000_200_000));
}

#[test]
fn clear_removes_both_keys() {
    let store = SqliteStateStore::new(open_db_in_memory().unwrap());
    store.save(&sample_state()).unwrap();
    store.save_last_active(1).unwrap();

    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());
    assert!(store.load_last_active().unwrap().is_none());
}

// Plants a raw kv row through a separate connection, bypassing the store's
// serialization path.
fn seed_raw(path: &std::path::Path, key: &str, raw: &str) {
    // Bootstrap the schema first, then write through a plain connection.
    drop(open_db(path).unwrap());
    let conn = Connection::open(path).unwrap();
    conn.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2);",
        rusqlite::params![key, raw],
    )
    .unwrap();
}
