use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;
use lifeledger_core::db::open_db_in_memory;
use lifeledger_core::{DecayScheduler, Ledger, LedgerConfig, SqliteStateStore, UserState};

fn shared_ledger(money: u64) -> Arc<Mutex<Ledger<SqliteStateStore>>> {
    let conn = open_db_in_memory().unwrap();
    let state = UserState {
        birth_date: NaiveDate::from_ymd_opt(1996, 6, 15),
        age: 30,
        initial_capital: money,
        current_money: money,
        ..UserState::default()
    };
    Arc::new(Mutex::new(Ledger::with_state(
        SqliteStateStore::new(conn),
        LedgerConfig::default(),
        state,
    )))
}

#[test]
fn scheduler_drives_decay_ticks() {
    let ledger = shared_ledger(1_000);
    let mut scheduler = DecayScheduler::new();

    scheduler.start(Arc::clone(&ledger), Duration::from_millis(10));
    assert!(scheduler.is_running());
    thread::sleep(Duration::from_millis(120));
    scheduler.stop();
    assert!(!scheduler.is_running());

    let guard = ledger.lock().unwrap();
    let deducted = guard.today_stats().auto_deducted;
    assert!(deducted >= 1, "expected at least one tick, got {deducted}");
    assert_eq!(guard.current_money(), 1_000 - deducted);
}

#[test]
fn no_tick_fires_after_stop() {
    let ledger = shared_ledger(1_000);
    let mut scheduler = DecayScheduler::new();

    scheduler.start(Arc::clone(&ledger), Duration::from_millis(10));
    thread::sleep(Duration::from_millis(50));
    scheduler.stop();

    let observed = ledger.lock().unwrap().today_stats().auto_deducted;
    thread::sleep(Duration::from_millis(60));
    assert_eq!(ledger.lock().unwrap().today_stats().auto_deducted, observed);
}

#[test]
fn restarting_replaces_the_prior_timer() {
    let ledger = shared_ledger(1_000);
    let mut scheduler = DecayScheduler::new();

    // A second start must not leave two competing timers behind: with a
    // long first interval and a restart, only the replacement fires.
    scheduler.start(Arc::clone(&ledger), Duration::from_secs(3600));
    scheduler.start(Arc::clone(&ledger), Duration::from_millis(10));
    thread::sleep(Duration::from_millis(100));
    scheduler.stop();

    let deducted = ledger.lock().unwrap().today_stats().auto_deducted;
    assert!(deducted >= 1);
}

#[test]
fn focus_suppression_holds_under_the_scheduler() {
    let ledger = shared_ledger(1_000);
    ledger.lock().unwrap().set_focus_active(true);

    let mut scheduler = DecayScheduler::new();
    scheduler.start(Arc::clone(&ledger), Duration::from_millis(10));
    thread::sleep(Duration::from_millis(80));
    scheduler.stop();

    let guard = ledger.lock().unwrap();
    assert_eq!(guard.current_money(), 1_000);
    assert_eq!(guard.today_stats().auto_deducted, 0);
}

#[test]
fn dropping_the_scheduler_stops_the_timer() {
    let ledger = shared_ledger(1_000);
    {
        let mut scheduler = DecayScheduler::new();
        scheduler.start(Arc::clone(&ledger), Duration::from_millis(10));
        thread::sleep(Duration::from_millis(30));
    }
    let observed = ledger.lock().unwrap().today_stats().auto_deducted;
    thread::sleep(Duration::from_millis(60));
    assert_eq!(ledger.lock().unwrap().today_stats().auto_deducted, observed);
}
