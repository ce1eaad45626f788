//! Core domain logic for LifeLedger.
//! This crate is the single source of truth for wallet and daily-stat
//! invariants; views, timers and dialogs live outside it.

pub mod config;
pub mod db;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod scheduler;
pub mod store;

pub use config::{LedgerConfig, WasteBounds, WastePreset};
pub use error::{StoreError, StoreResult, ValidationError};
pub use ledger::command::{dispatch, Command, CommandOutcome};
pub use ledger::focus::{FocusPhase, FocusTimer, PhaseEnd};
pub use ledger::summary::{DailySummary, Tone};
pub use ledger::{Completion, Ledger, NewTask, WasteSource};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::state::{DailyStats, Preferences, UserState};
pub use model::task::{Importance, Task, TaskCategory, TaskId};
pub use scheduler::DecayScheduler;
pub use store::{SqliteStateStore, StateStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
