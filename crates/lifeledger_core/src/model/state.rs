//! User aggregate and daily accumulators.
//!
//! # Responsibility
//! - Define the single persisted aggregate (`UserState`) and its parts.
//! - Keep the serialized layout stable (camelCase keys, ISO dates).
//!
//! # Invariants
//! - The aggregate is persisted as one serialized unit under one key.
//! - `DailyStats::net` is always recomputed from its components.
//! - Stats reset happens atomically when the calendar date advances.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::task::Task;

/// Same-day accumulator for the daily summary.
///
/// Unknown or missing fields in stored data fall back to zero so an older
/// stored record still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyStats {
    /// Sum of rewards credited by task completion today.
    pub earned: u64,
    /// Sum of waste penalties recorded today. May exceed what the wallet
    /// could actually cover; scorekeeping records the full requested amount.
    pub wasted: u64,
    /// Sum of decay and absence deductions applied today.
    pub auto_deducted: u64,
    /// Count of tasks completed today.
    pub tasks_completed: u64,
    /// Count of completed focus (pomodoro work) intervals today.
    pub focus_sessions: u64,
    /// Calendar date these counters belong to. `None` before the first
    /// rollover of a fresh aggregate.
    pub last_reset_date: Option<NaiveDate>,
}

impl DailyStats {
    /// Net outcome for the day: `earned - wasted - auto_deducted`.
    ///
    /// Always derived; never stored alongside the components.
    pub fn net(&self) -> i64 {
        self.earned as i64 - self.wasted as i64 - self.auto_deducted as i64
    }

    /// Zeroes every counter and stamps the new owning date.
    pub fn reset_for(&mut self, today: NaiveDate) {
        *self = Self {
            last_reset_date: Some(today),
            ..Self::default()
        };
    }
}

/// User-facing toggles that survive reloads but carry no ledger semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub dark_mode: bool,
}

/// The whole persisted aggregate: profile, wallet, tasks and daily stats.
///
/// Exclusively owned and mutated by the [`Ledger`](crate::ledger::Ledger);
/// persisted as a single serialized unit under one storage key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserState {
    /// Optional display name.
    pub name: String,
    /// Immutable once set by setup; `None` until setup ran.
    pub birth_date: Option<NaiveDate>,
    /// Whole years at setup time, adjusted by month/day comparison.
    pub age: u32,
    /// Wallet starting balance computed from age at setup.
    pub initial_capital: u64,
    /// Current wallet balance. Unsigned: clamped subtraction only.
    pub current_money: u64,
    pub tasks: Vec<Task>,
    pub today_stats: DailyStats,
    pub preferences: Preferences,
}

impl UserState {
    /// Whether setup has completed for this aggregate.
    pub fn is_initialized(&self) -> bool {
        self.birth_date.is_some()
    }
}
