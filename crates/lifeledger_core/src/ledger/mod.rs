//! The wallet/task/daily-stats state machine.
//!
//! # Responsibility
//! - Own every money-affecting mutation: setup, decay, absence
//!   reconciliation, task lifecycle, waste recording, daily rollover.
//! - Write each mutation through to the state store.
//!
//! # Invariants
//! - `current_money` never goes negative; deductions clamp at zero.
//! - Task completion credits wallet and daily stats exactly once.
//! - Daily counters reset atomically when the calendar date advances.
//! - A persistence failure never crashes an operation or discards the
//!   in-memory mutation that preceded it.

pub mod command;
pub mod focus;
pub mod summary;

use chrono::{Datelike, NaiveDate};
use log::{debug, error, info};

use crate::config::LedgerConfig;
use crate::error::ValidationError;
use crate::model::state::{DailyStats, UserState};
use crate::model::task::{Importance, Task, TaskCategory, TaskId};
use crate::store::StateStore;

use summary::{DailySummary, Tone};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Request model for adding a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub category: TaskCategory,
    pub importance: Importance,
    /// Optional free-text description.
    pub desc: String,
    /// Overrides the importance-tier default when strictly positive.
    pub custom_reward: Option<u64>,
    /// Creation time in epoch milliseconds, when the caller has a clock.
    pub created_at: Option<i64>,
}

impl NewTask {
    /// Convenience constructor with tier-default reward and empty description.
    pub fn new(title: impl Into<String>, category: TaskCategory, importance: Importance) -> Self {
        Self {
            title: title.into(),
            category,
            importance,
            desc: String::new(),
            custom_reward: None,
            created_at: None,
        }
    }
}

/// Outcome of a task completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The reward credited to wallet and daily stats.
    Credited(u64),
    /// Task was already done; nothing changed.
    AlreadyDone,
}

/// Where a waste amount came from. Presets bypass the free-form bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WasteSource {
    Preset,
    Custom,
}

/// The ledger: exclusive owner of the user aggregate.
///
/// All mutation methods are synchronous and complete before returning.
/// Callers hosting concurrent timers must serialize access (e.g. behind a
/// mutex, as [`DecayScheduler`](crate::scheduler::DecayScheduler) does).
pub struct Ledger<S: StateStore> {
    state: UserState,
    config: LedgerConfig,
    store: S,
    focus_active: bool,
}

impl<S: StateStore> Ledger<S> {
    /// Loads the persisted aggregate, falling back to defaults when storage
    /// is empty, unreadable, or malformed.
    pub fn load_or_default(store: S, config: LedgerConfig) -> Self {
        let state = match store.load() {
            Ok(Some(state)) => state,
            Ok(None) => UserState::default(),
            Err(err) => {
                error!("event=state_load module=ledger status=error error={err}");
                UserState::default()
            }
        };

        Self {
            state,
            config,
            store,
            focus_active: false,
        }
    }

    /// Creates a ledger over an explicit aggregate. Test seam.
    pub fn with_state(store: S, config: LedgerConfig, state: UserState) -> Self {
        Self {
            state,
            config,
            store,
            focus_active: false,
        }
    }

    // --- setup -----------------------------------------------------------

    /// One-time setup: records the profile and funds the wallet.
    ///
    /// `birth_date` must be an ISO calendar date no later than `today`,
    /// implying an age within the configured range. Initial capital is
    /// `max(horizon_age - age, floor_years) years x 365 x 24 x rate_per_hour`
    /// and the wallet starts at that capital.
    ///
    /// Re-running setup on an initialized ledger is rejected; destructive
    /// re-setup goes through [`Ledger::reset`] first.
    ///
    /// Returns the initial capital on success.
    pub fn initialize(
        &mut self,
        birth_date: &str,
        name: &str,
        today: NaiveDate,
    ) -> Result<u64, ValidationError> {
        if self.state.is_initialized() {
            return Err(ValidationError::AlreadyInitialized);
        }

        let birth = birth_date
            .trim()
            .parse::<NaiveDate>()
            .map_err(|_| ValidationError::InvalidBirthDate(birth_date.to_string()))?;
        if birth > today {
            return Err(ValidationError::FutureBirthDate);
        }

        let age = age_on(birth, today);
        if age < 0 || (age as u32) < self.config.min_age || (age as u32) > self.config.max_age {
            return Err(ValidationError::AgeOutOfRange {
                age,
                min: self.config.min_age,
                max: self.config.max_age,
            });
        }

        let age = age as u32;
        let initial_capital = self.config.initial_capital(age);

        self.state.name = name.trim().to_string();
        self.state.birth_date = Some(birth);
        self.state.age = age;
        self.state.initial_capital = initial_capital;
        self.state.current_money = initial_capital;
        self.state.today_stats.reset_for(today);
        self.persist();

        info!(
            "event=ledger_setup module=ledger status=ok age={age} initial_capital={initial_capital}"
        );
        Ok(initial_capital)
    }

    /// Clears the aggregate and both storage keys.
    ///
    /// The explicit gate for destructive re-setup; `initialize` alone never
    /// overwrites an existing profile.
    pub fn reset(&mut self) {
        self.state = UserState::default();
        self.focus_active = false;
        if let Err(err) = self.store.clear() {
            error!("event=reset module=ledger status=error error={err}");
        } else {
            info!("event=reset module=ledger status=ok");
        }
    }

    // --- decay -----------------------------------------------------------

    /// One scheduled decay step: deduct one decay unit, clamped at zero.
    ///
    /// No-op while the focus flag is set (the schedule keeps firing; the
    /// policy check lives here) and once the wallet is empty, so stats never
    /// inflate past bankruptcy.
    pub fn tick(&mut self) {
        if self.focus_active || self.state.current_money == 0 {
            return;
        }

        let deduction = self.config.decay_per_tick.min(self.state.current_money);
        self.state.current_money -= deduction;
        self.state.today_stats.auto_deducted += deduction;
        self.persist();

        debug!(
            "event=tick module=ledger status=ok deducted={deduction} balance={}",
            self.state.current_money
        );
        if self.state.current_money == 0 {
            info!("event=bankrupt module=ledger status=ok");
        }
    }

    /// Batched decay for time spent away from the scheduler.
    ///
    /// Deducts one unit per whole minute between `last_active_ms` and
    /// `now_ms`, clamped to the available balance, as a single
    /// `auto_deducted` increment. Returns the applied deduction.
    ///
    /// Not idempotent: the caller must advance the stored last-active
    /// timestamp to `now_ms` after this call (see [`Ledger::touch`]).
    pub fn reconcile_absence(&mut self, last_active_ms: i64, now_ms: i64) -> u64 {
        let minutes_away = (now_ms - last_active_ms) / MILLIS_PER_MINUTE;
        if minutes_away <= 0 || self.state.current_money == 0 {
            return 0;
        }

        let deduction = (minutes_away as u64).min(self.state.current_money);
        self.state.current_money -= deduction;
        self.state.today_stats.auto_deducted += deduction;
        self.persist();

        info!(
            "event=absence_reconciled module=ledger status=ok minutes_away={minutes_away} deducted={deduction}"
        );
        deduction
    }

    /// Whether an absence of `minutes_away` warrants a caller-side notice.
    pub fn absence_warrants_notice(&self, minutes_away: u64) -> bool {
        minutes_away > self.config.absence_notice_minutes
    }

    // --- task lifecycle --------------------------------------------------

    /// Adds a pending task. No wallet effect.
    ///
    /// The reward is the custom value when strictly positive, otherwise the
    /// importance-tier default.
    pub fn add_task(&mut self, request: NewTask) -> Result<TaskId, ValidationError> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let reward = match request.custom_reward {
            Some(custom) if custom > 0 => custom,
            _ => self.config.reward_for(request.importance),
        };

        let mut task = Task::new(title, request.category, request.importance, reward);
        task.desc = request.desc.trim().to_string();
        task.created_at = request.created_at;
        let id = task.id;

        self.state.tasks.push(task);
        self.persist();

        info!("event=task_added module=ledger status=ok task_id={id} reward={reward}");
        Ok(id)
    }

    /// Marks a task done and credits its reward exactly once.
    ///
    /// The done transition is one-way; repeating the request returns
    /// [`Completion::AlreadyDone`] without touching wallet or stats.
    pub fn complete_task(&mut self, id: TaskId) -> Result<Completion, ValidationError> {
        let task = self
            .state
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(ValidationError::UnknownTask(id))?;

        if task.is_done {
            return Ok(Completion::AlreadyDone);
        }

        task.is_done = true;
        let reward = task.reward;
        // Crediting is unclamped upward; only deductions clamp.
        self.state.current_money += reward;
        self.state.today_stats.earned += reward;
        self.state.today_stats.tasks_completed += 1;
        self.persist();

        info!("event=task_completed module=ledger status=ok task_id={id} credited={reward}");
        Ok(Completion::Credited(reward))
    }

    /// Removes a task. No wallet or stat side effects, done or not.
    pub fn delete_task(&mut self, id: TaskId) -> Result<(), ValidationError> {
        let before = self.state.tasks.len();
        self.state.tasks.retain(|task| task.id != id);
        if self.state.tasks.len() == before {
            return Err(ValidationError::UnknownTask(id));
        }

        self.persist();
        info!("event=task_deleted module=ledger status=ok task_id={id}");
        Ok(())
    }

    // --- waste recording -------------------------------------------------

    /// Records a waste penalty.
    ///
    /// Negative inputs are normalized by absolute value; zero is rejected.
    /// Free-form (`Custom`) amounts must fall within the configured bounds;
    /// presets bypass them. The full requested amount lands in `wasted` even
    /// when the wallet can only cover part of it. Returns the recorded
    /// amount (the request, not the clamped wallet delta).
    pub fn record_waste(
        &mut self,
        amount: i64,
        source: WasteSource,
    ) -> Result<u64, ValidationError> {
        let amount = amount.unsigned_abs();
        if amount == 0 {
            return Err(ValidationError::ZeroWasteAmount);
        }

        if source == WasteSource::Custom {
            if let Some(bounds) = self.config.custom_waste_bounds {
                if amount < bounds.min || amount > bounds.max {
                    return Err(ValidationError::WasteOutOfBounds {
                        amount,
                        min: bounds.min,
                        max: bounds.max,
                    });
                }
            }
        }

        self.state.today_stats.wasted += amount;
        self.state.current_money = self.state.current_money.saturating_sub(amount);
        self.persist();

        info!(
            "event=waste_recorded module=ledger status=ok amount={amount} balance={}",
            self.state.current_money
        );
        Ok(amount)
    }

    // --- daily rollover and summary --------------------------------------

    /// Zeroes the daily counters when the calendar date advanced.
    ///
    /// Caller contract: run this before any stat read or write in a newly
    /// loaded or foregrounded session, so stale prior-day numbers are never
    /// displayed or added to. Returns whether a rollover occurred.
    pub fn rollover_if_new_day(&mut self, today: NaiveDate) -> bool {
        if self.state.today_stats.last_reset_date == Some(today) {
            return false;
        }

        self.state.today_stats.reset_for(today);
        self.persist();
        info!("event=daily_rollover module=ledger status=ok date={today}");
        true
    }

    /// Derives today's summary. Net is recomputed from the counters; tone
    /// follows the configured threshold.
    pub fn daily_summary(&self) -> DailySummary {
        let stats = &self.state.today_stats;
        let net = stats.net();
        let tone = if net > 0 {
            Tone::Positive
        } else if net < self.config.very_negative_net {
            Tone::VeryNegative
        } else {
            Tone::Negative
        };

        DailySummary {
            tasks_completed: stats.tasks_completed,
            earned: stats.earned,
            wasted: stats.wasted,
            auto_deducted: stats.auto_deducted,
            focus_sessions: stats.focus_sessions,
            net,
            tone,
        }
    }

    // --- focus -----------------------------------------------------------

    /// Sets the focus-suppression flag consulted by [`Ledger::tick`].
    pub fn set_focus_active(&mut self, active: bool) {
        self.focus_active = active;
    }

    pub fn focus_active(&self) -> bool {
        self.focus_active
    }

    /// Credits one completed focus (work) interval to today's stats.
    pub fn record_focus_session(&mut self) {
        self.state.today_stats.focus_sessions += 1;
        self.persist();
        info!(
            "event=focus_session module=ledger status=ok total={}",
            self.state.today_stats.focus_sessions
        );
    }

    // --- preferences -----------------------------------------------------

    /// Persists the dark-mode preference. No ledger semantics.
    pub fn set_dark_mode(&mut self, on: bool) {
        self.state.preferences.dark_mode = on;
        self.persist();
    }

    // --- last-active bookkeeping -----------------------------------------

    /// Stamps the last-active timestamp. Call after each
    /// [`Ledger::reconcile_absence`] and on foreground activity.
    pub fn touch(&mut self, now_ms: i64) {
        if let Err(err) = self.store.save_last_active(now_ms) {
            error!("event=persist_failed module=ledger status=error key=last_active error={err}");
        }
    }

    /// Reads the stored last-active timestamp, if any.
    pub fn last_active_ms(&self) -> Option<i64> {
        match self.store.load_last_active() {
            Ok(value) => value,
            Err(err) => {
                error!("event=last_active_load module=ledger status=error error={err}");
                None
            }
        }
    }

    // --- projections -----------------------------------------------------

    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    pub fn current_money(&self) -> u64 {
        self.state.current_money
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn today_stats(&self) -> &DailyStats {
        &self.state.today_stats
    }

    pub fn state(&self) -> &UserState {
        &self.state
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // --- persistence -----------------------------------------------------

    /// Write-through after a mutation. A failure is logged and swallowed:
    /// the in-memory aggregate stays authoritative for the session.
    fn persist(&self) {
        if let Err(err) = self.store.save(&self.state) {
            error!("event=persist_failed module=ledger status=error key=state error={err}");
        }
    }
}

/// Whole years between `birth` and `today`, adjusted by month/day comparison
/// so a birthday later in the year does not count an extra year.
fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}
