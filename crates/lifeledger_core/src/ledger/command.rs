//! Intent-to-operation dispatch.
//!
//! # Responsibility
//! - Map view-layer intents onto ledger operations through one entry point,
//!   keeping the ledger free of any UI-framework dependency.
//!
//! # Invariants
//! - Dispatch adds no semantics: each intent calls exactly one ledger
//!   operation and reports its outcome unchanged.

use chrono::NaiveDate;

use super::{Completion, Ledger, NewTask, WasteSource};
use crate::error::ValidationError;
use crate::ledger::summary::DailySummary;
use crate::model::task::TaskId;
use crate::store::StateStore;

/// A view-layer intent addressed to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Initialize {
        birth_date: String,
        name: String,
        today: NaiveDate,
    },
    AddTask(NewTask),
    CompleteTask(TaskId),
    DeleteTask(TaskId),
    RecordWaste {
        amount: i64,
        source: WasteSource,
    },
    Tick,
    ReconcileAbsence {
        last_active_ms: i64,
        now_ms: i64,
    },
    RolloverIfNewDay(NaiveDate),
    Summary,
    RecordFocusSession,
    SetFocusActive(bool),
    SetDarkMode(bool),
    Touch(i64),
    Reset,
}

/// What a dispatched command did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Initialized { initial_capital: u64 },
    TaskAdded(TaskId),
    TaskCompleted(Completion),
    TaskDeleted,
    WasteRecorded(u64),
    Ticked,
    AbsenceReconciled { deducted: u64 },
    RolledOver(bool),
    Summarized(DailySummary),
    FocusSessionRecorded,
    FocusActiveSet(bool),
    DarkModeSet(bool),
    Touched,
    ResetDone,
}

/// Applies one intent to the ledger.
pub fn dispatch<S: StateStore>(
    ledger: &mut Ledger<S>,
    command: Command,
) -> Result<CommandOutcome, ValidationError> {
    match command {
        Command::Initialize {
            birth_date,
            name,
            today,
        } => {
            let initial_capital = ledger.initialize(&birth_date, &name, today)?;
            Ok(CommandOutcome::Initialized { initial_capital })
        }
        Command::AddTask(request) => Ok(CommandOutcome::TaskAdded(ledger.add_task(request)?)),
        Command::CompleteTask(id) => {
            Ok(CommandOutcome::TaskCompleted(ledger.complete_task(id)?))
        }
        Command::DeleteTask(id) => {
            ledger.delete_task(id)?;
            Ok(CommandOutcome::TaskDeleted)
        }
        Command::RecordWaste { amount, source } => Ok(CommandOutcome::WasteRecorded(
            ledger.record_waste(amount, source)?,
        )),
        Command::Tick => {
            ledger.tick();
            Ok(CommandOutcome::Ticked)
        }
        Command::ReconcileAbsence {
            last_active_ms,
            now_ms,
        } => {
            let deducted = ledger.reconcile_absence(last_active_ms, now_ms);
            ledger.touch(now_ms);
            Ok(CommandOutcome::AbsenceReconciled { deducted })
        }
        Command::RolloverIfNewDay(today) => {
            Ok(CommandOutcome::RolledOver(ledger.rollover_if_new_day(today)))
        }
        Command::Summary => Ok(CommandOutcome::Summarized(ledger.daily_summary())),
        Command::RecordFocusSession => {
            ledger.record_focus_session();
            Ok(CommandOutcome::FocusSessionRecorded)
        }
        Command::SetFocusActive(active) => {
            ledger.set_focus_active(active);
            Ok(CommandOutcome::FocusActiveSet(active))
        }
        Command::SetDarkMode(on) => {
            ledger.set_dark_mode(on);
            Ok(CommandOutcome::DarkModeSet(on))
        }
        Command::Touch(now_ms) => {
            ledger.touch(now_ms);
            Ok(CommandOutcome::Touched)
        }
        Command::Reset => {
            ledger.reset();
            Ok(CommandOutcome::ResetDone)
        }
    }
}
