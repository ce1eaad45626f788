//! Ledger error taxonomy.
//!
//! # Responsibility
//! - Distinguish recoverable user-input failures from persistence failures.
//!
//! # Invariants
//! - No error here is fatal: every failure path leaves the aggregate in its
//!   last-known-valid state.
//! - Persistence failures never surface through mutation APIs; they are
//!   logged and the in-memory aggregate stays authoritative.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::task::TaskId;

/// Bad user input. Reported to the caller with state unchanged; recoverable
/// by re-prompting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Birth date string did not parse as an ISO calendar date.
    InvalidBirthDate(String),
    /// Birth date lies in the future.
    FutureBirthDate,
    /// Birth date implies an age outside the accepted range.
    AgeOutOfRange { age: i32, min: u32, max: u32 },
    /// Setup already ran; destructive re-setup must go through `reset`.
    AlreadyInitialized,
    /// Task title is empty or whitespace-only.
    EmptyTitle,
    /// Category string is not a member of the fixed set.
    UnknownCategory(String),
    /// Importance string is not a recognized tier.
    UnknownImportance(String),
    /// No task with this ID exists.
    UnknownTask(TaskId),
    /// Waste amount normalized to zero.
    ZeroWasteAmount,
    /// Free-form waste amount outside the configured bounds.
    WasteOutOfBounds { amount: u64, min: u64, max: u64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBirthDate(value) => {
                write!(f, "birth date `{value}` is not a valid ISO date")
            }
            Self::FutureBirthDate => write!(f, "birth date lies in the future"),
            Self::AgeOutOfRange { age, min, max } => {
                write!(f, "age {age} is outside the accepted range {min}..={max}")
            }
            Self::AlreadyInitialized => {
                write!(f, "setup already ran; use reset before re-initializing")
            }
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::UnknownCategory(value) => write!(f, "unknown task category `{value}`"),
            Self::UnknownImportance(value) => write!(f, "unknown importance tier `{value}`"),
            Self::UnknownTask(id) => write!(f, "task not found: {id}"),
            Self::ZeroWasteAmount => write!(f, "waste amount must be non-zero"),
            Self::WasteOutOfBounds { amount, min, max } => {
                write!(f, "waste amount {amount} is outside bounds {min}..={max}")
            }
        }
    }
}

impl Error for ValidationError {}

/// Storage read/write failure. Non-fatal: surfaced as a notice, never a
/// crash, and never rolls back in-memory progress.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Serde(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Serde(err) => write!(f, "invalid stored state: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Serde(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
