//! Domain model for the LifeLedger aggregate.
//!
//! # Responsibility
//! - Define the canonical data structures owned by the ledger.
//! - Keep one serialized shape for the whole user aggregate.
//!
//! # Invariants
//! - `current_money` is never negative (unsigned by construction; all
//!   deductions go through clamped subtraction in the ledger).
//! - Every task is identified by a stable `TaskId`.
//! - `DailyStats` never stores its net; it is always derived.

pub mod state;
pub mod task;
