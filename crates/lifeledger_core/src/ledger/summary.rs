//! Daily summary projection.
//!
//! # Responsibility
//! - Package today's counters with the derived net and its tone
//!   classification for the view layer.
//!
//! # Invariants
//! - `net` is recomputed from the counters on every derivation; it is never
//!   stored independently of its components.

use serde::{Deserialize, Serialize};

/// Qualitative classification of a day's net outcome.
///
/// Selects which canned message category the view displays; the message
/// text itself is a view concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    /// Net strictly positive.
    Positive,
    /// Net at or below zero but above the very-negative threshold.
    Negative,
    /// Net below the configured threshold.
    VeryNegative,
}

/// Read-only snapshot of today's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub tasks_completed: u64,
    pub earned: u64,
    pub wasted: u64,
    pub auto_deducted: u64,
    pub focus_sessions: u64,
    /// `earned - wasted - auto_deducted`.
    pub net: i64,
    pub tone: Tone,
}
