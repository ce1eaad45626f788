//! Task domain model.
//!
//! # Responsibility
//! - Define the task record and its category/importance enums.
//! - Keep wire naming compatible with the persisted aggregate layout.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `is_done` is a one-way false-to-true transition, driven by the ledger.
//! - `reward` is strictly positive.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Fixed category set for tasks.
///
/// Wire names keep the display strings used by the persisted layout,
/// including the space in `Skill Learning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskCategory {
    Study,
    Exercise,
    Reading,
    #[serde(rename = "Skill Learning")]
    SkillLearning,
    Other,
}

impl TaskCategory {
    /// Parses a category from its wire/display name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Study" => Some(Self::Study),
            "Exercise" => Some(Self::Exercise),
            "Reading" => Some(Self::Reading),
            "Skill Learning" => Some(Self::SkillLearning),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Returns the wire/display name for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Study => "Study",
            Self::Exercise => "Exercise",
            Self::Reading => "Reading",
            Self::SkillLearning => "Skill Learning",
            Self::Other => "Other",
        }
    }
}

/// Importance tier of a task. Each tier maps to a default reward in
/// [`LedgerConfig`](crate::config::LedgerConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Medium,
    High,
}

impl Importance {
    /// Parses an importance tier from its wire name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Returns the wire name for this tier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A unit of work the user self-reports as completed.
///
/// Completion crediting is owned by the ledger; this record only carries
/// the data. Deleting a task has no wallet or stat side effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable ID used for completion and deletion references.
    #[serde(default = "new_task_id")]
    pub id: TaskId,
    pub title: String,
    pub category: TaskCategory,
    pub importance: Importance,
    /// Optional free-text description; empty string when absent.
    #[serde(default)]
    pub desc: String,
    /// Reward credited exactly once on completion. Strictly positive.
    pub reward: u64,
    pub is_done: bool,
    /// Creation time in epoch milliseconds, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

fn new_task_id() -> TaskId {
    Uuid::new_v4()
}

impl Task {
    /// Creates a new pending task with a generated stable ID.
    pub fn new(
        title: impl Into<String>,
        category: TaskCategory,
        importance: Importance,
        reward: u64,
    ) -> Self {
        Self {
            id: new_task_id(),
            title: title.into(),
            category,
            importance,
            desc: String::new(),
            reward,
            is_done: false,
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Importance, TaskCategory};

    #[test]
    fn category_parse_roundtrips_wire_names() {
        for name in ["Study", "Exercise", "Reading", "Skill Learning", "Other"] {
            let category = TaskCategory::parse(name).expect("known category");
            assert_eq!(category.as_str(), name);
        }
        assert!(TaskCategory::parse("Cooking").is_none());
    }

    #[test]
    fn importance_parse_roundtrips_wire_names() {
        for name in ["low", "medium", "high"] {
            let tier = Importance::parse(name).expect("known tier");
            assert_eq!(tier.as_str(), name);
        }
        assert!(Importance::parse("urgent").is_none());
        assert!(Importance::parse("High").is_none());
    }
}
