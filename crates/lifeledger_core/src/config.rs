//! Tunable ledger constants.
//!
//! # Responsibility
//! - Carry every reward/penalty/tone constant as configuration rather than
//!   hardcoded logic, so behavior is tunable without touching the state
//!   machine.
//!
//! # Invariants
//! - Defaults match the shipped product values; changing them never changes
//!   state-machine semantics, only magnitudes and thresholds.

use serde::{Deserialize, Serialize};

use crate::model::task::Importance;

/// A quick-waste button definition: a label plus its fixed penalty.
///
/// Preset penalties bypass the free-form waste bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WastePreset {
    pub label: String,
    pub penalty: u64,
}

/// Inclusive bounds applied to free-form waste amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasteBounds {
    pub min: u64,
    pub max: u64,
}

/// All tunable constants consumed by the ledger state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Default reward for a low-importance task.
    pub reward_low: u64,
    /// Default reward for a medium-importance task.
    pub reward_medium: u64,
    /// Default reward for a high-importance task.
    pub reward_high: u64,
    /// Quick-waste button definitions.
    pub waste_presets: Vec<WastePreset>,
    /// Bounds for free-form waste entries; `None` disables bounding.
    /// Presets always bypass this.
    pub custom_waste_bounds: Option<WasteBounds>,
    /// Age at which the remaining-runway calculation bottoms out.
    pub horizon_age: u32,
    /// Minimum years of runway granted regardless of age.
    pub floor_years: u32,
    /// Capital units credited per remaining hour of runway.
    pub rate_per_hour: u64,
    /// Youngest accepted age at setup.
    pub min_age: u32,
    /// Oldest accepted age at setup.
    pub max_age: u32,
    /// Units deducted per decay tick.
    pub decay_per_tick: u64,
    /// Decay cadence in seconds; the scheduler fires one tick per interval.
    pub tick_interval_secs: u64,
    /// A day's net below this value classifies as very negative.
    pub very_negative_net: i64,
    /// Absences at least this long (minutes) warrant a caller-side notice.
    pub absence_notice_minutes: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            reward_low: 275,
            reward_medium: 1225,
            reward_high: 3750,
            waste_presets: vec![
                preset("Gossip scrolling", 2000),
                preset("Reels binge", 3000),
                preset("Celebrity daydreaming", 150),
                preset("Junk videos", 900),
                preset("Cartoon marathon", 1200),
            ],
            custom_waste_bounds: Some(WasteBounds { min: 50, max: 1000 }),
            horizon_age: 90,
            floor_years: 1,
            rate_per_hour: 100,
            min_age: 0,
            max_age: 120,
            decay_per_tick: 1,
            tick_interval_secs: 60,
            very_negative_net: -500,
            absence_notice_minutes: 5,
        }
    }
}

fn preset(label: &str, penalty: u64) -> WastePreset {
    WastePreset {
        label: label.to_string(),
        penalty,
    }
}

impl LedgerConfig {
    /// Default reward for the given importance tier.
    pub fn reward_for(&self, importance: Importance) -> u64 {
        match importance {
            Importance::Low => self.reward_low,
            Importance::Medium => self.reward_medium,
            Importance::High => self.reward_high,
        }
    }

    /// Starting capital for a user of the given age.
    ///
    /// `max(horizon_age - age, floor_years)` years of runway, priced at
    /// `rate_per_hour` per hour. Strictly decreasing in age until the floor.
    pub fn initial_capital(&self, age: u32) -> u64 {
        let remaining_years = self.horizon_age.saturating_sub(age).max(self.floor_years);
        u64::from(remaining_years) * 365 * 24 * self.rate_per_hour
    }
}

#[cfg(test)]
mod tests {
    use super::LedgerConfig;
    use crate::model::task::Importance;

    #[test]
    fn default_rewards_follow_importance_tiers() {
        let config = LedgerConfig::default();
        assert_eq!(config.reward_for(Importance::Low), 275);
        assert_eq!(config.reward_for(Importance::Medium), 1225);
        assert_eq!(config.reward_for(Importance::High), 3750);
    }

    #[test]
    fn initial_capital_for_age_30_matches_expected_runway() {
        let config = LedgerConfig::default();
        // 60 years * 365 * 24 hours * 100 per hour.
        assert_eq!(config.initial_capital(30), 52_560_000);
    }

    #[test]
    fn initial_capital_is_floored_at_one_year() {
        let config = LedgerConfig::default();
        let floor = 365 * 24 * 100;
        assert_eq!(config.initial_capital(90), floor);
        assert_eq!(config.initial_capital(120), floor);
    }

    #[test]
    fn initial_capital_is_monotonically_decreasing_in_age() {
        let config = LedgerConfig::default();
        let mut previous = config.initial_capital(0);
        for age in 1..=90 {
            let capital = config.initial_capital(age);
            assert!(capital <= previous, "capital rose at age {age}");
            previous = capital;
        }
    }
}
