//! Tuning constants for mode transitions and feature shaping.
//!
//! The defaults are the values the agents ship with.  Applications may load
//! overrides from JSON (feature `serde`); call [`Tuning::validate`] before
//! handing a loaded value to an agent.

use crate::{BehaviorError, BehaviorResult};

/// Offense thresholds.
///
/// Boundaries are closed on the safer side: a threat at exactly
/// `safe_distance` counts as safe, one at exactly `panic_distance` counts as
/// panic.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OffenseTuning {
    /// Carrying strictly more than this forces `Running`.
    pub carry_threshold:    u32,
    /// Threat at or beyond this distance → `Safe`.
    pub safe_distance:      u32,
    /// Threat at or within this distance → `Evading`.
    pub panic_distance:     u32,
    /// `Cautious` multiplies the threat distance by this factor.
    pub caution_multiplier: f64,
    /// Length of the post-capsule window in turns.
    pub capsule_window:     u32,
    /// Final turns of the window spent rushing the next capsule or home.
    pub capsule_rush:       u32,
    /// How many columns past the home line `Running` aims for.
    pub retreat_depth:      i32,
}

impl Default for OffenseTuning {
    fn default() -> Self {
        Self {
            carry_threshold:    6,
            safe_distance:      10,
            panic_distance:     4,
            caution_multiplier: 2.0,
            capsule_window:     40,
            capsule_rush:       7,
            retreat_depth:      3,
        }
    }
}

/// Defense parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DefenseTuning {
    /// Columns behind the home line where the patrol point sits.
    pub patrol_depth:     i32,
    /// Keep away from invaders while our scared timer runs instead of
    /// chasing them.
    pub flee_when_scared: bool,
}

impl Default for DefenseTuning {
    fn default() -> Self {
        Self { patrol_depth: 3, flee_when_scared: false }
    }
}

/// Everything an agent needs besides its role.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tuning {
    pub offense:      OffenseTuning,
    pub defense:      DefenseTuning,
    /// With this many or fewer food items left to collect, agents ignore
    /// their weights and head for their start cell.
    pub endgame_food: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            offense:      OffenseTuning::default(),
            defense:      DefenseTuning::default(),
            endgame_food: 2,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> BehaviorResult<()> {
        let o = &self.offense;
        if o.panic_distance >= o.safe_distance {
            return Err(BehaviorError::Config(format!(
                "panic_distance ({}) must be below safe_distance ({})",
                o.panic_distance, o.safe_distance
            )));
        }
        if o.capsule_window == 0 {
            return Err(BehaviorError::Config("capsule_window must be positive".into()));
        }
        if o.capsule_rush > o.capsule_window {
            return Err(BehaviorError::Config(format!(
                "capsule_rush ({}) exceeds capsule_window ({})",
                o.capsule_rush, o.capsule_window
            )));
        }
        if !(o.caution_multiplier.is_finite() && o.caution_multiplier > 0.0) {
            return Err(BehaviorError::Config(format!(
                "caution_multiplier must be positive and finite, got {}",
                o.caution_multiplier
            )));
        }
        if o.retreat_depth < 0 || self.defense.patrol_depth < 0 {
            return Err(BehaviorError::Config("depths must not be negative".into()));
        }
        Ok(())
    }
}
