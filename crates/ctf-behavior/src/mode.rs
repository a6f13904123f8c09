//! Agent roles and behavior modes.

use std::fmt;

use crate::OffenseTuning;

/// Fixed for the whole game; assigned when the team is created.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentRole {
    Offense,
    Defense,
}

impl AgentRole {
    /// Canonical registry tag.
    pub fn tag(self) -> &'static str {
        match self {
            AgentRole::Offense => "offense",
            AgentRole::Defense => "defense",
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The single active behavior policy of an agent.
///
/// Offense cycles through `Safe`, `Cautious`, `Running`, `Evading` and
/// `SuperSafe`; defense through `Pursuing`, `Returning` and (opt-in)
/// `Scared`.  The capsule-window countdown lives inside `SuperSafe`, so the
/// window is active exactly when the mode is `SuperSafe`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorMode {
    /// Collect freely; no threat close enough to matter.
    Safe,
    /// Collect while keeping distance from a threat.
    Cautious,
    /// Retreat toward the home line.
    Running,
    /// Threat is close: rush the nearest enemy capsule.
    Evading,
    /// Post-capsule safety window with `window_left` turns remaining.
    SuperSafe { window_left: u32 },
    /// Chase visible invaders.
    Pursuing,
    /// Walk back to the patrol point near the center line.
    Returning,
    /// Invaders visible while our own capsule effect makes us edible.
    Scared,
}

impl BehaviorMode {
    pub fn initial(role: AgentRole) -> BehaviorMode {
        match role {
            AgentRole::Offense => BehaviorMode::Safe,
            AgentRole::Defense => BehaviorMode::Returning,
        }
    }

    pub fn role(self) -> AgentRole {
        match self {
            BehaviorMode::Safe
            | BehaviorMode::Cautious
            | BehaviorMode::Running
            | BehaviorMode::Evading
            | BehaviorMode::SuperSafe { .. } => AgentRole::Offense,
            BehaviorMode::Pursuing | BehaviorMode::Returning | BehaviorMode::Scared => {
                AgentRole::Defense
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BehaviorMode::Safe              => "safe",
            BehaviorMode::Cautious          => "cautious",
            BehaviorMode::Running           => "running",
            BehaviorMode::Evading           => "evading",
            BehaviorMode::SuperSafe { .. }  => "super_safe",
            BehaviorMode::Pursuing          => "pursuing",
            BehaviorMode::Returning         => "returning",
            BehaviorMode::Scared            => "scared",
        }
    }

    /// Turns left in the capsule window; `None` outside `SuperSafe`.
    pub fn window_left(self) -> Option<u32> {
        match self {
            BehaviorMode::SuperSafe { window_left } => Some(window_left),
            _ => None,
        }
    }

    /// The mode whose features and weights this mode uses this turn.
    ///
    /// Only `SuperSafe` delegates: it collects like `Safe` until the last
    /// `capsule_rush` turns of the window, then heads for the next capsule
    /// (`Evading`) or, with none left, for home (`Running`).
    pub fn delegate(self, enemy_capsules_left: usize, tuning: &OffenseTuning) -> BehaviorMode {
        match self {
            BehaviorMode::SuperSafe { window_left } if window_left <= tuning.capsule_rush => {
                if enemy_capsules_left > 0 {
                    BehaviorMode::Evading
                } else {
                    BehaviorMode::Running
                }
            }
            BehaviorMode::SuperSafe { .. } => BehaviorMode::Safe,
            other => other,
        }
    }
}

impl fmt::Display for BehaviorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BehaviorMode::SuperSafe { window_left } => write!(f, "super_safe({window_left})"),
            other => f.write_str(other.name()),
        }
    }
}
