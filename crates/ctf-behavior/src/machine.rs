//! Per-agent mode state machine.
//!
//! [`ModeMachine::advance`] is a pure function of the previous machine and
//! the pre-move snapshot.  The agent evaluates every candidate move under
//! the advanced mode and commits the returned machine once, after choosing,
//! so candidate order can never leak into the mode.

use crate::{AgentRole, BehaviorMode, DistanceOracle, SituationSnapshot, Tuning};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeMachine {
    pub mode: BehaviorMode,
    /// Enemy capsule count seen on the previous turn.  `None` until the
    /// first observation.
    pub last_enemy_capsules: Option<usize>,
}

impl ModeMachine {
    pub fn new(role: AgentRole) -> Self {
        Self { mode: BehaviorMode::initial(role), last_enemy_capsules: None }
    }

    /// Fresh machine with the game-start capsule count as baseline.
    pub fn with_baseline(role: AgentRole, enemy_capsules: usize) -> Self {
        Self { mode: BehaviorMode::initial(role), last_enemy_capsules: Some(enemy_capsules) }
    }

    /// `true` when the enemy capsule count dropped since the last turn.
    pub fn capsule_captured(&self, snapshot: &SituationSnapshot) -> bool {
        self.last_enemy_capsules
            .is_some_and(|last| snapshot.enemy_capsules.len() < last)
    }

    /// `true` when `next` is a capsule window that started over while this
    /// one was still running.
    pub fn window_restarted(&self, next: &ModeMachine) -> bool {
        matches!(
            (self.mode.window_left(), next.mode.window_left()),
            (Some(left), Some(renewed)) if renewed >= left
        )
    }

    /// Compute next turn's machine.  `self` is left untouched.
    pub fn advance<O: DistanceOracle + ?Sized>(
        &self,
        role:     AgentRole,
        snapshot: &SituationSnapshot,
        oracle:   &O,
        tuning:   &Tuning,
    ) -> ModeMachine {
        let mode = match role {
            AgentRole::Offense => self.next_offense_mode(snapshot, oracle, tuning),
            AgentRole::Defense => defense_mode(snapshot, tuning),
        };
        ModeMachine { mode, last_enemy_capsules: Some(snapshot.enemy_capsules.len()) }
    }

    fn next_offense_mode<O: DistanceOracle + ?Sized>(
        &self,
        snapshot: &SituationSnapshot,
        oracle:   &O,
        tuning:   &Tuning,
    ) -> BehaviorMode {
        if self.capsule_captured(snapshot) {
            return BehaviorMode::SuperSafe { window_left: tuning.offense.capsule_window };
        }
        match self.mode {
            BehaviorMode::SuperSafe { window_left } if window_left > 1 => {
                BehaviorMode::SuperSafe { window_left: window_left - 1 }
            }
            BehaviorMode::SuperSafe { .. } => BehaviorMode::Safe,
            _ => offense_mode(snapshot, oracle, tuning),
        }
    }
}

/// Offense classification outside the capsule window.
///
/// Carry overload wins over everything; otherwise only the enemy half is
/// dangerous, and there the nearest-threat distance picks the mode.
pub fn offense_mode<O: DistanceOracle + ?Sized>(
    snapshot: &SituationSnapshot,
    oracle:   &O,
    tuning:   &Tuning,
) -> BehaviorMode {
    let t = &tuning.offense;
    if snapshot.carried > t.carry_threshold {
        return BehaviorMode::Running;
    }
    if !snapshot.on_enemy_side() {
        return BehaviorMode::Safe;
    }
    match snapshot.nearest_threat(oracle) {
        None => BehaviorMode::Safe,
        Some(d) if d >= t.safe_distance => BehaviorMode::Safe,
        Some(d) if d <= t.panic_distance => {
            if snapshot.enemy_capsules.is_empty() {
                BehaviorMode::Running
            } else {
                BehaviorMode::Evading
            }
        }
        Some(_) => BehaviorMode::Cautious,
    }
}

/// Defense is purely reactive: chase while an invader is visible.
pub fn defense_mode(snapshot: &SituationSnapshot, tuning: &Tuning) -> BehaviorMode {
    if snapshot.invader_count() == 0 {
        BehaviorMode::Returning
    } else if tuning.defense.flee_when_scared && snapshot.scared_turns > 0 {
        BehaviorMode::Scared
    } else {
        BehaviorMode::Pursuing
    }
}
