//! Per-turn, per-agent situation summary.
//!
//! A `SituationSnapshot` is taken once from the pre-move state and once from
//! every projected successor.  It copies out exactly what the mode machine
//! and the feature extractor read, so both stay pure functions of it.

use ctf_core::{AgentId, Cell, Direction, Team};

use crate::{DistanceOracle, GameView, OpponentView};

/// Threat distance reported when no threat is visible.
///
/// Large and finite so every offense feature can multiply it by a weight
/// without special cases.  Mode transitions do not use it: they treat "no
/// visible threat" as farther than any threshold.
pub const UNSEEN_THREAT_DISTANCE: u32 = 99;

/// `invaderDistance` reported by defense when no invader is visible.
pub const NO_INVADER_DISTANCE: i32 = -1;

#[derive(Debug, Clone, PartialEq)]
pub struct SituationSnapshot {
    pub agent:            AgentId,
    pub team:             Team,
    pub width:            i32,
    pub height:           i32,
    pub position:         Cell,
    pub heading:          Direction,
    pub carried:          u32,
    /// Turns left on this agent's own scared timer.
    pub scared_turns:     u32,
    pub opponents:        Vec<OpponentView>,
    /// Food on the opponent's half, i.e. what this agent can collect.
    pub enemy_food:       Vec<Cell>,
    /// Capsules on this agent's own half.
    pub own_capsules:     Vec<Cell>,
    /// Capsules on the opponent's half.
    pub enemy_capsules:   Vec<Cell>,
    pub home_line_x:      i32,
    pub legal_move_count: usize,
}

impl SituationSnapshot {
    pub fn observe<V: GameView>(view: &V, agent: AgentId) -> Self {
        let team = view.team_of(agent);
        let width = view.width();
        Self {
            agent,
            team,
            width,
            height:           view.height(),
            position:         view.position(agent),
            heading:          view.heading(agent),
            carried:          view.carried(agent),
            scared_turns:     view.scared_turns(agent),
            opponents:        view.visible_opponents(agent),
            enemy_food:       view.food(team.opponent()),
            own_capsules:     view.capsules(team),
            enemy_capsules:   view.capsules(team.opponent()),
            home_line_x:      team.home_line_x(width),
            legal_move_count: view.legal_moves(agent).len(),
        }
    }

    #[inline]
    pub fn on_enemy_side(&self) -> bool {
        !self.team.is_home(self.position, self.width)
    }

    /// Number of food items left for this agent's team to collect.
    #[inline]
    pub fn food_left(&self) -> usize {
        self.enemy_food.len()
    }

    // ── Opponents ─────────────────────────────────────────────────────────

    /// Visible opponents that can capture this agent: defending on their own
    /// half and not scared.
    pub fn threats(&self) -> impl Iterator<Item = Cell> + '_ {
        let their_side = self.team.opponent();
        self.opponents.iter().filter_map(move |o| match o.position {
            Some(p) if o.scared_turns == 0 && their_side.is_home(p, self.width) => Some(p),
            _ => None,
        })
    }

    /// Visible opponents standing on this agent's half.
    pub fn invaders(&self) -> impl Iterator<Item = Cell> + '_ {
        self.opponents.iter().filter_map(move |o| match o.position {
            Some(p) if self.team.is_home(p, self.width) => Some(p),
            _ => None,
        })
    }

    pub fn nearest_threat<O: DistanceOracle + ?Sized>(&self, oracle: &O) -> Option<u32> {
        self.threats().map(|p| oracle.distance(self.position, p)).min()
    }

    /// [`nearest_threat`][Self::nearest_threat] with the
    /// [`UNSEEN_THREAT_DISTANCE`] sentinel substituted.
    pub fn threat_distance<O: DistanceOracle + ?Sized>(&self, oracle: &O) -> u32 {
        self.nearest_threat(oracle).unwrap_or(UNSEEN_THREAT_DISTANCE)
    }

    pub fn invader_count(&self) -> usize {
        self.invaders().count()
    }

    pub fn nearest_invader<O: DistanceOracle + ?Sized>(&self, oracle: &O) -> Option<u32> {
        self.invaders().map(|p| oracle.distance(self.position, p)).min()
    }

    /// [`nearest_invader`][Self::nearest_invader] with the
    /// [`NO_INVADER_DISTANCE`] sentinel substituted.
    pub fn invader_distance<O: DistanceOracle + ?Sized>(&self, oracle: &O) -> i32 {
        self.nearest_invader(oracle).map_or(NO_INVADER_DISTANCE, |d| d as i32)
    }

    // ── Collectibles ──────────────────────────────────────────────────────

    pub fn nearest_food<O: DistanceOracle + ?Sized>(&self, oracle: &O) -> Option<u32> {
        self.enemy_food.iter().map(|&f| oracle.distance(self.position, f)).min()
    }

    pub fn nearest_enemy_capsule<O: DistanceOracle + ?Sized>(&self, oracle: &O) -> Option<u32> {
        self.enemy_capsules.iter().map(|&c| oracle.distance(self.position, c)).min()
    }
}
