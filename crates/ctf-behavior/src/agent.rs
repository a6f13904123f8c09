//! The reflex agent: one mode machine, one decision per turn.

use ctf_core::{AgentId, Cell, Direction, Team};
use tracing::{debug, info, trace};

use crate::evaluate::{evaluate, select_best, select_nearest};
use crate::{
    AgentRole, BehaviorError, BehaviorMode, BehaviorResult, FeatureExtractor, FeatureVector,
    GameView, ModeMachine, SituationSnapshot, Tuning, WeightTable,
};

/// How one candidate move scored.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveScore {
    pub direction:      Direction,
    pub features:       FeatureVector,
    pub score:          f64,
    /// Maze distance from the projected position to the agent's start cell.
    pub start_distance: u32,
}

/// Full record of one turn's decision.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub agent:        AgentId,
    /// Mode committed for this turn.
    pub mode:         BehaviorMode,
    /// Mode whose features and weights were applied (differs from `mode`
    /// only inside the capsule window).
    pub scoring_mode: BehaviorMode,
    /// Every candidate, in the host's enumeration order, `Stop` excluded.
    pub candidates:   Vec<MoveScore>,
    pub chosen:       Direction,
    /// `true` when the end-game override picked the move.
    pub endgame:      bool,
}

impl Decision {
    pub fn chosen_score(&self) -> Option<&MoveScore> {
        self.candidates.iter().find(|c| c.direction == self.chosen)
    }
}

/// A hand-weighted reflex agent.
///
/// Construct through [`crate::registry`] or [`ReflexAgent::new`], call
/// [`on_game_start`][Self::on_game_start] once, then
/// [`choose_action`][Self::choose_action] once per turn.
#[derive(Debug, Clone)]
pub struct ReflexAgent {
    id:           AgentId,
    role:         AgentRole,
    tuning:       Tuning,
    start:        Cell,
    patrol_point: Cell,
    machine:      ModeMachine,
}

impl ReflexAgent {
    pub fn new(id: AgentId, role: AgentRole, tuning: Tuning) -> Self {
        Self {
            id,
            role,
            tuning,
            start:        Cell::default(),
            patrol_point: Cell::default(),
            machine:      ModeMachine::new(role),
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn role(&self) -> AgentRole {
        self.role
    }

    pub fn mode(&self) -> BehaviorMode {
        self.machine.mode
    }

    pub fn machine(&self) -> &ModeMachine {
        &self.machine
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn patrol_point(&self) -> Cell {
        self.patrol_point
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// One-time setup: record the start cell, the patrol point, and the
    /// enemy capsule baseline.  Also resets the mode, so an agent can be
    /// reused across games.
    pub fn on_game_start<V: GameView>(&mut self, view: &V) {
        let team = view.team_of(self.id);
        self.start = view.position(self.id);
        self.patrol_point = find_patrol_point(view, team, self.tuning.defense.patrol_depth)
            .unwrap_or(self.start);
        self.machine =
            ModeMachine::with_baseline(self.role, view.capsules(team.opponent()).len());
        info!(
            agent = self.id.0,
            role = %self.role,
            start = %self.start,
            patrol = %self.patrol_point,
            "agent registered"
        );
    }

    /// Pick this turn's move.
    pub fn choose_action<V: GameView>(&mut self, view: &V) -> BehaviorResult<Direction> {
        self.decide(view).map(|d| d.chosen)
    }

    /// Pick this turn's move and return the full scoring record.
    #[tracing::instrument(level = "debug", skip(self, view), fields(agent = self.id.0, role = %self.role))]
    pub fn decide<V: GameView>(&mut self, view: &V) -> BehaviorResult<Decision> {
        let before = SituationSnapshot::observe(view, self.id);
        let next = self.machine.advance(self.role, &before, view, &self.tuning);
        let scoring_mode = next.mode.delegate(before.enemy_capsules.len(), &self.tuning.offense);
        let weights = WeightTable::for_mode(scoring_mode);
        let extractor = FeatureExtractor::new(view, &self.tuning, self.patrol_point);

        let candidates: Vec<MoveScore> = view
            .legal_moves(self.id)
            .into_iter()
            .filter(|&dir| dir != Direction::Stop)
            .map(|dir| {
                let successor = view.apply_move(self.id, dir);
                let after = SituationSnapshot::observe(&successor, self.id);
                let features = extractor.extract(scoring_mode, &before, &after, dir);
                let score = evaluate(&features, &weights);
                trace!(%dir, %features, score, "candidate");
                MoveScore {
                    direction: dir,
                    features,
                    score,
                    start_distance: view.distance(self.start, after.position),
                }
            })
            .collect();

        let endgame = before.food_left() <= self.tuning.endgame_food;
        let chosen = if endgame {
            let distances: Vec<(Direction, u32)> =
                candidates.iter().map(|c| (c.direction, c.start_distance)).collect();
            select_nearest(&distances)
        } else {
            let scored: Vec<(Direction, f64)> =
                candidates.iter().map(|c| (c.direction, c.score)).collect();
            select_best(&scored)
        }
        .ok_or(BehaviorError::NoCandidateMoves(self.id))?;

        if next.mode.name() != self.machine.mode.name() {
            info!(agent = self.id.0, from = %self.machine.mode, to = %next.mode, "mode change");
        } else if self.machine.window_restarted(&next) {
            info!(agent = self.id.0, from = %self.machine.mode, to = %next.mode, "capsule window reset");
        }
        self.machine = next;

        debug!(
            mode = %next.mode,
            scoring = %scoring_mode,
            %chosen,
            endgame,
            food_left = before.food_left(),
            "decided"
        );

        Ok(Decision {
            agent: self.id,
            mode: next.mode,
            scoring_mode,
            candidates,
            chosen,
            endgame,
        })
    }
}

/// First open cell near the board's vertical center, `depth` columns behind
/// the team's home line.  Columns closer to that target are tried first,
/// and within a column rows closer to `height / 2 + 1`.
fn find_patrol_point<V: GameView>(view: &V, team: Team, depth: i32) -> Option<Cell> {
    let (width, height) = (view.width(), view.height());
    if width <= 0 || height <= 0 {
        return None;
    }
    let target_x = (team.home_line_x(width) + team.toward_home() * depth).clamp(0, width - 1);
    let center_y = (height / 2 + 1).min(height - 1);

    let mut columns: Vec<i32> =
        (0..width).filter(|&x| team.is_home(Cell::new(x, 0), width)).collect();
    columns.sort_by_key(|&x| (x - target_x).abs());
    let mut rows: Vec<i32> = (0..height).collect();
    rows.sort_by_key(|&y| (y - center_y).abs());

    columns
        .iter()
        .flat_map(|&x| rows.iter().map(move |&y| Cell::new(x, y)))
        .find(|&cell| !view.is_wall(cell))
}
