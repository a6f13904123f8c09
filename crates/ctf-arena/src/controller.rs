//! Seats: whatever picks the moves for one agent.

use ctf_behavior::{Decision, GameView, ReflexAgent};
use ctf_core::{AgentId, AgentRng, Direction};

use crate::{ArenaResult, ArenaState};

/// One agent's move for one turn.
#[derive(Debug, Clone)]
pub struct Action {
    pub direction: Direction,
    /// Scoring record, for controllers that keep one.
    pub decision:  Option<Decision>,
}

/// Picks moves for one seat.
///
/// `on_game_start` is called once when the match is built, before any
/// move is played.
pub trait Controller {
    fn on_game_start(&mut self, _state: &ArenaState) {}

    fn act(&mut self, state: &ArenaState) -> ArenaResult<Action>;

    /// Short name for logs.
    fn label(&self) -> &'static str;
}

impl Controller for ReflexAgent {
    fn on_game_start(&mut self, state: &ArenaState) {
        ReflexAgent::on_game_start(self, state);
    }

    fn act(&mut self, state: &ArenaState) -> ArenaResult<Action> {
        let decision = self.decide(state)?;
        Ok(Action { direction: decision.chosen, decision: Some(decision) })
    }

    fn label(&self) -> &'static str {
        self.role().tag()
    }
}

// ── Wanderer ──────────────────────────────────────────────────────────────────

/// Random walker that avoids stopping and, where it can, turning back.
///
/// Seeded from the match seed, so a replayed match walks the same path.
pub struct Wanderer {
    id:  AgentId,
    rng: AgentRng,
}

impl Wanderer {
    pub fn new(id: AgentId, match_seed: u64) -> Self {
        Self { id, rng: AgentRng::new(match_seed, id) }
    }
}

impl Controller for Wanderer {
    fn act(&mut self, state: &ArenaState) -> ArenaResult<Action> {
        let back = state.heading(self.id).reverse();
        let moving: Vec<Direction> = state
            .legal_moves(self.id)
            .into_iter()
            .filter(|&d| d != Direction::Stop)
            .collect();
        let forward: Vec<Direction> = moving.iter().copied().filter(|&d| d != back).collect();

        let pool = if forward.is_empty() { &moving } else { &forward };
        let direction = self.rng.choose(pool).copied().unwrap_or(Direction::Stop);
        Ok(Action { direction, decision: None })
    }

    fn label(&self) -> &'static str {
        "wanderer"
    }
}
