//! The host-engine seam.
//!
//! The maze, move legality, successor generation, and shortest-path
//! distances all belong to the game engine.  The decision engine only reads
//! them through these two traits, so any engine that can answer the queries
//! below can host a [`ReflexAgent`][crate::ReflexAgent].

use ctf_core::{AgentId, Cell, Direction, Team};

/// Shortest-path distance over the maze graph.
///
/// Implementations must be stateless from the caller's point of view: the
/// agent calls `distance` many times per turn and expects identical answers.
pub trait DistanceOracle {
    fn distance(&self, a: Cell, b: Cell) -> u32;
}

/// What an agent can see of one opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentView {
    pub id:           AgentId,
    /// `None` when the opponent is outside sight range.
    pub position:     Option<Cell>,
    /// Turns left on the opponent's scared timer; `0` when it can capture.
    pub scared_turns: u32,
}

/// Read-only game state as exposed by the host engine.
///
/// `apply_move` is the successor projector: it returns a new state in which
/// `agent` has taken `dir` and stands on a whole grid cell.  The receiver is
/// never mutated.
pub trait GameView: DistanceOracle + Sized {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn is_wall(&self, cell: Cell) -> bool;

    /// Legal moves for `agent`, in the engine's enumeration order.  Usually
    /// includes `Stop`.
    fn legal_moves(&self, agent: AgentId) -> Vec<Direction>;
    fn apply_move(&self, agent: AgentId, dir: Direction) -> Self;

    fn position(&self, agent: AgentId) -> Cell;
    /// Direction of the agent's last move (`Stop` at game start).
    fn heading(&self, agent: AgentId) -> Direction;
    /// Food items the agent is carrying and has not yet returned home.
    fn carried(&self, agent: AgentId) -> u32;
    /// Turns left on `agent`'s own scared timer.
    fn scared_turns(&self, agent: AgentId) -> u32;
    fn visible_opponents(&self, agent: AgentId) -> Vec<OpponentView>;

    /// Food remaining on `team`'s half (the food `team` defends).
    fn food(&self, team: Team) -> Vec<Cell>;
    /// Capsules remaining on `team`'s half.
    fn capsules(&self, team: Team) -> Vec<Cell>;

    fn team_of(&self, agent: AgentId) -> Team {
        Team::for_agent(agent)
    }
}
