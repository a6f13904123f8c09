//! Game state and capture rules.
//!
//! `ArenaState` is both the live match state and the successor projector
//! handed to agents: [`GameView::apply_move`] clones the state and runs the
//! same rules the turn loop runs, minus the legality check.
//!
//! # Rules
//!
//! - An agent on the opponent's half eats the food or capsule it steps on.
//!   A capsule scares the whole opposing team for `scared_turns` of their
//!   own moves.
//! - Stepping back onto the home half banks all carried food.  Only banked
//!   food scores.
//! - When opponents share a cell, the one on its home half captures the
//!   other, unless it is scared, in which case it is captured instead.
//!   Captured agents return to their start cell; carried food goes back to
//!   where it was picked up.

use std::sync::Arc;

use ctf_behavior::{DistanceOracle, GameView, OpponentView};
use ctf_core::{AgentId, Cell, Direction, Team};

use crate::layout::AGENT_COUNT;
use crate::{ArenaError, ArenaResult, DistanceTable, Layout, MatchConfig};

// ── Per-agent state ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    pub position: Cell,
    pub start:    Cell,
    pub heading:  Direction,
    /// Cells of the food picked up and not yet banked, in pickup order.
    pub carrying: Vec<Cell>,
    /// Own moves left before this agent stops being edible.
    pub scared:   u32,
}

impl AgentState {
    fn at_start(start: Cell) -> Self {
        Self { position: start, start, heading: Direction::Stop, carrying: vec![], scared: 0 }
    }

    fn respawn(&mut self) {
        self.position = self.start;
        self.heading = Direction::Stop;
        self.carrying.clear();
        self.scared = 0;
    }
}

/// Something that happened during one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaEvent {
    FoodEaten { agent: AgentId, cell: Cell },
    CapsuleEaten { agent: AgentId, cell: Cell },
    FoodBanked { agent: AgentId, count: u32 },
    Captured { agent: AgentId, by: AgentId },
}

// ── ArenaState ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ArenaState {
    layout:       Arc<Layout>,
    distances:    Arc<DistanceTable>,
    sight_range:  u32,
    scared_turns: u32,
    agents:       [AgentState; AGENT_COUNT],
    food:         Vec<Cell>,
    capsules:     Vec<Cell>,
    /// Food carried home so far, Red then Blue.
    banked:       [u32; 2],
}

impl ArenaState {
    /// Initial state.  `distances` must have been built from `layout`.
    pub fn new(layout: Arc<Layout>, distances: Arc<DistanceTable>, config: &MatchConfig) -> Self {
        let agents = std::array::from_fn(|i| AgentState::at_start(layout.start(AgentId(i as u32))));
        Self {
            food: layout.food().to_vec(),
            capsules: layout.capsules().to_vec(),
            layout,
            distances,
            sight_range: config.sight_range,
            scared_turns: config.scared_turns,
            agents,
            banked: [0; 2],
        }
    }

    /// Initial state with a freshly built distance table.
    pub fn from_layout(layout: Layout, config: &MatchConfig) -> Self {
        let distances = Arc::new(DistanceTable::build(&layout));
        Self::new(Arc::new(layout), distances, config)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn agent(&self, agent: AgentId) -> &AgentState {
        &self.agents[agent.index()]
    }

    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> {
        (0..AGENT_COUNT as u32).map(AgentId)
    }

    /// Red's banked food minus Blue's.
    pub fn score(&self) -> i32 {
        self.banked(Team::Red) as i32 - self.banked(Team::Blue) as i32
    }

    /// Food `team` has carried home so far.
    pub fn banked(&self, team: Team) -> u32 {
        self.banked[team_slot(team)]
    }

    /// Food still on `team`'s half.
    pub fn food_left(&self, team: Team) -> usize {
        self.food.iter().filter(|&&c| team.is_home(c, self.layout.width())).count()
    }

    /// Food currently carried by `team`'s agents.
    pub fn carried_by(&self, team: Team) -> u32 {
        self.agent_ids()
            .filter(|&a| Team::for_agent(a) == team)
            .map(|a| self.agent(a).carrying.len() as u32)
            .sum()
    }

    /// The leading team, or `None` on a tie.
    pub fn leader(&self) -> Option<Team> {
        match self.score() {
            s if s > 0 => Some(Team::Red),
            s if s < 0 => Some(Team::Blue),
            _ => None,
        }
    }

    /// Play a move for real: reject illegal moves, then apply the rules.
    pub fn play(&mut self, agent: AgentId, dir: Direction) -> ArenaResult<Vec<ArenaEvent>> {
        if !self.legal_moves(agent).contains(&dir) {
            return Err(ArenaError::IllegalMove { agent, direction: dir });
        }
        Ok(self.advance(agent, dir))
    }

    // ── Rules ─────────────────────────────────────────────────────────────

    fn advance(&mut self, agent: AgentId, dir: Direction) -> Vec<ArenaEvent> {
        let mut events = Vec::new();
        let team = Team::for_agent(agent);
        let width = self.layout.width();
        let i = agent.index();

        let to = self.agents[i].position.step(dir);
        {
            let me = &mut self.agents[i];
            me.scared = me.scared.saturating_sub(1);
            if self.layout.is_wall(to) {
                return events;
            }
            me.position = to;
            me.heading = dir;
        }

        if team.is_home(to, width) {
            let banked = std::mem::take(&mut self.agents[i].carrying);
            if !banked.is_empty() {
                let count = banked.len() as u32;
                self.banked[team_slot(team)] += count;
                events.push(ArenaEvent::FoodBanked { agent, count });
            }
        } else {
            if let Some(k) = self.food.iter().position(|&f| f == to) {
                self.food.remove(k);
                self.agents[i].carrying.push(to);
                events.push(ArenaEvent::FoodEaten { agent, cell: to });
            }
            if let Some(k) = self.capsules.iter().position(|&c| c == to) {
                self.capsules.remove(k);
                let scare = self.scared_turns;
                // Opponents sit on the indices of the other parity.
                for other in self.agents.iter_mut().skip(1 - i % 2).step_by(2) {
                    other.scared = scare;
                }
                events.push(ArenaEvent::CapsuleEaten { agent, cell: to });
            }
        }

        self.resolve_collisions(agent, &mut events);
        events
    }

    fn resolve_collisions(&mut self, agent: AgentId, events: &mut Vec<ArenaEvent>) {
        let width = self.layout.width();
        let opponents: Vec<AgentId> =
            self.agent_ids().filter(|&o| o.0 % 2 != agent.0 % 2).collect();

        for opponent in opponents {
            let here = self.agent(agent).position;
            if self.agent(opponent).position != here {
                continue;
            }
            // Exactly one of the pair stands on its home half: the ghost.
            let (ghost, invader) = if Team::for_agent(agent).is_home(here, width) {
                (agent, opponent)
            } else {
                (opponent, agent)
            };
            let (victim, by) = if self.agent(ghost).scared > 0 {
                (ghost, invader)
            } else {
                (invader, ghost)
            };

            let dropped = std::mem::take(&mut self.agents[victim.index()].carrying);
            self.food.extend(dropped);
            self.food.sort();
            self.agents[victim.index()].respawn();
            events.push(ArenaEvent::Captured { agent: victim, by });

            if victim == agent {
                break;
            }
        }
    }

    fn visible(&self, viewer: AgentId, target: Cell) -> bool {
        self.agent_ids()
            .filter(|&a| a.0 % 2 == viewer.0 % 2)
            .any(|a| self.agent(a).position.manhattan(target) <= self.sight_range)
    }
}

fn team_slot(team: Team) -> usize {
    match team {
        Team::Red  => 0,
        Team::Blue => 1,
    }
}

// ── Host traits ───────────────────────────────────────────────────────────────

impl DistanceOracle for ArenaState {
    fn distance(&self, a: Cell, b: Cell) -> u32 {
        self.distances.get(&self.layout, a, b).unwrap_or_else(|| a.manhattan(b))
    }
}

impl GameView for ArenaState {
    fn width(&self) -> i32 {
        self.layout.width()
    }

    fn height(&self) -> i32 {
        self.layout.height()
    }

    fn is_wall(&self, cell: Cell) -> bool {
        self.layout.is_wall(cell)
    }

    fn legal_moves(&self, agent: AgentId) -> Vec<Direction> {
        let at = self.agent(agent).position;
        Direction::ALL
            .into_iter()
            .filter(|&d| d == Direction::Stop || !self.layout.is_wall(at.step(d)))
            .collect()
    }

    fn apply_move(&self, agent: AgentId, dir: Direction) -> Self {
        let mut next = self.clone();
        next.advance(agent, dir);
        next
    }

    fn position(&self, agent: AgentId) -> Cell {
        self.agent(agent).position
    }

    fn heading(&self, agent: AgentId) -> Direction {
        self.agent(agent).heading
    }

    fn carried(&self, agent: AgentId) -> u32 {
        self.agent(agent).carrying.len() as u32
    }

    fn scared_turns(&self, agent: AgentId) -> u32 {
        self.agent(agent).scared
    }

    fn visible_opponents(&self, agent: AgentId) -> Vec<OpponentView> {
        self.agent_ids()
            .filter(|&o| o.0 % 2 != agent.0 % 2)
            .map(|o| {
                let state = self.agent(o);
                OpponentView {
                    id:           o,
                    position:     self.visible(agent, state.position).then_some(state.position),
                    scared_turns: state.scared,
                }
            })
            .collect()
    }

    fn food(&self, team: Team) -> Vec<Cell> {
        let width = self.layout.width();
        self.food.iter().copied().filter(|&c| team.is_home(c, width)).collect()
    }

    fn capsules(&self, team: Team) -> Vec<Cell> {
        let width = self.layout.width();
        self.capsules.iter().copied().filter(|&c| team.is_home(c, width)).collect()
    }
}
