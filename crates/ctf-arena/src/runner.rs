//! The `Match` struct, its builder, and the turn loop.

use std::sync::Arc;

use ctf_behavior::{Tuning, create_team};
use ctf_core::{AgentId, Team, Turn};
use tracing::{debug, info};

use crate::layout::AGENT_COUNT;
use crate::{
    ArenaError, ArenaEvent, ArenaResult, ArenaState, Controller, DistanceTable, Layout,
    MatchConfig, MatchObserver, Wanderer,
};

// ── Results ───────────────────────────────────────────────────────────────────

/// Standings after one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSummary {
    pub turn:           Turn,
    /// The agent that moved this turn.
    pub agent:          AgentId,
    /// Red's banked food minus Blue's.
    pub score:          i32,
    pub red_food_left:  usize,
    pub blue_food_left: usize,
    pub red_carried:    u32,
    pub blue_carried:   u32,
}

impl TurnSummary {
    fn of(turn: Turn, agent: AgentId, state: &ArenaState) -> Self {
        Self {
            turn,
            agent,
            score:          state.score(),
            red_food_left:  state.food_left(Team::Red),
            blue_food_left: state.food_left(Team::Blue),
            red_carried:    state.carried_by(Team::Red),
            blue_carried:   state.carried_by(Team::Blue),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub turns_played:   u32,
    pub score:          i32,
    /// `None` on a tie.
    pub winner:         Option<Team>,
    pub red_food_left:  usize,
    pub blue_food_left: usize,
    pub captures:       u32,
}

// ── Match ─────────────────────────────────────────────────────────────────────

/// One match between two teams of two seats each.
///
/// Agents move in id order, one per turn: 0 (Red), 1 (Blue), 2 (Red),
/// 3 (Blue), then around again.  Create via [`MatchBuilder`].
pub struct Match {
    pub config:  MatchConfig,
    pub state:   ArenaState,
    controllers: Vec<Box<dyn Controller>>,
    turn:        Turn,
    captures:    u32,
}

impl Match {
    /// Turns played so far.
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Food `team` must carry home to end the match: everything on the
    /// opponent's half except `config.min_food` items.
    pub fn food_target(&self, team: Team) -> u32 {
        let available = self.state.layout().food_on(team.opponent());
        available.saturating_sub(self.config.min_food) as u32
    }

    /// `true` once either team has banked its [`food_target`][Self::food_target].
    pub fn is_decided(&self) -> bool {
        [Team::Red, Team::Blue]
            .into_iter()
            .any(|team| self.state.banked(team) >= self.food_target(team))
    }

    /// Play until `max_turns` or until one team has returned enough food.
    pub fn run<O: MatchObserver>(&mut self, observer: &mut O) -> ArenaResult<MatchOutcome> {
        observer.on_match_start(&self.state);
        while self.turn < self.config.end_turn() && !self.is_decided() {
            self.play_turn(observer)?;
        }
        let outcome = self.outcome();
        info!(
            turns = outcome.turns_played,
            score = outcome.score,
            winner = outcome.winner.map_or("tie", Team::as_str),
            captures = outcome.captures,
            "match finished"
        );
        observer.on_match_end(&outcome);
        Ok(outcome)
    }

    /// Play exactly `n` turns from the current position, ignoring both end
    /// conditions.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_turns<O: MatchObserver>(&mut self, n: u32, observer: &mut O) -> ArenaResult<()> {
        for _ in 0..n {
            self.play_turn(observer)?;
        }
        Ok(())
    }

    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome {
            turns_played:   self.turn.0,
            score:          self.state.score(),
            winner:         self.state.leader(),
            red_food_left:  self.state.food_left(Team::Red),
            blue_food_left: self.state.food_left(Team::Blue),
            captures:       self.captures,
        }
    }

    fn play_turn<O: MatchObserver>(&mut self, observer: &mut O) -> ArenaResult<()> {
        let turn = self.turn;
        let agent = AgentId(turn.0 % AGENT_COUNT as u32);
        let seat = &mut self.controllers[agent.index()];

        let action = seat.act(&self.state)?;
        let events = self.state.play(agent, action.direction)?;
        for event in &events {
            if matches!(event, ArenaEvent::Captured { .. }) {
                self.captures += 1;
            }
            debug!(%turn, ?event, "event");
        }

        observer.on_action(turn, agent, &action, &events);
        observer.on_turn_end(&TurnSummary::of(turn, agent, &self.state));
        self.turn = turn.next();
        Ok(())
    }
}

// ── MatchBuilder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Match`].
///
/// Every one of the four seats must be filled before [`build`][Self::build].
///
/// # Example
///
/// ```rust,ignore
/// let mut game = MatchBuilder::new(config, layout)
///     .reflex_team(Team::Red, "offense", "defense", &tuning)?
///     .wanderers(Team::Blue)
///     .build()?;
/// let outcome = game.run(&mut NoopObserver)?;
/// ```
pub struct MatchBuilder {
    config:    MatchConfig,
    layout:    Arc<Layout>,
    distances: Option<Arc<DistanceTable>>,
    seats:     [Option<Box<dyn Controller>>; AGENT_COUNT],
}

impl MatchBuilder {
    pub fn new(config: MatchConfig, layout: Arc<Layout>) -> Self {
        Self { config, layout, distances: None, seats: Default::default() }
    }

    /// Reuse a distance table built from the same layout.  If not called,
    /// [`build`][Self::build] computes one.
    pub fn distances(mut self, distances: Arc<DistanceTable>) -> Self {
        self.distances = Some(distances);
        self
    }

    /// Seat `controller` as `agent`.  Replaces any earlier seat.
    pub fn seat(mut self, agent: AgentId, controller: impl Controller + 'static) -> Self {
        self.seats[agent.index() % AGENT_COUNT] = Some(Box::new(controller));
        self
    }

    /// Seat two reflex agents for `team` through the role registry.
    pub fn reflex_team(
        self,
        team:       Team,
        first_tag:  &str,
        second_tag: &str,
        tuning:     &Tuning,
    ) -> ArenaResult<Self> {
        let (first, second) = team_ids(team);
        let [a, b] = create_team(first, second, first_tag, second_tag, tuning)?;
        Ok(self.seat(first, a).seat(second, b))
    }

    /// Seat two [`Wanderer`]s for `team`.
    pub fn wanderers(self, team: Team) -> Self {
        let seed = self.config.seed;
        let (first, second) = team_ids(team);
        self.seat(first, Wanderer::new(first, seed)).seat(second, Wanderer::new(second, seed))
    }

    /// Validate, build the initial state, and let every seat see it.
    pub fn build(self) -> ArenaResult<Match> {
        self.config.validate()?;
        let distances = match self.distances {
            Some(d) => d,
            None    => Arc::new(DistanceTable::build(&self.layout)),
        };
        let state = ArenaState::new(self.layout, distances, &self.config);

        let mut controllers = Vec::with_capacity(AGENT_COUNT);
        for (i, seat) in self.seats.into_iter().enumerate() {
            let agent = AgentId(i as u32);
            let mut controller = seat.ok_or(ArenaError::MissingController(agent))?;
            controller.on_game_start(&state);
            debug!(agent = agent.0, seat = controller.label(), "seated");
            controllers.push(controller);
        }

        Ok(Match { config: self.config, state, controllers, turn: Turn::ZERO, captures: 0 })
    }
}

/// Agent ids of `team`, lower id first.
pub fn team_ids(team: Team) -> (AgentId, AgentId) {
    match team {
        Team::Red  => (AgentId(0), AgentId(2)),
        Team::Blue => (AgentId(1), AgentId(3)),
    }
}
