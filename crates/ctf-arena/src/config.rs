//! Match configuration.

use ctf_core::Turn;

use crate::{ArenaError, ArenaResult};

/// Rules and limits of one match.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchConfig {
    /// Total agent moves before the match ends.  Each of the four agents
    /// moves once per round, so 1200 turns is 300 rounds.
    pub max_turns: u32,

    /// Seed for host-side players.  The same seed always replays the same
    /// match.
    pub seed: u64,

    /// Opponents within this grid distance of any teammate are visible.
    pub sight_range: u32,

    /// Turns the opposing team stays scared after a capsule is eaten.
    pub scared_turns: u32,

    /// The match ends once either team has carried home all of the
    /// opponent's food except this many items.
    pub min_food: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_turns:    1200,
            seed:         0,
            sight_range:  5,
            scared_turns: 40,
            min_food:     2,
        }
    }
}

impl MatchConfig {
    /// Exclusive upper bound of the turn loop.
    #[inline]
    pub fn end_turn(&self) -> Turn {
        Turn(self.max_turns)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> ArenaResult<()> {
        if self.max_turns == 0 {
            return Err(ArenaError::Config("max_turns must be positive".into()));
        }
        if self.scared_turns == 0 {
            return Err(ArenaError::Config("scared_turns must be positive".into()));
        }
        Ok(())
    }
}
