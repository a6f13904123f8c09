//! Seeded randomness for host-side players.
//!
//! Reflex agents are fully deterministic and never touch these types.  They
//! serve the arena's random opponents and the seed series, so that a match
//! replayed from the same seed unfolds move for move.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// Fractional part of the golden ratio; spreads neighbouring ids and match
/// offsets apart in seed space.
const GOLDEN: u64 = 0x9e37_79b9_7f4a_7c15;

/// One agent's private stream, derived from the match seed and its id.
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(match_seed: u64, agent: AgentId) -> Self {
        let seed = match_seed ^ u64::from(agent.0).wrapping_mul(GOLDEN);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform pick from `options`; `None` when there is nothing to pick.
    pub fn choose<'a, T>(&mut self, options: &'a [T]) -> Option<&'a T> {
        options.choose(&mut self.0)
    }
}

/// Series-level stream handing out one seed per match.
pub struct MatchRng(SmallRng);

impl MatchRng {
    pub fn new(master_seed: u64) -> Self {
        MatchRng(SmallRng::seed_from_u64(master_seed))
    }

    /// Seed for the `offset`-th match of a series.
    pub fn child_seed(&mut self, offset: u64) -> u64 {
        self.0.r#gen::<u64>() ^ offset.wrapping_mul(GOLDEN)
    }
}
