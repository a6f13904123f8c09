//! Seed series: the same pairing played over many seeds.

use ctf_core::{MatchRng, Team};
use tracing::info;

use crate::{ArenaResult, Match, MatchOutcome, NoopObserver};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSummary {
    /// `(seed, outcome)` in seed order.
    pub outcomes:  Vec<(u64, MatchOutcome)>,
    pub red_wins:  usize,
    pub blue_wins: usize,
    pub ties:      usize,
}

impl SeriesSummary {
    fn tally(outcomes: Vec<(u64, MatchOutcome)>) -> Self {
        let mut summary = Self { outcomes, ..Self::default() };
        for (_, outcome) in &summary.outcomes {
            match outcome.winner {
                Some(Team::Red)  => summary.red_wins += 1,
                Some(Team::Blue) => summary.blue_wins += 1,
                None             => summary.ties += 1,
            }
        }
        summary
    }

    pub fn mean_score(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        let total: i64 = self.outcomes.iter().map(|(_, o)| o.score as i64).sum();
        total as f64 / self.outcomes.len() as f64
    }
}

/// `count` match seeds derived from `master`.
pub fn seed_series(master: u64, count: usize) -> Vec<u64> {
    let mut rng = MatchRng::new(master);
    (0..count as u64).map(|i| rng.child_seed(i)).collect()
}

/// Build one match per seed with `make` and play each to the end.
///
/// With the `parallel` feature the matches run on Rayon's thread pool.
/// Each match is built and played on a single thread, so outcomes are the
/// same either way.
pub fn run_series<F>(seeds: &[u64], make: F) -> ArenaResult<SeriesSummary>
where
    F: Fn(u64) -> ArenaResult<Match> + Sync,
{
    let play = |&seed: &u64| -> ArenaResult<(u64, MatchOutcome)> {
        let mut game = make(seed)?;
        Ok((seed, game.run(&mut NoopObserver)?))
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes = seeds.iter().map(play).collect::<ArenaResult<Vec<_>>>()?;

    #[cfg(feature = "parallel")]
    let outcomes = {
        use rayon::prelude::*;
        seeds.par_iter().map(play).collect::<ArenaResult<Vec<_>>>()?
    };

    let summary = SeriesSummary::tally(outcomes);
    info!(
        matches = summary.outcomes.len(),
        red_wins = summary.red_wins,
        blue_wins = summary.blue_wins,
        ties = summary.ties,
        mean_score = summary.mean_score(),
        "series finished"
    );
    Ok(summary)
}
