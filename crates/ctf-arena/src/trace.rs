//! CSV decision traces.
//!
//! Creates two files in the configured output directory:
//! - `decisions.csv`: one row per reflex decision
//! - `turn_summaries.csv`: one row per turn
//!
//! Moves made by controllers without a scoring record (e.g. wanderers) only
//! show up in the turn summaries.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use ctf_behavior::Decision;
use ctf_core::{AgentId, Team, Turn};

use crate::{Action, ArenaError, ArenaEvent, ArenaResult, MatchObserver, MatchOutcome, TurnSummary};

pub const DECISION_HEADERS: [&str; 9] = [
    "turn", "agent", "team", "mode", "scoring_mode", "chosen", "score", "endgame", "candidates",
];

pub const SUMMARY_HEADERS: [&str; 7] = [
    "turn", "agent", "score", "red_food_left", "blue_food_left", "red_carried", "blue_carried",
];

/// A [`MatchObserver`] writing decision traces as CSV.
///
/// Errors are stored because observer methods have no return value.  After
/// `run()` returns, check with [`take_error`][Self::take_error].
pub struct CsvTraceWriter {
    decisions:  Writer<File>,
    summaries:  Writer<File>,
    finished:   bool,
    last_error: Option<ArenaError>,
}

impl CsvTraceWriter {
    /// Create `dir` if needed, open both files, and write the header rows.
    pub fn new(dir: &Path) -> ArenaResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut decisions = Writer::from_path(dir.join("decisions.csv"))?;
        decisions.write_record(DECISION_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("turn_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADERS)?;

        Ok(Self { decisions, summaries, finished: false, last_error: None })
    }

    /// Take the first stored write error, if any.
    pub fn take_error(&mut self) -> Option<ArenaError> {
        self.last_error.take()
    }

    pub fn finish(&mut self) -> ArenaResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.decisions.flush()?;
        self.summaries.flush()?;
        Ok(())
    }

    fn write_decision(&mut self, turn: Turn, decision: &Decision) -> ArenaResult<()> {
        let score = decision.chosen_score().map_or(String::new(), |c| c.score.to_string());
        self.decisions.write_record(&[
            turn.0.to_string(),
            decision.agent.0.to_string(),
            Team::for_agent(decision.agent).to_string(),
            decision.mode.to_string(),
            decision.scoring_mode.to_string(),
            decision.chosen.to_string(),
            score,
            (decision.endgame as u8).to_string(),
            candidates_field(decision),
        ])?;
        Ok(())
    }

    fn write_summary(&mut self, row: &TurnSummary) -> ArenaResult<()> {
        self.summaries.write_record(&[
            row.turn.0.to_string(),
            row.agent.0.to_string(),
            row.score.to_string(),
            row.red_food_left.to_string(),
            row.blue_food_left.to_string(),
            row.red_carried.to_string(),
            row.blue_carried.to_string(),
        ])?;
        Ok(())
    }

    fn store_err(&mut self, result: ArenaResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

/// `North=-203;East=-201` in candidate order.
fn candidates_field(decision: &Decision) -> String {
    decision
        .candidates
        .iter()
        .map(|c| format!("{}={}", c.direction, c.score))
        .collect::<Vec<_>>()
        .join(";")
}

impl MatchObserver for CsvTraceWriter {
    fn on_action(&mut self, turn: Turn, _agent: AgentId, action: &Action, _events: &[ArenaEvent]) {
        if let Some(decision) = &action.decision {
            let result = self.write_decision(turn, decision);
            self.store_err(result);
        }
    }

    fn on_turn_end(&mut self, summary: &TurnSummary) {
        let result = self.write_summary(summary);
        self.store_err(result);
    }

    fn on_match_end(&mut self, _outcome: &MatchOutcome) {
        let result = self.finish();
        self.store_err(result);
    }
}
