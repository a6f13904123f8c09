//! Match observer trait for progress reporting and data collection.

use ctf_core::{AgentId, Turn};

use crate::{Action, ArenaEvent, ArenaState, MatchOutcome, TurnSummary};

/// Callbacks invoked by [`Match::run`][crate::Match::run] at key points in
/// the turn loop.
///
/// All methods have default no-op implementations so implementors only
/// override what they care about.
///
/// # Example: capture counter
///
/// ```rust,ignore
/// struct Captures(u32);
///
/// impl MatchObserver for Captures {
///     fn on_action(&mut self, _: Turn, _: AgentId, _: &Action, events: &[ArenaEvent]) {
///         self.0 += events.iter().filter(|e| matches!(e, ArenaEvent::Captured { .. })).count() as u32;
///     }
/// }
/// ```
pub trait MatchObserver {
    /// Called once before the first move, after every seat has seen the
    /// initial state.
    fn on_match_start(&mut self, _state: &ArenaState) {}

    /// Called after `agent`'s move has been applied.
    fn on_action(
        &mut self,
        _turn:   Turn,
        _agent:  AgentId,
        _action: &Action,
        _events: &[ArenaEvent],
    ) {}

    /// Called at the end of every turn with the post-move standings.
    fn on_turn_end(&mut self, _summary: &TurnSummary) {}

    /// Called once after the final turn.
    fn on_match_end(&mut self, _outcome: &MatchOutcome) {}
}

/// A [`MatchObserver`] that does nothing.
pub struct NoopObserver;

impl MatchObserver for NoopObserver {}
