use ctf_core::{AgentId, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error("unknown agent role tag {0:?}")]
    UnknownRole(String),

    /// The host offered no legal move other than `Stop`.  The engine
    /// guarantees this never happens, so callers treat it as fatal.
    #[error("{0} has no legal move besides Stop")]
    NoCandidateMoves(AgentId),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
