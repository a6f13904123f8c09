//! Error types for ctf-arena.

use ctf_behavior::BehaviorError;
use ctf_core::{AgentId, CoreError, Direction};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("layout line {line}: {message}")]
    Layout { line: usize, message: String },

    #[error("no controller seated for {0}")]
    MissingController(AgentId),

    #[error("{agent} chose {direction}, which is not a legal move")]
    IllegalMove { agent: AgentId, direction: Direction },

    #[error("match configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ArenaResult<T> = Result<T, ArenaError>;
