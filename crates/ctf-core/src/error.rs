//! Errors raised while reading core values from text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("cannot parse {what} from {input:?}")]
    Parse { what: &'static str, input: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
