use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised by pure domain code and configuration loading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid configuration for {var}: {reason}")]
    Config { var: &'static str, reason: String },

    #[error("date out of supported range")]
    DateOutOfRange,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, CoreError>;
