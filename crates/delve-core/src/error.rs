//! Generation errors

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a generation call
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(
        "could not place enough rooms: {placed} of {required} required after {attempts} attempts"
    )]
    InsufficientRooms {
        placed: usize,
        required: usize,
        attempts: u32,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("layout has no rooms to place spawn and exit in")]
    NoRooms,
}

impl GenerationError {
    /// Whether retrying with another seed can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, GenerationError::InsufficientRooms { .. })
    }
}
