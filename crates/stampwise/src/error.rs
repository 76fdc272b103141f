//! Error types for stampwise operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StampError {
    #[error("Invalid catalog pattern '{pattern}': {reason}")]
    InvalidCatalog { pattern: String, reason: String },
}

pub type Result<T> = std::result::Result<T, StampError>;
