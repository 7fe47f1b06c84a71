//! Common error types for Genrely

use thiserror::Error;

/// Common result type for Genrely operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared across the Genrely crates
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
