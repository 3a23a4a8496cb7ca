//! Error types for daytally-core

use thiserror::Error;

/// Main error type for the daytally-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Unknown period kind name
    #[error("invalid period kind: {0} (expected day, week, month or year)")]
    InvalidPeriod(String),

    /// Unparseable or out-of-range calendar date
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

/// Result type alias for daytally-core
pub type Result<T> = std::result::Result<T, Error>;
