//! Error type for the parsing and validation boundary
//!
//! The calculation core never fails: missing or degenerate inputs produce
//! empty results. Errors only arise when reading households, life tables,
//! or validating a request before it is evaluated.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClaimingError {
    #[error("unknown sex {0:?} (expected \"male\" or \"female\")")]
    UnknownSex(String),

    #[error("invalid birth date {value:?}: {source}")]
    InvalidBirthDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("primary insurance amount must be >= 0, got {0}")]
    NegativePia(f64),

    #[error("claim age {years}y{months}m is outside 62y0m..=70y11m")]
    ClaimAgeOutOfRange { years: u32, months: u32 },

    #[error("claim age {years}y{months}m is selected more than once")]
    DuplicateClaimAge { years: u32, months: u32 },

    #[error("life table line {line}: {message}")]
    LifeTable { line: usize, message: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ClaimingError>;
