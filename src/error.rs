//! Error type for the crate.
//!
//! Almost nothing in the component fails: malformed options are coerced and
//! templates that reference missing fields render with the placeholder left
//! in place. The errors below cover the two places that can genuinely fail.

use thiserror::Error;

/// Errors produced by the autocomplete component.
#[derive(Debug, Error)]
pub enum Error {
    /// The JSON options document could not be parsed.
    #[error("invalid autocomplete options: {0}")]
    Options(#[from] serde_json::Error),

    /// The search-term highlight pattern could not be compiled.
    #[error("invalid highlight pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
