//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
///
/// Only fatal, scan-level conditions live here. A single failed lookup is
/// never a `CoreError`: it is recorded as a [`LookupOutcome`](crate::LookupOutcome)
/// with status `error`.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Validation error (bad domain argument, bad configuration)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The subdomain catalog could not be built
    #[error("Catalog error ({source_name}): {message}")]
    CatalogError {
        source_name: String,
        message: String,
    },

    /// The resolver mechanism cannot be invoked at all
    #[error("Resolver unavailable: {0}")]
    ResolverUnavailable(String),

    /// Contract violation, e.g. adding to an aggregator after finalize
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The scan was cancelled before it completed
    #[error("Scan cancelled")]
    Cancelled,
}

impl CoreError {
    /// Whether it is expected behavior (user input, user interrupt), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_) | Self::CatalogError { .. } | Self::Cancelled => true,
            Self::ResolverUnavailable(_) | Self::InvalidState(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
