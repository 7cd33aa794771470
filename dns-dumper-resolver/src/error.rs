//! Unified error type definition

use dns_dumper_core::CoreError;
use thiserror::Error;

/// Resolver backend error type
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Validation error (bad nameserver address, unknown backend)
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<ResolverError> for CoreError {
    fn from(err: ResolverError) -> Self {
        match err {
            ResolverError::ValidationError(msg) => Self::ValidationError(msg),
        }
    }
}

/// Resolver Result type alias
pub type ResolverResult<T> = std::result::Result<T, ResolverError>;
