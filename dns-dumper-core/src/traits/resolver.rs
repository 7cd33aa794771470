//! Resolver collaborator abstract Trait

use std::fmt;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::RecordType;

/// Why a single lookup failed.
///
/// This is data, not a scan error: the query unit folds it into a
/// [`LookupOutcome`](crate::LookupOutcome) with status `error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveFailure(pub String);

impl ResolveFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for ResolveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ResolveFailure {}

/// DNS Resolver Trait
///
/// Issues one single-shot lookup per (name, record type). Implementations own
/// transport, retries and server selection; the engine only sees the answer.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Resolve `name` for `record_type`.
    ///
    /// `Ok(vec![])` means the resolver answered without records (including
    /// NXDOMAIN). Values are returned in resolver order.
    async fn resolve(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<String>, ResolveFailure>;

    /// Verbose, human-readable answer for `name` / `record_type`.
    async fn resolve_detailed(
        &self,
        _name: &str,
        _record_type: RecordType,
    ) -> Result<Option<String>, ResolveFailure> {
        Ok(None)
    }

    /// Fails with [`CoreError::ResolverUnavailable`](crate::CoreError::ResolverUnavailable)
    /// when the mechanism cannot be invoked at all.
    async fn check_available(&self) -> CoreResult<()> {
        Ok(())
    }

    /// Human-readable description of the servers being asked.
    fn label(&self) -> String;
}
