//! DNS Dumper Core Library
//!
//! Enumeration and aggregation engine for snapshotting a domain's DNS state
//! ahead of a registrar or hosting transfer:
//! - Subdomain catalog (builtin, RFC service-discovery and custom entries)
//! - Record query unit (one normalized lookup per name and record type)
//! - Scan coordinator (apex sweep, subdomain sweep, bounded concurrency)
//! - Result aggregator (deterministic, deduplicated `ScanResult`)
//!
//! The actual DNS mechanism is abstracted behind [`DnsResolver`], so the engine
//! runs the same against hickory, `dig`, or a scripted test resolver.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{Aggregator, CatalogService, QueryService, ScanService};
pub use traits::{DnsResolver, ResolveFailure};
pub use types::{
    CatalogConfig, EntrySource, LookupOutcome, LookupStatus, RecordType, ScanConfig, ScanResult,
    ScanSummary, SubdomainEntry, Target, TargetKind, TargetResult,
};
