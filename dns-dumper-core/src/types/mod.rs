//! Type definition module

mod catalog;
mod outcome;
mod record;
mod scan;
mod target;

pub use catalog::{
    CatalogConfig, EntrySource, SubdomainEntry, BUILTIN_SUBDOMAINS, RFC_SERVICE_LABELS,
};
pub use outcome::{LookupOutcome, LookupStatus};
pub use record::RecordType;
pub use scan::{
    ScanConfig, ScanResult, ScanSummary, TargetResult, DEFAULT_CONCURRENCY,
    DEFAULT_QUERY_TIMEOUT_SECS,
};
pub use target::{Target, TargetKind};
