//! Scan configuration and the aggregated scan result.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{LookupOutcome, RecordType, Target, TargetKind};

/// Default number of lookups in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Default per-lookup timeout in seconds.
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 10;

/// Scan coordinator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Maximum number of concurrent lookups (clamped to at least 1).
    pub concurrency: usize,
    /// Timeout applied to every single lookup.
    pub query_timeout: Duration,
    /// Run the subdomain sweep after the apex sweep.
    pub include_subdomains: bool,
    /// Fetch verbose answers for apex SOA/NS/MX records.
    pub detailed_records: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            query_timeout: Duration::from_secs(DEFAULT_QUERY_TIMEOUT_SECS),
            include_subdomains: true,
            detailed_records: true,
        }
    }
}

/// All outcomes collected for one target, in canonical record-type order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetResult {
    pub target: Target,
    pub outcomes: Vec<LookupOutcome>,
}

impl TargetResult {
    /// Outcomes that returned records.
    pub fn found(&self) -> impl Iterator<Item = &LookupOutcome> {
        self.outcomes.iter().filter(|o| o.is_found())
    }

    #[must_use]
    pub fn has_records(&self) -> bool {
        self.outcomes.iter().any(LookupOutcome::is_found)
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.found().map(|o| o.values.len()).sum()
    }
}

/// Final, read-only aggregate of a scan.
///
/// Targets are ordered apex first, then subdomains in catalog order; this
/// ordering does not depend on lookup completion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub domain: String,
    /// Scan start time (RFC 3339, local offset).
    pub timestamp: String,
    targets: Vec<TargetResult>,
}

impl ScanResult {
    pub(crate) fn new(domain: String, timestamp: String, targets: Vec<TargetResult>) -> Self {
        Self {
            domain,
            timestamp,
            targets,
        }
    }

    #[must_use]
    pub fn targets(&self) -> &[TargetResult] {
        &self.targets
    }

    /// The apex target's results, if the apex was scanned.
    #[must_use]
    pub fn apex(&self) -> Option<&TargetResult> {
        self.targets.iter().find(|t| t.target.kind == TargetKind::Apex)
    }

    pub fn subdomains(&self) -> impl Iterator<Item = &TargetResult> {
        self.targets
            .iter()
            .filter(|t| t.target.kind == TargetKind::Subdomain)
    }

    /// Subdomains with at least one record.
    pub fn resolved_subdomains(&self) -> impl Iterator<Item = &TargetResult> {
        self.subdomains().filter(|t| t.has_records())
    }

    #[must_use]
    pub fn outcome(&self, name: &str, record_type: RecordType) -> Option<&LookupOutcome> {
        let name = super::target::normalize_name(name);
        self.targets
            .iter()
            .find(|t| t.target.name == name)?
            .outcomes
            .iter()
            .find(|o| o.record_type == record_type)
    }

    /// Every outcome, in target-then-record-type order.
    pub fn outcomes(&self) -> impl Iterator<Item = &LookupOutcome> {
        self.targets.iter().flat_map(|t| t.outcomes.iter())
    }

    #[must_use]
    pub fn outcome_count(&self) -> usize {
        self.targets.iter().map(|t| t.outcomes.len()).sum()
    }

    #[must_use]
    pub fn summary(&self) -> ScanSummary {
        let (apex_records, apex_record_types) = self.apex().map_or((0, 0), |apex| {
            (apex.record_count(), apex.found().count())
        });
        let subdomain_records = self.subdomains().map(TargetResult::record_count).sum();
        let resolved_subdomains = self.resolved_subdomains().count();
        let errors = self.outcomes().filter(|o| o.is_error()).count();

        ScanSummary {
            apex_records,
            apex_record_types,
            subdomain_records,
            resolved_subdomains,
            errors,
            total_records: apex_records + subdomain_records,
        }
    }
}

/// Record counts reported at the end of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub apex_records: usize,
    pub apex_record_types: usize,
    pub subdomain_records: usize,
    pub resolved_subdomains: usize,
    pub errors: usize,
    pub total_records: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScanResult {
        let apex = Target::apex("example.com");
        let www = Target::subdomain("www.example.com");
        let ftp = Target::subdomain("ftp.example.com");
        ScanResult::new(
            "example.com".into(),
            "2024-01-01T00:00:00+00:00".into(),
            vec![
                TargetResult {
                    target: apex.clone(),
                    outcomes: vec![
                        LookupOutcome::found(apex.clone(), RecordType::A, vec!["1.1.1.1".into()]),
                        LookupOutcome::found(
                            apex.clone(),
                            RecordType::Ns,
                            vec!["ns1".into(), "ns2".into()],
                        ),
                        LookupOutcome::error(apex, RecordType::Ds, "SERVFAIL"),
                    ],
                },
                TargetResult {
                    target: www.clone(),
                    outcomes: vec![LookupOutcome::found(
                        www,
                        RecordType::Cname,
                        vec!["example.com".into()],
                    )],
                },
                TargetResult {
                    target: ftp.clone(),
                    outcomes: vec![LookupOutcome::empty(ftp, RecordType::A)],
                },
            ],
        )
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample().summary();
        assert_eq!(summary.apex_records, 3);
        assert_eq!(summary.apex_record_types, 2);
        assert_eq!(summary.subdomain_records, 1);
        assert_eq!(summary.resolved_subdomains, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.total_records, 4);
    }

    #[test]
    fn test_outcome_lookup_is_case_insensitive() {
        let result = sample();
        let o = result.outcome("WWW.example.com.", RecordType::Cname);
        assert!(o.is_some_and(LookupOutcome::is_found));
        assert!(result.outcome("www.example.com", RecordType::Mx).is_none());
    }

    #[test]
    fn test_views() {
        let result = sample();
        assert_eq!(result.outcome_count(), 5);
        assert_eq!(result.subdomains().count(), 2);
        assert_eq!(result.resolved_subdomains().count(), 1);
        assert!(result.apex().is_some_and(|a| a.target.is_apex()));
    }

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.query_timeout, Duration::from_secs(10));
        assert!(config.include_subdomains);
    }
}
