//! Scan coordination: apex sweep, subdomain sweep, aggregation

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::error::{CoreError, CoreResult};
use crate::services::{is_valid_name, validate_domain, Aggregator, QueryService};
use crate::traits::DnsResolver;
use crate::types::{RecordType, ScanConfig, ScanResult, SubdomainEntry, Target};

/// Drives a full scan against one resolver.
pub struct ScanService {
    resolver: Arc<dyn DnsResolver>,
    config: ScanConfig,
}

impl ScanService {
    #[must_use]
    pub fn new(resolver: Arc<dyn DnsResolver>, config: ScanConfig) -> Self {
        Self { resolver, config }
    }

    #[must_use]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan `domain` and every catalog entry.
    ///
    /// Individual lookup failures are recorded in the result. The scan itself
    /// fails only on an invalid domain, an unavailable resolver, or
    /// cancellation, or a catalog entry that is not a valid host name; in
    /// those cases nothing collected so far is returned.
    pub async fn scan(
        &self,
        domain: &str,
        catalog: &[SubdomainEntry],
        cancel: &CancellationToken,
    ) -> CoreResult<ScanResult> {
        let domain = validate_domain(domain)?;
        let started = Instant::now();
        let targets = if self.config.include_subdomains {
            subdomain_targets(&domain, catalog)?
        } else {
            Vec::new()
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(CoreError::Cancelled),
            available = self.resolver.check_available() => available?,
        }

        log::info!(
            "Extracting DNS records for {domain} via {}",
            self.resolver.label()
        );

        let aggregator = Aggregator::new(&domain);
        let query = QueryService::new(Arc::clone(&self.resolver), self.config.query_timeout);

        // Phase 1: apex
        let apex = Target::apex(&domain);
        aggregator.register(&apex)?;
        let apex_jobs: Vec<_> = RecordType::APEX
            .into_iter()
            .map(|t| (apex.clone(), t))
            .collect();
        log::info!("Apex sweep: {} queries", apex_jobs.len());
        self.run_phase(&query, apex_jobs, &aggregator, cancel).await?;

        // Phase 2: subdomains
        if self.config.include_subdomains {
            for target in &targets {
                aggregator.register(target)?;
            }
            let jobs: Vec<_> = targets
                .iter()
                .flat_map(|target| RecordType::SUBDOMAIN.into_iter().map(|t| (target.clone(), t)))
                .collect();
            log::info!(
                "Subdomain sweep: {} targets, {} queries",
                targets.len(),
                jobs.len()
            );
            self.run_phase(&query, jobs, &aggregator, cancel).await?;
        } else {
            log::info!("Subdomain sweep skipped");
        }

        let result = aggregator.finalize()?;

        for sub in result.resolved_subdomains() {
            log::info!("Found records for: {}", sub.target.name);
        }
        let summary = result.summary();
        log::info!(
            "Scan of {domain} finished in {:.1}s: {} outcomes, {} records, {} resolved subdomains, {} errors",
            started.elapsed().as_secs_f32(),
            result.outcome_count(),
            summary.total_records,
            summary.resolved_subdomains,
            summary.errors
        );
        Ok(result)
    }

    /// Run one sweep with at most `concurrency` lookups in flight.
    async fn run_phase(
        &self,
        query: &QueryService,
        jobs: Vec<(Target, RecordType)>,
        aggregator: &Aggregator,
        cancel: &CancellationToken,
    ) -> CoreResult<()> {
        let detailed = self.config.detailed_records;
        let mut outcomes = stream::iter(jobs)
            .map(|(target, record_type)| {
                let query = query.clone();
                async move {
                    if detailed {
                        query.query_with_detail(&target, record_type).await
                    } else {
                        query.query(&target, record_type).await
                    }
                }
            })
            .buffer_unordered(self.config.concurrency.max(1));

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    log::warn!("Scan cancelled, discarding {} collected outcome(s)", aggregator.len());
                    return Err(CoreError::Cancelled);
                }
                next = outcomes.next() => match next {
                    Some(outcome) => aggregator.add(outcome)?,
                    None => return Ok(()),
                },
            }
        }
    }
}

/// Qualify catalog entries under `domain`, dropping the apex itself and
/// repeated names. An entry that is not a valid host name fails the scan.
fn subdomain_targets(domain: &str, catalog: &[SubdomainEntry]) -> CoreResult<Vec<Target>> {
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(domain.to_string());

    let mut targets = Vec::with_capacity(catalog.len());
    for entry in catalog {
        let name = entry.fqdn(domain);
        if !is_valid_name(&name) {
            return Err(CoreError::CatalogError {
                source_name: entry.source.list_name().to_string(),
                message: format!("invalid subdomain entry '{}'", entry.name),
            });
        }
        if seen.insert(name.clone()) {
            targets.push(Target::subdomain(&name));
        }
    }
    Ok(targets)
}
