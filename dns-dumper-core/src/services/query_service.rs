//! Record query unit

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::traits::DnsResolver;
use crate::types::{LookupOutcome, RecordType, Target};

/// Issues one lookup per (target, record type) and normalizes the answer.
///
/// Never fails: every resolver error, timeout or contract violation becomes a
/// [`LookupOutcome`] with status `error`. No retries at this layer.
#[derive(Clone)]
pub struct QueryService {
    resolver: Arc<dyn DnsResolver>,
    query_timeout: Duration,
}

impl QueryService {
    #[must_use]
    pub fn new(resolver: Arc<dyn DnsResolver>, query_timeout: Duration) -> Self {
        Self {
            resolver,
            query_timeout,
        }
    }

    /// Query `target` for `record_type`.
    pub async fn query(&self, target: &Target, record_type: RecordType) -> LookupOutcome {
        if !RecordType::allowed_for(target.kind).contains(&record_type) {
            return LookupOutcome::error(
                target.clone(),
                record_type,
                format!("{record_type} is not queried for {:?} targets", target.kind),
            );
        }

        let outcome = match timeout(
            self.query_timeout,
            self.resolver.resolve(&target.name, record_type),
        )
        .await
        {
            Ok(Ok(values)) => LookupOutcome::found(target.clone(), record_type, values),
            Ok(Err(e)) => LookupOutcome::error(target.clone(), record_type, e.to_string()),
            Err(_) => LookupOutcome::error(
                target.clone(),
                record_type,
                format!(
                    "query timed out after {}s",
                    self.query_timeout.as_secs_f32()
                ),
            ),
        };

        log::debug!(
            "{} {} -> {:?} ({} value(s))",
            target.name,
            record_type,
            outcome.status,
            outcome.values.len()
        );
        outcome
    }

    /// Query and, for found apex SOA/NS/MX records, attach the verbose answer.
    ///
    /// A failing detailed lookup is logged and ignored.
    pub async fn query_with_detail(&self, target: &Target, record_type: RecordType) -> LookupOutcome {
        let outcome = self.query(target, record_type).await;
        if !(outcome.is_found() && target.is_apex() && record_type.wants_detail()) {
            return outcome;
        }

        match timeout(
            self.query_timeout,
            self.resolver.resolve_detailed(&target.name, record_type),
        )
        .await
        {
            Ok(Ok(detail)) => outcome.with_detail(detail),
            Ok(Err(e)) => {
                log::debug!("Detailed {record_type} lookup for {} failed: {e}", target.name);
                outcome
            }
            Err(_) => {
                log::debug!("Detailed {record_type} lookup for {} timed out", target.name);
                outcome
            }
        }
    }
}
