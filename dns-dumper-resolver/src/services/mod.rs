//! Resolver backend implementations.

mod dig;
mod hickory;
mod resolver;

use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use dns_dumper_core::DnsResolver;

use crate::error::{ResolverError, ResolverResult};

pub use dig::DigResolver;
pub use hickory::HickoryResolver;

/// Nameserver queried unless told otherwise.
pub const DEFAULT_NAMESERVER: &str = "8.8.8.8";

/// Which lookup mechanism to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// hickory-resolver, in process.
    #[default]
    Hickory,
    /// The `dig` utility, one process per lookup.
    Dig,
}

impl FromStr for Backend {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hickory" => Ok(Self::Hickory),
            "dig" => Ok(Self::Dig),
            _ => Err(ResolverError::ValidationError(format!(
                "Unknown resolver backend: {s} (expected 'hickory' or 'dig')"
            ))),
        }
    }
}

/// Parse a nameserver option: an IP address, or `system` / empty for the
/// host configuration.
pub fn parse_nameserver(ns: &str) -> ResolverResult<Option<IpAddr>> {
    let ns = ns.trim();
    if ns.is_empty() || ns.eq_ignore_ascii_case("system") {
        return Ok(None);
    }
    ns.parse::<IpAddr>()
        .map(Some)
        .map_err(|_| ResolverError::ValidationError(format!("Invalid DNS server address: {ns}")))
}

/// Build the resolver for `backend` against `nameserver`.
pub fn build_resolver(
    backend: Backend,
    nameserver: &str,
    timeout: Duration,
) -> ResolverResult<Arc<dyn DnsResolver>> {
    let ns = parse_nameserver(nameserver)?;
    let resolver: Arc<dyn DnsResolver> = match backend {
        Backend::Hickory => Arc::new(HickoryResolver::new(ns, timeout)),
        Backend::Dig => Arc::new(DigResolver::new(ns, timeout)),
    };
    log::debug!("Resolver backend {backend:?} via {}", resolver.label());
    Ok(resolver)
}
