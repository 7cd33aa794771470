//! hickory resolver construction.

use std::net::IpAddr;
use std::sync::LazyLock;
use std::time::Duration;

use hickory_resolver::{
    TokioResolver,
    config::{NameServerConfigGroup, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
};

const DNS_PORT: u16 = 53;

/// Nameservers the host is configured with, e.g. `system (1.1.1.1, 9.9.9.9)`.
pub(crate) static SYSTEM_LABEL: LazyLock<String> = LazyLock::new(|| {
    if let Some((config, _)) = system_config() {
        let servers = nameserver_ips(&config);
        if !servers.is_empty() {
            return format!("system ({})", servers.join(", "));
        }
    }
    "system".to_string()
});

/// Distinct nameserver addresses of `config`, in configuration order.
/// hickory lists each address once per protocol.
pub(crate) fn nameserver_ips(config: &ResolverConfig) -> Vec<String> {
    let mut ips: Vec<String> = config
        .name_servers()
        .iter()
        .map(|ns| ns.socket_addr.ip().to_string())
        .collect();
    let mut seen = std::collections::HashSet::new();
    ips.retain(|ip| seen.insert(ip.clone()));
    ips
}

/// One attempt per query, bounded by `timeout`. Names are queried as given,
/// without search-domain expansion.
fn snapshot_opts(mut opts: ResolverOpts, timeout: Duration) -> ResolverOpts {
    opts.timeout = timeout;
    opts.attempts = 1;
    opts.ndots = 0;
    opts
}

/// Resolver for `nameserver`, or for the host configuration when `None`.
pub(crate) fn build_tokio_resolver(nameserver: Option<IpAddr>, timeout: Duration) -> TokioResolver {
    let config = match nameserver {
        Some(ip) => ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from_ips_clear(&[ip], DNS_PORT, true),
        ),
        None => match system_config() {
            Some((config, opts)) => {
                return TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
                    .with_options(snapshot_opts(opts, timeout))
                    .build();
            }
            None => ResolverConfig::default(),
        },
    };

    TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
        .with_options(snapshot_opts(ResolverOpts::default(), timeout))
        .build()
}

fn system_config() -> Option<(ResolverConfig, ResolverOpts)> {
    #[cfg(any(unix, target_os = "windows"))]
    {
        match hickory_resolver::system_conf::read_system_conf() {
            Ok(conf) => return Some(conf),
            Err(e) => log::warn!("Cannot read system DNS configuration, using defaults: {e}"),
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_nameserver_ips_collapses_protocols() {
        let ip: IpAddr = "9.9.9.9".parse().unwrap();
        let other: IpAddr = "149.112.112.112".parse().unwrap();
        let group = NameServerConfigGroup::from_ips_clear(&[ip, other, ip], DNS_PORT, true);
        let config = ResolverConfig::from_parts(None, vec![], group);
        assert_eq!(
            nameserver_ips(&config),
            vec!["9.9.9.9".to_string(), "149.112.112.112".to_string()]
        );
    }

    #[test]
    fn test_nameserver_ips_empty() {
        let config = ResolverConfig::from_parts(None, vec![], NameServerConfigGroup::new());
        assert!(nameserver_ips(&config).is_empty());
    }

    #[test]
    fn test_snapshot_opts() {
        let opts = snapshot_opts(ResolverOpts::default(), Duration::from_secs(4));
        assert_eq!(opts.timeout, Duration::from_secs(4));
        assert_eq!(opts.attempts, 1);
        assert_eq!(opts.ndots, 0);
    }

    #[tokio::test]
    async fn test_build_for_explicit_and_system_servers() {
        let _pinned = build_tokio_resolver(Some("8.8.8.8".parse().unwrap()), Duration::from_secs(2));
        let _system = build_tokio_resolver(None, Duration::from_secs(2));
    }

    #[test]
    fn test_system_label() {
        assert!(SYSTEM_LABEL.starts_with("system"));
    }
}
