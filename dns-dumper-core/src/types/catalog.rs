//! Subdomain catalog entries and the fixed word lists they are built from.

use serde::{Deserialize, Serialize};

/// Where a catalog entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    Builtin,
    Rfc,
    Custom,
}

impl EntrySource {
    /// Name of the list an entry came from, for diagnostics.
    #[must_use]
    pub fn list_name(self) -> &'static str {
        match self {
            Self::Builtin => "builtin list",
            Self::Rfc => "RFC service list",
            Self::Custom => "custom list",
        }
    }
}

/// A label or multi-level name queued for probing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubdomainEntry {
    pub name: String,
    pub source: EntrySource,
}

impl SubdomainEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, source: EntrySource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    /// A dotted entry is a complete name and is queried as-is.
    ///
    /// RFC labels such as `_sip._tcp` are dotted too, but they are always
    /// relative to the scanned domain.
    #[must_use]
    pub fn is_full_name(&self) -> bool {
        self.source == EntrySource::Custom && self.name.contains('.')
    }

    /// Fully-qualified (lowercase) name this entry resolves to under `domain`.
    #[must_use]
    pub fn fqdn(&self, domain: &str) -> String {
        let name = self.name.trim().trim_end_matches('.').to_ascii_lowercase();
        if self.is_full_name() {
            name
        } else {
            format!("{name}.{}", domain.trim_end_matches('.').to_ascii_lowercase())
        }
    }
}

/// Immutable word lists the catalog is built from.
///
/// Passed explicitly into [`CatalogService::build`](crate::CatalogService::build);
/// there is no process-wide list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub builtin: Vec<String>,
    pub rfc: Vec<String>,
}

impl CatalogConfig {
    #[must_use]
    pub fn new(builtin: Vec<String>, rfc: Vec<String>) -> Self {
        Self { builtin, rfc }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            builtin: BUILTIN_SUBDOMAINS.iter().map(ToString::to_string).collect(),
            rfc: RFC_SERVICE_LABELS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Common hostnames, grouped roughly by purpose.
pub const BUILTIN_SUBDOMAINS: &[&str] = &[
    // web
    "www", "blog", "shop", "store", "api", "cdn", "static",
    // mail
    "mail", "smtp", "pop", "imap", "webmail",
    // files
    "ftp", "img", "images", "assets", "files", "download", "uploads",
    // dev
    "dev", "test", "staging", "beta", "demo",
    // support
    "support", "help", "docs", "wiki", "forum", "news",
    // admin
    "admin", "portal", "login", "cpanel", "whm",
    // infra
    "secure", "vpn", "remote", "ns1", "ns2", "mx1", "mx2",
    // mobile
    "mobile", "app",
];

/// Service-discovery and policy labels (`_service._proto` convention).
pub const RFC_SERVICE_LABELS: &[&str] = &[
    // VoIP (RFC 3263)
    "_sip._tcp",
    "_sip._udp",
    "_sips._tcp",
    // Messaging (RFC 6120)
    "_xmpp-client._tcp",
    "_xmpp-server._tcp",
    // Directory and auth (RFC 2782, RFC 4120)
    "_ldap._tcp",
    "_kerberos._tcp",
    "_kerberos._udp",
    "_kpasswd._tcp",
    // Calendars and contacts (RFC 6764)
    "_caldav._tcp",
    "_caldavs._tcp",
    "_carddav._tcp",
    "_carddavs._tcp",
    // Mail client autoconfiguration (RFC 6186, RFC 8314)
    "_imap._tcp",
    "_imaps._tcp",
    "_pop3._tcp",
    "_pop3s._tcp",
    "_submission._tcp",
    "_submissions._tcp",
    "_autodiscover._tcp",
    // NAT traversal (RFC 5389, RFC 5766)
    "_stun._udp",
    "_turn._udp",
    "_turns._tcp",
    // Chat and games
    "_matrix._tcp",
    "_minecraft._tcp",
    // Web and time
    "_http._tcp",
    "_ntp._udp",
    // Mail policy (RFC 7489, RFC 8461, RFC 8460)
    "_dmarc",
    "_mta-sts",
    "_smtp._tls",
    "_domainkey",
];
