//! Record type enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TargetKind;

/// DNS record type queried during a scan.
///
/// The declaration order is the canonical output order: every per-target
/// outcome list is sorted by it, regardless of the order lookups completed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Name server record.
    Ns,
    /// Text record.
    Txt,
    /// Start of authority record.
    Soa,
    /// Pointer record (reverse DNS).
    Ptr,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
    /// DNSSEC public key record.
    Dnskey,
    /// DNSSEC delegation signer record.
    Ds,
}

impl RecordType {
    /// Every type queried for the apex domain, in canonical order.
    pub const APEX: [Self; 12] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Ns,
        Self::Txt,
        Self::Soa,
        Self::Ptr,
        Self::Srv,
        Self::Caa,
        Self::Dnskey,
        Self::Ds,
    ];

    /// Types queried for subdomain targets.
    pub const SUBDOMAIN: [Self; 3] = [Self::A, Self::Aaaa, Self::Cname];

    /// Record types allowed for a target of the given kind.
    #[must_use]
    pub fn allowed_for(kind: TargetKind) -> &'static [Self] {
        match kind {
            TargetKind::Apex => &Self::APEX,
            TargetKind::Subdomain => &Self::SUBDOMAIN,
        }
    }

    /// Record types whose verbose resolver answer is worth keeping.
    #[must_use]
    pub fn wants_detail(self) -> bool {
        matches!(self, Self::Soa | Self::Ns | Self::Mx)
    }

    /// Uppercase mnemonic (`"AAAA"`, `"DNSKEY"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Txt => "TXT",
            Self::Soa => "SOA",
            Self::Ptr => "PTR",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
            Self::Dnskey => "DNSKEY",
            Self::Ds => "DS",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::APEX
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unsupported DNS record type: {s}"))
    }
}
