//! Scan targets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a target is the scanned domain itself or one of its subdomains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Apex,
    Subdomain,
}

/// A fully-qualified name to query.
///
/// Names are stored lowercase and without a trailing dot, so two targets are
/// equal exactly when they denote the same DNS name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub kind: TargetKind,
}

impl Target {
    #[must_use]
    pub fn apex(name: &str) -> Self {
        Self {
            name: normalize_name(name),
            kind: TargetKind::Apex,
        }
    }

    #[must_use]
    pub fn subdomain(name: &str) -> Self {
        Self {
            name: normalize_name(name),
            kind: TargetKind::Subdomain,
        }
    }

    #[must_use]
    pub fn is_apex(&self) -> bool {
        self.kind == TargetKind::Apex
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Trim, lowercase and drop a trailing root dot.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_name_normalized() {
        let t = Target::subdomain("  WWW.Example.COM. ");
        assert_eq!(t.name, "www.example.com");
        assert_eq!(t.kind, TargetKind::Subdomain);
    }

    #[test]
    fn test_apex_equality_ignores_case() {
        assert_eq!(Target::apex("Example.com"), Target::apex("example.com"));
        assert_ne!(Target::apex("example.com"), Target::subdomain("example.com"));
        assert!(Target::apex("example.com").is_apex());
    }
}
