//! Normalized result of a single lookup.

use serde::{Deserialize, Serialize};

use super::{RecordType, Target};

/// Status of one (target, record type) lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStatus {
    /// The resolver answered with at least one record.
    Found,
    /// The resolver answered successfully but with no records.
    Empty,
    /// The lookup failed (timeout, refusal, malformed answer, process failure).
    Error,
}

/// Result of one Record Query Unit invocation.
///
/// Built through [`found`](Self::found), [`empty`](Self::empty) or
/// [`error`](Self::error): `values` is non-empty only for `Found` and
/// `error_detail` is present only for `Error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupOutcome {
    pub target: Target,
    pub record_type: RecordType,
    pub status: LookupStatus,
    pub values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
    /// Verbose resolver answer, kept for SOA/NS/MX on the apex.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl LookupOutcome {
    /// Outcome for a lookup that returned records.
    ///
    /// An empty `values` list degrades to [`empty`](Self::empty).
    #[must_use]
    pub fn found(target: Target, record_type: RecordType, values: Vec<String>) -> Self {
        if values.is_empty() {
            return Self::empty(target, record_type);
        }
        Self {
            target,
            record_type,
            status: LookupStatus::Found,
            values,
            error_detail: None,
            detail: None,
        }
    }

    #[must_use]
    pub fn empty(target: Target, record_type: RecordType) -> Self {
        Self {
            target,
            record_type,
            status: LookupStatus::Empty,
            values: Vec::new(),
            error_detail: None,
            detail: None,
        }
    }

    #[must_use]
    pub fn error(target: Target, record_type: RecordType, detail: impl Into<String>) -> Self {
        Self {
            target,
            record_type,
            status: LookupStatus::Error,
            values: Vec::new(),
            error_detail: Some(detail.into()),
            detail: None,
        }
    }

    /// Attach a verbose answer. Ignored unless the outcome is `Found`.
    #[must_use]
    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        if self.is_found() {
            self.detail = detail.filter(|d| !d.trim().is_empty());
        }
        self
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        self.status == LookupStatus::Found
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == LookupStatus::Error
    }
}
