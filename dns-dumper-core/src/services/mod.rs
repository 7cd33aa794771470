//! Engine services

mod aggregator;
mod catalog_service;
mod query_service;
mod scan_service;

pub use aggregator::Aggregator;
pub use catalog_service::CatalogService;
pub use query_service::QueryService;
pub use scan_service::ScanService;

use crate::error::{CoreError, CoreResult};

/// Maximum length of a DNS name in presentation form.
const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Validate and normalise the scanned domain.
///
/// Trims whitespace and a trailing root dot, converts internationalised names
/// to ASCII via IDNA 2008, and rejects empty or overlong inputs.
pub fn validate_domain(domain: &str) -> CoreResult<String> {
    let domain = domain.trim().trim_end_matches('.');
    if domain.is_empty() {
        return Err(CoreError::ValidationError(
            "Domain name is required".to_string(),
        ));
    }
    let ascii_domain = idna::domain_to_ascii_strict(domain)
        .map_err(|_| CoreError::ValidationError(format!("Invalid domain name: {domain}")))?;
    if ascii_domain.len() > MAX_NAME_LEN {
        return Err(CoreError::ValidationError(format!(
            "Domain name exceeds maximum length of 253 characters (got {})",
            ascii_domain.len()
        )));
    }
    Ok(ascii_domain)
}

/// Letters, digits, `-` and `_` in non-empty labels of at most 63 bytes, and
/// at most 253 bytes overall.
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= MAX_LABEL_LEN
                && label
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        })
}
