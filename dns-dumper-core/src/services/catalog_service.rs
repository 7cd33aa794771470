//! Subdomain catalog construction

use std::collections::HashSet;
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::services::is_valid_name;
use crate::types::{CatalogConfig, EntrySource, SubdomainEntry};

/// Builds the ordered, deduplicated list of subdomain entries to query.
///
/// All methods are synchronous, in-memory associated functions.
pub struct CatalogService;

impl CatalogService {
    /// Build the catalog: builtin entries, then RFC labels (when `include_rfc`),
    /// then custom entries.
    ///
    /// Duplicates are detected on the fully-qualified name, case-insensitively,
    /// and the first occurrence wins; an entry naming `domain` itself is a
    /// duplicate of the apex. An entry that does not form a valid host name is
    /// a [`CoreError::CatalogError`] naming its list and the entry.
    pub fn build(
        config: &CatalogConfig,
        domain: &str,
        include_rfc: bool,
        custom: Option<&[String]>,
    ) -> CoreResult<Vec<SubdomainEntry>> {
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(normalize_entry(domain));
        let mut entries = Vec::new();
        let mut push = |entry: SubdomainEntry,
                        entries: &mut Vec<SubdomainEntry>|
         -> CoreResult<bool> {
            if entry.name.is_empty() {
                return Ok(false);
            }
            let fqdn = entry.fqdn(domain);
            if !is_valid_name(&fqdn) {
                return Err(CoreError::CatalogError {
                    source_name: entry.source.list_name().to_string(),
                    message: format!("invalid subdomain entry '{}'", entry.name),
                });
            }
            if !seen.insert(fqdn) {
                log::debug!("Skipping duplicate catalog entry {}", entry.name);
                return Ok(false);
            }
            entries.push(entry);
            Ok(true)
        };

        for name in &config.builtin {
            push(
                SubdomainEntry::new(normalize_entry(name), EntrySource::Builtin),
                &mut entries,
            )?;
        }

        if include_rfc {
            for name in &config.rfc {
                push(
                    SubdomainEntry::new(normalize_entry(name), EntrySource::Rfc),
                    &mut entries,
                )?;
            }
        }

        let mut custom_added = 0usize;
        let mut full_names = 0usize;
        if let Some(lines) = custom {
            for name in Self::parse_custom(lines) {
                let entry = SubdomainEntry::new(name, EntrySource::Custom);
                let is_full = entry.is_full_name();
                if push(entry, &mut entries)? {
                    custom_added += 1;
                    if is_full {
                        full_names += 1;
                    }
                }
            }
        }

        log::info!(
            "Subdomain catalog: {} entries ({} custom, {} of them full names)",
            entries.len(),
            custom_added,
            full_names
        );
        Ok(entries)
    }

    /// Extract entries from raw custom-list lines.
    ///
    /// Lines are trimmed; blank lines and `#` comments are skipped. Entries
    /// are lowercased but otherwise kept verbatim.
    pub fn parse_custom<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.as_ref().trim())
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(normalize_entry)
            .collect()
    }

    /// Read a custom list file, one entry per line.
    ///
    /// An unreadable file is fatal for the scan and names the offending path.
    pub fn load_custom(path: &Path) -> CoreResult<Vec<String>> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::CatalogError {
            source_name: path.display().to_string(),
            message: e.to_string(),
        })?;
        let lines: Vec<String> = content.lines().map(ToString::to_string).collect();
        let entries = Self::parse_custom(&lines);
        log::info!(
            "Loaded {} custom subdomains from {}",
            entries.len(),
            path.display()
        );
        Ok(entries)
    }
}

fn normalize_entry(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}
