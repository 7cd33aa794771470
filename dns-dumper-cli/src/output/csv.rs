//! CSV export.
//!
//! One row per found record value; the apex leaves the `Subdomain` column empty.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;
use dns_dumper_core::ScanResult;

use super::Staged;

const HEADER: [&str; 5] = ["Domain", "Subdomain", "Record Type", "Value", "Timestamp"];

/// Render `result` as CSV for `path`, alongside the number of data rows.
pub fn stage_csv(result: &ScanResult, path: &Path) -> Result<(Staged, usize)> {
    let mut rows = 0;
    let staged = super::stage(path, |w| {
        rows = write_rows(result, w)?;
        Ok(())
    })
    .with_context(|| format!("Failed to export CSV to {}", path.display()))?;
    Ok((staged, rows))
}

fn write_rows(result: &ScanResult, out: &mut dyn Write) -> Result<usize> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(HEADER)?;

    let mut rows = 0;
    for target in result.targets() {
        let subdomain = if target.target.is_apex() {
            ""
        } else {
            target.target.name.as_str()
        };
        for outcome in target.found() {
            for value in &outcome.values {
                writer.write_record([
                    result.domain.as_str(),
                    subdomain,
                    outcome.record_type.as_str(),
                    value.as_str(),
                    result.timestamp.as_str(),
                ])?;
                rows += 1;
            }
        }
    }

    writer.flush().context("Failed to flush CSV writer")?;
    Ok(rows)
}
