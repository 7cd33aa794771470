//! Report sinks: console text, CSV and JSON files.

pub mod csv;
pub mod json;
pub mod text;

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use dns_dumper_core::ScanResult;
use tempfile::NamedTempFile;

/// A fully written file held under a temporary sibling name until
/// [`Staged::commit`] renames it over its destination. Dropping it
/// uncommitted removes the temporary file.
pub struct Staged {
    tmp: NamedTempFile,
    path: PathBuf,
}

impl Staged {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn commit(self) -> anyhow::Result<()> {
        self.tmp
            .persist(&self.path)
            .with_context(|| format!("Failed to save {}", self.path.display()))?;
        Ok(())
    }
}

/// Write a file's content next to `path` without touching `path` itself.
pub(crate) fn stage<F>(path: &Path, fill: F) -> anyhow::Result<Staged>
where
    F: FnOnce(&mut dyn Write) -> anyhow::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        fill(&mut writer)?;
        writer
            .flush()
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(Staged {
        tmp,
        path: path.to_path_buf(),
    })
}

/// What [`save_reports`] wrote.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Saved {
    pub csv_rows: Option<usize>,
    pub json: bool,
}

/// Export the requested files. Every file is rendered before any is
/// saved, so a rendering failure leaves no partial set of exports behind.
pub fn save_reports(
    result: &ScanResult,
    csv_path: Option<&Path>,
    json_path: Option<&Path>,
) -> anyhow::Result<Saved> {
    let csv = csv_path
        .map(|path| csv::stage_csv(result, path))
        .transpose()?;
    let json = json_path
        .map(|path| json::stage_json(result, path))
        .transpose()?;

    let mut saved = Saved::default();
    if let Some((staged, rows)) = csv {
        let path = staged.path().to_path_buf();
        staged.commit()?;
        tracing::info!("CSV output saved to: {} ({rows} rows)", path.display());
        saved.csv_rows = Some(rows);
    }
    if let Some(staged) = json {
        let path = staged.path().to_path_buf();
        staged.commit()?;
        tracing::info!("JSON output saved to: {}", path.display());
        saved.json = true;
    }
    Ok(saved)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use dns_dumper_core::{Aggregator, LookupOutcome, RecordType, ScanResult, Target};

    pub const TIMESTAMP: &str = "2024-05-01T12:00:00+00:00";

    /// Apex with A/MX/SOA found, TXT empty, DS failed; `www` resolved, `ftp` not.
    #[allow(clippy::unwrap_used)]
    pub fn sample_result() -> ScanResult {
        let agg = Aggregator::with_timestamp("example.com", TIMESTAMP.to_string());
        let apex = Target::apex("example.com");
        let www = Target::subdomain("www.example.com");
        let ftp = Target::subdomain("ftp.example.com");
        for target in [&apex, &www, &ftp] {
            agg.register(target).unwrap();
        }

        let outcomes = [
            LookupOutcome::found(
                apex.clone(),
                RecordType::A,
                vec!["93.184.216.34".to_string()],
            ),
            LookupOutcome::found(
                apex.clone(),
                RecordType::Mx,
                vec!["10 mail.example.com".to_string(), "20 mx2.example.com".to_string()],
            )
            .with_detail(Some(";; ANSWER SECTION:\nexample.com. 300 IN MX 10 mail.example.com.".to_string())),
            LookupOutcome::found(
                apex.clone(),
                RecordType::Soa,
                vec!["ns1.example.com hostmaster.example.com 1 7200 3600 1209600 300".to_string()],
            ),
            LookupOutcome::empty(apex.clone(), RecordType::Txt),
            LookupOutcome::error(apex.clone(), RecordType::Ds, "query timed out after 10s"),
            LookupOutcome::found(www.clone(), RecordType::Cname, vec!["example.com".to_string()]),
            LookupOutcome::empty(www.clone(), RecordType::A),
            LookupOutcome::empty(ftp.clone(), RecordType::A),
        ];
        for outcome in outcomes {
            agg.add(outcome).unwrap();
        }
        agg.finalize().unwrap()
    }
}
