//! JSON export: the whole scan result plus its summary, pretty-printed.

use std::path::Path;

use anyhow::{Context, Result};
use dns_dumper_core::{ScanResult, ScanSummary};
use serde::Serialize;

use super::Staged;

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a ScanResult,
    summary: ScanSummary,
}

/// Render `result` and its summary as JSON for `path`.
pub fn stage_json(result: &ScanResult, path: &Path) -> Result<Staged> {
    let report = JsonReport {
        result,
        summary: result.summary(),
    };
    super::stage(path, |w| {
        serde_json::to_writer_pretty(&mut *w, &report)?;
        w.write_all(b"\n")?;
        Ok(())
    })
    .with_context(|| format!("Failed to export JSON to {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::output::fixtures::sample_result;

    #[test]
    fn test_json_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        stage_json(&sample_result(), &path).unwrap().commit().unwrap();

        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["domain"], "example.com");
        assert_eq!(doc["summary"]["totalRecords"], 5);
        assert_eq!(doc["summary"]["errors"], 1);

        let targets = doc["targets"].as_array().unwrap();
        assert_eq!(targets.len(), 3);
        assert_eq!(targets[0]["target"]["kind"], "apex");

        // Empty and failed lookups are kept, with their status
        let apex = targets[0]["outcomes"].as_array().unwrap();
        let txt = apex.iter().find(|o| o["recordType"] == "TXT").unwrap();
        assert_eq!(txt["status"], "empty");
        let ds = apex.iter().find(|o| o["recordType"] == "DS").unwrap();
        assert_eq!(ds["status"], "error");
        assert_eq!(ds["errorDetail"], "query timed out after 10s");
    }

    #[test]
    fn test_json_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, "stale").unwrap();

        stage_json(&sample_result(), &path).unwrap().commit().unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.starts_with('{'));
        assert!(body.ends_with("}\n"));
    }
}
