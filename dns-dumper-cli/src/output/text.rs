//! Console report.

use std::fmt::Write as _;

use dns_dumper_core::{ScanResult, ScanSummary};

const RULE_WIDTH: usize = 60;

/// Render the full human-readable report.
pub fn render_report(result: &ScanResult) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "DNS RECORDS FOR: {}", result.domain);
    let _ = writeln!(out, "Extracted on: {}", result.timestamp);
    let _ = writeln!(out, "{rule}");

    out.push_str("\nMAIN DOMAIN RECORDS:\n");
    let mut apex_found = false;
    if let Some(apex) = result.apex() {
        for outcome in apex.found() {
            apex_found = true;
            let _ = writeln!(
                out,
                "\n{} Records ({} found):",
                outcome.record_type,
                outcome.values.len()
            );
            let _ = writeln!(out, "{}", "-".repeat(40));
            for value in &outcome.values {
                let _ = writeln!(out, "  {value}");
            }
            if let Some(detail) = &outcome.detail {
                let _ = writeln!(out, "\nDetailed {} Information:", outcome.record_type);
                let _ = writeln!(out, "{}", detail.trim_end());
            }
        }
    }
    if !apex_found {
        out.push_str("\nNo records found.\n");
    }

    let resolved: Vec<_> = result.resolved_subdomains().collect();
    if resolved.is_empty() {
        if result.subdomains().next().is_some() {
            out.push_str("\nNo subdomain records found.\n");
        }
    } else {
        let _ = writeln!(out, "\n{rule}");
        let _ = writeln!(out, "SUBDOMAIN RECORDS ({} found):", resolved.len());
        let _ = writeln!(out, "{rule}");
        for sub in resolved {
            let _ = writeln!(out, "\n{}:", sub.target.name);
            let _ = writeln!(out, "{}", "-".repeat(sub.target.name.len()));
            for outcome in sub.found() {
                let _ = writeln!(
                    out,
                    "  {}: {}",
                    outcome.record_type,
                    outcome.values.join(", ")
                );
            }
        }
    }

    let errors: Vec<_> = result.outcomes().filter(|o| o.is_error()).collect();
    if !errors.is_empty() {
        let _ = writeln!(out, "\nLOOKUP ERRORS ({}):", errors.len());
        for outcome in errors {
            let _ = writeln!(
                out,
                "  {} {}: {}",
                outcome.target.name,
                outcome.record_type,
                outcome.error_detail.as_deref().unwrap_or("unknown error")
            );
        }
    }

    out
}

/// Render the closing summary block.
pub fn render_summary(summary: &ScanSummary) -> String {
    let mut out = String::from("\nSummary:\n");
    let _ = writeln!(
        out,
        "  Main domain: {} DNS records across {} record types",
        summary.apex_records, summary.apex_record_types
    );
    if summary.resolved_subdomains > 0 {
        let _ = writeln!(
            out,
            "  Subdomains: {} records across {} subdomains",
            summary.subdomain_records, summary.resolved_subdomains
        );
    }
    if summary.errors > 0 {
        let _ = writeln!(out, "  Errors: {} lookups failed", summary.errors);
    }
    let _ = writeln!(out, "  Total: {} DNS records", summary.total_records);
    out
}
