//! DNS Dumper command-line entry point
//!
//! Snapshots every DNS record of a domain (and its common subdomains) ahead of
//! a registrar or hosting transfer, printing a text report and optionally
//! saving CSV and JSON copies.
//!
//! Exit status is 0 once a scan completes, even when individual lookups
//! failed; anything that prevents a complete result exits 1.

mod cli;
mod logging;
mod output;

use std::process::ExitCode;

use anyhow::{bail, Context};
use cli::Cli;
use dns_dumper_core::services::validate_domain;
use dns_dumper_core::{CatalogConfig, CatalogService, ScanService};
use dns_dumper_resolver::build_resolver;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse_args();
    logging::init(args.verbose, args.quiet);

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Cli) -> anyhow::Result<()> {
    if !args.has_sink() {
        bail!("--quiet suppresses the text report; pass --csv or --json to keep the results");
    }

    let domain = validate_domain(&args.domain)?;
    let config = args.scan_config();

    let custom = args
        .subdomain_list
        .as_deref()
        .map(CatalogService::load_custom)
        .transpose()?;
    let catalog = CatalogService::build(
        &CatalogConfig::default(),
        &domain,
        args.rfc,
        custom.as_deref(),
    )?;

    let resolver = build_resolver(args.resolver.into(), &args.nameserver, config.query_timeout)?;

    let cancel = CancellationToken::new();
    let ctrl_c = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, cancelling scan");
                cancel.cancel();
            }
        }
    });

    let service = ScanService::new(resolver, config);
    let scanned = service.scan(&domain, &catalog, &cancel).await;
    ctrl_c.abort();
    let result = scanned.context("Scan did not complete")?;

    if !args.quiet {
        print!("\n{}", output::text::render_report(&result));
    }

    output::save_reports(&result, args.csv.as_deref(), args.json.as_deref())?;

    if !args.quiet {
        print!("{}", output::text::render_summary(&result.summary()));
    }

    Ok(())
}
