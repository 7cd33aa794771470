//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use dns_dumper_core::types::{DEFAULT_CONCURRENCY, DEFAULT_QUERY_TIMEOUT_SECS};
use dns_dumper_core::ScanConfig;
use dns_dumper_resolver::{Backend, DEFAULT_NAMESERVER};

/// Resolver backend selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResolverArg {
    /// Built-in resolver (hickory)
    Hickory,
    /// The external `dig` utility
    Dig,
}

impl From<ResolverArg> for Backend {
    fn from(arg: ResolverArg) -> Self {
        match arg {
            ResolverArg::Hickory => Self::Hickory,
            ResolverArg::Dig => Self::Dig,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dns-dumper")]
#[command(about = "Extract comprehensive DNS records for domain transfers")]
#[command(version)]
pub struct Cli {
    /// Domain to analyze
    pub domain: String,

    /// Save results to CSV file
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Save results to JSON file
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Suppress progress output and the text report
    #[arg(short, long)]
    pub quiet: bool,

    /// Show per-lookup debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Skip subdomain scanning
    #[arg(long)]
    pub no_subdomains: bool,

    /// Also query RFC service-discovery labels (_sip._tcp, _dmarc, ...)
    #[arg(long)]
    pub rfc: bool,

    /// Load additional subdomains from file (one per line)
    #[arg(long, value_name = "FILE")]
    pub subdomain_list: Option<PathBuf>,

    /// Nameserver to query, or "system" for the host configuration
    #[arg(long, default_value = DEFAULT_NAMESERVER)]
    pub nameserver: String,

    /// Lookup mechanism
    #[arg(long, value_enum, default_value_t = ResolverArg::Hickory)]
    pub resolver: ResolverArg,

    /// Maximum number of lookups in flight
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY,
          value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=256))]
    pub concurrency: usize,

    /// Per-lookup timeout in seconds
    #[arg(long, default_value_t = DEFAULT_QUERY_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout: u64,

    /// Do not fetch verbose answers for SOA/NS/MX records
    #[arg(long)]
    pub no_detailed: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The text report is a sink unless `--quiet`; otherwise a file is required.
    pub fn has_sink(&self) -> bool {
        !self.quiet || self.csv.is_some() || self.json.is_some()
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            concurrency: self.concurrency,
            query_timeout: Duration::from_secs(self.timeout),
            include_subdomains: !self.no_subdomains,
            detailed_records: !self.no_detailed,
        }
    }
}
