use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for the chosen verbosity. hickory is noisy below `warn`.
fn default_directives(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug,hickory_proto=info,hickory_resolver=info"
    } else if quiet {
        "warn"
    } else {
        "info,hickory_proto=warn,hickory_resolver=warn"
    }
}

/// Initialize tracing to stderr; stdout carries the report.
///
/// `RUST_LOG` overrides the verbosity flags. `log` records from the library
/// crates are bridged into the same subscriber.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, quiet)));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(verbose),
        )
        .with(filter)
        .init();
}
