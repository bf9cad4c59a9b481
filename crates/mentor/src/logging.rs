use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Filter used by `--verbose`
pub const VERBOSE_FILTER: &str = "mentor=debug,warn";

/// Pick the active filter: RUST_LOG wins, then verbose, then the configured default
pub fn filter(verbose: bool, configured: &str) -> EnvFilter {
  if let Ok(filter) = EnvFilter::try_from_default_env() {
    return filter;
  }

  if verbose {
    EnvFilter::new(VERBOSE_FILTER)
  } else {
    EnvFilter::new(configured)
  }
}

/// Install the global subscriber. Logs go to stderr so JSON output stays clean.
pub fn init(verbose: bool, configured: &str) {
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
    .with(filter(verbose, configured))
    .init();
}
