//! Utility functions and helpers

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed, e.g. by a test harness.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// First positional argument, taken as the config file path.
pub fn config_path_from_args<I>(args: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter().nth(1).map(PathBuf::from)
}
