//! # Project Alpha benchmark helper
//!
//! Wall-clock instrumentation for named code sections:
//! - Start/stop timers keyed by name, repeatable across runs
//! - Aggregate reports (times started, average, total)
//! - Layered configuration and `metrics` publishing

pub mod config;
pub mod metrics;
pub mod utils;

pub use benchmark_helper;
pub use benchmark_helper::{BenchmarkError, BenchmarkRegistry, Report, ReportConfig};

use parking_lot::Mutex;
use std::sync::Arc;

/// Registry shared between threads. The registry itself does no locking.
pub type SharedRegistry = Arc<Mutex<BenchmarkRegistry>>;
pub type Result<T> = anyhow::Result<T>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

pub fn shared_registry() -> SharedRegistry {
    Arc::new(Mutex::new(BenchmarkRegistry::new()))
}
