//! Named wall-clock timers for instrumenting code sections.
//!
//! A [`BenchmarkRegistry`] tracks one [`Series`] per name. Each `start`/`stop`
//! pair appends a run (whole milliseconds) to the series history, and
//! [`BenchmarkRegistry::report`] aggregates every series into a [`Report`].

pub mod error;
pub mod format;
pub mod histogram;
pub mod registry;
pub mod report;
pub mod series;

pub use error::BenchmarkError;
pub use format::{format_clock, format_compact, DurationStyle};
pub use histogram::Histogram;
pub use registry::{BenchmarkRegistry, ScopedBenchmark};
pub use report::{Report, ReportConfig, ReportEntry};
pub use series::{Series, SeriesStats};

pub type Result<T> = std::result::Result<T, BenchmarkError>;
