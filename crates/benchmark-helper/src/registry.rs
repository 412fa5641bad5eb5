use crate::error::BenchmarkError;
use crate::report::{Report, ReportEntry};
use crate::series::Series;
use crate::Result;
use indexmap::IndexMap;
use std::time::{Duration, Instant};
use tracing::{trace, warn};

/// Named timers and their run histories.
///
/// Series are kept in the order their name was first started. The registry
/// does no locking of its own; wrap it in a mutex to share it between
/// threads.
#[derive(Debug, Default)]
pub struct BenchmarkRegistry {
    series: IndexMap<String, Series>,
}

impl BenchmarkRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the timer for `name`.
    ///
    /// A timer that is already running is replaced and its start time lost;
    /// the start still counts towards the series' start count.
    pub fn start(&mut self, name: &str) {
        match self.series.get_mut(name) {
            Some(series) => {
                if series.is_running() {
                    trace!(benchmark = name, "restarting running benchmark");
                }
                series.begin(Instant::now());
            }
            None => {
                self.series
                    .entry(name.to_string())
                    .or_default()
                    .begin(Instant::now());
            }
        }
    }

    /// Stops the timer for `name` and records the run.
    ///
    /// Fails with [`BenchmarkError::NotFound`] if `name` has no running
    /// timer, either because it was never started or because it has already
    /// been stopped. The registry is unchanged on failure.
    pub fn stop(&mut self, name: &str) -> Result<Duration> {
        let now = Instant::now();
        let elapsed = self
            .series
            .get_mut(name)
            .and_then(|series| series.finish(now))
            .ok_or_else(|| BenchmarkError::NotFound { name: name.to_string() })?;

        trace!(benchmark = name, elapsed_ms = elapsed.as_millis() as u64, "benchmark stopped");
        Ok(elapsed)
    }

    /// Aggregates every series into a report.
    ///
    /// The total of each entry is the average run multiplied by the number
    /// of starts, not the number of completed runs. A series with no
    /// completed run fails the whole report with
    /// [`BenchmarkError::EmptyHistory`].
    pub fn report(&self) -> Result<Report> {
        let entries = self
            .series
            .iter()
            .map(|(name, series)| ReportEntry::from_series(name, series))
            .collect::<Result<Vec<_>>>()?;
        Ok(Report::new(entries))
    }

    /// Writes the report to standard output.
    pub fn print(&self) -> Result<()> {
        let report = self.report()?;
        print!("{}", report);
        Ok(())
    }

    /// Drops every series, running or not.
    pub fn clear(&mut self) {
        trace!(series = self.series.len(), "clearing benchmarks");
        self.series.clear();
    }

    /// Times `f` under `name`.
    pub fn measure<T, F>(&mut self, name: &str, f: F) -> Result<T>
    where
        F: FnOnce() -> T,
    {
        self.start(name);
        let result = f();
        self.stop(name)?;
        Ok(result)
    }

    #[inline]
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.get(name)
    }

    #[inline]
    pub fn is_running(&self, name: &str) -> bool {
        self.series.get(name).is_some_and(Series::is_running)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Stops its benchmark when dropped.
pub struct ScopedBenchmark<'a> {
    registry: &'a mut BenchmarkRegistry,
    name: String,
}

impl<'a> ScopedBenchmark<'a> {
    #[inline]
    pub fn new(registry: &'a mut BenchmarkRegistry, name: &str) -> Self {
        registry.start(name);
        Self {
            registry,
            name: name.to_string(),
        }
    }
}

impl<'a> Drop for ScopedBenchmark<'a> {
    fn drop(&mut self) {
        if let Err(e) = self.registry.stop(&self.name) {
            warn!(benchmark = %self.name, error = %e, "scoped benchmark could not be stopped");
        }
    }
}

/// Runs `$code` inside a [`ScopedBenchmark`] for `$name`, yielding the
/// block's value.
#[macro_export]
macro_rules! bench {
    ($registry:expr, $name:expr, $code:block) => {{
        let _benchmark = $crate::registry::ScopedBenchmark::new($registry, $name);
        $code
    }};
}

/// Awaits `$future` between a start and stop of `$name`, yielding
/// `Result<Output>`.
#[macro_export]
macro_rules! bench_async {
    ($registry:expr, $name:expr, $future:expr) => {{
        $registry.start($name);
        let output = $future.await;
        $registry.stop($name).map(|_| output)
    }};
}
