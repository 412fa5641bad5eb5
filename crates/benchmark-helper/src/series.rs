use crate::histogram::{Histogram, Percentiles};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Timing state and history for one benchmark name.
#[derive(Debug, Clone, Default)]
pub struct Series {
    active: Option<Instant>,
    runs: Vec<u64>,
    starts: u64,
}

impl Series {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a run at `now`, replacing any start that was never stopped.
    #[inline]
    pub(crate) fn begin(&mut self, now: Instant) {
        self.active = Some(now);
        self.starts += 1;
    }

    /// Ends the running timer and appends its length in whole milliseconds.
    /// Returns `None` without touching the history if nothing is running.
    #[inline]
    pub(crate) fn finish(&mut self, now: Instant) -> Option<Duration> {
        let started = self.active.take()?;
        let elapsed = now.saturating_duration_since(started);
        self.runs.push(elapsed.as_millis() as u64);
        Some(elapsed)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    #[inline]
    pub fn start_count(&self) -> u64 {
        self.starts
    }

    /// Completed runs in milliseconds, oldest first.
    #[inline]
    pub fn runs(&self) -> &[u64] {
        &self.runs
    }

    #[inline]
    pub fn completed(&self) -> usize {
        self.runs.len()
    }

    /// Arithmetic mean of completed runs in milliseconds.
    #[inline]
    pub fn average_ms(&self) -> Option<f64> {
        if self.runs.is_empty() {
            return None;
        }
        let sum: u64 = self.runs.iter().sum();
        Some(sum as f64 / self.runs.len() as f64)
    }

    pub fn stats(&self) -> Option<SeriesStats> {
        let mean_ms = self.average_ms()?;
        let count = self.runs.len() as f64;
        let variance = if self.runs.len() <= 1 {
            0.0
        } else {
            let sum_squared: f64 = self.runs.iter().map(|&r| (r as f64) * (r as f64)).sum();
            (sum_squared / count - mean_ms * mean_ms).max(0.0)
        };
        let histogram = Histogram::from_runs(&self.runs);

        Some(SeriesStats {
            count: self.runs.len() as u64,
            min_ms: self.runs.iter().copied().min().unwrap_or(0),
            max_ms: self.runs.iter().copied().max().unwrap_or(0),
            mean_ms,
            std_dev_ms: variance.sqrt(),
            percentiles: histogram.percentiles(),
        })
    }
}

/// Summary of the completed runs of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub count: u64,
    pub min_ms: u64,
    pub max_ms: u64,
    pub mean_ms: f64,
    pub std_dev_ms: f64,
    pub percentiles: Percentiles,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_with_runs(runs: &[u64]) -> Series {
        Series {
            active: None,
            runs: runs.to_vec(),
            starts: runs.len() as u64,
        }
    }

    #[test]
    fn test_new_series_is_idle() {
        let series = Series::new();
        assert!(!series.is_running());
        assert_eq!(series.start_count(), 0);
        assert!(series.runs().is_empty());
        assert_eq!(series.average_ms(), None);
        assert!(series.stats().is_none());
    }

    #[test]
    fn test_begin_and_finish() {
        let mut series = Series::new();
        let t0 = Instant::now();

        series.begin(t0);
        assert!(series.is_running());

        let elapsed = series.finish(t0 + Duration::from_micros(12_900)).unwrap();
        assert_eq!(elapsed, Duration::from_micros(12_900));
        // Truncated, not rounded.
        assert_eq!(series.runs(), &[12]);
        assert!(!series.is_running());
    }

    #[test]
    fn test_finish_without_begin() {
        let mut series = Series::new();
        assert!(series.finish(Instant::now()).is_none());
        assert!(series.runs().is_empty());
    }

    #[test]
    fn test_restart_discards_previous_start() {
        let mut series = Series::new();
        let t0 = Instant::now();

        series.begin(t0);
        series.begin(t0 + Duration::from_millis(100));
        series.finish(t0 + Duration::from_millis(130));

        assert_eq!(series.runs(), &[30]);
        assert_eq!(series.start_count(), 2);
    }

    #[test]
    fn test_stats() {
        let series = series_with_runs(&[50, 30]);
        let stats = series.stats().unwrap();

        assert_eq!(stats.count, 2);
        assert_eq!(stats.min_ms, 30);
        assert_eq!(stats.max_ms, 50);
        assert_eq!(stats.mean_ms, 40.0);
        assert!((stats.std_dev_ms - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_long_run_percentiles_do_not_exceed_max() {
        let stats = series_with_runs(&[5000, 2048]).stats().unwrap();

        assert_eq!(stats.max_ms, 5000);
        assert!(stats.percentiles.p99 <= stats.max_ms);
        assert!(stats.percentiles.p50 >= stats.min_ms);
        assert_eq!(stats.percentiles.p99, 5000);
    }

    #[test]
    fn test_single_run_has_zero_deviation() {
        let stats = series_with_runs(&[7]).stats().unwrap();
        assert_eq!(stats.std_dev_ms, 0.0);
        assert_eq!(stats.percentiles.p50, 7);
    }
}
