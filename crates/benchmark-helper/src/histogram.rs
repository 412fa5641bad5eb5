use hdrhistogram::Histogram as HdrHistogram;
use serde::{Deserialize, Serialize};

const SIGNIFICANT_FIGURES: u8 = 3;

/// Distribution of run durations in whole milliseconds.
#[derive(Debug, Clone)]
pub struct Histogram {
    inner: HdrHistogram<u64>,
    count: u64,
    // Exact extremes; the inner histogram only knows bucket bounds.
    min: u64,
    max: u64,
}

impl Histogram {
    #[inline]
    pub fn new() -> Self {
        Self {
            // Auto-resizing; only fails for more than five significant figures.
            inner: HdrHistogram::<u64>::new(SIGNIFICANT_FIGURES)
                .expect("three significant figures is a valid histogram precision"),
            count: 0,
            min: u64::MAX,
            max: 0,
        }
    }

    pub fn from_runs(runs: &[u64]) -> Self {
        let mut histogram = Self::new();
        for &run in runs {
            histogram.record(run);
        }
        histogram
    }

    #[inline]
    pub fn record(&mut self, millis: u64) {
        if self.inner.record(millis).is_ok() {
            self.count += 1;
            self.min = self.min.min(millis);
            self.max = self.max.max(millis);
        }
    }

    /// Value at `percentile`, taken as the lower bound of its bucket and
    /// kept within the recorded range.
    #[inline]
    pub fn percentile(&self, percentile: f64) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let value = self.inner.value_at_percentile(percentile);
        self.inner.lowest_equivalent(value).clamp(self.min, self.max)
    }

    #[inline]
    pub fn min(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.min
        }
    }

    #[inline]
    pub fn max(&self) -> u64 {
        self.max
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.inner.mean()
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn percentiles(&self) -> Percentiles {
        Percentiles {
            p50: self.percentile(50.0),
            p95: self.percentile(95.0),
            p99: self.percentile(99.0),
        }
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percentiles {
    pub p50: u64,
    pub p95: u64,
    pub p99: u64,
}
