use crate::error::BenchmarkError;
use crate::format::{duration_from_millis_f64, DurationStyle};
use crate::series::{Series, SeriesStats};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

const RULE: &str = "==================";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub duration_style: DurationStyle,
    pub include_percentiles: bool,
}

/// Aggregate of one series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub name: String,
    /// Number of times the series was started.
    pub times: u64,
    pub average_ms: f64,
    /// `average_ms * times`.
    pub total_ms: f64,
    pub average: Duration,
    pub total: Duration,
    pub stats: SeriesStats,
}

impl ReportEntry {
    pub(crate) fn from_series(name: &str, series: &Series) -> Result<Self> {
        let stats = series.stats().ok_or_else(|| BenchmarkError::EmptyHistory {
            name: name.to_string(),
        })?;
        let times = series.start_count();
        let average_ms = stats.mean_ms;
        let total_ms = average_ms * times as f64;

        Ok(Self {
            name: name.to_string(),
            times,
            average_ms,
            total_ms,
            average: duration_from_millis_f64(average_ms),
            total: duration_from_millis_f64(total_ms),
            stats,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    entries: Vec<ReportEntry>,
    generated_at: DateTime<Utc>,
    #[serde(skip)]
    config: ReportConfig,
}

impl Report {
    pub fn new(entries: Vec<ReportEntry>) -> Self {
        Self {
            entries,
            generated_at: Utc::now(),
            config: ReportConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    #[inline]
    pub fn entry(&self, name: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    #[inline]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    #[inline]
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write!(writer, "{}", self)?;
        Ok(())
    }

    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["name", "times", "average_ms", "total_ms"])?;
        for entry in &self.entries {
            writer.write_record(&[
                entry.name.clone(),
                entry.times.to_string(),
                format!("{:.3}", entry.average_ms),
                format!("{:.3}", entry.total_ms),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.config.duration_style;
        writeln!(f, "Benchmark Results:")?;
        writeln!(f, "{}", RULE)?;
        if self.config.include_percentiles {
            writeln!(f, "Name: Times: Average: Total: P50: P95: P99")?;
        } else {
            writeln!(f, "Name: Times: Average: Total")?;
        }
        for entry in &self.entries {
            write!(
                f,
                "{}: {}: {} {}",
                entry.name,
                entry.times,
                style.format(entry.average),
                style.format(entry.total),
            )?;
            if self.config.include_percentiles {
                let p = entry.stats.percentiles;
                write!(f, " {}ms {}ms {}ms", p.p50, p.p95, p.p99)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", RULE)
    }
}
