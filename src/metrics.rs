//! Publishing benchmark reports through the `metrics` facade

use benchmark_helper::{Report, ReportEntry};
use metrics::{counter, gauge};

pub const RUNS_STARTED: &str = "benchmark_runs_started";
pub const AVERAGE_MS: &str = "benchmark_average_ms";
pub const TOTAL_MS: &str = "benchmark_total_ms";

/// Records every entry of `report`. A no-op unless a recorder is installed.
pub fn publish_report(report: &Report) {
    for entry in report.entries() {
        publish_entry(entry);
    }
}

pub fn publish_entry(entry: &ReportEntry) {
    let name = entry.name.clone();
    counter!(RUNS_STARTED, "name" => name.clone()).absolute(entry.times);
    gauge!(AVERAGE_MS, "name" => name.clone()).set(entry.average_ms);
    gauge!(TOTAL_MS, "name" => name).set(entry.total_ms);
}
