use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchmarkError {
    /// `stop` was called for a name that has no running timer.
    #[error("No running benchmark named '{name}'")]
    NotFound { name: String },
    /// A series was started but never stopped, so it has no average.
    #[error("Benchmark '{name}' has no completed runs")]
    EmptyHistory { name: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
}

impl BenchmarkError {
    pub fn name(&self) -> Option<&str> {
        match self {
            BenchmarkError::NotFound { name } | BenchmarkError::EmptyHistory { name } => Some(name),
            _ => None,
        }
    }
}
