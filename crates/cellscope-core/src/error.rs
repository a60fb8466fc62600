use thiserror::Error;

/// Rejected statistic-panel operations. State is left unchanged.
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("entry {0} already exists")]
    DuplicateKey(String),
    #[error("entry {0} not found")]
    UnknownKey(String),
    #[error("unit index {index} out of range ({count} units)")]
    UnknownUnit { index: usize, count: usize },
    #[error("area unit factor must be positive and finite, got {0}")]
    InvalidFactor(f64),
}
