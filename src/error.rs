use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No base records to compute thresholds from")]
    EmptyDataset,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
