//! Единый тип ошибок публичного API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("no delimiter detected in single-column input")]
    DelimiterNotDetected,

    #[error("row {row}: expected {expected} fields, found {found}")]
    FieldCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}: cannot parse {column} from {value:?}")]
    AmountParse {
        column: &'static str,
        row: usize,
        value: String,
    },

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, ReconError>;
