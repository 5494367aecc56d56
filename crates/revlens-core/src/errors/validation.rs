//! Ingestion-time validation failures. Raised before any scoring begins.

use super::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required columns: {}", columns.join(", "))]
    MissingColumns {
        columns: Vec<String>,
        found: Vec<String>,
    },

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("dataset has {rows} rows, at most {max_rows} are accepted per run")]
    TooManyRows { rows: usize, max_rows: usize },

    #[error("no valid rows remain after filtering ({dropped} dropped)")]
    NoValidRows { dropped: usize },

    #[error("malformed table: {message}")]
    MalformedTable { message: String },
}

impl ValidationError {
    /// Names of the required columns that were missing, if that is the cause.
    pub fn missing_columns(&self) -> &[String] {
        match self {
            Self::MissingColumns { columns, .. } => columns,
            _ => &[],
        }
    }
}

impl ErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingColumns { .. } => "VALIDATION_MISSING_COLUMNS",
            Self::EmptyDataset => "VALIDATION_EMPTY_DATASET",
            Self::TooManyRows { .. } => "VALIDATION_TOO_MANY_ROWS",
            Self::NoValidRows { .. } => "VALIDATION_NO_VALID_ROWS",
            Self::MalformedTable { .. } => "VALIDATION_MALFORMED_TABLE",
        }
    }
}
