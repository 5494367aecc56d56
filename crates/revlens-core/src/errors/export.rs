//! Tabular export failures.

use super::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv write failed: {message}")]
    Csv { message: String },
}

impl ErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Csv { .. } => "EXPORT_CSV",
        }
    }
}
