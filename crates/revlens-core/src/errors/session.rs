//! Failures of session-scoped operations against the latest result.

use super::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no analysis result available, run an analysis first")]
    NoAnalysis,

    #[error("unknown backend: {backend_id}")]
    UnknownBackend { backend_id: String },

    #[error("cannot compare backend {backend_id} with itself")]
    IdenticalBackends { backend_id: String },
}

impl ErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoAnalysis => "SESSION_NO_ANALYSIS",
            Self::UnknownBackend { .. } => "SESSION_UNKNOWN_BACKEND",
            Self::IdenticalBackends { .. } => "SESSION_IDENTICAL_BACKENDS",
        }
    }
}
