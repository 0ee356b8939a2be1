//! Service-level error type.

use inkvert_pipeline::PreprocessError;
use inkvert_trace::TraceError;

/// Any failure while processing one trace request.
///
/// Failures abort the request; there is no partial output. The
/// variant records which stage failed so the boundary can log it.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Preprocessing rejected or failed on the upload.
    #[error("preprocessing failed: {0}")]
    Preprocess(#[from] PreprocessError),

    /// The tracing engine failed.
    #[error("tracing failed: {0}")]
    Trace(#[from] TraceError),

    /// A worker task panicked or was cancelled.
    #[error("worker task failed: {0}")]
    Worker(String),
}

impl ServiceError {
    pub(crate) fn worker(err: tokio::task::JoinError) -> Self {
        Self::Worker(err.to_string())
    }

    /// Short stage name for logging.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Preprocess(_) => "preprocess",
            Self::Trace(_) => "trace",
            Self::Worker(_) => "worker",
        }
    }
}
