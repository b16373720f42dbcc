use thiserror::Error;

use crate::pipeline::PipelineError;

/// Per-message errors at the decode boundary. These drop one message and
/// never stop the dispatch loop.
///
/// # Examples
/// ```
/// use linecode_core::pdu::BoundaryError;
///
/// let err = BoundaryError::UnsupportedPayloadType { found: "text" };
/// assert!(err.to_string().contains("expected bytes, got text"));
/// ```
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("unsupported payload type: expected bytes, got {found}")]
    UnsupportedPayloadType { found: &'static str },
    #[error("decode failed: {0}")]
    Pipeline(#[from] PipelineError),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sink accepts byte payloads only, got {found}")]
    UnsupportedPayloadType { found: &'static str },
}

/// Errors that stop a dispatch run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),
}
