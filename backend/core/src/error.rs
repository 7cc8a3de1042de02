use thiserror::Error;

/// Top-level error type for the PageTalk relay runtime.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Client sent a body we refuse to process. The fixed message is the
    /// only detail ever echoed back; parse specifics stay in the logs.
    #[error("Invalid request body: messages array is required.")]
    InvalidRequest,

    /// Provider invocation failed before any bytes were streamed.
    #[error("{message}")]
    Provider { message: String },

    /// Fault after the response stream was committed. Surfaces as a broken
    /// stream, never as a status change.
    #[error("{0}")]
    Stream(String),
}
