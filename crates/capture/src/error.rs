use thiserror::Error;

/// Errors surfaced by capture backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CaptureError {
    #[error("no usable input device: {0}")]
    DeviceUnavailable(String),

    #[error("a capture is already in progress")]
    CaptureInProgress,

    #[error("capture produced no audio")]
    EmptyCapture,

    #[error("audio backend error: {0}")]
    Backend(String),
}
