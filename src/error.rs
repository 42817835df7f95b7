use thiserror::Error;

/// Errors that can occur during gesture state transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// Attempted to transition between incompatible states
    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

/// Errors that can occur while exporting the canvas
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),

    /// The browser refused one of the download steps
    #[error("Browser download failed: {0}")]
    Web(String),
}
