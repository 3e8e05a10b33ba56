//! Error types for the capture and compositing pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while capturing and compositing pages
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to launch or configure the renderer
    #[error("Renderer initialization failed: {0}")]
    InitializationError(String),

    /// Failed to navigate to a page
    #[error("Failed to load URL: {0}")]
    NavigationError(String),

    /// Failed to capture a screenshot from the renderer
    #[error("Capture failed: {0}")]
    CaptureError(String),

    /// Failed to execute a page-adjustment script
    #[error("Script execution failed: {0}")]
    ScriptError(String),

    /// An expected page element was not found
    #[error("Element not found: {0}")]
    MissingElement(String),

    /// Operation timed out
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),

    /// Crop ratios outside the valid range were passed by the caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failed to decode or encode a raster image
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem error while persisting outputs
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "cdp")]
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}
