//! Error types for deck assembly.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling a deck.
///
/// Malformed description HTML is never an error: the offending node is
/// skipped and normalization continues.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read an input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse a JSON document (feature records or configuration).
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The configuration value is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A region or image reported a zero dimension. This is a decoding or
    /// layout defect upstream, not a normal absence.
    #[error(
        "Invalid dimensions: region {region_width}x{region_height}, image {image_width}x{image_height}"
    )]
    InvalidDimensions {
        region_width: i64,
        region_height: i64,
        image_width: u32,
        image_height: u32,
    },

    /// An image could not be fetched, is not an image, or failed verification.
    #[error("Image unavailable ({url}): {reason}")]
    ImageUnavailable { url: String, reason: String },

    /// ZIP archive error (for PPTX templates).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing or writing error (for PPTX templates and DrawingML).
    #[error("XML error: {0}")]
    XmlError(String),

    /// The requested slide layout does not exist in the template.
    #[error("Slide layout not found: {0}")]
    LayoutNotFound(String),
}

impl Error {
    /// Build an [`Error::ImageUnavailable`] for the given URL.
    pub fn image_unavailable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ImageUnavailable {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
