//! Error types for the corner-watermark crate.

use std::path::PathBuf;

/// Errors that can occur while configuring or applying watermarks.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to decode an embedded default watermark PNG.
    #[error("failed to decode embedded watermark PNG: {0}")]
    EmbeddedWatermarkDecode(image::ImageError),

    /// A proportion or opacity value fell outside `[0.0, 1.0]`.
    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    OutOfRange {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// The corner picker was given no corners to choose from.
    #[error("must provide at least one candidate corner")]
    NoCorners,

    /// A watermark file does not exist.
    #[error("watermark file does not exist: {0}")]
    WatermarkNotFound(PathBuf),

    /// A watermark file has an unsupported extension.
    #[error("unsupported watermark format: {path} (supported: .png)")]
    UnsupportedWatermarkFormat {
        /// The rejected path.
        path: PathBuf,
    },

    /// The image format is not supported.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error occurred during image processing (load, save, encode).
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let io_err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io_err.to_string().contains("gone"));

        let range = Error::OutOfRange {
            name: "opacity",
            value: 1.5,
        };
        let msg = range.to_string();
        assert!(msg.contains("opacity"));
        assert!(msg.contains("1.5"));

        let missing = Error::WatermarkNotFound(PathBuf::from("/tmp/mark.png"));
        assert!(missing.to_string().contains("/tmp/mark.png"));

        let bad_ext = Error::UnsupportedWatermarkFormat {
            path: PathBuf::from("mark.jpg"),
        };
        assert!(bad_ext.to_string().contains(".png"));
    }
}
