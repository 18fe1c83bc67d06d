use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input file '{0}' does not exist")]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("error decoding image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("TIFF encoding error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("WebP encoding error: {0}")]
    WebpEncode(String),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("unsupported format: {format} (supported formats: {supported})")]
    UnsupportedFormat { format: String, supported: String },

    #[error("invalid command: pass a target extension such as .png or -o/--optimize")]
    InvalidInvocation,

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),
}

impl ConvertError {
    pub fn unsupported(format: impl Into<String>) -> Self {
        ConvertError::UnsupportedFormat {
            format: format.into(),
            supported: crate::formats::supported_extensions().join(", "),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
