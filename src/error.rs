use std::path::PathBuf;

use enough::StopReason;

/// Errors from loading, saving, encoding and decoding a single image.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CodecError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} pixels, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("image has zero width or height")]
    EmptyImage,

    #[cfg(feature = "jpeg")]
    #[error("jpeg codec error: {0}")]
    Jpeg(#[from] image::ImageError),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for CodecError {
    fn from(r: StopReason) -> Self {
        CodecError::Cancelled(r)
    }
}

/// Errors from a whole file-to-file conversion.
///
/// Each variant is a distinct failure class with its own process exit code.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("unknown format of the input file {}", .0.display())]
    UnknownInputFormat(PathBuf),

    #[error("unknown format of the output file {}", .0.display())]
    UnknownOutputFormat(PathBuf),

    #[error("loading {} failed: {source}", .path.display())]
    Load { path: PathBuf, source: CodecError },

    #[error("saving {} failed: {source}", .path.display())]
    Save { path: PathBuf, source: CodecError },
}

impl ConvertError {
    /// Process exit code for this failure (1 is reserved for usage errors).
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::UnknownInputFormat(_) => 2,
            ConvertError::UnknownOutputFormat(_) => 3,
            ConvertError::Load { .. } => 4,
            ConvertError::Save { .. } => 5,
        }
    }
}
