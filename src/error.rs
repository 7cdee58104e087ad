use crate::PixelLayout;

/// Errors from buffer geometry validation and layout routing.
///
/// Validation runs before any byte is written, so a failed call leaves the
/// destination untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CopyError {
    #[error("row pitch {stride} is smaller than the {row_bytes}-byte pixel row")]
    InvalidStride { stride: usize, row_bytes: usize },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("image dimensions overflow usize")]
    DimensionsOverflow,

    #[error("no conversion from {from:?} to {to:?}")]
    Unsupported { from: PixelLayout, to: PixelLayout },

    #[error("mirror or red/blue swap is not available from {from:?} to {to:?}")]
    TransformUnsupported { from: PixelLayout, to: PixelLayout },
}
