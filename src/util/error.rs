//! Error types for nccmatch.

use thiserror::Error;

/// Result alias for nccmatch operations.
pub type NccMatchResult<T> = std::result::Result<T, NccMatchError>;

/// Errors that can occur when building buffers or running a match.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NccMatchError {
    /// A buffer was created with a zero or overflowing dimension.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },
    /// A view stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride {
        /// Requested width in pixels.
        width: usize,
        /// Requested stride in elements.
        stride: usize,
    },
    /// The backing slice is too short for the requested dimensions.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall {
        /// Minimum number of elements required.
        needed: usize,
        /// Number of elements provided.
        got: usize,
    },
    /// A sub-window does not fit inside its parent view.
    #[error(
        "window {width}x{height} at ({x}, {y}) out of bounds for {img_width}x{img_height} image"
    )]
    WindowOutOfBounds {
        /// Window left edge.
        x: usize,
        /// Window top edge.
        y: usize,
        /// Window width in pixels.
        width: usize,
        /// Window height in pixels.
        height: usize,
        /// Parent image width.
        img_width: usize,
        /// Parent image height.
        img_height: usize,
    },
    /// Paired buffers (pixels and mask, or window and template) differ in size.
    #[error(
        "dimension mismatch: expected {expected_width}x{expected_height}, got {width}x{height}"
    )]
    DimensionMismatch {
        /// Width of the reference buffer.
        expected_width: usize,
        /// Height of the reference buffer.
        expected_height: usize,
        /// Width of the offending buffer.
        width: usize,
        /// Height of the offending buffer.
        height: usize,
    },
    /// Template extraction requires a transparency channel the input lacks.
    #[error("input image has no alpha channel")]
    MissingAlphaChannel,
    /// No non-transparent pixel exists to extract a template from.
    #[error("no non-transparent pixels in template source")]
    EmptyTemplate,
    /// The template cannot be placed anywhere inside the background.
    #[error(
        "template {tpl_width}x{tpl_height} does not fit inside {img_width}x{img_height} background"
    )]
    NoMatch {
        /// Background width.
        img_width: usize,
        /// Background height.
        img_height: usize,
        /// Template width.
        tpl_width: usize,
        /// Template height.
        tpl_height: usize,
    },
    /// Decoding or encoding an image failed.
    #[cfg(feature = "image-io")]
    #[error("image io failed: {reason}")]
    ImageIo {
        /// Human-readable failure description from the codec.
        reason: String,
    },
}
