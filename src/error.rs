//! Error types for the filter engine and its I/O collaborators.

use thiserror::Error;

/// Errors raised when constructing or indexing a [`PixelBuffer`](crate::buffer::PixelBuffer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Sample count does not equal `width * height * 4`, or a dimension is zero.
    #[error("invalid dimensions: {width}x{height} RGBA needs width*height*4 samples, got {len}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
        /// Number of samples actually supplied.
        len: usize,
    },

    /// Pixel access outside the grid.
    #[error("pixel index {index} out of bounds ({len} pixels)")]
    IndexOutOfBounds {
        /// Flat pixel index that was requested.
        index: usize,
        /// Number of pixels in the buffer.
        len: usize,
    },
}

/// Errors raised when resolving filters or channels by name or index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    #[error("channel index {0} is not one of 0 (R), 1 (G), 2 (B)")]
    InvalidChannel(usize),
}

/// Errors raised by [`ImageSession`](crate::session::ImageSession).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no image loaded, nothing to export")]
    NothingToExport,
}

/// Errors raised while decoding, scaling or encoding images.
#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Buffer(#[from] BufferError),

    /// The display frame has no area to fit an image into.
    #[error("display frame {width}x{height} cannot hold an image")]
    EmptyFrame { width: u32, height: u32 },
}
