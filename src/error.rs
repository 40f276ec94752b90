//! Errors from pixmap operations.

use crate::format::PixelFormat;
use crate::limits::LimitExceeded;

/// Errors from [`Pixmap`](crate::Pixmap) construction, access, and conversion.
///
/// A failed operation never leaves a half-written pixmap behind: the
/// source of a failed conversion is untouched, and a failed
/// [`reset_to`](crate::Pixmap::reset_to) leaves the pixmap empty.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PixmapError {
    /// The format has no registered layout or is not wired into conversion.
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(PixelFormat),
    /// The backing buffer could not be allocated.
    #[error("failed to allocate {bytes} bytes of pixel storage")]
    AllocationFailed {
        /// Requested buffer size.
        bytes: usize,
    },
    /// `width * height * bytes_per_pixel` overflows `usize`.
    #[error("dimensions {width}x{height} overflow the addressable buffer size")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Caller-supplied data does not match the size implied by the geometry.
    #[error("pixel data is {actual} bytes, expected {expected}")]
    SizeMismatch {
        /// `width * height * bytes_per_pixel`.
        expected: usize,
        /// Length of the supplied data.
        actual: usize,
    },
    /// Scanline index past the last row.
    #[error("row {row} out of bounds (height: {height})")]
    RowOutOfBounds {
        /// Requested row.
        row: u32,
        /// Pixmap height.
        height: u32,
    },
    /// A typed view was requested for a pixel type of another format.
    #[error("pixel type is {requested}, pixmap holds {actual}")]
    FormatMismatch {
        /// Format of the requested pixel type.
        requested: PixelFormat,
        /// Format of the pixmap.
        actual: PixelFormat,
    },
    /// A [`ResourceLimits`](crate::ResourceLimits) check failed.
    #[error(transparent)]
    Limit(#[from] LimitExceeded),
}
