//! Pixel format conversion dispatch.
//!
//! Dispatch is two-level: the source format picks the [`PixelType`] to read,
//! then the destination format picks the type to write. Both matches are
//! exhaustive, so a format added to [`PixelFormat`] must be wired in here
//! before it compiles.

use rgb::alt::BGRA;
use rgb::{Rgb, Rgba};

use crate::error::PixmapError;
use crate::format::PixelFormat;
use crate::pixel::PixelType;

/// Converts every pixel of a packed source buffer into a packed destination
/// buffer holding the same number of pixels.
pub(crate) type ConvertFn = fn(&[u8], &mut [u8]);

/// Look up the conversion for a `(from, to)` format pair.
///
/// # Errors
///
/// Returns [`PixmapError::UnsupportedFormat`] naming whichever side is not
/// wired into the dispatch. The source is checked first.
pub(crate) fn converter(from: PixelFormat, to: PixelFormat) -> Result<ConvertFn, PixmapError> {
    match from {
        PixelFormat::Rgb => converter_to::<Rgb<u8>>(to),
        PixelFormat::Rgba => converter_to::<Rgba<u8>>(to),
        PixelFormat::Bgra => converter_to::<BGRA<u8>>(to),
        PixelFormat::Unknown => Err(PixmapError::UnsupportedFormat(from)),
    }
}

fn converter_to<S: PixelType>(to: PixelFormat) -> Result<ConvertFn, PixmapError> {
    match to {
        PixelFormat::Rgb => Ok(convert_pixels::<S, Rgb<u8>> as ConvertFn),
        PixelFormat::Rgba => Ok(convert_pixels::<S, Rgba<u8>> as ConvertFn),
        PixelFormat::Bgra => Ok(convert_pixels::<S, BGRA<u8>> as ConvertFn),
        PixelFormat::Unknown => Err(PixmapError::UnsupportedFormat(to)),
    }
}

/// Row-major, one pixel at a time, through the canonical RGBA value.
fn convert_pixels<S: PixelType, D: PixelType>(src: &[u8], dst: &mut [u8]) {
    let src = S::cast_slice(src);
    let dst = D::cast_slice_mut(dst);
    debug_assert_eq!(src.len(), dst.len());
    for (d, s) in dst.iter_mut().zip(src) {
        d.set(s.get());
    }
}
