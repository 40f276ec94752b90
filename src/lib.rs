//! Owned, format-tagged pixel buffers.
//!
//! A [`Pixmap`] owns exactly one contiguous pixel buffer sized
//! `width * height * bytes_per_pixel(format)` and can translate itself into
//! another [`PixelFormat`] pixel by pixel:
//!
//! - [`PixelFormat`] / [`PixelTypeinfo`]: format tags and their byte layout
//! - [`PixelType`]: typed channel accessors (`Rgb`, `Rgba`, `Bgra`)
//! - [`Pixmap`]: buffer ownership, scanline access, conversion
//! - [`ResourceLimits`]: caps checked before allocating
//!
//! ```
//! use zenpixmap::{PixelFormat, Pixmap};
//!
//! let rgb = Pixmap::from_raw(&[255, 0, 0, 0, 255, 0], 2, 1, PixelFormat::Rgb)?;
//! let rgba = rgb.convert(PixelFormat::Rgba)?;
//! assert_eq!(rgba.data(), &[255, 0, 0, 255, 0, 255, 0, 255]);
//! # Ok::<(), zenpixmap::PixmapError>(())
//! ```

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

mod convert;
mod error;
mod format;
mod limits;
mod pixel;
mod pixmap;

pub use error::PixmapError;
pub use format::{PixelFormat, PixelTypeinfo, alloc_length};
pub use limits::{LimitExceeded, ResourceLimits};
pub use pixel::PixelType;
pub use pixmap::Pixmap;

// Re-exports for callers working with typed views.
pub use imgref::{Img, ImgRef, ImgRefMut, ImgVec};
pub use rgb;
pub use rgb::alt::BGRA as Bgra;
pub use rgb::{Rgb, Rgba};
