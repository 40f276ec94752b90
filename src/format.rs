//! Pixel format tags and the registry mapping them to byte layouts.

use core::fmt;

use crate::error::PixmapError;

/// Channel layout of every pixel in a [`Pixmap`](crate::Pixmap).
///
/// Purely a tag. Byte layout is looked up with [`typeinfo()`](Self::typeinfo).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum PixelFormat {
    /// No format. Only valid for an empty pixmap.
    #[default]
    Unknown = 0,
    /// 8-bit red, green, blue.
    Rgb = 1,
    /// 8-bit red, green, blue, alpha.
    Rgba = 2,
    /// 8-bit blue, green, red, alpha (Windows/DirectX byte order).
    Bgra = 3,
}

impl PixelFormat {
    /// Byte layout for this format.
    ///
    /// # Errors
    ///
    /// Returns [`PixmapError::UnsupportedFormat`] for [`PixelFormat::Unknown`].
    pub fn typeinfo(self) -> Result<&'static PixelTypeinfo, PixmapError> {
        match self {
            Self::Rgb => Ok(&RGB),
            Self::Rgba => Ok(&RGBA),
            Self::Bgra => Ok(&BGRA),
            Self::Unknown => Err(PixmapError::UnsupportedFormat(self)),
        }
    }

    /// Bytes per pixel, or 0 for [`PixelFormat::Unknown`].
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Unknown => 0,
            Self::Rgb => 3,
            Self::Rgba | Self::Bgra => 4,
        }
    }

    /// Whether this is a format with a registered layout.
    #[inline]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::Rgb => "rgb",
            Self::Rgba => "rgba",
            Self::Bgra => "bgra",
        };
        f.write_str(name)
    }
}

/// Immutable byte-layout descriptor for one [`PixelFormat`].
///
/// One static instance exists per recognized format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct PixelTypeinfo {
    /// Format this descriptor belongs to.
    pub format: PixelFormat,
    /// Fixed size of one pixel in bytes.
    pub bytes_per_pixel: usize,
    /// Number of channels per pixel.
    pub channels: u8,
    /// Whether one of the channels is alpha.
    pub has_alpha: bool,
}

impl PixelTypeinfo {
    /// Byte length of one tightly packed row of `width` pixels.
    #[inline]
    pub const fn stride(&self, width: u32) -> usize {
        width as usize * self.bytes_per_pixel
    }
}

static RGB: PixelTypeinfo = PixelTypeinfo {
    format: PixelFormat::Rgb,
    bytes_per_pixel: 3,
    channels: 3,
    has_alpha: false,
};

static RGBA: PixelTypeinfo = PixelTypeinfo {
    format: PixelFormat::Rgba,
    bytes_per_pixel: 4,
    channels: 4,
    has_alpha: true,
};

static BGRA: PixelTypeinfo = PixelTypeinfo {
    format: PixelFormat::Bgra,
    bytes_per_pixel: 4,
    channels: 4,
    has_alpha: true,
};

/// Buffer size in bytes for a `width` x `height` image in `format`.
///
/// # Errors
///
/// Returns [`PixmapError::UnsupportedFormat`] for [`PixelFormat::Unknown`] and
/// [`PixmapError::InvalidDimensions`] if the product overflows `usize`.
pub fn alloc_length(width: u32, height: u32, format: PixelFormat) -> Result<usize, PixmapError> {
    let info = format.typeinfo()?;
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(info.bytes_per_pixel))
        .ok_or(PixmapError::InvalidDimensions { width, height })
}
