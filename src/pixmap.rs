//! Owned, format-tagged pixel buffer.
//!
//! A [`Pixmap`] exclusively owns one tightly packed buffer of exactly
//! `width * height * bytes_per_pixel(format)` bytes. Every operation that
//! changes geometry or format replaces the buffer instead of resizing it.

use alloc::vec::Vec;
use core::fmt;

use imgref::{ImgRef, ImgRefMut};
use log::{debug, trace, warn};

use crate::convert::converter;
use crate::error::PixmapError;
use crate::format::{PixelFormat, PixelTypeinfo, alloc_length};
use crate::limits::ResourceLimits;
use crate::pixel::PixelType;

// ---------------------------------------------------------------------------
// Pixmap
// ---------------------------------------------------------------------------

/// Owned 2D pixel buffer tagged with its [`PixelFormat`].
///
/// The empty state (`format = Unknown`, `0x0`, no buffer) is the
/// [`Default`]. Cloning is a deep copy; [`take`](Self::take) moves the
/// buffer out and leaves the source empty.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Pixmap {
    format: PixelFormat,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Pixmap {
    /// The empty pixmap. Owns no buffer.
    pub const fn empty() -> Self {
        Self {
            format: PixelFormat::Unknown,
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    /// Allocate a zero-filled pixmap.
    ///
    /// A zero width or height yields a pixmap with no buffer.
    ///
    /// # Errors
    ///
    /// [`PixmapError::UnsupportedFormat`] for [`PixelFormat::Unknown`],
    /// [`PixmapError::InvalidDimensions`] if the buffer size overflows, and
    /// [`PixmapError::AllocationFailed`] if the allocator refuses.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self, PixmapError> {
        let len = alloc_length(width, height, format)?;
        let mut pixels = reserve_pixels(len)?;
        pixels.resize(len, 0);
        Ok(Self {
            format,
            width,
            height,
            pixels,
        })
    }

    /// Allocate a zero-filled pixmap after checking `limits`.
    ///
    /// # Errors
    ///
    /// [`PixmapError::Limit`] if the geometry or buffer size exceeds a
    /// limit, otherwise as [`new`](Self::new).
    pub fn new_with_limits(
        width: u32,
        height: u32,
        format: PixelFormat,
        limits: &ResourceLimits,
    ) -> Result<Self, PixmapError> {
        limits.check_dimensions(width, height)?;
        let len = alloc_length(width, height, format)?;
        limits.check_memory(len as u64)?;
        Self::new(width, height, format)
    }

    /// Allocate a pixmap and copy `data` into it.
    ///
    /// # Errors
    ///
    /// [`PixmapError::SizeMismatch`] unless `data.len()` is exactly
    /// `width * height * bytes_per_pixel(format)`, otherwise as
    /// [`new`](Self::new).
    pub fn from_raw(
        data: &[u8],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self, PixmapError> {
        let len = checked_length(data.len(), width, height, format)?;
        let mut pixels = reserve_pixels(len)?;
        pixels.extend_from_slice(data);
        Ok(Self {
            format,
            width,
            height,
            pixels,
        })
    }

    /// Take ownership of `data` as the pixel buffer without copying.
    ///
    /// # Errors
    ///
    /// [`PixmapError::SizeMismatch`] unless `data.len()` is exactly
    /// `width * height * bytes_per_pixel(format)`.
    pub fn from_vec(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self, PixmapError> {
        checked_length(data.len(), width, height, format)?;
        Ok(Self {
            format,
            width,
            height,
            pixels: data,
        })
    }

    /// Copy a typed image into a new, tightly packed pixmap.
    ///
    /// Padding between rows of a strided image is not copied.
    pub fn from_img<P: PixelType>(img: ImgRef<'_, P>) -> Result<Self, PixmapError> {
        let (Ok(width), Ok(height)) = (u32::try_from(img.width()), u32::try_from(img.height()))
        else {
            return Err(PixmapError::InvalidDimensions {
                width: saturate_u32(img.width()),
                height: saturate_u32(img.height()),
            });
        };
        let len = alloc_length(width, height, P::FORMAT)?;
        let mut pixels = reserve_pixels(len)?;
        for row in img.rows() {
            pixels.extend_from_slice(P::slice_as_bytes(row));
        }
        Ok(Self {
            format: P::FORMAT,
            width,
            height,
            pixels,
        })
    }

    // --- Geometry --------------------------------------------------------

    /// Pixel format of every pixel in the buffer.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Byte length of one scanline.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// Size of the owned buffer in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the pixmap owns no pixel bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Byte layout of this pixmap's format.
    ///
    /// # Errors
    ///
    /// [`PixmapError::UnsupportedFormat`] for an empty pixmap.
    pub fn typeinfo(&self) -> Result<&'static PixelTypeinfo, PixmapError> {
        self.format.typeinfo()
    }

    // --- Raw access ------------------------------------------------------

    /// The whole buffer, row-major and tightly packed.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    /// The whole buffer, mutable. Its length cannot change.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the pixmap and return the backing buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.pixels
    }

    /// Pixel bytes for row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`. See [`try_scanline`](Self::try_scanline).
    #[inline]
    pub fn scanline(&self, y: u32) -> &[u8] {
        assert!(
            y < self.height,
            "row index {y} out of bounds (height: {})",
            self.height
        );
        let stride = self.stride();
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    /// Mutable pixel bytes for row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`. See [`try_scanline_mut`](Self::try_scanline_mut).
    #[inline]
    pub fn scanline_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(
            y < self.height,
            "row index {y} out of bounds (height: {})",
            self.height
        );
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.pixels[start..start + stride]
    }

    /// Pixel bytes for row `y`, or [`PixmapError::RowOutOfBounds`].
    pub fn try_scanline(&self, y: u32) -> Result<&[u8], PixmapError> {
        self.check_row(y)?;
        Ok(self.scanline(y))
    }

    /// Mutable pixel bytes for row `y`, or [`PixmapError::RowOutOfBounds`].
    pub fn try_scanline_mut(&mut self, y: u32) -> Result<&mut [u8], PixmapError> {
        self.check_row(y)?;
        Ok(self.scanline_mut(y))
    }

    /// Iterate scanlines top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        (0..self.height).map(move |y| self.scanline(y))
    }

    /// Iterate mutable scanlines top to bottom.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> + '_ {
        let stride = self.stride();
        let mut rest: &mut [u8] = &mut self.pixels;
        (0..self.height).map(move |_| {
            let (row, tail) = core::mem::take(&mut rest).split_at_mut(stride);
            rest = tail;
            row
        })
    }

    fn check_row(&self, y: u32) -> Result<(), PixmapError> {
        if y >= self.height {
            return Err(PixmapError::RowOutOfBounds {
                row: y,
                height: self.height,
            });
        }
        Ok(())
    }

    // --- Typed views -----------------------------------------------------

    /// Borrow the buffer as typed pixels, row-major.
    ///
    /// # Errors
    ///
    /// [`PixmapError::FormatMismatch`] if `P` is not this pixmap's format.
    pub fn pixels<P: PixelType>(&self) -> Result<&[P], PixmapError> {
        self.check_pixel_type::<P>()?;
        Ok(P::cast_slice(&self.pixels))
    }

    /// Mutable counterpart of [`pixels`](Self::pixels).
    pub fn pixels_mut<P: PixelType>(&mut self) -> Result<&mut [P], PixmapError> {
        self.check_pixel_type::<P>()?;
        Ok(P::cast_slice_mut(&mut self.pixels))
    }

    /// Borrow the buffer as an [`ImgRef`].
    ///
    /// # Errors
    ///
    /// [`PixmapError::FormatMismatch`] if `P` is not this pixmap's format,
    /// [`PixmapError::InvalidDimensions`] for a zero-width pixmap, which
    /// `imgref` cannot represent.
    pub fn as_img<P: PixelType>(&self) -> Result<ImgRef<'_, P>, PixmapError> {
        self.check_pixel_type::<P>()?;
        self.check_img_width()?;
        Ok(ImgRef::new(
            P::cast_slice(&self.pixels),
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Mutable counterpart of [`as_img`](Self::as_img).
    pub fn as_img_mut<P: PixelType>(&mut self) -> Result<ImgRefMut<'_, P>, PixmapError> {
        self.check_pixel_type::<P>()?;
        self.check_img_width()?;
        let (width, height) = (self.width as usize, self.height as usize);
        Ok(ImgRefMut::new(
            P::cast_slice_mut(&mut self.pixels),
            width,
            height,
        ))
    }

    fn check_pixel_type<P: PixelType>(&self) -> Result<(), PixmapError> {
        if P::FORMAT != self.format {
            return Err(PixmapError::FormatMismatch {
                requested: P::FORMAT,
                actual: self.format,
            });
        }
        Ok(())
    }

    fn check_img_width(&self) -> Result<(), PixmapError> {
        if self.width == 0 {
            return Err(PixmapError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    // --- Lifecycle -------------------------------------------------------

    /// Move the buffer out, leaving `self` empty.
    ///
    /// Move-assignment is `*dst = src.take()`.
    pub fn take(&mut self) -> Pixmap {
        core::mem::take(self)
    }

    /// Release the buffer and return to the empty state.
    pub fn reset(&mut self) {
        if !self.pixels.is_empty() {
            trace!("releasing {} bytes of pixel storage", self.pixels.len());
        }
        *self = Self::empty();
    }

    /// Release the buffer and allocate a zero-filled one for new geometry.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new). On error the pixmap is left empty.
    pub fn reset_to(
        &mut self,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<(), PixmapError> {
        self.reset();
        *self = Self::new(width, height, format)?;
        Ok(())
    }

    // --- Conversion ------------------------------------------------------

    /// Translate every pixel into `target`, producing a new pixmap of the
    /// same geometry.
    ///
    /// Converting to the current format returns an independent copy. Alpha
    /// is filled with 255 when widening from a format without it and dropped
    /// when narrowing.
    ///
    /// # Errors
    ///
    /// [`PixmapError::UnsupportedFormat`] if either format is
    /// [`PixelFormat::Unknown`]; `self` is never modified.
    pub fn convert(&self, target: PixelFormat) -> Result<Pixmap, PixmapError> {
        if !target.is_known() {
            warn!("refusing to convert {:?} to {target}", self);
            return Err(PixmapError::UnsupportedFormat(target));
        }
        if self.format == target {
            debug!("{:?} already {target}, copying", self);
            return Ok(self.clone());
        }
        let kernel = converter(self.format, target).inspect_err(|err| {
            warn!("cannot convert {:?} to {target}: {err}", self);
        })?;
        let mut dst = Pixmap::new(self.width, self.height, target)?;
        kernel(&self.pixels, &mut dst.pixels);
        debug!("converted {:?} to {target}", self);
        Ok(dst)
    }
}

impl fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pixmap({}x{}, {:?})", self.width, self.height, self.format)
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Empty vec with exactly `len` bytes of capacity.
fn reserve_pixels(len: usize) -> Result<Vec<u8>, PixmapError> {
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|_| PixmapError::AllocationFailed { bytes: len })?;
    if len > 0 {
        trace!("allocated {len} bytes of pixel storage");
    }
    Ok(pixels)
}

/// Buffer size for the geometry, which `actual` must match exactly.
fn checked_length(
    actual: usize,
    width: u32,
    height: u32,
    format: PixelFormat,
) -> Result<usize, PixmapError> {
    let expected = alloc_length(width, height, format)?;
    if actual != expected {
        return Err(PixmapError::SizeMismatch { expected, actual });
    }
    Ok(expected)
}

fn saturate_u32(v: usize) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
