//! Typed pixel accessors over raw pixmap bytes.
//!
//! Channel types come from the `rgb` crate. Each implements [`PixelType`],
//! which ties it to a [`PixelFormat`] and to a canonical [`Rgba<u8>`]
//! representation used as the meeting point for format conversion.

use rgb::alt::BGRA;
use rgb::{ComponentBytes, FromSlice, Rgb, Rgba};

use crate::format::PixelFormat;

/// Alpha assigned when a pixel without alpha is widened to one with alpha.
pub(crate) const OPAQUE: u8 = u8::MAX;

/// A pixel value with a fixed byte layout.
///
/// `get` and `set` translate to and from the canonical [`Rgba<u8>`]
/// representation; converting pixel `s` of type `S` to type `D` is
/// `d.set(s.get())`.
pub trait PixelType: Copy + 'static {
    /// Format tag whose byte layout this type matches.
    const FORMAT: PixelFormat;

    /// Read this pixel as straight-alpha RGBA. Formats without alpha
    /// report it as fully opaque.
    fn get(&self) -> Rgba<u8>;

    /// Overwrite this pixel from straight-alpha RGBA. Channels this
    /// format lacks are dropped.
    fn set(&mut self, value: Rgba<u8>);

    /// Reinterpret tightly packed bytes as pixels. Trailing bytes that do
    /// not form a whole pixel are ignored.
    fn cast_slice(bytes: &[u8]) -> &[Self];

    /// Mutable counterpart of [`cast_slice`](Self::cast_slice).
    fn cast_slice_mut(bytes: &mut [u8]) -> &mut [Self];

    /// View pixels as their underlying bytes.
    fn slice_as_bytes(pixels: &[Self]) -> &[u8];
}

impl PixelType for Rgb<u8> {
    const FORMAT: PixelFormat = PixelFormat::Rgb;

    #[inline]
    fn get(&self) -> Rgba<u8> {
        Rgba::new(self.r, self.g, self.b, OPAQUE)
    }

    #[inline]
    fn set(&mut self, value: Rgba<u8>) {
        *self = Rgb::new(value.r, value.g, value.b);
    }

    #[inline]
    fn cast_slice(bytes: &[u8]) -> &[Self] {
        bytes.as_rgb()
    }

    #[inline]
    fn cast_slice_mut(bytes: &mut [u8]) -> &mut [Self] {
        bytes.as_rgb_mut()
    }

    #[inline]
    fn slice_as_bytes(pixels: &[Self]) -> &[u8] {
        pixels.as_bytes()
    }
}

impl PixelType for Rgba<u8> {
    const FORMAT: PixelFormat = PixelFormat::Rgba;

    #[inline]
    fn get(&self) -> Rgba<u8> {
        *self
    }

    #[inline]
    fn set(&mut self, value: Rgba<u8>) {
        *self = value;
    }

    #[inline]
    fn cast_slice(bytes: &[u8]) -> &[Self] {
        bytes.as_rgba()
    }

    #[inline]
    fn cast_slice_mut(bytes: &mut [u8]) -> &mut [Self] {
        bytes.as_rgba_mut()
    }

    #[inline]
    fn slice_as_bytes(pixels: &[Self]) -> &[u8] {
        pixels.as_bytes()
    }
}

impl PixelType for BGRA<u8> {
    const FORMAT: PixelFormat = PixelFormat::Bgra;

    #[inline]
    fn get(&self) -> Rgba<u8> {
        Rgba::new(self.r, self.g, self.b, self.a)
    }

    #[inline]
    fn set(&mut self, value: Rgba<u8>) {
        *self = BGRA {
            b: value.b,
            g: value.g,
            r: value.r,
            a: value.a,
        };
    }

    #[inline]
    fn cast_slice(bytes: &[u8]) -> &[Self] {
        bytes.as_bgra()
    }

    #[inline]
    fn cast_slice_mut(bytes: &mut [u8]) -> &mut [Self] {
        bytes.as_bgra_mut()
    }

    #[inline]
    fn slice_as_bytes(pixels: &[Self]) -> &[u8] {
        pixels.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_match_typeinfo_sizes() {
        assert_eq!(
            core::mem::size_of::<Rgb<u8>>(),
            <Rgb<u8>>::FORMAT.bytes_per_pixel()
        );
        assert_eq!(
            core::mem::size_of::<Rgba<u8>>(),
            <Rgba<u8>>::FORMAT.bytes_per_pixel()
        );
        assert_eq!(
            core::mem::size_of::<BGRA<u8>>(),
            <BGRA<u8>>::FORMAT.bytes_per_pixel()
        );
    }

    #[test]
    fn rgb_get_is_opaque() {
        let px = Rgb::new(1u8, 2, 3);
        assert_eq!(px.get(), Rgba::new(1, 2, 3, 255));
    }

    #[test]
    fn rgb_set_drops_alpha() {
        let mut px = Rgb::new(0u8, 0, 0);
        px.set(Rgba::new(10, 20, 30, 40));
        assert_eq!(px, Rgb::new(10, 20, 30));
    }

    #[test]
    fn bgra_reorders_channels() {
        let mut px = BGRA {
            b: 0u8,
            g: 0,
            r: 0,
            a: 0,
        };
        px.set(Rgba::new(10, 20, 30, 40));
        assert_eq!((px.b, px.g, px.r, px.a), (30, 20, 10, 40));
        assert_eq!(px.get(), Rgba::new(10, 20, 30, 40));
    }

    #[test]
    fn cast_slice_reads_packed_bytes() {
        let bytes = [10u8, 20, 30, 40, 50, 60];
        let pixels = <Rgb<u8>>::cast_slice(&bytes);
        assert_eq!(pixels, &[Rgb::new(10, 20, 30), Rgb::new(40, 50, 60)]);
        assert_eq!(<Rgb<u8>>::slice_as_bytes(pixels), &bytes);
    }

    #[test]
    fn cast_slice_ignores_partial_pixel() {
        let bytes = [1u8, 2, 3, 4, 5];
        assert_eq!(<Rgba<u8>>::cast_slice(&bytes).len(), 1);
    }

    #[test]
    fn cast_slice_mut_writes_through() {
        let mut bytes = [0u8; 8];
        let pixels = <BGRA<u8>>::cast_slice_mut(&mut bytes);
        pixels[1].set(Rgba::new(1, 2, 3, 4));
        assert_eq!(bytes, [0, 0, 0, 0, 3, 2, 1, 4]);
    }
}
