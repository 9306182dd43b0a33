//! Module for pixel formats.
//!
//! Everything the animation code touches is converted to [`RGBA8`] first:
//! straight (non-premultiplied) alpha, 8 bits per channel. The single-image
//! codec is responsible for turning the other PNG pixel formats into this one.

use bytemuck::{Pod, Zeroable};

/// An RGB value, 8-bits per channel.
///
/// This is the format of `PLTE` entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
#[allow(missing_docs)]
pub struct RGB8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

/// An 8-bits per channel RGBA pixel, straight alpha.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
#[allow(missing_docs)]
pub struct RGBA8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}
impl RGBA8 {
  /// All channels zero.
  pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

  /// Makes a pixel from the four channel values.
  #[inline]
  #[must_use]
  pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// Makes a fully opaque pixel.
  #[inline]
  #[must_use]
  pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 255 }
  }

  /// Composites `self` (the source) over `dst` with the "over" operator.
  ///
  /// * `out.a = src.a + dst.a * (1 - src.a)`
  /// * `out.rgb = (src.rgb * src.a + dst.rgb * dst.a * (1 - src.a)) / out.a`
  ///
  /// The math is done in integers scaled by `255 * 255`, rounding to nearest.
  /// A fully opaque source gives exactly the source, and a fully transparent
  /// source gives exactly the destination.
  #[inline]
  #[must_use]
  pub const fn over(self, dst: Self) -> Self {
    match self.a {
      255 => self,
      0 => dst,
      src_a => {
        let sa = src_a as u32;
        let da = dst.a as u32;
        // both weights are scaled by 255
        let src_w = sa * 255;
        let dst_w = da * (255 - sa);
        let total = src_w + dst_w;
        // `sa > 0` here, so `total > 0`
        const fn mix(s: u8, d: u8, src_w: u32, dst_w: u32, total: u32) -> u8 {
          ((s as u32 * src_w + d as u32 * dst_w + total / 2) / total) as u8
        }
        Self {
          r: mix(self.r, dst.r, src_w, dst_w, total),
          g: mix(self.g, dst.g, src_w, dst_w, total),
          b: mix(self.b, dst.b, src_w, dst_w, total),
          a: ((total + 127) / 255) as u8,
        }
      }
    }
  }
}
impl From<RGB8> for RGBA8 {
  #[inline]
  #[must_use]
  fn from(RGB8 { r, g, b }: RGB8) -> Self {
    Self { r, g, b, a: 255 }
  }
}

#[test]
fn test_over_identities() {
  let dst = RGBA8::new(10, 20, 30, 40);
  assert_eq!(RGBA8::opaque(1, 2, 3).over(dst), RGBA8::opaque(1, 2, 3));
  assert_eq!(RGBA8::new(9, 9, 9, 0).over(dst), dst);
  // half red over opaque blue
  let out = RGBA8::new(255, 0, 0, 128).over(RGBA8::opaque(0, 0, 255));
  assert_eq!(out.a, 255);
  assert_eq!(out.r, 128);
  assert_eq!(out.b, 127);
  // anything over fully transparent keeps the source color
  let out = RGBA8::new(200, 100, 50, 77).over(RGBA8::TRANSPARENT);
  assert_eq!(out, RGBA8::new(200, 100, 50, 77));
}
