use super::*;

/// `tRNS`: Transparency
///
/// The meaning of the bytes depends on the image's color type:
/// * greyscale: one `u16` sample value that is fully transparent.
/// * RGB: three `u16` sample values, the one color that is fully transparent.
/// * indexed: alpha values to pair with the palette entries. There can be less
///   alpha entries than palette entries (missing entries default to full
///   opacity, `0xFF`).
///
/// Spec: [tRNS](https://www.w3.org/TR/png/#11tRNS)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub struct tRNS<'b> {
  data: &'b [u8],
}
impl<'b> tRNS<'b> {
  /// Gets the grayscale value that is transparent.
  ///
  /// Fails when the chunk has the wrong length for grayscale.
  #[inline]
  #[must_use]
  pub const fn to_grayscale(&self) -> Option<u16> {
    match self.data {
      [y0, y1] => Some(u16::from_be_bytes([*y0, *y1])),
      _ => None,
    }
  }

  /// Gets the RGB value that is transparent.
  ///
  /// Fails when the chunk has the wrong length for rgb.
  #[inline]
  #[must_use]
  pub const fn to_rgb(&self) -> Option<[u16; 3]> {
    match self.data {
      [r0, r1, g0, g1, b0, b1] => Some([
        u16::from_be_bytes([*r0, *r1]),
        u16::from_be_bytes([*g0, *g1]),
        u16::from_be_bytes([*b0, *b1]),
      ]),
      _ => None,
    }
  }

  /// Gets the alpha values for each palette index.
  #[inline]
  #[must_use]
  pub const fn to_alphas(&self) -> &'b [u8] {
    self.data
  }

  /// Checks the length against the image's color type.
  ///
  /// ## Failure
  /// * Greyscale needs 2 bytes, RGB needs 6 bytes, indexed needs no more than
  ///   `palette_len` bytes.
  /// * Color types with an alpha channel can't have a `tRNS` chunk at all.
  pub fn validate_for(
    &self, color_type: PngColorType, palette_len: usize,
  ) -> Result<(), ValidationError> {
    let ok = match color_type {
      PngColorType::Y => self.data.len() == 2,
      PngColorType::RGB => self.data.len() == 6,
      PngColorType::Index => self.data.len() <= palette_len,
      PngColorType::YA | PngColorType::RGBA => false,
    };
    if ok {
      Ok(())
    } else {
      Err(ValidationError::new(ChunkTy::tRNS, "length", self.data.len() as u32))
    }
  }

  /// Makes an owned chunk holding this data.
  #[inline]
  #[must_use]
  pub fn to_chunk(&self) -> Chunk {
    Chunk::new(ChunkTy::tRNS, self.data.to_vec())
  }
}
impl<'b> From<&'b [u8]> for tRNS<'b> {
  #[inline]
  #[must_use]
  fn from(data: &'b [u8]) -> Self {
    Self { data }
  }
}
impl Debug for tRNS<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("tRNS").field(&self.data).finish()
  }
}
