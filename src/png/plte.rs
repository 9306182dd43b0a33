use super::*;

/// `PLTE`: Palette
///
/// Palette entries are always RGB.
///
/// If you want to have a paletted image with transparency then the transparency
/// info goes in a separate transparency chunk.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PLTE<'b> {
  entries: &'b [RGB8],
}
impl<'b> PLTE<'b> {
  /// Gets the entries as a slice.
  #[inline]
  #[must_use]
  pub const fn entries(&self) -> &'b [RGB8] {
    self.entries
  }

  /// Makes an owned chunk holding this palette.
  #[inline]
  #[must_use]
  pub fn to_chunk(&self) -> Chunk {
    Chunk::new(ChunkTy::PLTE, cast_slice::<RGB8, u8>(self.entries).to_vec())
  }
}
impl<'b> TryFrom<&'b [u8]> for PLTE<'b> {
  type Error = ValidationError;
  #[inline]
  fn try_from(value: &'b [u8]) -> Result<Self, Self::Error> {
    let entries: &[RGB8] = try_cast_slice(value)
      .map_err(|_| ValidationError::new(ChunkTy::PLTE, "length", value.len() as u32))?;
    if entries.is_empty() || entries.len() > 256 {
      return Err(ValidationError::new(ChunkTy::PLTE, "entries", entries.len() as u32));
    }
    Ok(Self { entries })
  }
}
impl Debug for PLTE<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // currently prints no more than 4 palette entries
    f.debug_tuple("PLTE")
      .field(&&self.entries[..self.entries.len().min(4)])
      .field(&self.entries.len())
      .finish()
  }
}
