use super::*;

/// `IDAT`: Image data
///
/// * Image data is stored with Zlib compression applied.
/// * Images can have more than one IDAT chunk. They should all be stored in a
///   row. Multiple chunks are treated as a single Zlib datastream.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IDAT<'b> {
  /// Part of the compressed data stream.
  pub data: &'b [u8],
}
impl IDAT<'_> {
  /// Makes an owned chunk holding this data.
  #[inline]
  #[must_use]
  pub fn to_chunk(&self) -> Chunk {
    Chunk::new(ChunkTy::IDAT, self.data.to_vec())
  }
}
impl<'b> From<&'b [u8]> for IDAT<'b> {
  #[inline]
  #[must_use]
  fn from(data: &'b [u8]) -> Self {
    Self { data }
  }
}
impl Debug for IDAT<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("IDAT")
      .field(&&self.data[..self.data.len().min(12)])
      .field(&self.data.len())
      .finish()
  }
}
