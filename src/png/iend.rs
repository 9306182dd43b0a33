use super::*;

/// `IEND`: Image trailer
///
/// Always the last chunk, with no data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IEND;
impl IEND {
  /// The full 12 bytes an `IEND` chunk always encodes to.
  pub const BYTES: [u8; 12] = [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82];

  /// Makes an owned chunk holding this record.
  #[inline]
  #[must_use]
  pub fn to_chunk(&self) -> Chunk {
    Chunk::new(ChunkTy::IEND, Vec::new())
  }
}
impl TryFrom<&[u8]> for IEND {
  type Error = ValidationError;
  #[inline]
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    if value.is_empty() {
      Ok(Self)
    } else {
      Err(ValidationError::new(ChunkTy::IEND, "length", value.len() as u32))
    }
  }
}
