use super::*;

/// `fdAT`: Frame data
///
/// Works like an `IDAT` chunk for an animation frame, with a sequence number
/// on the front.
///
/// Spec: [fdAT](https://www.w3.org/TR/png/#fdAT-chunk)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub struct fdAT<'b> {
  /// Position in the `fcTL`/`fdAT` sequence.
  pub sequence_number: u32,
  /// Compressed frame data, structurally the same as `IDAT` data.
  pub data: &'b [u8],
}
impl fdAT<'_> {
  /// Makes an owned chunk holding this record.
  #[must_use]
  pub fn to_chunk(&self) -> Chunk {
    let mut data = Vec::with_capacity(4 + self.data.len());
    data.extend_from_slice(&self.sequence_number.to_be_bytes());
    data.extend_from_slice(self.data);
    Chunk::new(ChunkTy::fdAT, data)
  }
}
impl<'b> TryFrom<&'b [u8]> for fdAT<'b> {
  type Error = ValidationError;
  #[inline]
  fn try_from(value: &'b [u8]) -> Result<Self, Self::Error> {
    match value {
      [s0, s1, s2, s3, data @ ..] => {
        Ok(Self { sequence_number: u32::from_be_bytes([*s0, *s1, *s2, *s3]), data })
      }
      _ => Err(ValidationError::new(ChunkTy::fdAT, "length", value.len() as u32)),
    }
  }
}
impl Debug for fdAT<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("fdAT")
      .field("sequence_number", &self.sequence_number)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .finish()
  }
}
