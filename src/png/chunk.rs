use super::*;

/// A four byte PNG chunk type code, such as `IHDR`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkTy(pub [u8; 4]);
#[allow(nonstandard_style)]
#[allow(missing_docs)]
impl ChunkTy {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");
  pub const tRNS: Self = Self(*b"tRNS");
  pub const tEXt: Self = Self(*b"tEXt");
  pub const acTL: Self = Self(*b"acTL");
  pub const fcTL: Self = Self(*b"fcTL");
  pub const fdAT: Self = Self(*b"fdAT");
}
impl ChunkTy {
  /// The raw type bytes.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 4] {
    &self.0
  }

  /// Critical chunks have an uppercase first letter (bit 5 clear).
  ///
  /// A decoder that doesn't understand a critical chunk can't display the
  /// image, while unknown ancillary chunks can be skipped.
  #[inline]
  #[must_use]
  pub const fn is_critical(&self) -> bool {
    (self.0[0] & 0b0010_0000) == 0
  }
}
impl Debug for ChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('"')?;
    Display::fmt(self, f)?;
    f.write_char('"')
  }
}
impl Display for ChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}
impl From<[u8; 4]> for ChunkTy {
  #[inline]
  #[must_use]
  fn from(array: [u8; 4]) -> Self {
    Self(array)
  }
}

/// An owned chunk: the type code and the payload bytes.
///
/// The length and CRC aren't stored, they're computed when the chunk is
/// written. Use [`Chunk::parse`] to get a structured view of the payload.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Chunk {
  ty: ChunkTy,
  data: Vec<u8>,
}
impl Chunk {
  /// Makes a chunk.
  #[inline]
  #[must_use]
  pub fn new(ty: ChunkTy, data: Vec<u8>) -> Self {
    Self { ty, data }
  }

  /// The chunk's type.
  #[inline]
  #[must_use]
  pub const fn ty(&self) -> ChunkTy {
    self.ty
  }

  /// The chunk's payload.
  #[inline]
  #[must_use]
  pub fn data(&self) -> &[u8] {
    &self.data
  }

  /// The CRC this chunk has when written out.
  #[inline]
  #[must_use]
  pub fn compute_crc(&self) -> u32 {
    png_crc32(&[self.ty.as_bytes(), &self.data])
  }

  /// Parses the payload according to the chunk type.
  ///
  /// Unknown chunk types give [`PngChunk::Unknown`], which never fails.
  #[inline]
  pub fn parse(&self) -> Result<PngChunk<'_>, ValidationError> {
    PngChunk::try_from(self)
  }

  /// Appends the full encoded chunk (length, type, data, CRC) to `out`.
  pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), ApngError> {
    let len = u32::try_from(self.data.len())
      .map_err(|_| ValidationError::new(self.ty, "length", u32::MAX))?;
    out.try_reserve(12 + self.data.len())?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(self.ty.as_bytes());
    out.extend_from_slice(&self.data);
    out.extend_from_slice(&self.compute_crc().to_be_bytes());
    Ok(())
  }
}
impl Debug for Chunk {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Chunk")
      .field("ty", &self.ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .finish()
  }
}
impl From<RawPngChunk<'_>> for Chunk {
  #[inline]
  fn from(raw: RawPngChunk<'_>) -> Self {
    Self { ty: raw.chunk_ty, data: raw.data.to_vec() }
  }
}
