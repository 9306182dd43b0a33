use super::*;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG's initial 8 bytes are correct.
#[inline]
#[must_use]
pub const fn is_png_signature_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// An unparsed chunk, borrowed from the PNG bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawPngChunk<'b> {
  /// The chunk's type.
  pub chunk_ty: ChunkTy,
  /// The chunk's payload.
  pub data: &'b [u8],
  /// The CRC value stored after the payload.
  pub declared_crc: u32,
}
impl RawPngChunk<'_> {
  /// Computes the CRC that the chunk's bytes actually have.
  #[inline]
  #[must_use]
  pub fn compute_actual_crc(&self) -> u32 {
    png_crc32(&[self.chunk_ty.as_bytes(), self.data])
  }

  /// Checks the declared CRC against the actual CRC.
  #[inline]
  pub fn check_crc(&self) -> Result<(), FormatError> {
    let actual = self.compute_actual_crc();
    if actual == self.declared_crc {
      Ok(())
    } else {
      Err(FormatError::CrcMismatch { chunk: self.chunk_ty, declared: self.declared_crc, actual })
    }
  }
}
impl Debug for RawPngChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawPngChunk")
      .field("chunk_ty", &self.chunk_ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// * The signature is checked by [`new`](Self::new).
/// * Each item is the next chunk, or [`FormatError::UnexpectedEnd`] if the
///   bytes stop partway through a chunk. After an error the iterator is empty.
/// * CRCs are **not** checked here, see [`RawPngChunk::check_crc`].
///
/// The iterator never panics, no matter what bytes it's given.
#[derive(Debug, Clone)]
pub struct RawPngChunkIter<'b> {
  spare: &'b [u8],
}
impl<'b> RawPngChunkIter<'b> {
  /// Makes an iterator over a PNG's chunks.
  ///
  /// ## Failure
  /// * The bytes don't start with [`PNG_SIGNATURE`].
  #[inline]
  pub const fn new(png: &'b [u8]) -> Result<Self, FormatError> {
    match png {
      [137, 80, 78, 71, 13, 10, 26, 10, spare @ ..] => Ok(Self { spare }),
      _ => Err(FormatError::BadSignature),
    }
  }

  /// The bytes that haven't been iterated yet.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> &'b [u8] {
    self.spare
  }
}
impl<'b> Iterator for RawPngChunkIter<'b> {
  type Item = Result<RawPngChunk<'b>, FormatError>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.spare.is_empty() {
      return None;
    }
    let out = split_raw_chunk(self.spare);
    match out {
      Ok((chunk, rest)) => {
        self.spare = rest;
        Some(Ok(chunk))
      }
      Err(e) => {
        self.spare = &[];
        Some(Err(e))
      }
    }
  }
}

fn split_raw_chunk(bytes: &[u8]) -> Result<(RawPngChunk<'_>, &[u8]), FormatError> {
  let (len_bytes, rest) = try_split_array::<4>(bytes)?;
  let len = u32::from_be_bytes(len_bytes) as usize;
  let (ty_bytes, rest) = try_split_array::<4>(rest)?;
  if rest.len() < len {
    return Err(FormatError::UnexpectedEnd);
  }
  let (data, rest) = rest.split_at(len);
  let (crc_bytes, rest) = try_split_array::<4>(rest)?;
  let chunk =
    RawPngChunk { chunk_ty: ChunkTy(ty_bytes), data, declared_crc: u32::from_be_bytes(crc_bytes) };
  Ok((chunk, rest))
}

#[inline]
fn try_split_array<const N: usize>(bytes: &[u8]) -> Result<([u8; N], &[u8]), FormatError> {
  match bytes.split_first_chunk::<N>() {
    Some((head, tail)) => Ok((*head, tail)),
    None => Err(FormatError::UnexpectedEnd),
  }
}
