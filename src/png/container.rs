use super::*;

/// An ordered list of chunks: the whole of one PNG file.
///
/// There's no rule about what order the chunks are in, the code that fills
/// the container decides that. Reading checks every CRC and validates every
/// chunk type this crate understands, writing just writes what's there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PngContainer {
  chunks: Vec<Chunk>,
}
impl PngContainer {
  /// Makes an empty container.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { chunks: Vec::new() }
  }

  /// Reads a PNG datastream, up to and including its `IEND` chunk.
  ///
  /// ## Failure
  /// * [`FormatError::BadSignature`]: The signature is wrong.
  /// * [`FormatError::UnexpectedEnd`]: The data stops partway through a chunk,
  ///   or ends without an `IEND`.
  /// * [`FormatError::CrcMismatch`]: A chunk's CRC is wrong.
  /// * [`ApngError::Validation`]: A known chunk type has illegal content.
  pub fn from_png_bytes(bytes: &[u8]) -> Result<Self, ApngError> {
    let mut it = RawPngChunkIter::new(bytes)?;
    let mut chunks = Vec::new();
    for raw in it.by_ref() {
      let raw = raw?;
      raw.check_crc()?;
      trace!("read {:?}", raw);
      let chunk = Chunk::from(raw);
      chunk.parse()?;
      let is_end = chunk.ty() == ChunkTy::IEND;
      chunks.try_reserve(1)?;
      chunks.push(chunk);
      if is_end {
        let trailing = it.remaining().len();
        if trailing > 0 {
          debug!("ignoring {trailing} bytes after IEND");
        }
        return Ok(Self { chunks });
      }
    }
    Err(FormatError::UnexpectedEnd.into())
  }

  /// Writes the signature and then every chunk, in order.
  pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), ApngError> {
    out.try_reserve(PNG_SIGNATURE.len())?;
    out.extend_from_slice(&PNG_SIGNATURE);
    for chunk in &self.chunks {
      chunk.write_to(out)?;
    }
    Ok(())
  }

  /// Writes the container into a new byte vec.
  #[inline]
  pub fn to_png_bytes(&self) -> Result<Vec<u8>, ApngError> {
    let mut out = Vec::new();
    self.write_to(&mut out)?;
    Ok(out)
  }

  /// Adds a chunk to the end.
  #[inline]
  pub fn push(&mut self, chunk: Chunk) {
    self.chunks.push(chunk);
  }

  /// Adds a chunk at `index`, shifting later chunks back.
  ///
  /// ## Panics
  /// * If `index > len`.
  #[inline]
  pub fn insert(&mut self, index: usize, chunk: Chunk) {
    self.chunks.insert(index, chunk);
  }

  /// Removes the chunk at `index`, shifting later chunks forward.
  ///
  /// ## Panics
  /// * If `index >= len`.
  #[inline]
  pub fn remove(&mut self, index: usize) -> Chunk {
    self.chunks.remove(index)
  }

  /// Gets the chunk at `index`, if any.
  #[inline]
  #[must_use]
  pub fn get(&self, index: usize) -> Option<&Chunk> {
    self.chunks.get(index)
  }

  /// Number of chunks.
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.chunks.len()
  }

  /// If there's no chunks.
  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.chunks.is_empty()
  }

  /// Iterates the chunks in order.
  #[inline]
  pub fn iter(&self) -> core::slice::Iter<'_, Chunk> {
    self.chunks.iter()
  }

  /// All the chunks as a slice.
  #[inline]
  #[must_use]
  pub fn chunks(&self) -> &[Chunk] {
    &self.chunks
  }

  /// Takes the chunk list out of the container.
  #[inline]
  #[must_use]
  pub fn into_chunks(self) -> Vec<Chunk> {
    self.chunks
  }

  /// Index of the first chunk with the given type.
  #[inline]
  #[must_use]
  pub fn position(&self, ty: ChunkTy) -> Option<usize> {
    self.chunks.iter().position(|c| c.ty() == ty)
  }

  /// Index of the last chunk with the given type.
  #[inline]
  #[must_use]
  pub fn rposition(&self, ty: ChunkTy) -> Option<usize> {
    self.chunks.iter().rposition(|c| c.ty() == ty)
  }

  /// The first `IHDR`, parsed.
  pub fn header(&self) -> Result<IHDR, ApngError> {
    let chunk =
      self.chunks.iter().find(|c| c.ty() == ChunkTy::IHDR).ok_or(FormatError::MissingHeader)?;
    Ok(IHDR::try_from(chunk.data())?)
  }
}
impl Extend<Chunk> for PngContainer {
  #[inline]
  fn extend<T: IntoIterator<Item = Chunk>>(&mut self, iter: T) {
    self.chunks.extend(iter)
  }
}
impl From<Vec<Chunk>> for PngContainer {
  #[inline]
  fn from(chunks: Vec<Chunk>) -> Self {
    Self { chunks }
  }
}
impl FromIterator<Chunk> for PngContainer {
  #[inline]
  fn from_iter<T: IntoIterator<Item = Chunk>>(iter: T) -> Self {
    Self { chunks: iter.into_iter().collect() }
  }
}
impl<'a> IntoIterator for &'a PngContainer {
  type Item = &'a Chunk;
  type IntoIter = core::slice::Iter<'a, Chunk>;
  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.chunks.iter()
  }
}
