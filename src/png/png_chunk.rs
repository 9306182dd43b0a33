use super::*;

/// A parsed PNG chunk, borrowing from a [`Chunk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(nonstandard_style)]
pub enum PngChunk<'b> {
  /// Image Header
  IHDR(IHDR),
  /// Palette
  PLTE(PLTE<'b>),
  /// Image Data
  IDAT(IDAT<'b>),
  /// Image End
  IEND(IEND),
  /// Transparency
  tRNS(tRNS<'b>),
  /// Text
  tEXt(tEXt<'b>),
  /// Animation Control
  acTL(acTL),
  /// Frame Control
  fcTL(fcTL),
  /// Frame Data
  fdAT(fdAT<'b>),
  /// Any other chunk type, kept exactly as it was.
  Unknown(&'b Chunk),
}
impl<'b> TryFrom<&'b Chunk> for PngChunk<'b> {
  type Error = ValidationError;
  #[inline]
  fn try_from(chunk: &'b Chunk) -> Result<Self, Self::Error> {
    let data = chunk.data();
    Ok(match chunk.ty() {
      ChunkTy::IHDR => PngChunk::IHDR(IHDR::try_from(data)?),
      ChunkTy::PLTE => PngChunk::PLTE(PLTE::try_from(data)?),
      ChunkTy::IDAT => PngChunk::IDAT(IDAT::from(data)),
      ChunkTy::IEND => PngChunk::IEND(IEND::try_from(data)?),
      ChunkTy::tRNS => PngChunk::tRNS(tRNS::from(data)),
      ChunkTy::tEXt => PngChunk::tEXt(tEXt::try_from(data)?),
      ChunkTy::acTL => PngChunk::acTL(acTL::try_from(data)?),
      ChunkTy::fcTL => PngChunk::fcTL(fcTL::try_from(data)?),
      ChunkTy::fdAT => PngChunk::fdAT(fdAT::try_from(data)?),
      _ => PngChunk::Unknown(chunk),
    })
  }
}
impl PngChunk<'_> {
  /// The type code of this chunk.
  #[inline]
  #[must_use]
  pub const fn ty(&self) -> ChunkTy {
    match self {
      Self::IHDR(_) => ChunkTy::IHDR,
      Self::PLTE(_) => ChunkTy::PLTE,
      Self::IDAT(_) => ChunkTy::IDAT,
      Self::IEND(_) => ChunkTy::IEND,
      Self::tRNS(_) => ChunkTy::tRNS,
      Self::tEXt(_) => ChunkTy::tEXt,
      Self::acTL(_) => ChunkTy::acTL,
      Self::fcTL(_) => ChunkTy::fcTL,
      Self::fdAT(_) => ChunkTy::fdAT,
      Self::Unknown(chunk) => chunk.ty(),
    }
  }

  /// Serializes back into an owned chunk.
  #[must_use]
  pub fn to_chunk(&self) -> Chunk {
    match self {
      Self::IHDR(ihdr) => ihdr.to_chunk(),
      Self::PLTE(plte) => plte.to_chunk(),
      Self::IDAT(idat) => idat.to_chunk(),
      Self::IEND(iend) => iend.to_chunk(),
      Self::tRNS(trns) => trns.to_chunk(),
      Self::tEXt(text) => text.to_chunk(),
      Self::acTL(actl) => actl.to_chunk(),
      Self::fcTL(fctl) => fctl.to_chunk(),
      Self::fdAT(fdat) => fdat.to_chunk(),
      Self::Unknown(chunk) => (*chunk).clone(),
    }
  }
}
