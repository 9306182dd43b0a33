use core::fmt;

use alloc::collections::TryReserveError;

use crate::png::ChunkTy;

/// An error from the `apng_chunks` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApngError {
  /// The bytes aren't a well formed PNG chunk stream.
  Format(FormatError),

  /// A structured chunk has a field that breaks the rules for that chunk.
  Validation(ValidationError),

  /// The animation chunks are out of order.
  Sequence(SequenceError),

  /// The allocator couldn't give us enough space.
  Alloc,

  /// The image is too large.
  ///
  /// The decoder limits the width and height of images it processes (see
  /// [`DecodeLimits`](crate::apng::DecodeLimits)) to prevent accidental
  /// out-of-memory problems.
  DimensionsTooLarge,
}
impl fmt::Display for ApngError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Format(e) => fmt::Display::fmt(e, f),
      Self::Validation(e) => fmt::Display::fmt(e, f),
      Self::Sequence(e) => fmt::Display::fmt(e, f),
      Self::Alloc => f.write_str("allocation failed"),
      Self::DimensionsTooLarge => f.write_str("image dimensions exceed the decode limits"),
    }
  }
}
impl From<FormatError> for ApngError {
  #[inline]
  fn from(e: FormatError) -> Self {
    Self::Format(e)
  }
}
impl From<ValidationError> for ApngError {
  #[inline]
  fn from(e: ValidationError) -> Self {
    Self::Validation(e)
  }
}
impl From<SequenceError> for ApngError {
  #[inline]
  fn from(e: SequenceError) -> Self {
    Self::Sequence(e)
  }
}
impl From<TryReserveError> for ApngError {
  #[inline]
  fn from(_: TryReserveError) -> Self {
    Self::Alloc
  }
}

/// The byte stream itself is broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
  /// The first 8 bytes aren't the PNG signature.
  BadSignature,
  /// The data ended in the middle of a chunk, or before `IEND`.
  UnexpectedEnd,
  /// The CRC stored with a chunk doesn't match the chunk's type and data.
  CrcMismatch {
    /// Type of the damaged chunk.
    chunk: ChunkTy,
    /// The CRC written in the stream.
    declared: u32,
    /// The CRC computed from the bytes.
    actual: u32,
  },
  /// Image data was found before any `IHDR`.
  MissingHeader,
  /// The image data isn't a valid zlib stream.
  Zlib,
  /// The decompressed image data is too short for the declared image size.
  ImageDataSize,
  /// A scanline uses a filter type other than 0 through 4.
  IllegalFilterType(u8),
}
impl fmt::Display for FormatError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::BadSignature => f.write_str("not PNG data: bad signature"),
      Self::UnexpectedEnd => f.write_str("unexpected end of data"),
      Self::CrcMismatch { chunk, declared, actual } => write!(
        f,
        "CRC mismatch for chunk of type {chunk}: declared {declared:#010X}, actual {actual:#010X}"
      ),
      Self::MissingHeader => f.write_str("no IHDR chunk before the image data"),
      Self::Zlib => f.write_str("image data is not a valid zlib stream"),
      Self::ImageDataSize => f.write_str("not enough image data for the image size"),
      Self::IllegalFilterType(t) => write!(f, "illegal scanline filter type {t}"),
    }
  }
}

/// A field of a structured chunk has an illegal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
  /// The chunk type the field belongs to.
  pub chunk: ChunkTy,
  /// Name of the offending field.
  pub field: &'static str,
  /// The value that was found.
  pub value: u32,
}
impl ValidationError {
  #[inline]
  #[must_use]
  pub const fn new(chunk: ChunkTy, field: &'static str, value: u32) -> Self {
    Self { chunk, field, value }
  }
}
impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "invalid {} {} in {} chunk", self.field, self.value, self.chunk)
  }
}

/// The `fcTL`/`fdAT` chunks don't form a proper sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError {
  /// An `fdAT` chunk appeared without an `fcTL` chunk before it.
  MissingFrameControl {
    /// Sequence number of the orphaned `fdAT`.
    sequence_number: u32,
  },
  /// A sequence number was skipped, repeated, or went backwards.
  OutOfOrder {
    /// The number that should have come next.
    expected: u32,
    /// The number that was actually there.
    found: u32,
  },
}
impl fmt::Display for SequenceError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MissingFrameControl { sequence_number } => {
        write!(f, "fdAT {sequence_number} has no fcTL before it")
      }
      Self::OutOfOrder { expected, found } => {
        write!(f, "sequence number {found} found where {expected} was expected")
      }
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for ApngError {}
#[cfg(feature = "std")]
impl std::error::Error for FormatError {}
#[cfg(feature = "std")]
impl std::error::Error for ValidationError {}
#[cfg(feature = "std")]
impl std::error::Error for SequenceError {}
