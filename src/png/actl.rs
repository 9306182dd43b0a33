use super::*;

/// `acTL`: Animation control
///
/// Marks the PNG as animated. It has to come before the first `IDAT`.
///
/// Spec: [acTL](https://www.w3.org/TR/png/#acTL-chunk)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub struct acTL {
  /// Number of frames. Must be at least 1.
  pub num_frames: u32,
  /// Times to play the animation, or 0 to loop forever.
  pub num_plays: u32,
}
impl acTL {
  /// Makes an animation control record.
  ///
  /// ## Failure
  /// * `num_frames` is 0.
  #[inline]
  pub const fn new(num_frames: u32, num_plays: u32) -> Result<Self, ValidationError> {
    if num_frames == 0 {
      return Err(ValidationError::new(ChunkTy::acTL, "num_frames", 0));
    }
    Ok(Self { num_frames, num_plays })
  }

  /// Makes an owned chunk holding this record.
  #[inline]
  #[must_use]
  pub fn to_chunk(&self) -> Chunk {
    let mut data = Vec::with_capacity(8);
    data.extend_from_slice(&self.num_frames.to_be_bytes());
    data.extend_from_slice(&self.num_plays.to_be_bytes());
    Chunk::new(ChunkTy::acTL, data)
  }
}
impl TryFrom<&[u8]> for acTL {
  type Error = ValidationError;
  #[inline]
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match *value {
      [f0, f1, f2, f3, p0, p1, p2, p3] => {
        Self::new(u32::from_be_bytes([f0, f1, f2, f3]), u32::from_be_bytes([p0, p1, p2, p3]))
      }
      _ => Err(ValidationError::new(ChunkTy::acTL, "length", value.len() as u32)),
    }
  }
}
