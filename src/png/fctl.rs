use super::*;

/// What happens to the frame's area of the canvas once the frame's delay is
/// over, before the next frame is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum DisposeOp {
  /// Leave the canvas as it is.
  #[default]
  None = 0,
  /// Clear the frame's area to transparent black.
  Background = 1,
  /// Put back what the canvas held before this frame was drawn.
  Previous = 2,
}
impl TryFrom<u8> for DisposeOp {
  type Error = ();
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::None,
      1 => Self::Background,
      2 => Self::Previous,
      _ => return Err(()),
    })
  }
}

/// How the frame's pixels are combined with the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BlendOp {
  /// All channels, alpha included, replace the canvas pixels.
  #[default]
  Source = 0,
  /// Alpha composite the frame over the canvas.
  Over = 1,
}
impl TryFrom<u8> for BlendOp {
  type Error = ();
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::Source,
      1 => Self::Over,
      _ => return Err(()),
    })
  }
}

/// `fcTL`: Frame control
///
/// Comes before each frame's data and says where the frame goes, how long it
/// shows, and how it's blended and disposed.
///
/// Spec: [fcTL](https://www.w3.org/TR/png/#fcTL-chunk)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub struct fcTL {
  /// Position in the `fcTL`/`fdAT` sequence, starting from 0.
  pub sequence_number: u32,
  /// Frame width, more than 0.
  pub width: u32,
  /// Frame height, more than 0.
  pub height: u32,
  /// Frame position on the canvas.
  pub x_offset: u32,
  /// Frame position on the canvas.
  pub y_offset: u32,
  /// Delay numerator, in seconds.
  pub delay_num: u16,
  /// Delay denominator. 0 means 100.
  pub delay_den: u16,
  /// Canvas treatment after the frame.
  pub dispose_op: DisposeOp,
  /// Canvas treatment during the frame.
  pub blend_op: BlendOp,
}
impl fcTL {
  /// Checks the field rules.
  ///
  /// ## Failure
  /// * Width or height is 0.
  #[inline]
  pub const fn validate(self) -> Result<Self, ValidationError> {
    if self.width == 0 {
      return Err(ValidationError::new(ChunkTy::fcTL, "width", 0));
    }
    if self.height == 0 {
      return Err(ValidationError::new(ChunkTy::fcTL, "height", 0));
    }
    Ok(self)
  }

  /// The area of the canvas this frame covers.
  #[inline]
  #[must_use]
  pub const fn rect(&self) -> Rect {
    Rect { x: self.x_offset, y: self.y_offset, width: self.width, height: self.height }
  }

  /// The delay denominator with the "0 means 100" rule applied.
  #[inline]
  #[must_use]
  pub const fn effective_delay_den(&self) -> u16 {
    if self.delay_den == 0 {
      100
    } else {
      self.delay_den
    }
  }

  /// Encodes the 26 byte payload.
  #[must_use]
  pub fn to_bytes(&self) -> [u8; 26] {
    let mut out = [0_u8; 26];
    out[0..4].copy_from_slice(&self.sequence_number.to_be_bytes());
    out[4..8].copy_from_slice(&self.width.to_be_bytes());
    out[8..12].copy_from_slice(&self.height.to_be_bytes());
    out[12..16].copy_from_slice(&self.x_offset.to_be_bytes());
    out[16..20].copy_from_slice(&self.y_offset.to_be_bytes());
    out[20..22].copy_from_slice(&self.delay_num.to_be_bytes());
    out[22..24].copy_from_slice(&self.delay_den.to_be_bytes());
    out[24] = self.dispose_op as u8;
    out[25] = self.blend_op as u8;
    out
  }

  /// Makes an owned chunk holding this record.
  #[inline]
  #[must_use]
  pub fn to_chunk(&self) -> Chunk {
    Chunk::new(ChunkTy::fcTL, self.to_bytes().to_vec())
  }
}
impl TryFrom<&[u8]> for fcTL {
  type Error = ValidationError;
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    let err = |field, value| ValidationError::new(ChunkTy::fcTL, field, value);
    let data: &[u8; 26] = value.try_into().map_err(|_| err("length", value.len() as u32))?;
    let u32_at = |i: usize| u32::from_be_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);
    let u16_at = |i: usize| u16::from_be_bytes([data[i], data[i + 1]]);
    fcTL {
      sequence_number: u32_at(0),
      width: u32_at(4),
      height: u32_at(8),
      x_offset: u32_at(12),
      y_offset: u32_at(16),
      delay_num: u16_at(20),
      delay_den: u16_at(22),
      dispose_op: DisposeOp::try_from(data[24]).map_err(|_| err("dispose_op", data[24].into()))?,
      blend_op: BlendOp::try_from(data[25]).map_err(|_| err("blend_op", data[25].into()))?,
    }
    .validate()
  }
}
