use super::*;

/// The types of color that PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  /// Greyscale
  Y = 0,
  /// Red, Green, Blue
  RGB = 2,
  /// Index into a palette.
  ///
  /// The palette will have RGB8 data. There may optionally be a transparency
  /// chunk.
  Index = 3,
  /// Greyscale + Alpha
  YA = 4,
  /// Red, Green, Blue, Alpha
  RGBA = 6,
}
impl PngColorType {
  /// The number of channels in this type of color.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Y => 1,
      Self::RGB => 3,
      Self::Index => 1,
      Self::YA => 2,
      Self::RGBA => 4,
    }
  }

  /// If `bit_depth` is allowed with this color type.
  #[inline]
  #[must_use]
  pub const fn allows_bit_depth(self, bit_depth: u8) -> bool {
    match self {
      Self::Y => matches!(bit_depth, 1 | 2 | 4 | 8 | 16),
      Self::Index => matches!(bit_depth, 1 | 2 | 4 | 8),
      Self::RGB | Self::YA | Self::RGBA => matches!(bit_depth, 8 | 16),
    }
  }
}
impl TryFrom<u8> for PngColorType {
  type Error = ();
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => PngColorType::Y,
      2 => PngColorType::RGB,
      3 => PngColorType::Index,
      4 => PngColorType::YA,
      6 => PngColorType::RGBA,
      _ => return Err(()),
    })
  }
}

/// `IHDR`: Image header
///
/// Spec: [IHDR](https://www.w3.org/TR/png/#11IHDR)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel (or per index)
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: PngColorType,
  /// always 0 (zlib)
  pub compression_method: u8,
  /// always 0 (adaptive filtering)
  pub filter_method: u8,
  /// if the image data is stored interlaced (Adam7).
  ///
  /// please don't make new interlaced images, they're terrible.
  pub is_interlaced: bool,
}
impl IHDR {
  /// The largest width or height PNG allows.
  pub const MAX_DIMENSION: u32 = (1 << 31) - 1;

  /// Makes a header, checking all the field rules.
  ///
  /// ## Failure
  /// * Width or height is 0 or above [`MAX_DIMENSION`](Self::MAX_DIMENSION).
  /// * The color type is unknown, or the bit depth isn't allowed with it.
  /// * The compression or filter method isn't 0.
  /// * The interlace method isn't 0 or 1.
  pub fn new(
    width: u32, height: u32, bit_depth: u8, color_type: u8, compression_method: u8,
    filter_method: u8, interlace_method: u8,
  ) -> Result<Self, ValidationError> {
    let err = |field, value| ValidationError::new(ChunkTy::IHDR, field, value);
    if width == 0 || width > Self::MAX_DIMENSION {
      return Err(err("width", width));
    }
    if height == 0 || height > Self::MAX_DIMENSION {
      return Err(err("height", height));
    }
    let color_type =
      PngColorType::try_from(color_type).map_err(|_| err("color_type", color_type.into()))?;
    if !color_type.allows_bit_depth(bit_depth) {
      return Err(err("bit_depth", bit_depth.into()));
    }
    if compression_method != 0 {
      return Err(err("compression_method", compression_method.into()));
    }
    if filter_method != 0 {
      return Err(err("filter_method", filter_method.into()));
    }
    let is_interlaced = match interlace_method {
      0 => false,
      1 => true,
      _ => return Err(err("interlace_method", interlace_method.into())),
    };
    Ok(Self {
      width,
      height,
      bit_depth,
      color_type,
      compression_method,
      filter_method,
      is_interlaced,
    })
  }

  /// A copy of this header with different dimensions.
  ///
  /// This is how each APNG frame gets a header of its own: every field except
  /// the size is shared with the main image.
  pub fn with_dimensions(&self, width: u32, height: u32) -> Result<Self, ValidationError> {
    Self::new(
      width,
      height,
      self.bit_depth,
      self.color_type as u8,
      self.compression_method,
      self.filter_method,
      self.is_interlaced as u8,
    )
  }

  /// Bits used by each pixel.
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> usize {
    (self.bit_depth as usize) * self.color_type.channel_count()
  }

  /// Encodes the 13 byte payload.
  #[inline]
  #[must_use]
  pub fn to_bytes(&self) -> [u8; 13] {
    let [w0, w1, w2, w3] = self.width.to_be_bytes();
    let [h0, h1, h2, h3] = self.height.to_be_bytes();
    [
      w0,
      w1,
      w2,
      w3,
      h0,
      h1,
      h2,
      h3,
      self.bit_depth,
      self.color_type as u8,
      self.compression_method,
      self.filter_method,
      self.is_interlaced as u8,
    ]
  }

  /// Makes an owned chunk holding this header.
  #[inline]
  #[must_use]
  pub fn to_chunk(&self) -> Chunk {
    Chunk::new(ChunkTy::IHDR, self.to_bytes().to_vec())
  }
}
impl TryFrom<&[u8]> for IHDR {
  type Error = ValidationError;
  #[inline]
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match *value {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method] => {
        Self::new(
          u32::from_be_bytes([w0, w1, w2, w3]),
          u32::from_be_bytes([h0, h1, h2, h3]),
          bit_depth,
          color_type,
          compression_method,
          filter_method,
          interlace_method,
        )
      }
      _ => Err(ValidationError::new(ChunkTy::IHDR, "length", value.len() as u32)),
    }
  }
}
