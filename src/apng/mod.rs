//! Holds the tools for working with whole animations.
//!
//! An animation is decoded into an [`AnimatedImage`]: the canvas size, how many
//! times to loop, a list of fully rendered [`Frame`]s, and (usually) the
//! "backup" image that programs without APNG support would show.
//!
//! Each frame in the APNG data only covers some rectangle of the canvas, and
//! says how it should be blended with what's already there and what happens to
//! its area afterwards. The decoder does all of that work for you (see
//! [`compose`] and [`dispose`]), so every frame you get is a full canvas sized
//! raster that can be shown directly.
//!
//! Going the other way, the encoder writes each frame as a full canvas update.
//! It doesn't try to find the smallest changed rectangle.

use alloc::vec::Vec;

use log::{debug, warn};

use crate::{
  png::{
    acTL, fcTL, fdAT, BlendOp, Chunk, ChunkTy, DisposeOp, PngChunk, PngContainer, PngImageCodec,
    IEND, IHDR, PNG_SIGNATURE,
  },
  ApngError, FormatError, Raster, Rect, SequenceError, ValidationError, RGBA8,
};

#[cfg(feature = "miniz_oxide")]
use crate::png::ZlibPngCodec;

mod compose;
pub use compose::*;

mod decode;
pub use decode::*;

mod encode;
pub use encode::*;

mod timeline;
pub use timeline::*;

/// One fully rendered frame of an animation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
  /// The whole canvas as it looks while this frame is shown.
  pub raster: Raster,
  /// Delay numerator, in seconds.
  pub delay_num: u16,
  /// Delay denominator. 0 means 100.
  pub delay_den: u16,
}
impl Frame {
  /// Makes a frame.
  #[inline]
  #[must_use]
  pub const fn new(raster: Raster, delay_num: u16, delay_den: u16) -> Self {
    Self { raster, delay_num, delay_den }
  }

  /// How long the frame is shown, rounded to the nearest millisecond.
  #[inline]
  #[must_use]
  pub const fn delay_ms(&self) -> u32 {
    let den = if self.delay_den == 0 { 100 } else { self.delay_den as u32 };
    (self.delay_num as u32 * 1000 + den / 2) / den
  }
}

/// A decoded animation.
///
/// Every frame raster (and the backup raster, if any) is exactly the canvas
/// size, which [`new`](Self::new) checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnimatedImage {
  width: u32,
  height: u32,
  num_plays: u32,
  backup: Option<Raster>,
  frames: Vec<Frame>,
}
impl AnimatedImage {
  /// Makes an animation from its parts.
  ///
  /// ## Failure
  /// * The width or height is 0.
  /// * A frame or the backup doesn't match the canvas size.
  pub fn new(
    width: u32, height: u32, num_plays: u32, frames: Vec<Frame>, backup: Option<Raster>,
  ) -> Result<Self, ValidationError> {
    if width == 0 {
      return Err(ValidationError::new(ChunkTy::IHDR, "width", 0));
    }
    if height == 0 {
      return Err(ValidationError::new(ChunkTy::IHDR, "height", 0));
    }
    let check = |r: &Raster, chunk: ChunkTy| {
      if r.width != width {
        Err(ValidationError::new(chunk, "width", r.width))
      } else if r.height != height || !r.is_well_formed() {
        Err(ValidationError::new(chunk, "height", r.height))
      } else {
        Ok(())
      }
    };
    for frame in &frames {
      check(&frame.raster, ChunkTy::fcTL)?;
    }
    if let Some(b) = &backup {
      check(b, ChunkTy::IDAT)?;
    }
    Ok(Self { width, height, num_plays, backup, frames })
  }

  /// Canvas width.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }

  /// Canvas height.
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }

  /// Times to play the animation, 0 means forever.
  #[inline]
  #[must_use]
  pub const fn num_plays(&self) -> u32 {
    self.num_plays
  }

  /// The image for programs that can't show animations.
  #[inline]
  #[must_use]
  pub const fn backup(&self) -> Option<&Raster> {
    self.backup.as_ref()
  }

  /// The frames, in display order.
  #[inline]
  #[must_use]
  pub fn frames(&self) -> &[Frame] {
    &self.frames
  }

  /// Splits the animation back into the frame list and the backup image.
  #[inline]
  #[must_use]
  pub fn into_parts(self) -> (Vec<Frame>, Option<Raster>) {
    (self.frames, self.backup)
  }
}

#[test]
fn test_Frame_delay_ms() {
  let raster = Raster::default();
  assert_eq!(Frame::new(raster.clone(), 1, 10).delay_ms(), 100);
  assert_eq!(Frame::new(raster.clone(), 5, 0).delay_ms(), 50);
  assert_eq!(Frame::new(raster.clone(), 1, 3).delay_ms(), 333);
  assert_eq!(Frame::new(raster.clone(), 2, 3).delay_ms(), 667);
  assert_eq!(Frame::new(raster, 0, 0).delay_ms(), 0);
}

#[test]
fn test_AnimatedImage_checks_sizes() {
  let ok = Raster::try_new_transparent(3, 2).unwrap();
  let wide = Raster::try_new_transparent(4, 2).unwrap();
  assert!(AnimatedImage::new(3, 2, 0, alloc::vec![Frame::new(ok.clone(), 1, 1)], None).is_ok());
  assert_eq!(
    AnimatedImage::new(3, 2, 0, alloc::vec![Frame::new(wide.clone(), 1, 1)], None),
    Err(ValidationError::new(ChunkTy::fcTL, "width", 4))
  );
  assert_eq!(
    AnimatedImage::new(3, 2, 0, Vec::new(), Some(wide)),
    Err(ValidationError::new(ChunkTy::IDAT, "width", 4))
  );
  assert_eq!(
    AnimatedImage::new(0, 2, 0, Vec::new(), Some(ok)),
    Err(ValidationError::new(ChunkTy::IHDR, "width", 0))
  );
}
