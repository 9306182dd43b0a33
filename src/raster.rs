#![forbid(unsafe_code)]

//! Provides the heap-allocated RGBA8 image type.

use alloc::vec::Vec;

use crate::{ApngError, RGBA8};

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// index.
///
/// You don't ever need to call this function yourself, but it's how the
/// [`Raster`] converts 2d coordinates into index values within its pixel
/// vector.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y as usize) * (width as usize) + (x as usize)
}

/// A rectangle within a raster, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct Rect {
  pub x: u32,
  pub y: u32,
  pub width: u32,
  pub height: u32,
}
impl Rect {
  /// If the rect lies entirely within a `width` by `height` area.
  #[inline]
  #[must_use]
  pub const fn fits_within(&self, width: u32, height: u32) -> bool {
    (self.x as u64) + (self.width as u64) <= (width as u64)
      && (self.y as u64) + (self.height as u64) <= (height as u64)
  }
}

/// An RGBA8 image, with pixels stored left to right, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct Raster {
  pub width: u32,
  pub height: u32,
  pub pixels: Vec<RGBA8>,
}
impl Raster {
  /// Makes a raster with every pixel set to `color`.
  ///
  /// ## Failure
  /// * The allocation fails.
  pub fn try_new_filled(width: u32, height: u32, color: RGBA8) -> Result<Self, ApngError> {
    let count = (width as usize).checked_mul(height as usize).ok_or(ApngError::Alloc)?;
    let mut pixels = Vec::new();
    pixels.try_reserve(count)?;
    pixels.resize(count, color);
    Ok(Self { width, height, pixels })
  }

  /// Makes a fully transparent raster.
  #[inline]
  pub fn try_new_transparent(width: u32, height: u32) -> Result<Self, ApngError> {
    Self::try_new_filled(width, height, RGBA8::TRANSPARENT)
  }

  /// Clones the raster, reporting allocation failure instead of aborting.
  pub fn try_clone(&self) -> Result<Self, ApngError> {
    let mut pixels = Vec::new();
    pixels.try_reserve(self.pixels.len())?;
    pixels.extend_from_slice(&self.pixels);
    Ok(Self { width: self.width, height: self.height, pixels })
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<&RGBA8> {
    if x < self.width && y < self.height {
      self.pixels.get(xy_width_to_index(x, y, self.width))
    } else {
      None
    }
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut RGBA8> {
    if x < self.width && y < self.height {
      self.pixels.get_mut(xy_width_to_index(x, y, self.width))
    } else {
      None
    }
  }

  /// The row `y` as a slice, or `None` if out of bounds.
  #[inline]
  #[must_use]
  pub fn row(&self, y: u32) -> Option<&[RGBA8]> {
    if y < self.height {
      let start = xy_width_to_index(0, y, self.width);
      self.pixels.get(start..start + self.width as usize)
    } else {
      None
    }
  }

  /// The row `y` as a mutable slice, or `None` if out of bounds.
  #[inline]
  #[must_use]
  pub fn row_mut(&mut self, y: u32) -> Option<&mut [RGBA8]> {
    if y < self.height {
      let start = xy_width_to_index(0, y, self.width);
      self.pixels.get_mut(start..start + self.width as usize)
    } else {
      None
    }
  }

  /// The whole raster as a rect at the origin.
  #[inline]
  #[must_use]
  pub const fn bounds(&self) -> Rect {
    Rect { x: 0, y: 0, width: self.width, height: self.height }
  }

  /// Sets every pixel within `rect` to `color`.
  ///
  /// Any part of the rect outside the raster is ignored.
  pub fn fill_rect(&mut self, rect: Rect, color: RGBA8) {
    let x_end = rect.x.saturating_add(rect.width).min(self.width);
    let y_end = rect.y.saturating_add(rect.height).min(self.height);
    if rect.x >= x_end {
      return;
    }
    for y in rect.y..y_end {
      if let Some(row) = self.row_mut(y) {
        row[rect.x as usize..x_end as usize].fill(color);
      }
    }
  }

  /// If the pixel count matches the dimensions.
  #[inline]
  #[must_use]
  pub fn is_well_formed(&self) -> bool {
    (self.width as usize).checked_mul(self.height as usize) == Some(self.pixels.len())
  }
}

#[test]
fn test_fill_rect_clips() {
  let mut r = Raster::try_new_transparent(4, 3).unwrap();
  let red = RGBA8::opaque(255, 0, 0);
  r.fill_rect(Rect { x: 2, y: 1, width: 10, height: 10 }, red);
  assert_eq!(r.get(1, 1), Some(&RGBA8::TRANSPARENT));
  assert_eq!(r.get(2, 1), Some(&red));
  assert_eq!(r.get(3, 2), Some(&red));
  assert_eq!(r.get(3, 0), Some(&RGBA8::TRANSPARENT));
  assert!(r.is_well_formed());
}
