use super::*;

/// Draws a frame's sub-image onto a copy of the canvas.
///
/// * [`BlendOp::Source`] replaces every channel of the covered pixels.
/// * [`BlendOp::Over`] alpha composites the sub-image over the canvas (see
///   [`RGBA8::over`]).
///
/// Pixels outside the sub-image's rectangle are copied unchanged.
///
/// ## Failure
/// * The rectangle at `(x_offset, y_offset)` doesn't fit within the canvas.
/// * A raster's pixel count doesn't match its dimensions.
/// * Allocation fails.
pub fn compose(
  canvas: &Raster, sub_image: &Raster, x_offset: u32, y_offset: u32, blend: BlendOp,
) -> Result<Raster, ApngError> {
  let rect = Rect { x: x_offset, y: y_offset, width: sub_image.width, height: sub_image.height };
  check_rect(canvas, rect)?;
  if !sub_image.is_well_formed() {
    return Err(ValidationError::new(ChunkTy::fcTL, "height", sub_image.height).into());
  }
  let mut out = canvas.try_clone()?;
  if sub_image.width == 0 {
    return Ok(out);
  }
  let x_range = x_offset as usize..(x_offset + sub_image.width) as usize;
  for (src_row, y) in sub_image.pixels.chunks_exact(sub_image.width as usize).zip(y_offset..) {
    let Some(dst_row) = out.row_mut(y) else { break };
    let dst_row = &mut dst_row[x_range.clone()];
    match blend {
      BlendOp::Source => dst_row.copy_from_slice(src_row),
      BlendOp::Over => {
        for (d, s) in dst_row.iter_mut().zip(src_row) {
          *d = s.over(*d);
        }
      }
    }
  }
  Ok(out)
}

/// Works out the canvas that the next frame is drawn onto.
///
/// * `previous` is the canvas from before `rendered` was composed.
/// * `rendered` is the output of [`compose`] for this frame.
/// * `rect` is the area this frame covered.
///
/// [`DisposeOp::None`] keeps `rendered`, [`DisposeOp::Background`] is
/// `rendered` with `rect` cleared to transparent black, and
/// [`DisposeOp::Previous`] goes back to `previous`.
pub fn dispose(
  previous: Raster, rendered: &Raster, rect: Rect, op: DisposeOp,
) -> Result<Raster, ApngError> {
  Ok(match op {
    DisposeOp::None => rendered.try_clone()?,
    DisposeOp::Background => {
      let mut next = rendered.try_clone()?;
      next.fill_rect(rect, RGBA8::TRANSPARENT);
      next
    }
    DisposeOp::Previous => previous,
  })
}

/// Checks that `rect` fits within the canvas.
pub(crate) fn check_rect(canvas: &Raster, rect: Rect) -> Result<(), ValidationError> {
  if !canvas.is_well_formed() {
    return Err(ValidationError::new(ChunkTy::IHDR, "height", canvas.height));
  }
  if !(Rect { y: 0, height: 0, ..rect }).fits_within(canvas.width, canvas.height) {
    return Err(ValidationError::new(ChunkTy::fcTL, "x_offset", rect.x));
  }
  if !rect.fits_within(canvas.width, canvas.height) {
    return Err(ValidationError::new(ChunkTy::fcTL, "y_offset", rect.y));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn checkerboard(width: u32, height: u32, a: RGBA8, b: RGBA8) -> Raster {
    let mut r = Raster::try_new_filled(width, height, a).unwrap();
    for y in 0..height {
      for x in 0..width {
        if (x + y) % 2 == 1 {
          *r.get_mut(x, y).unwrap() = b;
        }
      }
    }
    r
  }

  #[test]
  fn test_compose_source_replaces_rect() {
    let canvas = Raster::try_new_filled(4, 4, RGBA8::opaque(9, 9, 9)).unwrap();
    let sub = Raster::try_new_filled(2, 1, RGBA8::new(1, 2, 3, 0)).unwrap();
    let out = compose(&canvas, &sub, 1, 3, BlendOp::Source).unwrap();
    assert_eq!(out.get(0, 3), Some(&RGBA8::opaque(9, 9, 9)));
    assert_eq!(out.get(1, 3), Some(&RGBA8::new(1, 2, 3, 0)));
    assert_eq!(out.get(2, 3), Some(&RGBA8::new(1, 2, 3, 0)));
    assert_eq!(out.get(3, 3), Some(&RGBA8::opaque(9, 9, 9)));
    assert_eq!(out.get(1, 2), Some(&RGBA8::opaque(9, 9, 9)));
    // the input canvas is untouched
    assert!(canvas.pixels.iter().all(|p| *p == RGBA8::opaque(9, 9, 9)));
  }

  #[test]
  fn test_compose_over_identities() {
    let canvas = checkerboard(3, 3, RGBA8::new(10, 20, 30, 40), RGBA8::opaque(200, 0, 0));
    // fully opaque over is the same as source
    let opaque = checkerboard(3, 3, RGBA8::opaque(1, 2, 3), RGBA8::opaque(4, 5, 6));
    assert_eq!(
      compose(&canvas, &opaque, 0, 0, BlendOp::Over).unwrap(),
      compose(&canvas, &opaque, 0, 0, BlendOp::Source).unwrap()
    );
    // fully transparent over changes nothing
    let clear = Raster::try_new_transparent(3, 3).unwrap();
    assert_eq!(compose(&canvas, &clear, 0, 0, BlendOp::Over).unwrap(), canvas);
    // but fully transparent source clears
    assert_eq!(compose(&canvas, &clear, 0, 0, BlendOp::Source).unwrap(), clear);
  }

  #[test]
  fn test_compose_rejects_bad_rect() {
    let canvas = Raster::try_new_transparent(4, 4).unwrap();
    let sub = Raster::try_new_transparent(2, 2).unwrap();
    assert!(compose(&canvas, &sub, 2, 2, BlendOp::Source).is_ok());
    assert_eq!(
      compose(&canvas, &sub, 3, 0, BlendOp::Source),
      Err(ApngError::Validation(ValidationError::new(ChunkTy::fcTL, "x_offset", 3)))
    );
    assert_eq!(
      compose(&canvas, &sub, 0, 3, BlendOp::Over),
      Err(ApngError::Validation(ValidationError::new(ChunkTy::fcTL, "y_offset", 3)))
    );
    assert!(compose(&canvas, &sub, u32::MAX, 0, BlendOp::Source).is_err());
  }

  #[test]
  fn test_dispose_ops() {
    let previous = Raster::try_new_filled(3, 3, RGBA8::opaque(1, 1, 1)).unwrap();
    let rendered = Raster::try_new_filled(3, 3, RGBA8::opaque(2, 2, 2)).unwrap();
    let rect = Rect { x: 1, y: 1, width: 2, height: 1 };

    let next = dispose(previous.clone(), &rendered, rect, DisposeOp::None).unwrap();
    assert_eq!(next, rendered);

    let next = dispose(previous.clone(), &rendered, rect, DisposeOp::Previous).unwrap();
    assert_eq!(next, previous);

    let next = dispose(previous, &rendered, rect, DisposeOp::Background).unwrap();
    assert_eq!(next.get(0, 1), Some(&RGBA8::opaque(2, 2, 2)));
    assert_eq!(next.get(1, 1), Some(&RGBA8::TRANSPARENT));
    assert_eq!(next.get(2, 1), Some(&RGBA8::TRANSPARENT));
    assert_eq!(next.get(1, 0), Some(&RGBA8::opaque(2, 2, 2)));
    assert_eq!(next.get(1, 2), Some(&RGBA8::opaque(2, 2, 2)));
  }
}
