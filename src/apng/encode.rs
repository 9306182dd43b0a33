use super::*;

/// Encodes an [`AnimatedImage`] as APNG data, using a [`PngImageCodec`] for the
/// pixel data of each frame.
///
/// Every frame is written as a full canvas update with
/// [`BlendOp::Source`] and [`DisposeOp::Background`].
#[derive(Debug, Clone, Default)]
pub struct ApngEncoder<C> {
  codec: C,
}
impl<C: PngImageCodec> ApngEncoder<C> {
  /// Makes an encoder.
  #[inline]
  #[must_use]
  pub const fn new(codec: C) -> Self {
    Self { codec }
  }

  /// Encodes the animation.
  ///
  /// * The backup image (or the first frame, if there's no backup) becomes the
  ///   normal PNG image data.
  /// * If that image is also the first frame it gets an `fcTL` in front of it,
  ///   otherwise the first frame is written with `fdAT` chunks like all the
  ///   rest.
  /// * An animation with no frames is written as a plain PNG of the backup.
  ///
  /// ## Failure
  /// * There's no frames and no backup.
  /// * The codec fails, or gives frames with different pixel formats.
  pub fn encode(&self, image: &AnimatedImage) -> Result<Vec<u8>, ApngError> {
    let frames = image.frames();
    let (first, rest) = match (frames.split_first(), image.backup()) {
      (None, Some(backup)) => {
        return PngContainer::from_png_bytes(&self.codec.encode(backup)?)?.to_png_bytes();
      }
      (None, None) => return Err(ValidationError::new(ChunkTy::acTL, "num_frames", 0).into()),
      (Some(split), _) => split,
    };
    let num_frames = u32::try_from(frames.len())
      .map_err(|_| ValidationError::new(ChunkTy::acTL, "num_frames", u32::MAX))?;
    let (baseline, default_is_first_frame) = match image.backup() {
      Some(backup) if *backup != first.raster => (backup, false),
      _ => (&first.raster, true),
    };

    let mut container = PngContainer::from_png_bytes(&self.codec.encode(baseline)?)?;
    let ihdr = container.header()?;
    let ihdr_pos = container.position(ChunkTy::IHDR).ok_or(FormatError::MissingHeader)?;
    container.insert(ihdr_pos + 1, acTL::new(num_frames, image.num_plays())?.to_chunk());

    let mut sequence_number = 0_u32;
    let animated: &[Frame] = if default_is_first_frame {
      let first_idat = container.position(ChunkTy::IDAT).ok_or(FormatError::ImageDataSize)?;
      let fctl = frame_control(image, first, take_next(&mut sequence_number));
      container.insert(first_idat, fctl.to_chunk());
      debug!("frame 0: the default image");
      rest
    } else {
      frames
    };

    let skipped = frames.len() - animated.len();
    let last_idat = container.rposition(ChunkTy::IDAT).ok_or(FormatError::ImageDataSize)?;
    let mut insert_at = last_idat + 1;
    for (i, frame) in animated.iter().enumerate() {
      let fctl = frame_control(image, frame, take_next(&mut sequence_number));
      container.insert(insert_at, fctl.to_chunk());
      insert_at += 1;
      let frame_png = PngContainer::from_png_bytes(&self.codec.encode(&frame.raster)?)?;
      check_same_format(&ihdr, &frame_png.header()?)?;
      let mut fdat_count = 0;
      for idat in frame_png.iter().filter(|c| c.ty() == ChunkTy::IDAT) {
        let fdat = fdAT { sequence_number: take_next(&mut sequence_number), data: idat.data() };
        container.insert(insert_at, fdat.to_chunk());
        insert_at += 1;
        fdat_count += 1;
      }
      debug!("frame {}: {} fdAT chunks", skipped + i, fdat_count);
    }
    container.to_png_bytes()
  }
}

/// Encodes an animation with the built-in [`ZlibPngCodec`].
#[cfg(feature = "miniz_oxide")]
#[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
#[inline]
pub fn encode_apng(image: &AnimatedImage) -> Result<Vec<u8>, ApngError> {
  ApngEncoder::new(ZlibPngCodec::default()).encode(image)
}

#[inline]
fn take_next(sequence_number: &mut u32) -> u32 {
  let n = *sequence_number;
  *sequence_number += 1;
  n
}

/// A full canvas frame, cleared after it's shown.
fn frame_control(image: &AnimatedImage, frame: &Frame, sequence_number: u32) -> fcTL {
  fcTL {
    sequence_number,
    width: image.width(),
    height: image.height(),
    x_offset: 0,
    y_offset: 0,
    delay_num: frame.delay_num,
    delay_den: frame.delay_den,
    dispose_op: DisposeOp::Background,
    blend_op: BlendOp::Source,
  }
}

/// Every frame shares the main image's header, apart from the size.
fn check_same_format(main: &IHDR, frame: &IHDR) -> Result<(), ValidationError> {
  let err = |field, value| Err(ValidationError::new(ChunkTy::IHDR, field, value));
  if frame.bit_depth != main.bit_depth {
    return err("bit_depth", frame.bit_depth.into());
  }
  if frame.color_type != main.color_type {
    return err("color_type", frame.color_type as u32);
  }
  if frame.is_interlaced != main.is_interlaced {
    return err("interlace_method", frame.is_interlaced as u32);
  }
  Ok(())
}
