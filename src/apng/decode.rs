use super::*;

/// Size limits for decoding.
///
/// These protect against accidental out-of-memory problems from bad or hostile
/// inputs, since every frame is a full canvas sized raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeLimits {
  /// Largest canvas width allowed.
  pub max_width: u32,
  /// Largest canvas height allowed.
  pub max_height: u32,
}
impl Default for DecodeLimits {
  /// 17,000 by 17,000
  #[inline]
  fn default() -> Self {
    Self { max_width: 17_000, max_height: 17_000 }
  }
}
impl DecodeLimits {
  /// No limits beyond what PNG itself allows.
  #[inline]
  #[must_use]
  pub const fn none() -> Self {
    Self { max_width: u32::MAX, max_height: u32::MAX }
  }

  /// Checks a canvas size against the limits.
  ///
  /// ## Failure
  /// * [`ApngError::DimensionsTooLarge`] if either dimension is too big.
  #[inline]
  pub const fn check_dimensions(&self, width: u32, height: u32) -> Result<(), ApngError> {
    if width > self.max_width || height > self.max_height {
      Err(ApngError::DimensionsTooLarge)
    } else {
      Ok(())
    }
  }
}

/// Decodes APNG data into an [`AnimatedImage`], using a [`PngImageCodec`] for
/// the pixel data of each frame.
#[derive(Debug, Clone, Default)]
pub struct ApngDecoder<C> {
  codec: C,
  limits: DecodeLimits,
}
impl<C: PngImageCodec> ApngDecoder<C> {
  /// Makes a decoder with the default limits.
  #[inline]
  #[must_use]
  pub fn new(codec: C) -> Self {
    Self { codec, limits: DecodeLimits::default() }
  }

  /// Replaces the limits.
  #[inline]
  #[must_use]
  pub fn with_limits(self, limits: DecodeLimits) -> Self {
    Self { limits, ..self }
  }

  /// Decodes a PNG datastream.
  ///
  /// A plain PNG with no animation chunks gives an animation with no frames,
  /// just the backup image.
  ///
  /// ## Failure
  /// Any problem at all stops the decoding, there's no partial output.
  /// * [`ApngError::Format`]: Bad signature, bad CRC, truncated data, or image
  ///   data before the `IHDR`. Also from the codec if frame data won't decode.
  /// * [`ApngError::Validation`]: A chunk with illegal values, or a frame that
  ///   doesn't fit on the canvas.
  /// * [`ApngError::Sequence`]: An `fdAT` with no `fcTL` before it, or a
  ///   sequence number out of order.
  /// * [`ApngError::DimensionsTooLarge`]: The canvas is bigger than the
  ///   decoder's [`DecodeLimits`].
  pub fn decode(&self, bytes: &[u8]) -> Result<AnimatedImage, ApngError> {
    let container = PngContainer::from_png_bytes(bytes)?;
    let mut scan = Scan::default();
    for chunk in &container {
      let parsed = chunk.parse()?;
      if scan.pending.as_ref().is_some_and(|p| p.has_data() && !p.continues_with(&parsed)) {
        scan.finish_frame(&self.codec)?;
      }
      match parsed {
        PngChunk::IHDR(ihdr) => {
          self.limits.check_dimensions(ihdr.width, ihdr.height)?;
          scan.canvas = Raster::try_new_transparent(ihdr.width, ihdr.height)?;
          scan.ihdr = Some(ihdr);
        }
        PngChunk::acTL(actl) => scan.actl = Some(actl),
        PngChunk::IDAT(idat) => {
          scan.header()?;
          scan.default_image.try_reserve(idat.data.len())?;
          scan.default_image.extend_from_slice(idat.data);
          scan.has_default_image = true;
          if let Some(p) = scan.pending.as_mut() {
            p.source = DataSource::IDAT;
            p.data.try_reserve(idat.data.len())?;
            p.data.extend_from_slice(idat.data);
          }
        }
        PngChunk::fcTL(fctl) => {
          scan.header()?;
          scan.take_sequence_number(fctl.sequence_number)?;
          check_rect(&scan.canvas, fctl.rect())?;
          let mut fctl = fctl;
          if !scan.seen_frame_control && fctl.dispose_op == DisposeOp::Previous {
            // there's no "previous" for the first frame.
            fctl.dispose_op = DisposeOp::Background;
          }
          scan.seen_frame_control = true;
          if let Some(p) = &scan.pending {
            debug!("fcTL {} replaced before any frame data", p.fctl.sequence_number);
          }
          scan.pending = Some(PendingFrame { fctl, source: DataSource::Nothing, data: Vec::new() });
        }
        PngChunk::fdAT(fdat) => {
          let sequence_number = fdat.sequence_number;
          if scan.pending.is_none() {
            return Err(SequenceError::MissingFrameControl { sequence_number }.into());
          }
          scan.take_sequence_number(sequence_number)?;
          if let Some(p) = scan.pending.as_mut() {
            p.source = DataSource::fdAT;
            p.data.try_reserve(fdat.data.len())?;
            p.data.extend_from_slice(fdat.data);
          }
        }
        PngChunk::IEND(_) => {
          if let Some(p) = scan.pending.take() {
            debug!("fcTL {} has no frame data, dropped", p.fctl.sequence_number);
          }
          break;
        }
        PngChunk::PLTE(_) | PngChunk::tRNS(_) | PngChunk::tEXt(_) | PngChunk::Unknown(_) => {
          scan.others.try_reserve(1)?;
          scan.others.push(chunk);
        }
      }
    }
    let ihdr = scan.header()?;
    if let Some(actl) = scan.actl {
      if actl.num_frames as usize != scan.frames.len() {
        warn!("acTL declares {} frames, found {}", actl.num_frames, scan.frames.len());
      }
    }
    let backup = if scan.frames.is_empty() {
      Some(self.codec.decode(bytes)?)
    } else if scan.has_default_image {
      let png = single_image_png(ihdr, &scan.others, core::mem::take(&mut scan.default_image))?;
      Some(self.codec.decode(&png)?)
    } else {
      None
    };
    let num_plays = scan.actl.map(|a| a.num_plays).unwrap_or(0);
    Ok(AnimatedImage::new(ihdr.width, ihdr.height, num_plays, scan.frames, backup)?)
  }
}

/// Decodes APNG data with the built-in [`ZlibPngCodec`] and the default
/// [`DecodeLimits`].
#[cfg(feature = "miniz_oxide")]
#[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
#[inline]
pub fn decode_apng(bytes: &[u8]) -> Result<AnimatedImage, ApngError> {
  ApngDecoder::new(ZlibPngCodec::default()).decode(bytes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(nonstandard_style)]
enum DataSource {
  Nothing,
  IDAT,
  fdAT,
}

/// An `fcTL` and the frame data collected after it so far.
#[derive(Debug)]
struct PendingFrame {
  fctl: fcTL,
  source: DataSource,
  data: Vec<u8>,
}
impl PendingFrame {
  /// If any `IDAT` or `fdAT` has arrived for this frame yet.
  ///
  /// Until then other chunks don't end the frame, and another `fcTL` replaces
  /// this one.
  #[inline]
  fn has_data(&self) -> bool {
    self.source != DataSource::Nothing
  }

  /// If the chunk adds more data to this frame.
  ///
  /// A frame's data is one unbroken run of either `IDAT` or `fdAT` chunks.
  fn continues_with(&self, chunk: &PngChunk<'_>) -> bool {
    matches!(
      (self.source, chunk),
      (DataSource::Nothing | DataSource::IDAT, PngChunk::IDAT(_))
        | (DataSource::Nothing | DataSource::fdAT, PngChunk::fdAT(_))
    )
  }
}

/// Everything the decoder tracks while walking the chunks.
#[derive(Default)]
struct Scan<'c> {
  ihdr: Option<IHDR>,
  actl: Option<acTL>,
  canvas: Raster,
  /// Chunks that every frame's standalone PNG needs (palette, etc).
  others: Vec<&'c Chunk>,
  pending: Option<PendingFrame>,
  default_image: Vec<u8>,
  has_default_image: bool,
  next_sequence_number: u32,
  seen_frame_control: bool,
  frames: Vec<Frame>,
}
impl Scan<'_> {
  fn header(&self) -> Result<IHDR, FormatError> {
    self.ihdr.ok_or(FormatError::MissingHeader)
  }

  fn take_sequence_number(&mut self, found: u32) -> Result<(), SequenceError> {
    let expected = self.next_sequence_number;
    if found != expected {
      return Err(SequenceError::OutOfOrder { expected, found });
    }
    self.next_sequence_number = expected.wrapping_add(1);
    Ok(())
  }

  /// Decodes the pending frame, draws it, and moves the canvas along.
  fn finish_frame<C: PngImageCodec>(&mut self, codec: &C) -> Result<(), ApngError> {
    let Some(PendingFrame { fctl, data, .. }) = self.pending.take() else { return Ok(()) };
    let ihdr = self.header()?.with_dimensions(fctl.width, fctl.height)?;
    let png = single_image_png(ihdr, &self.others, data)?;
    let sub_image = codec.decode(&png)?;
    if sub_image.width != fctl.width {
      return Err(ValidationError::new(ChunkTy::fcTL, "width", sub_image.width).into());
    }
    if sub_image.height != fctl.height {
      return Err(ValidationError::new(ChunkTy::fcTL, "height", sub_image.height).into());
    }
    let rendered =
      compose(&self.canvas, &sub_image, fctl.x_offset, fctl.y_offset, fctl.blend_op)?;
    let previous = core::mem::take(&mut self.canvas);
    self.canvas = dispose(previous, &rendered, fctl.rect(), fctl.dispose_op)?;
    debug!(
      "frame {}: {}x{} at ({}, {}), {:?}, {:?}, {}/{}s",
      self.frames.len(),
      fctl.width,
      fctl.height,
      fctl.x_offset,
      fctl.y_offset,
      fctl.blend_op,
      fctl.dispose_op,
      fctl.delay_num,
      fctl.effective_delay_den()
    );
    self.frames.try_reserve(1)?;
    self.frames.push(Frame::new(rendered, fctl.delay_num, fctl.delay_den));
    Ok(())
  }
}

/// Builds a standalone PNG: the header, the shared chunks, one `IDAT` holding
/// `data`, and `IEND`.
fn single_image_png(ihdr: IHDR, others: &[&Chunk], data: Vec<u8>) -> Result<Vec<u8>, ApngError> {
  let mut out = Vec::new();
  out.try_reserve(PNG_SIGNATURE.len() + 12 * 3 + 13 + data.len())?;
  out.extend_from_slice(&PNG_SIGNATURE);
  ihdr.to_chunk().write_to(&mut out)?;
  for chunk in others {
    chunk.write_to(&mut out)?;
  }
  Chunk::new(ChunkTy::IDAT, data).write_to(&mut out)?;
  out.extend_from_slice(&IEND::BYTES);
  Ok(out)
}
