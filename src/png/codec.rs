use super::*;

/// Converts between a single (non-animated) PNG datastream and a [`Raster`].
///
/// The animation code never touches compressed pixel data itself. Each frame
/// is handed to a codec as a standalone PNG, and each frame to be written comes
/// back from the codec as a standalone PNG whose `IDAT` chunks get reused.
pub trait PngImageCodec {
  /// Decodes a complete PNG datastream into RGBA8 pixels.
  ///
  /// The output must be exactly the size the `IHDR` declares.
  fn decode(&self, png: &[u8]) -> Result<Raster, ApngError>;

  /// Encodes the pixels as a complete PNG datastream.
  fn encode(&self, raster: &Raster) -> Result<Vec<u8>, ApngError>;
}
impl<C: PngImageCodec + ?Sized> PngImageCodec for &C {
  #[inline]
  fn decode(&self, png: &[u8]) -> Result<Raster, ApngError> {
    (**self).decode(png)
  }
  #[inline]
  fn encode(&self, raster: &Raster) -> Result<Vec<u8>, ApngError> {
    (**self).encode(raster)
  }
}

/// The built-in codec, using `miniz_oxide` for the zlib streams.
///
/// * Decoding handles every legal color type and bit depth, including palettes,
///   `tRNS` transparency, and Adam7 interlacing.
/// * Encoding always writes 8-bit RGBA, non-interlaced, with no scanline
///   filtering.
#[cfg(feature = "miniz_oxide")]
#[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZlibPngCodec {
  /// Compression level for encoding, 0 (none) through 10 (slowest).
  pub compression_level: u8,
  /// Compressed data is split into `IDAT` chunks of at most this many bytes.
  pub max_idat_len: usize,
}
#[cfg(feature = "miniz_oxide")]
impl Default for ZlibPngCodec {
  #[inline]
  #[must_use]
  fn default() -> Self {
    Self { compression_level: 6, max_idat_len: 8 * 1024 }
  }
}
#[cfg(feature = "miniz_oxide")]
impl PngImageCodec for ZlibPngCodec {
  fn decode(&self, png: &[u8]) -> Result<Raster, ApngError> {
    let mut ihdr: Option<IHDR> = None;
    let mut plte: &[RGB8] = &[];
    let mut trns: Option<tRNS<'_>> = None;
    let mut idat: Vec<u8> = Vec::new();
    for raw in RawPngChunkIter::new(png)? {
      let raw = raw?;
      raw.check_crc()?;
      match raw.chunk_ty {
        ChunkTy::IHDR => ihdr = Some(IHDR::try_from(raw.data)?),
        ChunkTy::PLTE => plte = PLTE::try_from(raw.data)?.entries(),
        ChunkTy::tRNS => trns = Some(tRNS::from(raw.data)),
        ChunkTy::IDAT => {
          idat.try_reserve(raw.data.len())?;
          idat.extend_from_slice(raw.data);
        }
        ChunkTy::IEND => break,
        _ => (),
      }
    }
    let ihdr = ihdr.ok_or(FormatError::MissingHeader)?;
    if ihdr.color_type == PngColorType::Index && plte.is_empty() {
      return Err(ValidationError::new(ChunkTy::PLTE, "entries", 0).into());
    }
    if let Some(trns) = trns {
      trns.validate_for(ihdr.color_type, plte.len())?;
    }

    let zlib_len = zlib_decompression_requirement(&ihdr);
    let mut zlib_buffer: Vec<u8> = Vec::new();
    zlib_buffer.try_reserve(zlib_len)?;
    zlib_buffer.resize(zlib_len, 0);
    let input = core::iter::once(idat.as_slice());
    match decompress_slice_iter_to_slice(&mut zlib_buffer, input, true, false) {
      Ok(decompression_count) => zlib_buffer.truncate(decompression_count),
      // output past what the image needs is ignored
      Err(TINFLStatus::HasMoreOutput) => (),
      Err(_) => return Err(FormatError::Zlib.into()),
    }

    let mut image = Raster::try_new_filled(ihdr.width, ihdr.height, RGBA8::default())?;
    let trns_y = trns.and_then(|t| t.to_grayscale());
    let trns_rgb = trns.and_then(|t| t.to_rgb());
    let trns_alphas: &[u8] = trns.map(|t| t.to_alphas()).unwrap_or(&[]);
    let sixteen = ihdr.bit_depth == 16;
    let sample = |data: &[u8], i: usize| -> u16 {
      if sixteen {
        u16::from_be_bytes([data[i * 2], data[i * 2 + 1]])
      } else {
        u16::from(data[i])
      }
    };
    // keeps the high byte of each sample
    let narrow = |data: &[u8], i: usize| -> u8 {
      if sixteen {
        data[i * 2]
      } else {
        data[i]
      }
    };
    unfilter_decompressed_data(&ihdr, &mut zlib_buffer, |x, y, data| {
      let Some(p) = image.get_mut(x, y) else { return };
      *p = match ihdr.color_type {
        PngColorType::RGB => {
          let full = [sample(data, 0), sample(data, 1), sample(data, 2)];
          let a = if trns_rgb == Some(full) { 0 } else { 255 };
          RGBA8::new(narrow(data, 0), narrow(data, 1), narrow(data, 2), a)
        }
        PngColorType::RGBA => {
          RGBA8::new(narrow(data, 0), narrow(data, 1), narrow(data, 2), narrow(data, 3))
        }
        PngColorType::YA => {
          let y = narrow(data, 0);
          RGBA8::new(y, y, y, narrow(data, 1))
        }
        PngColorType::Y => {
          let y = if sixteen { data[0] } else { u8_replicate_bits(ihdr.bit_depth as u32, data[0]) };
          let a = if trns_y == Some(sample(data, 0)) { 0 } else { 255 };
          RGBA8::new(y, y, y, a)
        }
        PngColorType::Index => {
          let i = data[0] as usize;
          let RGB8 { r, g, b } = plte.get(i).copied().unwrap_or_default();
          RGBA8::new(r, g, b, trns_alphas.get(i).copied().unwrap_or(255))
        }
      };
    })?;
    Ok(image)
  }

  fn encode(&self, raster: &Raster) -> Result<Vec<u8>, ApngError> {
    if !raster.is_well_formed() {
      let count = raster.pixels.len() as u32;
      return Err(ValidationError::new(ChunkTy::IHDR, "pixel_count", count).into());
    }
    let ihdr = IHDR::new(raster.width, raster.height, 8, PngColorType::RGBA as u8, 0, 0, 0)?;
    let line_len = 1 + raster.width as usize * 4;
    let mut filtered: Vec<u8> = Vec::new();
    filtered.try_reserve(line_len * raster.height as usize)?;
    for y in 0..raster.height {
      // filter type 0, the line is stored as-is.
      filtered.push(0);
      if let Some(row) = raster.row(y) {
        filtered.extend_from_slice(cast_slice::<RGBA8, u8>(row));
      }
    }
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&filtered, self.compression_level);

    let mut container = PngContainer::new();
    container.push(ihdr.to_chunk());
    for part in compressed.chunks(self.max_idat_len.max(1)) {
      container.push(IDAT { data: part }.to_chunk());
    }
    container.push(IEND.to_chunk());
    container.to_png_bytes()
  }
}
