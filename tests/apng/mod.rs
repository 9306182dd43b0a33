use apng_chunks::{
  apng::*,
  png::{
    acTL, fcTL, fdAT, tEXt, BlendOp, Chunk, ChunkTy, DisposeOp, PngChunk, PngContainer,
    PngImageCodec, ZlibPngCodec, IEND,
  },
  ApngError, FormatError, Raster, Rect, SequenceError, ValidationError, RGBA8,
};

const RED: RGBA8 = RGBA8::opaque(255, 0, 0);
const GREEN: RGBA8 = RGBA8::opaque(0, 255, 0);
const BLUE: RGBA8 = RGBA8::opaque(0, 0, 255);

fn solid(width: u32, height: u32, color: RGBA8) -> Raster {
  Raster::try_new_filled(width, height, color).unwrap()
}

/// The `IHDR` and `IDAT` chunks of a raster encoded on its own.
fn encoded_parts(raster: &Raster) -> (Chunk, Vec<Chunk>) {
  let png = ZlibPngCodec::default().encode(raster).unwrap();
  let container = PngContainer::from_png_bytes(&png).unwrap();
  let ihdr = container.get(0).unwrap().clone();
  assert_eq!(ihdr.ty(), ChunkTy::IHDR);
  let idats = container.iter().filter(|c| c.ty() == ChunkTy::IDAT).cloned().collect();
  (ihdr, idats)
}

fn fdats(raster: &Raster, first_sequence_number: u32) -> Vec<Chunk> {
  let (_, idats) = encoded_parts(raster);
  idats
    .iter()
    .zip(first_sequence_number..)
    .map(|(idat, sequence_number)| fdAT { sequence_number, data: idat.data() }.to_chunk())
    .collect()
}

#[allow(clippy::too_many_arguments)]
fn fctl(
  sequence_number: u32, width: u32, height: u32, x_offset: u32, y_offset: u32,
  delay: (u16, u16), dispose_op: DisposeOp, blend_op: BlendOp,
) -> Chunk {
  fcTL {
    sequence_number,
    width,
    height,
    x_offset,
    y_offset,
    delay_num: delay.0,
    delay_den: delay.1,
    dispose_op,
    blend_op,
  }
  .to_chunk()
}

fn to_bytes(chunks: Vec<Chunk>) -> Vec<u8> {
  PngContainer::from(chunks).to_png_bytes().unwrap()
}

/// A 10x10 animation: a red background frame as the default image, then a
/// blue 4x4 square at (3,3).
fn red_then_blue(first_dispose: DisposeOp) -> Vec<Chunk> {
  let red = solid(10, 10, RED);
  let (ihdr, red_idats) = encoded_parts(&red);
  let mut chunks = vec![ihdr, acTL::new(2, 0).unwrap().to_chunk()];
  chunks.push(fctl(0, 10, 10, 0, 0, (1, 10), first_dispose, BlendOp::Source));
  chunks.extend(red_idats);
  chunks.push(fctl(1, 4, 4, 3, 3, (1, 2), DisposeOp::None, BlendOp::Over));
  chunks.extend(fdats(&solid(4, 4, BLUE), 2));
  chunks.push(IEND.to_chunk());
  chunks
}

fn blue_square_on_clear() -> Raster {
  let mut expected = Raster::try_new_transparent(10, 10).unwrap();
  for y in 3..7 {
    for x in 3..7 {
      *expected.get_mut(x, y).unwrap() = BLUE;
    }
  }
  expected
}

#[test]
fn test_decode_end_to_end_scenario() {
  super::init_logging();
  let bytes = to_bytes(red_then_blue(DisposeOp::Background));
  let image = decode_apng(&bytes).unwrap();
  assert_eq!((image.width(), image.height()), (10, 10));
  assert_eq!(image.num_plays(), 0);
  let frames = image.frames();
  assert_eq!(frames.len(), 2);
  assert_eq!(frames[0].raster, solid(10, 10, RED));
  assert_eq!(frames[0].delay_ms(), 100);
  // the red frame was cleared away before the blue one was drawn
  assert_eq!(frames[1].raster, blue_square_on_clear());
  assert_eq!(frames[1].delay_ms(), 500);
  // the default image was the first frame
  assert_eq!(image.backup(), Some(&solid(10, 10, RED)));
}

#[test]
fn test_decode_first_frame_previous_is_background() {
  super::init_logging();
  let bytes = to_bytes(red_then_blue(DisposeOp::Previous));
  let image = decode_apng(&bytes).unwrap();
  assert_eq!(image.frames()[1].raster, blue_square_on_clear());
}

#[test]
fn test_decode_dispose_previous_restores() {
  super::init_logging();
  let red = solid(10, 10, RED);
  let (ihdr, red_idats) = encoded_parts(&red);
  let mut chunks = vec![ihdr, acTL::new(3, 1).unwrap().to_chunk()];
  chunks.push(fctl(0, 10, 10, 0, 0, (1, 10), DisposeOp::None, BlendOp::Source));
  chunks.extend(red_idats);
  chunks.push(fctl(1, 4, 4, 3, 3, (1, 10), DisposeOp::Previous, BlendOp::Over));
  chunks.extend(fdats(&solid(4, 4, BLUE), 2));
  let next = 2 + chunks.iter().filter(|c| c.ty() == ChunkTy::fdAT).count() as u32;
  chunks.push(fctl(next, 1, 1, 0, 0, (1, 10), DisposeOp::None, BlendOp::Over));
  chunks.extend(fdats(&solid(1, 1, GREEN), next + 1));
  chunks.push(IEND.to_chunk());

  let image = decode_apng(&to_bytes(chunks)).unwrap();
  assert_eq!(image.num_plays(), 1);
  let frames = image.frames();
  assert_eq!(frames.len(), 3);
  assert_eq!(frames[1].raster.get(5, 5), Some(&BLUE));
  // the blue square is gone again, and green is drawn over the red
  let mut expected = red;
  *expected.get_mut(0, 0).unwrap() = GREEN;
  assert_eq!(frames[2].raster, expected);
}

#[test]
fn test_decode_fcTL_without_data_is_replaced() {
  super::init_logging();
  let (ihdr, _) = encoded_parts(&solid(10, 10, RED));
  let mut chunks = vec![ihdr, acTL::new(1, 0).unwrap().to_chunk()];
  chunks.push(fctl(0, 10, 10, 0, 0, (1, 10), DisposeOp::None, BlendOp::Source));
  chunks.push(fctl(1, 4, 4, 3, 3, (1, 2), DisposeOp::None, BlendOp::Over));
  chunks.extend(fdats(&solid(4, 4, BLUE), 2));
  chunks.push(IEND.to_chunk());

  let image = decode_apng(&to_bytes(chunks)).unwrap();
  assert_eq!(image.frames().len(), 1);
  assert_eq!(image.frames()[0].raster, blue_square_on_clear());
  assert_eq!(image.frames()[0].delay_ms(), 500);
  // there's no IDAT at all
  assert_eq!(image.backup(), None);
}

#[test]
fn test_decode_chunk_between_fcTL_and_fdAT() {
  super::init_logging();
  let mut chunks = red_then_blue(DisposeOp::Background);
  let i = chunks.iter().position(|c| c.ty() == ChunkTy::fdAT).unwrap();
  chunks.insert(i, tEXt::new(b"Comment", b"between").unwrap().to_chunk());

  let image = decode_apng(&to_bytes(chunks)).unwrap();
  let frames = image.frames();
  assert_eq!(frames.len(), 2);
  assert_eq!(frames[0].raster, solid(10, 10, RED));
  assert_eq!(frames[1].raster, blue_square_on_clear());
}

#[test]
fn test_decode_trailing_fcTL_is_dropped() {
  super::init_logging();
  let mut chunks = red_then_blue(DisposeOp::Background);
  let next = 2 + chunks.iter().filter(|c| c.ty() == ChunkTy::fdAT).count() as u32;
  let iend = chunks.pop().unwrap();
  chunks.push(fctl(next, 2, 2, 0, 0, (1, 10), DisposeOp::None, BlendOp::Source));
  chunks.push(iend);

  let image = decode_apng(&to_bytes(chunks)).unwrap();
  assert_eq!(image.frames().len(), 2);
  assert_eq!(image.frames()[1].raster, blue_square_on_clear());
}

#[test]
fn test_decode_hidden_default_image_first_frame_previous() {
  super::init_logging();
  let (ihdr, red_idats) = encoded_parts(&solid(10, 10, RED));
  let mut chunks = vec![ihdr, acTL::new(2, 0).unwrap().to_chunk()];
  chunks.extend(red_idats);
  chunks.push(fctl(0, 4, 4, 3, 3, (1, 10), DisposeOp::Previous, BlendOp::Source));
  chunks.extend(fdats(&solid(4, 4, BLUE), 1));
  let next = 1 + chunks.iter().filter(|c| c.ty() == ChunkTy::fdAT).count() as u32;
  chunks.push(fctl(next, 1, 1, 0, 0, (1, 10), DisposeOp::None, BlendOp::Over));
  chunks.extend(fdats(&solid(1, 1, GREEN), next + 1));
  chunks.push(IEND.to_chunk());

  let image = decode_apng(&to_bytes(chunks)).unwrap();
  assert_eq!(image.backup(), Some(&solid(10, 10, RED)));
  let frames = image.frames();
  assert_eq!(frames.len(), 2);
  assert_eq!(frames[0].raster, blue_square_on_clear());
  // the blue square was cleared to transparent, not restored to red
  let mut expected = Raster::try_new_transparent(10, 10).unwrap();
  *expected.get_mut(0, 0).unwrap() = GREEN;
  assert_eq!(frames[1].raster, expected);
}

#[test]
fn test_decode_multiple_fdAT_per_frame() {
  super::init_logging();
  let codec = ZlibPngCodec { compression_level: 1, max_idat_len: 5 };
  let red = solid(6, 6, RED);
  let mut pattern = solid(6, 6, GREEN);
  for (i, p) in pattern.pixels.iter_mut().enumerate() {
    p.b = i as u8;
  }
  let image =
    AnimatedImage::new(6, 6, 0, vec![Frame::new(red, 1, 1), Frame::new(pattern, 1, 1)], None)
      .unwrap();
  let bytes = ApngEncoder::new(codec).encode(&image).unwrap();
  let container = PngContainer::from_png_bytes(&bytes).unwrap();
  assert!(container.iter().filter(|c| c.ty() == ChunkTy::fdAT).count() > 1);
  let again = ApngDecoder::new(codec).decode(&bytes).unwrap();
  assert_eq!(again.frames(), image.frames());
}

#[test]
fn test_round_trip() {
  super::init_logging();
  let mut gradient = Raster::try_new_transparent(7, 5).unwrap();
  for (i, p) in gradient.pixels.iter_mut().enumerate() {
    *p = RGBA8::new(i as u8 * 7, 255 - i as u8, 3, (i as u8).wrapping_mul(40));
  }
  let frames = vec![
    Frame::new(solid(7, 5, RED), 1, 10),
    Frame::new(gradient, 3, 0),
    Frame::new(solid(7, 5, RGBA8::TRANSPARENT), 0, 1),
    Frame::new(solid(7, 5, BLUE), 65535, 1),
  ];
  let image = AnimatedImage::new(7, 5, 4, frames, None).unwrap();
  let bytes = encode_apng(&image).unwrap();
  let again = decode_apng(&bytes).unwrap();
  assert_eq!((again.width(), again.height()), (7, 5));
  assert_eq!(again.num_plays(), 4);
  assert_eq!(again.frames(), image.frames());
  assert_eq!(again.backup(), Some(&image.frames()[0].raster));

  // decoding then encoding again is stable
  assert_eq!(encode_apng(&again).unwrap(), bytes);

  let (frames, backup) = again.into_parts();
  assert_eq!(frames.len(), 4);
  assert_eq!(backup.map(|b| b.bounds()), Some(Rect { x: 0, y: 0, width: 7, height: 5 }));
}

#[test]
fn test_round_trip_separate_backup() {
  super::init_logging();
  let frames = vec![Frame::new(solid(3, 3, RED), 1, 4), Frame::new(solid(3, 3, BLUE), 1, 4)];
  let image = AnimatedImage::new(3, 3, 0, frames, Some(solid(3, 3, GREEN))).unwrap();
  let bytes = encode_apng(&image).unwrap();

  // the default image isn't part of the animation, so no fcTL before IDAT
  let container = PngContainer::from_png_bytes(&bytes).unwrap();
  let first_fctl = container.position(ChunkTy::fcTL).unwrap();
  assert!(first_fctl > container.rposition(ChunkTy::IDAT).unwrap());

  let again = decode_apng(&bytes).unwrap();
  assert_eq!(again, image);
}

#[test]
fn test_encode_sequence_contiguity() {
  super::init_logging();
  let codec = ZlibPngCodec { compression_level: 0, max_idat_len: 16 };
  let frames = (0..4_u8).map(|i| Frame::new(solid(5, 4, RGBA8::new(i, 2 * i, 3, 255)), 1, 1));
  let image = AnimatedImage::new(5, 4, 0, frames.collect(), None).unwrap();
  let bytes = ApngEncoder::new(codec).encode(&image).unwrap();
  let container = PngContainer::from_png_bytes(&bytes).unwrap();

  let mut sequence_numbers = Vec::new();
  for chunk in &container {
    match chunk.parse().unwrap() {
      PngChunk::fcTL(fctl) => sequence_numbers.push(fctl.sequence_number),
      PngChunk::fdAT(fdat) => sequence_numbers.push(fdat.sequence_number),
      _ => (),
    }
  }
  assert!(sequence_numbers.len() > 4 + 3);
  let expected: Vec<u32> = (0..sequence_numbers.len() as u32).collect();
  assert_eq!(sequence_numbers, expected);

  // acTL right after IHDR, and fcTL 0 right before the default image
  assert_eq!(container.position(ChunkTy::acTL), Some(1));
  let first_idat = container.position(ChunkTy::IDAT).unwrap();
  assert_eq!(container.get(first_idat - 1).unwrap().ty(), ChunkTy::fcTL);
  match container.get(1).unwrap().parse().unwrap() {
    PngChunk::acTL(actl) => assert_eq!(actl.num_frames, 4),
    other => panic!("{other:?}"),
  }
}

#[test]
fn test_encode_without_frames() {
  super::init_logging();
  let plain = AnimatedImage::new(2, 2, 0, Vec::new(), Some(solid(2, 2, GREEN))).unwrap();
  let bytes = encode_apng(&plain).unwrap();
  let container = PngContainer::from_png_bytes(&bytes).unwrap();
  assert_eq!(container.position(ChunkTy::acTL), None);
  let again = decode_apng(&bytes).unwrap();
  assert!(again.frames().is_empty());
  assert_eq!(again.backup(), Some(&solid(2, 2, GREEN)));

  let nothing = AnimatedImage::new(2, 2, 0, Vec::new(), None).unwrap();
  assert_eq!(
    encode_apng(&nothing),
    Err(ApngError::Validation(ValidationError::new(ChunkTy::acTL, "num_frames", 0)))
  );
}

#[test]
fn test_decode_bit_flip_is_format_error() {
  super::init_logging();
  let bytes = to_bytes(red_then_blue(DisposeOp::None));
  // skip the signature, then damage each chunk in turn
  let container = PngContainer::from_png_bytes(&bytes).unwrap();
  let mut offset = 8;
  for chunk in &container {
    let mut damaged = bytes.clone();
    let i = if chunk.data().is_empty() {
      // the type code
      offset + 4
    } else {
      offset + 8 + chunk.data().len() / 2
    };
    damaged[i] ^= 0x10;
    assert!(
      matches!(decode_apng(&damaged), Err(ApngError::Format(FormatError::CrcMismatch { .. }))),
      "{:?}",
      chunk
    );
    offset += 12 + chunk.data().len();
  }
}

#[test]
fn test_decode_fdAT_without_fcTL() {
  super::init_logging();
  let red = solid(4, 4, RED);
  let (ihdr, red_idats) = encoded_parts(&red);
  let mut chunks = vec![ihdr, acTL::new(1, 0).unwrap().to_chunk()];
  chunks.extend(red_idats);
  chunks.extend(fdats(&red, 0));
  chunks.push(IEND.to_chunk());
  assert_eq!(
    decode_apng(&to_bytes(chunks)),
    Err(ApngError::Sequence(SequenceError::MissingFrameControl { sequence_number: 0 }))
  );
}

#[test]
fn test_decode_sequence_out_of_order() {
  super::init_logging();
  let mut chunks = red_then_blue(DisposeOp::None);
  let i = chunks.iter().position(|c| c.ty() == ChunkTy::fdAT).unwrap();
  let data = chunks[i].data()[4..].to_vec();
  chunks[i] = fdAT { sequence_number: 7, data: &data }.to_chunk();
  assert_eq!(
    decode_apng(&to_bytes(chunks)),
    Err(ApngError::Sequence(SequenceError::OutOfOrder { expected: 2, found: 7 }))
  );
}

#[test]
fn test_decode_frame_outside_canvas() {
  super::init_logging();
  let mut chunks = red_then_blue(DisposeOp::None);
  let i = chunks.iter().rposition(|c| c.ty() == ChunkTy::fcTL).unwrap();
  chunks[i] = fctl(1, 4, 4, 7, 3, (1, 2), DisposeOp::None, BlendOp::Over);
  assert_eq!(
    decode_apng(&to_bytes(chunks)),
    Err(ApngError::Validation(ValidationError::new(ChunkTy::fcTL, "x_offset", 7)))
  );
}

#[test]
fn test_decode_accepts_wrong_frame_count() {
  super::init_logging();
  let mut chunks = red_then_blue(DisposeOp::None);
  chunks[1] = acTL::new(5, 0).unwrap().to_chunk();
  let image = decode_apng(&to_bytes(chunks)).unwrap();
  assert_eq!(image.frames().len(), 2);
}

#[test]
fn test_decode_plain_png() {
  super::init_logging();
  let png = ZlibPngCodec::default().encode(&solid(3, 2, BLUE)).unwrap();
  let image = decode_apng(&png).unwrap();
  assert!(image.frames().is_empty());
  assert_eq!(image.backup(), Some(&solid(3, 2, BLUE)));
}

#[test]
fn test_decode_limits() {
  super::init_logging();
  let bytes = to_bytes(red_then_blue(DisposeOp::None));
  let small = DecodeLimits { max_width: 9, max_height: 100 };
  let decoder = ApngDecoder::new(ZlibPngCodec::default()).with_limits(small);
  assert_eq!(decoder.decode(&bytes), Err(ApngError::DimensionsTooLarge));
  let decoder = decoder.with_limits(DecodeLimits::none());
  assert_eq!(decoder.decode(&bytes).unwrap().frames().len(), 2);
}
