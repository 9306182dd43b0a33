//! Reverses PNG scanline filtering and Adam7 interlacing.
//!
//! From the PNG spec:
//!
//! > Filters are applied to **bytes**, not to pixels, regardless of the bit
//! > depth or color type of the image.

use super::*;

/// Given the dimensions of the full PNG image, computes the size of each
/// reduced image.
///
/// The PNG interlacing scheme converts a full image to 7 reduced images, each
/// with potentially separate dimensions. Knowing the size of each reduced image
/// is important for the unfiltering process.
///
/// The output uses index 0 as the base image size, and indexes 1 through 7 for
/// the size of reduced images 1 through 7.
#[inline]
#[must_use]
pub(crate) const fn reduced_image_dimensions(full_width: u32, full_height: u32) -> [(u32, u32); 8] {
  let mut out = [(full_width, full_height); 8];
  let mut level = 1;
  while level < 8 {
    let (x_start, y_start, x_step, y_step) = ADAM7[level];
    out[level] = (
      (full_width + x_step - 1).saturating_sub(x_start) / x_step,
      (full_height + y_step - 1).saturating_sub(y_start) / y_step,
    );
    level += 1;
  }
  out
}

/// `(x_start, y_start, x_step, y_step)` of each reduced image.
///
/// ```text
/// 1 6 4 6 2 6 4 6
/// 7 7 7 7 7 7 7 7
/// 5 6 5 6 5 6 5 6
/// 7 7 7 7 7 7 7 7
/// 3 6 4 6 3 6 4 6
/// 7 7 7 7 7 7 7 7
/// 5 6 5 6 5 6 5 6
/// 7 7 7 7 7 7 7 7
/// ```
const ADAM7: [(u32, u32, u32, u32); 8] = [
  (0, 0, 1, 1), // full image
  (0, 0, 8, 8),
  (4, 0, 8, 8),
  (0, 4, 4, 8),
  (2, 0, 4, 4),
  (0, 2, 2, 4),
  (1, 0, 2, 2),
  (0, 1, 1, 2),
];

/// Converts a reduced image location into the full image location.
///
/// Level 0 is the full image, so the output is the input.
#[inline]
#[must_use]
const fn interlaced_pos_to_full_pos(
  image_level: usize, reduced_x: u32, reduced_y: u32,
) -> (u32, u32) {
  let (x_start, y_start, x_step, y_step) = ADAM7[image_level & 7];
  (reduced_x * x_step + x_start, reduced_y * y_step + y_start)
}

/// Bytes per scanline, including the filter byte.
#[inline]
#[must_use]
const fn bytes_per_filterline(header: &IHDR, width: u32) -> usize {
  // pixels less than 8 bits can leave a partial byte on the end of a line, so
  // we must round up.
  1 + (header.bits_per_pixel() * (width as usize) + 7) / 8
}

/// The zlib output size an image needs, summed over the reduced images when
/// interlaced.
#[must_use]
pub(crate) fn zlib_decompression_requirement(header: &IHDR) -> usize {
  let mut total = 0_usize;
  for (_, width, height) in image_levels(header) {
    if width == 0 || height == 0 {
      continue;
    }
    let level_bytes = bytes_per_filterline(header, width).saturating_mul(height as usize);
    total = total.saturating_add(level_bytes);
  }
  total
}

fn image_levels(header: &IHDR) -> impl Iterator<Item = (usize, u32, u32)> {
  // When interlaced we process reduced images 1 through 7, otherwise just the
  // full image at level 0.
  let (skip, take) = if header.is_interlaced { (1, 7) } else { (0, 1) };
  reduced_image_dimensions(header.width, header.height)
    .into_iter()
    .enumerate()
    .map(|(i, (w, h))| (i, w, h))
    .skip(skip)
    .take(take)
}

const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // The order of these tests is fixed by the PNG spec.
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Unfilters one line in place. `prev` is empty for the first line of an
/// image.
fn unfilter_line(
  filter: u8, line: &mut [u8], prev: &[u8], filter_chunk_size: usize,
) -> Result<(), FormatError> {
  let up = |i: usize| prev.get(i).copied().unwrap_or(0);
  match filter {
    0 => (),
    1 => {
      for i in filter_chunk_size..line.len() {
        line[i] = line[i].wrapping_add(line[i - filter_chunk_size]);
      }
    }
    2 => {
      for (i, x) in line.iter_mut().enumerate() {
        *x = x.wrapping_add(up(i));
      }
    }
    3 => {
      for i in 0..line.len() {
        let a = if i >= filter_chunk_size { line[i - filter_chunk_size] } else { 0 };
        let avg = ((a as u32 + up(i) as u32) / 2) as u8;
        line[i] = line[i].wrapping_add(avg);
      }
    }
    4 => {
      for i in 0..line.len() {
        let (a, c) = if i >= filter_chunk_size {
          (line[i - filter_chunk_size], up(i - filter_chunk_size))
        } else {
          (0, 0)
        };
        line[i] = line[i].wrapping_add(paeth_predict(a, up(i), c));
      }
    }
    other => return Err(FormatError::IllegalFilterType(other)),
  }
  Ok(())
}

/// Unfilters the decompressed data in place, calling `op(x, y, data)` once
/// for each pixel of the full image.
///
/// * Bit depths 1, 2, and 4 give the value in the low bits of a single byte.
/// * Bit depth 8 gives one byte per channel.
/// * Bit depth 16 gives two big-endian bytes per channel.
///
/// ## Failure
/// * The buffer is shorter than [`zlib_decompression_requirement`]. Any extra
///   bytes past that are ignored, though the codec never inflates more.
/// * A line has an illegal filter type.
pub(crate) fn unfilter_decompressed_data<F>(
  header: &IHDR, mut decompressed: &mut [u8], mut op: F,
) -> Result<(), FormatError>
where
  F: FnMut(u32, u32, &[u8]),
{
  let bits_per_pixel = header.bits_per_pixel();
  // filtering is per byte within a pixel when pixels are more than 1 byte
  // each, and per byte when pixels are 1 byte or less.
  let filter_chunk_size = (bits_per_pixel / 8).max(1);

  for (image_level, reduced_width, reduced_height) in image_levels(header) {
    if reduced_width == 0 || reduced_height == 0 {
      // the full image can't be 0 sized, but a reduced image might be.
      continue;
    }
    let line_len = bytes_per_filterline(header, reduced_width);
    let image_len = line_len.saturating_mul(reduced_height as usize);
    if decompressed.len() < image_len {
      return Err(FormatError::ImageDataSize);
    }
    let (these_bytes, more_bytes) = core::mem::take(&mut decompressed).split_at_mut(image_len);
    decompressed = more_bytes;

    let mut prev: &[u8] = &[];
    for (reduced_y, filterline) in these_bytes.chunks_exact_mut(line_len).enumerate() {
      let (f, line) = filterline.split_at_mut(1);
      unfilter_line(f[0], line, prev, filter_chunk_size)?;
      f[0] = 0;
      send_out_line(header, image_level, reduced_width, reduced_y as u32, line, &mut op);
      prev = line;
    }
  }
  Ok(())
}

fn send_out_line<F: FnMut(u32, u32, &[u8])>(
  header: &IHDR, image_level: usize, reduced_width: u32, reduced_y: u32, line: &[u8], op: &mut F,
) {
  match header.bit_depth {
    1 | 2 | 4 => {
      let depth = header.bit_depth as u32;
      let per_byte = 8 / depth;
      let mask = (1_u8 << depth) - 1;
      for reduced_x in 0..reduced_width {
        let byte = line[(reduced_x / per_byte) as usize];
        let shift = 8 - depth * (reduced_x % per_byte + 1);
        let (x, y) = interlaced_pos_to_full_pos(image_level, reduced_x, reduced_y);
        op(x, y, &[(byte >> shift) & mask]);
      }
    }
    _ => {
      let bytes_per_pixel = header.bits_per_pixel() / 8;
      for (reduced_x, pixel) in line.chunks_exact(bytes_per_pixel).enumerate() {
        let (x, y) = interlaced_pos_to_full_pos(image_level, reduced_x as u32, reduced_y);
        op(x, y, pixel);
      }
    }
  }
}

#[test]
fn test_reduced_image_dimensions() {
  assert_eq!(reduced_image_dimensions(0, 0), [(0, 0); 8]);
  // one
  for (w, ex) in (1..=8).zip([1, 1, 1, 1, 1, 1, 1, 1]) {
    assert_eq!(reduced_image_dimensions(w, 0)[1].0, ex, "failed w:{w}");
  }
  // two
  for (w, ex) in (1..=8).zip([0, 0, 0, 0, 1, 1, 1, 1]) {
    assert_eq!(reduced_image_dimensions(w, 0)[2].0, ex, "failed w:{w}");
  }
  // three
  for (h, ex) in (1..=8).zip([0, 0, 0, 0, 1, 1, 1, 1]) {
    assert_eq!(reduced_image_dimensions(0, h)[3].1, ex, "failed h: {h}");
  }
  // six
  for (w, ex) in (1..=8).zip([0, 1, 1, 2, 2, 3, 3, 4]) {
    assert_eq!(reduced_image_dimensions(w, 0)[6].0, ex, "failed w: {w}");
  }
  // seven
  for (h, ex) in (1..=8).zip([0, 1, 1, 2, 2, 3, 3, 4]) {
    assert_eq!(reduced_image_dimensions(0, h)[7].1, ex, "failed h: {h}");
  }
  //
  assert_eq!(
    reduced_image_dimensions(8, 8),
    [
      (8, 8), // zeroth
      (1, 1), // one
      (1, 1), // two
      (2, 1), // three
      (2, 2), // four
      (4, 2), // five
      (4, 4), // six
      (8, 4), // seven
    ]
  );
}

#[test]
fn test_unfilter_sub_and_up() {
  let header = IHDR::new(2, 2, 8, 0, 0, 0, 0).unwrap();
  // line 0: Sub filter, line 1: Up filter
  let mut data = [1, 10, 5, 2, 1, 1];
  let mut out = [[0_u8; 2]; 2];
  unfilter_decompressed_data(&header, &mut data, |x, y, d| out[y as usize][x as usize] = d[0])
    .unwrap();
  assert_eq!(out, [[10, 15], [11, 16]]);
}
