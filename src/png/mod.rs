//! Holds all the tools for working with PNG data at the chunk level.
//!
//! The general format of a PNG is that the information is stored in "chunks".
//! After an 8 byte signature, each chunk is:
//! * A big-endian `u32` length of the chunk's data.
//! * A four byte type code, such as `IHDR`.
//! * The data bytes.
//! * A big-endian `u32` CRC of the type code and data bytes.
//!
//! There's four "critical" chunk types that every PNG uses:
//! * **Header** ([`IHDR`]) - The image's dimensions, pixel format, and if the
//!   image is interlaced or not.
//! * **Palette** ([`PLTE`]) - If an image uses indexed color it will have a
//!   palette of what index values map to what `RGB8` values.
//! * **Image Data** ([`IDAT`]) - One or more chunks of compressed data. All of
//!   the compressed data forms a single zlib data stream.
//! * **End** ([`IEND`]) - The last chunk, lets you know you had the full PNG and
//!   your data wasn't truncated accidentally.
//!
//! An animated PNG adds three more chunk types, all ancillary, so that a
//! program which doesn't know about animation can still show the normal image:
//! * **Animation Control** ([`acTL`]) - How many frames there are, and how many
//!   times to loop.
//! * **Frame Control** ([`fcTL`]) - Placement, timing, and compositing rules for
//!   one frame.
//! * **Frame Data** ([`fdAT`]) - Compressed pixel data for a frame, same as an
//!   `IDAT` but with a sequence number in front.
//!
//! ## Reading And Writing
//! The [`PngContainer`] type holds an ordered list of owned [`Chunk`] values.
//! Reading one in with [`PngContainer::from_png_bytes`] checks the signature,
//! every CRC, and the contents of every chunk type this crate understands.
//! Unknown chunk types are kept exactly as they were.
//!
//! ```no_run
//! use apng_chunks::png::*;
//! # fn f() -> Result<(), apng_chunks::ApngError> {
//! let png: &[u8] = unimplemented!("data from somewhere");
//! let container = PngContainer::from_png_bytes(png)?;
//! for chunk in &container {
//!   println!("{:?}", chunk.parse()?);
//! }
//! let _same_bytes = container.to_png_bytes()?;
//! # Ok(())
//! # }
//! ```
//!
//! If you want to look at chunks without any allocation or checking, the
//! [`RawPngChunkIter`] walks the chunks of a byte slice directly.
//!
//! ## Pixels
//! Turning the compressed image data into pixels (and back) is the job of a
//! [`PngImageCodec`]. The crate provides [`ZlibPngCodec`] when the
//! `miniz_oxide` feature is on.

use core::fmt::{Debug, Display, Write};

use alloc::vec::Vec;

#[cfg(feature = "miniz_oxide")]
use bitfrob::u8_replicate_bits;
#[cfg(feature = "miniz_oxide")]
use miniz_oxide::inflate::{decompress_slice_iter_to_slice, TINFLStatus};
use bytemuck::{cast_slice, try_cast_slice};
use log::{debug, trace};

use crate::{ApngError, FormatError, Raster, Rect, ValidationError, RGB8};

#[cfg(feature = "miniz_oxide")]
use crate::RGBA8;

mod crc32;
pub use crc32::*;

mod chunk;
pub use chunk::*;

mod raw_chunk;
pub use raw_chunk::*;

mod png_chunk;
pub use png_chunk::*;

mod container;
pub use container::*;

mod ihdr;
pub use ihdr::*;

mod plte;
pub use plte::*;

mod idat;
pub use idat::*;

mod iend;
pub use iend::*;

mod trns;
pub use trns::*;

mod text;
pub use text::*;

mod actl;
pub use actl::*;

mod fctl;
pub use fctl::*;

mod fdat;
pub use fdat::*;

mod codec;
pub use codec::*;

#[cfg_attr(not(feature = "miniz_oxide"), allow(dead_code))]
mod unfilter;
#[cfg(feature = "miniz_oxide")]
use unfilter::*;
