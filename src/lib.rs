#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]

//! A crate for decoding and re-encoding Animated PNG (APNG) data.
//!
//! An APNG is an ordinary PNG with a few extra chunks that describe an
//! animation. Programs that don't know about APNG just show the "default image"
//! (the normal `IDAT` data), while APNG aware programs show the frames.
//!
//! The crate is layered:
//! * [`png`] has the chunk level tools: the CRC, reading and writing the chunk
//!   stream, the structured chunk types, and the single-image codec seam.
//! * [`apng`] has the animation level tools: compositing frames onto the
//!   canvas, decoding a whole animation, and encoding one.
//!
//! ```no_run
//! # fn main() -> Result<(), apng_chunks::ApngError> {
//! let bytes: &[u8] = unimplemented!("data from somewhere");
//! let animation = apng_chunks::apng::decode_apng(bytes)?;
//! for frame in animation.frames() {
//!   println!("{}x{} for {}ms", frame.raster.width, frame.raster.height, frame.delay_ms());
//! }
//! let _again: Vec<u8> = apng_chunks::apng::encode_apng(&animation)?;
//! # Ok(())
//! # }
//! ```

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

pub mod pixel;
pub use pixel::*;

pub mod raster;
pub use raster::*;

pub mod png;

pub mod apng;
