//! Decodes an APNG, prints the frame timings, and writes it back out.
//!
//! `cargo run --example apng_reencode -- in.png out.png`

use apng_chunks::apng::{decode_apng, encode_apng, AnimationTimeline};

fn main() {
  env_logger::init();
  let args: Vec<String> = std::env::args().collect();
  let [_, input, output] = args.as_slice() else {
    println!("usage: apng_reencode IN OUT");
    return;
  };
  let bytes = match std::fs::read(input) {
    Ok(bytes) => bytes,
    Err(e) => {
      println!("{input}: {e}");
      return;
    }
  };
  let image = match decode_apng(&bytes) {
    Ok(image) => image,
    Err(e) => {
      println!("{input}: {e}");
      return;
    }
  };
  println!(
    "{}x{}, {} frames, plays: {}, backup image: {}",
    image.width(),
    image.height(),
    image.frames().len(),
    image.num_plays(),
    image.backup().is_some()
  );
  for (n, frame) in image.frames().iter().enumerate() {
    println!("{n}: {}/{}s ({}ms)", frame.delay_num, frame.delay_den, frame.delay_ms());
  }
  if let Ok(timeline) = AnimationTimeline::new(&image) {
    println!("one play takes {}ms", timeline.total_ms());
  }
  match encode_apng(&image) {
    Ok(out) => match std::fs::write(output, &out) {
      Ok(()) => println!("wrote {} bytes to {output}", out.len()),
      Err(e) => println!("{output}: {e}"),
    },
    Err(e) => println!("encoding failed: {e}"),
  }
}
