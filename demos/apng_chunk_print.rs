use apng_chunks::png::{is_png_signature_correct, Chunk, RawPngChunkIter};

fn main() {
  let args: Vec<String> = std::env::args().collect();
  println!("ARGS: {args:?}");
  for file_arg in args[1..].iter() {
    let path = std::path::Path::new(file_arg);
    print!("Reading `{}`... ", path.display());
    let bytes = match std::fs::read(path) {
      Ok(bytes) => {
        println!("got {} bytes.", bytes.len());
        bytes
      }
      Err(e) => {
        println!("{e:?}");
        continue;
      }
    };
    if !is_png_signature_correct(&bytes) {
      println!("not a PNG, the signature is {:?}", &bytes[..bytes.len().min(8)]);
      continue;
    }
    let it = match RawPngChunkIter::new(&bytes) {
      Ok(it) => it,
      Err(e) => {
        println!("{e}");
        continue;
      }
    };
    for (n, raw_chunk) in it.enumerate() {
      let raw_chunk = match raw_chunk {
        Ok(raw_chunk) => raw_chunk,
        Err(e) => {
          println!("{n}: {e}");
          break;
        }
      };
      if let Err(e) = raw_chunk.check_crc() {
        println!("{n}: {e}");
      }
      let chunk = Chunk::from(raw_chunk);
      println!("{n}: {:?}", chunk.parse());
    }
  }
}
