use apng_chunks::png::{PngContainer, RawPngChunkIter, PNG_SIGNATURE};

#[test]
fn test_RawPngChunkIter_no_panics() {
  super::init_logging();
  // totally random data should never panic the iterator!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    if let Ok(it) = RawPngChunkIter::new(&v) {
      for _ in it {
        //
      }
    }
  }
  // random data after a correct signature gets further along
  for _ in 0..10 {
    let mut v = PNG_SIGNATURE.to_vec();
    v.extend(super::rand_bytes(1024));
    for _ in RawPngChunkIter::new(&v).unwrap() {
      //
    }
  }
}

#[test]
fn test_PngContainer_random_data_is_rejected() {
  super::init_logging();
  for _ in 0..10 {
    let mut v = PNG_SIGNATURE.to_vec();
    v.extend(super::rand_bytes(512));
    // a random chunk with a correct CRC is astronomically unlikely.
    assert!(PngContainer::from_png_bytes(&v).is_err());
  }
}
