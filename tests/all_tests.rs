#![allow(bad_style)]

mod png;

#[cfg(feature = "miniz_oxide")]
mod apng;

fn rand_bytes(count: usize) -> Vec<u8> {
  let mut buffer = vec![0; count];
  getrandom::getrandom(&mut buffer).unwrap();
  buffer
}

/// Lets `RUST_LOG=debug cargo test` show the crate's logging.
fn init_logging() {
  let _ = env_logger::builder().is_test(true).try_init();
}
