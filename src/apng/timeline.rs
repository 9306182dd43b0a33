use super::*;

/// Works out which frame to show at a given time.
///
/// This has no clock of its own: the host program measures the elapsed time
/// however it likes and asks for the frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnimationTimeline {
  /// The time each frame starts, relative to the start of one play.
  starts_ms: Vec<u64>,
  total_ms: u64,
  num_plays: u32,
}
impl AnimationTimeline {
  /// Collects the frame timings of an animation.
  pub fn new(image: &AnimatedImage) -> Result<Self, ApngError> {
    let mut starts_ms = Vec::new();
    starts_ms.try_reserve(image.frames().len())?;
    let mut total_ms = 0_u64;
    for frame in image.frames() {
      starts_ms.push(total_ms);
      total_ms += u64::from(frame.delay_ms());
    }
    Ok(Self { starts_ms, total_ms, num_plays: image.num_plays() })
  }

  /// The length of one play of the animation.
  #[inline]
  #[must_use]
  pub const fn total_ms(&self) -> u64 {
    self.total_ms
  }

  /// The index of the frame showing `elapsed_ms` after the animation started.
  ///
  /// * Gives `None` if there's no frames, or once every play has finished (the
  ///   host should usually keep showing the last frame).
  /// * If all the delays are 0 this is always frame 0.
  #[must_use]
  pub fn frame_at(&self, elapsed_ms: u64) -> Option<usize> {
    if self.starts_ms.is_empty() {
      return None;
    }
    if self.total_ms == 0 {
      return Some(0);
    }
    if self.num_plays != 0 && elapsed_ms / self.total_ms >= u64::from(self.num_plays) {
      return None;
    }
    let t = elapsed_ms % self.total_ms;
    // the first start is always 0, so there's always a partition point.
    Some(self.starts_ms.partition_point(|&start| start <= t) - 1)
  }
}

#[test]
fn test_AnimationTimeline_frame_at() {
  let raster = Raster::try_new_transparent(1, 1).unwrap();
  let frames = alloc::vec![
    Frame::new(raster.clone(), 1, 10),
    Frame::new(raster.clone(), 0, 1),
    Frame::new(raster.clone(), 20, 100),
  ];
  let image = AnimatedImage::new(1, 1, 2, frames, None).unwrap();
  let timeline = AnimationTimeline::new(&image).unwrap();
  assert_eq!(timeline.total_ms(), 300);
  assert_eq!(timeline.frame_at(0), Some(0));
  assert_eq!(timeline.frame_at(99), Some(0));
  // a zero delay frame is skipped over
  assert_eq!(timeline.frame_at(100), Some(2));
  assert_eq!(timeline.frame_at(299), Some(2));
  assert_eq!(timeline.frame_at(300), Some(0));
  assert_eq!(timeline.frame_at(599), Some(2));
  assert_eq!(timeline.frame_at(600), None);

  let forever = AnimatedImage::new(1, 1, 0, alloc::vec![Frame::new(raster, 1, 2)], None).unwrap();
  let timeline = AnimationTimeline::new(&forever).unwrap();
  assert_eq!(timeline.frame_at(1_000_000_250), Some(0));

  let empty = AnimatedImage::new(1, 1, 0, Vec::new(), None).unwrap();
  assert_eq!(AnimationTimeline::new(&empty).unwrap().frame_at(0), None);
}
