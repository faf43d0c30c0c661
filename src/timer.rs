use std::time::Instant;

pub struct Timer(Instant);

impl Default for Timer {
  fn default() -> Self {
    Timer::new()
  }
}

impl Timer {
  pub fn new() -> Self {
    Self(Instant::now())
  }
  pub fn elapsed(&self) -> f64 {
    self.0.elapsed().as_secs_f64()
  }
}
