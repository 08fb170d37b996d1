use std::time::Duration;

/// Frames per second, averaged over the last full second.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: Duration,
    fps: u32,
}

impl FpsCounter {
    pub fn tick(&mut self, dt: Duration) {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed >= Duration::from_secs(1) {
            self.fps = (self.frames as f64 / self.elapsed.as_secs_f64()).round() as u32;
            self.frames = 0;
            self.elapsed = Duration::ZERO;
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
