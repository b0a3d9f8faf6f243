/// Converts the platform clock (milliseconds) into scene time (seconds)
pub const CLOCK_TO_SECONDS: f64 = 0.001;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Shared drive signal for every animation.
///
/// Re-derived each frame from the host clock and never moves backwards, even if the
/// clock value does.
#[derive(Debug, Clone, Default)]
pub struct TimeBase {
    seconds: Option<f64>,
    frames: u64,
}

impl TimeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Moves time forward to `clock_ms` and returns the new frame
    pub fn advance(&mut self, clock_ms: f64) -> FrameInfo {
        let candidate = clock_ms * CLOCK_TO_SECONDS;
        let next = match self.seconds {
            Some(previous) if !candidate.is_finite() || candidate < previous => previous,
            Some(_) => candidate,
            None if candidate.is_finite() => candidate.max(0.0),
            None => 0.0,
        };
        let delta = self.seconds.map_or(0.0, |previous| next - previous);

        let info = FrameInfo::new(self.frames, next as f32, delta as f32);
        self.seconds = Some(next);
        self.frames += 1;
        info
    }
}
