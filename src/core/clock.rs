use std::time::Instant;

/// High-resolution host clock.
///
/// Supplies the raw millisecond reading that the frame loop rescales into scene time;
/// animation code never reads it directly.
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    last_tick: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
        }
    }

    /// Milliseconds since the clock was created
    pub fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_measures_delta() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();

        assert!(delta >= 0.009);
    }

    #[test]
    fn clock_reading_is_monotonic() {
        let clock = Clock::new();
        let first = clock.now_ms();
        thread::sleep(Duration::from_millis(2));
        let second = clock.now_ms();

        assert!(second >= first + 1.0);
    }
}
