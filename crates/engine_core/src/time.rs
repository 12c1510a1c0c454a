//! Time management for the game loop.

use std::time::{Duration, Instant};

/// Upper bound on a single simulation step. Slow frames are integrated as if
/// they took this long, which bounds the integration error after a hitch.
pub const DEFAULT_MAX_DELTA: f32 = 0.033;

/// Manages frame timing and delta time calculation.
#[derive(Debug)]
pub struct Time {
    /// Time when the engine started.
    start_time: Instant,
    /// Time of the last frame.
    last_frame: Instant,
    /// Duration of the last frame (unclamped).
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
    /// Clamp applied to `delta_seconds`.
    max_delta: f32,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a time manager whose clock starts at `now`.
    pub fn starting_at(now: Instant) -> Self {
        Self {
            start_time: now,
            last_frame: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            max_delta: DEFAULT_MAX_DELTA,
        }
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self) {
        self.update_to(Instant::now());
    }

    /// Advance the clock to `now`. A `now` earlier than the last frame yields a zero delta.
    pub fn update_to(&mut self, now: Instant) {
        self.delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now.max(self.last_frame);
        self.elapsed = self.last_frame - self.start_time;
        self.frame_count += 1;
    }

    /// Get the delta time in seconds, clamped to the max delta.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32().min(self.max_delta)
    }

    /// Get the unclamped delta time as a Duration.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get total elapsed time as Duration.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Set the clamp applied to `delta_seconds`.
    pub fn set_max_delta(&mut self, seconds: f32) {
        self.max_delta = seconds.max(0.0);
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slow_frame_is_clamped() {
        let start = Instant::now();
        let mut time = Time::starting_at(start);
        time.update_to(start + Duration::from_millis(500));
        assert!((time.delta_seconds() - DEFAULT_MAX_DELTA).abs() < 1e-6);
        assert!((time.elapsed_seconds() - 0.5).abs() < 1e-4);
        assert_eq!(time.frame_count(), 1);
    }

    #[test]
    fn normal_frame_passes_through() {
        let start = Instant::now();
        let mut time = Time::starting_at(start);
        time.update_to(start + Duration::from_millis(16));
        assert!((time.delta_seconds() - 0.016).abs() < 1e-4);
    }

    #[test]
    fn max_delta_is_adjustable() {
        let start = Instant::now();
        let mut time = Time::starting_at(start);
        time.set_max_delta(0.1);
        time.update_to(start + Duration::from_millis(50));
        assert!((time.delta_seconds() - 0.05).abs() < 1e-4);
        time.set_max_delta(-1.0);
        assert_eq!(time.delta_seconds(), 0.0);
    }

    #[test]
    fn clock_going_backwards_gives_zero_delta() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut time = Time::starting_at(start);
        time.update_to(start - Duration::from_millis(10));
        assert_eq!(time.delta_seconds(), 0.0);
    }
}
