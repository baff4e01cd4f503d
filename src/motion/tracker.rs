//! Pointer velocity estimation
//!
//! Keeps a short window of timestamped positions and fits a line through
//! them. The slope is the velocity in units per second.

use std::collections::VecDeque;

use glam::Vec2;

/// Maximum number of samples retained
const MAX_SAMPLES: usize = 20;
/// Samples older than this (relative to the newest) are ignored
const HORIZON_MS: f64 = 100.0;

#[derive(Debug, Clone, Copy)]
struct Sample {
    pos: Vec2,
    time_ms: f64,
}

/// Least-squares pointer velocity tracker
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(MAX_SAMPLES),
        }
    }

    /// Forget all samples (new gesture)
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Record a pointer position at `time_ms`
    pub fn add_sample(&mut self, pos: Vec2, time_ms: f64) {
        // Timestamps going backwards means a different event source
        if self.samples.back().is_some_and(|last| time_ms < last.time_ms) {
            self.samples.clear();
        }

        self.samples.push_back(Sample { pos, time_ms });
        while self.samples.len() > MAX_SAMPLES {
            self.samples.pop_front();
        }
        while self
            .samples
            .front()
            .is_some_and(|s| s.time_ms < time_ms - HORIZON_MS)
        {
            self.samples.pop_front();
        }
    }

    /// Current velocity estimate in units per second
    pub fn velocity(&self) -> Vec2 {
        let n = self.samples.len();
        if n < 2 {
            return Vec2::ZERO;
        }

        let inv_n = 1.0 / n as f64;
        let mean_t = self.samples.iter().map(|s| s.time_ms).sum::<f64>() * inv_n;
        let mean_x = self.samples.iter().map(|s| s.pos.x as f64).sum::<f64>() * inv_n;
        let mean_y = self.samples.iter().map(|s| s.pos.y as f64).sum::<f64>() * inv_n;

        let mut var_t = 0.0;
        let mut cov_x = 0.0;
        let mut cov_y = 0.0;
        for s in &self.samples {
            let dt = s.time_ms - mean_t;
            var_t += dt * dt;
            cov_x += dt * (s.pos.x as f64 - mean_x);
            cov_y += dt * (s.pos.y as f64 - mean_y);
        }

        if var_t <= f64::EPSILON {
            return Vec2::ZERO;
        }

        // Slope is per millisecond
        Vec2::new(
            (cov_x / var_t * 1000.0) as f32,
            (cov_y / var_t * 1000.0) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_single_sample() {
        let mut tracker = VelocityTracker::new();
        assert_eq!(tracker.velocity(), Vec2::ZERO);

        tracker.add_sample(Vec2::new(10.0, 10.0), 0.0);
        assert_eq!(tracker.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_constant_velocity() {
        let mut tracker = VelocityTracker::new();
        // 5 units per 10 ms in x, -2 per 10 ms in y
        for i in 0..5 {
            let t = i as f64 * 10.0;
            tracker.add_sample(Vec2::new(i as f32 * 5.0, 100.0 - i as f32 * 2.0), t);
        }
        let v = tracker.velocity();
        assert!((v.x - 500.0).abs() < 0.01, "vx = {}", v.x);
        assert!((v.y + 200.0).abs() < 0.01, "vy = {}", v.y);
    }

    #[test]
    fn test_stale_samples_dropped() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(Vec2::new(1000.0, 0.0), 0.0);
        tracker.add_sample(Vec2::new(0.0, 0.0), 200.0);
        tracker.add_sample(Vec2::new(1.0, 0.0), 210.0);
        tracker.add_sample(Vec2::new(2.0, 0.0), 220.0);

        assert_eq!(tracker.len(), 3);
        let v = tracker.velocity();
        assert!((v.x - 100.0).abs() < 0.01, "vx = {}", v.x);
    }

    #[test]
    fn test_paused_pointer_reports_zero() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(Vec2::new(0.0, 0.0), 0.0);
        tracker.add_sample(Vec2::new(50.0, 0.0), 10.0);
        // Held still for longer than the horizon
        tracker.add_sample(Vec2::new(50.0, 0.0), 500.0);
        assert_eq!(tracker.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_sample_cap() {
        let mut tracker = VelocityTracker::new();
        for i in 0..50 {
            tracker.add_sample(Vec2::new(i as f32, 0.0), i as f64);
        }
        assert_eq!(tracker.len(), MAX_SAMPLES);
    }

    #[test]
    fn test_backwards_time_resets() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(Vec2::ZERO, 100.0);
        tracker.add_sample(Vec2::new(10.0, 0.0), 110.0);
        tracker.add_sample(Vec2::new(10.0, 0.0), 5.0);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(Vec2::ZERO, 0.0);
        tracker.add_sample(Vec2::ONE, 16.0);
        tracker.clear();
        assert!(tracker.is_empty());
        assert_eq!(tracker.velocity(), Vec2::ZERO);
    }
}
