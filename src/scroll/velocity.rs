//! Horizontal velocity estimation from recent pointer samples.

use std::collections::VecDeque;

/// Most samples kept for one gesture.
const MAX_SAMPLES: usize = 10;

/// Samples older than this, relative to the newest one, are dropped.
const HISTORY_WINDOW_MS: u64 = 200;

/// Time base for reported velocities (pixels per second).
pub const UNITS_PER_SECOND_MS: u64 = 1000;

#[derive(Debug, Clone, Copy)]
struct Sample {
    x: f32,
    time_ms: u64,
}

/// Accumulates pointer samples of a single gesture.
///
/// Only the X axis is tracked.
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

    /// Record a sample.
    ///
    /// Time is expected to be non-decreasing within a gesture.
    pub fn add_sample(&mut self, x: f32, time_ms: u64) {
        while let Some(oldest) = self.samples.front() {
            if self.samples.len() >= MAX_SAMPLES
                || time_ms.saturating_sub(oldest.time_ms) > HISTORY_WINDOW_MS
            {
                self.samples.pop_front();
            } else {
                break;
            }
        }
        self.samples.push_back(Sample { x, time_ms });
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Velocity over `units_ms` (1000 gives pixels per second), clamped to
    /// `[-max_velocity, max_velocity]`.
    ///
    /// Each sample is measured against the oldest one and the estimates are
    /// folded into a running average. With more than three samples the newest
    /// is left out as it tends to be noisy.
    pub fn velocity(&self, units_ms: u64, max_velocity: f32) -> f32 {
        let Some(oldest) = self.samples.front().copied() else {
            return 0.0;
        };

        let mut count = self.samples.len();
        if count > 3 {
            count -= 1;
        }

        let mut accum = 0.0f32;
        for sample in self.samples.iter().take(count).skip(1) {
            let duration = sample.time_ms.saturating_sub(oldest.time_ms);
            if duration == 0 {
                continue;
            }
            let distance = sample.x - oldest.x;
            let velocity = distance / duration as f32 * units_ms as f32;
            accum = if accum == 0.0 {
                velocity
            } else {
                (accum + velocity) * 0.5
            };
        }

        accum.clamp(-max_velocity, max_velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sample_has_no_velocity() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(120.0, 10);
        assert_eq!(tracker.velocity(UNITS_PER_SECOND_MS, 8000.0), 0.0);
    }

    #[test]
    fn test_steady_motion() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0.0, 0);
        tracker.add_sample(10.0, 10);
        tracker.add_sample(20.0, 20);
        // 1 px/ms
        assert_eq!(tracker.velocity(UNITS_PER_SECOND_MS, 8000.0), 1000.0);
    }

    #[test]
    fn test_leftward_motion_is_negative() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(300.0, 100);
        tracker.add_sample(200.0, 150);
        assert_eq!(tracker.velocity(UNITS_PER_SECOND_MS, 8000.0), -2000.0);
    }

    #[test]
    fn test_clamped_both_directions() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0.0, 0);
        tracker.add_sample(900.0, 10);
        assert_eq!(tracker.velocity(UNITS_PER_SECOND_MS, 8000.0), 8000.0);

        let mut tracker = VelocityTracker::new();
        tracker.add_sample(900.0, 0);
        tracker.add_sample(0.0, 10);
        assert_eq!(tracker.velocity(UNITS_PER_SECOND_MS, 8000.0), -8000.0);
    }

    #[test]
    fn test_zero_duration_samples_skipped() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0.0, 5);
        tracker.add_sample(40.0, 5);
        assert_eq!(tracker.velocity(UNITS_PER_SECOND_MS, 8000.0), 0.0);
    }

    #[test]
    fn test_newest_sample_skipped_when_many() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0.0, 0);
        tracker.add_sample(10.0, 10);
        tracker.add_sample(20.0, 20);
        tracker.add_sample(30.0, 30);
        // A jump on the last sample is ignored.
        tracker.add_sample(500.0, 40);
        assert_eq!(tracker.velocity(UNITS_PER_SECOND_MS, 8000.0), 1000.0);
    }

    #[test]
    fn test_estimates_are_averaged() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0.0, 0);
        tracker.add_sample(10.0, 10);
        tracker.add_sample(40.0, 20);
        // 1000 px/s against the oldest, then 2000 px/s
        assert_eq!(tracker.velocity(UNITS_PER_SECOND_MS, 8000.0), 1500.0);
    }

    #[test]
    fn test_average_starts_at_first_motion() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0.0, 0);
        tracker.add_sample(0.0, 10);
        tracker.add_sample(30.0, 20);
        // A standing first estimate does not halve the later one
        assert_eq!(tracker.velocity(UNITS_PER_SECOND_MS, 8000.0), 1500.0);
    }

    #[test]
    fn test_old_samples_expire() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0.0, 0);
        tracker.add_sample(1000.0, 50);
        // Pause, then slow motion: the fast start is out of the window.
        tracker.add_sample(1000.0, 400);
        tracker.add_sample(1010.0, 410);
        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.velocity(UNITS_PER_SECOND_MS, 8000.0), 1000.0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut tracker = VelocityTracker::new();
        for i in 0..25u64 {
            tracker.add_sample(i as f32, i);
        }
        assert_eq!(tracker.len(), MAX_SAMPLES);
    }
}
