//! Clocks and frame pacing.
//!
//! The match only needs a monotonic "now" in milliseconds. The host reads it
//! once per frame, turns it into a delta for `MatchController::step`, and
//! optionally sleeps off the rest of the frame budget.

use std::cell::Cell;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Maximum delta handed to the simulation, in milliseconds.
const MAX_DT_MS: f64 = 250.0;

/// Monotonic millisecond timestamp source.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Starts a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-advanced clock for deterministic runs.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Creates a clock reading `start_ms`.
    #[must_use]
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Frame timing manager.
#[derive(Debug)]
pub struct FrameTiming {
    /// Target frames per second
    target_fps: u32,
    /// Time budget per frame
    frame_budget: Duration,
    /// Timestamp of the last tick, None before the first
    last_frame_ms: Option<f64>,
    /// Recent frame times for averaging
    frame_times: VecDeque<f64>,
    /// Maximum samples for averaging
    max_samples: usize,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FrameTiming {
    /// Create a new frame timing manager.
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            target_fps,
            frame_budget: Duration::from_secs_f64(1.0 / f64::from(target_fps)),
            last_frame_ms: None,
            frame_times: VecDeque::with_capacity(120),
            max_samples: 120,
        }
    }

    /// Milliseconds since the previous tick, clamped to prevent a spiral
    /// of death after a stall. The first tick returns zero.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_frame_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_DT_MS),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);

        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.max_samples {
            self.frame_times.pop_front();
        }

        dt
    }

    /// Sleep for whatever is left of this frame's budget.
    pub fn sleep_remainder(&self, clock: &dyn Clock) {
        let Some(last) = self.last_frame_ms else {
            return;
        };
        let spent = Duration::from_secs_f64(((clock.now_ms() - last) / 1000.0).max(0.0));
        if let Some(remaining) = self.frame_budget.checked_sub(spent) {
            std::thread::sleep(remaining);
        }
    }

    /// Average frame time in milliseconds over recent frames.
    #[must_use]
    pub fn average_frame_time_ms(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f64>() / self.frame_times.len() as f64
    }

    /// Current FPS (averaged over recent frames).
    #[must_use]
    pub fn current_fps(&self) -> f64 {
        let avg = self.average_frame_time_ms();
        if avg > 0.0 {
            1000.0 / avg
        } else {
            0.0
        }
    }

    /// Get the target FPS.
    #[must_use]
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Nominal frame length in milliseconds.
    #[must_use]
    pub fn frame_budget_ms(&self) -> f64 {
        self.frame_budget.as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(100.0);
        assert_eq!(clock.now_ms(), 100.0);
        clock.advance(16.5);
        assert_eq!(clock.now_ms(), 116.5);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
        assert!(a >= 0.0);
    }

    #[test]
    fn test_first_tick_is_zero() {
        let mut timing = FrameTiming::new(60);
        assert_eq!(timing.tick(5_000.0), 0.0);
        assert_eq!(timing.tick(5_016.0), 16.0);
    }

    #[test]
    fn test_tick_clamps_stalls_and_rewinds() {
        let mut timing = FrameTiming::new(60);
        timing.tick(0.0);
        assert_eq!(timing.tick(10_000.0), MAX_DT_MS);
        assert_eq!(timing.tick(9_000.0), 0.0);
    }

    #[test]
    fn test_fps_average() {
        let mut timing = FrameTiming::new(60);
        timing.tick(0.0);
        for i in 1..=10 {
            timing.tick(f64::from(i) * 20.0);
        }
        // First sample is the zero-length initial tick
        assert!((timing.average_frame_time_ms() - 200.0 / 11.0).abs() < 1e-9);
        assert!(timing.current_fps() > 50.0);
    }

    #[test]
    fn test_fresh_timing_has_no_samples() {
        let timing = FrameTiming::new(30);
        assert_eq!(timing.average_frame_time_ms(), 0.0);
        assert_eq!(timing.target_fps(), 30);
    }

    #[test]
    fn test_target_fps_floor() {
        let timing = FrameTiming::new(0);
        assert_eq!(timing.target_fps(), 1);
        assert!((timing.frame_budget_ms() - 1000.0).abs() < 1e-9);
    }
}
