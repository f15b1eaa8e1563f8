//! Generations-per-second measurement.

use std::time::{Duration, Instant};

/// Generations between rate reports.
pub const REPORT_EVERY: u64 = 20;

/// Measures generations per second over fixed windows of generations.
pub struct RateMeter {
    window: u64,
    counted: u64,
    window_start: Instant,
    last_rate: f64,
}

impl RateMeter {
    pub fn new(window: u64) -> Self {
        RateMeter::starting_at(window, Instant::now())
    }

    fn starting_at(window: u64, now: Instant) -> Self {
        RateMeter {
            window: window.max(1),
            counted: 0,
            window_start: now,
            last_rate: 0.0,
        }
    }

    /// Count one generation. Returns the rate when a window closes.
    pub fn tick(&mut self) -> Option<f64> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<f64> {
        self.counted += 1;
        if self.counted < self.window {
            return None;
        }
        let elapsed = now.duration_since(self.window_start);
        self.last_rate = rate(self.counted, elapsed);
        self.counted = 0;
        self.window_start = now;
        Some(self.last_rate)
    }

    /// Rate from the last closed window, 0 before the first one closes.
    pub fn last_rate(&self) -> f64 {
        self.last_rate
    }

    /// Start a new window, e.g. when a new run begins.
    pub fn reset(&mut self) {
        self.counted = 0;
        self.window_start = Instant::now();
    }
}

impl Default for RateMeter {
    fn default() -> Self {
        RateMeter::new(REPORT_EVERY)
    }
}

fn rate(generations: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0.0;
    }
    // two decimals, like the console report
    (generations as f64 / secs * 100.0).round() / 100.0
}
