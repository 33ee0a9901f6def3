//! Iteration timing for the batch driver.
//!
//! * [`IterTimer`] – Tracks the duration of each converted batch and keeps a smoothed
//!   **exponential moving average** (EMA), stable even when batch sizes vary a lot.
//! * [`fmt_dur`] – Human-readable formatter for [`Duration`] values (`"253µs"`,
//!   `"42ms"`, `"3.14s"`).
//!
//! The EMA update rule is `ema ← α·dt + (1–α)·ema` with `α ∈ (0,1]`; the first sample
//! initializes the average.
//!
//! With the `progress` feature the same figures feed an `indicatif` progress bar.
use std::time::{Duration, Instant};

pub struct IterTimer {
    last: Instant,
    alpha: f64,
    /// Smoothed duration in nanoseconds, `None` until the first tick.
    ema_ns: Option<f64>,
}

impl IterTimer {
    pub fn new(alpha: f64) -> Self {
        Self {
            last: Instant::now(),
            alpha,
            ema_ns: None,
        }
    }

    /// Restart the clock without recording a sample.
    #[inline]
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Record the time elapsed since the previous tick (or reset) and return it.
    #[inline]
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;

        let sample = dt.as_nanos() as f64;
        self.ema_ns = Some(match self.ema_ns {
            None => sample,
            Some(ema) => ema + self.alpha * (sample - ema),
        });

        dt
    }

    #[inline]
    pub fn avg(&self) -> Duration {
        Duration::from_nanos(self.ema_ns.unwrap_or(0.0) as u64)
    }
}

/// Format a duration with the coarsest unit keeping it above one.
pub fn fmt_dur(d: Duration) -> String {
    match d.as_micros() {
        us if us < 1_000 => format!("{us}µs"),
        us if us < 1_000_000 => format!("{}ms", us / 1_000),
        _ => format!("{:.2}s", d.as_secs_f32()),
    }
}
