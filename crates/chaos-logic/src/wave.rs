//! Deterministic smoothstep oscillator.
//!
//! Focus mode replaces the visit counter with a slow wave so an unattended
//! installation breathes between sparse and crowded on its own. The value
//! is a pure function of elapsed time modulo the period:
//!
//! ```text
//! t = ((now - phase_start) mod period) / period
//! s = (sin(2πt) + 1) / 2
//! value = min + s²(3 - 2s) · (max - min)
//! ```
//!
//! The smoothstep holds the value near both extremes, so the scene lingers
//! when it is emptiest and fullest.

use serde::{Deserialize, Serialize};

use crate::constants::wave_defaults;

/// Oscillator parameters. Carries no accumulated state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveState {
    pub min: f64,
    pub max: f64,
    pub cycle_period_ms: f64,
    pub phase_start_ms: f64,
}

/// Coarse position of the wave, for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    Rising,
    Peak,
    Falling,
    Trough,
}

impl WavePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            WavePhase::Rising => "rising",
            WavePhase::Peak => "peak",
            WavePhase::Falling => "falling",
            WavePhase::Trough => "trough",
        }
    }
}

impl Default for WaveState {
    fn default() -> Self {
        Self::starting_at_trough(
            wave_defaults::MIN,
            wave_defaults::MAX,
            wave_defaults::CYCLE_PERIOD_MS,
            0.0,
        )
    }
}

impl WaveState {
    pub fn new(min: f64, max: f64, cycle_period_ms: f64, phase_start_ms: f64) -> Self {
        Self {
            min,
            max,
            cycle_period_ms,
            phase_start_ms,
        }
    }

    /// A wave whose `sample(now)` is `min` and whose peak lands half a
    /// period later. The sine reaches its trough three quarters into a
    /// cycle, so the phase origin is pulled back by that much.
    pub fn starting_at_trough(min: f64, max: f64, cycle_period_ms: f64, now_ms: f64) -> Self {
        Self::new(min, max, cycle_period_ms, now_ms - 0.75 * cycle_period_ms)
    }

    /// Restart from the trough at `now_ms`.
    pub fn restart(&mut self, now_ms: f64) {
        self.phase_start_ms = now_ms - 0.75 * self.cycle_period_ms;
    }

    /// Value at `now_ms`, always within `[min, max]`.
    pub fn sample(&self, now_ms: f64) -> f64 {
        let (lo, hi) = self.bounds();
        if !(self.cycle_period_ms > 0.0) || !now_ms.is_finite() {
            return lo;
        }
        let elapsed = (now_ms - self.phase_start_ms).rem_euclid(self.cycle_period_ms);
        let t = elapsed / self.cycle_period_ms;
        let s = ((2.0 * std::f64::consts::PI * t).sin() + 1.0) / 2.0;
        let eased = s * s * (3.0 - 2.0 * s);
        (lo + eased * (hi - lo)).clamp(lo, hi)
    }

    /// Sample rounded to the nearest integer ("visit 3").
    pub fn int_value(&self, now_ms: f64) -> i64 {
        self.sample(now_ms).round() as i64
    }

    /// Normalized position of `value` within `[min, max]`.
    pub fn progress(&self, value: f64) -> f64 {
        let (lo, hi) = self.bounds();
        if hi - lo <= 0.0 {
            return 0.0;
        }
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    }

    /// Classify `value` by normalized position alone.
    ///
    /// This cannot tell rising from falling: both halves of the cycle pass
    /// through the same values. Below the midpoint reads as rising, above
    /// it as falling. It is an approximation for captions, not a phase
    /// estimate.
    pub fn phase(&self, value: f64) -> WavePhase {
        let n = self.progress(value);
        if n < 0.2 {
            WavePhase::Trough
        } else if n > 0.8 {
            WavePhase::Peak
        } else if n < 0.5 {
            WavePhase::Rising
        } else {
            WavePhase::Falling
        }
    }

    fn bounds(&self) -> (f64, f64) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }
}
