//! Effective familiarity and time-of-day classification.
//!
//! Familiarity is the single scalar every scene is tuned by. Its source is,
//! in order of precedence: the focus-mode oscillator, a debug override,
//! then the stored visit count for the scene.

use serde::{Deserialize, Serialize};

use crate::wave::WaveState;

/// Inputs to [`resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FamiliarityState {
    pub raw_visit_count: u32,
    pub debug_override: Option<u32>,
    pub oscillator: Option<WaveState>,
}

impl FamiliarityState {
    pub fn from_visits(raw_visit_count: u32) -> Self {
        Self {
            raw_visit_count,
            ..Self::default()
        }
    }
}

/// Where the resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamiliaritySource {
    Oscillator,
    DebugOverride,
    Visits,
}

pub fn source(state: &FamiliarityState) -> FamiliaritySource {
    if state.oscillator.is_some() {
        FamiliaritySource::Oscillator
    } else if state.debug_override.is_some() {
        FamiliaritySource::DebugOverride
    } else {
        FamiliaritySource::Visits
    }
}

/// Effective familiarity at `now_ms`. Always finite and non-negative.
pub fn resolve(state: &FamiliarityState, now_ms: f64) -> f64 {
    let value = match (state.oscillator, state.debug_override) {
        (Some(wave), _) => wave.sample(now_ms),
        (None, Some(forced)) => forced as f64,
        (None, None) => state.raw_visit_count as f64,
    };
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// [`resolve`] rounded for display.
pub fn resolve_discrete(state: &FamiliarityState, now_ms: f64) -> u32 {
    resolve(state, now_ms).round() as u32
}

// ── Time of day ─────────────────────────────────────────────────────────

/// Coarse time-of-day bucket from the local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Dusk,
    Evening,
    Late,
}

impl TimeOfDay {
    /// `hour` is 0..24; out-of-range values wrap.
    pub fn from_hour(hour: u32) -> TimeOfDay {
        match hour % 24 {
            22..=23 | 0..=4 => TimeOfDay::Late,
            20..=21 => TimeOfDay::Evening,
            17..=19 => TimeOfDay::Dusk,
            12..=16 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Morning,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Dusk => "dusk",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Late => "late",
        }
    }
}

/// Late-night flag with the debug override taking precedence over the clock.
pub fn is_late_night(override_flag: Option<bool>, hour: u32) -> bool {
    override_flag.unwrap_or_else(|| TimeOfDay::from_hour(hour) == TimeOfDay::Late)
}
