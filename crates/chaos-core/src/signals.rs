//! Ambient per-scene values for the presentation layer.
//!
//! Agents are only part of what a scene shows. Flickers, blinks, the lure
//! pulse and the console transcript are driven by timers and published here
//! each frame. A renderer reads them and never writes back.

use serde::{Deserialize, Serialize};

/// One line on the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleLine {
    pub text: String,
    /// Still being typed out.
    pub typing: bool,
    pub glitched: bool,
}

impl ConsoleLine {
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            typing: true,
            glitched: false,
        }
    }

    pub fn instant(text: impl Into<String>, glitched: bool) -> Self {
        Self {
            text: text.into(),
            typing: false,
            glitched,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSignals {
    /// Portrait opacity; drops briefly during a flicker.
    pub flicker: f32,
    /// Portrait arm extension, 0 when resting.
    pub arm_reach: f32,
    /// Pet eyes closed.
    pub blink: bool,
    /// Lure glow multiplier around 1.
    pub lure_intensity: f32,
    /// Abyss light, dimmer while the pointer moves fast.
    pub light_intensity: f32,
    /// How much of the player's light falls on the leviathan.
    pub leviathan_illumination: f32,
    /// Transient caption such as the leviathan warning.
    pub message: Option<String>,
    pub transcript: Vec<ConsoleLine>,
    /// Console glitch level after an escape attempt.
    pub glitch: f32,
    /// Short random console glitch.
    pub random_glitch: bool,
    pub late_night: bool,
}

impl Default for SceneSignals {
    fn default() -> Self {
        Self {
            flicker: 1.0,
            arm_reach: 0.0,
            blink: false,
            lure_intensity: 1.0,
            light_intensity: 1.0,
            leviathan_illumination: 0.0,
            message: None,
            transcript: Vec::new(),
            glitch: 0.0,
            random_glitch: false,
            late_night: false,
        }
    }
}
