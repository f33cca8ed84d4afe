//! Pointer input as seen by the integrator.
//!
//! Samples arrive whenever the host delivers them and simply replace the
//! previous one. The integrator only ever reads the latest sample plus a
//! scalar speed that decays between frames.

use serde::{Deserialize, Serialize};

use crate::constants::timing::REFERENCE_FRAME_MS;
use crate::vector::Vec2;

/// Per-reference-frame decay of pointer speed.
pub const SPEED_DECAY: f32 = 0.9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub position: Option<Vec2>,
    /// Decaying distance-per-sample, in pixels.
    pub speed: f32,
}

impl PointerState {
    /// Record a new sample. Last writer wins.
    pub fn sample(&mut self, x: f32, y: f32) {
        let next = Vec2::new(x, y);
        if !next.is_finite() {
            return;
        }
        if let Some(prev) = self.position {
            self.speed = prev.distance(&next);
        }
        self.position = Some(next);
    }

    /// Pointer left the viewport.
    pub fn clear(&mut self) {
        self.position = None;
    }

    /// Decay speed for a frame of `dt_ms`.
    pub fn decay(&mut self, dt_ms: f32) {
        let k = (dt_ms / REFERENCE_FRAME_MS).max(0.0);
        self.speed *= SPEED_DECAY.powf(k);
        if self.speed < 1e-3 {
            self.speed = 0.0;
        }
    }

    /// Position clamped into the viewport grown by `margin` on every side.
    pub fn clamped(&self, width: f32, height: f32, margin: f32) -> Option<Vec2> {
        self.position.map(|p| {
            Vec2::new(
                p.x.clamp(-margin, width + margin),
                p.y.clamp(-margin, height + margin),
            )
        })
    }
}
