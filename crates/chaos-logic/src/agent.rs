//! Agent state record.

use serde::{Deserialize, Serialize};

use crate::constants::AgentKind;
use crate::vector::Vec2;

/// One simulated creature, particle or light.
///
/// `hue`, `size` and `opacity` are presentation hints that the integrator
/// only drifts or copies; `glow` is the agent's excitement and responds to
/// whichever drive won the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    /// Spawn order within the scene. Higher is newer.
    pub id: u64,
    pub kind: AgentKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Parallax layer, 0 (far) to 1 (near).
    pub depth: f32,
    /// Periodic animation accumulator in `[0, 2π)`.
    pub phase: f32,
    /// Excitement in `[0, 1]`.
    pub glow: f32,
    pub hue: f32,
    pub size: f32,
    pub opacity: f32,
    /// Radius within which the agent reacts to the pointer.
    pub awareness: f32,
    /// Scales the pointer speed that startles this agent.
    pub timidity: f32,
    pub max_speed: f32,
    /// Constant wander drift.
    pub drift: Vec2,
    /// Spring target (letters, pacing deer).
    pub home: Option<Vec2>,
    /// Word group for typography letters.
    pub group: Option<u64>,
    /// Glyph carried by a letter.
    pub glyph: Option<char>,
}

impl AgentState {
    pub fn new(id: u64, kind: AgentKind, position: Vec2) -> Self {
        Self {
            id,
            kind,
            position,
            velocity: Vec2::ZERO,
            depth: 0.5,
            phase: 0.0,
            glow: 0.0,
            hue: 0.0,
            size: 1.0,
            opacity: 1.0,
            awareness: 0.0,
            timidity: 1.0,
            max_speed: 1.0,
            drift: Vec2::ZERO,
            home: None,
            group: None,
            glyph: None,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Horizontal facing, for sprites that flip.
    pub fn facing_right(&self) -> bool {
        self.velocity.x >= 0.0
    }
}
