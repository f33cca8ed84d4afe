//! The leviathan: a rare, huge shape that crosses the abyss and scatters
//! the seekers in its path.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::spawn::pick;
use crate::steering::{Bounds, Repulsor};
use crate::vector::Vec2;

/// Minimum quiet time between appearances.
pub const COOLDOWN_MS: f64 = 10_000.0;
/// Spontaneous appearance chance per reference frame once cooled down.
pub const APPEAR_CHANCE: f32 = 0.003;
/// Push falls to zero at `size · PUSH_REACH`.
pub const PUSH_REACH: f32 = 1.5;
pub const PUSH_STRENGTH: f32 = 3.0;
pub const MESSAGE: &str = "something approaches...";
pub const MESSAGE_MS: f64 = 4_000.0;
const ENTRY_OFFSET: f32 = 600.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leviathan {
    pub position: Vec2,
    pub target_y: f32,
    /// Pixels per reference frame.
    pub speed: f32,
    pub size: f32,
    /// +1 crossing left to right, -1 the other way.
    pub direction: f32,
    pub opacity: f32,
}

impl Leviathan {
    /// Enter from a random side, 600 px beyond the edge.
    pub fn enter<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Self {
        let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let x = if direction > 0.0 {
            -ENTRY_OFFSET
        } else {
            bounds.width + ENTRY_OFFSET
        };
        let y = bounds.height * pick(rng, (0.3, 0.7));
        Self {
            position: Vec2::new(x, y),
            target_y: y + pick(rng, (-50.0, 50.0)),
            speed: pick(rng, (2.0, 3.5)),
            size: pick(rng, (350.0, 550.0)),
            direction,
            opacity: 0.0,
        }
    }

    pub fn advance(&mut self, bounds: Bounds, k: f32) {
        self.position.x += self.speed * self.direction * k;
        let settle = 1.0 - 0.99f32.powf(k.max(0.0));
        self.position.y += (self.target_y - self.position.y) * settle;

        let from_edge = if self.direction > 0.0 {
            (self.position.x + 300.0).min(bounds.width - self.position.x + 600.0)
        } else {
            (bounds.width - self.position.x + 300.0).min(self.position.x + 600.0)
        };
        self.opacity = (from_edge / 600.0).clamp(0.0, 0.7);
    }

    /// Fully past the far edge.
    pub fn is_gone(&self, bounds: Bounds) -> bool {
        let tail = self.size * 2.5;
        if self.direction > 0.0 {
            self.position.x > bounds.width + tail
        } else {
            self.position.x < -tail
        }
    }

    pub fn repulsor(&self) -> Repulsor {
        Repulsor {
            position: self.position,
            radius: self.size * PUSH_REACH,
            strength: PUSH_STRENGTH,
        }
    }

    /// How strongly the player's light falls on the body, `0..=1`.
    pub fn illumination(&self, light: Vec2) -> f32 {
        let reach = self.size * PUSH_REACH;
        if reach <= 0.0 {
            return 0.0;
        }
        (1.0 - light.distance(&self.position) / reach).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn enters_offscreen_and_crosses() {
        let bounds = Bounds::default();
        let mut rng = StdRng::seed_from_u64(8);
        let mut lev = Leviathan::enter(bounds, &mut rng);
        assert!(lev.position.x < 0.0 || lev.position.x > bounds.width);
        assert!((350.0..=550.0).contains(&lev.size));
        let mut frames = 0;
        while !lev.is_gone(bounds) {
            lev.advance(bounds, 1.0);
            assert!(lev.opacity <= 0.7);
            frames += 1;
            assert!(frames < 10_000, "leviathan never left");
        }
    }

    #[test]
    fn repulsor_matches_size() {
        let lev = Leviathan {
            position: Vec2::new(0.0, 0.0),
            target_y: 0.0,
            speed: 2.0,
            size: 400.0,
            direction: 1.0,
            opacity: 0.0,
        };
        let r = lev.repulsor();
        assert_eq!(r.radius, 600.0);
        assert_eq!(r.strength, PUSH_STRENGTH);
        assert!((lev.illumination(Vec2::new(300.0, 0.0)) - 0.5).abs() < 1e-6);
    }
}
