//! Tendrils reaching in from the viewport edges toward the light.
//!
//! The tip chases a target on the line from the anchor to the pointer,
//! capped at 300 px and shrinking as the pointer moves faster. Every other
//! segment follows its predecessor with a fixed lag plus a small wobble.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::spawn::pick;
use crate::steering::Bounds;
use crate::vector::Vec2;

pub const SEGMENTS: usize = 12;
pub const MAX_REACH: f32 = 300.0;
/// Share of the anchor-to-pointer distance a tendril will cover.
pub const REACH_SHARE: f32 = 0.7;
/// Reach lost per unit of pointer speed.
pub const RECOIL_PER_SPEED: f32 = 0.05;
pub const FOLLOW_LAG: f32 = 0.15;
/// Tip glow radius around the light.
pub const TIP_GLOW_RADIUS: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    const ORDER: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tendril {
    pub side: Side,
    pub anchor: Vec2,
    /// `segments[0]` is the tip.
    pub segments: Vec<Vec2>,
    /// Tip chase rate per reference frame.
    pub speed: f32,
    pub thickness: f32,
}

impl Tendril {
    /// `index` cycles the anchor side left, right, top, bottom.
    pub fn spawn<R: Rng + ?Sized>(index: usize, bounds: Bounds, rng: &mut R) -> Self {
        let side = Side::ORDER[index % Side::ORDER.len()];
        let anchor = match side {
            Side::Left => Vec2::new(0.0, pick(rng, (0.0, bounds.height))),
            Side::Right => Vec2::new(bounds.width, pick(rng, (0.0, bounds.height))),
            Side::Top => Vec2::new(pick(rng, (0.0, bounds.width)), 0.0),
            Side::Bottom => Vec2::new(pick(rng, (0.0, bounds.width)), bounds.height),
        };
        Self {
            side,
            anchor,
            segments: vec![anchor; SEGMENTS],
            speed: pick(rng, (0.02, 0.05)),
            thickness: pick(rng, (3.0, 8.0)),
        }
    }

    pub fn tip(&self) -> Vec2 {
        self.segments.first().copied().unwrap_or(self.anchor)
    }

    /// Where the tip is heading this frame. With no pointer it retracts.
    pub fn target(&self, pointer: Option<Vec2>, pointer_speed: f32) -> Vec2 {
        let Some(light) = pointer else {
            return self.anchor;
        };
        let to_light = light - self.anchor;
        let dist = to_light.length();
        if dist <= 0.0 {
            return self.anchor;
        }
        let recoil = (1.0 - pointer_speed * RECOIL_PER_SPEED).max(0.0);
        let reach = (dist * REACH_SHARE).min(MAX_REACH) * recoil;
        self.anchor + to_light * (reach / dist)
    }

    /// Advance by `k` reference frames at scene time `time_ms`.
    pub fn advance(&mut self, pointer: Option<Vec2>, pointer_speed: f32, time_ms: f64, k: f32) {
        if k <= 0.0 || self.segments.is_empty() {
            return;
        }
        let target = self.target(pointer, pointer_speed);
        let chase = 1.0 - (1.0 - self.speed.clamp(0.0, 1.0)).powf(k);
        self.segments[0] = self.segments[0].lerp(&target, chase);

        let follow = 1.0 - (1.0 - FOLLOW_LAG).powf(k);
        let t = (time_ms * 0.002) as f32;
        for i in 1..self.segments.len() {
            let prev = self.segments[i - 1];
            let mut curr = self.segments[i].lerp(&prev, follow);
            curr.x += (t + i as f32 * 0.5).sin() * 0.5 * k;
            curr.y += (t + i as f32 * 0.3).cos() * 0.5 * k;
            self.segments[i] = curr;
        }
    }

    /// Tip glow in `[0, 0.5]` when the tip is near the light.
    pub fn tip_glow(&self, pointer: Option<Vec2>) -> f32 {
        match pointer {
            Some(light) => {
                let d = self.tip().distance(&light);
                if d < TIP_GLOW_RADIUS {
                    (1.0 - d / TIP_GLOW_RADIUS) * 0.5
                } else {
                    0.0
                }
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn left_tendril() -> Tendril {
        let anchor = Vec2::new(0.0, 300.0);
        Tendril {
            side: Side::Left,
            anchor,
            segments: vec![anchor; SEGMENTS],
            speed: 0.05,
            thickness: 4.0,
        }
    }

    #[test]
    fn sides_cycle() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = Bounds::default();
        let sides: Vec<_> = (0..8)
            .map(|i| Tendril::spawn(i, bounds, &mut rng).side)
            .collect();
        assert_eq!(sides[0], Side::Left);
        assert_eq!(sides[3], Side::Bottom);
        assert_eq!(sides[4], Side::Left);
        let t = Tendril::spawn(1, bounds, &mut rng);
        assert_eq!(t.anchor.x, bounds.width);
        assert_eq!(t.segments.len(), SEGMENTS);
    }

    #[test]
    fn reach_is_capped_and_recoils() {
        let t = left_tendril();
        let far = Vec2::new(1000.0, 300.0);
        assert!((t.target(Some(far), 0.0).x - MAX_REACH).abs() < 1e-3);
        let near = Vec2::new(100.0, 300.0);
        assert!((t.target(Some(near), 0.0).x - 70.0).abs() < 1e-3);
        assert!((t.target(Some(far), 10.0).x - 150.0).abs() < 1e-3);
        assert_eq!(t.target(Some(far), 40.0), t.anchor);
        assert_eq!(t.target(None, 0.0), t.anchor);
    }

    #[test]
    fn tip_leads_and_body_follows() {
        let mut t = left_tendril();
        let light = Some(Vec2::new(400.0, 300.0));
        for frame in 0..20 {
            t.advance(light, 0.0, frame as f64 * 16.0, 1.0);
        }
        let tail = t.segments[SEGMENTS - 1];
        assert!(t.tip().x > tail.x + 50.0, "tip={:?} tail={tail:?}", t.tip());

        for frame in 20..400 {
            t.advance(light, 0.0, frame as f64 * 16.0, 1.0);
        }
        assert!(t.tip().x > 270.0, "tip={:?}", t.tip());
        assert!(t.segments[SEGMENTS - 1].x > 200.0);
    }

    #[test]
    fn tip_glows_near_light() {
        let mut t = left_tendril();
        t.segments[0] = Vec2::new(50.0, 300.0);
        assert!((t.tip_glow(Some(Vec2::new(100.0, 300.0))) - 0.25).abs() < 1e-6);
        assert_eq!(t.tip_glow(Some(Vec2::new(500.0, 300.0))), 0.0);
    }
}
