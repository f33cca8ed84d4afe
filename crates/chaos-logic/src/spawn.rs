//! Randomized initial agent state.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::agent::AgentState;
use crate::constants::AgentKind;
use crate::steering::Bounds;
use crate::vector::Vec2;

/// Direction of an agent's constant drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DriftAxis {
    None,
    /// Left or right, chosen at spawn.
    Horizontal,
    /// Straight up (bubbles, jellyfish).
    Up,
    /// Any heading.
    Any,
}

/// Inclusive ranges for every randomized field of a new agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnSpec {
    /// Spawn x as a fraction of viewport width.
    pub x_band: (f32, f32),
    pub y_band: (f32, f32),
    pub drift_axis: DriftAxis,
    pub drift_speed: (f32, f32),
    pub max_speed: (f32, f32),
    pub awareness: (f32, f32),
    pub timidity: (f32, f32),
    pub depth: (f32, f32),
    pub hue: (f32, f32),
    pub size: (f32, f32),
    pub opacity: (f32, f32),
    /// Spring back to the spawn point.
    #[serde(default)]
    pub anchored: bool,
}

impl Default for SpawnSpec {
    fn default() -> Self {
        Self {
            x_band: (0.0, 1.0),
            y_band: (0.0, 1.0),
            drift_axis: DriftAxis::None,
            drift_speed: (0.0, 0.0),
            max_speed: (1.0, 1.0),
            awareness: (0.0, 0.0),
            timidity: (1.0, 1.0),
            depth: (0.0, 1.0),
            hue: (0.0, 0.0),
            size: (1.0, 1.0),
            opacity: (1.0, 1.0),
            anchored: false,
        }
    }
}

/// Uniform pick from an inclusive range; reversed ranges are reordered.
pub fn pick<R: Rng + ?Sized>(rng: &mut R, range: (f32, f32)) -> f32 {
    let (lo, hi) = if range.0 <= range.1 {
        range
    } else {
        (range.1, range.0)
    };
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}

pub fn spawn_agent<R: Rng + ?Sized>(
    id: u64,
    kind: AgentKind,
    spec: &SpawnSpec,
    bounds: Bounds,
    rng: &mut R,
) -> AgentState {
    let position = Vec2::new(
        pick(rng, spec.x_band) * bounds.width,
        pick(rng, spec.y_band) * bounds.height,
    );
    let mut agent = AgentState::new(id, kind, position);

    let drift_speed = pick(rng, spec.drift_speed);
    agent.drift = match spec.drift_axis {
        DriftAxis::None => Vec2::ZERO,
        DriftAxis::Horizontal => {
            let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            Vec2::new(sign * drift_speed, 0.0)
        }
        DriftAxis::Up => Vec2::new(0.0, -drift_speed),
        DriftAxis::Any => {
            let heading = rng.gen_range(0.0..std::f32::consts::TAU);
            Vec2::new(heading.cos(), heading.sin()) * drift_speed
        }
    };

    agent.max_speed = pick(rng, spec.max_speed).max(0.0);
    agent.awareness = pick(rng, spec.awareness).max(0.0);
    agent.timidity = pick(rng, spec.timidity);
    agent.depth = pick(rng, spec.depth).clamp(0.0, 1.0);
    agent.hue = pick(rng, spec.hue);
    agent.size = pick(rng, spec.size);
    agent.opacity = pick(rng, spec.opacity).clamp(0.0, 1.0);
    agent.phase = rng.gen_range(0.0..std::f32::consts::TAU);
    if spec.anchored {
        agent.home = Some(position);
    }
    agent
}

/// Lay out one word of letters. Each letter's home is its slot in the
/// word; it starts slightly scattered around the word origin and springs
/// into place. Ids run from `first_id` upward.
pub fn spawn_word<R: Rng + ?Sized>(
    word: &str,
    group: u64,
    first_id: u64,
    spec: &SpawnSpec,
    bounds: Bounds,
    rng: &mut R,
) -> Vec<AgentState> {
    const PADDING: f32 = 100.0;
    let origin = Vec2::new(
        pick(rng, (PADDING, (bounds.width - PADDING).max(PADDING))),
        pick(rng, (PADDING, (bounds.height - PADDING).max(PADDING))),
    );
    let base_hue = pick(rng, (0.0, 360.0));

    let mut slot_x = origin.x;
    word.chars()
        .enumerate()
        .map(|(i, glyph)| {
            let mut letter = spawn_agent(
                first_id + i as u64,
                AgentKind::Letter,
                spec,
                bounds,
                rng,
            );
            letter.position = origin + Vec2::new(pick(rng, (-25.0, 25.0)), pick(rng, (-25.0, 25.0)));
            letter.velocity = Vec2::new(pick(rng, (-1.5, 1.5)), pick(rng, (-1.5, 1.5)));
            letter.home = Some(Vec2::new(slot_x, origin.y + pick(rng, (-10.0, 10.0))));
            letter.hue = (base_hue + i as f32 * 8.0).rem_euclid(360.0);
            letter.group = Some(group);
            letter.glyph = Some(glyph);
            slot_x += pick(rng, (35.0, 50.0));
            letter
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spawn_respects_ranges() {
        let spec = SpawnSpec {
            x_band: (0.2, 0.8),
            y_band: (0.5, 0.5),
            drift_axis: DriftAxis::Horizontal,
            drift_speed: (0.5, 1.5),
            max_speed: (1.0, 4.0),
            awareness: (150.0, 400.0),
            timidity: (0.3, 1.0),
            hue: (180.0, 220.0),
            ..SpawnSpec::default()
        };
        let bounds = Bounds {
            width: 1000.0,
            height: 500.0,
        };
        let mut rng = StdRng::seed_from_u64(42);
        for id in 0..200 {
            let a = spawn_agent(id, AgentKind::Seeker, &spec, bounds, &mut rng);
            assert!((200.0..=800.0).contains(&a.position.x), "x={}", a.position.x);
            assert_eq!(a.position.y, 250.0);
            assert!((1.0..=4.0).contains(&a.max_speed));
            assert!((150.0..=400.0).contains(&a.awareness));
            assert!((180.0..=220.0).contains(&a.hue));
            assert!((0.5..=1.5).contains(&a.drift.x.abs()));
            assert_eq!(a.drift.y, 0.0);
            assert!(a.home.is_none());
        }
    }

    #[test]
    fn anchored_agents_remember_spawn_point() {
        let spec = SpawnSpec {
            anchored: true,
            ..SpawnSpec::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let a = spawn_agent(0, AgentKind::Watcher, &spec, Bounds::default(), &mut rng);
        assert_eq!(a.home, Some(a.position));
    }

    #[test]
    fn word_letters_share_a_group_and_line_up() {
        let mut rng = StdRng::seed_from_u64(5);
        let spec = SpawnSpec {
            anchored: true,
            awareness: (150.0, 150.0),
            ..SpawnSpec::default()
        };
        let letters = spawn_word("GLOW", 7, 100, &spec, Bounds::default(), &mut rng);
        assert_eq!(letters.len(), 4);
        let glyphs: String = letters.iter().filter_map(|l| l.glyph).collect();
        assert_eq!(glyphs, "GLOW");
        assert!(letters.iter().all(|l| l.group == Some(7)));
        assert_eq!(letters[3].id, 103);
        let homes: Vec<f32> = letters.iter().filter_map(|l| l.home.map(|h| h.x)).collect();
        assert!(homes.windows(2).all(|w| w[1] - w[0] > 34.9 && w[1] - w[0] < 50.1));
    }

    #[test]
    fn reversed_range_is_reordered() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let v = pick(&mut rng, (5.0, 2.0));
            assert!((2.0..=5.0).contains(&v));
        }
    }
}
