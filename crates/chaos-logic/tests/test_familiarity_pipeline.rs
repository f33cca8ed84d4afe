//! Integration tests for the profile → familiarity → population → steering
//! pipeline.
//!
//! All tests are pure logic: no ECS world, no clock, no storage backend.

use std::collections::BTreeMap;

use chaos_logic::constants::{AgentKind, SceneId};
use chaos_logic::familiarity::{resolve, FamiliarityState};
use chaos_logic::population::parameterize;
use chaos_logic::profile::ProfileSnapshot;
use chaos_logic::scene::SceneConfig;
use chaos_logic::spawn::spawn_agent;
use chaos_logic::steering::{step, Bounds, StepContext};
use chaos_logic::vector::Vec2;
use chaos_logic::wave::WaveState;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ────────────────────────────────────────────────────────────

fn familiarity_for(profile: &ProfileSnapshot, scene: SceneId) -> f64 {
    let state = FamiliarityState::from_visits(profile.visits_to(scene) as u32);
    resolve(&state, 0.0)
}

// ── Pipeline ───────────────────────────────────────────────────────────

#[test]
fn three_visits_unlock_a_threshold_three_flag() {
    let forest = SceneConfig::builtin(SceneId::Forest);
    let mut profile = ProfileSnapshot::new(0);

    profile.record_scene_enter(SceneId::Forest);
    profile.record_scene_enter(SceneId::Forest);
    let f = familiarity_for(&profile, SceneId::Forest);
    assert_eq!(f, 2.0);
    assert!(!parameterize(f, &forest).has("deer"));

    profile.record_scene_enter(SceneId::Forest);
    let f = familiarity_for(&profile, SceneId::Forest);
    assert_eq!(f, 3.0);
    assert!(parameterize(f, &forest).has("deer"));
}

#[test]
fn debug_override_wins_over_visits() {
    let state = FamiliarityState {
        raw_visit_count: 5,
        debug_override: Some(1),
        oscillator: None,
    };
    assert_eq!(resolve(&state, 0.0), 1.0);
}

#[test]
fn focus_wave_moves_population_both_ways() {
    let aquarium = SceneConfig::builtin(SceneId::Aquarium);
    let wave = WaveState::starting_at_trough(1.0, 8.0, 2_700_000.0, 0.0);
    let state = FamiliarityState {
        raw_visit_count: 0,
        debug_override: None,
        oscillator: Some(wave),
    };

    let low = parameterize(resolve(&state, 0.0), &aquarium);
    let high = parameterize(resolve(&state, 1_350_000.0), &aquarium);
    let low_again = parameterize(resolve(&state, 2_700_000.0), &aquarium);

    assert_eq!(low.count_of(AgentKind::Fish), 8);
    assert_eq!(high.count_of(AgentKind::Fish), 20);
    assert!(high.has("rare_creature"));
    assert!(!low_again.has("rare_creature"));
    assert_eq!(low_again.count(), low.count());
}

#[test]
fn abyss_pool_respects_speed_cap_for_many_frames() {
    let abyss = SceneConfig::builtin(SceneId::Abyss);
    let params = parameterize(0.0, &abyss);
    let bounds = Bounds::default();
    let mut rng = StdRng::seed_from_u64(2024);

    let spec = &abyss.spawns[&AgentKind::Seeker];
    let mut pool: Vec<_> = (0..params.count_of(AgentKind::Seeker) as u64)
        .map(|id| spawn_agent(id, AgentKind::Seeker, spec, bounds, &mut rng))
        .collect();

    let profiles: BTreeMap<_, _> = abyss.profiles.clone();
    for frame in 0..600 {
        // Sweep the light around, sometimes flicking it fast.
        let angle = frame as f32 * 0.05;
        let pointer = Vec2::new(640.0 + angle.cos() * 300.0, 400.0 + angle.sin() * 200.0);
        let ctx = StepContext {
            dt_ms: if frame % 50 == 0 { 400.0 } else { 16.0 },
            bounds,
            pointer: Some(pointer),
            pointer_speed: if frame % 7 == 0 { 30.0 } else { 2.0 },
            attraction: params.attraction_strength,
            interactive: true,
            reach: None,
            repulsors: &[],
        };
        pool = step(&pool, &ctx, &profiles, &mut rng);
        for a in &pool {
            assert!(a.speed() <= a.max_speed + 1e-4, "frame {frame}: {}", a.speed());
            assert!(a.position.is_finite());
            assert!(a.position.x >= -50.0 && a.position.x <= bounds.width + 50.0);
            assert!(a.position.y >= -50.0 && a.position.y <= bounds.height + 50.0);
            assert!((0.0..=1.0).contains(&a.glow));
        }
    }
}
