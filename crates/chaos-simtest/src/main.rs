//! Chaos Playground Headless Harness
//!
//! Runs every scene for a few simulated minutes against an in-memory store
//! and checks the engine's invariants. No renderer, no browser, no files
//! outside the temp dir.
//!
//! Usage:
//!   cargo run -p chaos-simtest
//!   cargo run -p chaos-simtest -- --verbose
//!   RUST_LOG=debug cargo run -p chaos-simtest

use std::f32::consts::TAU;

use chaos_core::prelude::*;
use chaos_core::store::{load_profile, save_profile_atomic};
use chaos_logic::familiarity::{self, FamiliarityState};
use chaos_logic::population::parameterize;
use chaos_logic::scene::{validate_config, SceneConfig};
use chaos_logic::steering::{wrap, Bounds};
use chaos_logic::vector::Vec2;
use chaos_logic::wave::WaveState;
use tracing::info;

/// Simulated time per scene.
const SCENE_MINUTES: f64 = 3.0;
const FRAME_MS: f64 = 16.0;
const SPEED_EPSILON: f32 = 1e-3;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    init_tracing();
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Chaos Playground Harness ===\n");

    let mut results = Vec::new();

    // 1. Built-in scene tables
    results.extend(validate_scene_tables(verbose));

    // 2. Familiarity resolver and wave
    results.extend(validate_familiarity(verbose));

    // 3. Every scene, a few minutes each
    results.extend(validate_scene_runs(verbose));

    // 4. Visits through the installation
    results.extend(validate_installation(verbose));

    // 5. Profile persistence
    results.extend(validate_persistence(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn seeded_config() -> EngineConfig {
    EngineConfig {
        seed: Some(0xC4A0_5EED),
        ..EngineConfig::default()
    }
}

// ── 1. Scene Tables ─────────────────────────────────────────────────────

fn validate_scene_tables(verbose: bool) -> Vec<TestResult> {
    println!("--- Scene Tables ---");
    let mut results = Vec::new();

    let mut invalid = Vec::new();
    for scene in SceneId::ALL {
        let errors = validate_config(&SceneConfig::builtin(scene));
        if !errors.is_empty() {
            invalid.push(format!("{scene}: {errors:?}"));
        }
    }
    results.push(TestResult {
        name: "tables_valid".into(),
        passed: invalid.is_empty(),
        detail: if invalid.is_empty() {
            format!("{} built-in scenes validate", SceneId::ALL.len())
        } else {
            invalid.join("; ")
        },
    });

    // Counts never shrink as familiarity grows and never pass their cap
    let mut violations = Vec::new();
    for scene in SceneId::ALL {
        let config = SceneConfig::builtin(scene);
        for rule in &config.population.counts {
            let mut prev = 0;
            for step in 0..=48 {
                let f = step as f64 * 0.25;
                let n = rule.eval(f);
                if n < prev || n > rule.cap {
                    violations.push(format!("{scene}/{:?} at f={f}: {n}", rule.kind));
                }
                prev = n;
            }
        }
    }
    results.push(TestResult {
        name: "tables_counts_monotone".into(),
        passed: violations.is_empty(),
        detail: if violations.is_empty() {
            "every count rule is monotone and capped".into()
        } else {
            violations.join("; ")
        },
    });

    let aquarium = SceneConfig::builtin(SceneId::Aquarium);
    let low = parameterize(1.0, &aquarium);
    let high = parameterize(8.0, &aquarium);
    results.push(TestResult {
        name: "tables_aquarium_attraction".into(),
        passed: low.attraction_strength == 0.0 && high.attraction_strength > 0.9,
        detail: format!(
            "attraction {:.2} at f=1, {:.2} at f=8",
            low.attraction_strength, high.attraction_strength
        ),
    });

    if verbose {
        for scene in SceneId::ALL {
            let p = parameterize(3.0, &SceneConfig::builtin(scene));
            println!("  {:<11} f=3 -> {} agents, flags {:?}", scene.as_str(), p.count(), p.unlock_flags);
        }
    }

    results
}

// ── 2. Familiarity ──────────────────────────────────────────────────────

fn validate_familiarity(_verbose: bool) -> Vec<TestResult> {
    println!("--- Familiarity ---");
    let mut results = Vec::new();

    let overridden = FamiliarityState {
        raw_visit_count: 5,
        debug_override: Some(1),
        oscillator: None,
    };
    let f = familiarity::resolve(&overridden, 0.0);
    results.push(TestResult {
        name: "familiarity_override_wins".into(),
        passed: f == 1.0,
        detail: format!("raw=5 override=1 resolved to {f}"),
    });

    let wave = WaveState::starting_at_trough(1.0, 8.0, 2_700_000.0, 1_000.0);
    let start = wave.sample(1_000.0);
    let crest = wave.sample(1_000.0 + 1_350_000.0);
    results.push(TestResult {
        name: "wave_trough_then_crest".into(),
        passed: (start - 1.0).abs() < 1e-9 && (crest - 8.0).abs() < 1e-9,
        detail: format!("start {start:.4}, half period {crest:.4}"),
    });

    let mut bounded = true;
    let mut periodic = true;
    for i in 0..500 {
        let t = i as f64 * 13_337.0;
        let v = wave.sample(t);
        if !(1.0..=8.0).contains(&v) {
            bounded = false;
        }
        if (v - wave.sample(t + 2_700_000.0)).abs() > 1e-6 {
            periodic = false;
        }
    }
    results.push(TestResult {
        name: "wave_bounded_periodic".into(),
        passed: bounded && periodic,
        detail: format!("bounded={bounded} periodic={periodic}"),
    });

    results
}

// ── 3. Scene Runs ───────────────────────────────────────────────────────

/// Pointer path: a slow circle around the middle of the viewport.
fn pointer_at(bounds: Bounds, t_ms: f64) -> Vec2 {
    let a = (t_ms / 4_000.0) as f32 * TAU;
    Vec2::new(
        bounds.width / 2.0 + a.cos() * bounds.width * 0.3,
        bounds.height / 2.0 + a.sin() * bounds.height * 0.3,
    )
}

fn validate_scene_runs(verbose: bool) -> Vec<TestResult> {
    println!("--- Scene Runs ---");
    let mut results = Vec::new();
    let config = seeded_config();
    let frames = (SCENE_MINUTES * 60_000.0 / FRAME_MS) as usize;

    for scene in SceneId::ALL {
        let mut engine = SceneEngine::builtin(scene, &config);
        let mut profile = ProfileSnapshot::new(0);
        profile.begin_session(0);
        for _ in 0..4 {
            profile.record_scene_enter(scene);
        }
        engine.mount(0.0, Visit::new(profile, 0, 14));

        let bounds = config.viewport;
        let mut now = 0.0;
        let mut over_speed = 0usize;
        let mut non_finite = 0usize;
        let mut peak_agents = 0usize;
        for frame in 0..frames {
            now += FRAME_MS;
            if frame % 3 == 0 {
                let p = pointer_at(bounds, now);
                engine.set_pointer(p.x, p.y);
            }
            engine.frame(now);
            let agents = engine.agents();
            peak_agents = peak_agents.max(agents.len());
            for a in &agents {
                if a.speed() > a.max_speed + SPEED_EPSILON {
                    over_speed += 1;
                }
                if !a.position.is_finite() || !a.velocity.is_finite() {
                    non_finite += 1;
                }
            }
        }

        results.push(TestResult {
            name: format!("run_{}_speed_cap", scene.as_str()),
            passed: over_speed == 0,
            detail: format!("{over_speed} over-speed samples, peak {peak_agents} agents"),
        });
        results.push(TestResult {
            name: format!("run_{}_finite", scene.as_str()),
            passed: non_finite == 0,
            detail: format!("{non_finite} non-finite samples"),
        });

        let extra = match scene {
            SceneId::Typography => Some((
                engine.word_count() > 0,
                format!("{} words on screen", engine.word_count()),
            )),
            SceneId::Console => Some((
                engine.signals().transcript.len() >= 5,
                format!("{} transcript lines", engine.signals().transcript.len()),
            )),
            SceneId::Abyss => Some((
                engine.tendrils().len() == 8,
                format!("{} tendrils", engine.tendrils().len()),
            )),
            _ => None,
        };
        if let Some((passed, detail)) = extra {
            results.push(TestResult {
                name: format!("run_{}_extras", scene.as_str()),
                passed,
                detail,
            });
        }

        engine.unmount();
        let released = engine.agent_count() == 0 && engine.pending_timers() == 0;
        results.push(TestResult {
            name: format!("run_{}_unmount", scene.as_str()),
            passed: released && engine.frame(now + FRAME_MS).is_none(),
            detail: "world and timers released".into(),
        });

        if verbose {
            info!(scene = scene.as_str(), frames, peak_agents, "scene run finished");
        }
    }

    let bounds = Bounds::default();
    let wrapped = wrap(Vec2::new(-51.0, 100.0), bounds, 50.0);
    results.push(TestResult {
        name: "wrap_left_to_right".into(),
        passed: wrapped.x > bounds.width - 50.0,
        detail: format!("x=-51 wrapped to {:.1}", wrapped.x),
    });

    results
}

// ── 4. Installation ─────────────────────────────────────────────────────

fn validate_installation(_verbose: bool) -> Vec<TestResult> {
    println!("--- Installation ---");
    let mut results = Vec::new();

    let clock = FixedClock {
        now_ms: 1_700_000_000_000,
        hour: 21,
    };
    let mut inst = Installation::new(
        seeded_config(),
        Box::new(MemoryStore::new(clock.now_ms)),
        Box::new(clock),
    );

    let mut deer = Vec::new();
    for _ in 0..3 {
        let engine = inst.enter(SceneId::Forest, 0.0);
        deer.push(engine.params().has("deer"));
        inst.leave();
    }
    results.push(TestResult {
        name: "install_third_visit_unlocks".into(),
        passed: deer == [false, false, true],
        detail: format!("deer flag per visit: {deer:?}"),
    });

    let mut now = 0.0;
    inst.enter(SceneId::Pet, now);
    while now < 5_000.0 {
        now += FRAME_MS;
        inst.frame(now);
    }
    let seconds = inst.profile().time_in(SceneId::Pet);
    results.push(TestResult {
        name: "install_room_time".into(),
        passed: (4..=5).contains(&seconds),
        detail: format!("{seconds}s recorded for 5s in the pet room"),
    });

    inst.set_debug_override(Some(8));
    let f = inst.enter(SceneId::Aquarium, now).familiarity();
    results.push(TestResult {
        name: "install_debug_override".into(),
        passed: f == 8.0,
        detail: format!("aquarium familiarity {f} under override 8"),
    });

    let accepted = inst.set_focus_mode(true, now);
    inst.frame(now + FRAME_MS);
    inst.frame(now + 2.0 * FRAME_MS);
    let attraction = inst.engine().map(|e| e.params().attraction_strength);
    results.push(TestResult {
        name: "install_focus_mode_passive".into(),
        passed: accepted && attraction == Some(0.0),
        detail: format!("focus mode accepted={accepted}, attraction {attraction:?}"),
    });

    results
}

// ── 5. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(_verbose: bool) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();
    let dir = std::env::temp_dir().join(format!("chaos-simtest-{}", std::process::id()));
    let path = dir.join("profile.json");

    let mut profile = ProfileSnapshot::new(1_000);
    profile.begin_session(2_000);
    profile.record_scene_enter(SceneId::Abyss);
    profile.tick(Some(SceneId::Abyss));

    let round_trip = save_profile_atomic(&path, &profile)
        .and_then(|()| load_profile(&path, 0))
        .map(|loaded| loaded == profile);
    results.push(TestResult {
        name: "persist_round_trip".into(),
        passed: matches!(round_trip, Ok(true)),
        detail: match &round_trip {
            Ok(same) => format!("identical after reload: {same}"),
            Err(e) => format!("save/load failed: {e}"),
        },
    });

    let wire = serde_json::to_value(&profile).map(|v| v.get("roomVisits").is_some());
    results.push(TestResult {
        name: "persist_camel_case".into(),
        passed: matches!(wire, Ok(true)),
        detail: "profile serializes with camelCase keys".into(),
    });

    let corrupt = dir.join("corrupt.json");
    let wrote = std::fs::write(&corrupt, "{ not json").is_ok();
    let store = JsonFileStore::open(&corrupt, 5_000);
    let zeroed = store.snapshot().total_visits == 0;
    results.push(TestResult {
        name: "persist_corrupt_falls_back".into(),
        passed: wrote && zeroed,
        detail: "corrupt file yields a zeroed profile".into(),
    });

    let _ = std::fs::remove_dir_all(&dir);
    results
}
