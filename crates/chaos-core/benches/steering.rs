use chaos_core::prelude::*;
use chaos_logic::scene::SceneConfig;
use chaos_logic::steering::{step, Bounds, StepContext};
use chaos_logic::vector::Vec2;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn mounted_abyss(config: &EngineConfig) -> SceneEngine {
    let mut engine = SceneEngine::builtin(SceneId::Abyss, config);
    engine.mount(0.0, Visit::new(ProfileSnapshot::new(0), 0, 12));
    engine
}

fn bench_steering(c: &mut Criterion) {
    let config = EngineConfig {
        seed: Some(0xBEEF),
        ..EngineConfig::default()
    };
    let scene = SceneConfig::builtin(SceneId::Abyss);
    let pool = mounted_abyss(&config).agents();
    let ctx = StepContext {
        pointer: Some(Vec2::new(640.0, 400.0)),
        pointer_speed: 4.0,
        attraction: 1.0,
        interactive: true,
        ..StepContext::passive(16.0, Bounds::default())
    };

    let mut group = c.benchmark_group("steering");
    group.bench_function("abyss_step_40", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| step(&pool, &ctx, &scene.profiles, &mut rng));
    });

    group.bench_function("abyss_frame_engine", |b| {
        b.iter_batched(
            || {
                let mut engine = mounted_abyss(&config);
                engine.frame(0.0);
                engine
            },
            |mut engine| {
                let mut now = 0.0;
                for _ in 0..60 {
                    now += 16.0;
                    engine.set_pointer(640.0 + now as f32 * 0.1, 400.0);
                    engine.frame(now);
                }
                engine
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_steering);
criterion_main!(benches);
