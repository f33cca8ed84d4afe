//! Abyss systems - tendrils, the leviathan and the player's light

use chaos_logic::leviathan::{APPEAR_CHANCE, COOLDOWN_MS};
use chaos_logic::steering::{Bounds, Repulsor};
use chaos_logic::vector::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use crate::components::{AgentState, Leviathan, Tendril};

/// Light dims as the pointer moves faster, never below 0.3.
pub fn light_intensity(pointer_speed: f32) -> f32 {
    (1.0 - pointer_speed * 0.02).max(0.3)
}

pub fn spawn_tendrils<R: Rng + ?Sized>(
    world: &mut World,
    count: usize,
    bounds: Bounds,
    rng: &mut R,
) {
    for i in 0..count {
        world.spawn((Tendril::spawn(i, bounds, rng),));
    }
}

pub fn tendril_system(
    world: &mut World,
    pointer: Option<Vec2>,
    pointer_speed: f32,
    time_ms: f64,
    k: f32,
) {
    for (_, tendril) in world.query_mut::<&mut Tendril>() {
        tendril.advance(pointer, pointer_speed, time_ms, k);
    }
}

/// Tracks when the last leviathan left.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LeviathanWatch {
    pub last_departure_ms: f64,
}

impl LeviathanWatch {
    pub fn cooled_down(&self, now_ms: f64) -> bool {
        now_ms - self.last_departure_ms > COOLDOWN_MS
    }
}

pub fn leviathan_present(world: &World) -> bool {
    world.query::<&Leviathan>().iter().next().is_some()
}

/// Bring the leviathan in now unless one is already crossing.
pub fn summon_leviathan<R: Rng + ?Sized>(world: &mut World, bounds: Bounds, rng: &mut R) -> bool {
    if leviathan_present(world) {
        return false;
    }
    let lev = Leviathan::enter(bounds, rng);
    log::info!(
        "leviathan enters at y={:.0}, size {:.0}, heading {}",
        lev.position.y,
        lev.size,
        if lev.direction > 0.0 { "right" } else { "left" }
    );
    world.spawn((lev,));
    true
}

/// Roll for a spontaneous appearance once the cooldown has passed.
pub fn maybe_spawn_leviathan<R: Rng + ?Sized>(
    world: &mut World,
    watch: &LeviathanWatch,
    now_ms: f64,
    k: f32,
    bounds: Bounds,
    rng: &mut R,
) -> bool {
    if k <= 0.0 || !watch.cooled_down(now_ms) || leviathan_present(world) {
        return false;
    }
    let chance = (APPEAR_CHANCE * k).min(1.0) as f64;
    rng.gen_bool(chance) && summon_leviathan(world, bounds, rng)
}

/// Move the leviathan, retire it once it has crossed, and return the
/// repulsors for this frame's steering.
pub fn leviathan_system(
    world: &mut World,
    watch: &mut LeviathanWatch,
    bounds: Bounds,
    now_ms: f64,
    k: f32,
) -> Vec<Repulsor> {
    let mut gone: Vec<Entity> = Vec::new();
    let mut repulsors = Vec::new();
    for (entity, lev) in world.query_mut::<&mut Leviathan>() {
        lev.advance(bounds, k);
        if lev.is_gone(bounds) {
            gone.push(entity);
        } else {
            repulsors.push(lev.repulsor());
        }
    }
    if !gone.is_empty() {
        watch.last_departure_ms = now_ms;
        log::debug!("leviathan gone");
    }
    for entity in gone {
        let _ = world.despawn(entity);
    }
    repulsors
}

/// Agents caught inside a repulsor light up in fear.
pub fn fear_glow_system(world: &mut World, repulsors: &[Repulsor], k: f32) {
    if repulsors.is_empty() {
        return;
    }
    for (_, agent) in world.query_mut::<&mut AgentState>() {
        let inside = repulsors
            .iter()
            .any(|r| agent.position.distance(&r.position) < r.radius);
        if inside {
            agent.glow = (agent.glow + 0.1 * k).min(1.0);
        }
    }
}

/// Strongest light falling on any leviathan, `0..=1`.
pub fn leviathan_illumination(world: &World, light: Option<Vec2>) -> f32 {
    let Some(light) = light else {
        return 0.0;
    };
    world
        .query::<&Leviathan>()
        .iter()
        .map(|(_, lev)| lev.illumination(light))
        .fold(0.0, f32::max)
}
