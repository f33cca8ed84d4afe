//! Steering and integration for every scene.
//!
//! Each agent gets exactly one drive per frame:
//!
//! | Drive | When | Force |
//! |-------|------|-------|
//! | Orbit | pointer closer than `close_radius` | tangential, `perp(d)/dist · orbit_force` |
//! | Seek | within awareness, calm pointer, attraction > 0 | `d/dist · seek_force · attraction` |
//! | Flee | within awareness, pointer faster than the startle speed | `-d/dist · flee_force` |
//! | Wander | anything else | jitter + drift |
//!
//! Skittish agents (letters) skip orbit and seek and flee with a linear
//! falloff instead. Home springs, repulsors, soft containment, glow, hue
//! and phase always apply.
//!
//! Integration with `k = dt / 16`:
//! ```text
//! v' = (v + F·k) · friction^k      then capped at max_speed
//! p' = p + v'·k                    then wrapped / contained
//! ```
//! At the reference 16 ms frame this is exactly `(v + F) · friction`.

use std::collections::BTreeMap;
use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::agent::AgentState;
use crate::constants::timing::{DISTANCE_EPSILON, MAX_STEP_MS, REFERENCE_FRAME_MS};
use crate::constants::AgentKind;
use crate::vector::Vec2;

/// How an agent reacts to the pointer at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Temperament {
    /// Orbit / seek / flee / wander.
    Curious,
    /// Flee with falloff inside awareness, otherwise wander.
    Skittish,
}

/// What drives the periodic animation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseMode {
    /// Advance proportionally to speed (tails, legs).
    Speed,
    /// Advance at a constant rate (pulsing bells, blinking).
    Time,
}

/// Viewport edge behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EdgePolicy {
    /// Torus: leave past the margin, reappear past the opposite margin.
    Wrap { margin: f32 },
    /// Velocity nudge back inside when closer than `inset` to an edge.
    Contain { inset: f32, push: f32 },
    /// No edge handling.
    Free,
}

/// Occasional re-pick of the home point, e.g. deer pacing the treeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Retarget {
    /// Chance per reference frame.
    pub chance: f32,
    /// New home x as a fraction band of the viewport width.
    pub x_band: (f32, f32),
}

/// Glow response per reference frame for each drive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlowResponse {
    /// Value glow snaps to while orbiting.
    pub orbit: f32,
    pub seek: f32,
    pub flee: f32,
    pub wander: f32,
}

impl Default for GlowResponse {
    fn default() -> Self {
        Self {
            orbit: 1.0,
            seek: 0.02,
            flee: -0.1,
            wander: -0.01,
        }
    }
}

/// Behavior weights for one agent kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteeringProfile {
    pub temperament: Temperament,
    pub close_radius: f32,
    pub seek_force: f32,
    /// Seek strength falls linearly to zero at `awareness · seek_falloff`.
    #[serde(default)]
    pub seek_falloff: Option<f32>,
    pub flee_force: f32,
    pub orbit_force: f32,
    /// Pointer speed (scaled by timidity) above which the agent flees.
    /// `None` never startles.
    #[serde(default)]
    pub startle_speed: Option<f32>,
    /// When the scene publishes a reach radius, awareness becomes
    /// `reach · factor`.
    #[serde(default)]
    pub reach_awareness: Option<f32>,
    pub wander_jitter: f32,
    pub home_strength: f32,
    #[serde(default)]
    pub retarget: Option<Retarget>,
    /// Chance per reference frame to reverse the drift direction.
    #[serde(default)]
    pub flip_chance: f32,
    pub friction: f32,
    pub phase_rate: f32,
    pub phase_mode: PhaseMode,
    pub hue_drift: f32,
    #[serde(default)]
    pub glow: GlowResponse,
    pub edges: EdgePolicy,
}

impl Default for SteeringProfile {
    fn default() -> Self {
        Self {
            temperament: Temperament::Curious,
            close_radius: 0.0,
            seek_force: 0.0,
            seek_falloff: None,
            flee_force: 0.0,
            orbit_force: 0.0,
            startle_speed: None,
            reach_awareness: None,
            wander_jitter: 0.1,
            home_strength: 0.0,
            retarget: None,
            flip_chance: 0.0,
            friction: 0.98,
            phase_rate: 0.05,
            phase_mode: PhaseMode::Time,
            hue_drift: 0.0,
            glow: GlowResponse::default(),
            edges: EdgePolicy::Wrap { margin: 50.0 },
        }
    }
}

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// A pushing body such as the leviathan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repulsor {
    pub position: Vec2,
    pub radius: f32,
    pub strength: f32,
}

/// Everything one frame of steering reads besides the agents themselves.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub dt_ms: f32,
    pub bounds: Bounds,
    /// Latest pointer sample, already clamped near the viewport.
    pub pointer: Option<Vec2>,
    pub pointer_speed: f32,
    pub attraction: f32,
    /// False in focus / passive mode: everyone wanders.
    pub interactive: bool,
    pub reach: Option<f32>,
    pub repulsors: &'a [Repulsor],
}

impl<'a> StepContext<'a> {
    pub fn passive(dt_ms: f32, bounds: Bounds) -> Self {
        Self {
            dt_ms,
            bounds,
            pointer: None,
            pointer_speed: 0.0,
            attraction: 0.0,
            interactive: false,
            reach: None,
            repulsors: &[],
        }
    }
}

/// The drive that won for an agent this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drive {
    Orbit,
    Seek,
    Flee,
    Wander,
}

/// Clamp a frame delta into `[0, MAX_STEP_MS]`. Non-finite deltas are 0.
pub fn clamp_dt(dt_ms: f32) -> f32 {
    if dt_ms.is_finite() {
        dt_ms.clamp(0.0, MAX_STEP_MS)
    } else {
        0.0
    }
}

fn awareness_of(agent: &AgentState, profile: &SteeringProfile, ctx: &StepContext) -> f32 {
    match (ctx.reach, profile.reach_awareness) {
        (Some(reach), Some(factor)) => reach * factor,
        _ => agent.awareness,
    }
}

/// Pick the single drive for `agent`.
pub fn select_drive(agent: &AgentState, profile: &SteeringProfile, ctx: &StepContext) -> Drive {
    let pointer = match ctx.pointer {
        Some(p) if ctx.interactive => p,
        _ => return Drive::Wander,
    };
    let dist = agent.position.distance(&pointer);
    let awareness = awareness_of(agent, profile, ctx);
    if dist >= awareness {
        return Drive::Wander;
    }

    match profile.temperament {
        Temperament::Skittish => Drive::Flee,
        Temperament::Curious => {
            let startled = profile
                .startle_speed
                .is_some_and(|s| ctx.pointer_speed > s * agent.timidity);
            if dist < profile.close_radius {
                Drive::Orbit
            } else if !startled && ctx.attraction > 0.0 {
                Drive::Seek
            } else if startled {
                Drive::Flee
            } else {
                Drive::Wander
            }
        }
    }
}

fn drive_force<R: Rng + ?Sized>(
    agent: &AgentState,
    profile: &SteeringProfile,
    ctx: &StepContext,
    drive: Drive,
    rng: &mut R,
) -> Vec2 {
    let to_pointer = match ctx.pointer {
        Some(p) => p - agent.position,
        None => Vec2::ZERO,
    };
    let dist = to_pointer.length().max(DISTANCE_EPSILON);
    let dir = to_pointer * (1.0 / dist);

    match drive {
        Drive::Orbit => to_pointer.perp() * (profile.orbit_force / dist),
        Drive::Seek => {
            let shape = match profile.seek_falloff {
                Some(span) => {
                    let reach = awareness_of(agent, profile, ctx) * span;
                    if reach > 0.0 {
                        (1.0 - dist / reach).max(0.0)
                    } else {
                        0.0
                    }
                }
                None => 1.0,
            };
            dir * (profile.seek_force * ctx.attraction * shape)
        }
        Drive::Flee => {
            let scale = match profile.temperament {
                Temperament::Skittish => {
                    let awareness = awareness_of(agent, profile, ctx).max(DISTANCE_EPSILON);
                    ((awareness - dist) / awareness).max(0.0)
                }
                Temperament::Curious => 1.0,
            };
            -dir * (profile.flee_force * scale)
        }
        Drive::Wander => {
            let half = profile.wander_jitter * 0.5;
            let jitter = if half > 0.0 {
                Vec2::new(rng.gen_range(-half..=half), rng.gen_range(-half..=half))
            } else {
                Vec2::ZERO
            };
            jitter + agent.drift
        }
    }
}

fn repulsion(position: Vec2, repulsors: &[Repulsor]) -> Vec2 {
    let mut force = Vec2::ZERO;
    for r in repulsors {
        let away = position - r.position;
        let dist = away.length().max(DISTANCE_EPSILON);
        if dist < r.radius {
            force += away * ((1.0 - dist / r.radius) * r.strength / dist);
        }
    }
    force
}

fn containment(position: Vec2, bounds: Bounds, edges: EdgePolicy) -> Vec2 {
    match edges {
        EdgePolicy::Contain { inset, push } => {
            let mut f = Vec2::ZERO;
            if position.x < inset {
                f.x += push;
            } else if position.x > bounds.width - inset {
                f.x -= push;
            }
            if position.y < inset {
                f.y += push;
            } else if position.y > bounds.height - inset {
                f.y -= push;
            }
            f
        }
        _ => Vec2::ZERO,
    }
}

fn wrap_axis(value: f32, extent: f32, margin: f32) -> f32 {
    if value >= -margin && value <= extent + margin {
        return value;
    }
    let span = extent + 2.0 * margin;
    if span <= 0.0 {
        return value;
    }
    (value + margin).rem_euclid(span) - margin
}

/// Torus wrap of a position against the viewport plus margin.
pub fn wrap(position: Vec2, bounds: Bounds, margin: f32) -> Vec2 {
    Vec2::new(
        wrap_axis(position.x, bounds.width, margin),
        wrap_axis(position.y, bounds.height, margin),
    )
}

/// Advance one agent. The input is left untouched.
pub fn step_agent<R: Rng + ?Sized>(
    agent: &AgentState,
    profile: &SteeringProfile,
    ctx: &StepContext,
    rng: &mut R,
) -> AgentState {
    let dt = clamp_dt(ctx.dt_ms);
    let k = dt / REFERENCE_FRAME_MS;
    let mut next = agent.clone();

    if let EdgePolicy::Wrap { margin } = profile.edges {
        next.position = wrap(next.position, ctx.bounds, margin);
    }

    // Secondary state changes that feed this frame's force.
    if k > 0.0 && profile.flip_chance > 0.0 && rng.gen::<f32>() < profile.flip_chance * k {
        next.drift.x = -next.drift.x;
    }
    if let EdgePolicy::Contain { inset, .. } = profile.edges {
        // Contained swimmers turn around at the glass.
        if (next.position.x < inset && next.drift.x < 0.0)
            || (next.position.x > ctx.bounds.width - inset && next.drift.x > 0.0)
        {
            next.drift.x = -next.drift.x;
        }
    }
    if let (Some(retarget), Some(home)) = (profile.retarget, next.home) {
        if k > 0.0 && rng.gen::<f32>() < retarget.chance * k {
            let (lo, hi) = retarget.x_band;
            let (lo, hi) = (lo.min(hi), lo.max(hi));
            let frac = if hi > lo { rng.gen_range(lo..hi) } else { lo };
            next.home = Some(Vec2::new(frac * ctx.bounds.width, home.y));
        }
    }

    let drive = select_drive(&next, profile, ctx);
    let mut force = drive_force(&next, profile, ctx, drive, rng);
    if let Some(home) = next.home {
        force += (home - next.position) * profile.home_strength;
    }
    force += repulsion(next.position, ctx.repulsors);
    force += containment(next.position, ctx.bounds, profile.edges);
    if !force.is_finite() {
        force = Vec2::ZERO;
    }

    // Integrate.
    let friction = profile.friction.clamp(0.0, 1.0);
    let damping = if k > 0.0 { friction.powf(k) } else { 1.0 };
    let max_speed = next.max_speed.max(0.0);
    next.velocity = ((next.velocity + force * k) * damping).clamp_length(max_speed);
    if !next.velocity.is_finite() {
        next.velocity = Vec2::ZERO;
    }
    next.position += next.velocity * k;

    if let EdgePolicy::Wrap { margin } = profile.edges {
        next.position = wrap(next.position, ctx.bounds, margin);
    }

    // Phase, hue and glow always advance.
    let phase_step = match profile.phase_mode {
        PhaseMode::Speed => next.velocity.length() * profile.phase_rate * k,
        PhaseMode::Time => profile.phase_rate * k,
    };
    next.phase = (next.phase + phase_step).rem_euclid(TAU);
    if profile.hue_drift != 0.0 {
        next.hue = (next.hue + profile.hue_drift * k).rem_euclid(360.0);
    }
    next.glow = match drive {
        Drive::Orbit => profile.glow.orbit,
        Drive::Seek => next.glow + profile.glow.seek * k,
        Drive::Flee => next.glow + profile.glow.flee * k,
        Drive::Wander => next.glow + profile.glow.wander * k,
    }
    .clamp(0.0, 1.0);

    next
}

/// Advance a whole pool. Every agent reads the same pre-frame snapshot.
pub fn step<R: Rng + ?Sized>(
    pool: &[AgentState],
    ctx: &StepContext,
    profiles: &BTreeMap<AgentKind, SteeringProfile>,
    rng: &mut R,
) -> Vec<AgentState> {
    let fallback = SteeringProfile::default();
    pool.iter()
        .map(|agent| {
            let profile = profiles.get(&agent.kind).unwrap_or(&fallback);
            step_agent(agent, profile, ctx, rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bounds() -> Bounds {
        Bounds {
            width: 800.0,
            height: 600.0,
        }
    }

    fn seeker_profile() -> SteeringProfile {
        SteeringProfile {
            close_radius: 40.0,
            seek_force: 0.08,
            flee_force: 0.5,
            orbit_force: 0.1,
            startle_speed: Some(15.0),
            wander_jitter: 0.1,
            friction: 0.98,
            phase_mode: PhaseMode::Speed,
            ..SteeringProfile::default()
        }
    }

    fn seeker_at(x: f32, y: f32) -> AgentState {
        let mut a = AgentState::new(1, AgentKind::Seeker, Vec2::new(x, y));
        a.awareness = 300.0;
        a.timidity = 1.0;
        a.max_speed = 3.0;
        a
    }

    fn ctx_with_pointer(pointer: Vec2, speed: f32) -> StepContext<'static> {
        StepContext {
            dt_ms: 16.0,
            bounds: bounds(),
            pointer: Some(pointer),
            pointer_speed: speed,
            attraction: 1.0,
            interactive: true,
            reach: None,
            repulsors: &[],
        }
    }

    #[test]
    fn drive_precedence() {
        let p = seeker_profile();
        let pointer = Vec2::new(400.0, 300.0);
        let calm = ctx_with_pointer(pointer, 0.0);
        let fast = ctx_with_pointer(pointer, 40.0);

        assert_eq!(select_drive(&seeker_at(420.0, 300.0), &p, &calm), Drive::Orbit);
        assert_eq!(select_drive(&seeker_at(420.0, 300.0), &p, &fast), Drive::Orbit);
        assert_eq!(select_drive(&seeker_at(500.0, 300.0), &p, &calm), Drive::Seek);
        assert_eq!(select_drive(&seeker_at(500.0, 300.0), &p, &fast), Drive::Flee);
        assert_eq!(select_drive(&seeker_at(790.0, 300.0), &p, &calm), Drive::Wander);
    }

    #[test]
    fn passive_mode_always_wanders() {
        let p = seeker_profile();
        let mut ctx = ctx_with_pointer(Vec2::new(400.0, 300.0), 0.0);
        ctx.interactive = false;
        assert_eq!(select_drive(&seeker_at(420.0, 300.0), &p, &ctx), Drive::Wander);
    }

    #[test]
    fn no_attraction_no_seek() {
        let p = seeker_profile();
        let mut ctx = ctx_with_pointer(Vec2::new(400.0, 300.0), 0.0);
        ctx.attraction = 0.0;
        assert_eq!(select_drive(&seeker_at(500.0, 300.0), &p, &ctx), Drive::Wander);
    }

    #[test]
    fn timidity_scales_startle_threshold() {
        let p = seeker_profile();
        let ctx = ctx_with_pointer(Vec2::new(400.0, 300.0), 10.0);
        let mut bold = seeker_at(500.0, 300.0);
        bold.timidity = 1.0;
        let mut shy = seeker_at(500.0, 300.0);
        shy.timidity = 0.3;
        assert_eq!(select_drive(&bold, &p, &ctx), Drive::Seek);
        assert_eq!(select_drive(&shy, &p, &ctx), Drive::Flee);
    }

    #[test]
    fn reference_frame_matches_plain_formula() {
        let mut p = seeker_profile();
        p.wander_jitter = 0.0;
        let mut a = seeker_at(500.0, 300.0);
        a.velocity = Vec2::new(1.0, 0.5);
        let ctx = ctx_with_pointer(Vec2::new(400.0, 300.0), 0.0);
        let mut rng = StdRng::seed_from_u64(1);
        let next = step_agent(&a, &p, &ctx, &mut rng);
        // Seek toward -x: F = (-0.08, 0)
        let expected = Vec2::new((1.0 - 0.08) * 0.98, 0.5 * 0.98);
        assert!((next.velocity.x - expected.x).abs() < 1e-5, "{:?}", next.velocity);
        assert!((next.velocity.y - expected.y).abs() < 1e-5, "{:?}", next.velocity);
        assert!((next.position.x - (500.0 + expected.x)).abs() < 1e-4);
    }

    #[test]
    fn speed_cap_is_hard() {
        let mut p = seeker_profile();
        p.seek_force = 50.0;
        p.friction = 1.0;
        let mut rng = StdRng::seed_from_u64(7);
        let ctx = ctx_with_pointer(Vec2::new(400.0, 300.0), 0.0);
        let mut a = seeker_at(600.0, 300.0);
        a.velocity = Vec2::new(-100.0, 80.0);
        for _ in 0..20 {
            a = step_agent(&a, &p, &ctx, &mut rng);
            assert!(a.speed() <= a.max_speed + 1e-4, "speed={}", a.speed());
        }
    }

    #[test]
    fn coincident_pointer_is_finite() {
        let p = seeker_profile();
        let ctx = ctx_with_pointer(Vec2::new(400.0, 300.0), 0.0);
        let mut rng = StdRng::seed_from_u64(3);
        let next = step_agent(&seeker_at(400.0, 300.0), &p, &ctx, &mut rng);
        assert!(next.position.is_finite());
        assert!(next.velocity.is_finite());
    }

    #[test]
    fn wrap_crosses_to_opposite_edge() {
        let p = seeker_profile();
        let ctx = StepContext::passive(16.0, bounds());
        let mut rng = StdRng::seed_from_u64(11);
        let a = seeker_at(-55.0, 300.0);
        let next = step_agent(&a, &p, &ctx, &mut rng);
        assert!(next.position.x > 800.0 - 50.0, "x={}", next.position.x);

        let a = seeker_at(400.0, 700.0);
        let next = step_agent(&a, &p, &ctx, &mut rng);
        assert!(next.position.y < 50.0, "y={}", next.position.y);
    }

    #[test]
    fn huge_dt_is_clamped() {
        let mut p = seeker_profile();
        p.friction = 1.0;
        p.wander_jitter = 0.0;
        let mut a = seeker_at(400.0, 300.0);
        a.velocity = Vec2::new(3.0, 0.0);
        let ctx = StepContext::passive(10_000.0, bounds());
        let mut rng = StdRng::seed_from_u64(0);
        let next = step_agent(&a, &p, &ctx, &mut rng);
        let moved = next.position.x - 400.0;
        assert!((moved - 3.0 * MAX_STEP_MS / REFERENCE_FRAME_MS).abs() < 1e-3, "moved={moved}");
    }

    #[test]
    fn clamp_dt_handles_garbage() {
        assert_eq!(clamp_dt(f32::NAN), 0.0);
        assert_eq!(clamp_dt(-5.0), 0.0);
        assert_eq!(clamp_dt(f32::INFINITY), 0.0);
        assert_eq!(clamp_dt(33.0), 33.0);
        assert_eq!(clamp_dt(900.0), MAX_STEP_MS);
    }

    #[test]
    fn orbit_is_tangential() {
        let p = seeker_profile();
        let ctx = ctx_with_pointer(Vec2::new(400.0, 300.0), 0.0);
        let mut rng = StdRng::seed_from_u64(5);
        let next = step_agent(&seeker_at(420.0, 300.0), &p, &ctx, &mut rng);
        // d = (-20, 0) so the tangent is (0, 20)/20.
        assert!(next.velocity.x.abs() < 1e-6);
        assert!(next.velocity.y > 0.0);
        assert_eq!(next.glow, 1.0);
    }

    #[test]
    fn skittish_letters_scatter_and_return() {
        let profile = SteeringProfile {
            temperament: Temperament::Skittish,
            flee_force: 12.0,
            home_strength: 0.015,
            wander_jitter: 0.0,
            friction: 0.94,
            edges: EdgePolicy::Contain {
                inset: 40.0,
                push: 0.5,
            },
            ..SteeringProfile::default()
        };
        let mut letter = AgentState::new(1, AgentKind::Letter, Vec2::new(300.0, 300.0));
        letter.awareness = 150.0;
        letter.max_speed = 40.0;
        letter.home = Some(Vec2::new(300.0, 300.0));
        let ctx = ctx_with_pointer(Vec2::new(250.0, 300.0), 0.0);
        let mut rng = StdRng::seed_from_u64(2);
        let pushed = step_agent(&letter, &profile, &ctx, &mut rng);
        assert!(pushed.velocity.x > 0.0, "letter should move away from pointer");

        let calm = StepContext::passive(16.0, bounds());
        let mut a = pushed;
        for _ in 0..600 {
            a = step_agent(&a, &profile, &calm, &mut rng);
        }
        assert!(a.position.distance(&Vec2::new(300.0, 300.0)) < 1.0, "{:?}", a.position);
    }

    #[test]
    fn contained_drift_turns_at_edge() {
        let profile = SteeringProfile {
            wander_jitter: 0.0,
            edges: EdgePolicy::Contain {
                inset: 60.0,
                push: 0.15,
            },
            ..SteeringProfile::default()
        };
        let mut fish = AgentState::new(1, AgentKind::Fish, Vec2::new(790.0, 300.0));
        fish.drift = Vec2::new(0.05, 0.0);
        fish.max_speed = 2.0;
        let ctx = StepContext::passive(16.0, bounds());
        let mut rng = StdRng::seed_from_u64(12);
        let next = step_agent(&fish, &profile, &ctx, &mut rng);
        assert!(next.drift.x < 0.0);
        assert!(next.velocity.x < 0.0);
    }

    #[test]
    fn repulsor_pushes_away() {
        let p = seeker_profile();
        let repulsors = [Repulsor {
            position: Vec2::new(100.0, 100.0),
            radius: 200.0,
            strength: 3.0,
        }];
        let mut ctx = StepContext::passive(16.0, bounds());
        ctx.repulsors = &repulsors;
        let mut a = seeker_at(150.0, 100.0);
        a.max_speed = 10.0;
        let mut rng = StdRng::seed_from_u64(4);
        let next = step_agent(&a, &p, &ctx, &mut rng);
        assert!(next.velocity.x > 1.0, "v={:?}", next.velocity);
    }

    #[test]
    fn step_leaves_input_untouched() {
        let pool = vec![seeker_at(10.0, 10.0), seeker_at(700.0, 500.0)];
        let before = pool.clone();
        let mut profiles = BTreeMap::new();
        profiles.insert(AgentKind::Seeker, seeker_profile());
        let ctx = ctx_with_pointer(Vec2::new(400.0, 300.0), 0.0);
        let mut rng = StdRng::seed_from_u64(9);
        let next = step(&pool, &ctx, &profiles, &mut rng);
        assert_eq!(pool, before);
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn phase_stays_in_range() {
        let mut p = seeker_profile();
        p.phase_mode = PhaseMode::Time;
        p.phase_rate = 2.5;
        let ctx = StepContext::passive(50.0, bounds());
        let mut rng = StdRng::seed_from_u64(6);
        let mut a = seeker_at(400.0, 300.0);
        for _ in 0..100 {
            a = step_agent(&a, &p, &ctx, &mut rng);
            assert!((0.0..TAU).contains(&a.phase), "phase={}", a.phase);
        }
    }
}
