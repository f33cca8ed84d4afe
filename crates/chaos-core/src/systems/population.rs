//! Population system - grows and shrinks counted kinds to their targets

use chaos_logic::constants::AgentKind;
use chaos_logic::population::PopulationParameters;
use chaos_logic::scene::SceneConfig;
use chaos_logic::spawn::{spawn_agent, SpawnSpec};
use chaos_logic::steering::Bounds;
use hecs::{Entity, World};
use rand::Rng;

use crate::components::AgentState;

/// What a resize did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationChange {
    pub spawned: usize,
    pub removed: usize,
}

impl PopulationChange {
    pub fn is_empty(&self) -> bool {
        self.spawned == 0 && self.removed == 0
    }
}

/// Live agents of `kind`, oldest first.
pub fn agents_of_kind(world: &World, kind: AgentKind) -> Vec<(Entity, u64)> {
    let mut found: Vec<(Entity, u64)> = world
        .query::<&AgentState>()
        .iter()
        .filter(|(_, a)| a.kind == kind)
        .map(|(entity, a)| (entity, a.id))
        .collect();
    found.sort_by_key(|(_, id)| *id);
    found
}

/// Bring every counted kind to `params.counts`. New agents take ids from
/// `next_id`; surplus agents are removed newest first.
pub fn resize_population<R: Rng + ?Sized>(
    world: &mut World,
    config: &SceneConfig,
    params: &PopulationParameters,
    bounds: Bounds,
    next_id: &mut u64,
    rng: &mut R,
) -> PopulationChange {
    let mut change = PopulationChange::default();
    let fallback = SpawnSpec::default();

    let mut kinds: Vec<AgentKind> = config.population.counts.iter().map(|r| r.kind).collect();
    kinds.sort();
    kinds.dedup();

    for kind in kinds {
        let existing = agents_of_kind(world, kind);
        let target = params.count_of(kind) as usize;

        if existing.len() < target {
            let spec = config.spawns.get(&kind).unwrap_or(&fallback);
            for _ in existing.len()..target {
                let agent = spawn_agent(*next_id, kind, spec, bounds, rng);
                *next_id += 1;
                world.spawn((agent,));
                change.spawned += 1;
            }
        } else if existing.len() > target {
            for (entity, _) in existing.iter().skip(target).rev() {
                if world.despawn(*entity).is_ok() {
                    change.removed += 1;
                }
            }
        }
    }

    if !change.is_empty() {
        log::debug!(
            "{}: population +{} -{} (familiarity {:.2})",
            config.id,
            change.spawned,
            change.removed,
            params.familiarity
        );
    }
    change
}

/// Remove every agent, word, tendril and leviathan.
pub fn clear_world(world: &mut World) -> usize {
    let n = world.len() as usize;
    world.clear();
    n
}
