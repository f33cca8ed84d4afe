//! Steering system - advances every agent in the world by one frame

use std::collections::BTreeMap;

use chaos_logic::constants::AgentKind;
use chaos_logic::steering::{step, StepContext, SteeringProfile};
use hecs::{Entity, World};
use rand::Rng;

use crate::components::AgentState;

/// Every agent in id order (oldest first).
pub fn agent_snapshot(world: &World) -> Vec<AgentState> {
    let mut agents: Vec<AgentState> = world
        .query::<&AgentState>()
        .iter()
        .map(|(_, a)| a.clone())
        .collect();
    agents.sort_by_key(|a| a.id);
    agents
}

/// Step every agent against the same pre-frame snapshot, then write the
/// results back. Returns the number of agents stepped.
pub fn steering_system<R: Rng + ?Sized>(
    world: &mut World,
    ctx: &StepContext,
    profiles: &BTreeMap<AgentKind, SteeringProfile>,
    rng: &mut R,
) -> usize {
    // Collect first (can't mutate while iterating), in id order so a seeded
    // rng gives the same frame every run.
    let mut current: Vec<(Entity, AgentState)> = world
        .query::<&AgentState>()
        .iter()
        .map(|(entity, a)| (entity, a.clone()))
        .collect();
    current.sort_by_key(|(_, a)| a.id);
    let (entities, states): (Vec<Entity>, Vec<AgentState>) = current.into_iter().unzip();

    let next = step(&states, ctx, profiles, rng);

    for (entity, state) in entities.iter().zip(next) {
        if let Ok(mut a) = world.get::<&mut AgentState>(*entity) {
            *a = state;
        }
    }
    entities.len()
}
