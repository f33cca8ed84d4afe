//! Component definitions for the agent pool.
//!
//! Components are pure data attached to entities in a `hecs::World`.
//! Behavior lives in [`crate::systems`] and in `chaos_logic`.
//!
//! | Component | Entities |
//! |-----------|----------|
//! | [`AgentState`] | every steered agent (fish, seekers, letters, ...) |
//! | [`Word`] | one per typography word, owning letters by group id |
//! | [`Typed`] | letters the visitor typed, outside any word |
//! | [`Tendril`] | abyss tendrils |
//! | [`Leviathan`] | the abyss leviathan while it is crossing |

pub use chaos_logic::agent::AgentState;
pub use chaos_logic::leviathan::Leviathan;
pub use chaos_logic::tendril::Tendril;

/// A word laid out in the typography scene. Its letters carry the same
/// `group`; groups are allocated in increasing order, so the smallest live
/// group is the oldest word.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub group: u64,
    pub text: String,
    pub spawned_at_ms: f64,
}

/// Marker for a letter typed by the visitor. Typed letters belong to no word.
/// Together they form the oldest group and are evicted before any word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typed {
    pub typed_at_ms: f64,
}
