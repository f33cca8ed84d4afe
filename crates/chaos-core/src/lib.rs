//! Chaos Core - the agent engine behind the chaos playground installation
//!
//! Eight small rooms, each populated by agents whose number and behavior
//! depend on how often the visitor has been there before.
//!
//! # Architecture
//!
//! Agents live in a `hecs` world owned by a [`engine::SceneEngine`]:
//! - **Components**: agent state, words, tendrils, the leviathan
//! - **Systems**: population resize, steering, words, abyss extras
//! - **Scheduler**: frame deltas plus cooperative timers per room
//! - **Store**: the visitor profile, in memory or as a JSON file
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`components`] | ECS component types |
//! | [`systems`] | per-frame logic over the world |
//! | [`scheduler`] | frame scheduler and timers |
//! | [`engine`] | one mounted scene |
//! | [`installation`] | scene switching and visit bookkeeping |
//! | [`store`] | personalization store backends |
//! | [`config`] | engine configuration file |
//! | [`signals`] | non-agent values for the renderer |
//!
//! # Example
//!
//! ```rust,no_run
//! use chaos_core::prelude::*;
//!
//! let mut installation = Installation::open(EngineConfig::default());
//! installation.enter(SceneId::Aquarium, 0.0);
//!
//! let mut now = 0.0;
//! loop {
//!     now += 16.0;
//!     installation.frame(now);
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod installation;
pub mod scheduler;
pub mod signals;
pub mod store;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::{load_engine_config, EngineConfig, WaveSettings};
    pub use crate::engine::{FrameStats, SceneEngine, Visit};
    pub use crate::installation::{Clock, FixedClock, Installation, SystemClock};
    pub use crate::signals::{ConsoleLine, SceneSignals};
    pub use crate::store::{JsonFileStore, MemoryStore, PersonalizationStore};
    pub use chaos_logic::constants::{AgentKind, SceneId};
    pub use chaos_logic::profile::ProfileSnapshot;
}
