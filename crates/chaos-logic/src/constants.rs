//! Installation constants: scene ids, agent kinds, frame timing.

use serde::{Deserialize, Serialize};

/// Frame timing shared by the integrator and the scheduler.
pub mod timing {
    /// Reference frame length. Integration scales every per-frame
    /// quantity by `dt / REFERENCE_FRAME_MS`.
    pub const REFERENCE_FRAME_MS: f32 = 16.0;
    /// Largest step the integrator will take in one frame.
    pub const MAX_STEP_MS: f32 = 50.0;
    /// Floor applied to distances before dividing by them.
    pub const DISTANCE_EPSILON: f32 = 1e-4;
    /// Store tick period (time-spent counters are in whole seconds).
    pub const STORE_TICK_MS: f64 = 1_000.0;
}

/// Focus-mode oscillator defaults.
pub mod wave_defaults {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 8.0;
    /// 45 minutes.
    pub const CYCLE_PERIOD_MS: f64 = 2_700_000.0;
}

/// Storage key of the persisted profile record.
pub const PROFILE_KEY: &str = "chaos-playground-data";

/// One room of the installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneId {
    Typography,
    Portrait,
    Aquarium,
    Forest,
    Pet,
    Console,
    Lure,
    Abyss,
}

impl SceneId {
    pub const ALL: [SceneId; 8] = [
        SceneId::Typography,
        SceneId::Portrait,
        SceneId::Aquarium,
        SceneId::Forest,
        SceneId::Pet,
        SceneId::Console,
        SceneId::Lure,
        SceneId::Abyss,
    ];

    /// Key used in the persisted `roomVisits` / `roomTimeSpent` maps.
    pub fn as_str(self) -> &'static str {
        match self {
            SceneId::Typography => "typography",
            SceneId::Portrait => "portrait",
            SceneId::Aquarium => "aquarium",
            SceneId::Forest => "forest",
            SceneId::Pet => "pet",
            SceneId::Console => "console",
            SceneId::Lure => "lure",
            SceneId::Abyss => "abyss",
        }
    }

    pub fn parse(s: &str) -> Option<SceneId> {
        SceneId::ALL.into_iter().find(|id| id.as_str() == s)
    }

    /// Name used when the installation talks about a room.
    pub fn display_name(self) -> &'static str {
        match self {
            SceneId::Typography => "the Words",
            SceneId::Portrait => "the Figure",
            SceneId::Aquarium => "the Aquarium",
            SceneId::Forest => "the Forest",
            SceneId::Pet => "the Creature",
            SceneId::Console => "the Console",
            SceneId::Lure => "the Lure",
            SceneId::Abyss => "the Abyss",
        }
    }

    /// Scenes that follow the focus-mode oscillator instead of visit counts.
    pub fn supports_focus_mode(self) -> bool {
        matches!(self, SceneId::Aquarium | SceneId::Typography)
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of simulated agent. Each kind has its own steering profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Aquarium fish: horizontal swimmers drawn toward the pointer.
    Fish,
    /// Aquarium jellyfish: slow vertical drifters.
    Jellyfish,
    /// Ambient particles (aquarium bubbles).
    Particle,
    /// Forest deer pacing between home points.
    Deer,
    /// Forest birds crossing the sky.
    Bird,
    /// Forest eyes that track the pointer.
    Watcher,
    /// Abyss seekers: timid light-followers.
    Seeker,
    /// Lure creatures drawn to the glow.
    Glimmer,
    /// Lure deep creatures that drift slowly.
    Drifter,
    /// Typography letter springing back to its home slot.
    Letter,
}

impl AgentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Fish => "fish",
            AgentKind::Jellyfish => "jellyfish",
            AgentKind::Particle => "particle",
            AgentKind::Deer => "deer",
            AgentKind::Bird => "bird",
            AgentKind::Watcher => "watcher",
            AgentKind::Seeker => "seeker",
            AgentKind::Glimmer => "glimmer",
            AgentKind::Drifter => "drifter",
            AgentKind::Letter => "letter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_ids_round_trip_through_keys() {
        for id in SceneId::ALL {
            assert_eq!(SceneId::parse(id.as_str()), Some(id));
        }
        assert_eq!(SceneId::parse("lobby"), None);
    }

    #[test]
    fn scene_id_serializes_as_key() {
        let json = serde_json::to_string(&SceneId::Aquarium).unwrap();
        assert_eq!(json, "\"aquarium\"");
    }

    #[test]
    fn only_aquarium_and_typography_follow_the_wave() {
        let focus: Vec<_> = SceneId::ALL
            .into_iter()
            .filter(|s| s.supports_focus_mode())
            .collect();
        assert_eq!(focus, vec![SceneId::Typography, SceneId::Aquarium]);
    }
}
