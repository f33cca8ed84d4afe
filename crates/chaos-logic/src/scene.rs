//! Built-in scene tuning tables and their validation.
//!
//! One [`SceneConfig`] per room. The steering engine and the population
//! parameterizer are shared; everything that differs between rooms is a
//! number in here. Distances are in pixels against a roughly 1280×800
//! viewport, speeds in pixels per 16 ms reference frame.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{AgentKind, SceneId};
use crate::population::{AttractionRule, CountRule, PopulationRules, Ramp, UnlockRule};
use crate::spawn::{DriftAxis, SpawnSpec};
use crate::steering::{
    EdgePolicy, GlowResponse, PhaseMode, Retarget, SteeringProfile, Temperament,
};

/// Typography word spawning and eviction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRules {
    pub interval_ms: f64,
    /// Chance that a spawn tick actually adds a word.
    pub chance: f64,
    /// No spawning at or above this many letters.
    pub max_letters: usize,
    /// Evict the oldest word once letters exceed this...
    pub evict_letters: usize,
    /// ...and there are more than this many words.
    pub evict_groups: usize,
    /// Inclusive range of words placed on mount.
    pub seed_words: (usize, usize),
    pub seed_stagger_ms: f64,
}

impl Default for WordRules {
    fn default() -> Self {
        Self {
            interval_ms: 4_000.0,
            chance: 0.3,
            max_letters: 200,
            evict_letters: 150,
            evict_groups: 8,
            seed_words: (6, 9),
            seed_stagger_ms: 100.0,
        }
    }
}

/// Tuning for one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub id: SceneId,
    pub population: PopulationRules,
    pub profiles: BTreeMap<AgentKind, SteeringProfile>,
    pub spawns: BTreeMap<AgentKind, SpawnSpec>,
    #[serde(default)]
    pub words: Option<WordRules>,
    #[serde(default)]
    pub tendrils: usize,
    #[serde(default)]
    pub leviathan: bool,
}

impl SceneConfig {
    fn empty(id: SceneId) -> Self {
        Self {
            id,
            population: PopulationRules::default(),
            profiles: BTreeMap::new(),
            spawns: BTreeMap::new(),
            words: None,
            tendrils: 0,
            leviathan: false,
        }
    }

    pub fn builtin(id: SceneId) -> Self {
        match id {
            SceneId::Aquarium => aquarium(),
            SceneId::Forest => forest(),
            SceneId::Lure => lure(),
            SceneId::Abyss => abyss(),
            SceneId::Typography => typography(),
            SceneId::Portrait => portrait(),
            SceneId::Pet | SceneId::Console => Self::empty(id),
        }
    }

    /// Kinds this scene can ever hold.
    pub fn kinds(&self) -> impl Iterator<Item = AgentKind> + '_ {
        self.spawns.keys().copied()
    }
}

// ── Built-in tables ─────────────────────────────────────────────────────

fn aquarium() -> SceneConfig {
    let mut cfg = SceneConfig::empty(SceneId::Aquarium);
    cfg.population = PopulationRules {
        counts: vec![
            CountRule::growing(AgentKind::Jellyfish, 2.0, 1.0, 8),
            CountRule::growing(AgentKind::Fish, 6.0, 2.0, 20),
            CountRule::fixed(AgentKind::Particle, 20),
        ],
        unlocks: vec![UnlockRule::new("rare_creature", 5.0)],
        attraction: AttractionRule {
            base: 0.0,
            per_unit: 0.15,
            engaged_above: Some(1.0),
        },
        ..PopulationRules::default()
    };

    cfg.profiles.insert(
        AgentKind::Fish,
        SteeringProfile {
            close_radius: 25.0,
            seek_force: 0.12,
            flee_force: 0.4,
            orbit_force: 0.05,
            startle_speed: Some(25.0),
            wander_jitter: 0.08,
            flip_chance: 0.002,
            friction: 0.95,
            phase_rate: 0.3,
            phase_mode: PhaseMode::Speed,
            edges: EdgePolicy::Contain {
                inset: 60.0,
                push: 0.15,
            },
            ..SteeringProfile::default()
        },
    );
    cfg.spawns.insert(
        AgentKind::Fish,
        SpawnSpec {
            y_band: (0.3, 0.8),
            drift_axis: DriftAxis::Horizontal,
            drift_speed: (0.03, 0.08),
            max_speed: (0.8, 1.6),
            awareness: (300.0, 300.0),
            timidity: (0.5, 1.0),
            hue: (0.0, 360.0),
            size: (20.0, 60.0),
            opacity: (0.8, 1.0),
            ..SpawnSpec::default()
        },
    );

    cfg.profiles.insert(
        AgentKind::Jellyfish,
        SteeringProfile {
            seek_force: 0.02,
            wander_jitter: 0.04,
            friction: 0.97,
            phase_rate: 0.05,
            edges: EdgePolicy::Wrap { margin: 100.0 },
            ..SteeringProfile::default()
        },
    );
    cfg.spawns.insert(
        AgentKind::Jellyfish,
        SpawnSpec {
            x_band: (0.2, 0.8),
            y_band: (0.2, 0.7),
            drift_axis: DriftAxis::Up,
            drift_speed: (0.01, 0.02),
            max_speed: (0.3, 0.6),
            awareness: (2000.0, 2000.0),
            size: (80.0, 140.0),
            opacity: (0.6, 0.9),
            ..SpawnSpec::default()
        },
    );

    cfg.profiles.insert(
        AgentKind::Particle,
        SteeringProfile {
            wander_jitter: 0.01,
            phase_rate: 0.02,
            edges: EdgePolicy::Wrap { margin: 10.0 },
            ..SteeringProfile::default()
        },
    );
    cfg.spawns.insert(
        AgentKind::Particle,
        SpawnSpec {
            drift_axis: DriftAxis::Up,
            drift_speed: (0.002, 0.006),
            max_speed: (0.05, 0.15),
            size: (1.0, 3.0),
            opacity: (0.05, 0.15),
            ..SpawnSpec::default()
        },
    );
    cfg
}

fn forest() -> SceneConfig {
    let mut cfg = SceneConfig::empty(SceneId::Forest);
    let mut coefficients = BTreeMap::new();
    coefficients.insert("tree_growth".to_string(), Ramp::linear(0.6, 0.1, 0.6, 1.2));
    coefficients.insert("fog_opacity".to_string(), Ramp::linear(0.4, -0.06, 0.0, 0.4));
    cfg.population = PopulationRules {
        counts: vec![
            CountRule::growing(AgentKind::Watcher, 4.0, 1.0, 12),
            CountRule::fixed(AgentKind::Deer, 2).requires("deer"),
            CountRule::fixed(AgentKind::Bird, 2),
        ],
        unlocks: vec![UnlockRule::new("deer", 3.0), UnlockRule::new("owls", 5.0)],
        attraction: AttractionRule::NONE,
        intensity: Ramp::at_least(2.0, 0.5, 2.0),
        reach: None,
        coefficients,
    };

    cfg.profiles.insert(
        AgentKind::Watcher,
        SteeringProfile {
            wander_jitter: 0.0,
            phase_rate: 0.02,
            edges: EdgePolicy::Free,
            ..SteeringProfile::default()
        },
    );
    cfg.spawns.insert(
        AgentKind::Watcher,
        SpawnSpec {
            x_band: (0.05, 0.95),
            y_band: (0.3, 0.85),
            max_speed: (0.0, 0.0),
            awareness: (400.0, 400.0),
            size: (4.0, 8.0),
            opacity: (0.4, 0.9),
            anchored: true,
            ..SpawnSpec::default()
        },
    );

    cfg.profiles.insert(
        AgentKind::Deer,
        SteeringProfile {
            wander_jitter: 0.0,
            home_strength: 0.002,
            retarget: Some(Retarget {
                chance: 0.005,
                x_band: (0.2, 0.8),
            }),
            friction: 0.9,
            phase_rate: 0.2,
            phase_mode: PhaseMode::Speed,
            edges: EdgePolicy::Free,
            ..SteeringProfile::default()
        },
    );
    cfg.spawns.insert(
        AgentKind::Deer,
        SpawnSpec {
            x_band: (0.2, 0.8),
            y_band: (0.7, 0.8),
            max_speed: (1.2, 1.5),
            size: (60.0, 80.0),
            anchored: true,
            ..SpawnSpec::default()
        },
    );

    cfg.profiles.insert(
        AgentKind::Bird,
        SteeringProfile {
            wander_jitter: 0.02,
            friction: 0.97,
            phase_rate: 0.3,
            edges: EdgePolicy::Wrap { margin: 40.0 },
            ..SteeringProfile::default()
        },
    );
    cfg.spawns.insert(
        AgentKind::Bird,
        SpawnSpec {
            y_band: (0.05, 0.3),
            drift_axis: DriftAxis::Horizontal,
            drift_speed: (0.05, 0.1),
            max_speed: (1.5, 3.0),
            size: (8.0, 14.0),
            ..SpawnSpec::default()
        },
    );
    cfg
}

fn lure() -> SceneConfig {
    let mut cfg = SceneConfig::empty(SceneId::Lure);
    cfg.population = PopulationRules {
        counts: vec![
            CountRule::growing(AgentKind::Glimmer, 8.0, 3.0, 25),
            CountRule::fixed(AgentKind::Drifter, 3),
        ],
        attraction: AttractionRule::FULL,
        reach: Some(Ramp::linear(150.0, 20.0, 150.0, 1_000.0)),
        ..PopulationRules::default()
    };

    cfg.profiles.insert(
        AgentKind::Glimmer,
        SteeringProfile {
            close_radius: 20.0,
            seek_force: 0.15,
            seek_falloff: Some(2.0 / 1.5),
            orbit_force: 0.05,
            reach_awareness: Some(1.5),
            wander_jitter: 0.1,
            friction: 0.96,
            phase_rate: 0.1,
            phase_mode: PhaseMode::Speed,
            glow: GlowResponse {
                orbit: 1.0,
                seek: 0.05,
                flee: -0.1,
                wander: -0.005,
            },
            edges: EdgePolicy::Wrap { margin: 50.0 },
            ..SteeringProfile::default()
        },
    );
    cfg.spawns.insert(
        AgentKind::Glimmer,
        SpawnSpec {
            max_speed: (1.0, 3.0),
            size: (10.0, 30.0),
            opacity: (0.3, 0.7),
            ..SpawnSpec::default()
        },
    );

    cfg.profiles.insert(
        AgentKind::Drifter,
        SteeringProfile {
            wander_jitter: 0.01,
            friction: 0.95,
            phase_rate: 0.01,
            edges: EdgePolicy::Wrap { margin: 300.0 },
            ..SteeringProfile::default()
        },
    );
    cfg.spawns.insert(
        AgentKind::Drifter,
        SpawnSpec {
            drift_axis: DriftAxis::Horizontal,
            drift_speed: (0.005, 0.015),
            max_speed: (0.1, 0.3),
            size: (200.0, 500.0),
            opacity: (0.05, 0.15),
            ..SpawnSpec::default()
        },
    );
    cfg
}

fn abyss() -> SceneConfig {
    let mut cfg = SceneConfig::empty(SceneId::Abyss);
    cfg.population = PopulationRules {
        counts: vec![CountRule::fixed(AgentKind::Seeker, 40)],
        attraction: AttractionRule::FULL,
        ..PopulationRules::default()
    };
    cfg.tendrils = 8;
    cfg.leviathan = true;

    cfg.profiles.insert(
        AgentKind::Seeker,
        SteeringProfile {
            close_radius: 40.0,
            seek_force: 0.08,
            flee_force: 0.5,
            orbit_force: 0.1,
            startle_speed: Some(15.0),
            wander_jitter: 0.1,
            friction: 0.98,
            phase_rate: 0.1,
            phase_mode: PhaseMode::Speed,
            edges: EdgePolicy::Wrap { margin: 50.0 },
            ..SteeringProfile::default()
        },
    );
    cfg.spawns.insert(
        AgentKind::Seeker,
        SpawnSpec {
            max_speed: (1.0, 4.0),
            awareness: (150.0, 400.0),
            timidity: (0.3, 1.0),
            hue: (180.0, 220.0),
            size: (2.0, 6.0),
            ..SpawnSpec::default()
        },
    );
    cfg
}

fn typography() -> SceneConfig {
    let mut cfg = SceneConfig::empty(SceneId::Typography);
    cfg.words = Some(WordRules::default());
    cfg.profiles.insert(
        AgentKind::Letter,
        SteeringProfile {
            temperament: Temperament::Skittish,
            flee_force: 12.0,
            home_strength: 0.015,
            wander_jitter: 0.0,
            friction: 0.94,
            phase_rate: 0.05,
            hue_drift: 0.15,
            edges: EdgePolicy::Contain {
                inset: 40.0,
                push: 0.5,
            },
            ..SteeringProfile::default()
        },
    );
    cfg.spawns.insert(
        AgentKind::Letter,
        SpawnSpec {
            x_band: (0.1, 0.7),
            y_band: (0.15, 0.85),
            max_speed: (40.0, 40.0),
            awareness: (150.0, 150.0),
            hue: (0.0, 360.0),
            size: (18.0, 42.0),
            anchored: true,
            ..SpawnSpec::default()
        },
    );
    cfg
}

fn portrait() -> SceneConfig {
    let mut cfg = SceneConfig::empty(SceneId::Portrait);
    let mut coefficients = BTreeMap::new();
    coefficients.insert("proximity".to_string(), Ramp::linear(0.0, 0.1, 0.0, 1.0));
    coefficients.insert("figure_scale".to_string(), Ramp::linear(0.6, 0.07, 0.6, 1.3));
    coefficients.insert("arm_reach_chance".to_string(), Ramp::linear(0.05, 0.02, 0.05, 0.25));
    coefficients.insert("arm_reach_intensity".to_string(), Ramp::linear(0.6, 0.06, 0.6, 1.2));
    coefficients.insert("eye_intensity".to_string(), Ramp::linear(0.5, 0.05, 0.5, 1.0));
    cfg.population = PopulationRules {
        unlocks: vec![UnlockRule::new("favorite_hint", 5.0)],
        coefficients,
        ..PopulationRules::default()
    };
    cfg
}

// ── Validation ──────────────────────────────────────────────────────────

/// Scene configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A count rule shrinks as familiarity grows.
    NegativeGrowth(AgentKind),
    ZeroCap(AgentKind),
    /// A count rule requires a flag no unlock rule produces.
    UnknownRequirement { kind: AgentKind, flag: String },
    /// Ramp floor above its cap.
    InvertedRamp(String),
    /// Friction must lie strictly between 0 and 1.
    FrictionOutOfRange(AgentKind),
    /// Negative or reversed max-speed range.
    InvalidSpeedRange(AgentKind),
    /// Counted kind with no spawn spec.
    MissingSpawnSpec(AgentKind),
    /// Spawnable kind with no steering profile.
    MissingProfile(AgentKind),
    NonPositiveWordInterval,
}

/// Validate a scene configuration, returning all errors found.
pub fn validate_config(config: &SceneConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    let rules = &config.population;

    for rule in &rules.counts {
        if rule.per_unit < 0.0 {
            errors.push(ConfigError::NegativeGrowth(rule.kind));
        }
        if rule.cap == 0 {
            errors.push(ConfigError::ZeroCap(rule.kind));
        }
        if let Some(flag) = &rule.requires {
            if !rules.unlocks.iter().any(|u| &u.flag == flag) {
                errors.push(ConfigError::UnknownRequirement {
                    kind: rule.kind,
                    flag: flag.clone(),
                });
            }
        }
        if !config.spawns.contains_key(&rule.kind) {
            errors.push(ConfigError::MissingSpawnSpec(rule.kind));
        }
    }

    let mut ramps: Vec<(String, &Ramp)> = vec![("intensity".to_string(), &rules.intensity)];
    if let Some(reach) = &rules.reach {
        ramps.push(("reach".to_string(), reach));
    }
    for (name, ramp) in &rules.coefficients {
        ramps.push((name.clone(), ramp));
    }
    for (name, ramp) in ramps {
        if ramp.floor > ramp.cap {
            errors.push(ConfigError::InvertedRamp(name));
        }
    }

    for (kind, profile) in &config.profiles {
        if !(profile.friction > 0.0 && profile.friction < 1.0) {
            errors.push(ConfigError::FrictionOutOfRange(*kind));
        }
    }

    for (kind, spec) in &config.spawns {
        let (lo, hi) = spec.max_speed;
        if lo < 0.0 || lo > hi {
            errors.push(ConfigError::InvalidSpeedRange(*kind));
        }
        if !config.profiles.contains_key(kind) {
            errors.push(ConfigError::MissingProfile(*kind));
        }
    }

    if let Some(words) = &config.words {
        if !(words.interval_ms > 0.0) {
            errors.push(ConfigError::NonPositiveWordInterval);
        }
    }

    errors
}
