//! Familiarity → population parameters.
//!
//! Every scene describes its crowd with a handful of monotone rules:
//!
//! | Rule | Output |
//! |------|--------|
//! | [`CountRule`] | `min(cap, floor(base + f·per_unit))` agents of one kind |
//! | [`UnlockRule`] | flag present iff `f ≥ threshold` |
//! | [`AttractionRule`] | pointer pull in `[0, 1]` |
//! | [`Ramp`] | clamped linear coefficient (intensity, reach, fog...) |
//!
//! Rules are evaluated fresh on every call. A falling focus-mode wave can
//! therefore take a flag away again.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::constants::AgentKind;
use crate::scene::SceneConfig;

/// Clamped linear ramp `clamp(base + f·per_unit, floor, cap)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ramp {
    pub base: f64,
    pub per_unit: f64,
    pub floor: f64,
    pub cap: f64,
}

impl Ramp {
    pub const fn constant(value: f64) -> Self {
        Self {
            base: value,
            per_unit: 0.0,
            floor: value,
            cap: value,
        }
    }

    pub const fn linear(base: f64, per_unit: f64, floor: f64, cap: f64) -> Self {
        Self {
            base,
            per_unit,
            floor,
            cap,
        }
    }

    /// Ramp with a floor and no ceiling.
    pub const fn at_least(base: f64, per_unit: f64, floor: f64) -> Self {
        Self::linear(base, per_unit, floor, f64::MAX)
    }

    pub fn eval(&self, familiarity: f64) -> f64 {
        let raw = self.base + familiarity * self.per_unit;
        if self.floor <= self.cap {
            raw.clamp(self.floor, self.cap)
        } else {
            raw
        }
    }
}

/// Target count for one agent kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountRule {
    pub kind: AgentKind,
    pub base: f64,
    pub per_unit: f64,
    pub cap: u32,
    /// Only spawn while this unlock flag is present.
    #[serde(default)]
    pub requires: Option<String>,
}

impl CountRule {
    pub fn fixed(kind: AgentKind, count: u32) -> Self {
        Self {
            kind,
            base: count as f64,
            per_unit: 0.0,
            cap: count,
            requires: None,
        }
    }

    pub fn growing(kind: AgentKind, base: f64, per_unit: f64, cap: u32) -> Self {
        Self {
            kind,
            base,
            per_unit,
            cap,
            requires: None,
        }
    }

    pub fn requires(mut self, flag: &str) -> Self {
        self.requires = Some(flag.to_string());
        self
    }

    /// Count ignoring `requires`.
    pub fn eval(&self, familiarity: f64) -> u32 {
        let raw = (self.base + familiarity * self.per_unit).floor();
        if raw <= 0.0 || !raw.is_finite() {
            return 0;
        }
        (raw.min(self.cap as f64)) as u32
    }
}

/// Flag surfaced at or above a familiarity threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockRule {
    pub flag: String,
    pub threshold: f64,
}

impl UnlockRule {
    pub fn new(flag: &str, threshold: f64) -> Self {
        Self {
            flag: flag.to_string(),
            threshold,
        }
    }
}

/// Pointer attraction. Zero while `f ≤ engaged_above`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttractionRule {
    pub base: f64,
    pub per_unit: f64,
    #[serde(default)]
    pub engaged_above: Option<f64>,
}

impl AttractionRule {
    pub const NONE: Self = Self {
        base: 0.0,
        per_unit: 0.0,
        engaged_above: None,
    };

    pub const FULL: Self = Self {
        base: 1.0,
        per_unit: 0.0,
        engaged_above: None,
    };

    pub fn eval(&self, familiarity: f64) -> f64 {
        if let Some(gate) = self.engaged_above {
            if familiarity <= gate {
                return 0.0;
            }
        }
        (self.base + familiarity * self.per_unit).clamp(0.0, 1.0)
    }
}

/// All population rules of one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationRules {
    pub counts: Vec<CountRule>,
    #[serde(default)]
    pub unlocks: Vec<UnlockRule>,
    pub attraction: AttractionRule,
    pub intensity: Ramp,
    /// Pointer reach radius (lure).
    #[serde(default)]
    pub reach: Option<Ramp>,
    /// Named scene coefficients (fog, tree growth, proximity...).
    #[serde(default)]
    pub coefficients: BTreeMap<String, Ramp>,
}

impl Default for PopulationRules {
    fn default() -> Self {
        Self {
            counts: Vec::new(),
            unlocks: Vec::new(),
            attraction: AttractionRule::NONE,
            intensity: Ramp::constant(1.0),
            reach: None,
            coefficients: BTreeMap::new(),
        }
    }
}

/// Derived parameters. Never persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PopulationParameters {
    pub familiarity: f64,
    pub counts: BTreeMap<AgentKind, u32>,
    pub attraction_strength: f32,
    pub unlock_flags: BTreeSet<String>,
    pub intensity_scale: f32,
    pub reach: Option<f32>,
    pub coefficients: BTreeMap<String, f32>,
}

impl PopulationParameters {
    /// Total agents across kinds.
    pub fn count(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn count_of(&self, kind: AgentKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn has(&self, flag: &str) -> bool {
        self.unlock_flags.contains(flag)
    }

    pub fn coefficient(&self, name: &str) -> Option<f32> {
        self.coefficients.get(name).copied()
    }

    /// Focus / passive mode: the crowd ignores the pointer.
    pub fn passive(mut self) -> Self {
        self.attraction_strength = 0.0;
        self
    }
}

/// Evaluate a scene's rules at `familiarity`.
pub fn parameterize(familiarity: f64, config: &SceneConfig) -> PopulationParameters {
    let f = if familiarity.is_finite() {
        familiarity.max(0.0)
    } else {
        0.0
    };
    let rules = &config.population;

    let unlock_flags: BTreeSet<String> = rules
        .unlocks
        .iter()
        .filter(|u| f >= u.threshold)
        .map(|u| u.flag.clone())
        .collect();

    let mut counts = BTreeMap::new();
    for rule in &rules.counts {
        let locked = rule
            .requires
            .as_ref()
            .is_some_and(|flag| !unlock_flags.contains(flag));
        let n = if locked { 0 } else { rule.eval(f) };
        *counts.entry(rule.kind).or_insert(0) += n;
    }

    PopulationParameters {
        familiarity: f,
        counts,
        attraction_strength: rules.attraction.eval(f) as f32,
        unlock_flags,
        intensity_scale: rules.intensity.eval(f) as f32,
        reach: rules.reach.map(|r| r.eval(f) as f32),
        coefficients: rules
            .coefficients
            .iter()
            .map(|(name, ramp)| (name.clone(), ramp.eval(f) as f32))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SceneId;

    fn aquarium() -> SceneConfig {
        SceneConfig::builtin(SceneId::Aquarium)
    }

    #[test]
    fn aquarium_counts_at_zero() {
        let p = parameterize(0.0, &aquarium());
        assert_eq!(p.count_of(AgentKind::Jellyfish), 2);
        assert_eq!(p.count_of(AgentKind::Fish), 6);
        assert_eq!(p.count_of(AgentKind::Particle), 20);
        assert_eq!(p.count(), 28);
    }

    #[test]
    fn aquarium_counts_cap() {
        let p = parameterize(100.0, &aquarium());
        assert_eq!(p.count_of(AgentKind::Jellyfish), 8);
        assert_eq!(p.count_of(AgentKind::Fish), 20);
    }

    #[test]
    fn attraction_gated_then_clamped() {
        let cfg = aquarium();
        assert_eq!(parameterize(1.0, &cfg).attraction_strength, 0.0);
        let p = parameterize(4.0, &cfg);
        assert!((p.attraction_strength - 0.6).abs() < 1e-6);
        assert_eq!(parameterize(20.0, &cfg).attraction_strength, 1.0);
    }

    #[test]
    fn passive_drops_attraction() {
        let p = parameterize(6.0, &aquarium()).passive();
        assert_eq!(p.attraction_strength, 0.0);
    }

    #[test]
    fn unlock_threshold_is_inclusive() {
        let forest = SceneConfig::builtin(SceneId::Forest);
        assert!(!parameterize(2.0, &forest).has("deer"));
        assert!(parameterize(3.0, &forest).has("deer"));
        assert!(parameterize(5.0, &forest).has("owls"));
    }

    #[test]
    fn locked_kinds_do_not_spawn() {
        let forest = SceneConfig::builtin(SceneId::Forest);
        assert_eq!(parameterize(2.0, &forest).count_of(AgentKind::Deer), 0);
        assert_eq!(parameterize(3.0, &forest).count_of(AgentKind::Deer), 2);
    }

    #[test]
    fn forest_counts() {
        let forest = SceneConfig::builtin(SceneId::Forest);
        let p = parameterize(0.0, &forest);
        assert_eq!(p.count_of(AgentKind::Watcher), 4);
        assert_eq!(p.count_of(AgentKind::Deer), 0);
        assert_eq!(p.count_of(AgentKind::Bird), 2);
        assert_eq!(p.count(), 6);

        let p = parameterize(20.0, &forest);
        assert_eq!(p.count_of(AgentKind::Watcher), 12);
        assert_eq!(p.count_of(AgentKind::Deer), 2);
        assert_eq!(p.count_of(AgentKind::Bird), 2);
    }

    #[test]
    fn forest_watch_intensity_keeps_growing() {
        let forest = SceneConfig::builtin(SceneId::Forest);
        assert_eq!(parameterize(0.0, &forest).intensity_scale, 2.0);
        assert_eq!(parameterize(20.0, &forest).intensity_scale, 12.0);
        assert_eq!(parameterize(100.0, &forest).intensity_scale, 52.0);
        assert!(crate::scene::validate_config(&forest).is_empty());
    }

    #[test]
    fn counts_monotone_and_capped_for_every_scene() {
        for id in SceneId::ALL {
            let cfg = SceneConfig::builtin(id);
            let mut prev = BTreeMap::new();
            let mut f = 0.0;
            while f <= 30.0 {
                let p = parameterize(f, &cfg);
                for rule in &cfg.population.counts {
                    let n = p.count_of(rule.kind);
                    assert!(n <= rule.cap, "{id} {:?} {n} > {}", rule.kind, rule.cap);
                }
                for (kind, n) in &p.counts {
                    let before = prev.get(kind).copied().unwrap_or(0);
                    assert!(*n >= before, "{id} {kind:?} fell at f={f}");
                }
                prev = p.counts.clone();
                f += 0.25;
            }
        }
    }

    #[test]
    fn coefficients_follow_ramps() {
        let forest = SceneConfig::builtin(SceneId::Forest);
        let p = parameterize(2.0, &forest);
        let fog = p.coefficient("fog_opacity").unwrap();
        assert!((fog - 0.28).abs() < 1e-6, "fog={fog}");
        let p = parameterize(10.0, &forest);
        assert_eq!(p.coefficient("fog_opacity"), Some(0.0));
        assert!((p.coefficient("tree_growth").unwrap() - 1.2).abs() < 1e-6);
    }

    #[test]
    fn lure_reach_grows() {
        let lure = SceneConfig::builtin(SceneId::Lure);
        assert_eq!(parameterize(0.0, &lure).reach, Some(150.0));
        assert_eq!(parameterize(3.0, &lure).reach, Some(210.0));
    }

    #[test]
    fn non_finite_familiarity_is_zero() {
        let p = parameterize(f64::NAN, &aquarium());
        assert_eq!(p.familiarity, 0.0);
        assert_eq!(p.count_of(AgentKind::Fish), 6);
    }
}
