//! Engine configuration loaded from JSON.
//!
//! Every field has a default, so an empty object (or no file at all) is a
//! valid configuration. Scene overrides replace the built-in table for that
//! scene wholesale and are validated on load.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chaos_logic::constants::{wave_defaults, SceneId};
use chaos_logic::scene::{validate_config, SceneConfig};
use chaos_logic::steering::Bounds;
use chaos_logic::wave::WaveState;
use serde::{Deserialize, Serialize};

use crate::error::ConfigLoadError;

/// Focus-mode oscillator settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSettings {
    pub min: f64,
    pub max: f64,
    pub cycle_period_ms: f64,
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            min: wave_defaults::MIN,
            max: wave_defaults::MAX,
            cycle_period_ms: wave_defaults::CYCLE_PERIOD_MS,
        }
    }
}

impl WaveSettings {
    /// A wave sitting at its trough at `now_ms`.
    pub fn oscillator(&self, now_ms: f64) -> WaveState {
        WaveState::starting_at_trough(self.min, self.max, self.cycle_period_ms, now_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub viewport: Bounds,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Profile JSON file. `None` keeps the profile in memory.
    pub profile_path: Option<PathBuf>,
    /// Start with the familiarity oscillator running where supported.
    pub focus_mode: bool,
    pub wave: WaveSettings,
    /// Force late-night mode on or off instead of reading the clock.
    pub late_night: Option<bool>,
    /// Per-scene replacements for the built-in tuning tables.
    pub scenes: BTreeMap<SceneId, SceneConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport: Bounds::default(),
            seed: None,
            profile_path: None,
            focus_mode: false,
            wave: WaveSettings::default(),
            late_night: None,
            scenes: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Tuning for `id`: the override if present, else the built-in table.
    pub fn scene_config(&self, id: SceneId) -> SceneConfig {
        self.scenes
            .get(&id)
            .cloned()
            .unwrap_or_else(|| SceneConfig::builtin(id))
    }

    /// Check overrides and wave settings.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if !(self.wave.cycle_period_ms > 0.0) {
            return Err(ConfigLoadError::InvalidWavePeriod(self.wave.cycle_period_ms));
        }
        for (id, scene) in &self.scenes {
            if scene.id != *id {
                return Err(ConfigLoadError::MismatchedScene {
                    key: id.to_string(),
                    found: scene.id.to_string(),
                });
            }
            let errors = validate_config(scene);
            if !errors.is_empty() {
                return Err(ConfigLoadError::Invalid {
                    scene: id.to_string(),
                    errors,
                });
            }
        }
        Ok(())
    }
}

/// Read and validate a config file.
pub fn try_load_engine_config(path: &Path) -> Result<EngineConfig, ConfigLoadError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: EngineConfig = serde_json::from_str(&text)?;
    config.validate()?;
    Ok(config)
}

/// Read a config file, falling back to defaults when it is missing or bad.
pub fn load_engine_config(path: &Path) -> EngineConfig {
    match try_load_engine_config(path) {
        Ok(config) => config,
        Err(ConfigLoadError::Io { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            log::debug!("no config at {}, using defaults", path.display());
            EngineConfig::default()
        }
        Err(e) => {
            log::warn!("ignoring config {}: {e}", path.display());
            EngineConfig::default()
        }
    }
}
