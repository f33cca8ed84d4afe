//! Errors at the edges that can actually fail: files and JSON.
//!
//! None of these reach the frame loop. Store backends and the config loader
//! log them and fall back to defaults.

use std::path::PathBuf;

use chaos_logic::scene::ConfigError;
use thiserror::Error;

/// Reading or writing the persisted profile.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("profile json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loading an [`EngineConfig`](crate::config::EngineConfig) file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("config io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scene override for {scene} is invalid: {errors:?}")]
    Invalid {
        scene: String,
        errors: Vec<ConfigError>,
    },
    #[error("scene override under {key} describes {found}")]
    MismatchedScene { key: String, found: String },
    #[error("wave period must be positive, got {0}")]
    InvalidWavePeriod(f64),
}
