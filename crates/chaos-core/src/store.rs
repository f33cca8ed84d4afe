//! Personalization store: the only state that outlives a scene.
//!
//! The engine talks to a [`PersonalizationStore`] trait object. Two backends
//! ship here:
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`MemoryStore`] | tests, the headless harness, kiosks without a disk |
//! | [`JsonFileStore`] | one JSON record on disk, replaced atomically |
//!
//! Store methods never fail. A file backend that cannot read its record
//! starts from a zeroed profile, and one that cannot write logs a warning and
//! keeps going in memory.

use std::fs;
use std::path::{Path, PathBuf};

use chaos_logic::constants::SceneId;
use chaos_logic::profile::{ProfileRecord, ProfileSnapshot};

use crate::error::StoreError;

pub trait PersonalizationStore {
    fn snapshot(&self) -> ProfileSnapshot;

    /// A new session opened the installation: one more visit.
    fn begin_session(&mut self, now_ms: i64);

    /// The visitor walked into `scene`.
    fn record_scene_enter(&mut self, scene: SceneId, now_ms: i64);

    /// The visitor walked out of whatever scene they were in.
    fn record_scene_leave(&mut self);

    /// One second passed.
    fn tick(&mut self, now_ms: i64);

    fn current_scene(&self) -> Option<SceneId>;

    /// Forget everything, starting over at `now_ms`.
    fn reset(&mut self, now_ms: i64);
}

/// Profile held in memory only.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryStore {
    profile: ProfileSnapshot,
    current: Option<SceneId>,
}

impl MemoryStore {
    pub fn new(now_ms: i64) -> Self {
        Self::with_profile(ProfileSnapshot::new(now_ms))
    }

    pub fn with_profile(profile: ProfileSnapshot) -> Self {
        Self {
            profile,
            current: None,
        }
    }
}

impl PersonalizationStore for MemoryStore {
    fn snapshot(&self) -> ProfileSnapshot {
        self.profile.clone()
    }

    fn begin_session(&mut self, now_ms: i64) {
        self.profile.begin_session(now_ms);
    }

    fn record_scene_enter(&mut self, scene: SceneId, _now_ms: i64) {
        self.current = Some(scene);
        self.profile.record_scene_enter(scene);
    }

    fn record_scene_leave(&mut self) {
        self.current = None;
    }

    fn tick(&mut self, _now_ms: i64) {
        self.profile.tick(self.current);
    }

    fn current_scene(&self) -> Option<SceneId> {
        self.current
    }

    fn reset(&mut self, now_ms: i64) {
        self.profile = ProfileSnapshot::new(now_ms);
    }
}

// ── File backend ────────────────────────────────────────────────────────

/// Read a profile record from `path`.
pub fn load_profile(path: &Path, now_ms: i64) -> Result<ProfileSnapshot, StoreError> {
    let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let record: ProfileRecord = serde_json::from_str(&text)?;
    Ok(ProfileSnapshot::from_record(record, now_ms))
}

/// Write `profile` next to `path` and rename it into place.
pub fn save_profile_atomic(path: &Path, profile: &ProfileSnapshot) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(profile)?;
    fs::write(&tmp, data).map_err(|source| StoreError::Io {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

/// Profile persisted as a single JSON record, rewritten after every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open `path`, starting from a zeroed profile if it is missing or
    /// unreadable.
    pub fn open(path: impl Into<PathBuf>, now_ms: i64) -> Self {
        let path = path.into();
        let profile = match load_profile(&path, now_ms) {
            Ok(profile) => profile,
            Err(StoreError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no profile at {}, starting fresh", path.display());
                ProfileSnapshot::new(now_ms)
            }
            Err(e) => {
                log::warn!("failed to load profile, starting fresh: {e}");
                ProfileSnapshot::new(now_ms)
            }
        };
        Self {
            path,
            inner: MemoryStore::with_profile(profile),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        if let Err(e) = save_profile_atomic(&self.path, &self.inner.profile) {
            log::warn!("failed to save profile: {e}");
        }
    }
}

impl PersonalizationStore for JsonFileStore {
    fn snapshot(&self) -> ProfileSnapshot {
        self.inner.snapshot()
    }

    fn begin_session(&mut self, now_ms: i64) {
        self.inner.begin_session(now_ms);
        self.persist();
    }

    fn record_scene_enter(&mut self, scene: SceneId, now_ms: i64) {
        self.inner.record_scene_enter(scene, now_ms);
        self.persist();
    }

    fn record_scene_leave(&mut self) {
        self.inner.record_scene_leave();
    }

    fn tick(&mut self, now_ms: i64) {
        self.inner.tick(now_ms);
        self.persist();
    }

    fn current_scene(&self) -> Option<SceneId> {
        self.inner.current_scene()
    }

    fn reset(&mut self, now_ms: i64) {
        self.inner.reset(now_ms);
        self.persist();
    }
}
