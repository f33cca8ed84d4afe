//! Installation - the rooms, the visitor profile and the one scene on screen
//!
//! Only one [`SceneEngine`] is mounted at a time. Entering a room unmounts
//! the previous one, records the visit, then mounts the new room with the
//! updated profile. The store is ticked once a second so time spent in a
//! room accumulates while the visitor lingers.

use chaos_logic::constants::timing::STORE_TICK_MS;
use chaos_logic::constants::SceneId;
use chaos_logic::profile::ProfileSnapshot;
use chrono::{Local, Timelike, Utc};

use crate::config::EngineConfig;
use crate::engine::{FrameStats, SceneEngine, Visit};
use crate::scheduler::{TimerId, Timers};
use crate::store::{JsonFileStore, MemoryStore, PersonalizationStore};

/// Wall clock for visit bookkeeping.
pub trait Clock {
    /// Epoch milliseconds.
    fn now_ms(&self) -> i64;
    /// Local hour, 0..24.
    fn local_hour(&self) -> u32;
}

/// The machine's clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn local_hour(&self) -> u32 {
        Local::now().hour()
    }
}

/// A clock frozen at one instant, for tests and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    pub now_ms: i64,
    pub hour: u32,
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now_ms
    }

    fn local_hour(&self) -> u32 {
        self.hour
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StoreTick;

pub struct Installation {
    config: EngineConfig,
    store: Box<dyn PersonalizationStore>,
    clock: Box<dyn Clock>,
    engine: Option<SceneEngine>,
    store_timers: Timers<StoreTick>,
    store_tick: Option<TimerId>,
    debug_override: Option<u32>,
    late_night_override: Option<bool>,
    focus_mode: bool,
}

impl Installation {
    /// Start a session on `store`.
    pub fn new(
        config: EngineConfig,
        mut store: Box<dyn PersonalizationStore>,
        clock: Box<dyn Clock>,
    ) -> Self {
        store.begin_session(clock.now_ms());
        let profile = store.snapshot();
        log::info!(
            "session started: {} total visits, {} scenes known",
            profile.total_visits,
            profile.room_visits.len()
        );
        Self {
            late_night_override: config.late_night,
            focus_mode: config.focus_mode,
            config,
            store,
            clock,
            engine: None,
            store_timers: Timers::new(),
            store_tick: None,
            debug_override: None,
        }
    }

    /// Open with the system clock, persisting to `config.profile_path` when
    /// set and keeping the profile in memory otherwise.
    pub fn open(config: EngineConfig) -> Self {
        let clock = SystemClock;
        let store: Box<dyn PersonalizationStore> = match &config.profile_path {
            Some(path) => Box::new(JsonFileStore::open(path.clone(), clock.now_ms())),
            None => Box::new(MemoryStore::new(clock.now_ms())),
        };
        Self::new(config, store, Box::new(clock))
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Leave the current room (if any) and mount `scene`.
    pub fn enter(&mut self, scene: SceneId, now_ms: f64) -> &mut SceneEngine {
        self.leave();
        let wall = self.clock.now_ms();
        self.store.record_scene_enter(scene, wall);

        let mut engine = SceneEngine::builtin(scene, &self.config);
        engine.set_debug_override(self.debug_override);
        engine.set_late_night_override(self.late_night_override);
        engine.set_focus_mode(self.focus_mode, now_ms);
        let visit = Visit::new(self.store.snapshot(), wall, self.clock.local_hour());
        engine.mount(now_ms, visit);
        self.engine.insert(engine)
    }

    /// Back to the menu. Returns the room that was left.
    pub fn leave(&mut self) -> Option<SceneId> {
        let mut engine = self.engine.take()?;
        let scene = engine.scene();
        engine.unmount();
        self.store.record_scene_leave();
        Some(scene)
    }

    pub fn current_scene(&self) -> Option<SceneId> {
        self.engine.as_ref().map(SceneEngine::scene)
    }

    /// Forward a display refresh to the mounted room and keep the store's
    /// room timer running.
    pub fn frame(&mut self, now_ms: f64) -> Option<FrameStats> {
        if self.store_tick.is_none() {
            self.store_tick = Some(self.store_timers.every(now_ms, STORE_TICK_MS, StoreTick));
        }
        let ticks = self.store_timers.due(now_ms).len();
        if ticks > 0 {
            let wall = self.clock.now_ms();
            for _ in 0..ticks {
                self.store.tick(wall);
            }
        }
        self.engine.as_mut()?.frame(now_ms)
    }

    // ── Controls ────────────────────────────────────────────────────────

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        if let Some(engine) = self.engine.as_mut() {
            engine.set_pointer(x, y);
        }
    }

    pub fn clear_pointer(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.clear_pointer();
        }
    }

    /// Force a familiarity for every room until cleared.
    pub fn set_debug_override(&mut self, value: Option<u32>) {
        self.debug_override = value;
        if let Some(engine) = self.engine.as_mut() {
            engine.set_debug_override(value);
        }
    }

    /// Focus mode for rooms that support it. Returns whether the current
    /// room accepted it.
    pub fn set_focus_mode(&mut self, on: bool, now_ms: f64) -> bool {
        self.focus_mode = on;
        self.engine
            .as_mut()
            .is_some_and(|engine| engine.set_focus_mode(on, now_ms))
    }

    pub fn set_late_night_override(&mut self, value: Option<bool>) {
        self.late_night_override = value;
        if let Some(engine) = self.engine.as_mut() {
            engine.set_late_night_override(value);
        }
    }

    /// Forget the visitor. The current room is re-entered so it reflects
    /// the empty profile.
    pub fn reset(&mut self, now_ms: f64) {
        let current = self.leave();
        self.store.reset(self.clock.now_ms());
        log::info!("visitor profile reset");
        if let Some(scene) = current {
            self.enter(scene, now_ms);
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn engine(&self) -> Option<&SceneEngine> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut SceneEngine> {
        self.engine.as_mut()
    }

    pub fn profile(&self) -> ProfileSnapshot {
        self.store.snapshot()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Drop for Installation {
    fn drop(&mut self) {
        self.leave();
    }
}
