//! Scene engine - one mounted room, driven frame by frame
//!
//! A [`SceneEngine`] owns everything a room needs while it is on screen:
//! the agent world, a frame scheduler, the room's timers, the latest
//! pointer sample and the familiarity inputs. The host calls
//! [`SceneEngine::frame`] once per display refresh.
//!
//! Per frame:
//! 1. resolve familiarity and, if it moved, re-parameterize and resize
//!    the population
//! 2. abyss extras (leviathan, tendrils, light)
//! 3. steer every agent against one snapshot
//! 4. decay pointer speed
//! 5. fire due timers (flicker, blink, words, console lines...)

use chaos_logic::constants::timing::REFERENCE_FRAME_MS;
use chaos_logic::constants::{AgentKind, SceneId};
use chaos_logic::familiarity::{self, FamiliarityState, TimeOfDay};
use chaos_logic::leviathan::{MESSAGE, MESSAGE_MS};
use chaos_logic::phrases::{
    console_script, typing_duration_ms, typography_phrases, LEAVE_EDGE_PX, LEAVE_GLITCHED,
    LEAVE_LINES, LEAVE_LINE_GAP_MS, LINE_DELAY_MS, STARE_AFTER_MS, STARING_LINES,
};
use chaos_logic::pointer::PointerState;
use chaos_logic::population::{parameterize, PopulationParameters};
use chaos_logic::profile::ProfileSnapshot;
use chaos_logic::scene::SceneConfig;
use chaos_logic::spawn::{pick, SpawnSpec};
use chaos_logic::status::{favorite_hint, status_message, PetBond};
use chaos_logic::steering::{clamp_dt, Bounds, Repulsor, StepContext};
use chaos_logic::vector::Vec2;
use hecs::World;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::components::{AgentState, Leviathan, Tendril, Word};
use crate::config::{EngineConfig, WaveSettings};
use crate::scheduler::{FrameScheduler, TimerId, Timers};
use crate::signals::{ConsoleLine, SceneSignals};
use crate::systems::*;

/// Pointer samples are clamped into the viewport grown by this much.
const POINTER_MARGIN: f32 = 50.0;
/// Console staring check cadence.
const STARE_CHECK_MS: f64 = 1_000.0;
/// Console lines that must be typed before an escape attempt is noticed.
const LEAVE_AFTER_LINES: usize = 5;
/// Glitch fades this long after the last leave line.
const GLITCH_FADE_MS: f64 = 2_000.0;

/// What the visitor brings into a room.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub profile: ProfileSnapshot,
    /// Wall clock, epoch milliseconds.
    pub wall_clock_ms: i64,
    /// Local hour, 0..24.
    pub local_hour: u32,
}

impl Visit {
    pub fn new(profile: ProfileSnapshot, wall_clock_ms: i64, local_hour: u32) -> Self {
        Self {
            profile,
            wall_clock_ms,
            local_hour,
        }
    }
}

/// Summary of one [`SceneEngine::frame`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Delta actually integrated, after clamping.
    pub dt_ms: f64,
    pub familiarity: f64,
    pub agents: usize,
    pub population: PopulationChange,
}

/// Deferred work scheduled on the scene's timers.
#[derive(Debug, Clone, PartialEq)]
enum SceneTask {
    SeedWord(String),
    WordTick,
    FlickerRoll,
    FlickerRestore,
    ArmReachRoll,
    ArmRelease,
    BlinkRoll,
    BlinkEnd,
    LurePulse,
    ConsoleLine,
    ConsoleTyped,
    StareCheck,
    LeaveLine(usize),
    GlitchFade,
    RandomGlitchRoll,
    RandomGlitchEnd,
    ClearMessage,
}

/// Console transcript progress.
#[derive(Debug, Clone, Default)]
struct ConsoleState {
    script: Vec<String>,
    /// Lines fully typed so far.
    completed: usize,
    last_move_ms: f64,
    staring: bool,
    tried_to_leave: bool,
}

pub struct SceneEngine {
    config: SceneConfig,
    world: World,
    rng: StdRng,
    bounds: Bounds,
    wave: WaveSettings,

    scheduler: FrameScheduler,
    timers: Timers<SceneTask>,
    periodic: Vec<TimerId>,

    pointer: PointerState,
    familiarity: FamiliarityState,
    params: PopulationParameters,
    last_familiarity: Option<f64>,
    profile: ProfileSnapshot,
    local_hour: u32,
    late_night_override: Option<bool>,

    signals: SceneSignals,
    phrases: Vec<String>,
    console: ConsoleState,
    leviathan: LeviathanWatch,

    next_id: u64,
    next_group: u64,
    mounted_at_ms: f64,
    last_now_ms: f64,
    mounted: bool,
}

impl SceneEngine {
    /// An unmounted engine for `config`, using viewport, seed and wave
    /// settings from `engine`.
    pub fn new(config: SceneConfig, engine: &EngineConfig) -> Self {
        let rng = match engine.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ scene_salt(config.id)),
            None => StdRng::from_entropy(),
        };
        let mut familiarity = FamiliarityState::default();
        if engine.focus_mode && config.id.supports_focus_mode() {
            familiarity.oscillator = Some(engine.wave.oscillator(0.0));
        }
        Self {
            config,
            world: World::new(),
            rng,
            bounds: engine.viewport,
            wave: engine.wave,
            scheduler: FrameScheduler::new(),
            timers: Timers::new(),
            periodic: Vec::new(),
            pointer: PointerState::default(),
            familiarity,
            params: PopulationParameters::default(),
            last_familiarity: None,
            profile: ProfileSnapshot::new(0),
            local_hour: 12,
            late_night_override: engine.late_night,
            signals: SceneSignals::default(),
            phrases: Vec::new(),
            console: ConsoleState::default(),
            leviathan: LeviathanWatch::default(),
            next_id: 0,
            next_group: 0,
            mounted_at_ms: 0.0,
            last_now_ms: 0.0,
            mounted: false,
        }
    }

    /// Engine for a built-in scene.
    pub fn builtin(scene: SceneId, engine: &EngineConfig) -> Self {
        Self::new(engine.scene_config(scene), engine)
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Populate the room and start the scheduler. Mounting twice is a no-op.
    pub fn mount(&mut self, now_ms: f64, visit: Visit) {
        if self.mounted {
            return;
        }
        let scene = self.config.id;
        self.mounted = true;
        self.mounted_at_ms = now_ms;
        self.last_now_ms = now_ms;
        self.local_hour = visit.local_hour;
        self.profile = visit.profile;
        self.signals = SceneSignals {
            late_night: self.late_night(),
            ..SceneSignals::default()
        };
        self.familiarity.raw_visit_count =
            u32::try_from(self.profile.visits_to(scene)).unwrap_or(u32::MAX);
        if self.familiarity.oscillator.is_some() {
            self.familiarity.oscillator = Some(self.wave.oscillator(now_ms));
        }
        self.last_familiarity = None;
        self.next_id = 0;
        self.next_group = 0;

        let tod = TimeOfDay::from_hour(self.local_hour);
        if self.config.words.is_some() {
            self.phrases = typography_phrases(&self.profile, tod, visit.wall_clock_ms);
        }
        if scene == SceneId::Console {
            self.console = ConsoleState {
                script: console_script(&self.profile, tod),
                last_move_ms: now_ms,
                ..ConsoleState::default()
            };
            // Each line schedules the next.
            self.timers.after(now_ms, LINE_DELAY_MS, SceneTask::ConsoleLine);
        }

        self.refresh_population(now_ms);
        spawn_tendrils(&mut self.world, self.config.tendrils, self.bounds, &mut self.rng);
        self.seed_words(now_ms);
        self.arm_periodic(now_ms);
        self.scheduler.start();

        log::info!(
            "mounted {} (familiarity {:.2}, {} agents)",
            scene,
            self.params.familiarity,
            self.agent_count()
        );
    }

    /// Tear everything down. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.scheduler.cancel();
        self.timers.cancel_all();
        self.periodic.clear();
        let removed = clear_world(&mut self.world);
        self.pointer = PointerState::default();
        self.mounted = false;
        log::info!("unmounted {} ({} entities released)", self.config.id, removed);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Advance the room to `now_ms`. Returns `None` while unmounted and on
    /// the first callback after mounting, which only records the time.
    pub fn frame(&mut self, now_ms: f64) -> Option<FrameStats> {
        if !self.mounted {
            return None;
        }
        let dt = match self.scheduler.tick(now_ms) {
            Some(dt) => dt,
            None => {
                self.last_now_ms = now_ms;
                self.run_timers(now_ms);
                return None;
            }
        };
        self.last_now_ms = now_ms;
        let dt = clamp_dt(dt as f32);
        let k = dt / REFERENCE_FRAME_MS;

        let population = self.refresh_population(now_ms);
        let pointer = self
            .pointer
            .clamped(self.bounds.width, self.bounds.height, POINTER_MARGIN);

        let repulsors = self.abyss_frame(now_ms, pointer, k);

        let ctx = StepContext {
            dt_ms: dt,
            bounds: self.bounds,
            pointer,
            pointer_speed: self.pointer.speed,
            attraction: self.params.attraction_strength,
            interactive: self.interactive(),
            reach: self.params.reach,
            repulsors: &repulsors,
        };
        let agents = steering_system(&mut self.world, &ctx, &self.config.profiles, &mut self.rng);
        fear_glow_system(&mut self.world, &repulsors, k);

        self.pointer.decay(dt);
        if self.config.id == SceneId::Console {
            self.watch_for_escape(now_ms);
        }
        self.run_timers(now_ms);

        Some(FrameStats {
            dt_ms: dt as f64,
            familiarity: self.params.familiarity,
            agents,
            population,
        })
    }

    // ── Controls ────────────────────────────────────────────────────────

    /// Latest pointer sample in viewport pixels. Last writer wins.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer.sample(x, y);
        self.console.last_move_ms = self.last_now_ms;
        self.console.staring = false;
    }

    pub fn clear_pointer(&mut self) {
        self.pointer.clear();
    }

    pub fn set_debug_override(&mut self, value: Option<u32>) {
        self.familiarity.debug_override = value;
        self.last_familiarity = None;
    }

    /// Turn the familiarity oscillator on or off. Returns false for scenes
    /// without a focus mode.
    pub fn set_focus_mode(&mut self, on: bool, now_ms: f64) -> bool {
        if !self.config.id.supports_focus_mode() {
            return false;
        }
        self.familiarity.oscillator = on.then(|| self.wave.oscillator(now_ms));
        self.last_familiarity = None;
        log::debug!("{}: focus mode {}", self.config.id, if on { "on" } else { "off" });
        true
    }

    pub fn focus_mode(&self) -> bool {
        self.familiarity.oscillator.is_some()
    }

    /// Force late-night mode, or `None` to follow the clock. Re-arms the
    /// timers whose cadence depends on it.
    pub fn set_late_night_override(&mut self, value: Option<bool>) {
        self.late_night_override = value;
        self.signals.late_night = self.late_night();
        if self.mounted {
            for id in self.periodic.drain(..) {
                self.timers.cancel(id);
            }
            self.arm_periodic(self.last_now_ms);
        }
    }

    pub fn late_night(&self) -> bool {
        familiarity::is_late_night(self.late_night_override, self.local_hour)
    }

    /// Call the leviathan into the abyss now. Returns false elsewhere or
    /// while one is already crossing.
    pub fn summon(&mut self) -> bool {
        if !self.mounted || !self.config.leviathan {
            return false;
        }
        let summoned = summon_leviathan(&mut self.world, self.bounds, &mut self.rng);
        if summoned {
            self.announce(MESSAGE, MESSAGE_MS);
        }
        summoned
    }

    /// A key typed in the typography room. Returns the new letter's id.
    pub fn type_key(&mut self, key: char) -> Option<u64> {
        if !self.mounted || self.config.words.is_none() {
            return None;
        }
        let at = self
            .pointer
            .clamped(self.bounds.width, self.bounds.height, 0.0)
            .unwrap_or(Vec2::new(self.bounds.width / 2.0, self.bounds.height / 2.0));
        let spec = self.letter_spec();
        type_letter(
            &mut self.world,
            key,
            at,
            &mut self.next_id,
            &spec,
            self.bounds,
            self.last_now_ms,
            &mut self.rng,
        )
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn scene(&self) -> SceneId {
        self.config.id
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn signals(&self) -> &SceneSignals {
        &self.signals
    }

    pub fn params(&self) -> &PopulationParameters {
        &self.params
    }

    pub fn familiarity(&self) -> f64 {
        self.params.familiarity
    }

    pub fn familiarity_state(&self) -> &FamiliarityState {
        &self.familiarity
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Caption for the room at the current familiarity.
    pub fn status(&self) -> &'static str {
        status_message(self.config.id, self.params.familiarity)
    }

    /// Portrait hint about the visitor's favorite room, once unlocked.
    pub fn hint(&self) -> Option<String> {
        if self.config.id != SceneId::Portrait || !self.params.has("favorite_hint") {
            return None;
        }
        favorite_hint(self.profile.favorite_scene(), self.params.familiarity)
    }

    pub fn pet_bond(&self) -> PetBond {
        PetBond::from_familiarity(self.params.familiarity)
    }

    /// Read-only agent snapshot, oldest first.
    pub fn agents(&self) -> Vec<AgentState> {
        agent_snapshot(&self.world)
    }

    pub fn agent_count(&self) -> usize {
        self.world.query::<&AgentState>().iter().count()
    }

    pub fn count_of(&self, kind: AgentKind) -> usize {
        agents_of_kind(&self.world, kind).len()
    }

    pub fn tendrils(&self) -> Vec<Tendril> {
        self.world
            .query::<&Tendril>()
            .iter()
            .map(|(_, t)| t.clone())
            .collect()
    }

    pub fn leviathan(&self) -> Option<Leviathan> {
        self.world
            .query::<&Leviathan>()
            .iter()
            .map(|(_, l)| l.clone())
            .next()
    }

    /// Spawned words on screen. Typed letters are not a word.
    pub fn word_count(&self) -> usize {
        self.world.query::<&Word>().iter().count()
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn scheduler_running(&self) -> bool {
        self.scheduler.is_running()
    }

    // ── Frame helpers ───────────────────────────────────────────────────

    fn interactive(&self) -> bool {
        self.familiarity.oscillator.is_none()
    }

    fn refresh_population(&mut self, now_ms: f64) -> PopulationChange {
        let f = familiarity::resolve(&self.familiarity, now_ms);
        if self.last_familiarity == Some(f) {
            return PopulationChange::default();
        }
        self.last_familiarity = Some(f);
        let params = parameterize(f, &self.config);
        self.params = if self.interactive() {
            params
        } else {
            params.passive()
        };
        resize_population(
            &mut self.world,
            &self.config,
            &self.params,
            self.bounds,
            &mut self.next_id,
            &mut self.rng,
        )
    }

    fn abyss_frame(&mut self, now_ms: f64, pointer: Option<Vec2>, k: f32) -> Vec<Repulsor> {
        if self.config.leviathan
            && maybe_spawn_leviathan(
                &mut self.world,
                &self.leviathan,
                now_ms,
                k,
                self.bounds,
                &mut self.rng,
            )
        {
            self.announce(MESSAGE, MESSAGE_MS);
        }
        let repulsors = leviathan_system(&mut self.world, &mut self.leviathan, self.bounds, now_ms, k);

        if self.config.tendrils > 0 {
            tendril_system(
                &mut self.world,
                pointer,
                self.pointer.speed,
                now_ms - self.mounted_at_ms,
                k,
            );
        }
        if self.config.id == SceneId::Abyss {
            self.signals.light_intensity = light_intensity(self.pointer.speed);
            self.signals.leviathan_illumination = leviathan_illumination(&self.world, pointer);
        }
        repulsors
    }

    fn announce(&mut self, message: &str, for_ms: f64) {
        self.signals.message = Some(message.to_string());
        self.timers.after(self.last_now_ms, for_ms, SceneTask::ClearMessage);
    }

    fn letter_spec(&self) -> SpawnSpec {
        self.config
            .spawns
            .get(&AgentKind::Letter)
            .cloned()
            .unwrap_or_default()
    }

    fn seed_words(&mut self, now_ms: f64) {
        let Some(rules) = self.config.words.clone() else {
            return;
        };
        let (lo, hi) = rules.seed_words;
        let n = self.rng.gen_range(lo.min(hi)..=hi.max(lo));
        let picks: Vec<String> = self
            .phrases
            .choose_multiple(&mut self.rng, n)
            .cloned()
            .collect();
        for (i, word) in picks.into_iter().enumerate() {
            self.timers.after(
                now_ms,
                i as f64 * rules.seed_stagger_ms,
                SceneTask::SeedWord(word),
            );
        }
    }

    fn arm_periodic(&mut self, now_ms: f64) {
        let late = self.late_night();
        let arm = |timers: &mut Timers<SceneTask>, period: f64, task: SceneTask| {
            timers.every(now_ms, period, task)
        };
        let mut ids = Vec::new();
        match self.config.id {
            SceneId::Typography => {
                if let Some(rules) = &self.config.words {
                    ids.push(arm(&mut self.timers, rules.interval_ms, SceneTask::WordTick));
                }
            }
            SceneId::Portrait => {
                let flicker = if late { 100.0 } else { 200.0 };
                let reach = if late { 2_000.0 } else { 3_000.0 };
                ids.push(arm(&mut self.timers, flicker, SceneTask::FlickerRoll));
                ids.push(arm(&mut self.timers, reach, SceneTask::ArmReachRoll));
            }
            SceneId::Pet => ids.push(arm(&mut self.timers, 2_000.0, SceneTask::BlinkRoll)),
            SceneId::Lure => ids.push(arm(&mut self.timers, 50.0, SceneTask::LurePulse)),
            SceneId::Console => {
                ids.push(arm(&mut self.timers, STARE_CHECK_MS, SceneTask::StareCheck));
                ids.push(arm(&mut self.timers, 2_000.0, SceneTask::RandomGlitchRoll));
            }
            SceneId::Aquarium | SceneId::Forest | SceneId::Abyss => {}
        }
        self.periodic = ids;
    }

    fn run_timers(&mut self, now_ms: f64) {
        for task in self.timers.due(now_ms) {
            if !self.mounted {
                break;
            }
            self.run_task(task, now_ms);
        }
    }

    fn run_task(&mut self, task: SceneTask, now_ms: f64) {
        match task {
            SceneTask::SeedWord(word) => {
                let spec = self.letter_spec();
                spawn_word_entities(
                    &mut self.world,
                    &word,
                    self.next_group,
                    &mut self.next_id,
                    &spec,
                    self.bounds,
                    now_ms,
                    &mut self.rng,
                );
                self.next_group += 1;
            }
            SceneTask::WordTick => {
                let Some(rules) = self.config.words.clone() else {
                    return;
                };
                let spec = self.letter_spec();
                let tick = word_tick(
                    &mut self.world,
                    &rules,
                    &self.phrases,
                    &mut self.next_group,
                    &mut self.next_id,
                    &spec,
                    self.bounds,
                    now_ms,
                    &mut self.rng,
                );
                if let Some(group) = tick.evicted {
                    log::debug!("typography: evicted {group:?}");
                }
            }
            SceneTask::FlickerRoll => {
                let chance = if self.late_night() { 0.2 } else { 0.1 };
                if self.rng.gen_bool(chance) {
                    self.signals.flicker = pick(&mut self.rng, (0.2, 0.5));
                    let hold = pick(&mut self.rng, (30.0, 110.0)) as f64;
                    self.timers.after(now_ms, hold, SceneTask::FlickerRestore);
                }
            }
            SceneTask::FlickerRestore => self.signals.flicker = 1.0,
            SceneTask::ArmReachRoll => {
                let chance = self.params.coefficient("arm_reach_chance").unwrap_or(0.05);
                if self.rng.gen_bool(chance.clamp(0.0, 1.0) as f64) {
                    let intensity = self.params.coefficient("arm_reach_intensity").unwrap_or(0.6);
                    self.signals.arm_reach = intensity + pick(&mut self.rng, (0.0, 0.3));
                    let hold = pick(&mut self.rng, (800.0, 2_300.0)) as f64;
                    self.timers.after(now_ms, hold, SceneTask::ArmRelease);
                }
            }
            SceneTask::ArmRelease => self.signals.arm_reach = 0.0,
            SceneTask::BlinkRoll => {
                if self.rng.gen_bool(0.3) {
                    self.signals.blink = true;
                    self.timers.after(now_ms, 100.0, SceneTask::BlinkEnd);
                }
            }
            SceneTask::BlinkEnd => self.signals.blink = false,
            SceneTask::LurePulse => {
                self.signals.lure_intensity = 1.0 + ((now_ms / 500.0).sin() * 0.2) as f32;
            }
            SceneTask::ConsoleLine => {
                if let Some(text) = self.console.script.get(self.console.completed) {
                    let typing = typing_duration_ms(text);
                    self.signals.transcript.push(ConsoleLine::typed(text.clone()));
                    self.timers.after(now_ms, typing, SceneTask::ConsoleTyped);
                }
            }
            SceneTask::ConsoleTyped => {
                if let Some(line) = self.signals.transcript.iter_mut().rev().find(|l| l.typing) {
                    line.typing = false;
                }
                self.console.completed += 1;
                if self.console.completed < self.console.script.len() {
                    self.timers.after(now_ms, LINE_DELAY_MS, SceneTask::ConsoleLine);
                }
            }
            SceneTask::StareCheck => {
                if !self.console.staring && now_ms - self.console.last_move_ms > STARE_AFTER_MS {
                    self.console.staring = true;
                    if let Some(line) = STARING_LINES.choose(&mut self.rng) {
                        self.signals.transcript.push(ConsoleLine::instant(*line, false));
                    }
                }
            }
            SceneTask::LeaveLine(i) => {
                if let Some(text) = LEAVE_LINES.get(i) {
                    let glitched = i < LEAVE_GLITCHED;
                    self.signals.transcript.push(ConsoleLine::instant(*text, glitched));
                    self.signals.glitch = if glitched {
                        self.signals.glitch + 0.5
                    } else {
                        (self.signals.glitch - 0.3).max(0.0)
                    };
                }
            }
            SceneTask::GlitchFade => self.signals.glitch = 0.0,
            SceneTask::RandomGlitchRoll => {
                if self.rng.gen_bool(0.05) {
                    self.signals.random_glitch = true;
                    let hold = pick(&mut self.rng, (100.0, 300.0)) as f64;
                    self.timers.after(now_ms, hold, SceneTask::RandomGlitchEnd);
                }
            }
            SceneTask::RandomGlitchEnd => self.signals.random_glitch = false,
            SceneTask::ClearMessage => self.signals.message = None,
        }
    }

    /// Console: the pointer heading for an edge triggers the escape lines,
    /// once per mount.
    fn watch_for_escape(&mut self, now_ms: f64) {
        if self.console.tried_to_leave || self.console.completed <= LEAVE_AFTER_LINES {
            return;
        }
        let Some(p) = self.pointer.position else {
            return;
        };
        let near_edge = p.x < LEAVE_EDGE_PX
            || p.x > self.bounds.width - LEAVE_EDGE_PX
            || p.y < LEAVE_EDGE_PX
            || p.y > self.bounds.height - LEAVE_EDGE_PX;
        if !near_edge {
            return;
        }
        self.console.tried_to_leave = true;
        self.signals.glitch = 1.0;
        for i in 0..LEAVE_LINES.len() {
            self.timers
                .after(now_ms, i as f64 * LEAVE_LINE_GAP_MS, SceneTask::LeaveLine(i));
        }
        let fade = LEAVE_LINES.len() as f64 * LEAVE_LINE_GAP_MS + GLITCH_FADE_MS;
        self.timers.after(now_ms, fade, SceneTask::GlitchFade);
        log::debug!("console: visitor tried to leave");
    }
}

impl Drop for SceneEngine {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn scene_salt(scene: SceneId) -> u64 {
    SceneId::ALL
        .iter()
        .position(|s| *s == scene)
        .map_or(0, |i| (i as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
