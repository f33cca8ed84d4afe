//! Frame scheduling and cooperative timers.
//!
//! The host calls [`FrameScheduler::tick`] once per display refresh with a
//! monotonic timestamp and drains [`Timers::due`] in the same callback. There
//! are no threads and nothing runs on its own. Dropping either one is the
//! same as cancelling it.

/// Lifecycle of a [`FrameScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Turns host callbacks into frame deltas.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    state: SchedulerState,
    last_ms: Option<f64>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Idle,
            last_ms: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Idle → Running. A running scheduler is left alone.
    pub fn start(&mut self) {
        if self.state == SchedulerState::Idle {
            self.state = SchedulerState::Running;
            self.last_ms = None;
        }
    }

    /// Delta since the previous callback. The first callback after
    /// [`start`](Self::start) only records the timestamp. Returns `None`
    /// while idle.
    pub fn tick(&mut self, now_ms: f64) -> Option<f64> {
        if self.state != SchedulerState::Running || !now_ms.is_finite() {
            return None;
        }
        let prev = self.last_ms.replace(now_ms)?;
        Some((now_ms - prev).max(0.0))
    }

    /// Back to Idle, whatever the current state.
    pub fn cancel(&mut self) {
        self.state = SchedulerState::Idle;
        self.last_ms = None;
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for cancelling a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct TimerEntry<T> {
    id: TimerId,
    due_ms: f64,
    period_ms: Option<f64>,
    task: T,
}

/// Shortest allowed period, so a zero period cannot spin.
const MIN_PERIOD_MS: f64 = 1.0;

/// A set of one-shot and repeating timers keyed by task value.
#[derive(Debug, Clone)]
pub struct Timers<T> {
    next_id: u64,
    entries: Vec<TimerEntry<T>>,
}

impl<T: Clone> Timers<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    fn push(&mut self, due_ms: f64, period_ms: Option<f64>, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(TimerEntry {
            id,
            due_ms,
            period_ms,
            task,
        });
        id
    }

    /// Fire `task` every `period_ms`, first at `now_ms + period_ms`.
    pub fn every(&mut self, now_ms: f64, period_ms: f64, task: T) -> TimerId {
        let period = if period_ms.is_finite() {
            period_ms.max(MIN_PERIOD_MS)
        } else {
            MIN_PERIOD_MS
        };
        self.push(now_ms + period, Some(period), task)
    }

    /// Fire `task` once, `delay_ms` from now.
    pub fn after(&mut self, now_ms: f64, delay_ms: f64, task: T) -> TimerId {
        let delay = if delay_ms.is_finite() {
            delay_ms.max(0.0)
        } else {
            0.0
        };
        self.push(now_ms + delay, None, task)
    }

    /// Returns whether the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every task due at `now_ms`, oldest deadline first. Each repeating
    /// timer fires at most once per call; one that fell more than a period
    /// behind is re-armed from `now_ms` instead of catching up.
    pub fn due(&mut self, now_ms: f64) -> Vec<T> {
        let mut fired: Vec<(f64, TimerId, T)> = Vec::new();
        self.entries.retain_mut(|entry| {
            if entry.due_ms > now_ms {
                return true;
            }
            fired.push((entry.due_ms, entry.id, entry.task.clone()));
            match entry.period_ms {
                Some(period) => {
                    let next = entry.due_ms + period;
                    entry.due_ms = if next <= now_ms { now_ms + period } else { next };
                    true
                }
                None => false,
            }
        });
        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        fired.into_iter().map(|(_, _, task)| task).collect()
    }
}

impl<T: Clone> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}
