//! The persisted visitor profile and the insights derived from it.
//!
//! Stored as one camelCase JSON object:
//!
//! ```json
//! { "totalVisits": 3, "roomVisits": { "aquarium": 2 },
//!   "totalTimeSpent": 95, "roomTimeSpent": { "aquarium": 60 },
//!   "firstVisit": 1700000000000, "lastVisit": 1700000500000 }
//! ```
//!
//! Every field is optional on read. Missing counters are zero, missing maps
//! are empty and missing timestamps are "now".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::SceneId;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Visit and time-spent counters. Times are whole seconds, timestamps
/// epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSnapshot {
    pub total_visits: u64,
    pub room_visits: BTreeMap<String, u64>,
    pub total_time_spent: u64,
    pub room_time_spent: BTreeMap<String, u64>,
    pub first_visit: i64,
    pub last_visit: i64,
}

/// Wire form with every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub total_visits: Option<u64>,
    pub room_visits: Option<BTreeMap<String, u64>>,
    pub total_time_spent: Option<u64>,
    pub room_time_spent: Option<BTreeMap<String, u64>>,
    pub first_visit: Option<i64>,
    pub last_visit: Option<i64>,
}

impl ProfileSnapshot {
    /// Zeroed profile first seen at `now_ms`.
    pub fn new(now_ms: i64) -> Self {
        Self {
            total_visits: 0,
            room_visits: BTreeMap::new(),
            total_time_spent: 0,
            room_time_spent: BTreeMap::new(),
            first_visit: now_ms,
            last_visit: now_ms,
        }
    }

    pub fn from_record(record: ProfileRecord, now_ms: i64) -> Self {
        Self {
            total_visits: record.total_visits.unwrap_or(0),
            room_visits: record.room_visits.unwrap_or_default(),
            total_time_spent: record.total_time_spent.unwrap_or(0),
            room_time_spent: record.room_time_spent.unwrap_or_default(),
            first_visit: record.first_visit.unwrap_or(now_ms),
            last_visit: record.last_visit.unwrap_or(now_ms),
        }
    }

    /// A new session opened the installation.
    pub fn begin_session(&mut self, now_ms: i64) {
        self.total_visits += 1;
        self.last_visit = now_ms;
    }

    pub fn record_scene_enter(&mut self, scene: SceneId) {
        *self.room_visits.entry(scene.as_str().to_string()).or_insert(0) += 1;
    }

    /// One second elapsed, optionally inside `scene`.
    pub fn tick(&mut self, scene: Option<SceneId>) {
        self.total_time_spent += 1;
        if let Some(scene) = scene {
            *self
                .room_time_spent
                .entry(scene.as_str().to_string())
                .or_insert(0) += 1;
        }
    }

    pub fn visits_to(&self, scene: SceneId) -> u64 {
        self.room_visits.get(scene.as_str()).copied().unwrap_or(0)
    }

    pub fn time_in(&self, scene: SceneId) -> u64 {
        self.room_time_spent.get(scene.as_str()).copied().unwrap_or(0)
    }

    /// Most visited scene. Ties go to the later key.
    pub fn favorite_scene(&self) -> Option<SceneId> {
        top_scene(&self.room_visits)
    }

    /// Scene with the most time spent. Ties go to the later key.
    pub fn most_time_scene(&self) -> Option<SceneId> {
        top_scene(&self.room_time_spent)
    }

    /// Whole days since the first visit.
    pub fn days_since_first(&self, now_ms: i64) -> i64 {
        (now_ms - self.first_visit).div_euclid(MS_PER_DAY).max(0)
    }
}

fn top_scene(counts: &BTreeMap<String, u64>) -> Option<SceneId> {
    let mut best: Option<(SceneId, u64)> = None;
    for (key, &n) in counts {
        let Some(scene) = SceneId::parse(key) else {
            continue;
        };
        if best.map_or(true, |(_, top)| n >= top) {
            best = Some((scene, n));
        }
    }
    best.filter(|(_, n)| *n > 0).map(|(scene, _)| scene)
}

/// Human phrasing of a duration in seconds.
pub fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds} seconds");
    }
    if seconds < 3600 {
        return format!("{} minutes", seconds / 60);
    }
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let unit = if hours > 1 { "hours" } else { "hour" };
    if mins == 0 {
        format!("{hours} {unit}")
    } else {
        format!("{hours} {unit} {mins} minutes")
    }
}
