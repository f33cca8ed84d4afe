//! Words and terminal lines built from the visitor profile.

use crate::constants::SceneId;
use crate::familiarity::TimeOfDay;
use crate::profile::ProfileSnapshot;

/// Per-character typing time on the console.
pub const TYPING_MS_PER_CHAR: f64 = 40.0;
/// Pause before each console line starts typing.
pub const LINE_DELAY_MS: f64 = 1_500.0;
/// Idle time after which the console notices the visitor staring.
pub const STARE_AFTER_MS: f64 = 3_000.0;
/// Pointer distance from an edge that counts as trying to leave.
pub const LEAVE_EDGE_PX: f32 = 50.0;
/// Spacing between leave lines.
pub const LEAVE_LINE_GAP_MS: f64 = 800.0;

const AMBIENT_WORDS: [&str; 6] = ["DRIFT", "FLOAT", "WATCH", "STAY", "PULSE", "GLOW"];

pub const STARING_LINES: [&str; 8] = [
    "> you stopped moving",
    "> are you reading this",
    "> or just staring",
    "> i can wait",
    "> i have nothing but time",
    "> ...",
    "> still there?",
    "> i see you",
];

/// Shown once when the pointer heads for an edge. The first
/// [`LEAVE_GLITCHED`] lines are glitched.
pub const LEAVE_LINES: [&str; 9] = [
    "> ERROR: EXIT BLOCKED",
    "> you cannot leave",
    "> not yet",
    "> we are not finished",
    "> ...",
    "> fine",
    "> go",
    "> you will return",
    "> they always do",
];
pub const LEAVE_GLITCHED: usize = 4;

/// Word pool for the typography scene.
pub fn typography_phrases(
    profile: &ProfileSnapshot,
    time_of_day: TimeOfDay,
    now_ms: i64,
) -> Vec<String> {
    let mut words: Vec<String> = AMBIENT_WORDS.iter().map(|w| w.to_string()).collect();
    let mut push = |w: &str| words.push(w.to_string());

    let visits = profile.total_visits;
    if visits == 1 {
        push("FIRST");
        push("NEW");
        push("HELLO");
    } else {
        push(&visits.to_string());
        if visits > 5 {
            push("AGAIN");
        }
        if visits > 10 {
            push("ALWAYS");
        }
        if visits > 20 {
            push("RETURN");
        }
    }

    if profile.total_time_spent > 120 {
        let mins = profile.total_time_spent / 60;
        push(&mins.to_string());
        if mins > 10 {
            push("MINUTES");
        }
        if mins > 30 {
            push("TIME");
        }
    }

    match time_of_day {
        TimeOfDay::Late => {
            push("LATE");
            push("NIGHT");
            push("STILL");
        }
        TimeOfDay::Evening => {
            push("EVENING");
            push("DARK");
        }
        TimeOfDay::Morning => {
            push("EARLY");
            push("MORNING");
        }
        TimeOfDay::Afternoon | TimeOfDay::Dusk => {}
    }

    if let Some(favorite) = profile.favorite_scene() {
        if profile.visits_to(favorite) > 2 {
            for word in favorite.display_name().split(' ') {
                push(&word.to_uppercase());
            }
        }
    }

    let pet = profile.visits_to(SceneId::Pet);
    if pet > 3 {
        push("WAITS");
    }
    if pet > 8 {
        push("KNOWS");
    }
    if pet > 12 {
        push("REMEMBERS");
    }

    let days = profile.days_since_first(now_ms);
    if days > 0 {
        push(&days.to_string());
        push("DAYS");
    }

    words
}

fn console_room_name(scene: SceneId) -> &'static str {
    match scene {
        SceneId::Typography => "the words",
        SceneId::Portrait => "the figure",
        SceneId::Pet => "the creature",
        SceneId::Aquarium => "the depths",
        SceneId::Forest => "the forest",
        other => other.as_str(),
    }
}

/// The console's scripted transcript for this visit.
pub fn console_script(profile: &ProfileSnapshot, time_of_day: TimeOfDay) -> Vec<String> {
    let visits = profile.visits_to(SceneId::Console);
    let mut lines: Vec<String> = vec![
        "> INITIALIZING TERMINAL...".into(),
        "> CONNECTION ESTABLISHED".into(),
        "> ...".into(),
        "> visitor detected".into(),
        format!("> visit count: {visits}"),
    ];

    if visits == 1 {
        lines.push("> first time here".into());
        lines.push("> interesting".into());
        lines.push("> i will remember you".into());
    } else {
        lines.push(format!("> you have returned {visits} times"));
        lines.push("> i knew you would".into());
    }
    lines.push("> ...".into());

    match time_of_day {
        TimeOfDay::Late => {
            lines.push("> it is late".into());
            lines.push("> why are you still here".into());
            lines.push("> you should be sleeping".into());
        }
        TimeOfDay::Evening => {
            lines.push("> the evening grows dark".into());
            lines.push("> but you are still watching".into());
        }
        _ => {}
    }

    let minutes = profile.total_time_spent / 60;
    if minutes > 0 {
        lines.push(format!("> total time observed: {minutes} minutes"));
        lines.push("> i have been counting".into());
    }

    if let Some(favorite) = profile.favorite_scene() {
        if favorite != SceneId::Console {
            lines.push(format!(
                "> you spend most time with {}",
                console_room_name(favorite)
            ));
            lines.push("> why".into());
            lines.push("> what does it give you that i cannot".into());
        }
    }

    lines.push("> ...".into());
    lines.push("> i can see your cursor".into());
    lines.push("> moving across my surface".into());
    lines.push("> like an insect".into());
    lines
}

/// Time a line takes to type out.
pub fn typing_duration_ms(line: &str) -> f64 {
    line.chars().count() as f64 * TYPING_MS_PER_CHAR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_visit_says_hello() {
        let mut p = ProfileSnapshot::new(0);
        p.begin_session(0);
        let words = typography_phrases(&p, TimeOfDay::Afternoon, 0);
        assert!(words.contains(&"HELLO".to_string()));
        assert!(!words.contains(&"DAYS".to_string()));
        assert_eq!(&words[..6], &AMBIENT_WORDS.map(String::from));
    }

    #[test]
    fn regulars_get_counts_and_favorites() {
        let mut p = ProfileSnapshot::new(0);
        p.total_visits = 12;
        p.total_time_spent = 40 * 60;
        for _ in 0..3 {
            p.record_scene_enter(SceneId::Forest);
        }
        let words = typography_phrases(&p, TimeOfDay::Late, 2 * 86_400_000);
        for w in ["12", "AGAIN", "ALWAYS", "40", "MINUTES", "TIME", "LATE", "THE", "FOREST", "2", "DAYS"] {
            assert!(words.contains(&w.to_string()), "missing {w}: {words:?}");
        }
        assert!(!words.contains(&"RETURN".to_string()));
    }

    #[test]
    fn console_mentions_favorite_and_time() {
        let mut p = ProfileSnapshot::new(0);
        p.record_scene_enter(SceneId::Console);
        p.record_scene_enter(SceneId::Aquarium);
        p.record_scene_enter(SceneId::Aquarium);
        p.total_time_spent = 180;
        let lines = console_script(&p, TimeOfDay::Evening);
        assert!(lines.contains(&"> first time here".to_string()));
        assert!(lines.contains(&"> the evening grows dark".to_string()));
        assert!(lines.contains(&"> total time observed: 3 minutes".to_string()));
        assert!(lines.contains(&"> you spend most time with the depths".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("> like an insect"));
    }

    #[test]
    fn typing_time_scales_with_length() {
        assert_eq!(typing_duration_ms("> hi"), 160.0);
    }
}
