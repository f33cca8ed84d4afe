//! Typography words - spawning, typed letters and eviction of old words

use chaos_logic::constants::AgentKind;
use chaos_logic::scene::WordRules;
use chaos_logic::spawn::{pick, spawn_agent, spawn_word, SpawnSpec};
use chaos_logic::steering::Bounds;
use chaos_logic::vector::Vec2;
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{AgentState, Typed, Word};

pub fn letter_count(world: &World) -> usize {
    world
        .query::<&AgentState>()
        .iter()
        .filter(|(_, a)| a.kind == AgentKind::Letter)
        .count()
}

/// An evictable batch of letters. Typed letters form one group that sorts
/// before every spawned word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WordGroup {
    Typed,
    Word(u64),
}

pub fn typed_count(world: &World) -> usize {
    world.query::<&Typed>().iter().count()
}

/// Live groups, oldest first. The typed group is listed only while typed
/// letters remain.
pub fn word_groups(world: &World) -> Vec<WordGroup> {
    let mut groups: Vec<WordGroup> = world
        .query::<&Word>()
        .iter()
        .map(|(_, w)| WordGroup::Word(w.group))
        .collect();
    if typed_count(world) > 0 {
        groups.push(WordGroup::Typed);
    }
    groups.sort_unstable();
    groups
}

/// Lay out `text` as a new word. Returns the number of letters spawned.
#[allow(clippy::too_many_arguments)]
pub fn spawn_word_entities<R: Rng + ?Sized>(
    world: &mut World,
    text: &str,
    group: u64,
    next_id: &mut u64,
    spec: &SpawnSpec,
    bounds: Bounds,
    now_ms: f64,
    rng: &mut R,
) -> usize {
    let letters = spawn_word(text, group, *next_id, spec, bounds, rng);
    let n = letters.len();
    *next_id += n as u64;
    for letter in letters {
        world.spawn((letter,));
    }
    world.spawn((Word {
        group,
        text: text.to_string(),
        spawned_at_ms: now_ms,
    },));
    n
}

/// A letter typed by the visitor, thrown out from the pointer. Whitespace
/// and control characters are ignored.
#[allow(clippy::too_many_arguments)]
pub fn type_letter<R: Rng + ?Sized>(
    world: &mut World,
    glyph: char,
    at: Vec2,
    next_id: &mut u64,
    spec: &SpawnSpec,
    bounds: Bounds,
    now_ms: f64,
    rng: &mut R,
) -> Option<u64> {
    if glyph.is_whitespace() || glyph.is_control() {
        return None;
    }
    let glyph = glyph.to_uppercase().next().unwrap_or(glyph);

    let id = *next_id;
    *next_id += 1;
    let mut letter = spawn_agent(id, AgentKind::Letter, spec, bounds, rng);
    letter.position = at + Vec2::new(pick(rng, (-40.0, 40.0)), pick(rng, (-40.0, 40.0)));
    letter.velocity = Vec2::new(pick(rng, (-7.5, 7.5)), pick(rng, (-7.5, 7.5)) - 8.0);
    letter.home = Some(at + Vec2::new(pick(rng, (-150.0, 150.0)), pick(rng, (-150.0, 150.0))));
    letter.glyph = Some(glyph);
    letter.group = None;
    world.spawn((letter, Typed { typed_at_ms: now_ms }));
    Some(id)
}

/// Remove the oldest group once there are too many letters and groups.
/// Typed letters go first. They also go once letters reach the spawn cap,
/// however few groups there are. Returns the evicted group.
pub fn evict_oldest_word(world: &mut World, rules: &WordRules) -> Option<WordGroup> {
    let letters = letter_count(world);
    let groups = word_groups(world);
    let oldest = *groups.first()?;
    let stalled = oldest == WordGroup::Typed && letters >= rules.max_letters;
    if !stalled && (letters <= rules.evict_letters || groups.len() <= rules.evict_groups) {
        return None;
    }

    let doomed: Vec<Entity> = match oldest {
        WordGroup::Typed => world.query::<&Typed>().iter().map(|(entity, _)| entity).collect(),
        WordGroup::Word(group) => {
            let mut doomed: Vec<Entity> = world
                .query::<&AgentState>()
                .iter()
                .filter(|(_, a)| a.group == Some(group))
                .map(|(entity, _)| entity)
                .collect();
            doomed.extend(
                world
                    .query::<&Word>()
                    .iter()
                    .filter(|(_, w)| w.group == group)
                    .map(|(entity, _)| entity),
            );
            doomed
        }
    };
    for entity in doomed {
        let _ = world.despawn(entity);
    }
    Some(oldest)
}

/// Outcome of one periodic word tick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WordTick {
    pub spawned: Option<String>,
    pub evicted: Option<WordGroup>,
}

/// One periodic tick: maybe add a word from `phrases`, then maybe evict the
/// oldest one.
#[allow(clippy::too_many_arguments)]
pub fn word_tick<R: Rng + ?Sized>(
    world: &mut World,
    rules: &WordRules,
    phrases: &[String],
    next_group: &mut u64,
    next_id: &mut u64,
    spec: &SpawnSpec,
    bounds: Bounds,
    now_ms: f64,
    rng: &mut R,
) -> WordTick {
    let mut tick = WordTick::default();
    let chance = if rules.chance.is_finite() {
        rules.chance.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if rng.gen_bool(chance) && letter_count(world) < rules.max_letters {
        if let Some(text) = phrases.choose(rng) {
            spawn_word_entities(world, text, *next_group, next_id, spec, bounds, now_ms, rng);
            *next_group += 1;
            tick.spawned = Some(text.clone());
        }
    }
    tick.evicted = evict_oldest_word(world, rules);
    tick
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaos_logic::constants::SceneId;
    use chaos_logic::scene::SceneConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn letter_spec() -> SpawnSpec {
        SceneConfig::builtin(SceneId::Typography).spawns[&AgentKind::Letter].clone()
    }

    #[test]
    fn words_own_their_letters() {
        let mut world = World::new();
        let mut next_id = 0;
        let mut rng = StdRng::seed_from_u64(1);
        let spec = letter_spec();
        spawn_word_entities(&mut world, "DRIFT", 0, &mut next_id, &spec, Bounds::default(), 0.0, &mut rng);
        spawn_word_entities(&mut world, "GLOW", 1, &mut next_id, &spec, Bounds::default(), 0.0, &mut rng);
        assert_eq!(letter_count(&world), 9);
        assert_eq!(word_groups(&world), vec![WordGroup::Word(0), WordGroup::Word(1)]);
        assert_eq!(next_id, 9);
    }

    #[test]
    fn evicts_oldest_group_only_past_both_limits() {
        let mut world = World::new();
        let mut next_id = 0;
        let mut rng = StdRng::seed_from_u64(2);
        let spec = letter_spec();
        let rules = WordRules::default();

        // 9 words of 17 letters: 153 letters, 9 groups.
        for group in 0..9 {
            spawn_word_entities(
                &mut world,
                "ABCDEFGHIJKLMNOPQ",
                group,
                &mut next_id,
                &spec,
                Bounds::default(),
                0.0,
                &mut rng,
            );
        }
        assert_eq!(evict_oldest_word(&mut world, &rules), Some(WordGroup::Word(0)));
        assert_eq!(letter_count(&world), 136);
        assert_eq!(word_groups(&world).first(), Some(&WordGroup::Word(1)));
        // Now under the letter limit.
        assert_eq!(evict_oldest_word(&mut world, &rules), None);
    }

    #[test]
    fn few_long_words_are_kept() {
        let mut world = World::new();
        let mut next_id = 0;
        let mut rng = StdRng::seed_from_u64(3);
        let long: String = std::iter::repeat('X').take(80).collect();
        for group in 0..2 {
            spawn_word_entities(&mut world, &long, group, &mut next_id, &letter_spec(), Bounds::default(), 0.0, &mut rng);
        }
        assert_eq!(letter_count(&world), 160);
        assert_eq!(evict_oldest_word(&mut world, &WordRules::default()), None);
    }

    #[test]
    fn typed_letters_are_uppercased_and_ungrouped() {
        let mut world = World::new();
        let mut next_id = 10;
        let mut rng = StdRng::seed_from_u64(4);
        let at = Vec2::new(300.0, 300.0);
        assert_eq!(
            type_letter(&mut world, 'q', at, &mut next_id, &letter_spec(), Bounds::default(), 5.0, &mut rng),
            Some(10)
        );
        assert_eq!(
            type_letter(&mut world, ' ', at, &mut next_id, &letter_spec(), Bounds::default(), 5.0, &mut rng),
            None
        );
        let letters: Vec<AgentState> = world.query::<&AgentState>().iter().map(|(_, a)| a.clone()).collect();
        assert_eq!(letters.len(), 1);
        assert_eq!(letters[0].glyph, Some('Q'));
        assert_eq!(letters[0].group, None);
        assert!(letters[0].position.distance(&at) < 57.0);
        assert_eq!(world.query::<&Typed>().iter().count(), 1);
    }

    #[test]
    fn word_tick_respects_letter_cap() {
        let mut world = World::new();
        let mut next_id = 0;
        let mut next_group = 0;
        let mut rng = StdRng::seed_from_u64(5);
        let rules = WordRules {
            chance: 1.0,
            max_letters: 6,
            ..WordRules::default()
        };
        let phrases = vec!["STAY".to_string()];
        let first = word_tick(&mut world, &rules, &phrases, &mut next_group, &mut next_id, &letter_spec(), Bounds::default(), 0.0, &mut rng);
        assert_eq!(first.spawned.as_deref(), Some("STAY"));
        let second = word_tick(&mut world, &rules, &phrases, &mut next_group, &mut next_id, &letter_spec(), Bounds::default(), 0.0, &mut rng);
        assert_eq!(second.spawned.as_deref(), Some("STAY"));
        let third = word_tick(&mut world, &rules, &phrases, &mut next_group, &mut next_id, &letter_spec(), Bounds::default(), 0.0, &mut rng);
        assert_eq!(third.spawned, None);
        assert_eq!(letter_count(&world), 8);
        assert_eq!(next_group, 2);
    }

    #[test]
    fn typed_letters_are_the_oldest_group() {
        let mut world = World::new();
        let mut next_id = 0;
        let mut rng = StdRng::seed_from_u64(6);
        let spec = letter_spec();
        let bounds = Bounds::default();
        let rules = WordRules::default();
        let at = Vec2::new(640.0, 400.0);

        for _ in 0..210 {
            type_letter(&mut world, 'x', at, &mut next_id, &spec, bounds, 0.0, &mut rng);
        }
        for group in 0..9 {
            spawn_word_entities(&mut world, "GLOW", group, &mut next_id, &spec, bounds, 0.0, &mut rng);
        }
        assert_eq!(word_groups(&world).len(), 10);
        assert_eq!(word_groups(&world)[0], WordGroup::Typed);

        assert_eq!(evict_oldest_word(&mut world, &rules), Some(WordGroup::Typed));
        assert_eq!(typed_count(&world), 0);
        assert_eq!(letter_count(&world), 36);
        assert_eq!(word_groups(&world).first(), Some(&WordGroup::Word(0)));
    }

    #[test]
    fn word_tick_evicts_typed_letters_before_words() {
        let mut world = World::new();
        let mut next_id = 0;
        let mut rng = StdRng::seed_from_u64(7);
        let spec = letter_spec();
        let bounds = Bounds::default();
        let rules = WordRules {
            chance: 1.0,
            ..WordRules::default()
        };
        let phrases = vec!["DRIFT".to_string()];
        let at = Vec2::new(640.0, 400.0);

        for group in 0..8 {
            spawn_word_entities(&mut world, "DRIFT", group, &mut next_id, &spec, bounds, 0.0, &mut rng);
        }
        for _ in 0..1_000 {
            type_letter(&mut world, 'x', at, &mut next_id, &spec, bounds, 0.0, &mut rng);
        }
        assert_eq!(letter_count(&world), 1_040);

        let mut next_group = 8;
        let out = word_tick(&mut world, &rules, &phrases, &mut next_group, &mut next_id, &spec, bounds, 0.0, &mut rng);
        assert_eq!(out.spawned, None);
        assert_eq!(out.evicted, Some(WordGroup::Typed));
        assert_eq!(letter_count(&world), 40);
        assert_eq!(word_groups(&world), (0..8).map(WordGroup::Word).collect::<Vec<_>>());
    }

    #[test]
    fn typing_past_the_letter_cap_clears_typed_letters() {
        let mut world = World::new();
        let mut next_id = 0;
        let mut rng = StdRng::seed_from_u64(8);
        let spec = letter_spec();
        let bounds = Bounds::default();
        let rules = WordRules::default();
        let at = Vec2::new(640.0, 400.0);

        for group in 0..6 {
            spawn_word_entities(&mut world, "FLOAT", group, &mut next_id, &spec, bounds, 0.0, &mut rng);
        }
        for _ in 0..169 {
            type_letter(&mut world, 'x', at, &mut next_id, &spec, bounds, 0.0, &mut rng);
        }
        // 199 letters in 7 groups: below both limits.
        assert_eq!(evict_oldest_word(&mut world, &rules), None);

        type_letter(&mut world, 'x', at, &mut next_id, &spec, bounds, 0.0, &mut rng);
        assert_eq!(evict_oldest_word(&mut world, &rules), Some(WordGroup::Typed));
        assert_eq!(letter_count(&world), 30);
        assert_eq!(word_groups(&world).len(), 6);
    }

    #[test]
    fn words_alone_at_the_letter_cap_are_kept() {
        let mut world = World::new();
        let mut next_id = 0;
        let mut rng = StdRng::seed_from_u64(9);
        let long: String = std::iter::repeat('W').take(110).collect();
        for group in 0..2 {
            spawn_word_entities(&mut world, &long, group, &mut next_id, &letter_spec(), Bounds::default(), 0.0, &mut rng);
        }
        assert_eq!(letter_count(&world), 220);
        assert_eq!(evict_oldest_word(&mut world, &WordRules::default()), None);
    }
}
