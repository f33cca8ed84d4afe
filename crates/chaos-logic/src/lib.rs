//! Pure behavior logic for the chaos playground installation.
//!
//! Everything here is independent of the ECS world, the wall clock and the
//! storage backend. Functions take plain data and return results, so the
//! whole behavior surface can be unit-tested and driven from a headless
//! harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`agent`] | Per-agent state record shared by every scene |
//! | [`constants`] | Scene ids, agent kinds, frame timing constants |
//! | [`familiarity`] | Effective familiarity resolution, time-of-day classes |
//! | [`leviathan`] | Rare giant crossing the abyss, pushing seekers aside |
//! | [`phrases`] | Personalized typography phrases and console transcript |
//! | [`pointer`] | Latest pointer sample with decaying speed |
//! | [`population`] | Familiarity to population counts, unlocks, coefficients |
//! | [`profile`] | Persisted visit / time-spent profile and its insights |
//! | [`scene`] | Built-in per-scene tuning tables and validation |
//! | [`spawn`] | Randomized initial agent state per kind |
//! | [`status`] | Familiarity-tiered status captions, pet bond tiers |
//! | [`steering`] | Orbit / seek / flee / wander drives and integration |
//! | [`tendril`] | Follow-the-leader tendril chains (abyss) |
//! | [`vector`] | 2D vector math |
//! | [`wave`] | Smoothstep oscillator used in focus mode |

pub mod agent;
pub mod constants;
pub mod familiarity;
pub mod leviathan;
pub mod phrases;
pub mod pointer;
pub mod population;
pub mod profile;
pub mod scene;
pub mod spawn;
pub mod status;
pub mod steering;
pub mod tendril;
pub mod vector;
pub mod wave;
