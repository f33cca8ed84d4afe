//! Systems - logic that operates on the agent pool

mod abyss;
mod population;
mod steering;
mod words;

pub use abyss::*;
pub use population::*;
pub use steering::*;
pub use words::*;
