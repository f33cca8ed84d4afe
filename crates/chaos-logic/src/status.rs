//! Familiarity-tiered captions shown under each scene.

use serde::{Deserialize, Serialize};

use crate::constants::SceneId;

/// How attached the pet creature is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetBond {
    Stranger,
    Curious,
    Familiar,
    Friend,
    Bonded,
}

impl PetBond {
    pub fn from_familiarity(familiarity: f64) -> PetBond {
        match familiarity.round() as i64 {
            i64::MIN..=1 => PetBond::Stranger,
            2 => PetBond::Curious,
            3 => PetBond::Familiar,
            4 => PetBond::Friend,
            _ => PetBond::Bonded,
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            PetBond::Stranger => "...",
            PetBond::Curious => "it noticed you",
            PetBond::Familiar => "it recognizes you",
            PetBond::Friend => "it is happy to see you!",
            PetBond::Bonded => "♥ it loves you ♥",
        }
    }
}

/// Caption for `scene` at `familiarity`. Tiers are inclusive upper bounds.
pub fn status_message(scene: SceneId, familiarity: f64) -> &'static str {
    let f = familiarity.round();
    let tier = |tiers: &[(f64, &'static str)], last: &'static str| {
        tiers
            .iter()
            .find(|(upto, _)| f <= *upto)
            .map(|(_, text)| *text)
            .unwrap_or(last)
    };
    match scene {
        SceneId::Aquarium => tier(
            &[
                (1.0, "observe"),
                (3.0, "the creatures notice you"),
                (6.0, "they drift toward you"),
            ],
            "they know you now",
        ),
        SceneId::Forest => tier(
            &[
                (1.0, "something watches"),
                (3.0, "the fog begins to clear"),
                (5.0, "you are known here"),
                (8.0, "the forest welcomes you"),
            ],
            "this is your home now",
        ),
        SceneId::Portrait => tier(
            &[
                (1.0, "something is there"),
                (3.0, "it has noticed you"),
                (6.0, "it remembers you"),
                (10.0, "it has been waiting"),
            ],
            "it is so close now",
        ),
        SceneId::Lure => tier(
            &[
                (1.0, "you are the light"),
                (3.0, "they are drawn to you"),
                (5.0, "you attract more each time"),
            ],
            "they remember your glow",
        ),
        SceneId::Pet => PetBond::from_familiarity(f).caption(),
        SceneId::Abyss | SceneId::Typography | SceneId::Console => "",
    }
}

/// Portrait hint about the visitor's favorite other room.
pub fn favorite_hint(favorite: Option<SceneId>, familiarity: f64) -> Option<String> {
    match favorite {
        Some(scene) if scene != SceneId::Portrait && familiarity >= 5.0 => {
            Some(format!("it knows you visit {}", scene.display_name()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aquarium_tiers() {
        assert_eq!(status_message(SceneId::Aquarium, 0.0), "observe");
        assert_eq!(status_message(SceneId::Aquarium, 1.0), "observe");
        assert_eq!(status_message(SceneId::Aquarium, 2.0), "the creatures notice you");
        assert_eq!(status_message(SceneId::Aquarium, 6.0), "they drift toward you");
        assert_eq!(status_message(SceneId::Aquarium, 7.0), "they know you now");
    }

    #[test]
    fn forest_and_lure_tiers() {
        assert_eq!(status_message(SceneId::Forest, 9.0), "this is your home now");
        assert_eq!(status_message(SceneId::Lure, 4.0), "you attract more each time");
    }

    #[test]
    fn pet_bond_tiers() {
        assert_eq!(PetBond::from_familiarity(0.0), PetBond::Stranger);
        assert_eq!(PetBond::from_familiarity(2.0), PetBond::Curious);
        assert_eq!(PetBond::from_familiarity(4.0), PetBond::Friend);
        assert_eq!(PetBond::from_familiarity(12.0), PetBond::Bonded);
        assert_eq!(status_message(SceneId::Pet, 3.0), "it recognizes you");
    }

    #[test]
    fn favorite_hint_needs_familiarity_and_another_room() {
        assert_eq!(favorite_hint(Some(SceneId::Forest), 4.0), None);
        assert_eq!(favorite_hint(Some(SceneId::Portrait), 9.0), None);
        assert_eq!(
            favorite_hint(Some(SceneId::Forest), 5.0).as_deref(),
            Some("it knows you visit the Forest")
        );
    }
}
