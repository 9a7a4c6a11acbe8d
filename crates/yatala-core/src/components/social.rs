//! Per-NPC relationship records.

use serde::{Deserialize, Serialize};
use yatala_logic::stats::{clamp_add, SIGNED_MIN, STAT_MAX, STAT_MIN};

/// How an NPC feels about the player. `standing` runs −100..=100; the
/// three traits run 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    standing: i32,
    trust: i32,
    respect: i32,
    fear: i32,
}

impl Default for Relationship {
    fn default() -> Self {
        Self {
            standing: 0,
            trust: 50,
            respect: 50,
            fear: 0,
        }
    }
}

impl Relationship {
    /// A first meeting with an NPC who starts out with an opinion.
    pub fn with_standing(standing: i32) -> Self {
        Self {
            standing: standing.clamp(SIGNED_MIN, STAT_MAX),
            ..Self::default()
        }
    }

    pub fn standing(&self) -> i32 {
        self.standing
    }

    pub fn trust(&self) -> i32 {
        self.trust
    }

    pub fn respect(&self) -> i32 {
        self.respect
    }

    pub fn fear(&self) -> i32 {
        self.fear
    }

    pub fn adjust_standing(&mut self, delta: i32) {
        self.standing = clamp_add(self.standing, delta, SIGNED_MIN, STAT_MAX);
    }

    pub fn adjust_traits(&mut self, trust: i32, respect: i32, fear: i32) {
        self.trust = clamp_add(self.trust, trust, STAT_MIN, STAT_MAX);
        self.respect = clamp_add(self.respect, respect, STAT_MIN, STAT_MAX);
        self.fear = clamp_add(self.fear, fear, STAT_MIN, STAT_MAX);
    }

    pub fn normalize(&mut self) {
        self.adjust_standing(0);
        self.adjust_traits(0, 0, 0);
    }
}

/// Change applied to one NPC's record by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipDelta {
    pub standing: i32,
    pub trust: i32,
    pub respect: i32,
    pub fear: i32,
}

impl RelationshipDelta {
    pub fn apply_to(&self, relationship: &mut Relationship) {
        relationship.adjust_standing(self.standing);
        relationship.adjust_traits(self.trust, self.respect, self.fear);
    }
}
