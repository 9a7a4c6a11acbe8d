//! Experience curve and level-up bookkeeping.

use serde::{Deserialize, Serialize};

/// Health and energy added to both maxima on each level gained.
pub const LEVEL_UP_VITAL_BONUS: i32 = 5;

/// Experience needed to go from `level` to `level + 1`.
///
/// The curve steepens every ten levels.
pub fn experience_for_level(level: u32) -> u64 {
    let l = u64::from(level.max(1));
    match l {
        0..=10 => 100 * l,
        11..=20 => 200 * (l - 10) + 1_000,
        21..=30 => 400 * (l - 20) + 3_000,
        31..=40 => 800 * (l - 30) + 7_000,
        _ => 1_600 * (l - 40) + 15_000,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    level: u32,
    experience: u64,
    experience_to_next: u64,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_to_next: experience_for_level(1),
        }
    }
}

impl Progression {
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    pub fn experience_to_next(&self) -> u64 {
        self.experience_to_next
    }

    /// Add experience, carrying the remainder over each level boundary.
    /// Returns the number of levels gained.
    pub fn gain(&mut self, amount: u64) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let mut gained = 0;
        while self.experience >= self.experience_to_next {
            self.experience -= self.experience_to_next;
            self.level += 1;
            self.experience_to_next = experience_for_level(self.level);
            gained += 1;
        }
        gained
    }
}
