//! Attribute and skill blocks.
//!
//! Every stat is addressed through an enumerated key ([`Attribute`] or
//! [`Skill`]) so an invalid stat name is rejected when content is parsed,
//! never silently ignored at run time. Values live behind accessors that
//! clamp on every write.
//!
//! ```
//! use yatala_logic::stats::{Skill, Skills};
//!
//! let mut skills = Skills::default();
//! assert_eq!(skills.adjust(Skill::Crafting, 250), 100);
//! assert_eq!(skills.adjust(Skill::Crafting, -300), 0);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lower bound of an ordinary 0–100 stat.
pub const STAT_MIN: i32 = 0;
/// Upper bound shared by every bounded stat.
pub const STAT_MAX: i32 = 100;
/// Lower bound of reputation-like signed stats.
pub const SIGNED_MIN: i32 = -100;

/// Add `delta` to `value` and clamp the result into `[min, max]`.
pub fn clamp_add(value: i32, delta: i32, min: i32, max: i32) -> i32 {
    value.saturating_add(delta).clamp(min, max)
}

/// Clamp into the ordinary 0–100 range.
pub fn clamp_stat(value: i32) -> i32 {
    value.clamp(STAT_MIN, STAT_MAX)
}

// ── Attributes ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Stamina,
    Toughness,
    Intelligence,
    Willpower,
    Sanity,
    Perception,
    Charisma,
    Intimidation,
    /// Standing among the general prison population (−100 to 100).
    Reputation,
    Respect,
    StressTolerance,
    EmotionalStability,
    Resilience,
    Adaptability,
}

impl Attribute {
    pub const ALL: [Attribute; 15] = [
        Attribute::Strength,
        Attribute::Stamina,
        Attribute::Toughness,
        Attribute::Intelligence,
        Attribute::Willpower,
        Attribute::Sanity,
        Attribute::Perception,
        Attribute::Charisma,
        Attribute::Intimidation,
        Attribute::Reputation,
        Attribute::Respect,
        Attribute::StressTolerance,
        Attribute::EmotionalStability,
        Attribute::Resilience,
        Attribute::Adaptability,
    ];

    /// Inclusive valid range for this attribute.
    pub fn bounds(self) -> (i32, i32) {
        match self {
            Attribute::Reputation => (SIGNED_MIN, STAT_MAX),
            _ => (STAT_MIN, STAT_MAX),
        }
    }

    /// Content key, matching the serialized name.
    pub fn key(self) -> &'static str {
        match self {
            Attribute::Strength => "strength",
            Attribute::Stamina => "stamina",
            Attribute::Toughness => "toughness",
            Attribute::Intelligence => "intelligence",
            Attribute::Willpower => "willpower",
            Attribute::Sanity => "sanity",
            Attribute::Perception => "perception",
            Attribute::Charisma => "charisma",
            Attribute::Intimidation => "intimidation",
            Attribute::Reputation => "reputation",
            Attribute::Respect => "respect",
            Attribute::StressTolerance => "stress_tolerance",
            Attribute::EmotionalStability => "emotional_stability",
            Attribute::Resilience => "resilience",
            Attribute::Adaptability => "adaptability",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.key() == key)
    }
}

/// The attribute block. Fields are private so every write goes through a
/// clamping accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    strength: i32,
    stamina: i32,
    toughness: i32,
    intelligence: i32,
    willpower: i32,
    sanity: i32,
    perception: i32,
    charisma: i32,
    intimidation: i32,
    reputation: i32,
    respect: i32,
    stress_tolerance: i32,
    emotional_stability: i32,
    resilience: i32,
    adaptability: i32,
}

impl Default for Attributes {
    /// New-inmate baseline.
    fn default() -> Self {
        Self {
            strength: 50,
            stamina: 50,
            toughness: 50,
            intelligence: 50,
            willpower: 50,
            sanity: 100,
            perception: 50,
            charisma: 50,
            intimidation: 50,
            reputation: 0,
            respect: 0,
            stress_tolerance: 50,
            emotional_stability: 50,
            resilience: 50,
            adaptability: 50,
        }
    }
}

impl Attributes {
    pub fn get(&self, attr: Attribute) -> i32 {
        match attr {
            Attribute::Strength => self.strength,
            Attribute::Stamina => self.stamina,
            Attribute::Toughness => self.toughness,
            Attribute::Intelligence => self.intelligence,
            Attribute::Willpower => self.willpower,
            Attribute::Sanity => self.sanity,
            Attribute::Perception => self.perception,
            Attribute::Charisma => self.charisma,
            Attribute::Intimidation => self.intimidation,
            Attribute::Reputation => self.reputation,
            Attribute::Respect => self.respect,
            Attribute::StressTolerance => self.stress_tolerance,
            Attribute::EmotionalStability => self.emotional_stability,
            Attribute::Resilience => self.resilience,
            Attribute::Adaptability => self.adaptability,
        }
    }

    fn slot_mut(&mut self, attr: Attribute) -> &mut i32 {
        match attr {
            Attribute::Strength => &mut self.strength,
            Attribute::Stamina => &mut self.stamina,
            Attribute::Toughness => &mut self.toughness,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Willpower => &mut self.willpower,
            Attribute::Sanity => &mut self.sanity,
            Attribute::Perception => &mut self.perception,
            Attribute::Charisma => &mut self.charisma,
            Attribute::Intimidation => &mut self.intimidation,
            Attribute::Reputation => &mut self.reputation,
            Attribute::Respect => &mut self.respect,
            Attribute::StressTolerance => &mut self.stress_tolerance,
            Attribute::EmotionalStability => &mut self.emotional_stability,
            Attribute::Resilience => &mut self.resilience,
            Attribute::Adaptability => &mut self.adaptability,
        }
    }

    /// Apply a delta, clamped to the attribute's bounds. Returns the new value.
    pub fn adjust(&mut self, attr: Attribute, delta: i32) -> i32 {
        let (min, max) = attr.bounds();
        let slot = self.slot_mut(attr);
        *slot = clamp_add(*slot, delta, min, max);
        *slot
    }

    /// Overwrite a value, clamped to the attribute's bounds.
    pub fn set(&mut self, attr: Attribute, value: i32) {
        let (min, max) = attr.bounds();
        *self.slot_mut(attr) = value.clamp(min, max);
    }

    /// Re-clamp every attribute, e.g. after deserializing.
    pub fn normalize(&mut self) {
        for attr in Attribute::ALL {
            self.set(attr, self.get(attr));
        }
    }
}

// ── Skills ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Combat,
    Survival,
    Social,
    Practical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    // Combat
    Brawling,
    KnifeFighting,
    Defense,
    DirtyFighting,
    // Survival
    Stealth,
    Lockpicking,
    FirstAid,
    Cooking,
    // Social
    Persuasion,
    Intimidation,
    Deception,
    Leadership,
    Psychology,
    // Practical
    Crafting,
    Trading,
    Smuggling,
    Planning,
    Electronics,
    Chemistry,
}

impl Skill {
    pub const ALL: [Skill; 19] = [
        Skill::Brawling,
        Skill::KnifeFighting,
        Skill::Defense,
        Skill::DirtyFighting,
        Skill::Stealth,
        Skill::Lockpicking,
        Skill::FirstAid,
        Skill::Cooking,
        Skill::Persuasion,
        Skill::Intimidation,
        Skill::Deception,
        Skill::Leadership,
        Skill::Psychology,
        Skill::Crafting,
        Skill::Trading,
        Skill::Smuggling,
        Skill::Planning,
        Skill::Electronics,
        Skill::Chemistry,
    ];

    pub fn category(self) -> SkillCategory {
        match self {
            Skill::Brawling | Skill::KnifeFighting | Skill::Defense | Skill::DirtyFighting => {
                SkillCategory::Combat
            }
            Skill::Stealth | Skill::Lockpicking | Skill::FirstAid | Skill::Cooking => {
                SkillCategory::Survival
            }
            Skill::Persuasion
            | Skill::Intimidation
            | Skill::Deception
            | Skill::Leadership
            | Skill::Psychology => SkillCategory::Social,
            Skill::Crafting
            | Skill::Trading
            | Skill::Smuggling
            | Skill::Planning
            | Skill::Electronics
            | Skill::Chemistry => SkillCategory::Practical,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Skill::Brawling => "brawling",
            Skill::KnifeFighting => "knife_fighting",
            Skill::Defense => "defense",
            Skill::DirtyFighting => "dirty_fighting",
            Skill::Stealth => "stealth",
            Skill::Lockpicking => "lockpicking",
            Skill::FirstAid => "first_aid",
            Skill::Cooking => "cooking",
            Skill::Persuasion => "persuasion",
            Skill::Intimidation => "intimidation",
            Skill::Deception => "deception",
            Skill::Leadership => "leadership",
            Skill::Psychology => "psychology",
            Skill::Crafting => "crafting",
            Skill::Trading => "trading",
            Skill::Smuggling => "smuggling",
            Skill::Planning => "planning",
            Skill::Electronics => "electronics",
            Skill::Chemistry => "chemistry",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.key() == key)
    }
}

/// A required skill level that the current block does not meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillShortfall {
    pub skill: Skill,
    pub required: i32,
    pub current: i32,
}

/// The skill block. All skills range 0–100 and start at 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    brawling: i32,
    knife_fighting: i32,
    defense: i32,
    dirty_fighting: i32,
    stealth: i32,
    lockpicking: i32,
    first_aid: i32,
    cooking: i32,
    persuasion: i32,
    intimidation: i32,
    deception: i32,
    leadership: i32,
    psychology: i32,
    crafting: i32,
    trading: i32,
    smuggling: i32,
    planning: i32,
    electronics: i32,
    chemistry: i32,
}

impl Skills {
    pub fn get(&self, skill: Skill) -> i32 {
        match skill {
            Skill::Brawling => self.brawling,
            Skill::KnifeFighting => self.knife_fighting,
            Skill::Defense => self.defense,
            Skill::DirtyFighting => self.dirty_fighting,
            Skill::Stealth => self.stealth,
            Skill::Lockpicking => self.lockpicking,
            Skill::FirstAid => self.first_aid,
            Skill::Cooking => self.cooking,
            Skill::Persuasion => self.persuasion,
            Skill::Intimidation => self.intimidation,
            Skill::Deception => self.deception,
            Skill::Leadership => self.leadership,
            Skill::Psychology => self.psychology,
            Skill::Crafting => self.crafting,
            Skill::Trading => self.trading,
            Skill::Smuggling => self.smuggling,
            Skill::Planning => self.planning,
            Skill::Electronics => self.electronics,
            Skill::Chemistry => self.chemistry,
        }
    }

    fn slot_mut(&mut self, skill: Skill) -> &mut i32 {
        match skill {
            Skill::Brawling => &mut self.brawling,
            Skill::KnifeFighting => &mut self.knife_fighting,
            Skill::Defense => &mut self.defense,
            Skill::DirtyFighting => &mut self.dirty_fighting,
            Skill::Stealth => &mut self.stealth,
            Skill::Lockpicking => &mut self.lockpicking,
            Skill::FirstAid => &mut self.first_aid,
            Skill::Cooking => &mut self.cooking,
            Skill::Persuasion => &mut self.persuasion,
            Skill::Intimidation => &mut self.intimidation,
            Skill::Deception => &mut self.deception,
            Skill::Leadership => &mut self.leadership,
            Skill::Psychology => &mut self.psychology,
            Skill::Crafting => &mut self.crafting,
            Skill::Trading => &mut self.trading,
            Skill::Smuggling => &mut self.smuggling,
            Skill::Planning => &mut self.planning,
            Skill::Electronics => &mut self.electronics,
            Skill::Chemistry => &mut self.chemistry,
        }
    }

    /// Apply a delta clamped to 0–100. Returns the new value.
    pub fn adjust(&mut self, skill: Skill, delta: i32) -> i32 {
        let slot = self.slot_mut(skill);
        *slot = clamp_add(*slot, delta, STAT_MIN, STAT_MAX);
        *slot
    }

    pub fn set(&mut self, skill: Skill, value: i32) {
        *self.slot_mut(skill) = clamp_stat(value);
    }

    pub fn normalize(&mut self) {
        for skill in Skill::ALL {
            self.set(skill, self.get(skill));
        }
    }

    /// First requirement in `required` this block fails, in skill order.
    pub fn first_shortfall(&self, required: &BTreeMap<Skill, i32>) -> Option<SkillShortfall> {
        required.iter().find_map(|(&skill, &level)| {
            let current = self.get(skill);
            (current < level).then_some(SkillShortfall {
                skill,
                required: level,
                current,
            })
        })
    }

    /// Sum of all skills in a category.
    pub fn category_total(&self, category: SkillCategory) -> i32 {
        Skill::ALL
            .iter()
            .filter(|s| s.category() == category)
            .map(|&s| self.get(s))
            .sum()
    }
}
