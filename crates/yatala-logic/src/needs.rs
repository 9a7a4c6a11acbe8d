//! Physiological needs and psychological wellness.
//!
//! [`Vitals`] covers health, energy, hunger and hygiene. [`Wellness`]
//! covers stress, hope and mental fatigue plus the derived [`Mood`].
//! Both clamp on every write. Time-driven change is applied one elapsed
//! game hour at a time by [`decay`], so splitting an advance into pieces
//! never changes the result.
//!
//! # Mood thresholds
//!
//! Mood is derived from the distress score
//! `(stress + (100 - hope) + fatigue) / 3` (integer division, 0–100):
//!
//! | Score | Mood |
//! |-------|------|
//! | 0–19  | Optimistic |
//! | 20–39 | Content |
//! | 40–59 | Neutral |
//! | 60–79 | Anxious |
//! | 80–100 | Distressed |

use serde::{Deserialize, Serialize};

use crate::clock::{HourWindow, HOURS_PER_DAY};
use crate::stats::{clamp_add, Attribute, Skill, STAT_MAX, STAT_MIN};

/// Per-hour rates for time-driven change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedRates {
    pub hunger_per_hour: i32,
    pub hygiene_per_hour: i32,
    pub fatigue_per_hour: i32,
    /// Energy regained for each hour spent inside `rest_window`.
    pub rest_energy_per_hour: i32,
    pub rest_window: HourWindow,
    /// Health lost for each hour spent fully starving (hunger 100).
    pub starvation_damage_per_hour: i32,
    /// Stress rises by one every this many elapsed hours (0 disables).
    pub stress_drift_hours: u32,
    /// Hope falls by one every this many elapsed hours (0 disables).
    pub hope_drift_hours: u32,
}

impl Default for NeedRates {
    fn default() -> Self {
        Self {
            hunger_per_hour: 2,
            hygiene_per_hour: 1,
            fatigue_per_hour: 1,
            rest_energy_per_hour: 10,
            rest_window: HourWindow::new(22, 6),
            starvation_damage_per_hour: 1,
            stress_drift_hours: 4,
            hope_drift_hours: 6,
        }
    }
}

/// Health, energy, hunger and hygiene.
///
/// Hunger runs 0 (full) to 100 (starving); hygiene 100 (clean) to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    health: i32,
    max_health: i32,
    energy: i32,
    max_energy: i32,
    hunger: i32,
    hygiene: i32,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            health: 100,
            max_health: 100,
            energy: 100,
            max_energy: 100,
            hunger: 0,
            hygiene: 100,
        }
    }
}

impl Vitals {
    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn energy(&self) -> i32 {
        self.energy
    }

    pub fn max_energy(&self) -> i32 {
        self.max_energy
    }

    pub fn hunger(&self) -> i32 {
        self.hunger
    }

    pub fn hygiene(&self) -> i32 {
        self.hygiene
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = clamp_add(self.health, amount.max(0), 0, self.max_health);
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = clamp_add(self.health, -amount.max(0), 0, self.max_health);
    }

    pub fn adjust_health(&mut self, delta: i32) {
        self.health = clamp_add(self.health, delta, 0, self.max_health);
    }

    pub fn restore_energy(&mut self, amount: i32) {
        self.energy = clamp_add(self.energy, amount.max(0), 0, self.max_energy);
    }

    pub fn adjust_energy(&mut self, delta: i32) {
        self.energy = clamp_add(self.energy, delta, 0, self.max_energy);
    }

    /// Spend energy. Returns false and changes nothing if there is not enough.
    pub fn use_energy(&mut self, amount: i32) -> bool {
        if amount < 0 || self.energy < amount {
            return false;
        }
        self.energy -= amount;
        true
    }

    pub fn adjust_hunger(&mut self, delta: i32) {
        self.hunger = clamp_add(self.hunger, delta, STAT_MIN, STAT_MAX);
    }

    pub fn adjust_hygiene(&mut self, delta: i32) {
        self.hygiene = clamp_add(self.hygiene, delta, STAT_MIN, STAT_MAX);
    }

    /// Raise both maxima (level up) and refill health and energy.
    pub fn raise_max_and_refill(&mut self, health: i32, energy: i32) {
        self.max_health = self.max_health.saturating_add(health.max(0));
        self.max_energy = self.max_energy.saturating_add(energy.max(0));
        self.health = self.max_health;
        self.energy = self.max_energy;
    }

    pub fn is_starving(&self) -> bool {
        self.hunger >= STAT_MAX
    }

    pub fn is_incapacitated(&self) -> bool {
        self.health <= 0
    }

    /// Pull every field back into range, e.g. after deserializing.
    pub fn normalize(&mut self) {
        self.max_health = self.max_health.max(1);
        self.max_energy = self.max_energy.max(1);
        self.health = self.health.clamp(0, self.max_health);
        self.energy = self.energy.clamp(0, self.max_energy);
        self.hunger = self.hunger.clamp(STAT_MIN, STAT_MAX);
        self.hygiene = self.hygiene.clamp(STAT_MIN, STAT_MAX);
    }
}

/// Mood categories ordered from least to most distressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mood {
    Optimistic,
    Content,
    Neutral,
    Anxious,
    Distressed,
}

impl Mood {
    pub fn from_score(score: i32) -> Self {
        match score {
            i32::MIN..=19 => Mood::Optimistic,
            20..=39 => Mood::Content,
            40..=59 => Mood::Neutral,
            60..=79 => Mood::Anxious,
            _ => Mood::Distressed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Optimistic => "Optimistic",
            Mood::Content => "Content",
            Mood::Neutral => "Neutral",
            Mood::Anxious => "Anxious",
            Mood::Distressed => "Distressed",
        }
    }
}

/// Stress, hope and mental fatigue, each 0–100, plus the derived mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wellness {
    stress: i32,
    hope: i32,
    fatigue: i32,
    mood: Mood,
}

impl Default for Wellness {
    fn default() -> Self {
        let mut w = Self {
            stress: 0,
            hope: 50,
            fatigue: 0,
            mood: Mood::Neutral,
        };
        w.refresh_mood();
        w
    }
}

impl Wellness {
    pub fn stress(&self) -> i32 {
        self.stress
    }

    pub fn hope(&self) -> i32 {
        self.hope
    }

    pub fn fatigue(&self) -> i32 {
        self.fatigue
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// Composite distress, 0 (calm, hopeful, alert) to 100.
    pub fn distress_score(&self) -> i32 {
        (self.stress + (STAT_MAX - self.hope) + self.fatigue) / 3
    }

    /// Apply the three deltas, clamp each, and recompute mood.
    pub fn update(&mut self, stress_delta: i32, hope_delta: i32, fatigue_delta: i32) -> Mood {
        self.stress = clamp_add(self.stress, stress_delta, STAT_MIN, STAT_MAX);
        self.hope = clamp_add(self.hope, hope_delta, STAT_MIN, STAT_MAX);
        self.fatigue = clamp_add(self.fatigue, fatigue_delta, STAT_MIN, STAT_MAX);
        self.refresh_mood();
        self.mood
    }

    /// Clamp each scalar and re-derive the mood.
    pub fn normalize(&mut self) {
        self.update(0, 0, 0);
    }

    fn refresh_mood(&mut self) {
        self.mood = Mood::from_score(self.distress_score());
    }
}

/// Apply `hours` elapsed game hours of decay, starting at absolute hour
/// index `first_hour` (hours since Day 1, 00:00).
///
/// Each hour: hunger and fatigue rise, hygiene falls, and energy
/// regenerates if that hour of day lies in the rest window. Energy does
/// not drain outside the rest window; actions spend it explicitly.
pub fn decay(
    vitals: &mut Vitals,
    wellness: &mut Wellness,
    rates: &NeedRates,
    first_hour: u64,
    hours: u64,
) {
    if hours == 0 {
        return;
    }
    let mut stress = 0;
    let mut hope = 0;
    let mut fatigue = 0;

    for index in first_hour..first_hour + hours {
        vitals.adjust_hunger(rates.hunger_per_hour);
        vitals.adjust_hygiene(-rates.hygiene_per_hour);
        fatigue += rates.fatigue_per_hour;

        let hour_of_day = (index % HOURS_PER_DAY) as u8;
        if rates.rest_window.contains(hour_of_day) {
            vitals.restore_energy(rates.rest_energy_per_hour);
        }
        if vitals.is_starving() {
            vitals.take_damage(rates.starvation_damage_per_hour);
        }

        let completed = index + 1;
        if rates.stress_drift_hours > 0 && completed % u64::from(rates.stress_drift_hours) == 0 {
            stress += 1;
        }
        if rates.hope_drift_hours > 0 && completed % u64::from(rates.hope_drift_hours) == 0 {
            hope -= 1;
        }
    }

    wellness.update(stress, hope, fatigue);
}

/// What an effect-map key refers to. Keys that parse to nothing are ignored
/// by effect application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTarget {
    Health,
    Energy,
    Hunger,
    Hygiene,
    Stress,
    Hope,
    Fatigue,
    Attribute(Attribute),
    Skill(Skill),
}

impl EffectTarget {
    pub fn parse(key: &str) -> Option<Self> {
        let target = match key {
            "health" => EffectTarget::Health,
            "energy" => EffectTarget::Energy,
            "hunger" => EffectTarget::Hunger,
            "hygiene" => EffectTarget::Hygiene,
            "stress" | "stress_level" => EffectTarget::Stress,
            "hope" | "hope_level" => EffectTarget::Hope,
            "fatigue" | "mental_fatigue" => EffectTarget::Fatigue,
            "intimidation_skill" => EffectTarget::Skill(Skill::Intimidation),
            other => {
                if let Some(attr) = Attribute::from_key(other) {
                    EffectTarget::Attribute(attr)
                } else {
                    EffectTarget::Skill(Skill::from_key(other)?)
                }
            }
        };
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daytime_rates() -> NeedRates {
        NeedRates::default()
    }

    #[test]
    fn test_two_daytime_hours() {
        let rates = daytime_rates();
        let mut vitals = Vitals::default();
        let mut wellness = Wellness::default();
        // Hours 6 and 7 of day 1.
        decay(&mut vitals, &mut wellness, &rates, 6, 2);
        assert_eq!(vitals.hunger(), 2 * rates.hunger_per_hour);
        assert_eq!(vitals.hygiene(), 100 - 2 * rates.hygiene_per_hour);
        assert_eq!(vitals.energy(), vitals.max_energy());
        assert_eq!(wellness.fatigue(), 2 * rates.fatigue_per_hour);
    }

    #[test]
    fn test_rest_window_regenerates_energy() {
        let rates = daytime_rates();
        let mut vitals = Vitals::default();
        let mut wellness = Wellness::default();
        assert!(vitals.use_energy(50));
        // 22:00 and 23:00
        decay(&mut vitals, &mut wellness, &rates, 22, 2);
        assert_eq!(vitals.energy(), 50 + 2 * rates.rest_energy_per_hour);
    }

    #[test]
    fn test_decay_split_matches_whole() {
        let rates = daytime_rates();
        let (mut v1, mut w1) = (Vitals::default(), Wellness::default());
        let (mut v2, mut w2) = (Vitals::default(), Wellness::default());
        decay(&mut v1, &mut w1, &rates, 3, 30);
        decay(&mut v2, &mut w2, &rates, 3, 11);
        decay(&mut v2, &mut w2, &rates, 14, 19);
        assert_eq!(v1, v2);
        assert_eq!(w1, w2);
    }

    #[test]
    fn test_starvation_damages_health() {
        let rates = daytime_rates();
        let mut vitals = Vitals::default();
        let mut wellness = Wellness::default();
        decay(&mut vitals, &mut wellness, &rates, 6, 60);
        assert_eq!(vitals.hunger(), 100);
        assert!(vitals.health() < 100);
        assert!(vitals.hygiene() >= 0);
    }

    #[test]
    fn test_wellness_clamps_and_mood() {
        let mut w = Wellness::default();
        w.update(500, -500, 500);
        assert_eq!((w.stress(), w.hope(), w.fatigue()), (100, 0, 100));
        assert_eq!(w.mood(), Mood::Distressed);
        w.update(-500, 500, -500);
        assert_eq!(w.distress_score(), 0);
        assert_eq!(w.mood(), Mood::Optimistic);
    }

    #[test]
    fn test_mood_partition_is_monotonic() {
        let mut last = Mood::Optimistic;
        for score in 0..=100 {
            let mood = Mood::from_score(score);
            assert!(mood >= last, "score {score}");
            last = mood;
        }
        assert_eq!(Mood::from_score(19), Mood::Optimistic);
        assert_eq!(Mood::from_score(20), Mood::Content);
        assert_eq!(Mood::from_score(80), Mood::Distressed);
    }

    #[test]
    fn test_normalize_restores_ranges() {
        let mut vitals: Vitals = serde_json::from_str(
            r#"{"health":250,"max_health":0,"energy":-4,"max_energy":100,"hunger":500,"hygiene":-20}"#,
        )
        .unwrap();
        vitals.normalize();
        assert_eq!((vitals.health(), vitals.max_health()), (1, 1));
        assert_eq!(vitals.energy(), 0);
        assert_eq!((vitals.hunger(), vitals.hygiene()), (100, 0));

        let mut wellness: Wellness =
            serde_json::from_str(r#"{"stress":900,"hope":-3,"fatigue":40,"mood":"Optimistic"}"#)
                .unwrap();
        wellness.normalize();
        assert_eq!((wellness.stress(), wellness.hope()), (100, 0));
        assert_eq!(wellness.mood(), Mood::from_score(wellness.distress_score()));
    }

    #[test]
    fn test_use_energy_insufficient() {
        let mut vitals = Vitals::default();
        assert!(!vitals.use_energy(101));
        assert_eq!(vitals.energy(), 100);
        assert!(!vitals.use_energy(-5));
    }

    #[test]
    fn test_effect_target_parse() {
        assert_eq!(EffectTarget::parse("hunger"), Some(EffectTarget::Hunger));
        assert_eq!(EffectTarget::parse("stress_level"), Some(EffectTarget::Stress));
        assert_eq!(
            EffectTarget::parse("strength"),
            Some(EffectTarget::Attribute(Attribute::Strength))
        );
        assert_eq!(
            EffectTarget::parse("lockpicking"),
            Some(EffectTarget::Skill(Skill::Lockpicking))
        );
        assert_eq!(EffectTarget::parse("pain"), None);
    }
}
