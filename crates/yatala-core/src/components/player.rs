//! The player aggregate.
//!
//! Stat blocks clamp internally, so they are exposed directly. Scalars
//! with their own bounds (money, underground reputation, education,
//! parole) sit behind methods that keep them in range.

use std::collections::{BTreeMap, BTreeSet};

use log::info;
use serde::{Deserialize, Serialize};
use yatala_logic::factions::{Faction, FactionRank, FactionStanding, PoliticalStanding};
use yatala_logic::needs::{EffectTarget, Vitals, Wellness};
use yatala_logic::progression::{Progression, LEVEL_UP_VITAL_BONUS};
use yatala_logic::sentence::{Release, Sentence};
use yatala_logic::stats::{clamp_add, Attribute, Attributes, Skill, Skills, STAT_MAX, STAT_MIN};

use super::item::{Inventory, DURRIES};
use super::medical::MedicalCondition;
use super::social::Relationship;
use crate::config::SimConfig;
use crate::error::ActionError;

/// Running tallies shown on the character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub days_survived: u32,
    pub items_crafted: u32,
    pub items_traded: u32,
    pub quests_completed: u32,
    pub locations_visited: u32,
    pub npcs_met: u32,
    pub books_read: u32,
    pub therapy_sessions: u32,
    pub vocational_certificates: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub progression: Progression,
    pub attributes: Attributes,
    pub skills: Skills,
    pub vitals: Vitals,
    pub wellness: Wellness,
    pub location: String,
    pub affiliation: Option<Faction>,
    pub inventory: Inventory,
    pub carry_capacity: f32,
    pub sentence: Sentence,

    clean_money: u64,
    dirty_money: u64,
    underground_reputation: i32,
    education_level: i32,
    parole_progress: i32,

    pub relationships: BTreeMap<String, Relationship>,
    pub faction_standings: BTreeMap<Faction, FactionStanding>,
    pub political: PoliticalStanding,

    pub known_recipes: BTreeSet<String>,
    pub known_processes: BTreeSet<String>,
    pub known_operations: BTreeSet<String>,
    pub completed_programs: BTreeSet<String>,
    pub vocational_skills: Vec<String>,

    pub active_quests: Vec<String>,
    pub completed_quests: Vec<String>,
    pub failed_quests: Vec<String>,

    pub medical_conditions: Vec<MedicalCondition>,
    /// Relationship event id to the game minute it last fired.
    pub relationship_events: BTreeMap<String, u64>,
    /// Seasonal event id to the game minute the player last took part.
    pub seasonal_events: BTreeMap<String, u64>,

    pub books_read: BTreeSet<String>,
    pub visited_locations: BTreeSet<String>,
    pub npcs_met: BTreeSet<String>,
    pub stats: Statistics,
}

impl Player {
    /// New-inmate baseline at `location`.
    pub fn new(name: impl Into<String>, location: impl Into<String>, config: &SimConfig) -> Self {
        let location = location.into();
        let mut visited_locations = BTreeSet::new();
        visited_locations.insert(location.clone());
        Self {
            name: name.into(),
            progression: Progression::default(),
            attributes: Attributes::default(),
            skills: Skills::default(),
            vitals: Vitals::default(),
            wellness: Wellness::default(),
            location,
            affiliation: None,
            inventory: Inventory::new(),
            carry_capacity: config.carry_capacity,
            sentence: Sentence::new(config.sentence_days),
            clean_money: config.starting_clean_money,
            dirty_money: 0,
            underground_reputation: 0,
            education_level: 10,
            parole_progress: 0,
            relationships: BTreeMap::new(),
            faction_standings: BTreeMap::new(),
            political: PoliticalStanding::default(),
            known_recipes: BTreeSet::new(),
            known_processes: BTreeSet::new(),
            known_operations: BTreeSet::new(),
            completed_programs: BTreeSet::new(),
            vocational_skills: Vec::new(),
            active_quests: Vec::new(),
            completed_quests: Vec::new(),
            failed_quests: Vec::new(),
            medical_conditions: Vec::new(),
            relationship_events: BTreeMap::new(),
            seasonal_events: BTreeMap::new(),
            books_read: BTreeSet::new(),
            visited_locations,
            npcs_met: BTreeSet::new(),
            stats: Statistics {
                locations_visited: 1,
                ..Statistics::default()
            },
        }
    }

    // ── Progression ─────────────────────────────────────────────────────

    /// Add experience and apply every level gained. Returns levels gained.
    pub fn grant_experience(&mut self, amount: u64) -> u32 {
        let gained = self.progression.gain(amount);
        for _ in 0..gained {
            self.vitals
                .raise_max_and_refill(LEVEL_UP_VITAL_BONUS, LEVEL_UP_VITAL_BONUS);
        }
        if gained > 0 {
            info!("{} reached level {}", self.name, self.progression.level());
        }
        gained
    }

    // ── Money ───────────────────────────────────────────────────────────

    pub fn clean_money(&self) -> u64 {
        self.clean_money
    }

    pub fn dirty_money(&self) -> u64 {
        self.dirty_money
    }

    pub fn earn_clean(&mut self, amount: u64) {
        self.clean_money = self.clean_money.saturating_add(amount);
    }

    pub fn earn_dirty(&mut self, amount: u64) {
        self.dirty_money = self.dirty_money.saturating_add(amount);
    }

    pub fn require_clean(&self, amount: u64) -> Result<(), ActionError> {
        if self.clean_money < amount {
            return Err(ActionError::NotEnoughCleanMoney {
                required: amount,
                available: self.clean_money,
            });
        }
        Ok(())
    }

    pub fn require_dirty(&self, amount: u64) -> Result<(), ActionError> {
        if self.dirty_money < amount {
            return Err(ActionError::NotEnoughDirtyMoney {
                required: amount,
                available: self.dirty_money,
            });
        }
        Ok(())
    }

    pub fn spend_clean(&mut self, amount: u64) -> Result<(), ActionError> {
        self.require_clean(amount)?;
        self.clean_money -= amount;
        Ok(())
    }

    pub fn spend_dirty(&mut self, amount: u64) -> Result<(), ActionError> {
        self.require_dirty(amount)?;
        self.dirty_money -= amount;
        Ok(())
    }

    /// Lose up to `amount` clean money, never going below zero.
    pub fn forfeit_clean(&mut self, amount: u64) -> u64 {
        let lost = amount.min(self.clean_money);
        self.clean_money -= lost;
        lost
    }

    pub fn durries(&self) -> u32 {
        self.inventory.quantity_of(DURRIES)
    }

    // ── Bounded scalars ─────────────────────────────────────────────────

    pub fn underground_reputation(&self) -> i32 {
        self.underground_reputation
    }

    pub fn adjust_underground_reputation(&mut self, delta: i32) -> i32 {
        self.underground_reputation =
            clamp_add(self.underground_reputation, delta, STAT_MIN, STAT_MAX);
        self.underground_reputation
    }

    pub fn education_level(&self) -> i32 {
        self.education_level
    }

    pub fn adjust_education(&mut self, delta: i32) -> i32 {
        self.education_level = clamp_add(self.education_level, delta, STAT_MIN, STAT_MAX);
        self.education_level
    }

    pub fn parole_progress(&self) -> i32 {
        self.parole_progress
    }

    pub fn adjust_parole(&mut self, delta: i32) -> i32 {
        self.parole_progress = clamp_add(self.parole_progress, delta, STAT_MIN, STAT_MAX);
        self.parole_progress
    }

    /// How the player gets out, once they can.
    pub fn release(&self) -> Option<Release> {
        self.sentence.release(self.parole_progress)
    }

    /// Pull every clamped value back into range and re-derive the
    /// political aggregate. Used on state read from outside the engine.
    pub fn normalize(&mut self) {
        self.attributes.normalize();
        self.skills.normalize();
        self.vitals.normalize();
        self.wellness.normalize();
        self.sentence.normalize();
        self.adjust_underground_reputation(0);
        self.adjust_education(0);
        self.adjust_parole(0);
        for relationship in self.relationships.values_mut() {
            relationship.normalize();
        }
        for standing in self.faction_standings.values_mut() {
            standing.normalize();
        }
        self.update_political_standing();
    }

    // ── Effects ─────────────────────────────────────────────────────────

    /// Apply one effect under clamp.
    pub fn apply_effect(&mut self, target: EffectTarget, magnitude: i32) {
        match target {
            EffectTarget::Health => self.vitals.adjust_health(magnitude),
            EffectTarget::Energy => self.vitals.adjust_energy(magnitude),
            EffectTarget::Hunger => self.vitals.adjust_hunger(magnitude),
            EffectTarget::Hygiene => self.vitals.adjust_hygiene(magnitude),
            EffectTarget::Stress => {
                self.wellness.update(magnitude, 0, 0);
            }
            EffectTarget::Hope => {
                self.wellness.update(0, magnitude, 0);
            }
            EffectTarget::Fatigue => {
                self.wellness.update(0, 0, magnitude);
            }
            EffectTarget::Attribute(attr) => {
                self.attributes.adjust(attr, magnitude);
            }
            EffectTarget::Skill(skill) => {
                self.skills.adjust(skill, magnitude);
            }
        }
    }

    /// Apply an effect map. Unknown keys are skipped. Returns how many
    /// entries were applied.
    pub fn apply_effects(&mut self, effects: &BTreeMap<String, i32>) -> usize {
        let mut applied = 0;
        for (key, &magnitude) in effects {
            if let Some(target) = EffectTarget::parse(key) {
                self.apply_effect(target, magnitude);
                applied += 1;
            }
        }
        applied
    }

    /// Base attribute plus active condition penalties, within bounds.
    pub fn effective_attribute(&self, attr: Attribute) -> i32 {
        let modifier = self.condition_modifier(|t| t == EffectTarget::Attribute(attr));
        let (min, max) = attr.bounds();
        (self.attributes.get(attr) + modifier).clamp(min, max)
    }

    /// Base skill plus active condition penalties, within bounds.
    pub fn effective_skill(&self, skill: Skill) -> i32 {
        let modifier = self.condition_modifier(|t| t == EffectTarget::Skill(skill));
        (self.skills.get(skill) + modifier).clamp(STAT_MIN, STAT_MAX)
    }

    fn condition_modifier(&self, matches: impl Fn(EffectTarget) -> bool) -> i32 {
        self.medical_conditions
            .iter()
            .flat_map(|c| c.effects.iter())
            .filter(|(key, _)| EffectTarget::parse(key).is_some_and(&matches))
            .map(|(_, &v)| v)
            .sum()
    }

    // ── Relationships and factions ──────────────────────────────────────

    /// The record for `npc`, or the default if never referenced.
    pub fn relationship(&self, npc: &str) -> Relationship {
        self.relationships.get(npc).copied().unwrap_or_default()
    }

    pub fn relationship_mut(&mut self, npc: &str) -> &mut Relationship {
        self.relationships.entry(npc.to_string()).or_default()
    }

    pub fn update_relationship(&mut self, npc: &str, trust: i32, respect: i32, fear: i32) {
        self.relationship_mut(npc).adjust_traits(trust, respect, fear);
    }

    /// NPCs whose trust is at least `threshold`.
    pub fn allies(&self, threshold: i32) -> usize {
        self.relationships
            .values()
            .filter(|r| r.trust() >= threshold)
            .count()
    }

    pub fn standing(&self, faction: Faction) -> FactionStanding {
        self.faction_standings
            .get(&faction)
            .copied()
            .unwrap_or_default()
    }

    /// Adjust standing with one faction and refresh the political summary.
    pub fn update_faction_standing(
        &mut self,
        faction: Faction,
        reputation_delta: i32,
        influence_delta: i32,
    ) -> FactionRank {
        let rank = self
            .faction_standings
            .entry(faction)
            .or_default()
            .apply(reputation_delta, influence_delta);
        self.update_political_standing();
        rank
    }

    pub fn update_political_standing(&mut self) -> PoliticalStanding {
        self.political = PoliticalStanding::from_standings(&self.faction_standings);
        self.political
    }

    pub fn affiliation_rank(&self) -> Option<FactionRank> {
        self.affiliation.map(|f| self.standing(f).rank())
    }

    /// Faction-gated content needs at least `threshold` reputation.
    pub fn require_faction(&self, faction: Faction, threshold: i32) -> Result<(), ActionError> {
        let current = self.standing(faction).reputation();
        if current < threshold {
            return Err(ActionError::FactionReputationTooLow {
                faction,
                required: threshold,
                current,
            });
        }
        Ok(())
    }

    /// Check skill levels against effective skills.
    pub fn require_skills(&self, required: &BTreeMap<Skill, i32>) -> Result<(), ActionError> {
        for (&skill, &level) in required {
            let current = self.effective_skill(skill);
            if current < level {
                return Err(ActionError::MissingSkill {
                    skill,
                    required: level,
                    current,
                });
            }
        }
        Ok(())
    }

    // ── Medical ─────────────────────────────────────────────────────────

    pub fn has_condition(&self, id: &str) -> bool {
        self.medical_conditions.iter().any(|c| c.id == id)
    }

    /// Add a condition unless already afflicted. Returns whether it was added.
    pub fn add_medical_condition(&mut self, condition: MedicalCondition) -> bool {
        if self.has_condition(&condition.id) {
            return false;
        }
        self.medical_conditions.push(condition);
        true
    }

    pub fn remove_medical_condition(&mut self, id: &str) -> bool {
        let before = self.medical_conditions.len();
        self.medical_conditions.retain(|c| c.id != id);
        self.medical_conditions.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new("Test", "cell_b12", &SimConfig::default())
    }

    fn depression() -> MedicalCondition {
        let mut effects = BTreeMap::new();
        effects.insert("charisma".to_string(), -3);
        effects.insert("persuasion".to_string(), -5);
        MedicalCondition {
            id: "depression".into(),
            name: "Depression".into(),
            description: String::new(),
            severity: 7,
            chronic: true,
            treatment_cost: 500,
            treatment_minutes: 120,
            recurrence_chance: 0.3,
            effects,
        }
    }

    #[test]
    fn test_new_player_baseline() {
        let p = player();
        assert_eq!(p.vitals.hunger(), 0);
        assert_eq!(p.vitals.hygiene(), 100);
        assert_eq!(p.vitals.energy(), p.vitals.max_energy());
        assert_eq!(p.progression.level(), 1);
        assert!(p.visited_locations.contains("cell_b12"));
    }

    #[test]
    fn test_level_up_raises_maxima() {
        let mut p = player();
        p.vitals.take_damage(40);
        assert_eq!(p.grant_experience(300), 2);
        assert_eq!(p.vitals.max_health(), 110);
        assert_eq!(p.vitals.health(), 110);
        assert_eq!(p.vitals.max_energy(), 110);
    }

    #[test]
    fn test_apply_effects_skips_unknown_keys() {
        let mut p = player();
        let mut effects = BTreeMap::new();
        effects.insert("hunger".to_string(), 30);
        effects.insert("pain".to_string(), -50);
        effects.insert("strength".to_string(), 500);
        assert_eq!(p.apply_effects(&effects), 2);
        assert_eq!(p.vitals.hunger(), 30);
        assert_eq!(p.attributes.get(Attribute::Strength), 100);
    }

    #[test]
    fn test_conditions_change_effective_stats_only() {
        let mut p = player();
        p.skills.set(Skill::Persuasion, 3);
        assert!(p.add_medical_condition(depression()));
        assert!(!p.add_medical_condition(depression()));
        assert_eq!(p.medical_conditions.len(), 1);
        assert_eq!(p.effective_attribute(Attribute::Charisma), 47);
        assert_eq!(p.attributes.get(Attribute::Charisma), 50);
        assert_eq!(p.effective_skill(Skill::Persuasion), 0);
        assert!(p.remove_medical_condition("depression"));
        assert_eq!(p.effective_attribute(Attribute::Charisma), 50);
    }

    #[test]
    fn test_faction_update_refreshes_politics() {
        let mut p = player();
        p.update_faction_standing(Faction::Rebels, 90, 10);
        let rank = p.update_faction_standing(Faction::Rebels, 90, 10);
        assert_eq!(rank, FactionRank::Leader);
        assert_eq!(p.political.primary_faction, Some(Faction::Rebels));
        assert_eq!(p.political.overall_reputation, 100);
    }

    #[test]
    fn test_money_never_negative() {
        let mut p = player();
        let start = p.clean_money();
        assert!(p.spend_clean(start + 1).is_err());
        assert_eq!(p.clean_money(), start);
        assert_eq!(p.forfeit_clean(start + 100), start);
        assert_eq!(p.clean_money(), 0);
        assert!(p.spend_dirty(1).is_err());
    }

    #[test]
    fn test_normalize_repairs_every_block() {
        let mut p = player();
        let mut json = serde_json::to_value(&p).unwrap();
        json["vitals"]["hunger"] = 500.into();
        json["wellness"]["stress"] = (-40).into();
        json["attributes"]["strength"] = 999.into();
        json["skills"]["crafting"] = (-3).into();
        json["parole_progress"] = 250.into();
        json["faction_standings"] = serde_json::json!({
            "rebels": { "reputation": 300, "influence": 0, "rank": "Neutral" }
        });
        p = serde_json::from_value(json).unwrap();

        p.normalize();
        assert_eq!(p.vitals.hunger(), 100);
        assert_eq!(p.wellness.stress(), 0);
        assert_eq!(p.attributes.get(Attribute::Strength), 100);
        assert_eq!(p.skills.get(Skill::Crafting), 0);
        assert_eq!(p.parole_progress(), 100);
        assert_eq!(p.standing(Faction::Rebels).rank(), FactionRank::Leader);
        assert_eq!(p.political.overall_reputation, 100);
    }

    #[test]
    fn test_release_follows_sentence_and_parole() {
        let config = SimConfig {
            sentence_days: 10,
            ..SimConfig::default()
        };
        let mut p = Player::new("Test", "cell_b12", &config);
        p.adjust_parole(100);
        assert_eq!(p.release(), None);
        p.sentence.serve(5);
        assert_eq!(p.release(), Some(Release::Paroled));
        p.sentence.serve(5);
        assert_eq!(p.release(), Some(Release::Served));
    }

    #[test]
    fn test_relationship_default_on_first_reference() {
        let mut p = player();
        assert_eq!(p.relationship("cellie_davo"), Relationship::default());
        p.update_relationship("cellie_davo", 5, -60, 3);
        let r = p.relationship("cellie_davo");
        assert_eq!((r.trust(), r.respect(), r.fear()), (55, 0, 3));
    }
}
