//! Static content: items, places, people and every definition actions
//! refer to by id.
//!
//! The catalog is read-only once loaded. The shipped content lives in
//! `data/catalog.json` and is embedded at build time ([`Catalog::builtin`]).
//! JSON files list definitions as arrays; loading indexes them by id and
//! rejects duplicates.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use yatala_logic::clock::{CalendarWindow, HourWindow};
use yatala_logic::factions::Faction;
use yatala_logic::needs::EffectTarget;
use yatala_logic::stats::{Attribute, Skill};

use crate::components::{Item, ItemType, MedicalCondition, RelationshipDelta, DURRIES};

const BUILTIN_CATALOG: &str = include_str!("../../../data/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },
}

// ── Places and people ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Cell,
    Corridor,
    MessHall,
    Yard,
    Library,
    Gym,
    Workshop,
    Medical,
    Chapel,
    Classroom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: LocationKind,
    #[serde(default)]
    pub connections: Vec<String>,
    /// Hours the location can be entered. Empty means always open.
    #[serde(default)]
    pub open_hours: Vec<HourWindow>,
    /// Item id to quantity lying here at the start of a game.
    #[serde(default)]
    pub ground_items: BTreeMap<String, u32>,
    /// 1 (quiet) to 10 (lethal).
    #[serde(default)]
    pub danger_level: u8,
}

impl Location {
    pub fn is_open_at(&self, hour: u8) -> bool {
        self.open_hours.is_empty() || self.open_hours.iter().any(|w| w.contains(hour))
    }

    pub fn connects_to(&self, other: &str) -> bool {
        self.connections.iter().any(|c| c == other)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub faction: Option<Faction>,
    #[serde(default)]
    pub is_screw: bool,
    /// Standing the NPC starts with towards a new inmate.
    #[serde(default)]
    pub initial_standing: i32,
    #[serde(default)]
    pub dialogue: Vec<String>,
    /// Item ids this NPC sells. Empty means they don't trade.
    #[serde(default)]
    pub stock: Vec<String>,
}

impl Npc {
    pub fn is_trader(&self) -> bool {
        !self.stock.is_empty()
    }
}

// ── Economy ─────────────────────────────────────────────────────────────

fn one() -> u32 {
    1
}

fn certain() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftingRecipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub required_items: BTreeMap<String, u32>,
    #[serde(default)]
    pub required_skills: BTreeMap<Skill, i32>,
    pub required_minutes: u32,
    pub output_item: String,
    #[serde(default = "one")]
    pub output_quantity: u32,
    #[serde(default = "certain")]
    pub success_chance: f64,
    #[serde(default)]
    pub faction_required: Option<Faction>,
    #[serde(default)]
    pub experience: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturingProcess {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub required_materials: BTreeMap<String, u32>,
    #[serde(default)]
    pub required_skills: BTreeMap<Skill, i32>,
    pub duration_hours: u32,
    #[serde(default = "one")]
    pub required_workers: u32,
    pub output_item: String,
    #[serde(default = "one")]
    pub output_quantity: u32,
    #[serde(default = "certain")]
    pub success_chance: f64,
    /// Probability in [0, 1] that a finished batch is found by the screws.
    #[serde(default)]
    pub risk_factor: f64,
    #[serde(default)]
    pub faction_required: Option<Faction>,
    #[serde(default)]
    pub experience: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunderingOperation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Clean money put up front.
    pub required_capital: u64,
    /// Dirty money fed through.
    pub required_dirty_money: u64,
    #[serde(default)]
    pub required_skills: BTreeMap<Skill, i32>,
    pub required_minutes: u32,
    pub clean_money_return: u64,
    #[serde(default)]
    pub underground_rep_required: i32,
    #[serde(default = "certain")]
    pub success_chance: f64,
    #[serde(default)]
    pub faction_required: Option<Faction>,
}

// ── Rehabilitation ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramKind {
    Education,
    Therapy,
    Vocational,
    SubstanceAbuse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RehabProgram {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: ProgramKind,
    pub duration_hours: u32,
    /// Clean money.
    #[serde(default)]
    pub cost: u64,
    /// Program ids that must be completed first.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub education_required: i32,
    #[serde(default)]
    pub skill_gains: BTreeMap<Skill, i32>,
    #[serde(default)]
    pub attribute_gains: BTreeMap<Attribute, i32>,
    /// Parole progress points, capped at 100 overall.
    #[serde(default)]
    pub parole_benefit: i32,
}

// ── Events ──────────────────────────────────────────────────────────────

/// A predicate that must hold for a relationship event to fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventCondition {
    MinRelationship { npc: String, value: i32 },
    MinSkill { skill: Skill, value: i32 },
    MinFactionReputation { faction: Faction, value: i32 },
    HasItem { item: String, quantity: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipEvent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cooldown_hours: u32,
    #[serde(default)]
    pub conditions: Vec<EventCondition>,
    /// NPC id to the change applied to that NPC's record.
    #[serde(default)]
    pub effects: BTreeMap<String, RelationshipDelta>,
    #[serde(default)]
    pub faction: Option<Faction>,
    #[serde(default)]
    pub faction_reputation: i32,
}

/// Everything a quest or event can hand out.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reward {
    pub experience: u64,
    pub clean_money: u64,
    pub dirty_money: u64,
    pub durries: u32,
    pub items: BTreeMap<String, u32>,
    pub faction_reputation: BTreeMap<Faction, i32>,
    pub effects: BTreeMap<String, i32>,
}

impl Reward {
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        let durries = (self.durries > 0).then_some(DURRIES);
        self.items.keys().map(String::as_str).chain(durries)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalEvent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub window: CalendarWindow,
    pub duration_hours: u32,
    #[serde(default)]
    pub cooldown_hours: u32,
    /// Item id to quantity, consumed on participation.
    #[serde(default)]
    pub required_items: BTreeMap<String, u32>,
    /// Probability in [0, 1] that taking part goes wrong.
    #[serde(default)]
    pub risk: f64,
    #[serde(default)]
    pub penalty_health: i32,
    #[serde(default)]
    pub penalty_stress: i32,
    #[serde(default)]
    pub reward: Reward,
}

/// Something that happens to the player without being asked, rolled
/// once for each new day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomEvent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Probability in [0, 1] of firing on a given day.
    pub chance: f64,
    /// Effect key to magnitude, applied whenever the event fires.
    #[serde(default)]
    pub effects: BTreeMap<String, i32>,
    /// Every carried item of this type is taken.
    #[serde(default)]
    pub confiscates: Option<ItemType>,
    /// Applied on top of `effects` when anything was taken.
    #[serde(default)]
    pub caught_effects: BTreeMap<String, i32>,
    /// Health lost before the player's defence is taken off.
    #[serde(default)]
    pub damage: i32,
}

// ── Quests ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Objective {
    VisitLocation { location: String },
    TalkTo { npc: String },
    HoldItem { item: String, quantity: u32 },
    CompleteProgram { program: String },
    ReachDay { day: u32 },
    FactionReputation { faction: Faction, value: i32 },
    SkillAtLeast { skill: Skill, value: i32 },
    CleanMoney { amount: u64 },
    ItemsCrafted { count: u32 },
    Trades { count: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub objectives: Vec<Objective>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// The quest fails if still active after this day.
    #[serde(default)]
    pub deadline_day: Option<u32>,
    #[serde(default)]
    pub reward: Reward,
    #[serde(default)]
    pub auto_accept: bool,
}

// ── Catalog ─────────────────────────────────────────────────────────────

/// On-disk layout: plain arrays.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    start_location: String,
    items: Vec<Item>,
    locations: Vec<Location>,
    #[serde(default)]
    npcs: Vec<Npc>,
    #[serde(default)]
    recipes: Vec<CraftingRecipe>,
    #[serde(default)]
    processes: Vec<ManufacturingProcess>,
    #[serde(default)]
    operations: Vec<LaunderingOperation>,
    #[serde(default)]
    programs: Vec<RehabProgram>,
    #[serde(default)]
    conditions: Vec<MedicalCondition>,
    #[serde(default)]
    relationship_events: Vec<RelationshipEvent>,
    #[serde(default)]
    seasonal_events: Vec<SeasonalEvent>,
    #[serde(default)]
    random_events: Vec<RandomEvent>,
    #[serde(default)]
    quests: Vec<Quest>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    pub start_location: String,
    pub items: BTreeMap<String, Item>,
    pub locations: BTreeMap<String, Location>,
    pub npcs: BTreeMap<String, Npc>,
    pub recipes: BTreeMap<String, CraftingRecipe>,
    pub processes: BTreeMap<String, ManufacturingProcess>,
    pub operations: BTreeMap<String, LaunderingOperation>,
    pub programs: BTreeMap<String, RehabProgram>,
    pub conditions: BTreeMap<String, MedicalCondition>,
    pub relationship_events: BTreeMap<String, RelationshipEvent>,
    pub seasonal_events: BTreeMap<String, SeasonalEvent>,
    pub random_events: BTreeMap<String, RandomEvent>,
    pub quests: BTreeMap<String, Quest>,
}

fn index<T>(
    kind: &'static str,
    entries: Vec<T>,
    id: impl Fn(&T) -> &str,
) -> Result<BTreeMap<String, T>, CatalogError> {
    let mut map = BTreeMap::new();
    for entry in entries {
        let key = id(&entry).to_string();
        if map.contains_key(&key) {
            return Err(CatalogError::DuplicateId { kind, id: key });
        }
        map.insert(key, entry);
    }
    Ok(map)
}

impl Catalog {
    /// The content shipped with the game.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self {
            start_location: file.start_location,
            items: index("item", file.items, |i| i.id.as_str())?,
            locations: index("location", file.locations, |l| l.id.as_str())?,
            npcs: index("npc", file.npcs, |n| n.id.as_str())?,
            recipes: index("recipe", file.recipes, |r| r.id.as_str())?,
            processes: index("process", file.processes, |p| p.id.as_str())?,
            operations: index("operation", file.operations, |o| o.id.as_str())?,
            programs: index("program", file.programs, |p| p.id.as_str())?,
            conditions: index("condition", file.conditions, |c| c.id.as_str())?,
            relationship_events: index("relationship event", file.relationship_events, |e| e.id.as_str())?,
            seasonal_events: index("seasonal event", file.seasonal_events, |e| e.id.as_str())?,
            random_events: index("random event", file.random_events, |e| e.id.as_str())?,
            quests: index("quest", file.quests, |q| q.id.as_str())?,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// NPCs standing at `location`.
    pub fn npcs_at<'a>(&'a self, location: &'a str) -> impl Iterator<Item = &'a Npc> + 'a {
        self.npcs.values().filter(move |n| n.location == location)
    }

    /// Check referential integrity and value ranges.
    /// Returns an empty list when the catalog is consistent.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let item = |id: &str| self.items.contains_key(id);
        let chance = |p: f64| (0.0..=1.0).contains(&p);

        if !self.locations.contains_key(&self.start_location) {
            errors.push(format!(
                "start location '{}' does not exist",
                self.start_location
            ));
        }
        if !item(DURRIES) {
            errors.push(format!("currency item '{DURRIES}' is missing"));
        }

        for loc in self.locations.values() {
            for conn in &loc.connections {
                match self.locations.get(conn) {
                    None => errors.push(format!("{}: connection '{}' does not exist", loc.id, conn)),
                    Some(other) if !other.connects_to(&loc.id) => errors.push(format!(
                        "{}: connection to '{}' is one-way",
                        loc.id, conn
                    )),
                    Some(_) => {}
                }
            }
            for id in loc.ground_items.keys().filter(|id| !item(id.as_ref())) {
                errors.push(format!("{}: ground item '{}' does not exist", loc.id, id));
            }
        }

        for npc in self.npcs.values() {
            if !self.locations.contains_key(&npc.location) {
                errors.push(format!("{}: location '{}' does not exist", npc.id, npc.location));
            }
            for id in npc.stock.iter().filter(|id| !item(id.as_ref())) {
                errors.push(format!("{}: stock item '{}' does not exist", npc.id, id));
            }
        }

        for r in self.recipes.values() {
            if !item(&r.output_item) {
                errors.push(format!("{}: output '{}' does not exist", r.id, r.output_item));
            }
            for id in r.required_items.keys().filter(|id| !item(id.as_ref())) {
                errors.push(format!("{}: input '{}' does not exist", r.id, id));
            }
            if !chance(r.success_chance) {
                errors.push(format!("{}: success_chance out of range", r.id));
            }
        }

        for p in self.processes.values() {
            if !item(&p.output_item) {
                errors.push(format!("{}: output '{}' does not exist", p.id, p.output_item));
            }
            for id in p.required_materials.keys().filter(|id| !item(id.as_ref())) {
                errors.push(format!("{}: material '{}' does not exist", p.id, id));
            }
            if !chance(p.success_chance) || !chance(p.risk_factor) {
                errors.push(format!("{}: probability out of range", p.id));
            }
        }

        for o in self.operations.values() {
            if !chance(o.success_chance) {
                errors.push(format!("{}: success_chance out of range", o.id));
            }
        }

        for prog in self.programs.values() {
            for pre in prog.prerequisites.iter().filter(|p| !self.programs.contains_key(*p)) {
                errors.push(format!("{}: prerequisite '{}' does not exist", prog.id, pre));
            }
        }

        for c in self.conditions.values() {
            if !chance(c.recurrence_chance) {
                errors.push(format!("{}: recurrence_chance out of range", c.id));
            }
        }

        for e in self.relationship_events.values() {
            for npc in e.effects.keys().filter(|n| !self.npcs.contains_key(*n)) {
                errors.push(format!("{}: npc '{}' does not exist", e.id, npc));
            }
        }

        for e in self.seasonal_events.values() {
            if !chance(e.risk) {
                errors.push(format!("{}: risk out of range", e.id));
            }
            for id in e.required_items.keys().filter(|id| !item(id.as_ref())) {
                errors.push(format!("{}: required item '{}' does not exist", e.id, id));
            }
            for id in e.reward.item_ids().filter(|id| !item(id.as_ref())) {
                errors.push(format!("{}: reward item '{}' does not exist", e.id, id));
            }
        }

        for e in self.random_events.values() {
            if !chance(e.chance) {
                errors.push(format!("{}: chance out of range", e.id));
            }
            if e.damage < 0 {
                errors.push(format!("{}: damage can't be negative", e.id));
            }
            for key in e
                .effects
                .keys()
                .chain(e.caught_effects.keys())
                .filter(|k| EffectTarget::parse(k).is_none())
            {
                errors.push(format!("{}: unknown effect '{}'", e.id, key));
            }
        }

        for q in self.quests.values() {
            for pre in q.prerequisites.iter().filter(|p| !self.quests.contains_key(*p)) {
                errors.push(format!("{}: prerequisite '{}' does not exist", q.id, pre));
            }
            for id in q.reward.item_ids().filter(|id| !item(id.as_ref())) {
                errors.push(format!("{}: reward item '{}' does not exist", q.id, id));
            }
            for obj in &q.objectives {
                let missing = match obj {
                    Objective::VisitLocation { location } => {
                        (!self.locations.contains_key(location)).then_some(location)
                    }
                    Objective::TalkTo { npc } => (!self.npcs.contains_key(npc)).then_some(npc),
                    Objective::HoldItem { item: id, .. } => (!item(id)).then_some(id),
                    Objective::CompleteProgram { program } => {
                        (!self.programs.contains_key(program)).then_some(program)
                    }
                    _ => None,
                };
                if let Some(id) = missing {
                    errors.push(format!("{}: objective refers to unknown '{}'", q.id, id));
                }
            }
        }

        errors
    }
}
