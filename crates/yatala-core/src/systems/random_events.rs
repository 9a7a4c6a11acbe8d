//! Random events - things that happen to the player overnight
//!
//! The engine rolls once for each new day. Events are tried in id order
//! and the first whose chance comes up fires; the rest are skipped.

use log::info;
use rand::Rng;
use yatala_logic::stats::SkillCategory;

use super::roll;
use crate::catalog::{Catalog, RandomEvent};
use crate::components::{ItemType, Player};

/// Combat skill points per point of defence.
pub const COMBAT_SKILL_PER_DEFENCE: i32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct RandomEventOutcome {
    pub event_name: String,
    pub description: String,
    /// Names of the items taken, one per stack.
    pub confiscated: Vec<String>,
    /// Health actually lost after defence.
    pub damage_taken: i32,
    /// Whether the event searches for anything.
    pub searched: bool,
}

/// How much incoming damage the player shrugs off: half the best weapon
/// they carry plus their combat skills.
pub fn defence(player: &Player) -> i32 {
    let weapon = player
        .inventory
        .stacks()
        .iter()
        .filter(|i| i.item_type == ItemType::Weapon)
        .map(|i| i.damage)
        .max()
        .unwrap_or(0);
    let weapon = i32::try_from(weapon / 2).unwrap_or(i32::MAX);
    let skill = player.skills.category_total(SkillCategory::Combat) / COMBAT_SKILL_PER_DEFENCE;
    weapon.saturating_add(skill)
}

/// Roll the day's events. At most one fires.
pub fn roll_random_event<R: Rng + ?Sized>(
    player: &mut Player,
    catalog: &Catalog,
    rng: &mut R,
) -> Option<RandomEventOutcome> {
    let event = catalog
        .random_events
        .values()
        .find(|e| roll(rng, e.chance))?;
    Some(apply_random_event(player, event))
}

/// Apply one event's consequences under clamp.
pub fn apply_random_event(player: &mut Player, event: &RandomEvent) -> RandomEventOutcome {
    player.apply_effects(&event.effects);

    let confiscated: Vec<String> = match event.confiscates {
        Some(item_type) => player
            .inventory
            .remove_type(item_type)
            .into_iter()
            .map(|i| i.name)
            .collect(),
        None => Vec::new(),
    };
    if !confiscated.is_empty() {
        player.apply_effects(&event.caught_effects);
        info!("{}: confiscated {}", event.id, confiscated.join(", "));
    }

    let damage_taken = event.damage.saturating_sub(defence(player)).max(0);
    player.vitals.take_damage(damage_taken);

    RandomEventOutcome {
        event_name: event.name.clone(),
        description: event.description.clone(),
        confiscated,
        damage_taken,
        searched: event.confiscates.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Item;
    use crate::config::SimConfig;
    use rand::rngs::mock::StepRng;
    use std::collections::BTreeMap;
    use yatala_logic::stats::{Attribute, Skill};

    fn item(id: &str, item_type: ItemType, damage: u32) -> Item {
        Item {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            item_type,
            value: 10,
            weight: 0.1,
            stackable: false,
            quantity: 1,
            damage,
            effects: BTreeMap::new(),
        }
    }

    fn event(id: &str, chance: f64) -> RandomEvent {
        RandomEvent {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            chance,
            effects: BTreeMap::new(),
            confiscates: None,
            caught_effects: BTreeMap::new(),
            damage: 0,
        }
    }

    fn shakedown() -> RandomEvent {
        let mut caught = BTreeMap::new();
        caught.insert("reputation".to_string(), -10);
        RandomEvent {
            confiscates: Some(ItemType::Contraband),
            caught_effects: caught,
            ..event("shakedown", 1.0)
        }
    }

    fn player() -> Player {
        Player::new("Test", "cell_b12", &SimConfig::default())
    }

    #[test]
    fn test_shakedown_takes_contraband_and_reputation() {
        let mut p = player();
        p.inventory.add(item("mobile", ItemType::Contraband, 0), 50.0).unwrap();
        p.inventory.add(item("shiv", ItemType::Weapon, 20), 50.0).unwrap();
        let rep = p.attributes.get(Attribute::Reputation);

        let out = apply_random_event(&mut p, &shakedown());
        assert_eq!(out.confiscated, vec!["mobile".to_string()]);
        assert_eq!(p.inventory.quantity_of("mobile"), 0);
        assert_eq!(p.inventory.quantity_of("shiv"), 1);
        assert_eq!(p.attributes.get(Attribute::Reputation), rep - 10);
    }

    #[test]
    fn test_clean_search_costs_nothing() {
        let mut p = player();
        let before = p.clone();
        let out = apply_random_event(&mut p, &shakedown());
        assert!(out.searched);
        assert!(out.confiscated.is_empty());
        assert_eq!(p, before);
    }

    #[test]
    fn test_weapon_and_combat_skill_soften_a_fight() {
        let fight = RandomEvent {
            damage: 20,
            ..event("fight", 1.0)
        };
        let mut bare = player();
        assert_eq!(apply_random_event(&mut bare, &fight).damage_taken, 20);

        let mut armed = player();
        armed.inventory.add(item("shiv", ItemType::Weapon, 20), 50.0).unwrap();
        armed.inventory.add(item("bat", ItemType::Weapon, 8), 50.0).unwrap();
        armed.skills.set(Skill::Brawling, 30);
        armed.skills.set(Skill::Defense, 20);
        assert_eq!(defence(&armed), 15);
        let out = apply_random_event(&mut armed, &fight);
        assert_eq!(out.damage_taken, 5);
        assert_eq!(armed.vitals.health(), armed.vitals.max_health() - 5);
    }

    #[test]
    fn test_defence_never_heals() {
        let fight = RandomEvent {
            damage: 4,
            ..event("scuffle", 1.0)
        };
        let mut p = player();
        p.inventory.add(item("shank", ItemType::Weapon, 25), 50.0).unwrap();
        let out = apply_random_event(&mut p, &fight);
        assert_eq!(out.damage_taken, 0);
        assert_eq!(p.vitals.health(), p.vitals.max_health());
    }

    #[test]
    fn test_first_event_in_id_order_fires() {
        let mut catalog = Catalog::default();
        for e in [event("b_second", 0.5), event("a_first", 0.5), event("c_never", 0.0)] {
            catalog.random_events.insert(e.id.clone(), e);
        }
        let mut p = player();
        let out = roll_random_event(&mut p, &catalog, &mut StepRng::new(0, 0)).unwrap();
        assert_eq!(out.event_name, "a_first");
        assert!(roll_random_event(&mut p, &catalog, &mut StepRng::new(u64::MAX, 0)).is_none());
    }
}
