//! Economy system - picking things up, using them, trading and working
//!
//! Trade is barter in durries. Prices are catalog values in durries,
//! discounted by the player's trading skill when buying.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use yatala_logic::stats::Skill;

use crate::catalog::{Catalog, LocationKind, Npc};
use crate::components::{Item, ItemType, Player, World, DURRIES};
use crate::config::SimConfig;
use crate::error::ActionError;

pub const USE_ITEM_MINUTES: u32 = 5;
pub const TRADE_MINUTES: u32 = 10;
pub const MAX_WORK_HOURS: i64 = 8;
pub const LEARN_MINUTES: u32 = 30;

/// Durries an NPC asks for an item worth `value`.
pub fn buy_price(value: u32, trading: i32) -> u32 {
    let value = i64::from(value);
    let discount = value * i64::from(trading.clamp(0, 100)) / 200;
    u32::try_from((value - discount).max(1)).unwrap_or(u32::MAX)
}

/// Durries an NPC pays for an item worth `value`.
pub fn sell_price(value: u32) -> u32 {
    (value / 2).max(1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeOutcome {
    pub item_name: String,
    pub npc_name: String,
    pub price: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UseOutcome {
    pub item_name: String,
    pub consumed: bool,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkOutcome {
    pub earned: u64,
    pub energy_spent: i32,
    pub minutes: u32,
}

/// Take a stack lying at the player's location.
pub fn pick_up(player: &mut Player, world: &mut World, item_id: &str) -> Result<Item, ActionError> {
    let stack = world
        .items_at(&player.location)
        .iter()
        .find(|i| i.id == item_id)
        .cloned()
        .ok_or_else(|| ActionError::ItemNotFound(item_id.to_string()))?;
    player.inventory.add(stack.clone(), player.carry_capacity)?;
    world.take(&player.location, item_id);
    Ok(stack)
}

/// Use an item from the inventory.
///
/// Consumables and contraband apply their effects and are used up. Books
/// teach once per title and stay in the inventory.
pub fn use_item(
    player: &mut Player,
    config: &SimConfig,
    item_id: &str,
) -> Result<UseOutcome, ActionError> {
    let item = player
        .inventory
        .get(item_id)
        .cloned()
        .ok_or_else(|| ActionError::ItemNotFound(item_id.to_string()))?;

    if item.item_type == ItemType::Book {
        if player.books_read.contains(&item.id) {
            return Err(ActionError::AlreadyRead(item.name));
        }
        player.apply_effects(&item.effects);
        player.books_read.insert(item.id.clone());
        player.stats.books_read += 1;
        return Ok(UseOutcome {
            item_name: item.name,
            consumed: false,
            minutes: config.book_read_minutes,
        });
    }

    if !item.is_consumed_on_use() {
        return Err(ActionError::NotUsable(item.name));
    }
    player.inventory.remove(&item.id, 1)?;
    player.apply_effects(&item.effects);
    debug!("used {}", item.id);
    Ok(UseOutcome {
        item_name: item.name,
        consumed: true,
        minutes: USE_ITEM_MINUTES,
    })
}

fn trader<'a>(player: &Player, catalog: &'a Catalog, npc_id: &str) -> Result<&'a Npc, ActionError> {
    let npc = catalog
        .npcs
        .get(npc_id)
        .ok_or_else(|| ActionError::not_found("npc", npc_id))?;
    if npc.location != player.location {
        return Err(ActionError::NpcNotPresent(npc.name.clone()));
    }
    if !npc.is_trader() {
        return Err(ActionError::NotATrader(npc.name.clone()));
    }
    Ok(npc)
}

fn record_trade(player: &mut Player) {
    player.stats.items_traded += 1;
    player.skills.adjust(Skill::Trading, 1);
}

pub fn buy(
    player: &mut Player,
    catalog: &Catalog,
    npc_id: &str,
    item_id: &str,
) -> Result<TradeOutcome, ActionError> {
    let npc = trader(player, catalog, npc_id)?;
    if !npc.stock.iter().any(|s| s == item_id) {
        return Err(ActionError::NotInStock {
            npc: npc.name.clone(),
            item: item_id.to_string(),
        });
    }
    let def = catalog
        .items
        .get(item_id)
        .ok_or_else(|| ActionError::not_found("item", item_id))?;
    let price = buy_price(def.value, player.effective_skill(Skill::Trading));
    let available = player.durries();
    if available < price {
        return Err(ActionError::NotEnoughDurries {
            required: price,
            available,
        });
    }

    let mut inventory = player.inventory.clone();
    inventory.remove(DURRIES, price)?;
    inventory.add(def.with_quantity(1), player.carry_capacity)?;
    player.inventory = inventory;
    record_trade(player);

    Ok(TradeOutcome {
        item_name: def.name.clone(),
        npc_name: npc.name.clone(),
        price,
    })
}

pub fn sell(
    player: &mut Player,
    catalog: &Catalog,
    npc_id: &str,
    item_id: &str,
) -> Result<TradeOutcome, ActionError> {
    let npc = trader(player, catalog, npc_id)?;
    let item = player
        .inventory
        .get(item_id)
        .cloned()
        .ok_or_else(|| ActionError::ItemNotFound(item_id.to_string()))?;
    if item.item_type == ItemType::Currency || item.item_type == ItemType::Quest {
        return Err(ActionError::CannotSell(item.name));
    }
    let durries = catalog
        .items
        .get(DURRIES)
        .ok_or_else(|| ActionError::not_found("item", DURRIES))?;
    let price = sell_price(item.value);

    let mut inventory = player.inventory.clone();
    inventory.remove(item_id, 1)?;
    inventory.add(durries.with_quantity(price), player.carry_capacity)?;
    player.inventory = inventory;
    record_trade(player);

    Ok(TradeOutcome {
        item_name: item.name,
        npc_name: npc.name.clone(),
        price,
    })
}

/// Put in a shift at the workshop for clean money.
pub fn work(
    player: &mut Player,
    catalog: &Catalog,
    config: &SimConfig,
    hours: i64,
) -> Result<WorkOutcome, ActionError> {
    if !(1..=MAX_WORK_HOURS).contains(&hours) {
        return Err(ActionError::OutOfRange {
            what: "work hours",
            value: hours,
            min: 1,
            max: MAX_WORK_HOURS,
        });
    }
    let at_workshop = catalog
        .locations
        .get(&player.location)
        .is_some_and(|l| l.kind == LocationKind::Workshop);
    if !at_workshop {
        return Err(ActionError::WrongPlace("workshop"));
    }
    let hours = hours as u32;
    let energy = config.work_energy_per_hour.saturating_mul(hours as i32);
    if !player.vitals.use_energy(energy) {
        return Err(ActionError::NotEnoughEnergy {
            required: energy,
            current: player.vitals.energy(),
        });
    }
    let earned = config.work_wage_per_hour.saturating_mul(u64::from(hours));
    player.earn_clean(earned);
    player.skills.adjust(Skill::Crafting, 1);

    Ok(WorkOutcome {
        earned,
        energy_spent: energy,
        minutes: hours * 60,
    })
}

/// Add `id` to a known set if the catalog defines it. Returns whether it
/// was new.
pub fn learn<T>(
    known: &mut BTreeSet<String>,
    definitions: &BTreeMap<String, T>,
    kind: &'static str,
    id: &str,
) -> Result<bool, ActionError> {
    if !definitions.contains_key(id) {
        return Err(ActionError::not_found(kind, id));
    }
    Ok(known.insert(id.to_string()))
}
