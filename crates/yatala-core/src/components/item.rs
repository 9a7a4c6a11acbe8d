//! Items and the weight-limited inventory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ActionError;

/// Item id of the cigarettes used as barter currency.
pub const DURRIES: &str = "durries";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Weapon,
    Consumable,
    Contraband,
    CraftingMaterial,
    Book,
    Currency,
    Quest,
    Manufactured,
}

fn one() -> u32 {
    1
}

/// An item definition or a stack of it in an inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub item_type: ItemType,
    /// Worth in durries.
    #[serde(default)]
    pub value: u32,
    /// Kilograms per unit.
    #[serde(default)]
    pub weight: f32,
    #[serde(default)]
    pub stackable: bool,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default)]
    pub damage: u32,
    /// Effect key to magnitude, applied when the item is used.
    #[serde(default)]
    pub effects: BTreeMap<String, i32>,
}

impl Item {
    /// A copy of this definition with a different quantity.
    pub fn with_quantity(&self, quantity: u32) -> Item {
        Item {
            quantity,
            ..self.clone()
        }
    }

    /// `quantity` units of this definition: one stack when stackable,
    /// otherwise one entry per unit.
    pub fn units(&self, quantity: u32) -> Vec<Item> {
        if quantity == 0 {
            Vec::new()
        } else if self.stackable {
            vec![self.with_quantity(quantity)]
        } else {
            (0..quantity).map(|_| self.with_quantity(1)).collect()
        }
    }

    pub fn total_weight(&self) -> f32 {
        self.weight * self.quantity as f32
    }

    /// Consumables and contraband with effects are used up on use.
    pub fn is_consumed_on_use(&self) -> bool {
        match self.item_type {
            ItemType::Consumable => true,
            ItemType::Contraband => !self.effects.is_empty(),
            _ => false,
        }
    }
}

/// Ordered item stacks. Stackable items of the same id share one stack.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Inventory {
    stacks: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stacks(&self) -> &[Item] {
        &self.stacks
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn total_weight(&self) -> f32 {
        self.stacks.iter().map(Item::total_weight).sum()
    }

    /// Units held across every stack with this id.
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.stacks
            .iter()
            .filter(|s| s.id == id)
            .map(|s| s.quantity)
            .sum()
    }

    pub fn has(&self, id: &str, quantity: u32) -> bool {
        self.quantity_of(id) >= quantity
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.stacks.iter().find(|s| s.id == id)
    }

    /// Add an item, merging into an existing stack when stackable.
    pub fn add(&mut self, item: Item, capacity: f32) -> Result<(), ActionError> {
        let would_carry = self.total_weight() + item.total_weight();
        if would_carry > capacity {
            return Err(ActionError::Overweight {
                item: item.name,
                would_carry,
                capacity,
            });
        }
        if item.stackable {
            if let Some(stack) = self.stacks.iter_mut().find(|s| s.id == item.id) {
                stack.quantity = stack.quantity.saturating_add(item.quantity);
                return Ok(());
            }
        }
        self.stacks.push(item);
        Ok(())
    }

    /// Add `quantity` units of a definition, all or nothing.
    pub fn add_units(&mut self, def: &Item, quantity: u32, capacity: f32) -> Result<(), ActionError> {
        let would_carry = self.total_weight() + def.weight * quantity as f32;
        if would_carry > capacity {
            return Err(ActionError::Overweight {
                item: def.name.clone(),
                would_carry,
                capacity,
            });
        }
        for unit in def.units(quantity) {
            self.add(unit, capacity)?;
        }
        Ok(())
    }

    /// Remove `quantity` units, dropping stacks that reach zero.
    /// Takes from the most recently added stacks first.
    pub fn remove(&mut self, id: &str, quantity: u32) -> Result<(), ActionError> {
        let available = self.quantity_of(id);
        if available == 0 {
            return Err(ActionError::ItemNotFound(id.to_string()));
        }
        if available < quantity {
            return Err(ActionError::InsufficientQuantity {
                item: id.to_string(),
                required: quantity,
                available,
            });
        }

        let mut remaining = quantity;
        for stack in self.stacks.iter_mut().rev().filter(|s| s.id == id) {
            if remaining == 0 {
                break;
            }
            let taken = remaining.min(stack.quantity);
            stack.quantity -= taken;
            remaining -= taken;
        }
        self.stacks.retain(|s| s.quantity > 0);
        Ok(())
    }

    /// Take out every stack of one type, in inventory order.
    pub fn remove_type(&mut self, item_type: ItemType) -> Vec<Item> {
        let (taken, kept): (Vec<Item>, Vec<Item>) = std::mem::take(&mut self.stacks)
            .into_iter()
            .partition(|s| s.item_type == item_type);
        self.stacks = kept;
        taken
    }

    /// Remove every listed `id -> quantity`, or nothing if any is short.
    pub fn remove_all(&mut self, items: &BTreeMap<String, u32>) -> Result<(), ActionError> {
        if let Some(err) = self.first_missing(items) {
            return Err(err);
        }
        for (id, &qty) in items {
            self.remove(id, qty)?;
        }
        Ok(())
    }

    /// The first requirement this inventory can't cover.
    pub fn first_missing(&self, items: &BTreeMap<String, u32>) -> Option<ActionError> {
        items.iter().find_map(|(id, &required)| {
            let available = self.quantity_of(id);
            if available >= required {
                None
            } else if available == 0 {
                Some(ActionError::ItemNotFound(id.clone()))
            } else {
                Some(ActionError::InsufficientQuantity {
                    item: id.clone(),
                    required,
                    available,
                })
            }
        })
    }
}
