//! Mutable world state outside the player.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::item::Item;
use crate::catalog::Catalog;

/// Loose items lying around, per location id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct World {
    pub ground_items: BTreeMap<String, Vec<Item>>,
}

impl World {
    /// Scatter each location's starting items.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut ground_items = BTreeMap::new();
        for location in catalog.locations.values() {
            let items: Vec<Item> = location
                .ground_items
                .iter()
                .filter_map(|(id, &qty)| catalog.items.get(id).map(|def| def.units(qty)))
                .flatten()
                .collect();
            if !items.is_empty() {
                ground_items.insert(location.id.clone(), items);
            }
        }
        Self { ground_items }
    }

    pub fn items_at(&self, location: &str) -> &[Item] {
        self.ground_items
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Take the whole stack of `item` from `location`.
    pub fn take(&mut self, location: &str, item: &str) -> Option<Item> {
        let items = self.ground_items.get_mut(location)?;
        let idx = items.iter().position(|i| i.id == item)?;
        let taken = items.remove(idx);
        if items.is_empty() {
            self.ground_items.remove(location);
        }
        Some(taken)
    }

    /// Leave an item on the ground, merging stackable stacks.
    pub fn drop_item(&mut self, location: &str, item: Item) {
        let items = self.ground_items.entry(location.to_string()).or_default();
        if item.stackable {
            if let Some(stack) = items.iter_mut().find(|i| i.id == item.id) {
                stack.quantity = stack.quantity.saturating_add(item.quantity);
                return;
            }
        }
        items.push(item);
    }
}
