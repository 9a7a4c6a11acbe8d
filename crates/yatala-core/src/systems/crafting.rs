//! Crafting system - turning scrap into something useful

use log::debug;
use rand::Rng;

use super::{resolve, Resolution};
use crate::catalog::{Catalog, CraftingRecipe};
use crate::components::Player;
use crate::config::SimConfig;
use crate::error::ActionError;

#[derive(Debug, Clone, PartialEq)]
pub struct CraftOutcome {
    pub resolution: Resolution,
    pub item_name: String,
    pub quantity: u32,
    pub energy_spent: i32,
    pub minutes: u32,
}

/// Energy a recipe costs to attempt.
pub fn crafting_energy_cost(recipe: &CraftingRecipe, config: &SimConfig) -> i32 {
    let divisor = config.craft_energy_divisor.max(1);
    i32::try_from(recipe.required_minutes / divisor).unwrap_or(i32::MAX)
}

/// Attempt a recipe.
///
/// All checks run first. Inputs and energy are then spent regardless of
/// the roll; the output only appears on success.
pub fn craft<R: Rng + ?Sized>(
    player: &mut Player,
    catalog: &Catalog,
    config: &SimConfig,
    recipe_id: &str,
    rng: &mut R,
) -> Result<CraftOutcome, ActionError> {
    let recipe = catalog
        .recipes
        .get(recipe_id)
        .ok_or_else(|| ActionError::not_found("recipe", recipe_id))?;
    if !player.known_recipes.contains(recipe_id) {
        return Err(ActionError::NotLearned(recipe.name.clone()));
    }
    if let Some(faction) = recipe.faction_required {
        player.require_faction(faction, config.faction_access_threshold)?;
    }
    player.require_skills(&recipe.required_skills)?;
    if let Some(err) = player.inventory.first_missing(&recipe.required_items) {
        return Err(err);
    }
    let energy = crafting_energy_cost(recipe, config);
    if player.vitals.energy() < energy {
        return Err(ActionError::NotEnoughEnergy {
            required: energy,
            current: player.vitals.energy(),
        });
    }
    let output = catalog
        .items
        .get(&recipe.output_item)
        .ok_or_else(|| ActionError::not_found("item", &recipe.output_item))?;

    // Work on a copy so a full pack can't leave inputs half-spent.
    let mut inventory = player.inventory.clone();
    inventory.remove_all(&recipe.required_items)?;
    let mut with_output = inventory.clone();
    with_output.add_units(output, recipe.output_quantity, player.carry_capacity)?;

    player.vitals.use_energy(energy);
    let resolution = resolve(rng, recipe.success_chance);
    player.inventory = if resolution.succeeded() {
        player.stats.items_crafted = player.stats.items_crafted.saturating_add(recipe.output_quantity);
        player.grant_experience(recipe.experience);
        with_output
    } else {
        inventory
    };
    debug!("craft {} -> {:?}", recipe.id, resolution);

    Ok(CraftOutcome {
        resolution,
        item_name: output.name.clone(),
        quantity: recipe.output_quantity,
        energy_spent: energy,
        minutes: recipe.required_minutes,
    })
}
