//! Manufacturing system - long production runs with a crew
//!
//! Same shape as crafting, with two additions: the player needs enough
//! workers (themself plus trusted allies), and a finished batch faces a
//! separate risk roll. A bust confiscates the output and costs standing
//! in the underground.

use log::{debug, info};
use rand::Rng;

use super::{resolve, roll, Resolution};
use crate::catalog::Catalog;
use crate::components::Player;
use crate::config::SimConfig;
use crate::error::ActionError;

pub const BUST_UNDERGROUND_PENALTY: i32 = 10;
pub const BUST_STRESS: i32 = 15;
pub const BATCH_UNDERGROUND_GAIN: i32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ManufactureOutcome {
    pub resolution: Resolution,
    /// The batch came out but was found and confiscated.
    pub busted: bool,
    pub item_name: String,
    /// Units kept.
    pub quantity: u32,
    pub minutes: u32,
}

/// Workers the player can put on a job: themself plus every NPC who
/// trusts them enough.
pub fn available_workers(player: &Player, config: &SimConfig) -> u32 {
    1 + player.allies(config.ally_trust_threshold) as u32
}

pub fn manufacture<R: Rng + ?Sized>(
    player: &mut Player,
    catalog: &Catalog,
    config: &SimConfig,
    process_id: &str,
    rng: &mut R,
) -> Result<ManufactureOutcome, ActionError> {
    let process = catalog
        .processes
        .get(process_id)
        .ok_or_else(|| ActionError::not_found("process", process_id))?;
    if !player.known_processes.contains(process_id) {
        return Err(ActionError::NotLearned(process.name.clone()));
    }
    if let Some(faction) = process.faction_required {
        player.require_faction(faction, config.faction_access_threshold)?;
    }
    player.require_skills(&process.required_skills)?;
    let workers = available_workers(player, config);
    if workers < process.required_workers {
        return Err(ActionError::NotEnoughWorkers {
            required: process.required_workers,
            available: workers,
        });
    }
    if let Some(err) = player.inventory.first_missing(&process.required_materials) {
        return Err(err);
    }
    let energy = config.manufacture_energy_cost;
    if player.vitals.energy() < energy {
        return Err(ActionError::NotEnoughEnergy {
            required: energy,
            current: player.vitals.energy(),
        });
    }
    let output = catalog
        .items
        .get(&process.output_item)
        .ok_or_else(|| ActionError::not_found("item", &process.output_item))?;

    let mut inventory = player.inventory.clone();
    inventory.remove_all(&process.required_materials)?;
    let mut with_output = inventory.clone();
    with_output.add_units(output, process.output_quantity, player.carry_capacity)?;

    player.vitals.use_energy(energy);
    let minutes = process.duration_hours.saturating_mul(60);
    let resolution = resolve(rng, process.success_chance);
    if !resolution.succeeded() {
        player.inventory = inventory;
        debug!("manufacture {} failed", process.id);
        return Ok(ManufactureOutcome {
            resolution,
            busted: false,
            item_name: output.name.clone(),
            quantity: 0,
            minutes,
        });
    }

    // The batch exists; now see whether anyone notices.
    let busted = roll(rng, process.risk_factor);
    let quantity = if busted {
        player.inventory = inventory;
        player.adjust_underground_reputation(-BUST_UNDERGROUND_PENALTY);
        player.wellness.update(BUST_STRESS, 0, 0);
        info!("manufacturing run {} busted, output confiscated", process.id);
        0
    } else {
        player.inventory = with_output;
        player.adjust_underground_reputation(BATCH_UNDERGROUND_GAIN);
        player.grant_experience(process.experience);
        debug!("manufacture {} produced {}", process.id, process.output_quantity);
        process.output_quantity
    };

    Ok(ManufactureOutcome {
        resolution,
        busted,
        item_name: output.name.clone(),
        quantity,
        minutes,
    })
}
