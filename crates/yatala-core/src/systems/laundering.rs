//! Laundering system - washing dirty money through a front

use log::debug;
use rand::Rng;

use super::{resolve, Resolution};
use crate::catalog::Catalog;
use crate::components::Player;
use crate::config::SimConfig;
use crate::error::ActionError;

pub const LAUNDER_UNDERGROUND_GAIN: i32 = 5;
pub const LAUNDER_UNDERGROUND_LOSS: i32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct LaunderOutcome {
    pub resolution: Resolution,
    /// Clean money paid out on success.
    pub returned: u64,
    /// Extra clean money lost on failure.
    pub penalty: u64,
    pub minutes: u32,
}

/// Run an operation. Both the capital and the dirty money are spent
/// whatever the outcome; success pays out the clean return, failure
/// also costs up to half the capital again from what's left.
pub fn launder<R: Rng + ?Sized>(
    player: &mut Player,
    catalog: &Catalog,
    config: &SimConfig,
    operation_id: &str,
    rng: &mut R,
) -> Result<LaunderOutcome, ActionError> {
    let op = catalog
        .operations
        .get(operation_id)
        .ok_or_else(|| ActionError::not_found("operation", operation_id))?;
    if !player.known_operations.contains(operation_id) {
        return Err(ActionError::NotLearned(op.name.clone()));
    }
    player.require_skills(&op.required_skills)?;
    if player.underground_reputation() < op.underground_rep_required {
        return Err(ActionError::UndergroundReputationTooLow {
            required: op.underground_rep_required,
            current: player.underground_reputation(),
        });
    }
    if let Some(faction) = op.faction_required {
        player.require_faction(faction, config.faction_access_threshold)?;
    }
    player.require_clean(op.required_capital)?;
    player.require_dirty(op.required_dirty_money)?;

    player.spend_clean(op.required_capital)?;
    player.spend_dirty(op.required_dirty_money)?;

    let resolution = resolve(rng, op.success_chance);
    let (returned, penalty) = if resolution.succeeded() {
        player.earn_clean(op.clean_money_return);
        player.adjust_underground_reputation(LAUNDER_UNDERGROUND_GAIN);
        (op.clean_money_return, 0)
    } else {
        let penalty = player.forfeit_clean(op.required_capital / 2);
        player.adjust_underground_reputation(-LAUNDER_UNDERGROUND_LOSS);
        (0, penalty)
    };
    debug!("launder {} -> {:?}", op.id, resolution);

    Ok(LaunderOutcome {
        resolution,
        returned,
        penalty,
        minutes: op.required_minutes,
    })
}
