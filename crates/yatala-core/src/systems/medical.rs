//! Medical system - conditions and their treatment

use log::debug;
use rand::Rng;

use super::roll;
use crate::components::Player;
use crate::error::ActionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreatmentResult {
    Cured,
    /// Treatment was paid for but the condition came back.
    Recurred,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreatOutcome {
    pub result: TreatmentResult,
    pub condition_name: String,
    pub cost: u64,
    pub minutes: u32,
}

/// Pay for treatment of a condition the player has. The condition is
/// removed unless the recurrence roll brings it straight back.
pub fn treat<R: Rng + ?Sized>(
    player: &mut Player,
    condition_id: &str,
    rng: &mut R,
) -> Result<TreatOutcome, ActionError> {
    let condition = player
        .medical_conditions
        .iter()
        .find(|c| c.id == condition_id)
        .cloned()
        .ok_or_else(|| ActionError::not_found("condition", condition_id))?;
    player.spend_clean(condition.treatment_cost)?;

    let result = if roll(rng, condition.recurrence_chance) {
        TreatmentResult::Recurred
    } else {
        player.remove_medical_condition(condition_id);
        TreatmentResult::Cured
    };
    debug!("treat {} -> {:?}", condition_id, result);

    Ok(TreatOutcome {
        result,
        condition_name: condition.name,
        cost: condition.treatment_cost,
        minutes: condition.treatment_minutes,
    })
}
