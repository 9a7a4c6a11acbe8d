//! Social system - conversations, relationship events and faction politics

use log::debug;
use rand::Rng;
use yatala_logic::clock::{GameTime, MINUTES_PER_HOUR};
use yatala_logic::factions::{Faction, FactionRank};

use super::pick_index;
use crate::catalog::{Catalog, EventCondition};
use crate::components::{Player, Relationship};
use crate::config::SimConfig;
use crate::error::ActionError;

pub const TALK_TRUST_GAIN: i32 = 2;
pub const TALK_RESPECT_GAIN: i32 = 1;
pub const TALK_STANDING_GAIN: i32 = 1;
pub const TALK_FACTION_GAIN: i32 = 1;
pub const TALK_MINUTES: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct TalkOutcome {
    pub npc_name: String,
    pub line: String,
    pub first_meeting: bool,
}

/// Have a yarn with an NPC at the player's location.
pub fn talk<R: Rng + ?Sized>(
    player: &mut Player,
    catalog: &Catalog,
    npc_id: &str,
    rng: &mut R,
) -> Result<TalkOutcome, ActionError> {
    let npc = catalog
        .npcs
        .get(npc_id)
        .ok_or_else(|| ActionError::not_found("npc", npc_id))?;
    if npc.location != player.location {
        return Err(ActionError::NpcNotPresent(npc.name.clone()));
    }

    let first_meeting = player.npcs_met.insert(npc.id.clone());
    if first_meeting {
        player
            .relationships
            .entry(npc.id.clone())
            .or_insert_with(|| Relationship::with_standing(npc.initial_standing));
        player.stats.npcs_met = player.npcs_met.len() as u32;
    }

    let relationship = player.relationship_mut(&npc.id);
    relationship.adjust_standing(TALK_STANDING_GAIN);
    relationship.adjust_traits(TALK_TRUST_GAIN, TALK_RESPECT_GAIN, 0);
    if let Some(faction) = npc.faction {
        player.update_faction_standing(faction, TALK_FACTION_GAIN, 0);
    }

    let line = npc
        .dialogue
        .get(pick_index(rng, npc.dialogue.len()))
        .cloned()
        .unwrap_or_else(|| "...".to_string());

    Ok(TalkOutcome {
        npc_name: npc.name.clone(),
        line,
        first_meeting,
    })
}

/// Describe the first unmet condition, if any.
fn unmet_condition(player: &Player, condition: &EventCondition) -> Option<String> {
    match condition {
        EventCondition::MinRelationship { npc, value } => {
            let current = player.relationship(npc).standing();
            (current < *value).then(|| format!("needs standing {value} with {npc} (have {current})"))
        }
        EventCondition::MinSkill { skill, value } => {
            let current = player.effective_skill(*skill);
            (current < *value).then(|| format!("needs {} {value} (have {current})", skill.key()))
        }
        EventCondition::MinFactionReputation { faction, value } => {
            let current = player.standing(*faction).reputation();
            (current < *value).then(|| {
                format!(
                    "needs reputation {value} with {} (have {current})",
                    faction.name()
                )
            })
        }
        EventCondition::HasItem { item, quantity } => (!player.inventory.has(item, *quantity))
            .then(|| format!("needs {quantity} {item}")),
    }
}

/// Fire a relationship event.
///
/// The cooldown is checked before anything else; an event on cooldown
/// changes nothing. The first trigger is always allowed.
pub fn trigger_relationship_event(
    player: &mut Player,
    catalog: &Catalog,
    event_id: &str,
    now: GameTime,
) -> Result<usize, ActionError> {
    let event = catalog
        .relationship_events
        .get(event_id)
        .ok_or_else(|| ActionError::not_found("relationship event", event_id))?;

    let cooldown = u64::from(event.cooldown_hours) * MINUTES_PER_HOUR;
    if let Some(&last) = player.relationship_events.get(event_id) {
        let elapsed = now.total_minutes().saturating_sub(last);
        if elapsed < cooldown {
            return Err(ActionError::OnCooldown {
                name: event.name.clone(),
                remaining_minutes: cooldown - elapsed,
            });
        }
    }

    if let Some(detail) = event
        .conditions
        .iter()
        .find_map(|c| unmet_condition(player, c))
    {
        return Err(ActionError::ConditionNotMet {
            event: event.name.clone(),
            detail,
        });
    }

    for (npc, delta) in &event.effects {
        delta.apply_to(player.relationship_mut(npc));
    }
    if let Some(faction) = event.faction {
        player.update_faction_standing(faction, event.faction_reputation, 0);
    }
    player
        .relationship_events
        .insert(event_id.to_string(), now.total_minutes());
    debug!("relationship event {} fired at {}", event.id, now);

    Ok(event.effects.len())
}

/// Throw in with a faction. Needs enough reputation with it first.
pub fn join_faction(
    player: &mut Player,
    config: &SimConfig,
    faction: Faction,
) -> Result<FactionRank, ActionError> {
    player.require_faction(faction, config.faction_access_threshold)?;
    player.affiliation = Some(faction);
    Ok(player.standing(faction).rank())
}
