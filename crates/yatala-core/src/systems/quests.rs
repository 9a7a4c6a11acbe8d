//! Quest system - objectives, deadlines and rewards
//!
//! A quest's state is derived from which of the player's lists its id is
//! in. Active quests are re-evaluated after every action: a quest whose
//! objectives all hold completes (even on its deadline day), otherwise it
//! fails once the day passes its deadline. Rewards are paid exactly once,
//! on completion.

use log::info;
use yatala_logic::clock::GameTime;

use crate::catalog::{Catalog, Objective, Quest, Reward};
use crate::components::{Player, World, DURRIES};
use crate::error::ActionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestStatus {
    /// Prerequisites not yet completed.
    Locked,
    Available,
    Active,
    Completed,
    Failed,
}

impl QuestStatus {
    pub fn label(self) -> &'static str {
        match self {
            QuestStatus::Locked => "locked",
            QuestStatus::Available => "available",
            QuestStatus::Active => "active",
            QuestStatus::Completed => "completed",
            QuestStatus::Failed => "failed",
        }
    }
}

pub fn quest_status(player: &Player, quest: &Quest) -> QuestStatus {
    let holds = |list: &[String]| list.iter().any(|id| *id == quest.id);
    if holds(&player.completed_quests) {
        QuestStatus::Completed
    } else if holds(&player.failed_quests) {
        QuestStatus::Failed
    } else if holds(&player.active_quests) {
        QuestStatus::Active
    } else if quest
        .prerequisites
        .iter()
        .all(|p| player.completed_quests.contains(p))
    {
        QuestStatus::Available
    } else {
        QuestStatus::Locked
    }
}

pub fn accept_quest(
    player: &mut Player,
    catalog: &Catalog,
    quest_id: &str,
) -> Result<String, ActionError> {
    let quest = catalog
        .quests
        .get(quest_id)
        .ok_or_else(|| ActionError::not_found("quest", quest_id))?;
    match quest_status(player, quest) {
        QuestStatus::Available => {}
        QuestStatus::Locked => {
            let missing = quest
                .prerequisites
                .iter()
                .find(|p| !player.completed_quests.contains(p))
                .map(|p| catalog.quests.get(p).map_or_else(|| p.clone(), |q| q.name.clone()))
                .unwrap_or_default();
            return Err(ActionError::MissingPrerequisite(missing));
        }
        closed => {
            return Err(ActionError::QuestClosed {
                id: quest.id.clone(),
                state: closed.label(),
            })
        }
    }
    player.active_quests.push(quest.id.clone());
    Ok(quest.name.clone())
}

/// Accept every auto-accept quest that has just become available.
/// Returns the names of quests accepted.
pub fn auto_accept_quests(player: &mut Player, catalog: &Catalog) -> Vec<String> {
    let ready: Vec<&Quest> = catalog
        .quests
        .values()
        .filter(|q| q.auto_accept && quest_status(player, q) == QuestStatus::Available)
        .collect();
    ready
        .into_iter()
        .map(|q| {
            player.active_quests.push(q.id.clone());
            q.name.clone()
        })
        .collect()
}

pub fn objective_met(player: &Player, now: GameTime, objective: &Objective) -> bool {
    match objective {
        Objective::VisitLocation { location } => player.visited_locations.contains(location),
        Objective::TalkTo { npc } => player.npcs_met.contains(npc),
        Objective::HoldItem { item, quantity } => player.inventory.has(item, *quantity),
        Objective::CompleteProgram { program } => player.completed_programs.contains(program),
        Objective::ReachDay { day } => now.day() >= *day,
        Objective::FactionReputation { faction, value } => {
            player.standing(*faction).reputation() >= *value
        }
        Objective::SkillAtLeast { skill, value } => player.effective_skill(*skill) >= *value,
        Objective::CleanMoney { amount } => player.clean_money() >= *amount,
        Objective::ItemsCrafted { count } => player.stats.items_crafted >= *count,
        Objective::Trades { count } => player.stats.items_traded >= *count,
    }
}

/// What paying out a reward did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardReceipt {
    pub levels_gained: u32,
    /// Names of reward items left on the ground because they didn't fit.
    pub dropped: Vec<String>,
}

/// Pay out a reward. Items that would overload the player are left at
/// their location instead.
pub fn apply_reward(
    player: &mut Player,
    catalog: &Catalog,
    world: &mut World,
    reward: &Reward,
) -> RewardReceipt {
    let mut receipt = RewardReceipt {
        levels_gained: player.grant_experience(reward.experience),
        dropped: Vec::new(),
    };
    player.earn_clean(reward.clean_money);
    player.earn_dirty(reward.dirty_money);

    let durries = (reward.durries > 0).then_some((DURRIES, reward.durries));
    let items = reward
        .items
        .iter()
        .map(|(id, &qty)| (id.as_str(), qty))
        .chain(durries);
    for (id, qty) in items {
        let Some(def) = catalog.items.get(id) else {
            continue;
        };
        for stack in def.units(qty) {
            if player
                .inventory
                .add(stack.clone(), player.carry_capacity)
                .is_err()
            {
                receipt.dropped.push(stack.name.clone());
                world.drop_item(&player.location, stack);
            }
        }
    }

    for (&faction, &delta) in &reward.faction_reputation {
        player.update_faction_standing(faction, delta, 0);
    }
    player.apply_effects(&reward.effects);
    receipt
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestUpdates {
    pub completed: Vec<String>,
    pub failed: Vec<String>,
    pub accepted: Vec<String>,
    pub dropped: Vec<String>,
}

impl QuestUpdates {
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty() && self.failed.is_empty() && self.accepted.is_empty()
    }
}

/// Settle every active quest against the current state.
pub fn evaluate_quests(
    player: &mut Player,
    catalog: &Catalog,
    world: &mut World,
    now: GameTime,
) -> QuestUpdates {
    let mut updates = QuestUpdates::default();
    let active = std::mem::take(&mut player.active_quests);
    let mut still_active = Vec::with_capacity(active.len());

    for id in active {
        let Some(quest) = catalog.quests.get(&id) else {
            still_active.push(id);
            continue;
        };
        if quest.objectives.iter().all(|o| objective_met(player, now, o)) {
            player.completed_quests.push(id);
            player.stats.quests_completed += 1;
            let receipt = apply_reward(player, catalog, world, &quest.reward);
            updates.dropped.extend(receipt.dropped);
            info!("{} completed quest {}", player.name, quest.name);
            updates.completed.push(quest.name.clone());
        } else if quest.deadline_day.is_some_and(|d| now.day() > d) {
            player.failed_quests.push(id);
            info!("{} failed quest {}", player.name, quest.name);
            updates.failed.push(quest.name.clone());
        } else {
            still_active.push(id);
        }
    }
    player.active_quests = still_active;

    if !updates.completed.is_empty() {
        updates.accepted = auto_accept_quests(player, catalog);
    }
    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Item, ItemType};
    use crate::config::SimConfig;
    use std::collections::BTreeMap;
    use yatala_logic::factions::Faction;

    fn item(id: &str, weight: f32, stackable: bool) -> Item {
        Item {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            item_type: ItemType::Quest,
            value: 1,
            weight,
            stackable,
            quantity: 1,
            damage: 0,
            effects: BTreeMap::new(),
        }
    }

    fn quest(id: &str, objectives: Vec<Objective>, prerequisites: Vec<String>) -> Quest {
        Quest {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            objectives,
            prerequisites,
            deadline_day: None,
            reward: Reward::default(),
            auto_accept: false,
        }
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::default();
        catalog.items.insert(DURRIES.into(), item(DURRIES, 0.0, true));
        catalog.items.insert("anvil".into(), item("anvil", 40.0, false));
        let mut first = quest(
            "first_day",
            vec![Objective::VisitLocation {
                location: "yard".into(),
            }],
            vec![],
        );
        first.auto_accept = true;
        first.reward = Reward {
            experience: 50,
            durries: 10,
            ..Reward::default()
        };
        catalog.quests.insert(first.id.clone(), first);
        let mut second = quest(
            "make_friends",
            vec![Objective::FactionReputation {
                faction: Faction::Rebels,
                value: 10,
            }],
            vec!["first_day".into()],
        );
        second.auto_accept = true;
        second.deadline_day = Some(3);
        catalog.quests.insert(second.id.clone(), second);
        catalog
    }

    fn player() -> Player {
        Player::new("Test", "cell", &SimConfig::default())
    }

    #[test]
    fn test_status_follows_lists() {
        let catalog = catalog();
        let mut p = player();
        let first = &catalog.quests["first_day"];
        let second = &catalog.quests["make_friends"];
        assert_eq!(quest_status(&p, first), QuestStatus::Available);
        assert_eq!(quest_status(&p, second), QuestStatus::Locked);
        assert!(matches!(
            accept_quest(&mut p, &catalog, "make_friends"),
            Err(ActionError::MissingPrerequisite(_))
        ));
        accept_quest(&mut p, &catalog, "first_day").unwrap();
        assert_eq!(quest_status(&p, first), QuestStatus::Active);
        assert_eq!(
            accept_quest(&mut p, &catalog, "first_day"),
            Err(ActionError::QuestClosed {
                id: "first_day".into(),
                state: "active"
            })
        );
    }

    #[test]
    fn test_completion_pays_once_and_unlocks() {
        let catalog = catalog();
        let mut world = World::default();
        let mut p = player();
        assert_eq!(auto_accept_quests(&mut p, &catalog), vec!["first_day"]);
        let now = GameTime::default();

        assert!(evaluate_quests(&mut p, &catalog, &mut world, now).is_empty());
        p.visited_locations.insert("yard".into());
        let updates = evaluate_quests(&mut p, &catalog, &mut world, now);
        assert_eq!(updates.completed, vec!["first_day"]);
        assert_eq!(updates.accepted, vec!["make_friends"]);
        assert_eq!(p.durries(), 10);
        assert_eq!(p.stats.quests_completed, 1);

        let again = evaluate_quests(&mut p, &catalog, &mut world, now);
        assert!(again.completed.is_empty());
        assert_eq!(p.durries(), 10);
    }

    #[test]
    fn test_deadline_fails_quest_after_the_day() {
        let catalog = catalog();
        let mut world = World::default();
        let mut p = player();
        p.completed_quests.push("first_day".into());
        accept_quest(&mut p, &catalog, "make_friends").unwrap();

        let day3 = GameTime::new(3, 23, 0).unwrap();
        assert!(evaluate_quests(&mut p, &catalog, &mut world, day3).is_empty());
        let day4 = GameTime::new(4, 0, 0).unwrap();
        let updates = evaluate_quests(&mut p, &catalog, &mut world, day4);
        assert_eq!(updates.failed, vec!["make_friends"]);
        assert_eq!(
            quest_status(&p, &catalog.quests["make_friends"]),
            QuestStatus::Failed
        );
    }

    #[test]
    fn test_completion_beats_deadline_on_the_day() {
        let catalog = catalog();
        let mut world = World::default();
        let mut p = player();
        p.completed_quests.push("first_day".into());
        accept_quest(&mut p, &catalog, "make_friends").unwrap();
        p.update_faction_standing(Faction::Rebels, 10, 0);
        let day3 = GameTime::new(3, 12, 0).unwrap();
        let updates = evaluate_quests(&mut p, &catalog, &mut world, day3);
        assert_eq!(updates.completed, vec!["make_friends"]);
    }

    #[test]
    fn test_reward_overflow_lands_on_the_ground() {
        let catalog = catalog();
        let mut world = World::default();
        let mut p = player();
        let mut items = BTreeMap::new();
        items.insert("anvil".to_string(), 2);
        let reward = Reward {
            items,
            ..Reward::default()
        };
        let receipt = apply_reward(&mut p, &catalog, &mut world, &reward);
        assert_eq!(p.inventory.quantity_of("anvil"), 1);
        assert_eq!(receipt.dropped, vec!["anvil"]);
        assert_eq!(world.items_at("cell").len(), 1);
    }
}
