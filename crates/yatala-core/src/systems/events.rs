//! Seasonal events - calendar-bound happenings the player can join

use log::debug;
use rand::Rng;
use yatala_logic::clock::{GameTime, MINUTES_PER_HOUR};

use super::quests::{apply_reward, RewardReceipt};
use super::roll;
use crate::catalog::Catalog;
use crate::components::{Player, World};
use crate::error::ActionError;

#[derive(Debug, Clone, PartialEq)]
pub enum EventResult {
    Rewarded(RewardReceipt),
    /// The risk roll went against the player.
    WentWrong { damage: i32, stress: i32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome {
    pub event_name: String,
    pub result: EventResult,
    pub minutes: u32,
}

/// Take part in a seasonal event running today.
///
/// Required items are handed over whether or not things go well.
pub fn participate_in_event<R: Rng + ?Sized>(
    player: &mut Player,
    catalog: &Catalog,
    world: &mut World,
    now: GameTime,
    event_id: &str,
    rng: &mut R,
) -> Result<EventOutcome, ActionError> {
    let event = catalog
        .seasonal_events
        .get(event_id)
        .ok_or_else(|| ActionError::not_found("seasonal event", event_id))?;
    if !event.window.contains(&now) {
        return Err(ActionError::OutOfSeason(event.name.clone()));
    }
    let cooldown = u64::from(event.cooldown_hours) * MINUTES_PER_HOUR;
    if let Some(&last) = player.seasonal_events.get(event_id) {
        let elapsed = now.total_minutes().saturating_sub(last);
        if elapsed < cooldown {
            return Err(ActionError::OnCooldown {
                name: event.name.clone(),
                remaining_minutes: cooldown - elapsed,
            });
        }
    }
    player.inventory.remove_all(&event.required_items)?;
    player
        .seasonal_events
        .insert(event_id.to_string(), now.total_minutes());

    let result = if roll(rng, event.risk) {
        player.vitals.take_damage(event.penalty_health);
        player.wellness.update(event.penalty_stress, 0, 0);
        EventResult::WentWrong {
            damage: event.penalty_health,
            stress: event.penalty_stress,
        }
    } else {
        EventResult::Rewarded(apply_reward(player, catalog, world, &event.reward))
    };
    debug!("seasonal event {} -> {:?}", event.id, result);

    Ok(EventOutcome {
        event_name: event.name.clone(),
        result,
        minutes: event.duration_hours.saturating_mul(60),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Reward, SeasonalEvent};
    use crate::config::SimConfig;
    use rand::rngs::mock::StepRng;
    use std::collections::BTreeMap;
    use yatala_logic::clock::CalendarWindow;

    fn catalog(risk: f64) -> Catalog {
        let mut catalog = Catalog::default();
        let mut required_items = BTreeMap::new();
        required_items.insert("cake".to_string(), 1);
        catalog.seasonal_events.insert(
            "new_year".into(),
            SeasonalEvent {
                id: "new_year".into(),
                name: "New Year's Eve".into(),
                description: String::new(),
                window: CalendarWindow {
                    start: (12, 31),
                    end: (1, 2),
                },
                duration_hours: 2,
                cooldown_hours: 48,
                required_items,
                risk,
                penalty_health: 15,
                penalty_stress: 10,
                reward: Reward {
                    clean_money: 5,
                    ..Reward::default()
                },
            },
        );
        catalog
    }

    fn player_with_cake() -> Player {
        let mut p = Player::new("Test", "yard", &SimConfig::default());
        let cake = crate::components::Item {
            id: "cake".into(),
            name: "Cake".into(),
            description: String::new(),
            item_type: crate::components::ItemType::Consumable,
            value: 5,
            weight: 0.5,
            stackable: true,
            quantity: 2,
            damage: 0,
            effects: BTreeMap::new(),
        };
        p.inventory.add(cake, 50.0).unwrap();
        p
    }

    #[test]
    fn test_window_cooldown_and_reward() {
        let catalog = catalog(0.0);
        let mut world = World::default();
        let mut p = player_with_cake();
        let mut rng = StepRng::new(0, 0);

        let day1 = GameTime::default();
        let out = participate_in_event(&mut p, &catalog, &mut world, day1, "new_year", &mut rng)
            .unwrap();
        assert!(matches!(out.result, EventResult::Rewarded(_)));
        assert_eq!(out.minutes, 120);
        assert_eq!(p.clean_money(), 55);
        assert_eq!(p.inventory.quantity_of("cake"), 1);

        let before = p.clone();
        assert!(matches!(
            participate_in_event(&mut p, &catalog, &mut world, day1, "new_year", &mut rng),
            Err(ActionError::OnCooldown { .. })
        ));
        assert_eq!(p, before);

        let january = GameTime::new(10, 12, 0).unwrap();
        assert_eq!(
            participate_in_event(&mut p, &catalog, &mut world, january, "new_year", &mut rng),
            Err(ActionError::OutOfSeason("New Year's Eve".into()))
        );
    }

    #[test]
    fn test_risk_goes_wrong() {
        let catalog = catalog(1.0);
        let mut world = World::default();
        let mut p = player_with_cake();
        let mut rng = StepRng::new(0, 0);
        let out = participate_in_event(
            &mut p,
            &catalog,
            &mut world,
            GameTime::default(),
            "new_year",
            &mut rng,
        )
        .unwrap();
        assert_eq!(
            out.result,
            EventResult::WentWrong {
                damage: 15,
                stress: 10
            }
        );
        assert_eq!(p.vitals.health(), 85);
        assert_eq!(p.wellness.stress(), 10);
        assert_eq!(p.clean_money(), 50);
    }

    #[test]
    fn test_required_items_checked() {
        let catalog = catalog(0.0);
        let mut world = World::default();
        let mut p = Player::new("Test", "yard", &SimConfig::default());
        let mut rng = StepRng::new(0, 0);
        assert_eq!(
            participate_in_event(
                &mut p,
                &catalog,
                &mut world,
                GameTime::default(),
                "new_year",
                &mut rng
            ),
            Err(ActionError::ItemNotFound("cake".into()))
        );
        assert!(p.seasonal_events.is_empty());
    }
}
