//! End-to-end scenarios through the engine's action API.
//!
//! Every scenario runs against the shipped catalog with a constant
//! generator: `StepRng::new(0, 0)` draws 0.0 (every roll with a non-zero
//! chance passes), `StepRng::new(u64::MAX, 0)` draws just under 1.0
//! (every roll below certainty fails).

use rand::rngs::mock::StepRng;
use yatala_core::prelude::*;
use yatala_core::systems::QuestStatus;
use yatala_logic::factions::{Faction, FactionRank};
use yatala_logic::sentence::Release;
use yatala_logic::stats::{Attribute, Skill};

// ── Helpers ────────────────────────────────────────────────────────────

fn catalog() -> Catalog {
    Catalog::builtin().expect("builtin catalog parses")
}

fn engine_with(catalog: Catalog, rng: StepRng) -> GameEngine<StepRng> {
    GameEngine::with_rng(catalog, SimConfig::default(), "Mate", rng)
}

fn serving(sentence_days: u32, rng: StepRng) -> GameEngine<StepRng> {
    let config = SimConfig {
        sentence_days,
        ..SimConfig::default()
    };
    GameEngine::with_rng(catalog(), config, "Mate", rng)
}

/// Minutes from the 06:00 start to the first midnight.
const TO_MIDNIGHT: i64 = 18 * 60;

fn lucky() -> GameEngine<StepRng> {
    engine_with(catalog(), StepRng::new(0, 0))
}

fn unlucky() -> GameEngine<StepRng> {
    engine_with(catalog(), StepRng::new(u64::MAX, 0))
}

fn act(engine: &mut GameEngine<StepRng>, action: Action) -> ActionResult {
    engine.perform(action)
}

fn go(engine: &mut GameEngine<StepRng>, to: &str) -> ActionResult {
    act(engine, Action::Move { to: to.into() })
}

// ── New game ───────────────────────────────────────────────────────────

#[test]
fn new_game_baseline() {
    let engine = lucky();
    let status = engine.status();
    assert_eq!(status.time.to_string(), "Day 1, 06:00");
    assert_eq!(status.location, "cell_b12");
    assert_eq!(status.hunger, 0);
    assert_eq!(status.hygiene, 100);
    assert_eq!(status.energy, status.max_energy);
    assert_eq!(status.durries, 20);
    assert_eq!(status.clean_money, 50);
    assert_eq!(engine.quest_status("first_day"), Some(QuestStatus::Active));
    assert_eq!(engine.quest_status("first_trade"), Some(QuestStatus::Locked));
    assert!(engine
        .messages()
        .iter()
        .any(|m| m.contains("New quest: First Day Inside")));
}

#[test]
fn two_hours_outside_rest_window_decays_needs() {
    let mut engine = lucky();
    let rates = engine.config().needs.clone();
    let result = act(&mut engine, Action::Wait { minutes: 120 });
    assert!(result.success());
    assert_eq!(result.state.hunger, 2 * rates.hunger_per_hour);
    assert_eq!(result.state.hygiene, 100 - 2 * rates.hygiene_per_hour);
    assert_eq!(result.state.energy, result.state.max_energy);
    assert_eq!(result.state.time.to_string(), "Day 1, 08:00");
}

#[test]
fn waits_compose() {
    let mut split = lucky();
    split.wait(50).unwrap();
    split.wait(100).unwrap();
    let mut whole = lucky();
    whole.wait(150).unwrap();
    assert_eq!(split.clock(), whole.clock());
    assert_eq!(split.player(), whole.player());
}

#[test]
fn negative_wait_is_out_of_range() {
    let mut engine = lucky();
    let before = engine.player().clone();
    let result = act(&mut engine, Action::Wait { minutes: -5 });
    assert_eq!(result.status, ActionStatus::Rejected);
    assert_eq!(result.kind, Some(ErrorKind::OutOfRange));
    assert_eq!(engine.player(), &before);
    assert_eq!(engine.clock().to_string(), "Day 1, 06:00");
}

// ── Movement and the first quest ───────────────────────────────────────

#[test]
fn first_day_walkthrough() {
    let mut engine = lucky();
    assert!(act(&mut engine, Action::Talk { npc: "cellie_davo".into() }).success());
    assert!(go(&mut engine, "b_block_hall").success());
    assert!(go(&mut engine, "mess_hall").success());

    // Yard opens at nine.
    let closed = go(&mut engine, "yard");
    assert_eq!(closed.status, ActionStatus::Rejected);
    assert_eq!(closed.kind, Some(ErrorKind::PreconditionNotMet));
    assert_eq!(closed.state.location, "mess_hall");
    assert_eq!(closed.state.time.to_string(), "Day 1, 06:25");

    assert!(act(&mut engine, Action::Wait { minutes: 155 }).success());
    let arrived = go(&mut engine, "yard");
    assert!(arrived.success());
    assert!(arrived.message.contains("Quest complete: First Day Inside"));
    assert!(arrived.message.contains("New quest: First Deal"));

    assert_eq!(engine.quest_status("first_day"), Some(QuestStatus::Completed));
    assert_eq!(engine.quest_status("first_trade"), Some(QuestStatus::Active));
    assert_eq!(engine.quest_status("join_crew"), Some(QuestStatus::Available));
    let player = engine.player();
    assert_eq!(player.durries(), 30);
    assert_eq!(player.attributes.get(Attribute::Reputation), 5);
    assert_eq!(player.stats.locations_visited, 4);
    assert_eq!(player.stats.npcs_met, 1);
}

#[test]
fn moving_to_unconnected_or_unknown_place_is_rejected() {
    let mut engine = lucky();
    let result = go(&mut engine, "gym");
    assert_eq!(result.status, ActionStatus::Rejected);
    assert_eq!(result.kind, Some(ErrorKind::PreconditionNotMet));
    let result = go(&mut engine, "nowhere");
    assert_eq!(result.kind, Some(ErrorKind::NotFound));
    assert_eq!(engine.clock().to_string(), "Day 1, 06:00");
}

// ── Crafting ───────────────────────────────────────────────────────────

fn crafter(success_chance: f64) -> GameEngine<StepRng> {
    let mut catalog = catalog();
    if let Some(recipe) = catalog.recipes.get_mut("shiv") {
        recipe.success_chance = success_chance;
    }
    let mut engine = engine_with(catalog, StepRng::new(0, 0));
    engine.learn_recipe("shiv").unwrap();
    engine.player_mut().skills.set(Skill::Crafting, 20);
    engine
}

#[test]
fn crafting_with_zero_chance_spends_inputs_and_yields_nothing() {
    const TRIALS: u32 = 5;
    let mut engine = crafter(0.0);
    engine.give_item("metal_scrap", TRIALS).unwrap();
    engine.give_item("tape", TRIALS).unwrap();
    let energy = engine.player().vitals.energy();

    for trial in 1..=TRIALS {
        let result = act(&mut engine, Action::Craft { recipe: "shiv".into() });
        assert_eq!(result.status, ActionStatus::Unlucky, "trial {trial}");
        let player = engine.player();
        assert_eq!(player.inventory.quantity_of("metal_scrap"), TRIALS - trial);
        assert_eq!(player.inventory.quantity_of("tape"), TRIALS - trial);
        assert_eq!(player.inventory.quantity_of("shiv"), 0);
        assert_eq!(player.vitals.energy(), energy - 3 * trial as i32);
    }
    assert_eq!(engine.player().stats.items_crafted, 0);
}

#[test]
fn crafting_without_inputs_changes_nothing() {
    let mut engine = crafter(1.0);
    engine.give_item("metal_scrap", 1).unwrap();
    let before = engine.player().clone();
    let clock = engine.clock();

    let result = act(&mut engine, Action::Craft { recipe: "shiv".into() });
    assert_eq!(result.status, ActionStatus::Rejected);
    assert_eq!(result.kind, Some(ErrorKind::PreconditionNotMet));
    assert_eq!(engine.player(), &before);
    assert_eq!(engine.clock(), clock);
}

#[test]
fn crafting_with_empty_pockets_is_a_missing_item_not_an_unknown_id() {
    let mut engine = crafter(1.0);
    let result = act(&mut engine, Action::Craft { recipe: "shiv".into() });
    assert_eq!(result.status, ActionStatus::Rejected);
    assert_eq!(result.kind, Some(ErrorKind::PreconditionNotMet));
    assert!(result.message.contains("metal_scrap"), "{}", result.message);

    let result = act(&mut engine, Action::Craft { recipe: "bomb".into() });
    assert_eq!(result.kind, Some(ErrorKind::NotFound));
}

#[test]
fn crafting_success_yields_output() {
    let mut engine = crafter(1.0);
    engine.give_item("metal_scrap", 1).unwrap();
    engine.give_item("tape", 1).unwrap();
    let result = act(&mut engine, Action::Craft { recipe: "shiv".into() });
    assert!(result.success());
    assert_eq!(engine.player().inventory.quantity_of("shiv"), 1);
    assert_eq!(engine.player().stats.items_crafted, 1);
}

#[test]
fn crafting_needs_the_skill() {
    let mut engine = crafter(1.0);
    engine.player_mut().skills.set(Skill::Crafting, 5);
    engine.give_item("metal_scrap", 1).unwrap();
    engine.give_item("tape", 1).unwrap();
    let result = act(&mut engine, Action::Craft { recipe: "shiv".into() });
    assert_eq!(result.status, ActionStatus::Rejected);
    assert!(result.message.contains("crafting 20"));
    assert_eq!(engine.player().inventory.quantity_of("tape"), 1);
}

// ── Relationships and factions ─────────────────────────────────────────

#[test]
fn relationship_event_on_cooldown_changes_nothing() {
    let mut engine = lucky();
    let first = act(
        &mut engine,
        Action::TriggerRelationshipEvent {
            event: "helped_in_fight".into(),
        },
    );
    assert!(first.success());
    let relationships = engine.player().relationships.clone();
    let standings = engine.player().faction_standings.clone();

    let second = act(
        &mut engine,
        Action::TriggerRelationshipEvent {
            event: "helped_in_fight".into(),
        },
    );
    assert_eq!(second.status, ActionStatus::Rejected);
    assert_eq!(second.kind, Some(ErrorKind::OnCooldown));
    assert_eq!(engine.player().relationships, relationships);
    assert_eq!(engine.player().faction_standings, standings);
}

#[test]
fn faction_standing_saturates_at_leader() {
    let mut engine = lucky();
    engine
        .player_mut()
        .update_faction_standing(Faction::Rebels, 90, 0);
    let rank = engine
        .player_mut()
        .update_faction_standing(Faction::Rebels, 90, 0);
    assert_eq!(rank, FactionRank::Leader);
    assert_eq!(engine.player().standing(Faction::Rebels).reputation(), 100);

    let result = act(
        &mut engine,
        Action::JoinFaction {
            faction: Faction::Rebels,
        },
    );
    assert!(result.success());
    assert_eq!(engine.player().affiliation_rank(), Some(FactionRank::Leader));
    assert_eq!(
        engine.player().political.primary_faction,
        Some(Faction::Rebels)
    );
}

// ── Money ──────────────────────────────────────────────────────────────

#[test]
fn failed_laundering_never_overdraws() {
    let mut engine = unlucky();
    engine.learn_operation("laundry_front").unwrap();
    {
        let player = engine.player_mut();
        player.earn_dirty(1000);
        player.adjust_underground_reputation(20);
        player.update_faction_standing(Faction::StaffCorruptionRing, 20, 0);
        player.skills.set(Skill::Trading, 20);
    }

    let short = act(
        &mut engine,
        Action::Launder {
            operation: "laundry_front".into(),
        },
    );
    assert_eq!(short.status, ActionStatus::Rejected);
    assert_eq!(engine.player().dirty_money(), 1000);

    engine.player_mut().earn_clean(50);
    let result = act(
        &mut engine,
        Action::Launder {
            operation: "laundry_front".into(),
        },
    );
    assert_eq!(result.status, ActionStatus::Unlucky);
    assert_eq!(result.state.clean_money, 0);
    assert_eq!(result.state.dirty_money, 0);
    assert_eq!(engine.player().underground_reputation(), 10);
}

#[test]
fn trading_with_the_cook() {
    let mut engine = lucky();
    go(&mut engine, "b_block_hall");
    let arrival = go(&mut engine, "mess_hall");
    assert!(
        arrival
            .message
            .contains("Johnno the Cook, Tony the Lag are here."),
        "{}",
        arrival.message
    );

    let pie = act(
        &mut engine,
        Action::Buy {
            npc: "cook_johnno".into(),
            item: "vilis_pie".into(),
        },
    );
    assert_eq!(pie.status, ActionStatus::Rejected);
    assert_eq!(pie.state.durries, 20);

    let tucker = act(
        &mut engine,
        Action::Buy {
            npc: "cook_johnno".into(),
            item: "prison_tucker".into(),
        },
    );
    assert!(tucker.success());
    assert_eq!(tucker.state.durries, 15);
    assert_eq!(engine.player().stats.items_traded, 1);

    let sold = act(
        &mut engine,
        Action::Sell {
            npc: "cook_johnno".into(),
            item: "prison_tucker".into(),
        },
    );
    assert!(sold.success());
    assert_eq!(sold.state.durries, 17);
}

#[test]
fn a_shift_at_the_workshop_pays() {
    let mut engine = lucky();
    act(&mut engine, Action::Wait { minutes: 120 });
    go(&mut engine, "b_block_hall");
    assert!(go(&mut engine, "workshop").success());
    let result = act(&mut engine, Action::Work { hours: 2 });
    assert!(result.success());
    assert_eq!(result.state.clean_money, 60);
    assert_eq!(result.state.energy, 80);
    assert_eq!(result.state.time.to_string(), "Day 1, 10:20");
}

#[test]
fn manufacturing_a_batch_of_durries() {
    let mut catalog = catalog();
    if let Some(process) = catalog.processes.get_mut("cigarette_production") {
        process.risk_factor = 0.0;
    }
    let mut engine = engine_with(catalog, StepRng::new(0, 0));
    let manufacture = |engine: &mut GameEngine<StepRng>| {
        act(
            engine,
            Action::Manufacture {
                process: "cigarette_production".into(),
            },
        )
    };

    let unknown = manufacture(&mut engine);
    assert_eq!(unknown.status, ActionStatus::Rejected);
    assert_eq!(unknown.kind, Some(ErrorKind::PreconditionNotMet));

    engine.learn_process("cigarette_production").unwrap();
    engine.player_mut().skills.set(Skill::Crafting, 30);
    engine.player_mut().skills.set(Skill::Smuggling, 25);
    engine.give_item("tobacco", 20).unwrap();
    engine.give_item("paper", 50).unwrap();
    engine.give_item("filters", 50).unwrap();

    let alone = manufacture(&mut engine);
    assert_eq!(alone.status, ActionStatus::Rejected);
    assert!(alone.message.contains("workers"), "{}", alone.message);

    engine.player_mut().update_relationship("cellie_davo", 10, 0, 0);
    let clock = engine.clock();
    let result = manufacture(&mut engine);
    assert!(result.success(), "{}", result.message);
    assert_eq!(result.state.durries, 120);
    assert_eq!(result.state.energy, result.state.max_energy - 30);
    assert_eq!(result.state.health, result.state.max_health);
    assert_eq!(result.state.ending, None);
    assert_eq!(
        engine.clock().total_minutes() - clock.total_minutes(),
        8 * 60
    );
    let player = engine.player();
    assert_eq!(player.inventory.quantity_of("tobacco"), 0);
    assert_eq!(player.underground_reputation(), 3);
}

#[test]
fn giving_weapons_hands_over_separate_units() {
    let mut engine = lucky();
    engine.give_item("shiv", 3).unwrap();
    let shivs: Vec<&Item> = engine
        .player()
        .inventory
        .stacks()
        .iter()
        .filter(|i| i.id == "shiv")
        .collect();
    assert_eq!(shivs.len(), 3);
    assert!(shivs.iter().all(|i| i.quantity == 1));
}

// ── Endings ────────────────────────────────────────────────────────────

#[test]
fn collapsing_ends_the_game() {
    let mut engine = lucky();
    {
        let vitals = &mut engine.player_mut().vitals;
        vitals.adjust_hunger(100);
        let health = vitals.health();
        vitals.take_damage(health - 1);
    }

    let result = act(&mut engine, Action::Wait { minutes: 60 });
    assert!(result.success());
    assert_eq!(result.state.health, 0);
    assert_eq!(result.state.ending, Some(Ending::Incapacitated));
    assert!(result.message.contains("You collapse"), "{}", result.message);

    let clock = engine.clock();
    let after = act(&mut engine, Action::Wait { minutes: 60 });
    assert_eq!(after.status, ActionStatus::Rejected);
    assert_eq!(after.kind, Some(ErrorKind::PreconditionNotMet));
    assert!(after.message.contains("the game is over"), "{}", after.message);
    assert_eq!(engine.clock(), clock);
    assert_eq!(after.state.health, 0);
}

#[test]
fn serving_the_sentence_releases_the_player() {
    let mut engine = serving(1, StepRng::new(u64::MAX, 0));
    let status = engine.status();
    assert_eq!((status.days_served, status.sentence_days), (0, 1));

    let result = act(&mut engine, Action::Wait { minutes: TO_MIDNIGHT });
    assert!(result.success());
    assert_eq!(result.state.days_served, 1);
    assert_eq!(
        result.state.ending,
        Some(Ending::Released(Release::Served))
    );
    assert!(result.message.contains("served your sentence"));

    let late = go(&mut engine, "b_block_hall");
    assert_eq!(late.status, ActionStatus::Rejected);
    assert_eq!(engine.player().location, "cell_b12");
}

#[test]
fn parole_comes_after_half_the_term() {
    let mut engine = serving(4, StepRng::new(u64::MAX, 0));
    engine.player_mut().adjust_parole(100);

    let first = act(&mut engine, Action::Wait { minutes: TO_MIDNIGHT });
    assert_eq!(first.state.ending, None);
    let second = act(&mut engine, Action::Wait { minutes: 24 * 60 });
    assert_eq!(
        second.state.ending,
        Some(Ending::Released(Release::Paroled))
    );
    assert!(second.message.contains("parole board"));
}

// ── Random events ──────────────────────────────────────────────────────

fn only_event(id: &str) -> GameEngine<StepRng> {
    let mut catalog = catalog();
    catalog.random_events.retain(|k, _| k == id);
    engine_with(catalog, StepRng::new(0, 0))
}

#[test]
fn a_shakedown_at_midnight_takes_contraband() {
    let mut engine = only_event("guard_shakedown");
    engine.give_item("mobile", 1).unwrap();
    let reputation = engine.player().attributes.get(Attribute::Reputation);

    let evening = act(&mut engine, Action::Wait { minutes: 600 });
    assert!(!evening.message.contains("Guard Shakedown"));
    assert_eq!(engine.player().inventory.quantity_of("mobile"), 1);

    let night = act(&mut engine, Action::Wait { minutes: TO_MIDNIGHT - 600 });
    assert!(night.message.contains("Guard Shakedown"), "{}", night.message);
    assert!(night.message.contains("They take your Mobile Phone."));
    assert_eq!(engine.player().inventory.quantity_of("mobile"), 0);
    assert_eq!(
        engine.player().attributes.get(Attribute::Reputation),
        reputation - 10
    );
}

#[test]
fn a_shiv_takes_the_edge_off_a_yard_fight() {
    let mut bare = only_event("fight_breaks_out");
    let result = act(&mut bare, Action::Wait { minutes: TO_MIDNIGHT });
    assert!(result.message.contains("You take 20 damage."), "{}", result.message);

    let mut armed = only_event("fight_breaks_out");
    armed.give_item("shiv", 1).unwrap();
    let result = act(&mut armed, Action::Wait { minutes: TO_MIDNIGHT });
    assert!(result.message.contains("You take 10 damage."), "{}", result.message);
    assert_eq!(result.state.health, result.state.max_health - 10);
}

#[test]
fn every_midnight_gets_its_own_roll() {
    let mut engine = only_event("good_meal");
    let result = act(&mut engine, Action::Wait { minutes: TO_MIDNIGHT + 2 * 24 * 60 });
    let meals = result.message.matches("Good Meal").count();
    assert_eq!(meals, 3, "{}", result.message);
}

// ── Rehabilitation and health ──────────────────────────────────────────

#[test]
fn enrolling_twice_changes_nothing() {
    let mut engine = lucky();
    assert!(act(&mut engine, Action::Enroll { program: "basic_literacy".into() }).success());
    let skills = engine.player().skills.clone();
    let attributes = engine.player().attributes.clone();
    let parole = engine.player().parole_progress();
    let money = engine.player().clean_money();
    assert_eq!(parole, 5);
    assert_eq!(money, 30);

    let again = act(&mut engine, Action::Enroll { program: "basic_literacy".into() });
    assert!(again.success());
    assert_eq!(engine.player().skills, skills);
    assert_eq!(engine.player().attributes, attributes);
    assert_eq!(engine.player().parole_progress(), parole);
    assert_eq!(engine.player().clean_money(), money);
}

#[test]
fn prerequisites_gate_programs() {
    let mut engine = lucky();
    let result = act(&mut engine, Action::Enroll { program: "carpentry".into() });
    assert_eq!(result.status, ActionStatus::Rejected);
    assert!(result.message.contains("Basic Literacy"));
}

#[test]
fn influenza_weakens_until_treated() {
    let mut engine = unlucky();
    assert_eq!(engine.add_medical_condition("influenza"), Ok(true));
    assert_eq!(engine.add_medical_condition("influenza"), Ok(false));
    let base = engine.player().attributes.get(Attribute::Strength);
    assert_eq!(
        engine.player().effective_attribute(Attribute::Strength),
        base - 3
    );

    let result = act(
        &mut engine,
        Action::Treat {
            condition: "influenza".into(),
        },
    );
    assert!(result.success());
    assert_eq!(result.state.clean_money, 40);
    assert!(!engine.player().has_condition("influenza"));
    assert_eq!(
        engine.player().effective_attribute(Attribute::Strength),
        base
    );
}

// ── Items and events ───────────────────────────────────────────────────

#[test]
fn pick_up_and_read() {
    let mut engine = lucky();
    assert!(act(&mut engine, Action::PickUp { item: "cloth".into() }).success());
    assert_eq!(engine.player().inventory.quantity_of("cloth"), 2);
    assert!(engine.world().items_at("cell_b12").is_empty());

    engine.give_item("lock_guide", 1).unwrap();
    let read = act(&mut engine, Action::UseItem { item: "lock_guide".into() });
    assert!(read.success());
    assert_eq!(engine.player().skills.get(Skill::Lockpicking), 5);
    let again = act(&mut engine, Action::UseItem { item: "lock_guide".into() });
    assert_eq!(again.status, ActionStatus::Rejected);
    assert_eq!(engine.player().skills.get(Skill::Lockpicking), 5);
}

#[test]
fn new_year_runs_on_day_one_only() {
    let mut engine = unlucky();
    let result = act(
        &mut engine,
        Action::ParticipateInEvent {
            event: "new_year".into(),
        },
    );
    assert!(result.success());
    assert_eq!(result.state.durries, 25);

    let anzac = act(
        &mut engine,
        Action::ParticipateInEvent {
            event: "anzac_day".into(),
        },
    );
    assert_eq!(anzac.status, ActionStatus::Rejected);
    assert_eq!(anzac.kind, Some(ErrorKind::PreconditionNotMet));
}

// ── Persistence ────────────────────────────────────────────────────────

#[test]
fn saved_game_resumes_identically() {
    let mut engine = lucky();
    act(&mut engine, Action::Talk { npc: "cellie_davo".into() });
    act(&mut engine, Action::PickUp { item: "cloth".into() });
    engine.add_medical_condition("depression").unwrap();
    act(&mut engine, Action::Wait { minutes: 600 });

    let mut bytes = Vec::new();
    engine.save(&mut bytes).unwrap();
    let mut json = Vec::new();
    engine.save_json(&mut json).unwrap();

    let mut from_bytes = lucky();
    from_bytes.load(&bytes[..]).unwrap();
    let mut from_json = lucky();
    from_json.load_json(&json[..]).unwrap();

    for loaded in [&from_bytes, &from_json] {
        assert_eq!(loaded.clock(), engine.clock());
        assert_eq!(loaded.player(), engine.player());
        assert_eq!(loaded.world(), engine.world());
        assert_eq!(loaded.status(), engine.status());
        assert_eq!(
            loaded.messages().to_lines(),
            engine.messages().to_lines()
        );
    }
}
