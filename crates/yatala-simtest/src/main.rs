//! Yatala Lockdown Headless Simulation Harness
//!
//! Validates the shipped catalog, the pure rules and scripted play sessions
//! in-process, with no terminal front end.
//!
//! Usage:
//!   cargo run -p yatala-simtest
//!   cargo run -p yatala-simtest -- --verbose

use std::collections::{BTreeSet, VecDeque};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use yatala_core::config::validate_config;
use yatala_core::prelude::*;
use yatala_core::systems::QuestStatus;
use yatala_logic::clock::GameTime;
use yatala_logic::factions::FactionRank;
use yatala_logic::needs::{self, Mood, NeedRates, Vitals, Wellness};
use yatala_logic::progression::experience_for_level;
use yatala_logic::sentence::Release;

// ── Catalog (same JSON the engine ships with) ──────────────────────────
const CATALOG_JSON: &str = include_str!("../../../data/catalog.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Yatala Lockdown Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Catalog validation
    results.extend(validate_catalog(verbose));

    // 2. Default configuration
    results.extend(validate_config_defaults(verbose));

    // 3. Clock, needs and standing rules
    results.extend(validate_rules(verbose));

    // 4. Scripted first day
    results.extend(validate_first_day(verbose));

    // 5. Seeded sessions
    results.extend(validate_seeded_sessions(verbose));

    // 6. Save and load
    results.extend(validate_persistence(verbose));

    // 7. Serving a short sentence
    results.extend(validate_sentence(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog(verbose: bool) -> Vec<TestResult> {
    println!("--- Catalog ---");
    let mut results = Vec::new();

    let raw: Value = match serde_json::from_str(CATALOG_JSON) {
        Ok(v) => v,
        Err(e) => {
            results.push(check("catalog_json", false, format!("JSON parse error: {}", e)));
            return results;
        }
    };
    let catalog = match Catalog::from_json(CATALOG_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(check("catalog_parse", false, e.to_string()));
            return results;
        }
    };

    // No entry lost to indexing
    let raw_len = |key: &str| raw[key].as_array().map_or(0, Vec::len);
    for (key, parsed) in [
        ("items", catalog.items.len()),
        ("locations", catalog.locations.len()),
        ("npcs", catalog.npcs.len()),
        ("recipes", catalog.recipes.len()),
        ("random_events", catalog.random_events.len()),
        ("quests", catalog.quests.len()),
    ] {
        results.push(check(
            &format!("catalog_{}_indexed", key),
            raw_len(key) == parsed && parsed > 0,
            format!("{} in file, {} indexed", raw_len(key), parsed),
        ));
    }

    let errors = catalog.validate();
    results.push(check(
        "catalog_consistent",
        errors.is_empty(),
        if errors.is_empty() {
            "no reference or range errors".to_string()
        } else {
            errors.join("; ")
        },
    ));

    // Every location reachable from the start
    let mut seen = BTreeSet::new();
    let mut queue = VecDeque::from([catalog.start_location.clone()]);
    while let Some(id) = queue.pop_front() {
        if !seen.insert(id.clone()) {
            continue;
        }
        if let Some(loc) = catalog.locations.get(&id) {
            queue.extend(loc.connections.iter().cloned());
        }
    }
    let unreachable: Vec<&str> = catalog
        .locations
        .keys()
        .filter(|id| !seen.contains(*id))
        .map(String::as_str)
        .collect();
    results.push(check(
        "locations_reachable",
        unreachable.is_empty(),
        format!("{} reachable, unreachable: {:?}", seen.len(), unreachable),
    ));

    // Traders only stock known items
    let traders = catalog.npcs.values().filter(|n| n.is_trader()).count();
    results.push(check(
        "traders_present",
        traders >= 3,
        format!("{} NPCs trade", traders),
    ));

    let auto: Vec<&str> = catalog
        .quests
        .values()
        .filter(|q| q.auto_accept)
        .map(|q| q.id.as_str())
        .collect();
    results.push(check(
        "auto_accept_quests",
        auto.contains(&"first_day"),
        format!("{:?}", auto),
    ));

    if verbose {
        println!(
            "  {} items, {} locations, {} NPCs, {} quests",
            catalog.items.len(),
            catalog.locations.len(),
            catalog.npcs.len(),
            catalog.quests.len()
        );
    }
    results
}

// ── 2. Configuration ────────────────────────────────────────────────────

fn validate_config_defaults(verbose: bool) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let mut results = Vec::new();

    let config = SimConfig::default();
    let problems = validate_config(&config);
    results.push(check(
        "default_config_valid",
        problems.is_empty(),
        format!("{:?}", problems),
    ));

    let mut broken = config.clone();
    broken.carry_capacity = 0.0;
    results.push(check(
        "zero_capacity_rejected",
        !validate_config(&broken).is_empty(),
        "carry_capacity 0 flagged",
    ));

    let json = match serde_json::to_string(&config) {
        Ok(s) => s,
        Err(e) => {
            results.push(check("config_serialize", false, e.to_string()));
            return results;
        }
    };
    let reparsed = SimConfig::from_json(&json);
    results.push(check(
        "config_json_roundtrip",
        reparsed.as_ref().ok() == Some(&config),
        format!("{} bytes", json.len()),
    ));

    if verbose {
        println!(
            "  start {:02}:00, wage {}/h, travel {} min",
            config.start_hour, config.work_wage_per_hour, config.travel_minutes
        );
    }
    results
}

// ── 3. Rules ────────────────────────────────────────────────────────────

fn validate_rules(verbose: bool) -> Vec<TestResult> {
    println!("--- Rules ---");
    let mut results = Vec::new();

    let mut t = GameTime::new(1, 23, 50).unwrap_or_default();
    t.advance(20);
    results.push(check(
        "clock_day_rollover",
        t.day() == 2 && t.hour() == 0 && t.minute() == 10,
        t.to_string(),
    ));

    // Decay over one span matches decay over its parts
    let rates = NeedRates::default();
    let (mut v1, mut w1) = (Vitals::default(), Wellness::default());
    needs::decay(&mut v1, &mut w1, &rates, 6, 30);
    let (mut v2, mut w2) = (Vitals::default(), Wellness::default());
    needs::decay(&mut v2, &mut w2, &rates, 6, 11);
    needs::decay(&mut v2, &mut w2, &rates, 17, 19);
    results.push(check(
        "decay_split_invariant",
        v1 == v2 && w1 == w2,
        format!("hunger {} / {}", v1.hunger(), v2.hunger()),
    ));

    let mut rested = Vitals::default();
    rested.adjust_energy(-50);
    let before = rested.energy();
    needs::decay(&mut rested, &mut Wellness::default(), &rates, 22, 8);
    results.push(check(
        "rest_window_regenerates",
        rested.energy() > before,
        format!("{} -> {}", before, rested.energy()),
    ));

    let tiers = [
        (0, Mood::Optimistic),
        (20, Mood::Content),
        (59, Mood::Neutral),
        (60, Mood::Anxious),
        (100, Mood::Distressed),
    ];
    results.push(check(
        "mood_tiers",
        tiers.iter().all(|&(s, m)| Mood::from_score(s) == m),
        format!("{} boundaries", tiers.len()),
    ));

    let ranks = [
        (100, FactionRank::Leader),
        (20, FactionRank::Associate),
        (19, FactionRank::Neutral),
        (-100, FactionRank::PublicEnemy),
    ];
    results.push(check(
        "faction_ranks",
        ranks.iter().all(|&(r, k)| FactionRank::for_reputation(r) == k),
        format!("{} boundaries", ranks.len()),
    ));

    let curve_rises = (1..60).all(|l| experience_for_level(l + 1) > experience_for_level(l));
    results.push(check(
        "experience_curve_rises",
        curve_rises,
        format!("level 10 needs {}", experience_for_level(10)),
    ));

    if verbose {
        println!("  decay over 30h: hunger {}, mood {}", v1.hunger(), w1.mood().label());
    }
    results
}

// ── 4. First day ────────────────────────────────────────────────────────

const FIRST_DAY_SCRIPT: &str = r#"[
    {"action": "talk", "npc": "cellie_davo"},
    {"action": "move", "to": "b_block_hall"},
    {"action": "move", "to": "mess_hall"},
    {"action": "wait", "minutes": 155},
    {"action": "move", "to": "yard"}
]"#;

fn new_engine(seed: u64) -> Option<GameEngine<StdRng>> {
    let catalog = Catalog::builtin().ok()?;
    Some(GameEngine::with_rng(
        catalog,
        SimConfig::default(),
        "Simtest",
        StdRng::seed_from_u64(seed),
    ))
}

fn validate_first_day(verbose: bool) -> Vec<TestResult> {
    println!("--- First Day ---");
    let mut results = Vec::new();

    let script: Vec<Action> = match serde_json::from_str(FIRST_DAY_SCRIPT) {
        Ok(s) => s,
        Err(e) => {
            results.push(check("script_parse", false, e.to_string()));
            return results;
        }
    };
    let Some(mut engine) = new_engine(1) else {
        results.push(check("engine_start", false, "builtin catalog failed to load"));
        return results;
    };

    for action in script {
        let label = format!("{:?}", action);
        let result = engine.perform(action);
        if verbose {
            println!("  > {}\n    {}", label, result.message.replace('\n', "\n    "));
        }
        results.push(check(
            &format!("step {}", label),
            result.success(),
            result.message.lines().last().unwrap_or_default().to_string(),
        ));
    }

    results.push(check(
        "first_day_completed",
        engine.quest_status("first_day") == Some(QuestStatus::Completed),
        format!("{:?}", engine.quest_status("first_day")),
    ));
    results.push(check(
        "first_trade_unlocked",
        engine.quest_status("first_trade") == Some(QuestStatus::Active),
        format!("{:?}", engine.quest_status("first_trade")),
    ));
    let status = engine.status();
    results.push(check(
        "quest_reward_paid",
        status.durries == 30,
        format!("{} durries at {}", status.durries, status.time),
    ));
    results
}

// ── 5. Seeded sessions ──────────────────────────────────────────────────

fn session_script() -> Vec<Action> {
    vec![
        Action::PickUp {
            item: "cloth".into(),
        },
        Action::Wait { minutes: 120 },
        Action::Move {
            to: "b_block_hall".into(),
        },
        Action::Move {
            to: "workshop".into(),
        },
        Action::Work { hours: 4 },
        Action::Buy {
            npc: "supervisor_dave".into(),
            item: "tape".into(),
        },
        Action::LearnRecipe {
            recipe: "sock_lock".into(),
        },
        Action::PickUp {
            item: "metal_scrap".into(),
        },
        Action::Craft {
            recipe: "sock_lock".into(),
        },
        Action::Rest { hours: 2 },
    ]
}

fn run_session(seed: u64) -> Option<(GameEngine<StdRng>, Vec<ActionStatus>)> {
    let mut engine = new_engine(seed)?;
    let statuses = session_script()
        .into_iter()
        .map(|a| engine.perform(a).status)
        .collect();
    Some((engine, statuses))
}

fn validate_seeded_sessions(verbose: bool) -> Vec<TestResult> {
    println!("--- Seeded Sessions ---");
    let mut results = Vec::new();

    let (Some((a, sa)), Some((b, sb))) = (run_session(42), run_session(42)) else {
        results.push(check("session_start", false, "builtin catalog failed to load"));
        return results;
    };

    results.push(check(
        "same_seed_same_game",
        sa == sb && a.player() == b.player() && a.clock() == b.clock(),
        format!("{:?}", sa),
    ));

    let rejected = sa.iter().filter(|s| **s == ActionStatus::Rejected).count();
    results.push(check(
        "session_actions_accepted",
        rejected == 0,
        format!("{} rejected", rejected),
    ));

    let status = a.status();
    results.push(check(
        "shift_paid",
        status.clean_money == 70,
        format!("clean {}, dirty {}", status.clean_money, status.dirty_money),
    ));
    results.push(check(
        "needs_bounded",
        (0..=100).contains(&status.hunger)
            && (0..=100).contains(&status.hygiene)
            && status.energy <= status.max_energy,
        format!(
            "hunger {}, hygiene {}, energy {}/{}",
            status.hunger, status.hygiene, status.energy, status.max_energy
        ),
    ));
    results.push(check(
        "carried_within_capacity",
        status.carried_weight <= status.carry_capacity,
        format!("{:.2}/{:.1}kg", status.carried_weight, status.carry_capacity),
    ));

    if verbose {
        println!("  seed 42 ended {} at {}", status.time, status.location);
    }
    results
}

// ── 6. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(verbose: bool) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let (Some((engine, _)), Some(mut restored), Some(mut restored_json)) =
        (run_session(7), new_engine(0), new_engine(0))
    else {
        results.push(check("session_start", false, "builtin catalog failed to load"));
        return results;
    };

    let mut bytes = Vec::new();
    let binary = engine
        .save(&mut bytes)
        .and_then(|_| restored.load(&bytes[..]));
    results.push(check(
        "bincode_roundtrip",
        binary.is_ok() && restored.status() == engine.status() && restored.player() == engine.player(),
        format!("{} bytes, {:?}", bytes.len(), binary.err()),
    ));

    let mut json = Vec::new();
    let text = engine
        .save_json(&mut json)
        .and_then(|_| restored_json.load_json(&json[..]));
    results.push(check(
        "json_roundtrip",
        text.is_ok() && restored_json.world() == engine.world() && restored_json.clock() == engine.clock(),
        format!("{} bytes, {:?}", json.len(), text.err()),
    ));

    let messages_match = restored.messages().to_lines() == engine.messages().to_lines();
    results.push(check(
        "message_log_restored",
        messages_match,
        format!("{} lines", engine.messages().len()),
    ));

    if verbose {
        println!("  save sizes: {} bincode, {} json", bytes.len(), json.len());
    }
    results
}

// ── 7. Sentence ─────────────────────────────────────────────────────────

fn validate_sentence(verbose: bool) -> Vec<TestResult> {
    println!("--- Sentence ---");
    let mut results = Vec::new();

    let Ok(catalog) = Catalog::builtin() else {
        results.push(check("session_start", false, "builtin catalog failed to load"));
        return results;
    };
    let config = SimConfig {
        sentence_days: 3,
        ..SimConfig::default()
    };
    let mut engine = GameEngine::with_rng(catalog, config, "Simtest", StdRng::seed_from_u64(11));

    // Three midnights: Day 1 06:00 to Day 4 00:00.
    let mut statuses = Vec::new();
    for minutes in [18 * 60, 24 * 60, 24 * 60] {
        statuses.push(engine.perform(Action::Wait { minutes }).status);
    }
    let status = engine.status();
    results.push(check(
        "days_served_by_midnights",
        status.days_served == 3 && statuses.iter().all(|s| *s == ActionStatus::Success),
        format!("{}/{} days, {:?}", status.days_served, status.sentence_days, statuses),
    ));
    results.push(check(
        "released_when_served",
        status.ending == Some(Ending::Released(Release::Served)),
        format!("{:?} with health {}", status.ending, status.health),
    ));

    let clock = engine.clock();
    let after = engine.perform(Action::Wait { minutes: 10 });
    results.push(check(
        "actions_rejected_after_release",
        after.status == ActionStatus::Rejected && engine.clock() == clock,
        after.message,
    ));

    let events = engine
        .messages()
        .iter()
        .filter(|m| {
            engine
                .catalog()
                .random_events
                .values()
                .any(|e| m.contains(e.name.as_str()))
        })
        .count();
    if verbose {
        println!("  {} random event(s) over {} days", events, status.days_served);
    }
    results
}
