//! Tunable simulation parameters.
//!
//! Every field has a default, so a JSON file only needs the values it
//! changes. [`validate_config`] reports problems as readable strings.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use yatala_logic::clock::HOURS_PER_DAY;
use yatala_logic::needs::NeedRates;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the engine's generator. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub start_hour: u8,
    /// Kilograms.
    pub carry_capacity: f32,
    pub needs: NeedRates,
    pub travel_minutes: u32,
    /// Crafting energy cost is `required_minutes / craft_energy_divisor`.
    pub craft_energy_divisor: u32,
    /// Faction reputation needed to use faction-gated content or join.
    pub faction_access_threshold: i32,
    /// NPCs trusting the player at least this much count as workers.
    pub ally_trust_threshold: i32,
    pub work_wage_per_hour: u64,
    pub work_energy_per_hour: i32,
    pub manufacture_energy_cost: i32,
    pub book_read_minutes: u32,
    pub starting_clean_money: u64,
    pub starting_durries: u32,
    /// Days until release.
    pub sentence_days: u32,
    pub message_log_limit: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            start_hour: 6,
            carry_capacity: 50.0,
            needs: NeedRates::default(),
            travel_minutes: 10,
            craft_energy_divisor: 10,
            faction_access_threshold: 20,
            ally_trust_threshold: 60,
            work_wage_per_hour: 5,
            work_energy_per_hour: 10,
            manufacture_energy_cost: 30,
            book_read_minutes: 60,
            starting_clean_money: 50,
            starting_durries: 20,
            sentence_days: 365,
            message_log_limit: 100,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        let problems = validate_config(&config);
        if !problems.is_empty() {
            return Err(ConfigError::Invalid(problems));
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Check a config for values the engine can't run with.
/// Returns an empty list when the config is usable.
pub fn validate_config(config: &SimConfig) -> Vec<String> {
    let mut errors = Vec::new();
    let day = HOURS_PER_DAY as u8;

    if config.start_hour >= day {
        errors.push(format!("start_hour {} must be 0-23", config.start_hour));
    }
    if !(config.carry_capacity.is_finite() && config.carry_capacity > 0.0) {
        errors.push(format!(
            "carry_capacity {} must be a positive number",
            config.carry_capacity
        ));
    }
    if config.craft_energy_divisor == 0 {
        errors.push("craft_energy_divisor must be at least 1".to_string());
    }
    if !(-100..=100).contains(&config.faction_access_threshold) {
        errors.push(format!(
            "faction_access_threshold {} must be -100..100",
            config.faction_access_threshold
        ));
    }
    if !(0..=100).contains(&config.ally_trust_threshold) {
        errors.push(format!(
            "ally_trust_threshold {} must be 0..100",
            config.ally_trust_threshold
        ));
    }
    if config.work_energy_per_hour < 0 || config.manufacture_energy_cost < 0 {
        errors.push("energy costs can't be negative".to_string());
    }
    if config.sentence_days == 0 {
        errors.push("sentence_days must be at least 1".to_string());
    }
    if config.message_log_limit == 0 {
        errors.push("message_log_limit must be at least 1".to_string());
    }

    let rates = &config.needs;
    if rates.rest_window.start >= day || rates.rest_window.end >= day {
        errors.push(format!(
            "rest_window {}-{} must use hours 0-23",
            rates.rest_window.start, rates.rest_window.end
        ));
    }
    if rates.hunger_per_hour < 0
        || rates.hygiene_per_hour < 0
        || rates.fatigue_per_hour < 0
        || rates.rest_energy_per_hour < 0
        || rates.starvation_damage_per_hour < 0
    {
        errors.push("need rates can't be negative".to_string());
    }

    errors
}
