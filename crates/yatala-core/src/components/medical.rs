//! Medical conditions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A condition definition. The player holds a copy once afflicted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalCondition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// 1 (minor) to 10 (severe).
    pub severity: u8,
    #[serde(default)]
    pub chronic: bool,
    /// Clean money.
    #[serde(default)]
    pub treatment_cost: u64,
    #[serde(default)]
    pub treatment_minutes: u32,
    /// Probability in [0, 1] that treatment fails to clear the condition.
    #[serde(default)]
    pub recurrence_chance: f64,
    /// Penalties to effective attributes and skills while afflicted.
    #[serde(default)]
    pub effects: BTreeMap<String, i32>,
}
