//! Action errors and their taxonomy.
//!
//! Every rejected action is an [`ActionError`]. Rejection always means
//! nothing was committed. Probabilistic failures are not errors; they come
//! back as [`crate::systems::Resolution::Failed`].

use thiserror::Error;
use yatala_logic::factions::Faction;
use yatala_logic::stats::Skill;

/// Coarse classification used by front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    PreconditionNotMet,
    OutOfRange,
    OnCooldown,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("{item} would take you to {would_carry:.1}kg, over your {capacity:.1}kg limit")]
    Overweight {
        item: String,
        would_carry: f32,
        capacity: f32,
    },

    #[error("you don't have any {0}")]
    ItemNotFound(String),

    #[error("you need {required} {item} but only have {available}")]
    InsufficientQuantity {
        item: String,
        required: u32,
        available: u32,
    },

    #[error("{location} is closed at {hour:02}:00")]
    LocationClosed { location: String, hour: u8 },

    #[error("you can't get to {to} from {from}")]
    NotConnected { from: String, to: String },

    #[error("{0} isn't here")]
    NpcNotPresent(String),

    #[error("no {kind} called '{id}'")]
    NotFound { kind: &'static str, id: String },

    #[error("you haven't learned {0} yet")]
    NotLearned(String),

    #[error("needs {} {required} (you have {current})", .skill.key())]
    MissingSkill {
        skill: Skill,
        required: i32,
        current: i32,
    },

    #[error("needs {required} energy (you have {current})")]
    NotEnoughEnergy { required: i32, current: i32 },

    #[error("needs ${required} clean money (you have ${available})")]
    NotEnoughCleanMoney { required: u64, available: u64 },

    #[error("needs ${required} dirty money (you have ${available})")]
    NotEnoughDirtyMoney { required: u64, available: u64 },

    #[error("needs {required} durries (you have {available})")]
    NotEnoughDurries { required: u32, available: u32 },

    #[error("needs {required} underground reputation (you have {current})")]
    UndergroundReputationTooLow { required: i32, current: i32 },

    #[error("needs {required} reputation with {} (you have {current})", .faction.name())]
    FactionReputationTooLow {
        faction: Faction,
        required: i32,
        current: i32,
    },

    #[error("needs {required} workers (you can call on {available})")]
    NotEnoughWorkers { required: u32, available: u32 },

    #[error("needs education level {required} (you have {current})")]
    EducationTooLow { required: i32, current: i32 },

    #[error("finish '{0}' first")]
    MissingPrerequisite(String),

    #[error("{0} isn't on right now")]
    OutOfSeason(String),

    #[error("{name} can't happen again for {remaining_minutes} minutes")]
    OnCooldown {
        name: String,
        remaining_minutes: u64,
    },

    #[error("{event}: {detail}")]
    ConditionNotMet { event: String, detail: String },

    #[error("you need to be at a {0}")]
    WrongPlace(&'static str),

    #[error("{0} isn't trading")]
    NotATrader(String),

    #[error("{npc} doesn't have any {item}")]
    NotInStock { npc: String, item: String },

    #[error("nobody's buying {0}")]
    CannotSell(String),

    #[error("you've already read {0}")]
    AlreadyRead(String),

    #[error("you can't use {0}")]
    NotUsable(String),

    #[error("quest '{id}' is already {state}")]
    QuestClosed { id: String, state: &'static str },

    #[error("the game is over: {0}")]
    GameOver(String),

    #[error("{what} must be between {min} and {max} (got {value})")]
    OutOfRange {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl ActionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::NotFound { .. } => ErrorKind::NotFound,
            ActionError::OnCooldown { .. } => ErrorKind::OnCooldown,
            ActionError::OutOfRange { .. } => ErrorKind::OutOfRange,
            _ => ErrorKind::PreconditionNotMet,
        }
    }

    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        ActionError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
