//! Yatala Core - prison-life simulation engine
//!
//! A turn-based simulation of one inmate's stretch inside: needs and
//! wellness that decay with time, relationships and faction politics, a
//! contraband economy, rehabilitation toward parole, and quests.
//!
//! # Architecture
//!
//! - **Catalog**: read-only content (items, places, people, recipes, events)
//!   loaded from JSON and referenced by id
//! - **Components**: mutable state (the player, inventory, relationships,
//!   loose items in the world)
//! - **Systems**: rule functions that validate an action and mutate
//!   components, committing nothing on rejection
//! - **Engine**: owns the clock, the player and the seeded generator, and
//!   runs actions through the systems
//!
//! # Example
//!
//! ```rust,no_run
//! use yatala_core::prelude::*;
//!
//! let catalog = Catalog::builtin().expect("bad builtin catalog");
//! let mut engine = GameEngine::new(catalog, SimConfig::default(), "Mick");
//!
//! let result = engine.perform(Action::Move { to: "b_block_hall".into() });
//! println!("{}", result.message);
//! ```

pub mod catalog;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod persistence;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::catalog::Catalog;
    pub use crate::components::*;
    pub use crate::config::SimConfig;
    pub use crate::engine::{
        Action, ActionResult, ActionStatus, Ending, GameEngine, StatusReport,
    };
    pub use crate::error::{ActionError, ErrorKind};
}
