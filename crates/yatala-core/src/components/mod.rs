//! Components - pure data with the invariants that protect it

mod item;
mod medical;
mod player;
mod social;
mod world;

pub use item::*;
pub use medical::*;
pub use player::*;
pub use social::*;
pub use world::*;
