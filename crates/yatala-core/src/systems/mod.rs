//! Systems - rules that validate an action and mutate the player
//!
//! Each system checks every precondition before touching state, so a
//! rejected action commits nothing. Systems never move the clock; they
//! report how many minutes the action took and the engine advances time.

use rand::Rng;
use serde::{Deserialize, Serialize};

mod crafting;
mod economy;
mod events;
mod laundering;
mod manufacturing;
mod medical;
mod quests;
mod random_events;
mod rehab;
mod social;
mod time;

pub use crafting::*;
pub use economy::*;
pub use events::*;
pub use laundering::*;
pub use manufacturing::*;
pub use medical::*;
pub use quests::*;
pub use random_events::*;
pub use rehab::*;
pub use social::*;
pub use time::*;

/// How a probabilistic step came out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Succeeded,
    Failed,
}

impl Resolution {
    pub fn succeeded(self) -> bool {
        self == Resolution::Succeeded
    }
}

/// Uniform draw in [0, 1) compared strictly below `chance`.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    rng.gen::<f64>() < chance
}

pub fn resolve<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> Resolution {
    if roll(rng, chance) {
        Resolution::Succeeded
    } else {
        Resolution::Failed
    }
}

/// Index into a list of `len` entries from a uniform draw.
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let draw: f64 = rng.gen();
    ((draw * len as f64) as usize).min(len - 1)
}
