//! The prison sentence and the two ways out of it.
//!
//! Days are served as the clock crosses midnight. A full term ends in
//! release; a completed parole case ends it early once half the term is
//! behind the player.
//!
//! ```
//! use yatala_logic::sentence::{Release, Sentence};
//!
//! let mut s = Sentence::new(10);
//! s.serve(5);
//! assert_eq!(s.release(100), Some(Release::Paroled));
//! assert_eq!(s.release(99), None);
//! s.serve(7);
//! assert_eq!(s.days_remaining(), 0);
//! assert_eq!(s.release(0), Some(Release::Served));
//! ```

use serde::{Deserialize, Serialize};

/// Parole progress that completes a case.
pub const PAROLE_COMPLETE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    length_days: u32,
    days_served: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Release {
    Served,
    Paroled,
}

impl Release {
    pub fn label(self) -> &'static str {
        match self {
            Release::Served => "sentence served",
            Release::Paroled => "released on parole",
        }
    }
}

impl Sentence {
    /// A term of at least one day.
    pub fn new(length_days: u32) -> Self {
        Self {
            length_days: length_days.max(1),
            days_served: 0,
        }
    }

    pub fn length_days(&self) -> u32 {
        self.length_days
    }

    pub fn days_served(&self) -> u32 {
        self.days_served
    }

    pub fn days_remaining(&self) -> u32 {
        self.length_days.saturating_sub(self.days_served)
    }

    pub fn serve(&mut self, days: u32) {
        self.days_served = self.days_served.saturating_add(days);
    }

    pub fn is_served(&self) -> bool {
        self.days_served >= self.length_days
    }

    /// Half the term served with a completed parole case.
    pub fn parole_eligible(&self, parole_progress: i32) -> bool {
        parole_progress >= PAROLE_COMPLETE
            && u64::from(self.days_served) * 2 >= u64::from(self.length_days)
    }

    /// How the player walks out, if they do.
    pub fn release(&self, parole_progress: i32) -> Option<Release> {
        if self.is_served() {
            Some(Release::Served)
        } else if self.parole_eligible(parole_progress) {
            Some(Release::Paroled)
        } else {
            None
        }
    }

    pub fn normalize(&mut self) {
        self.length_days = self.length_days.max(1);
    }
}

impl Default for Sentence {
    /// One calendar year.
    fn default() -> Self {
        Self::new(365)
    }
}
