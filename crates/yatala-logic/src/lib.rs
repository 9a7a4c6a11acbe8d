//! Pure rules for Yatala Lockdown.
//!
//! Everything here is deterministic and free of randomness, I/O and engine
//! state. Functions take plain data and return results, so the rules can
//! be unit-tested in isolation and reused by the engine, the headless
//! harness and any front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`clock`] | Game clock, day periods, hour and calendar windows |
//! | [`factions`] | Factions, the eight-tier rank ladder, political standing |
//! | [`needs`] | Vitals, wellness, mood, hourly decay, effect keys |
//! | [`progression`] | Experience curve and level-up carry-over |
//! | [`sentence`] | Term served, full-term and parole release |
//! | [`stats`] | Clamped attribute and skill blocks keyed by enum |

pub mod clock;
pub mod factions;
pub mod needs;
pub mod progression;
pub mod sentence;
pub mod stats;
