//! Save/Load functionality for persisting game state
//!
//! A save holds the clock, the player, the world's loose items and the
//! message log. Catalog content is never saved; a save must be loaded
//! against the catalog it was made with. Saves are written with bincode,
//! or as a JSON document for tooling.

use std::io::{Read, Write};

use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use yatala_logic::clock::GameTime;

use crate::components::{Player, World};
use crate::engine::GameEngine;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 2;

/// Serializable snapshot of a game in progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub clock: GameTime,
    pub player: Player,
    pub world: World,
    pub messages: Vec<String>,
}

impl SaveData {
    pub fn capture<R: Rng>(engine: &GameEngine<R>) -> Self {
        Self {
            version: SAVE_VERSION,
            clock: engine.clock(),
            player: engine.player().clone(),
            world: engine.world().clone(),
            messages: engine.messages().to_lines(),
        }
    }

    /// Reject other format versions and pull the player's bounded values
    /// back into range, since a save file may have been edited by hand.
    fn validated(mut self) -> Result<Self, SaveError> {
        if self.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        let before = self.player.clone();
        self.player.normalize();
        if self.player != before {
            warn!("save for {} held out-of-range values; clamped", self.player.name);
        }
        Ok(self)
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

pub fn save_game<W: Write>(writer: W, data: &SaveData) -> Result<(), SaveError> {
    bincode::serialize_into(writer, data)?;
    Ok(())
}

pub fn load_game<R: Read>(reader: R) -> Result<SaveData, SaveError> {
    let data: SaveData = bincode::deserialize_from(reader)?;
    data.validated()
}

pub fn save_game_json<W: Write>(writer: W, data: &SaveData) -> Result<(), SaveError> {
    serde_json::to_writer_pretty(writer, data)?;
    Ok(())
}

pub fn load_game_json<R: Read>(reader: R) -> Result<SaveData, SaveError> {
    let data: SaveData = serde_json::from_reader(reader)?;
    data.validated()
}

impl<G: Rng> GameEngine<G> {
    /// Save the game to a writer
    pub fn save<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        save_game(writer, &SaveData::capture(self))
    }

    /// Load a game from a reader, replacing the current state
    pub fn load<R: Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let data = load_game(reader)?;
        self.replace_state(data.clock, data.player, data.world, data.messages);
        Ok(())
    }

    pub fn save_json<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        save_game_json(writer, &SaveData::capture(self))
    }

    pub fn load_json<R: Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let data = load_game_json(reader)?;
        self.replace_state(data.clock, data.player, data.world, data.messages);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::SimConfig;
    use rand::rngs::mock::StepRng;

    fn engine() -> GameEngine<StepRng> {
        let catalog = Catalog::builtin().unwrap();
        GameEngine::with_rng(catalog, SimConfig::default(), "Mate", StepRng::new(0, 0))
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut engine = engine();
        engine.wait(150).unwrap();
        engine.player_mut().earn_dirty(75);

        let mut buffer = Vec::new();
        engine.save(&mut buffer).expect("Save failed");

        let mut loaded = self::engine();
        loaded.load(&buffer[..]).expect("Load failed");
        assert_eq!(loaded.clock(), engine.clock());
        assert_eq!(loaded.player(), engine.player());
        assert_eq!(loaded.world(), engine.world());
        assert_eq!(loaded.messages().to_lines(), engine.messages().to_lines());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut engine = engine();
        engine.wait(30).unwrap();
        let mut buffer = Vec::new();
        engine.save_json(&mut buffer).unwrap();
        let data = load_game_json(&buffer[..]).unwrap();
        assert_eq!(data, SaveData::capture(&engine));
    }

    #[test]
    fn test_edited_json_save_is_clamped_on_load() {
        let engine = engine();
        let mut buffer = Vec::new();
        engine.save_json(&mut buffer).unwrap();
        let mut json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        json["player"]["vitals"]["hunger"] = 500.into();
        json["player"]["wellness"]["hope"] = (-20).into();
        let edited = serde_json::to_vec(&json).unwrap();

        let mut loaded = self::engine();
        loaded.load_json(&edited[..]).unwrap();
        assert_eq!(loaded.player().vitals.hunger(), 100);
        assert_eq!(loaded.player().wellness.hope(), 0);
    }

    #[test]
    fn test_version_mismatch() {
        let engine = engine();
        let mut data = SaveData::capture(&engine);
        data.version = SAVE_VERSION + 1;
        let mut buffer = Vec::new();
        save_game(&mut buffer, &data).unwrap();
        assert!(matches!(
            load_game(&buffer[..]),
            Err(SaveError::VersionMismatch { expected: 2, found: 3 })
        ));
    }
}
