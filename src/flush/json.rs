//! Whole-state save files.
//!
//! A save is one pretty-printed JSON document holding the `GameState`.
//! Loading refuses states that break the engine's invariants.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use crate::model::{GameState, InvariantViolation};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("malformed save: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not access save file: {0}")]
    Io(#[from] io::Error),
    #[error("save breaks an invariant: {0}")]
    Invariant(#[from] InvariantViolation),
}

pub fn to_json(state: &GameState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(state)
}

/// Parse and check a saved state.
pub fn from_json(json: &str) -> Result<GameState, LoadError> {
    let state: GameState = serde_json::from_str(json)?;
    state.check_invariants()?;
    Ok(state)
}

pub fn save_to_path(state: &GameState, path: &Path) -> Result<(), LoadError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, state)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), turn = state.turn, "game saved");
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<GameState, LoadError> {
    let reader = BufReader::new(File::open(path)?);
    let state: GameState = serde_json::from_reader(reader)?;
    state.check_invariants()?;
    tracing::debug!(path = %path.display(), turn = state.turn, "game loaded");
    Ok(state)
}
