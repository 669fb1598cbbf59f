use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::model::GameState;

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Export the game log, one `Event` per line, oldest first.
pub fn export_log_jsonl(state: &GameState, path: &Path) -> io::Result<()> {
    write_jsonl(path, state.log.iter())
}

/// Export the legislative history, one `LegislativeRecord` per line.
pub fn export_history_jsonl(state: &GameState, path: &Path) -> io::Result<()> {
    write_jsonl(path, state.history.iter())
}
