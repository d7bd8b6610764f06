//! Command history persistence: UTF-8 text, one entry per line, oldest first.

use std::fs;
use std::io;
use std::path::Path;

use cmdex_core::{CommandHistory, EditorConfig};

/// Read saved history entries. A missing file is an empty history.
pub fn read_history_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("No history file at {}", path.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            log::warn!("Failed to read history file {}: {e}", path.display());
            return Err(e);
        }
    };

    let entries: Vec<String> = content
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    log::debug!("Read {} history entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Write the most recent `max_entries` of `entries`, replacing the file.
pub fn write_history_file<P: AsRef<Path>>(
    path: P,
    entries: &[String],
    max_entries: usize,
) -> io::Result<()> {
    let skip = entries.len().saturating_sub(max_entries);
    let mut content = String::new();
    for entry in &entries[skip..] {
        // Entries never span lines in the file.
        if entry.contains(['\r', '\n']) {
            continue;
        }
        content.push_str(entry);
        content.push('\n');
    }
    fs::write(path, content)
}

/// Populate `history` from the file at `path`.
pub fn load_history<P: AsRef<Path>>(history: &mut CommandHistory, path: P) -> io::Result<()> {
    history.populate(read_history_file(path)?);
    Ok(())
}

/// Save the most recent `max_entries` of `history` to `path`.
pub fn save_history<P: AsRef<Path>>(
    history: &CommandHistory,
    path: P,
    max_entries: usize,
) -> io::Result<()> {
    write_history_file(path, &history.snapshot_for_persistence(), max_entries)
}

/// Save `history` to `path`, keeping as many entries as
/// `config.max_history_entries` allows.
pub fn save_history_with_config<P: AsRef<Path>>(
    history: &CommandHistory,
    path: P,
    config: &EditorConfig,
) -> io::Result<()> {
    save_history(history, path, config.max_history_entries)
}
