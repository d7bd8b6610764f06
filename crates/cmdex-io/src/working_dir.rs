//! The real process working directory.

use std::path::{Path, PathBuf};

use cmdex_core::WorkingDirectory;

/// [`WorkingDirectory`] backed by `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessWorkingDirectory;

impl WorkingDirectory for ProcessWorkingDirectory {
    fn current_dir(&self) -> PathBuf {
        std::env::current_dir().unwrap_or_else(|e| {
            log::warn!("Failed to query current directory: {e}");
            PathBuf::new()
        })
    }

    fn set_current_dir(&mut self, path: &Path) -> bool {
        match std::env::set_current_dir(path) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to change directory to {}: {e}", path.display());
                false
            }
        }
    }
}
