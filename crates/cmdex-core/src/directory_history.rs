//! Directory history: a jump list of visited working directories.
//!
//! Directories are committed to the list when the user leaves them, either by
//! running a command that changes directory (noticed on the next
//! [`DirectoryHistory::on_resume_editing`]) or by navigating the list itself.
//! A revisited directory moves to the end rather than appearing twice.

use std::path::{Path, PathBuf};

use crate::command_history::Direction;

/// Access to the host's current working directory.
///
/// Owned by the host; the history only borrows it for the duration of a call.
pub trait WorkingDirectory {
    fn current_dir(&self) -> PathBuf;

    /// Change directory. Returns `false` if the host refused.
    fn set_current_dir(&mut self, path: &Path) -> bool;
}

/// Back/forward list of directories the user has left.
///
/// The current directory is held in `last_known` and only joins the list once
/// the user moves away from it.
#[derive(Debug, Clone, Default)]
pub struct DirectoryHistory {
    dirs: Vec<PathBuf>,
    position: usize,
    last_known: PathBuf,
}

impl DirectoryHistory {
    /// Start a history rooted at the host's current directory.
    pub fn new(working_dir: &dyn WorkingDirectory) -> Self {
        Self::starting_at(working_dir.current_dir())
    }

    /// Start a history whose current directory is `dir`, for hosts that do
    /// not have a [`WorkingDirectory`] yet.
    pub fn starting_at(dir: impl Into<PathBuf>) -> Self {
        Self {
            dirs: Vec::new(),
            position: 0,
            last_known: dir.into(),
        }
    }

    /// Committed directories, least recently left first. The current
    /// directory is not included until it is left.
    ///
    /// ```
    /// use cmdex_core::directory_history::DirectoryHistory;
    ///
    /// let history = DirectoryHistory::starting_at("C:\\");
    /// assert!(history.dirs().is_empty());
    /// assert_eq!(history.last_known(), std::path::Path::new("C:\\"));
    /// ```
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Navigation cursor into [`dirs`](Self::dirs).
    pub fn position(&self) -> usize {
        self.position
    }

    /// The directory observed when editing last resumed.
    pub fn last_known(&self) -> &Path {
        &self.last_known
    }

    /// Reconcile with a directory change made outside the history, such as
    /// the shell running `cd`.
    pub fn on_resume_editing(&mut self, working_dir: &dyn WorkingDirectory) {
        let current = working_dir.current_dir();
        if current != self.last_known {
            self.commit();
            self.last_known = current;
        }
    }

    /// Move through the list, clamped at both ends, and change to the target
    /// directory. Returns whether the position moved and the host accepted
    /// the change.
    pub fn navigate(&mut self, direction: Direction, working_dir: &mut dyn WorkingDirectory) -> bool {
        if self.position + 1 >= self.dirs.len() {
            self.commit();
        }

        let original = self.position;
        let last = self.dirs.len().saturating_sub(1) as isize;
        let target = (self.position as isize + direction.step()).clamp(0, last) as usize;
        if target == original {
            return false;
        }

        let dir = self.dirs[target].clone();
        if !working_dir.set_current_dir(&dir) {
            log::warn!("Could not change directory to {}", dir.display());
            return false;
        }
        log::debug!("Directory history moved to {} ({target})", dir.display());
        self.position = target;
        self.last_known = dir;
        true
    }

    /// Move `last_known` to the end of the list and point at it.
    fn commit(&mut self) {
        if let Some(existing) = self.dirs.iter().position(|d| *d == self.last_known) {
            self.dirs.remove(existing);
        }
        self.dirs.push(self.last_known.clone());
        self.position = self.dirs.len() - 1;
        log::debug!("Committed {} to directory history", self.last_known.display());
    }
}
