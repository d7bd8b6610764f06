//! Command history: a chronological log of entered lines with a wrapping
//! navigation cursor and prefix search.

/// Which way a history navigation moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards older entries
    Backward,
    /// Towards newer entries
    Forward,
}

impl Direction {
    /// Signed index delta for one move.
    pub fn step(self) -> isize {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

/// Past command lines, oldest first.
///
/// Duplicates are kept. The cursor sits past the end (at `len`) between
/// navigations and is reset there whenever an entry is added.
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
    position: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the history with previously saved entries.
    pub fn populate<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries = entries.into_iter().map(Into::into).collect();
        self.position = self.entries.len();
        log::debug!("Command history populated with {} entries", self.entries.len());
    }

    /// Append `entry` and reset the cursor past the end.
    pub fn add(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
        self.position = self.entries.len();
    }

    /// Number of entries, which is also the resting cursor position.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Current navigation cursor, in `[0, len]`.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Every entry, oldest first. Callers window this before saving.
    pub fn snapshot_for_persistence(&self) -> Vec<String> {
        self.entries.clone()
    }

    /// Step through the history, wrapping at both ends.
    ///
    /// With a non-empty `prefix`, keeps stepping until an entry starting with
    /// it is found; a full cycle without a match returns `None`.
    ///
    /// ```
    /// use cmdex_core::command_history::{CommandHistory, Direction};
    ///
    /// let mut history = CommandHistory::new();
    /// history.populate(["abc", "def", "ghi"]);
    /// assert_eq!(history.move_in_history(Direction::Backward, "d"), Some("def"));
    /// assert_eq!(history.move_in_history(Direction::Backward, "py"), None);
    /// ```
    pub fn move_in_history(&mut self, direction: Direction, prefix: &str) -> Option<&str> {
        let len = self.entries.len();
        if len == 0 {
            return None;
        }

        let original = self.position % len;
        let mut pos = self.position as isize + direction.step();
        loop {
            if pos < 0 {
                pos = len as isize - 1;
            }
            if pos >= len as isize {
                pos = 0;
            }
            let index = pos as usize;
            if prefix.is_empty() || self.entries[index].starts_with(prefix) {
                self.position = index;
                break;
            }
            if index == original {
                self.position = index;
                log::debug!("No history entry starts with {prefix:?}");
                return None;
            }
            pos += direction.step();
        }
        Some(&self.entries[self.position])
    }
}
