//! Editor configuration and key binding definitions.
//!
//! Everything here is plain data with serde support so hosts can load it from
//! a file; every field has a default and a partial file is valid.

use serde::{Deserialize, Serialize};

use crate::error::InvalidConfig;
use crate::key::{Key, KeyEvent};

/// Things a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditAction {
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    WordLeft,
    WordRight,
    DeleteBackward,
    DeleteForward,
    /// Erase back to the previous word delimiter
    KillWordBackward,
    /// Erase back to the previous path delimiter
    KillPathSegmentBackward,
    KillWordForward,
    KillToStart,
    KillToEnd,
    /// Enter
    Commit,
    /// Escape
    ClearLine,
    HistoryPrevious,
    HistoryNext,
    /// Previous entry starting with the text before the cursor
    HistorySearchBackward,
    /// Next entry starting with the text before the cursor
    HistorySearchForward,
    DirectoryBack,
    DirectoryForward,
    /// Synthesize the parent-directory command
    ParentDirectory,
    CompleteNext,
    CompletePrevious,
    Paste,
    /// Synthesize the exit command on an empty line, delete forward otherwise
    ExitOrDeleteForward,
}

/// A key plus the modifiers that must be held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: Key,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyChord {
    /// `key` with no modifiers.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
            shift: false,
        }
    }

    /// `key` with Ctrl held.
    ///
    /// Letters are named by their upper-case [`Key::Char`], matching what
    /// hosts report for Ctrl combinations.
    ///
    /// ```
    /// use cmdex_core::{Key, KeyChord, KeyEvent};
    ///
    /// let event = KeyEvent::character('w').with_ctrl();
    /// assert_eq!(KeyChord::from_event(&event), KeyChord::ctrl(Key::Char('W')));
    /// ```
    pub fn ctrl(key: Key) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    /// `key` with Alt held.
    pub fn alt(key: Key) -> Self {
        Self {
            alt: true,
            ..Self::plain(key)
        }
    }

    /// `key` with Shift held.
    pub fn shift(key: Key) -> Self {
        Self {
            shift: true,
            ..Self::plain(key)
        }
    }

    /// The chord a host key event was pressed with.
    pub fn from_event(event: &KeyEvent) -> Self {
        Self {
            key: event.key,
            ctrl: event.ctrl,
            alt: event.alt,
            shift: event.shift,
        }
    }

    /// The same chord with shift released.
    pub fn without_shift(self) -> Self {
        Self {
            shift: false,
            ..self
        }
    }
}

/// A user binding that overrides the default for its chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub chord: KeyChord,
    pub action: EditAction,
}

/// Tunables for [`LineEditor`](crate::line_editor::LineEditor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Appended to committed and synthesized commands
    pub line_terminator: String,
    /// Delimiters for word motion and word kills
    pub word_delimiters: String,
    /// Delimiters for path segment kills
    pub path_delimiters: String,
    pub exit_command: String,
    pub parent_directory_command: String,
    /// Shown before a multi-line paste. `{lines}` becomes the counted noun,
    /// as in `1 line` or `3 lines`.
    pub paste_confirmation: String,
    /// How many recent entries a host keeps when saving command history
    pub max_history_entries: usize,
    pub bindings: Vec<KeyBinding>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            line_terminator: "\r\n".to_string(),
            word_delimiters: " ".to_string(),
            path_delimiters: " \\/".to_string(),
            exit_command: "exit".to_string(),
            parent_directory_command: "cd..".to_string(),
            paste_confirmation:
                "Paste {lines}? Press Ctrl-V again to confirm, any other key to cancel."
                    .to_string(),
            max_history_entries: 1000,
            bindings: Vec::new(),
        }
    }
}

impl EditorConfig {
    /// Reject settings the editor cannot work with. The error names the
    /// offending field.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.line_terminator.is_empty() {
            return Err(InvalidConfig::new("line_terminator", "must not be empty"));
        }
        if self.word_delimiters.is_empty() {
            return Err(InvalidConfig::new("word_delimiters", "must not be empty"));
        }
        if self.max_history_entries == 0 {
            return Err(InvalidConfig::new(
                "max_history_entries",
                "must be greater than 0",
            ));
        }
        Ok(())
    }

    /// The paste confirmation prompt for a paste of `lines` lines.
    ///
    /// ```
    /// use cmdex_core::EditorConfig;
    ///
    /// let config = EditorConfig {
    ///     paste_confirmation: "Run {lines}?".to_string(),
    ///     ..EditorConfig::default()
    /// };
    /// assert_eq!(config.paste_prompt(1), "Run 1 line?");
    /// assert_eq!(config.paste_prompt(4), "Run 4 lines?");
    /// ```
    pub fn paste_prompt(&self, lines: usize) -> String {
        let counted = if lines == 1 {
            "1 line".to_string()
        } else {
            format!("{lines} lines")
        };
        self.paste_confirmation.replace("{lines}", &counted)
    }

    /// `command` followed by the line terminator.
    pub fn terminated(&self, command: &str) -> String {
        format!("{command}{}", self.line_terminator)
    }
}
