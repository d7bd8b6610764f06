//! Key binding lookup and buffer-local edit actions.
//!
//! [`KeyHandler`] maps key chords to [`EditAction`]s, with user bindings taking
//! precedence over the defaults. Actions that only touch the edit buffer are
//! carried out here; the rest (history, completion, commit) are left to the
//! line editor.

use std::collections::HashMap;

use crate::{
    buffer::EditBuffer,
    config::{EditAction, EditorConfig, KeyBinding, KeyChord},
    key::{Key, KeyEvent},
};

/// Resolves key events to editor actions.
#[derive(Debug, Clone)]
pub struct KeyHandler {
    /// Custom key bindings that override defaults
    custom_bindings: HashMap<KeyChord, EditAction>,
    default_bindings: HashMap<KeyChord, EditAction>,
}

impl KeyHandler {
    /// Create a handler with the default bindings plus `custom_bindings`.
    ///
    /// ```
    /// use cmdex_core::config::{EditAction, KeyBinding, KeyChord};
    /// use cmdex_core::key::{Key, KeyEvent};
    /// use cmdex_core::key_handler::KeyHandler;
    ///
    /// let handler = KeyHandler::new(&[KeyBinding {
    ///     chord: KeyChord::ctrl(Key::Char('P')),
    ///     action: EditAction::HistoryPrevious,
    /// }]);
    /// let event = KeyEvent::character('p').with_ctrl();
    /// assert_eq!(handler.resolve(&event), Some(EditAction::HistoryPrevious));
    /// ```
    pub fn new(custom_bindings: &[KeyBinding]) -> Self {
        let custom_map = custom_bindings
            .iter()
            .map(|binding| (binding.chord, binding.action))
            .collect();

        KeyHandler {
            custom_bindings: custom_map,
            default_bindings: Self::create_default_bindings(),
        }
    }

    fn create_default_bindings() -> HashMap<KeyChord, EditAction> {
        use EditAction::*;
        let mut bindings = HashMap::new();

        // Motion
        bindings.insert(KeyChord::plain(Key::Left), CursorLeft);
        bindings.insert(KeyChord::plain(Key::Right), CursorRight);
        bindings.insert(KeyChord::plain(Key::Home), CursorHome);
        bindings.insert(KeyChord::plain(Key::End), CursorEnd);
        bindings.insert(KeyChord::ctrl(Key::Char('A')), CursorHome);
        bindings.insert(KeyChord::ctrl(Key::Char('E')), CursorEnd);
        bindings.insert(KeyChord::ctrl(Key::Left), WordLeft);
        bindings.insert(KeyChord::ctrl(Key::Right), WordRight);

        // Deletion
        bindings.insert(KeyChord::plain(Key::Backspace), DeleteBackward);
        bindings.insert(KeyChord::plain(Key::Delete), DeleteForward);
        bindings.insert(KeyChord::ctrl(Key::Char('W')), KillWordBackward);
        bindings.insert(KeyChord::ctrl(Key::Backspace), KillPathSegmentBackward);
        bindings.insert(KeyChord::ctrl(Key::Delete), KillWordForward);
        bindings.insert(KeyChord::ctrl(Key::Home), KillToStart);
        bindings.insert(KeyChord::ctrl(Key::Char('U')), KillToStart);
        bindings.insert(KeyChord::ctrl(Key::End), KillToEnd);
        bindings.insert(KeyChord::ctrl(Key::Char('K')), KillToEnd);

        // Line
        bindings.insert(KeyChord::plain(Key::Enter), Commit);
        bindings.insert(KeyChord::plain(Key::Escape), ClearLine);
        bindings.insert(KeyChord::ctrl(Key::Char('C')), ClearLine);
        bindings.insert(KeyChord::ctrl(Key::Char('V')), Paste);
        bindings.insert(KeyChord::ctrl(Key::Char('D')), ExitOrDeleteForward);

        // History
        bindings.insert(KeyChord::plain(Key::Up), HistoryPrevious);
        bindings.insert(KeyChord::plain(Key::Down), HistoryNext);
        bindings.insert(KeyChord::plain(Key::PageUp), HistorySearchBackward);
        bindings.insert(KeyChord::plain(Key::PageDown), HistorySearchForward);
        bindings.insert(KeyChord::alt(Key::Left), DirectoryBack);
        bindings.insert(KeyChord::alt(Key::Right), DirectoryForward);
        bindings.insert(KeyChord::alt(Key::Up), ParentDirectory);

        // Completion
        bindings.insert(KeyChord::plain(Key::Tab), CompleteNext);
        bindings.insert(KeyChord::shift(Key::Tab), CompletePrevious);

        bindings
    }

    /// The action bound to `event`, if any.
    ///
    /// An exact chord match wins; failing that, a held shift is ignored so
    /// e.g. Shift-Home still moves to the start of the line.
    pub fn resolve(&self, event: &KeyEvent) -> Option<EditAction> {
        let chord = KeyChord::from_event(event);
        self.get_action(chord)
            .or_else(|| chord.shift.then(|| self.get_action(chord.without_shift())).flatten())
    }

    /// Custom binding for `chord`, falling back to the default.
    pub fn get_action(&self, chord: KeyChord) -> Option<EditAction> {
        self.custom_bindings
            .get(&chord)
            .or_else(|| self.default_bindings.get(&chord))
            .copied()
    }

    /// Whether `chord` does anything, ignoring the shift fallback.
    pub fn has_binding(&self, chord: KeyChord) -> bool {
        self.get_action(chord).is_some()
    }

    /// Bind `chord`, overriding any existing binding.
    pub fn register_binding(&mut self, chord: KeyChord, action: EditAction) {
        self.custom_bindings.insert(chord, action);
    }

    /// Drop a custom binding so the default (if any) applies again.
    pub fn remove_binding(&mut self, chord: KeyChord) -> bool {
        self.custom_bindings.remove(&chord).is_some()
    }

    /// Overrides registered on top of the defaults.
    pub fn custom_bindings(&self) -> &HashMap<KeyChord, EditAction> {
        &self.custom_bindings
    }

    /// Carry out `action` if it only concerns the buffer.
    ///
    /// Returns `false` for actions the caller has to handle itself.
    pub fn apply_edit(&self, action: EditAction, buffer: &mut EditBuffer, config: &EditorConfig) -> bool {
        match action {
            EditAction::CursorLeft => buffer.cursor_left(1),
            EditAction::CursorRight => buffer.cursor_right(1),
            EditAction::CursorHome => buffer.set_cursor_position(0),
            EditAction::CursorEnd => buffer.set_cursor_position(buffer.len()),
            EditAction::WordLeft => buffer.cursor_word_left(&config.word_delimiters),
            EditAction::WordRight => buffer.cursor_word_right(&config.word_delimiters),
            EditAction::DeleteBackward => {
                buffer.delete_before_cursor(1);
            }
            EditAction::DeleteForward => {
                buffer.delete(1);
            }
            EditAction::KillWordBackward => {
                buffer.kill_word_backward(&config.word_delimiters);
            }
            EditAction::KillPathSegmentBackward => {
                buffer.kill_word_backward(&config.path_delimiters);
            }
            EditAction::KillWordForward => {
                buffer.kill_word_forward(&config.word_delimiters);
            }
            EditAction::KillToStart => {
                buffer.kill_to_start();
            }
            EditAction::KillToEnd => {
                buffer.kill_to_end();
            }
            EditAction::ClearLine => buffer.clear(),
            _ => return false,
        }
        true
    }
}

impl Default for KeyHandler {
    fn default() -> Self {
        Self::new(&[])
    }
}
