//! cmdEx Core Library
//!
//! A line-editing engine for command shells that have no editing of their
//! own. The host feeds key events to a [`LineEditor`], which keeps the edit
//! buffer, paints it through a [`Console`], and tells the host when a command
//! line (or a command it synthesized, such as `cd..`) is ready to run.
//!
//! Alongside plain editing the engine provides cmd.exe-aware word splitting,
//! cycling tab completion backed by pluggable [`Completer`]s, prefix-searched
//! command history and a back/forward jump list of working directories.
//!
//! ```
//! use cmdex_core::prelude::*;
//!
//! let words = tokenize(r#"cd "C:\Program Files" "#);
//! assert_eq!(words[1].deescaped_text, r"C:\Program Files");
//! ```

// Text and words
pub mod buffer;
pub mod unicode;
pub mod words;

// Histories
pub mod command_history;
pub mod directory_history;

// Completion
pub mod completers;
pub mod completion;

// Keys and configuration
pub mod config;
pub mod key;
pub mod key_handler;

// Console I/O abstraction and painting
pub mod console;
pub mod renderer;

pub mod error;
pub mod line_editor;
pub mod prelude;

// Re-export commonly used types for convenience
pub use buffer::EditBuffer;
pub use command_history::{CommandHistory, Direction};
pub use completers::{
    BuiltinCommandCompleter, EnvironmentVariableCompleter, GitCheckoutOptionCompleter,
    GitCommandNameCompleter, PrefixListCompleter,
};
pub use completion::{Completer, CompleterInput, CompletionResult, CompletionSession, Completions};
pub use config::{EditAction, EditorConfig, KeyBinding, KeyChord};
pub use console::Console;
pub use directory_history::{DirectoryHistory, WorkingDirectory};
pub use error::{ConsoleError, ConsoleResult, EditorError, EditorResult, InvalidConfig};
pub use key::{Key, KeyEvent};
pub use key_handler::KeyHandler;
pub use line_editor::{Action, EditContext, EditorState, LineEditor};
pub use renderer::Renderer;
pub use unicode::{byte_index_from_rune_index, rune_count, rune_slice};
pub use words::{
    command_containing, quote_for_reinsertion, split_on_command_separators, tokenize, word_index_at,
    Word,
};
