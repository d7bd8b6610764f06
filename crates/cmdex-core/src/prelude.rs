//! Convenient re-exports for common usage patterns
//!
//! Hosts that embed the editor can bring everything they need into scope with
//! a single `use cmdex_core::prelude::*;`.
//!
//! # Examples
//!
//! ```
//! use cmdex_core::prelude::*;
//!
//! let mut history = CommandHistory::new();
//! history.add("git status");
//! assert_eq!(history.move_in_history(Direction::Backward, "git"), Some("git status"));
//! ```

// Editor entry points
pub use crate::line_editor::{Action, EditContext, EditorState, LineEditor};
pub use crate::config::{EditAction, EditorConfig, KeyBinding, KeyChord};
pub use crate::key::{Key, KeyEvent};

// Collaborators the host owns
pub use crate::command_history::{CommandHistory, Direction};
pub use crate::console::Console;
pub use crate::directory_history::{DirectoryHistory, WorkingDirectory};

// Completion system
pub use crate::completers::{
    BuiltinCommandCompleter, EnvironmentVariableCompleter, GitCheckoutOptionCompleter,
    GitCommandNameCompleter, PrefixListCompleter,
};
pub use crate::completion::{Completer, CompleterInput, CompletionResult};

// Words
pub use crate::words::{quote_for_reinsertion, tokenize, Word};

// Error handling
pub use crate::error::{ConsoleError, ConsoleResult, EditorError, EditorResult};
