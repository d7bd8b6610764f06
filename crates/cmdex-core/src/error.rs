//! Error types for the editing engine.
//!
//! The editing algorithms themselves are total; the only fallible edge is the
//! console collaborator, whose failures are surfaced to the host unchanged.

use thiserror::Error;

/// Failures reported by a [`Console`](crate::console::Console) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// Platform-specific I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Feature not available on this console
    #[error("Feature '{feature}' not supported by this console")]
    Unsupported { feature: String },

    /// Coordinates outside the console grid
    #[error("Position ({x}, {y}) is outside the console")]
    OutOfBounds { x: u16, y: u16 },
}

/// Result type for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Errors returned from [`LineEditor`](crate::line_editor::LineEditor) entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("Console error: {0}")]
    Console(#[from] ConsoleError),
}

/// Result type for line editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// A configuration value the editor cannot work with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for '{field}': {reason}")]
pub struct InvalidConfig {
    pub field: &'static str,
    pub reason: String,
}

impl InvalidConfig {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}
