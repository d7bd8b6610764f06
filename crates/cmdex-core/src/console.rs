//! Console surface abstraction.
//!
//! The editor never talks to a terminal directly. Hosts implement [`Console`]
//! over whatever backend they paint with (a Win32 screen buffer, a VT stream,
//! an in-memory grid for tests) and lend it to the editor for each key event.

use crate::error::ConsoleResult;

/// Cell-addressed painting surface.
///
/// Coordinates are 0-based `(x, y)` = `(column, row)` in screen-buffer space.
pub trait Console {
    /// Current cursor location.
    fn cursor_position(&self) -> ConsoleResult<(u16, u16)>;

    /// Move the cursor. If `y` lies beyond the last row the console scrolls its
    /// contents up until the row is visible and returns how many rows it
    /// scrolled; callers shift any remembered row coordinates by that amount.
    fn set_cursor_position(&mut self, x: u16, y: u16) -> ConsoleResult<u16>;

    /// Width in cells.
    fn width(&self) -> ConsoleResult<u16>;

    /// Height in rows.
    fn height(&self) -> ConsoleResult<u16>;

    /// Write `text` starting at `(x, y)` without moving the cursor.
    fn draw_text(&mut self, text: &str, x: u16, y: u16) -> ConsoleResult<()>;

    /// Write `count` copies of `ch` starting at `(x, y)`.
    fn fill_char(&mut self, ch: char, count: u16, x: u16, y: u16) -> ConsoleResult<()>;

    /// Text currently on the clipboard, if any.
    fn clipboard_text(&mut self) -> ConsoleResult<Option<String>>;
}
