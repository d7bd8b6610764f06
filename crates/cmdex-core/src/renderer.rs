//! Painting the edit buffer onto a fixed-width console grid.
//!
//! The buffer is laid out linearly from the start cell captured when editing
//! began, wrapping at the console width, with one extra cell reserved so a
//! cursor sitting past the last character always has somewhere to go. Rows
//! that a previous, longer paint touched are blanked, and if the content
//! reaches past the bottom of the console it is scrolled up first and every
//! remembered row shifts with it.

use crate::console::Console;
use crate::error::ConsoleResult;

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Screen-side state of the line being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Renderer {
    start_x: usize,
    /// Negative once the first rows have scrolled off the top
    start_y: isize,
    /// Lowest row written by the previous paint
    max_row_painted: isize,
}

impl Renderer {
    /// A renderer anchored at the origin; call [`begin`](Self::begin) before
    /// painting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor painting at the console's current cursor location.
    pub fn begin(&mut self, console: &dyn Console) -> ConsoleResult<()> {
        let (x, y) = console.cursor_position()?;
        self.start_x = usize::from(x);
        self.start_y = y as isize;
        self.max_row_painted = self.start_y;
        log::trace!("Renderer anchored at ({x}, {y})");
        Ok(())
    }

    /// `(column, row)` where the line starts.
    pub fn start(&self) -> (usize, isize) {
        (self.start_x, self.start_y)
    }

    /// Paint `text` and place the console cursor at rune offset `cursor`.
    pub fn redraw(&mut self, console: &mut dyn Console, text: &str, cursor: usize) -> ConsoleResult<()> {
        let width = usize::from(console.width()?).max(1);
        let height = console.height()? as isize;
        let chars: Vec<char> = text.chars().collect();

        // The console may have narrowed since `begin`.
        if self.start_x >= width {
            self.start_y += (self.start_x / width) as isize;
            self.start_x %= width;
            log::trace!("Start cell folded to ({}, {})", self.start_x, self.start_y);
        }

        let total = self.start_x + chars.len() + 1;
        let rows = total.div_ceil(width) as isize;
        let last_row = self.start_y + rows - 1;
        if last_row >= height {
            let scrolled = console.set_cursor_position(0, to_u16(last_row as usize))? as isize;
            self.start_y -= scrolled;
            self.max_row_painted -= scrolled;
            log::trace!("Scrolled console by {scrolled} rows");
        }

        for r in 0..rows {
            let row = self.start_y + r;
            if row < 0 {
                continue;
            }
            let x = if r == 0 { self.start_x } else { 0 };
            let linear_begin = r as usize * width + x;
            let linear_end = ((r as usize + 1) * width).min(self.start_x + chars.len());
            let from = linear_begin.saturating_sub(self.start_x);
            let to = linear_end.saturating_sub(self.start_x);
            let segment: String = chars
                .get(from..to)
                .unwrap_or_default()
                .iter()
                .collect();
            let painted = segment.chars().count();
            if !segment.is_empty() {
                console.draw_text(&segment, to_u16(x), row as u16)?;
            }
            let rest = width.saturating_sub(x + painted);
            if rest > 0 {
                console.fill_char(' ', to_u16(rest), to_u16(x + painted), row as u16)?;
            }
        }

        let new_max = self.start_y + rows - 1;
        for row in (new_max + 1)..=self.max_row_painted {
            if row >= 0 {
                console.fill_char(' ', to_u16(width), 0, row as u16)?;
            }
        }
        self.max_row_painted = new_max;

        let (cx, cy) = self.cell_for(cursor.min(chars.len()), width);
        console.set_cursor_position(cx, cy)?;
        log::trace!("Painted {} runes over {rows} rows, cursor at ({cx}, {cy})", chars.len());
        Ok(())
    }

    /// Move the cursor to column 0 of the row after a line of `len` runes, so
    /// whatever the host prints next starts on a fresh row.
    pub fn finish(&mut self, console: &mut dyn Console, len: usize) -> ConsoleResult<()> {
        let width = usize::from(console.width()?).max(1);
        let end_row = self.start_y + ((self.start_x + len) / width) as isize;
        let next_row = (end_row + 1).max(0) as usize;
        let scrolled = console.set_cursor_position(0, to_u16(next_row))? as isize;
        self.start_y -= scrolled;
        self.max_row_painted -= scrolled;
        Ok(())
    }

    fn cell_for(&self, offset: usize, width: usize) -> (u16, u16) {
        let linear = self.start_x + offset;
        let row = self.start_y + (linear / width) as isize;
        (to_u16(linear % width), row.max(0) as u16)
    }
}
