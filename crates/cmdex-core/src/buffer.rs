//! Edit buffer: the line being edited plus its cursor.
//!
//! All positions are rune offsets. Every mutation keeps the invariant
//! `0 <= cursor_position <= rune_count(text)`; out-of-range requests are
//! clamped rather than rejected.

use crate::unicode;

/// A mutable command line and cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    /// Cursor position as rune index
    cursor_position: usize,
}

impl EditBuffer {
    /// Create a new empty buffer.
    ///
    /// ```
    /// use cmdex_core::buffer::EditBuffer;
    ///
    /// let buffer = EditBuffer::new();
    /// assert_eq!(buffer.text(), "");
    /// assert_eq!(buffer.cursor_position(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// The whole line.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor as a rune offset, in `[0, len]`.
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Length in runes.
    pub fn len(&self) -> usize {
        unicode::rune_count(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text in `[0, cursor)`.
    pub fn text_before_cursor(&self) -> &str {
        unicode::rune_slice(&self.text, 0, self.cursor_position)
    }

    /// Replace the text, placing the cursor at its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor_position = self.len();
    }

    /// Move the cursor, clamped to the buffer.
    pub fn set_cursor_position(&mut self, position: usize) {
        self.cursor_position = position.min(self.len());
    }

    /// Empty the buffer and reset the cursor.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_position = 0;
    }

    /// Hand the text out, leaving the buffer empty with the cursor at 0.
    pub fn take(&mut self) -> String {
        self.cursor_position = 0;
        std::mem::take(&mut self.text)
    }

    /// Insert `text` at the cursor and move the cursor past it.
    ///
    /// ```
    /// use cmdex_core::buffer::EditBuffer;
    ///
    /// let mut buffer = EditBuffer::new();
    /// buffer.set_text("cd ");
    /// buffer.insert_text("src");
    /// assert_eq!(buffer.text(), "cd src");
    /// assert_eq!(buffer.cursor_position(), 6);
    /// ```
    pub fn insert_text(&mut self, text: &str) {
        let at = self.cursor_position;
        unicode::replace_rune_range(&mut self.text, at, at, text);
        self.cursor_position = at + unicode::rune_count(text);
    }

    /// Replace runes `[start, end)` with `replacement`, leaving the cursor at
    /// the end of the inserted text.
    pub fn replace_range(&mut self, start: usize, end: usize, replacement: &str) {
        let len = self.len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        unicode::replace_rune_range(&mut self.text, start, end, replacement);
        self.cursor_position = start + unicode::rune_count(replacement);
    }

    /// Delete up to `count` runes before the cursor. Returns the deleted text;
    /// at the start of the buffer this is a no-op.
    pub fn delete_before_cursor(&mut self, count: usize) -> String {
        let delete_start = self.cursor_position.saturating_sub(count);
        self.delete_range(delete_start, self.cursor_position)
    }

    /// Delete up to `count` runes at and after the cursor. Returns the deleted
    /// text; at the end of the buffer this is a no-op.
    pub fn delete(&mut self, count: usize) -> String {
        let end = self.cursor_position.saturating_add(count).min(self.len());
        self.delete_range(self.cursor_position, end)
    }

    /// Erase `[0, cursor)`.
    pub fn kill_to_start(&mut self) -> String {
        self.delete_range(0, self.cursor_position)
    }

    /// Erase `[cursor, len)`.
    pub fn kill_to_end(&mut self) -> String {
        self.delete_range(self.cursor_position, self.len())
    }

    /// Erase from the previous word boundary up to the cursor.
    pub fn kill_word_backward(&mut self, delimiters: &str) -> String {
        let start = self.previous_word_boundary(delimiters);
        self.delete_range(start, self.cursor_position)
    }

    /// Erase from the cursor up to the next word boundary.
    pub fn kill_word_forward(&mut self, delimiters: &str) -> String {
        let end = self.next_word_boundary(delimiters);
        self.delete_range(self.cursor_position, end)
    }

    /// Move left by `count` runes, stopping at the start.
    pub fn cursor_left(&mut self, count: usize) {
        self.cursor_position = self.cursor_position.saturating_sub(count);
    }

    /// Move right by `count` runes, stopping at the end.
    pub fn cursor_right(&mut self, count: usize) {
        self.cursor_position = self.cursor_position.saturating_add(count).min(self.len());
    }

    /// Jump to [`previous_word_boundary`](Self::previous_word_boundary).
    pub fn cursor_word_left(&mut self, delimiters: &str) {
        self.cursor_position = self.previous_word_boundary(delimiters);
    }

    /// Jump to [`next_word_boundary`](Self::next_word_boundary).
    ///
    /// ```
    /// use cmdex_core::buffer::EditBuffer;
    ///
    /// let mut buffer = EditBuffer::new();
    /// buffer.set_text("git  log -n 5");
    /// buffer.set_cursor_position(0);
    /// buffer.cursor_word_right(" ");
    /// assert_eq!(buffer.cursor_position(), 5);
    /// ```
    pub fn cursor_word_right(&mut self, delimiters: &str) {
        self.cursor_position = self.next_word_boundary(delimiters);
    }

    /// Start of the run of non-delimiters before the cursor, skipping any
    /// delimiters directly to the left of it first.
    ///
    /// ```
    /// use cmdex_core::buffer::EditBuffer;
    ///
    /// let mut buffer = EditBuffer::new();
    /// buffer.set_text("cd src\\cmdex");
    /// assert_eq!(buffer.previous_word_boundary(" "), 3);
    /// assert_eq!(buffer.previous_word_boundary(" \\/"), 7);
    /// ```
    pub fn previous_word_boundary(&self, delimiters: &str) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor_position.min(chars.len());
        while pos > 0 && delimiters.contains(chars[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && !delimiters.contains(chars[pos - 1]) {
            pos -= 1;
        }
        pos
    }

    /// Start of the next word: skips the rest of the current run of
    /// non-delimiters and then the delimiters after it.
    pub fn next_word_boundary(&self, delimiters: &str) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor_position.min(chars.len());
        while pos < chars.len() && !delimiters.contains(chars[pos]) {
            pos += 1;
        }
        while pos < chars.len() && delimiters.contains(chars[pos]) {
            pos += 1;
        }
        pos
    }

    fn delete_range(&mut self, start: usize, end: usize) -> String {
        if start >= end {
            return String::new();
        }
        let deleted = unicode::rune_slice(&self.text, start, end).to_string();
        unicode::replace_rune_range(&mut self.text, start, end, "");
        self.cursor_position = start;
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_at(text: &str, cursor: usize) -> EditBuffer {
        let mut buffer = EditBuffer::new();
        buffer.set_text(text);
        buffer.set_cursor_position(cursor);
        buffer
    }

    #[test]
    fn test_set_text_moves_cursor_to_end() {
        let mut buffer = EditBuffer::new();
        buffer.set_text("dir /s");
        assert_eq!(buffer.cursor_position(), 6);
        assert_eq!(buffer.len(), 6);
    }

    #[test]
    fn test_set_cursor_position_clamps() {
        let mut buffer = buffer_at("abc", 1);
        buffer.set_cursor_position(10);
        assert_eq!(buffer.cursor_position(), 3);
    }

    #[test]
    fn test_insert_text_mid_line() {
        let mut buffer = buffer_at("cd rc", 3);
        buffer.insert_text("s");
        assert_eq!(buffer.text(), "cd src");
        assert_eq!(buffer.cursor_position(), 4);
    }

    #[test]
    fn test_insert_text_unicode() {
        let mut buffer = buffer_at("cd Wrk", 4);
        buffer.insert_text("ö");
        assert_eq!(buffer.text(), "cd Wörk");
        assert_eq!(buffer.cursor_position(), 5);
    }

    #[test]
    fn test_delete_before_cursor_at_start_is_noop() {
        let mut buffer = buffer_at("abc", 0);
        assert_eq!(buffer.delete_before_cursor(1), "");
        assert_eq!(buffer.text(), "abc");
        assert_eq!(buffer.cursor_position(), 0);
    }

    #[test]
    fn test_delete_before_cursor() {
        let mut buffer = buffer_at("abc", 2);
        assert_eq!(buffer.delete_before_cursor(1), "b");
        assert_eq!(buffer.text(), "ac");
        assert_eq!(buffer.cursor_position(), 1);
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut buffer = buffer_at("abc", 3);
        assert_eq!(buffer.delete(1), "");
        assert_eq!(buffer.text(), "abc");
    }

    #[test]
    fn test_delete_forward() {
        let mut buffer = buffer_at("abc", 0);
        assert_eq!(buffer.delete(1), "a");
        assert_eq!(buffer.text(), "bc");
        assert_eq!(buffer.cursor_position(), 0);
    }

    #[test]
    fn test_kill_to_start_and_end() {
        let mut buffer = buffer_at("git status", 4);
        assert_eq!(buffer.kill_to_start(), "git ");
        assert_eq!(buffer.text(), "status");
        assert_eq!(buffer.cursor_position(), 0);

        let mut buffer = buffer_at("git status", 3);
        assert_eq!(buffer.kill_to_end(), " status");
        assert_eq!(buffer.text(), "git");
        assert_eq!(buffer.cursor_position(), 3);
    }

    #[test]
    fn test_kill_word_backward_vs_path_segment() {
        let mut buffer = buffer_at("cd src\\cmdex\\core", 17);
        assert_eq!(buffer.kill_word_backward(" \\/"), "core");
        assert_eq!(buffer.text(), "cd src\\cmdex\\");
        assert_eq!(buffer.kill_word_backward(" \\/"), "cmdex\\");
        assert_eq!(buffer.text(), "cd src\\");

        let mut buffer = buffer_at("cd src\\cmdex\\core", 17);
        assert_eq!(buffer.kill_word_backward(" "), "src\\cmdex\\core");
        assert_eq!(buffer.text(), "cd ");
    }

    #[test]
    fn test_kill_word_forward() {
        let mut buffer = buffer_at("git log --oneline", 4);
        assert_eq!(buffer.kill_word_forward(" "), "log ");
        assert_eq!(buffer.text(), "git --oneline");
        assert_eq!(buffer.cursor_position(), 4);
    }

    #[test]
    fn test_word_motion() {
        let mut buffer = buffer_at("git  log --oneline", 18);
        buffer.cursor_word_left(" ");
        assert_eq!(buffer.cursor_position(), 9);
        buffer.cursor_word_left(" ");
        assert_eq!(buffer.cursor_position(), 5);
        buffer.cursor_word_left(" ");
        assert_eq!(buffer.cursor_position(), 0);
        buffer.cursor_word_left(" ");
        assert_eq!(buffer.cursor_position(), 0);

        buffer.cursor_word_right(" ");
        assert_eq!(buffer.cursor_position(), 5);
        buffer.cursor_word_right(" ");
        assert_eq!(buffer.cursor_position(), 9);
        buffer.cursor_word_right(" ");
        assert_eq!(buffer.cursor_position(), 18);
        buffer.cursor_word_right(" ");
        assert_eq!(buffer.cursor_position(), 18);
    }

    #[test]
    fn test_cursor_moves_clamp() {
        let mut buffer = buffer_at("ab", 1);
        buffer.cursor_left(5);
        assert_eq!(buffer.cursor_position(), 0);
        buffer.cursor_right(5);
        assert_eq!(buffer.cursor_position(), 2);
    }

    #[test]
    fn test_replace_range() {
        let mut buffer = buffer_at("cd pro", 6);
        buffer.replace_range(3, 6, "\"Program Files\"");
        assert_eq!(buffer.text(), "cd \"Program Files\"");
        assert_eq!(buffer.cursor_position(), 18);
    }

    #[test]
    fn test_take_resets() {
        let mut buffer = buffer_at("exit", 2);
        assert_eq!(buffer.take(), "exit");
        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor_position(), 0);
    }

    #[test]
    fn test_invariant_holds_across_mixed_operations() {
        let mut buffer = EditBuffer::new();
        let ops: [fn(&mut EditBuffer); 8] = [
            |b| b.insert_text("ab c"),
            |b| b.cursor_left(3),
            |b| {
                b.delete(2);
            },
            |b| b.cursor_right(9),
            |b| {
                b.delete_before_cursor(7);
            },
            |b| b.insert_text("xyz/w"),
            |b| {
                b.kill_word_backward("/");
            },
            |b| b.cursor_word_left(" "),
        ];
        for round in 0..3 {
            for (i, op) in ops.iter().enumerate() {
                op(&mut buffer);
                assert!(
                    buffer.cursor_position() <= buffer.len(),
                    "round {round} op {i}: cursor {} > len {}",
                    buffer.cursor_position(),
                    buffer.len()
                );
            }
        }
    }
}
