//! Mock collaborators for testing

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use cmdex_core::{Console, ConsoleError, ConsoleResult, KeyEvent, WorkingDirectory};

/// Queue of key events standing in for a host's input loop.
#[derive(Debug, Default)]
pub struct MockKeyInput {
    input_queue: VecDeque<KeyEvent>,
}

impl MockKeyInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a key event for testing
    pub fn queue_key_event(&mut self, event: KeyEvent) {
        self.input_queue.push_back(event);
    }

    /// Queue text input as a sequence of character key events
    pub fn queue_text_input(&mut self, text: &str) {
        self.input_queue.extend(text.chars().map(KeyEvent::character));
    }

    /// Queue multiple key events at once
    pub fn queue_key_events(&mut self, events: &[KeyEvent]) {
        self.input_queue.extend(events.iter().cloned());
    }

    /// Get the number of queued events
    pub fn queued_event_count(&self) -> usize {
        self.input_queue.len()
    }

    pub fn clear_queue(&mut self) {
        self.input_queue.clear();
    }

    /// Pop the oldest queued event
    pub fn next_event(&mut self) -> Option<KeyEvent> {
        self.input_queue.pop_front()
    }
}

/// In-memory console grid.
///
/// Writes past the right edge or bottom row are clipped. Moving the cursor
/// below the last row scrolls the grid up, like a real screen buffer.
#[derive(Debug, Clone)]
pub struct MockConsole {
    width: u16,
    height: u16,
    cells: Vec<Vec<char>>,
    cursor: (u16, u16),
    scroll_count: usize,
    clipboard: Option<String>,
    fail_clipboard: bool,
}

impl Default for MockConsole {
    fn default() -> Self {
        Self::new(80, 25)
    }
}

impl MockConsole {
    /// A blank `width` x `height` grid with the cursor at the origin.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![' '; usize::from(width)]; usize::from(height)],
            cursor: (0, 0),
            scroll_count: 0,
            clipboard: None,
            fail_clipboard: false,
        }
    }

    /// Print `text` at the cursor and leave the cursor after it, the way a
    /// shell prints its prompt.
    pub fn print_prompt(&mut self, text: &str) {
        let (x, y) = self.cursor;
        for (i, ch) in text.chars().enumerate() {
            self.put(ch, usize::from(x) + i, usize::from(y));
        }
        let end = (usize::from(x) + text.chars().count()).min(usize::from(self.width) - 1);
        self.cursor = (end as u16, y);
    }

    /// Place the cursor without scrolling, as a host would before a prompt.
    pub fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = (x, y);
    }

    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    /// Total rows scrolled off the top so far
    pub fn scroll_count(&self) -> usize {
        self.scroll_count
    }

    pub fn set_clipboard(&mut self, text: impl Into<String>) {
        self.clipboard = Some(text.into());
    }

    /// Make clipboard reads fail with an I/O error.
    pub fn fail_clipboard(&mut self, fail: bool) {
        self.fail_clipboard = fail;
    }

    /// Text of `row` with trailing blanks removed.
    pub fn row(&self, row: usize) -> String {
        self.cells
            .get(row)
            .map(|cells| cells.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// All rows joined with newlines, trailing blank rows dropped.
    pub fn screen(&self) -> String {
        let mut rows: Vec<String> = (0..self.cells.len()).map(|row| self.row(row)).collect();
        while rows.last().is_some_and(String::is_empty) {
            rows.pop();
        }
        rows.join("\n")
    }

    fn put(&mut self, ch: char, x: usize, y: usize) {
        if let Some(row) = self.cells.get_mut(y) {
            if let Some(cell) = row.get_mut(x) {
                *cell = ch;
            }
        }
    }
}

impl Console for MockConsole {
    fn cursor_position(&self) -> ConsoleResult<(u16, u16)> {
        Ok(self.cursor)
    }

    fn set_cursor_position(&mut self, x: u16, y: u16) -> ConsoleResult<u16> {
        if x >= self.width {
            return Err(ConsoleError::OutOfBounds { x, y });
        }
        let mut y = y;
        let mut scrolled = 0;
        while y >= self.height {
            self.cells.remove(0);
            self.cells.push(vec![' '; usize::from(self.width)]);
            scrolled += 1;
            y -= 1;
        }
        self.scroll_count += usize::from(scrolled);
        self.cursor = (x, y);
        Ok(scrolled)
    }

    fn width(&self) -> ConsoleResult<u16> {
        Ok(self.width)
    }

    fn height(&self) -> ConsoleResult<u16> {
        Ok(self.height)
    }

    fn draw_text(&mut self, text: &str, x: u16, y: u16) -> ConsoleResult<()> {
        for (i, ch) in text.chars().enumerate() {
            self.put(ch, usize::from(x) + i, usize::from(y));
        }
        Ok(())
    }

    fn fill_char(&mut self, ch: char, count: u16, x: u16, y: u16) -> ConsoleResult<()> {
        for i in 0..usize::from(count) {
            self.put(ch, usize::from(x) + i, usize::from(y));
        }
        Ok(())
    }

    fn clipboard_text(&mut self) -> ConsoleResult<Option<String>> {
        if self.fail_clipboard {
            return Err(ConsoleError::Io("clipboard unavailable".to_string()));
        }
        Ok(self.clipboard.clone())
    }
}

/// Working directory that lives in memory.
#[derive(Debug, Clone)]
pub struct MockWorkingDirectory {
    current: PathBuf,
    refused: HashSet<PathBuf>,
    set_calls: Vec<PathBuf>,
}

impl MockWorkingDirectory {
    pub fn new(current: impl Into<PathBuf>) -> Self {
        Self {
            current: current.into(),
            refused: HashSet::new(),
            set_calls: Vec::new(),
        }
    }

    /// Simulate the shell changing directory behind the editor's back.
    pub fn change_externally(&mut self, path: impl Into<PathBuf>) {
        self.current = path.into();
    }

    /// Make changing into `path` fail, as for a deleted directory.
    pub fn refuse(&mut self, path: impl Into<PathBuf>) {
        self.refused.insert(path.into());
    }

    /// Every path passed to `set_current_dir`, accepted or not.
    pub fn set_calls(&self) -> &[PathBuf] {
        &self.set_calls
    }
}

impl WorkingDirectory for MockWorkingDirectory {
    fn current_dir(&self) -> PathBuf {
        self.current.clone()
    }

    fn set_current_dir(&mut self, path: &Path) -> bool {
        self.set_calls.push(path.to_path_buf());
        if self.refused.contains(path) {
            return false;
        }
        self.current = path.to_path_buf();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdex_core::Key;

    #[test]
    fn test_queue_text_input() {
        let mut input = MockKeyInput::new();
        input.queue_text_input("dir");
        input.queue_key_event(KeyEvent::simple(Key::Enter));
        assert_eq!(input.queued_event_count(), 4);

        assert_eq!(input.next_event().and_then(|e| e.ch), Some('d'));
        input.clear_queue();
        assert_eq!(input.next_event(), None);
    }

    #[test]
    fn test_queue_multiple_events() {
        let mut input = MockKeyInput::new();
        input.queue_key_events(&[KeyEvent::simple(Key::Tab), KeyEvent::simple(Key::Tab).with_shift()]);
        assert_eq!(input.queued_event_count(), 2);
        assert_eq!(input.next_event().map(|e| e.shift), Some(false));
        assert_eq!(input.next_event().map(|e| e.shift), Some(true));
    }

    #[test]
    fn test_console_drawing_is_clipped() {
        let mut console = MockConsole::new(5, 2);
        console.draw_text("abcdefg", 2, 0).unwrap();
        console.fill_char('-', 10, 0, 1).unwrap();
        console.draw_text("zz", 0, 7).unwrap();
        assert_eq!(console.screen(), "  abc\n-----");
    }

    #[test]
    fn test_cursor_below_bottom_scrolls() {
        let mut console = MockConsole::new(5, 2);
        console.draw_text("top", 0, 0).unwrap();
        console.draw_text("mid", 0, 1).unwrap();

        assert_eq!(console.set_cursor_position(1, 3).unwrap(), 2);
        assert_eq!(console.cursor(), (1, 1));
        assert_eq!(console.scroll_count(), 2);
        assert_eq!(console.screen(), "");

        assert_eq!(console.set_cursor_position(0, 0).unwrap(), 0);
        assert_eq!(
            console.set_cursor_position(5, 0),
            Err(ConsoleError::OutOfBounds { x: 5, y: 0 })
        );
    }

    #[test]
    fn test_print_prompt_moves_cursor() {
        let mut console = MockConsole::new(20, 3);
        console.set_cursor(0, 1);
        console.print_prompt("C:\\>");
        assert_eq!(console.cursor(), (4, 1));
        assert_eq!(console.row(1), "C:\\>");
        assert_eq!(console.row(9), "");
    }

    #[test]
    fn test_clipboard() {
        let mut console = MockConsole::default();
        assert_eq!(console.clipboard_text().unwrap(), None);
        console.set_clipboard("echo hi");
        assert_eq!(console.clipboard_text().unwrap(), Some("echo hi".to_string()));
        console.fail_clipboard(true);
        assert!(console.clipboard_text().is_err());
    }

    #[test]
    fn test_working_directory_refusal() {
        let mut cwd = MockWorkingDirectory::new("C:\\");
        cwd.refuse("C:\\gone");
        assert!(!cwd.set_current_dir(Path::new("C:\\gone")));
        assert_eq!(cwd.current_dir(), PathBuf::from("C:\\"));
        assert!(cwd.set_current_dir(Path::new("C:\\src")));
        assert_eq!(cwd.current_dir(), PathBuf::from("C:\\src"));
        assert_eq!(cwd.set_calls().len(), 2);

        cwd.change_externally("D:\\");
        assert_eq!(cwd.current_dir(), PathBuf::from("D:\\"));
    }
}
