// Shared fixture for driving a LineEditor against the in-memory console.

#![allow(dead_code)]

use cmdex_core::prelude::*;
use cmdex_io::mock::{MockConsole, MockKeyInput, MockWorkingDirectory};

pub const PROMPT: &str = "C:\\>";

/// Everything a shell host owns, plus the editor under test.
pub struct TestHost {
    pub console: MockConsole,
    pub commands: CommandHistory,
    pub dirs: DirectoryHistory,
    pub cwd: MockWorkingDirectory,
    pub editor: LineEditor,
}

impl TestHost {
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_config(width, height, EditorConfig::default())
    }

    pub fn with_config(width: u16, height: u16, config: EditorConfig) -> Self {
        let cwd = MockWorkingDirectory::new("C:\\");
        let dirs = DirectoryHistory::new(&cwd);
        Self {
            console: MockConsole::new(width, height),
            commands: CommandHistory::new(),
            dirs,
            cwd,
            editor: LineEditor::new(config),
        }
    }

    /// Print the prompt at the console cursor and start an edit session.
    pub fn prompt(&mut self) {
        self.console.print_prompt(PROMPT);
        self.init();
    }

    pub fn init(&mut self) {
        let mut ctx = EditContext {
            console: &mut self.console,
            command_history: &mut self.commands,
            directory_history: &mut self.dirs,
            working_dir: &mut self.cwd,
        };
        self.editor.init(&mut ctx).unwrap();
    }

    pub fn try_press(&mut self, event: KeyEvent) -> EditorResult<Action> {
        let mut ctx = EditContext {
            console: &mut self.console,
            command_history: &mut self.commands,
            directory_history: &mut self.dirs,
            working_dir: &mut self.cwd,
        };
        self.editor.handle_key(&mut ctx, &event)
    }

    pub fn press(&mut self, event: KeyEvent) -> Action {
        self.try_press(event).unwrap()
    }

    pub fn key(&mut self, key: Key) -> Action {
        self.press(KeyEvent::simple(key))
    }

    pub fn ctrl(&mut self, ch: char) -> Action {
        self.press(KeyEvent::character(ch).with_ctrl())
    }

    pub fn alt(&mut self, key: Key) -> Action {
        self.press(KeyEvent::simple(key).with_alt())
    }

    pub fn type_text(&mut self, text: &str) {
        let mut input = MockKeyInput::new();
        input.queue_text_input(text);
        self.run(&mut input);
    }

    /// Feed every queued event, stopping early if the editor hands control
    /// back to the host.
    pub fn run(&mut self, input: &mut MockKeyInput) -> Action {
        while let Some(event) = input.next_event() {
            let action = self.press(event);
            if action != Action::Incomplete {
                return action;
            }
        }
        Action::Incomplete
    }

    /// Type `line`, press Enter and collect what the shell would run.
    pub fn enter_line(&mut self, line: &str) -> String {
        self.type_text(line);
        assert_eq!(self.key(Key::Enter), Action::ReturnToHost);
        self.editor.to_committed_buffer()
    }

    pub fn text(&self) -> &str {
        self.editor.buffer().text()
    }

    pub fn cursor(&self) -> usize {
        self.editor.buffer().cursor_position()
    }
}
