//! The line editor state machine.
//!
//! A [`LineEditor`] receives one key event at a time from the host, updates
//! its buffer, consults the histories and completers, and repaints. The host
//! keeps calling [`LineEditor::handle_key`] until it gets something other
//! than [`Action::Incomplete`], then collects the line with
//! [`LineEditor::to_committed_buffer`].
//!
//! The editor owns only its own editing state. The console, both histories
//! and the working directory belong to the host and are lent to the editor
//! for each call through an [`EditContext`].

use crate::{
    buffer::EditBuffer,
    command_history::{CommandHistory, Direction},
    completion::{Completer, Completions},
    config::{EditAction, EditorConfig},
    console::Console,
    directory_history::{DirectoryHistory, WorkingDirectory},
    error::EditorResult,
    key::KeyEvent,
    key_handler::KeyHandler,
    renderer::Renderer,
};

/// What the host should do after a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep feeding keys
    Incomplete,
    /// The line is finished; collect it and stop editing
    ReturnToHost,
    /// Run the synthesized command, then call [`LineEditor::init`] and keep
    /// editing the same buffer
    ReturnToHostThenResume,
}

/// Whether the editor is between [`LineEditor::init`] and a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// Between commands
    Idle,
    Editing,
}

/// Host-owned collaborators, borrowed for the duration of one call.
pub struct EditContext<'a> {
    pub console: &'a mut dyn Console,
    pub command_history: &'a mut CommandHistory,
    pub directory_history: &'a mut DirectoryHistory,
    pub working_dir: &'a mut dyn WorkingDirectory,
}

/// Buffer contents set aside while a multi-line paste waits for confirmation.
#[derive(Debug, Clone)]
struct PendingPaste {
    text: String,
    cursor: usize,
    paste: String,
}

/// The line-editing state machine.
///
/// The host calls [`init`](Self::init) at each prompt, then feeds every key
/// event to [`handle_key`](Self::handle_key) until it gets something other
/// than [`Action::Incomplete`] back. The editor owns the buffer, the
/// completion session and the painting state. Histories, the console and
/// the working directory stay with the host and are lent per call through
/// an [`EditContext`].
///
/// # Examples
///
/// ```
/// use cmdex_core::{EditorConfig, EditorState, LineEditor};
///
/// let editor = LineEditor::new(EditorConfig::default());
/// assert_eq!(editor.state(), EditorState::Idle);
/// assert!(editor.buffer().is_empty());
/// ```
pub struct LineEditor {
    config: EditorConfig,
    key_handler: KeyHandler,
    completions: Completions,
    buffer: EditBuffer,
    renderer: Renderer,
    state: EditorState,
    synthesized: Option<String>,
    pending_paste: Option<PendingPaste>,
    /// Prefix captured by the first of a run of prefix searches
    history_prefix: Option<String>,
}

impl LineEditor {
    /// An idle editor. Custom bindings from `config` take effect immediately.
    pub fn new(config: EditorConfig) -> Self {
        let key_handler = KeyHandler::new(&config.bindings);
        Self {
            config,
            key_handler,
            completions: Completions::new(),
            buffer: EditBuffer::new(),
            renderer: Renderer::new(),
            state: EditorState::Idle,
            synthesized: None,
            pending_paste: None,
            history_prefix: None,
        }
    }

    /// Add a completer after those already registered.
    pub fn register_completer(&mut self, completer: impl Completer + 'static) {
        self.completions.register(completer);
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// For binding keys after construction.
    pub fn key_handler_mut(&mut self) -> &mut KeyHandler {
        &mut self.key_handler
    }

    /// The line being edited. While a paste waits for confirmation this
    /// holds the prompt text.
    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Whether the next Tab cycles the current candidates rather than asking
    /// the completers again.
    pub fn is_completing(&self) -> bool {
        self.completions.is_active()
    }

    /// Whether a multi-line paste is waiting for a second Ctrl-V.
    pub fn is_paste_pending(&self) -> bool {
        self.pending_paste.is_some()
    }

    /// Start (or resume) an edit session at the console's cursor.
    pub fn init(&mut self, ctx: &mut EditContext<'_>) -> EditorResult<()> {
        if self.state == EditorState::Idle {
            self.buffer.clear();
        }
        self.state = EditorState::Editing;
        self.completions.reset();
        self.history_prefix = None;
        self.pending_paste = None;

        self.renderer.begin(&*ctx.console)?;
        ctx.directory_history.on_resume_editing(&*ctx.working_dir);
        self.redraw(ctx)?;
        Ok(())
    }

    /// Handle a raw key record as delivered by the host.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_key_record(
        &mut self,
        ctx: &mut EditContext<'_>,
        pressed: bool,
        ctrl: bool,
        alt: bool,
        shift: bool,
        ch: Option<char>,
        virtual_key: u16,
    ) -> EditorResult<Action> {
        let event = KeyEvent::from_record(pressed, ctrl, alt, shift, ch, virtual_key);
        self.handle_key(ctx, &event)
    }

    /// Process one key event and repaint.
    ///
    /// Key releases, bare modifier keys and anything arriving while idle are
    /// ignored. A key other than Ctrl-V cancels a pending paste and is then
    /// handled normally.
    pub fn handle_key(&mut self, ctx: &mut EditContext<'_>, event: &KeyEvent) -> EditorResult<Action> {
        if !event.pressed || event.key.is_modifier() {
            return Ok(Action::Incomplete);
        }
        if self.state == EditorState::Idle {
            log::debug!("Ignoring {:?} while idle", event.key);
            return Ok(Action::Incomplete);
        }

        let action = self.key_handler.resolve(event);
        log::debug!("Key {:?} resolved to {:?}", event.key, action);

        if let Some(pending) = self.pending_paste.take() {
            self.buffer.set_text(pending.text);
            self.buffer.set_cursor_position(pending.cursor);
            if action == Some(EditAction::Paste) {
                self.buffer.insert_text(&pending.paste);
                self.redraw(ctx)?;
                return Ok(Action::Incomplete);
            }
        }

        if !matches!(action, Some(EditAction::CompleteNext | EditAction::CompletePrevious)) {
            self.completions.reset();
        }
        if !matches!(
            action,
            Some(EditAction::HistorySearchBackward | EditAction::HistorySearchForward)
        ) {
            self.history_prefix = None;
        }

        let result = match action {
            Some(action) => self.perform(ctx, action)?,
            None => {
                if let Some(ch) = event.printable() {
                    let mut utf8 = [0u8; 4];
                    self.buffer.insert_text(ch.encode_utf8(&mut utf8));
                }
                Action::Incomplete
            }
        };

        if result == Action::Incomplete {
            self.redraw(ctx)?;
        }
        Ok(result)
    }

    /// Hand the host whatever it should execute: a synthesized command if one
    /// is pending, otherwise the committed buffer, which is emptied.
    pub fn to_committed_buffer(&mut self) -> String {
        if let Some(command) = self.synthesized.take() {
            return command;
        }
        self.buffer.take()
    }

    fn perform(&mut self, ctx: &mut EditContext<'_>, action: EditAction) -> EditorResult<Action> {
        if self.key_handler.apply_edit(action, &mut self.buffer, &self.config) {
            return Ok(Action::Incomplete);
        }

        match action {
            EditAction::Commit => return self.commit(ctx),
            EditAction::HistoryPrevious => self.recall(ctx, Direction::Backward, false),
            EditAction::HistoryNext => self.recall(ctx, Direction::Forward, false),
            EditAction::HistorySearchBackward => self.recall(ctx, Direction::Backward, true),
            EditAction::HistorySearchForward => self.recall(ctx, Direction::Forward, true),
            EditAction::DirectoryBack | EditAction::DirectoryForward => {
                let direction = if action == EditAction::DirectoryBack {
                    Direction::Backward
                } else {
                    Direction::Forward
                };
                if ctx.directory_history.navigate(direction, ctx.working_dir) {
                    let command = self.config.terminated("");
                    return self.return_then_resume(ctx, command);
                }
            }
            EditAction::ParentDirectory => {
                let command = self.config.terminated(&self.config.parent_directory_command);
                return self.return_then_resume(ctx, command);
            }
            EditAction::CompleteNext => {
                self.completions.tab_complete(&mut self.buffer, true);
            }
            EditAction::CompletePrevious => {
                self.completions.tab_complete(&mut self.buffer, false);
            }
            EditAction::Paste => self.paste(ctx)?,
            EditAction::ExitOrDeleteForward => {
                if self.buffer.is_empty() {
                    let command = self.config.terminated(&self.config.exit_command);
                    return self.return_then_resume(ctx, command);
                }
                self.buffer.delete(1);
            }
            other => log::debug!("Unhandled action {other:?}"),
        }
        Ok(Action::Incomplete)
    }

    fn commit(&mut self, ctx: &mut EditContext<'_>) -> EditorResult<Action> {
        let len = self.buffer.len();
        self.buffer.set_cursor_position(len);
        self.redraw(ctx)?;
        if !self.buffer.is_empty() {
            ctx.command_history.add(self.buffer.text());
        }
        self.buffer.insert_text(&self.config.line_terminator);
        self.renderer.finish(ctx.console, len)?;
        self.state = EditorState::Idle;
        log::debug!("Committed line of {len} runes");
        Ok(Action::ReturnToHost)
    }

    fn return_then_resume(&mut self, ctx: &mut EditContext<'_>, command: String) -> EditorResult<Action> {
        log::debug!("Synthesized command {command:?}");
        self.synthesized = Some(command);
        self.redraw(ctx)?;
        self.renderer.finish(ctx.console, self.buffer.len())?;
        Ok(Action::ReturnToHostThenResume)
    }

    fn recall(&mut self, ctx: &mut EditContext<'_>, direction: Direction, search: bool) {
        let prefix = if search {
            self.history_prefix
                .get_or_insert_with(|| self.buffer.text_before_cursor().to_string())
                .clone()
        } else {
            String::new()
        };
        if let Some(entry) = ctx.command_history.move_in_history(direction, &prefix) {
            self.buffer.set_text(entry);
        }
    }

    fn paste(&mut self, ctx: &mut EditContext<'_>) -> EditorResult<()> {
        let Some(text) = ctx.console.clipboard_text()? else {
            return Ok(());
        };
        if !text.contains(['\r', '\n']) {
            self.buffer.insert_text(&text);
            return Ok(());
        }

        // A trailing line break does not start another line.
        let lines = text.lines().count();
        log::debug!("Asking to confirm paste of {lines} line(s)");
        self.pending_paste = Some(PendingPaste {
            text: self.buffer.text().to_string(),
            cursor: self.buffer.cursor_position(),
            paste: text,
        });
        self.buffer.set_text(self.config.paste_prompt(lines));
        Ok(())
    }

    fn redraw(&mut self, ctx: &mut EditContext<'_>) -> EditorResult<()> {
        self.renderer
            .redraw(ctx.console, self.buffer.text(), self.buffer.cursor_position())?;
        Ok(())
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
