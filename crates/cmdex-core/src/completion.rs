//! Tab-completion dispatch and cycling.
//!
//! Completers are tried in registration order and the first one that returns
//! candidates owns the completion session. Repeated Tab / Shift-Tab presses
//! then cycle through that fixed candidate list, replacing the word in place,
//! until some other key ends the session.

use crate::buffer::EditBuffer;
use crate::unicode;
use crate::words::{self, Word};

/// What a completer gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct CompleterInput<'a> {
    /// Words of the sub-command holding the cursor, including an empty word
    /// when the cursor is not on any real word. `&&`, `||` and `&` bound a
    /// sub-command. Word offsets stay relative to the whole line.
    pub words: &'a [Word],
    /// Index of the word under the cursor within `words`
    pub word_index: usize,
    /// Cursor offset within that word, in runes
    pub offset_in_word: usize,
}

impl<'a> CompleterInput<'a> {
    /// The word under the cursor.
    pub fn current_word(&self) -> &'a Word {
        &self.words[self.word_index]
    }

    /// De-escaped text of the word under the cursor.
    pub fn prefix(&self) -> &'a str {
        &self.current_word().deescaped_text
    }

    /// De-escaped text of the first word of the sub-command, so `git` for
    /// `cd src && git st`.
    pub fn command(&self) -> &'a str {
        self.words
            .first()
            .map(|w| w.deescaped_text.as_str())
            .unwrap_or("")
    }

    /// De-escaped text of word `index` of the sub-command, if it has that many.
    pub fn word(&self, index: usize) -> Option<&'a str> {
        self.words.get(index).map(|w| w.deescaped_text.as_str())
    }
}

/// Candidates proposed by a completer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    /// Replacement texts, unquoted, in the order they are cycled
    pub candidates: Vec<String>,
    /// Whether a space follows the inserted candidate. `false` for partial
    /// tokens such as a directory that will be continued.
    pub trailing_space: bool,
}

impl CompletionResult {
    /// Candidates with an explicit trailing-space choice. Use `false` for
    /// partial tokens the user will keep typing, such as `src\`.
    pub fn new(candidates: Vec<String>, trailing_space: bool) -> Self {
        Self {
            candidates,
            trailing_space,
        }
    }

    /// Complete tokens, followed by a space.
    pub fn words(candidates: Vec<String>) -> Self {
        Self::new(candidates, true)
    }
}

/// A source of completion candidates.
///
/// Returning `None` (or an empty candidate list) declines and lets the next
/// registered completer try.
///
/// # Examples
///
/// ```
/// use cmdex_core::completion::{Completer, CompleterInput, CompletionResult};
/// use cmdex_core::words::tokenize;
///
/// let completer = |input: &CompleterInput<'_>| -> Option<CompletionResult> {
///     (input.word_index == 0).then(|| CompletionResult::words(vec!["dir".to_string()]))
/// };
///
/// let words = tokenize("di");
/// let input = CompleterInput { words: &words, word_index: 0, offset_in_word: 2 };
/// assert!(completer.try_complete(&input).is_some());
/// ```
pub trait Completer {
    fn try_complete(&self, input: &CompleterInput<'_>) -> Option<CompletionResult>;

    /// Name used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Completer for F
where
    F: Fn(&CompleterInput<'_>) -> Option<CompletionResult>,
{
    fn try_complete(&self, input: &CompleterInput<'_>) -> Option<CompletionResult> {
        self(input)
    }
}

/// State shared by consecutive Tab presses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSession {
    /// Start of the span being replaced
    pub word_begin: usize,
    /// End of the span being replaced; moves as candidates are swapped in
    pub word_end: usize,
    pub candidates: Vec<String>,
    pub cursor_index: usize,
    pub trailing_space: bool,
}

/// Ordered completer registry plus the active session, if any.
#[derive(Default)]
pub struct Completions {
    completers: Vec<Box<dyn Completer>>,
    session: Option<CompletionSession>,
}

impl Completions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a completer after those already registered. Register specific
    /// completers before general fallbacks.
    pub fn register(&mut self, completer: impl Completer + 'static) {
        self.completers.push(Box::new(completer));
    }

    /// Number of registered completers.
    ///
    /// ```
    /// use cmdex_core::completion::Completions;
    /// use cmdex_core::completers::BuiltinCommandCompleter;
    ///
    /// let mut completions = Completions::new();
    /// assert!(completions.is_empty());
    /// completions.register(BuiltinCommandCompleter);
    /// assert_eq!(completions.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.completers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completers.is_empty()
    }

    /// The cycle in progress, if the last key was Tab or Shift-Tab.
    pub fn session(&self) -> Option<&CompletionSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// End the current session; the next Tab starts a fresh lookup.
    pub fn reset(&mut self) {
        self.session = None;
    }

    /// Handle one Tab (`forward`) or Shift-Tab press against `buffer`.
    ///
    /// Returns `false` when no completer accepted, leaving the buffer as is.
    pub fn tab_complete(&mut self, buffer: &mut EditBuffer, forward: bool) -> bool {
        let session = match self.session.take() {
            Some(mut session) => {
                let len = session.candidates.len();
                session.cursor_index = if forward {
                    (session.cursor_index + 1) % len
                } else {
                    (session.cursor_index + len - 1) % len
                };
                session
            }
            None => match self.start_session(buffer, forward) {
                Some(session) => session,
                None => return false,
            },
        };
        self.session = Some(apply_candidate(buffer, session));
        true
    }

    fn start_session(&self, buffer: &EditBuffer, forward: bool) -> Option<CompletionSession> {
        let cursor = buffer.cursor_position();
        let mut words = words::tokenize(buffer.text());
        let mut word_index = words::word_index_at(&words, cursor).unwrap_or(0);
        if cursor > words[word_index].end() {
            // Cursor sits in the blanks between two words.
            word_index += 1;
            words.insert(word_index, Word::empty_at(cursor));
        }

        let Some((command, index_in_command)) = words::command_containing(&words, word_index) else {
            log::debug!("Cursor is on a command separator");
            return None;
        };
        let word = &command[index_in_command];
        let input = CompleterInput {
            words: &command,
            word_index: index_in_command,
            offset_in_word: cursor - word.start,
        };

        for completer in &self.completers {
            let Some(result) = completer.try_complete(&input) else {
                continue;
            };
            if result.candidates.is_empty() {
                continue;
            }
            log::debug!(
                "Completer {} offered {} candidates for word {}",
                completer.name(),
                result.candidates.len(),
                word_index
            );
            let cursor_index = if forward { 0 } else { result.candidates.len() - 1 };
            return Some(CompletionSession {
                word_begin: word.start,
                word_end: word.end(),
                candidates: result.candidates,
                cursor_index,
                trailing_space: result.trailing_space,
            });
        }
        log::debug!("No completer accepted word {word_index}");
        None
    }
}

fn apply_candidate(buffer: &mut EditBuffer, mut session: CompletionSession) -> CompletionSession {
    let mut text = words::quote_for_reinsertion(&session.candidates[session.cursor_index]);
    if session.trailing_space {
        text.push(' ');
    }
    buffer.replace_range(session.word_begin, session.word_end, &text);
    session.word_end = session.word_begin + unicode::rune_count(&text);
    session
}
