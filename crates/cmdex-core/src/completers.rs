//! Built-in completers that need nothing but the command line itself.
//!
//! Completers that walk the filesystem or shell out to external tools belong
//! to the host; these cover fixed vocabularies.

use crate::completion::{Completer, CompleterInput, CompletionResult};

/// Porcelain subcommands offered after `git`.
pub const GIT_PORCELAIN_COMMANDS: &[&str] = &[
    "add", "am", "archive", "bisect", "branch", "bundle", "checkout", "cherry-pick", "citool",
    "clean", "clone", "commit", "describe", "diff", "fetch", "format-patch", "gc", "grep", "gui",
    "init", "log", "merge", "mv", "notes", "pull", "push", "rebase", "reset", "revert", "rm",
    "shortlog", "show", "stash", "status", "submodule", "tag",
];

/// Long options offered after `git checkout`.
pub const GIT_CHECKOUT_OPTIONS: &[&str] = &[
    "--quiet",
    "--ours",
    "--theirs",
    "--no-track",
    "--merge",
    "--conflict=",
    "--orphan",
    "--patch",
];

/// Commands the shell implements itself, so they are never found on `PATH`.
pub const SHELL_BUILTINS: &[&str] = &[
    "assoc", "break", "bcdedit", "call", "cd", "chdir", "cls", "color", "copy", "date", "del",
    "dir", "echo", "endlocal", "erase", "exit", "for", "ftype", "goto", "graftabl", "if", "md",
    "mkdir", "mklink", "move", "path", "pause", "popd", "prompt", "pushd", "rd", "rem", "ren",
    "rename", "rmdir", "set", "setlocal", "shift", "start", "time", "title", "type", "ver",
    "verify", "vol",
];

/// Entries of `candidates` starting with `prefix`, in their original order.
fn filter_by_prefix<'a, I>(candidates: I, prefix: &str, ignore_case: bool) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let lowered = prefix.to_lowercase();
    candidates
        .into_iter()
        .filter(|candidate| {
            if ignore_case {
                candidate.to_lowercase().starts_with(&lowered)
            } else {
                candidate.starts_with(prefix)
            }
        })
        .map(str::to_string)
        .collect()
}

fn non_empty(candidates: Vec<String>, trailing_space: bool) -> Option<CompletionResult> {
    (!candidates.is_empty()).then(|| CompletionResult::new(candidates, trailing_space))
}

/// Completes one word position from a fixed list, optionally only after a
/// given command.
///
/// # Examples
///
/// ```
/// use cmdex_core::completers::PrefixListCompleter;
/// use cmdex_core::completion::{Completer, CompleterInput};
/// use cmdex_core::words::tokenize;
///
/// let completer = PrefixListCompleter::new(1, ["/s", "/b", "/a"]).for_command("dir");
/// let words = tokenize("dir /");
/// let input = CompleterInput { words: &words, word_index: 1, offset_in_word: 1 };
/// let result = completer.try_complete(&input).unwrap();
/// assert_eq!(result.candidates, vec!["/s", "/b", "/a"]);
/// ```
#[derive(Debug, Clone)]
pub struct PrefixListCompleter {
    command: Option<String>,
    word_index: usize,
    words: Vec<String>,
    trailing_space: bool,
}

impl PrefixListCompleter {
    /// Offer `words` for word `word_index` of any command.
    pub fn new<I, S>(word_index: usize, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: None,
            word_index,
            words: words.into_iter().map(Into::into).collect(),
            trailing_space: true,
        }
    }

    /// Only complete when the sub-command starts with `command`
    /// (case-insensitive).
    pub fn for_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn with_trailing_space(mut self, trailing_space: bool) -> Self {
        self.trailing_space = trailing_space;
        self
    }
}

impl Completer for PrefixListCompleter {
    fn try_complete(&self, input: &CompleterInput<'_>) -> Option<CompletionResult> {
        if input.word_index != self.word_index {
            return None;
        }
        if let Some(command) = &self.command {
            if !input.command().eq_ignore_ascii_case(command) {
                return None;
            }
        }
        let candidates = filter_by_prefix(self.words.iter().map(String::as_str), input.prefix(), false);
        non_empty(candidates, self.trailing_space)
    }

    fn name(&self) -> &str {
        "prefix-list"
    }
}

/// `git <subcommand>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCommandNameCompleter;

impl Completer for GitCommandNameCompleter {
    fn try_complete(&self, input: &CompleterInput<'_>) -> Option<CompletionResult> {
        if input.command() != "git" || input.word_index != 1 {
            return None;
        }
        non_empty(
            filter_by_prefix(GIT_PORCELAIN_COMMANDS.iter().copied(), input.prefix(), false),
            true,
        )
    }

    fn name(&self) -> &str {
        "git-command"
    }
}

/// `git checkout --<option>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCheckoutOptionCompleter;

impl Completer for GitCheckoutOptionCompleter {
    fn try_complete(&self, input: &CompleterInput<'_>) -> Option<CompletionResult> {
        if input.command() != "git" || input.word(1) != Some("checkout") || input.word_index != 2 {
            return None;
        }
        let prefix = input.prefix();
        if !prefix.starts_with('-') {
            return None;
        }
        non_empty(
            filter_by_prefix(GIT_CHECKOUT_OPTIONS.iter().copied(), prefix, false),
            true,
        )
    }

    fn name(&self) -> &str {
        "git-checkout-option"
    }
}

/// Shell builtins in command position.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCommandCompleter;

impl Completer for BuiltinCommandCompleter {
    fn try_complete(&self, input: &CompleterInput<'_>) -> Option<CompletionResult> {
        if input.word_index != 0 {
            return None;
        }
        non_empty(
            filter_by_prefix(SHELL_BUILTINS.iter().copied(), input.prefix(), true),
            true,
        )
    }

    fn name(&self) -> &str {
        "builtin-command"
    }
}

/// Variable names after `set`. The name source is supplied by the host so the
/// completer stays free of process state.
pub struct EnvironmentVariableCompleter<F> {
    names: F,
}

impl<F> EnvironmentVariableCompleter<F>
where
    F: Fn() -> Vec<String>,
{
    pub fn new(names: F) -> Self {
        Self { names }
    }
}

impl<F> Completer for EnvironmentVariableCompleter<F>
where
    F: Fn() -> Vec<String>,
{
    fn try_complete(&self, input: &CompleterInput<'_>) -> Option<CompletionResult> {
        if !input.command().eq_ignore_ascii_case("set") || input.word_index != 1 {
            return None;
        }
        let names = (self.names)();
        non_empty(
            filter_by_prefix(names.iter().map(String::as_str), input.prefix(), true),
            false,
        )
    }

    fn name(&self) -> &str {
        "environment-variable"
    }
}
