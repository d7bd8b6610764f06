//! Command-line tokenizer and quoter.
//!
//! Splits a raw command line into [`Word`]s using the same rules the host's
//! process launcher applies to its argument string, so that offsets computed
//! here agree with what will eventually be executed:
//!
//! - the first word (the executable) is either a quoted run ending at the next
//!   quote, or an unquoted run ending at the first space or tab, with no escape
//!   processing;
//! - later words split on space and tab outside quotes;
//! - `2n` backslashes before a quote become `n` backslashes and the quote
//!   toggles quoting, `2n+1` become `n` backslashes and a literal quote;
//! - backslashes not followed by a quote are literal;
//! - runs of quotes count modulo 3, every third quote in a run being literal.
//!
//! Malformed input (an unterminated quote) never fails: end of line closes it.

use crate::unicode;

/// One token of a command line, in both raw and resolved form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Word {
    /// Rune offset of the first character in the line
    pub start: usize,
    /// Raw text, quotes and escapes included
    pub original_text: String,
    /// Text with quoting resolved
    pub deescaped_text: String,
}

impl Word {
    fn new(start: usize, original: &[char], deescaped: String) -> Self {
        Self {
            start,
            original_text: original.iter().collect(),
            deescaped_text: deescaped,
        }
    }

    pub(crate) fn empty_at(start: usize) -> Self {
        Self {
            start,
            ..Self::default()
        }
    }

    /// Rune offset one past the last character.
    pub fn end(&self) -> usize {
        self.start + unicode::rune_count(&self.original_text)
    }

    /// `(start, end)` in rune offsets.
    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end())
    }

    pub fn is_empty(&self) -> bool {
        self.original_text.is_empty()
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn skip_blanks(chars: &[char], mut p: usize) -> usize {
    while p < chars.len() && is_blank(chars[p]) {
        p += 1;
    }
    p
}

fn drop_tail(s: &mut String, count: usize) {
    for _ in 0..count {
        s.pop();
    }
}

/// Break `line` into words.
///
/// An empty line yields a single empty word at offset 0, and a line that ends
/// in blanks gets an empty word at its end, so there is always a word for a
/// cursor sitting past the last token.
///
/// ```
/// use cmdex_core::words::tokenize;
///
/// let words = tokenize("exe two\"\"quotes after");
/// assert_eq!(words.len(), 3);
/// assert_eq!(words[1].original_text, "two\"\"quotes");
/// assert_eq!(words[1].deescaped_text, "twoquotes");
/// ```
pub fn tokenize(line: &str) -> Vec<Word> {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return vec![Word::empty_at(0)];
    }

    let mut words = Vec::new();

    // Executable: no escapes inside quotes, no quoting outside them.
    let mut p = 0;
    if chars[0] == '"' {
        p = 1;
        while p < chars.len() {
            p += 1;
            if chars[p - 1] == '"' {
                break;
            }
        }
        let closed = p >= 2 && chars[p - 1] == '"';
        let inner_end = if closed { p - 1 } else { p };
        words.push(Word::new(0, &chars[..p], chars[1..inner_end].iter().collect()));
    } else {
        while p < chars.len() && !is_blank(chars[p]) {
            p += 1;
        }
        words.push(Word::new(0, &chars[..p], chars[..p].iter().collect()));
    }

    p = skip_blanks(&chars, p);
    let mut arg_start = p;
    let mut deescaped = String::new();
    let mut quotes = 0u32;
    let mut backslashes = 0usize;

    while p < chars.len() {
        let c = chars[p];
        if is_blank(c) && quotes == 0 {
            words.push(Word::new(
                arg_start,
                &chars[arg_start..p],
                std::mem::take(&mut deescaped),
            ));
            p = skip_blanks(&chars, p);
            arg_start = p;
            backslashes = 0;
            continue;
        }
        match c {
            '\\' => {
                deescaped.push('\\');
                backslashes += 1;
                p += 1;
            }
            '"' => {
                if backslashes % 2 == 0 {
                    drop_tail(&mut deescaped, backslashes / 2);
                    quotes += 1;
                } else {
                    drop_tail(&mut deescaped, backslashes / 2 + 1);
                    deescaped.push('"');
                }
                p += 1;
                backslashes = 0;
                while p < chars.len() && chars[p] == '"' {
                    quotes += 1;
                    if quotes == 3 {
                        deescaped.push('"');
                        quotes = 0;
                    }
                    p += 1;
                }
                if quotes == 2 {
                    quotes = 0;
                }
            }
            _ => {
                deescaped.push(c);
                backslashes = 0;
                p += 1;
            }
        }
    }
    if arg_start != p {
        words.push(Word::new(arg_start, &chars[arg_start..p], deescaped));
    }

    let last_end = words.last().map(Word::end).unwrap_or(0);
    if p > last_end {
        words.push(Word::empty_at(p));
    }

    merge_attached_backslash_words(&mut words);
    words
}

/// `"C:\Program Files"\` parses as two adjacent words; fold a word that starts
/// with a backslash back into a word ending exactly where it begins.
fn merge_attached_backslash_words(words: &mut Vec<Word>) {
    let mut i = 0;
    while i + 1 < words.len() {
        if words[i + 1].original_text.starts_with('\\') && words[i].end() == words[i + 1].start {
            let second = words.remove(i + 1);
            words[i].original_text.push_str(&second.original_text);
            words[i].deescaped_text.push_str(&second.deescaped_text);
        } else {
            i += 1;
        }
    }
}

/// Index of the last word starting at or before `offset`.
///
/// ```
/// use cmdex_core::words::{tokenize, word_index_at};
///
/// let words = tokenize("cd src");
/// assert_eq!(word_index_at(&words, 0), Some(0));
/// assert_eq!(word_index_at(&words, 3), Some(1));
/// assert_eq!(word_index_at(&[], 3), None);
/// ```
pub fn word_index_at(words: &[Word], offset: usize) -> Option<usize> {
    words.iter().rposition(|word| word.start <= offset)
}

/// Quote `word` so that tokenizing the result yields `word` back as the
/// de-escaped text.
///
/// Text without blanks, line breaks or quotes is returned unchanged; anything
/// else (including the empty string) is wrapped in quotes with backslashes
/// escaped only where they precede a quote.
///
/// ```
/// use cmdex_core::words::quote_for_reinsertion;
///
/// assert_eq!(quote_for_reinsertion("src"), "src");
/// assert_eq!(quote_for_reinsertion("Program Files\\"), "\"Program Files\\\\\"");
/// ```
pub fn quote_for_reinsertion(word: &str) -> String {
    if !word.is_empty() && !word.contains([' ', '\t', '\n', '\u{b}', '"']) {
        return word.to_string();
    }

    let mut result = String::with_capacity(word.len() + 2);
    result.push('"');
    let mut chars = word.chars().peekable();
    loop {
        let mut backslashes = 0;
        while chars.next_if_eq(&'\\').is_some() {
            backslashes += 1;
        }
        match chars.next() {
            None => {
                result.extend(std::iter::repeat('\\').take(backslashes * 2));
                break;
            }
            Some('"') => {
                result.extend(std::iter::repeat('\\').take(backslashes * 2 + 1));
                result.push('"');
            }
            Some(c) => {
                result.extend(std::iter::repeat('\\').take(backslashes));
                result.push(c);
            }
        }
    }
    result.push('"');
    result
}

/// Whether `word` chains two commands. A quoted `"&&"` does not.
pub fn is_command_separator(word: &Word) -> bool {
    matches!(word.original_text.as_str(), "&&" | "||" | "&")
}

/// Partition `words` into sub-commands at `&&`, `||` and `&`. The separators
/// are dropped; there is always at least one (possibly empty) group.
pub fn split_on_command_separators(words: &[Word]) -> Vec<Vec<Word>> {
    let mut commands = Vec::new();
    let mut current = Vec::new();
    for word in words {
        if is_command_separator(word) {
            commands.push(std::mem::take(&mut current));
            continue;
        }
        current.push(word.clone());
    }
    commands.push(current);
    commands
}

/// The sub-command holding `words[index]`, and that word's index within it.
///
/// Returns `None` when `index` is out of range or names a separator.
///
/// ```
/// use cmdex_core::words::{command_containing, tokenize};
///
/// let words = tokenize("cd src && git st");
/// let (command, index) = command_containing(&words, 4).unwrap();
/// assert_eq!(command[0].original_text, "git");
/// assert_eq!(index, 1);
/// assert!(command_containing(&words, 2).is_none());
/// ```
pub fn command_containing(words: &[Word], index: usize) -> Option<(Vec<Word>, usize)> {
    if is_command_separator(words.get(index)?) {
        return None;
    }
    let before = &words[..index];
    let group = before.iter().filter(|w| is_command_separator(w)).count();
    let group_start = before.iter().rposition(is_command_separator).map_or(0, |i| i + 1);
    let mut commands = split_on_command_separators(words);
    Some((commands.swap_remove(group), index - group_start))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn originals(line: &str) -> Vec<String> {
        tokenize(line).into_iter().map(|w| w.original_text).collect()
    }

    fn deescaped(line: &str) -> Vec<String> {
        tokenize(line).into_iter().map(|w| w.deescaped_text).collect()
    }

    #[test]
    fn test_no_args() {
        assert_eq!(originals("exe"), vec!["exe"]);
    }

    #[test]
    fn test_empty_line() {
        let words = tokenize("");
        assert_eq!(words, vec![Word::empty_at(0)]);
    }

    #[test]
    fn test_basic_quotes() {
        assert_eq!(
            originals(r#"exe a b "c d" 'e f` g\ h)"#),
            vec!["exe", "a", "b", "\"c d\"", "'e", "f`", "g\\", "h)"]
        );
        assert_eq!(deescaped(r#"exe a b "c d""#)[3], "c d");
    }

    #[test]
    fn test_quotes_in_args() {
        assert_eq!(
            originals(r#"exe a"b" "c"d e"#),
            vec!["exe", "a\"b\"", "\"c\"d", "e"]
        );
        assert_eq!(deescaped(r#"exe a"b" "c"d e"#), vec!["exe", "ab", "cd", "e"]);
    }

    #[test]
    fn test_unclosed_quotes() {
        assert_eq!(originals(r#"exe a "b"#), vec!["exe", "a", "\"b"]);
        assert_eq!(deescaped(r#"exe a "b c"#)[2], "b c");
    }

    #[test]
    fn test_standalone_quote() {
        assert_eq!(originals(r#"exe a ""#), vec!["exe", "a", "\""]);
        assert_eq!(deescaped(r#"exe a ""#)[2], "");
    }

    #[test]
    fn test_only_space_and_tab_separate() {
        assert_eq!(
            originals("exe a\tb\rc\nd\u{b}e\u{c}f"),
            vec!["exe", "a", "b\rc\nd\u{b}e\u{c}f"]
        );
    }

    #[test]
    fn test_backslash_without_quote_is_literal() {
        let line = r"exe o\ne t\\wo t\\\hree f\\\\our";
        assert_eq!(
            originals(line),
            vec!["exe", r"o\ne", r"t\\wo", r"t\\\hree", r"f\\\\our"]
        );
        assert_eq!(deescaped(line), originals(line));
    }

    #[test]
    fn test_backslash_without_quote_inside_quotes() {
        let line = r#"exe "o\ne" "t\\wo" "t\\\hree" "f\\\\our""#;
        assert_eq!(
            originals(line),
            vec![
                "exe",
                r#""o\ne""#,
                r#""t\\wo""#,
                r#""t\\\hree""#,
                r#""f\\\\our""#
            ]
        );
        assert_eq!(
            deescaped(line),
            vec!["exe", r"o\ne", r"t\\wo", r"t\\\hree", r"f\\\\our"]
        );
    }

    #[test]
    fn test_backslash_quote() {
        let line = r#"exe \"one \\"two" \\\"three \\\\"four" after"#;
        assert_eq!(
            originals(line),
            vec![
                "exe",
                r#"\"one"#,
                r#"\\"two""#,
                r#"\\\"three"#,
                r#"\\\\"four""#,
                "after"
            ]
        );
        assert_eq!(
            deescaped(line),
            vec!["exe", "\"one", r"\two", r#"\"three"#, r"\\four", "after"]
        );
    }

    #[test]
    fn test_backslash_quote_spaced() {
        let line = r#"exe "one\" still" "two\\" "three\\\" still" "four\\\\" after"#;
        assert_eq!(
            originals(line),
            vec![
                "exe",
                r#""one\" still""#,
                r#""two\\""#,
                r#""three\\\" still""#,
                r#""four\\\\""#,
                "after"
            ]
        );
        assert_eq!(
            deescaped(line),
            vec!["exe", "one\" still", r"two\", r#"three\" still"#, r"four\\", "after"]
        );
    }

    #[test]
    fn test_doubled_quotes() {
        let words = tokenize(r#"exe two""quotes after"#);
        assert_eq!(words.len(), 3);
        assert_eq!(words[1].original_text, r#"two""quotes"#);
        assert_eq!(words[1].deescaped_text, "twoquotes");
        assert_eq!(words[2].original_text, "after");
    }

    #[test]
    fn test_quote_runs_mod_three() {
        // Third quote of a run is literal.
        assert_eq!(deescaped(r#"exe a"""b"#)[1], "a\"b");
        // A run of two after an open quote closes it.
        assert_eq!(deescaped(r#"exe "a"" b"#), vec!["exe", "a\"", "b"]);
    }

    #[test]
    fn test_crazy_quotes() {
        let words = tokenize(r#"exe "the crazy \\""\\" quotes""#);
        assert_eq!(words.len(), 2);
        assert_eq!(words[1].deescaped_text, r#"the crazy \"\ quotes"#);
    }

    #[test]
    fn test_quoted_executable() {
        let words = tokenize(r#""c:\Program Files\x.exe" "a b""#);
        assert_eq!(words[0].original_text, r#""c:\Program Files\x.exe""#);
        assert_eq!(words[0].deescaped_text, r"c:\Program Files\x.exe");
        assert_eq!(words[1].deescaped_text, "a b");

        let words = tokenize(r#""c:\tools\x"#);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].deescaped_text, r"c:\tools\x");
    }

    #[test]
    fn test_trailing_blank_adds_empty_word() {
        let words = tokenize("cd  ");
        assert_eq!(words.len(), 2);
        assert_eq!(words[1], Word::empty_at(4));
        assert_eq!(tokenize("cd").len(), 1);
    }

    #[test]
    fn test_merge_attached_backslash() {
        let words = tokenize(r#"cd "C:\Program Files (x86)"\"#);
        assert_eq!(words.len(), 2);
        assert_eq!(words[1].original_text, r#""C:\Program Files (x86)"\"#);
        assert_eq!(words[1].deescaped_text, r"C:\Program Files (x86)\");

        // A quoted executable ends at its closing quote, so the backslash
        // after it starts a new word that gets folded back in.
        let words = tokenize(r#""C:\Program Files"\ x"#);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].original_text, r#""C:\Program Files"\"#);
        assert_eq!(words[0].deescaped_text, r"C:\Program Files\");
        assert_eq!(words[1].start, 20);
    }

    #[test]
    fn test_spans_reconstruct_line() {
        let lines = [
            r#"exe a b "c d" 'e f` g\ h)"#,
            r#"git   commit -m "fix \"it\"" && dir"#,
            "\t cd  src  ",
            r#"exe "the crazy \\""\\" quotes""#,
        ];
        for line in lines {
            let chars: Vec<char> = line.chars().collect();
            let mut last_end = 0;
            for word in tokenize(line) {
                let (start, end) = word.span();
                assert!(start >= last_end, "{line:?}: overlapping spans");
                assert!(chars[last_end..start].iter().all(|c| is_blank(*c)));
                let raw: String = chars[start..end].iter().collect();
                assert_eq!(raw, word.original_text);
                last_end = end;
            }
            assert_eq!(last_end.max(chars.len()), chars.len());
        }
    }

    #[test]
    fn test_word_index_at() {
        let words = tokenize("git commit -m");
        assert_eq!(word_index_at(&words, 0), Some(0));
        assert_eq!(word_index_at(&words, 3), Some(0));
        assert_eq!(word_index_at(&words, 4), Some(1));
        assert_eq!(word_index_at(&words, 12), Some(2));
        assert_eq!(word_index_at(&words, 99), Some(2));
    }

    #[test]
    fn test_quote_for_reinsertion() {
        assert_eq!(quote_for_reinsertion("plain"), "plain");
        assert_eq!(quote_for_reinsertion(r"c:\dir\"), r"c:\dir\");
        assert_eq!(quote_for_reinsertion(""), r#""""#);
        assert_eq!(quote_for_reinsertion("a b"), r#""a b""#);
        assert_eq!(quote_for_reinsertion(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote_for_reinsertion(r"my dir\"), r#""my dir\\""#);
        assert_eq!(quote_for_reinsertion(r#"a\"b"#), r#""a\\\"b""#);
        assert_eq!(quote_for_reinsertion(r"a b\c"), r#""a b\c""#);
    }

    #[test]
    fn test_quoting_round_trips_through_tokenize() {
        let samples = [
            "",
            "plain",
            "two words",
            r"trailing\",
            r"dir with space\",
            r#"quote"inside"#,
            r#"\"escaped"#,
            r#"a""b"#,
            r"\\\\",
            "tab\there",
            "ünïcode dïr",
        ];
        for sample in samples {
            let line = format!("exe {}", quote_for_reinsertion(sample));
            let words = tokenize(&line);
            assert_eq!(words.len(), 2, "{line:?}");
            assert_eq!(words[1].deescaped_text, sample, "{line:?}");
        }
    }

    #[test]
    fn test_split_on_command_separators() {
        let words = tokenize("cd src && git status || echo failed & dir");
        let commands = split_on_command_separators(&words);
        let texts: Vec<Vec<&str>> = commands
            .iter()
            .map(|c| c.iter().map(|w| w.original_text.as_str()).collect())
            .collect();
        assert_eq!(
            texts,
            vec![
                vec!["cd", "src"],
                vec!["git", "status"],
                vec!["echo", "failed"],
                vec!["dir"]
            ]
        );
    }

    #[test]
    fn test_split_quoted_separator_is_not_a_separator() {
        let words = tokenize(r#"echo "&&" x"#);
        assert_eq!(split_on_command_separators(&words).len(), 1);
    }

    #[test]
    fn test_command_containing() {
        let words = tokenize("cd src && git status || echo failed & dir");
        let (command, index) = command_containing(&words, 7).unwrap();
        assert_eq!(command.len(), 2);
        assert_eq!(command[0].original_text, "echo");
        assert_eq!(index, 1);
        assert_eq!(command[index].start, 29);

        let (command, index) = command_containing(&words, 9).unwrap();
        assert_eq!(command[0].original_text, "dir");
        assert_eq!(index, 0);

        let (command, index) = command_containing(&words, 1).unwrap();
        assert_eq!(command.len(), 2);
        assert_eq!(index, 1);

        assert_eq!(command_containing(&words, 5), None);
        assert_eq!(command_containing(&words, 10), None);
    }

    #[test]
    fn test_command_containing_ignores_quoted_separator() {
        let words = tokenize(r#"echo "&&" x"#);
        let (command, index) = command_containing(&words, 2).unwrap();
        assert_eq!(command.len(), 3);
        assert_eq!(index, 2);
    }
}
