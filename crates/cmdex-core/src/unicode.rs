//! Rune-indexed string helpers.
//!
//! Every offset the editor hands around (cursor, word spans, completion spans)
//! counts Unicode scalar values, not bytes. These helpers translate between the
//! two so the rest of the crate can keep its text in plain `String`s.

/// Number of scalar values in `s`.
pub fn rune_count(s: &str) -> usize {
    s.chars().count()
}

/// Slice `s` by rune offsets `[start, end)`. Out-of-range offsets clamp to the
/// end of the string and an inverted range yields `""`.
pub fn rune_slice(s: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let start_byte = byte_index_from_rune_index(s, start);
    let end_byte = byte_index_from_rune_index(s, end);
    &s[start_byte..end_byte]
}

/// Byte offset of the rune at `rune_index`, or `s.len()` past the end.
pub fn byte_index_from_rune_index(s: &str, rune_index: usize) -> usize {
    s.char_indices()
        .nth(rune_index)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(s.len())
}

/// Replace runes `[start, end)` of `s` with `replacement`.
pub fn replace_rune_range(s: &mut String, start: usize, end: usize, replacement: &str) {
    let start_byte = byte_index_from_rune_index(s, start);
    let end_byte = byte_index_from_rune_index(s, end.max(start));
    s.replace_range(start_byte..end_byte, replacement);
}
