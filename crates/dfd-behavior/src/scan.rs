//! Line splitting, statement classification and boundary-safe search
//!
//! Offsets are byte offsets into a single line until they are turned into
//! diagnostic columns by [`char_span`].

use dfd_model::is_ident_char;
use std::ops::Range;

/// Keyword of forward statements
pub(crate) const FORWARD: &str = "forward";

/// Keyword of set statements
pub(crate) const SET: &str = "set";

/// Kind of a behavior line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Statement {
    Blank,
    Comment,
    /// Arguments start at the contained byte offset
    Forward(usize),
    /// Statement text starts at the contained byte offset
    Set(usize),
    Other,
}

/// Lines of a behavior text with their 0-based numbers, `\r` stripped
pub(crate) fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
}

/// Byte length of leading whitespace
pub(crate) fn indent(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Offset just past `keyword` if the line starts with it as a whole word
pub(crate) fn keyword_end(line: &str, keyword: &str) -> Option<usize> {
    let start = indent(line);
    let rest = &line[start..];
    if !rest.starts_with(keyword) {
        return None;
    }
    let end = start + keyword.len();
    match line[end..].chars().next() {
        Some(c) if is_ident_char(c) => None,
        _ => Some(end),
    }
}

pub(crate) fn classify(line: &str, comment_prefixes: &[String]) -> Statement {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Statement::Blank
    } else if comment_prefixes.iter().any(|p| !p.is_empty() && trimmed.starts_with(p.as_str())) {
        Statement::Comment
    } else if let Some(end) = keyword_end(line, FORWARD) {
        Statement::Forward(end)
    } else if keyword_end(line, SET).is_some() {
        Statement::Set(indent(line))
    } else {
        Statement::Other
    }
}

/// Character before byte offset `at`
pub(crate) fn char_before(line: &str, at: usize) -> Option<char> {
    line[..at].chars().next_back()
}

/// Character at byte offset `at`
pub(crate) fn char_at(line: &str, at: usize) -> Option<char> {
    line[at..].chars().next()
}

/// Occurrences of `needle` at or after `from` that are not part of a longer
/// identifier
///
/// The characters immediately before and after a match must not be
/// identifier characters, so `te` is not found inside `test`.
pub(crate) fn token_occurrences(line: &str, needle: &str, from: usize) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    if needle.is_empty() {
        return found;
    }
    let mut pos = from;
    while let Some(offset) = line[pos..].find(needle) {
        let start = pos + offset;
        let end = start + needle.len();
        let before_ok = !char_before(line, start).is_some_and(is_ident_char);
        let after_ok = !char_at(line, end).is_some_and(is_ident_char);
        if before_ok && after_ok {
            found.push(start..end);
            pos = end;
        } else {
            pos = start + char_at(line, start).map_or(1, char::len_utf8);
        }
        if pos >= line.len() {
            break;
        }
    }
    found
}

/// Convert a byte range of `line` into a character column range
pub(crate) fn char_span(line: &str, range: Range<usize>) -> Range<usize> {
    let start = line[..range.start].chars().count();
    start..start + line[range].chars().count()
}

/// Character column range covering the whole line
pub(crate) fn line_span(line: &str) -> Range<usize> {
    0..line.chars().count()
}
