//! Identifier conventions shared by the catalog, the validator and the refactorer
//!
//! Label type names, label value texts and the segments of expression atoms
//! are runs of ASCII letters, ASCII digits and `_`.

/// Whether `c` may appear inside an identifier
#[inline]
#[must_use]
pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether `s` is a non-empty identifier
#[inline]
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_ident_char)
}
