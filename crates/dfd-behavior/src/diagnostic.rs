//! Validation findings
//!
//! A [`Diagnostic`] points at a character range of one line. Malformed
//! behavior text is an expected condition, so every problem is reported as
//! a diagnostic and never as an error.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::ops::Range;

/// Statement a reference error was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatementKind {
    /// `forward` statement
    Forward,
    /// `set` statement
    Set,
}

/// Classification of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// Line is neither blank, comment, `forward` nor `set`
    UnknownStatement,
    /// `set` line does not follow the statement grammar
    InvalidSet,
    /// `forward` without any input
    EmptyForward,
    /// Same input forwarded more than once
    DuplicateInput,
    /// Reference to an input that is not available
    UnknownInput {
        /// Statement the reference appears in
        statement: StatementKind,
    },
    /// Reference to a label type missing from the catalog
    UnknownLabelType,
    /// Reference to a value its label type does not have
    UnknownLabelValue,
    /// `)` without matching `(`
    MissingOpeningParenthesis,
    /// `(` never closed
    MissingClosingParenthesis,
    /// Nothing after `=`
    MissingExpression,
}

/// A finding in behavior text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Human-readable message
    pub message: String,
    /// 0-based line number
    pub line: usize,
    /// 0-based start column, in characters
    pub col_start: usize,
    /// Exclusive end column, in characters
    pub col_end: usize,
    /// Classification
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Create diagnostic spanning `columns` of `line`
    #[inline]
    #[must_use]
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, line: usize, columns: Range<usize>) -> Self {
        Self {
            message: message.into(),
            line,
            col_start: columns.start,
            col_end: columns.end,
            kind,
        }
    }

    /// Column range
    #[inline]
    #[must_use]
    pub fn columns(&self) -> Range<usize> {
        self.col_start..self.col_end
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line + 1, self.col_start + 1, self.message)
    }
}
