//! Behavior text validation
//!
//! Checks each line of an output port's behavior against the port's symbol
//! table and collects every finding; nothing short-circuits, so an editor can
//! underline all problems after a single keystroke.
//!
//! # Statements
//!
//! ```text
//! # comment            // comment
//! forward <input>[, <input>]*
//! set <Type>.<value> = <expr>
//! ```
//!
//! `<expr>` is built from `TRUE`, `FALSE`, `!`, `&&`, `||`, parentheses and
//! terms `input.Type.value`.

use crate::config::{CatalogPolicy, ValidatorConfig};
use crate::context::PortContext;
use crate::diagnostic::{Diagnostic, DiagnosticKind, StatementKind};
use crate::error::BehaviorError;
use crate::scan::{self, Statement};
use dfd_model::{AvailableInputs, LabelType, LabelTypeCatalog};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Match, Regex};
use std::ops::Range;

static SET_STATEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^set\s+(?P<type>[A-Za-z0-9_]+)\.(?P<value>[A-Za-z0-9_]+)\s*=",
        r"(?P<expr>(?:\s|!|TRUE|FALSE|\|\||&&|\(|\)|[A-Za-z0-9_]+\.[A-Za-z0-9_]+\.[A-Za-z0-9_]+)*)$",
    ))
    .expect("set statement pattern compiles")
});

static TERM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<input>[A-Za-z0-9_]+)\.(?P<type>[A-Za-z0-9_]+)\.(?P<value>[A-Za-z0-9_]+)")
        .expect("term pattern compiles")
});

/// Validator for output port behavior text
///
/// Stateless apart from its configuration; one instance can serve any number
/// of ports and threads.
#[derive(Debug, Clone, Default)]
pub struct BehaviorValidator {
    config: ValidatorConfig,
}

impl BehaviorValidator {
    /// Create validator with default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create validator with explicit configuration
    #[inline]
    #[must_use]
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate behavior text against a port context
    ///
    /// # Errors
    /// Only when the context cannot produce the port's symbol table; problems
    /// in `text` are returned as diagnostics.
    pub fn validate<C>(&self, text: &str, context: &C) -> Result<Vec<Diagnostic>, BehaviorError>
    where
        C: PortContext + ?Sized,
    {
        let inputs = context.available_inputs()?;
        Ok(self.validate_with(text, &inputs, context.label_types()))
    }

    /// Validate behavior text against an explicit symbol table
    #[must_use]
    pub fn validate_with(
        &self,
        text: &str,
        inputs: &AvailableInputs,
        catalog: Option<&LabelTypeCatalog>,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut line_count = 0;

        for (number, raw) in scan::lines(text) {
            line_count += 1;
            let statement = scan::classify(raw, &self.config.comment_prefixes);
            tracing::trace!("Line {}: {:?}", number, statement);

            let mut check = LineCheck {
                raw,
                number,
                inputs,
                catalog,
                policy: self.config.catalog_policy,
                out: &mut diagnostics,
            };
            match statement {
                Statement::Blank | Statement::Comment => {}
                Statement::Forward(args_start) => check.forward(args_start),
                Statement::Set(start) => check.set(start),
                Statement::Other => check.whole_line(DiagnosticKind::UnknownStatement, "Unknown statement"),
            }
        }

        tracing::debug!("Validated {} lines: {} diagnostics", line_count, diagnostics.len());
        diagnostics
    }
}

enum TypeLookup<'c> {
    Found(&'c LabelType),
    Missing,
    Unchecked,
}

/// Checks for one line, appending to the shared diagnostic list
struct LineCheck<'a> {
    raw: &'a str,
    number: usize,
    inputs: &'a AvailableInputs,
    catalog: Option<&'a LabelTypeCatalog>,
    policy: CatalogPolicy,
    out: &'a mut Vec<Diagnostic>,
}

impl<'a> LineCheck<'a> {
    fn push(&mut self, kind: DiagnosticKind, message: String, bytes: Range<usize>) {
        let columns = scan::char_span(self.raw, bytes);
        self.out.push(Diagnostic::new(kind, message, self.number, columns));
    }

    fn whole_line(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let columns = scan::line_span(self.raw);
        self.out.push(Diagnostic::new(kind, message, self.number, columns));
    }

    /// One diagnostic per boundary-safe occurrence of `name`, or one for the
    /// whole line if it cannot be located
    fn push_occurrences(&mut self, kind: DiagnosticKind, message: &str, name: &str, from: usize) {
        let found = scan::token_occurrences(self.raw, name, from);
        if found.is_empty() {
            self.whole_line(kind, message);
        }
        for range in found {
            self.push(kind, message.to_string(), range);
        }
    }

    fn forward(&mut self, args_start: usize) {
        let raw = self.raw;
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for name in raw[args_start..].split(',').map(str::trim).filter(|n| !n.is_empty()) {
            *counts.entry(name).or_default() += 1;
        }

        if counts.is_empty() {
            self.whole_line(DiagnosticKind::EmptyForward, "forward needs at least one input");
            return;
        }

        let duplicates: Vec<&str> = counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(name, _)| *name)
            .collect();
        if !duplicates.is_empty() {
            for name in duplicates {
                let message = format!("duplicate input: {name}");
                self.push_occurrences(DiagnosticKind::DuplicateInput, &message, name, args_start);
            }
            return;
        }

        for name in counts.keys() {
            if !self.inputs.contains(name) {
                let message = format!("invalid/unknown input: {name}");
                let kind = DiagnosticKind::UnknownInput {
                    statement: StatementKind::Forward,
                };
                self.push_occurrences(kind, &message, name, args_start);
            }
        }
    }

    fn set(&mut self, start: usize) {
        let raw = self.raw;
        let Some(caps) = SET_STATEMENT.captures(&raw[start..]) else {
            self.whole_line(DiagnosticKind::InvalidSet, "invalid set statement");
            return;
        };
        let (Some(target_type), Some(target_value)) = (caps.name("type"), caps.name("value")) else {
            self.whole_line(DiagnosticKind::InvalidSet, "invalid set statement");
            return;
        };
        let (expr_start, expr) = caps
            .name("expr")
            .map_or((raw.len(), ""), |m| (start + m.start(), m.as_str()));

        self.label_reference(start, target_type, target_value);
        self.parentheses(expr_start, expr);

        if expr.trim().is_empty() {
            self.whole_line(DiagnosticKind::MissingExpression, "missing expression");
            return;
        }

        for term in TERM.captures_iter(expr) {
            let (Some(input), Some(ty), Some(value)) = (term.name("input"), term.name("type"), term.name("value"))
            else {
                continue;
            };
            if !self.inputs.contains(input.as_str()) {
                let kind = DiagnosticKind::UnknownInput {
                    statement: StatementKind::Set,
                };
                let message = format!("invalid/unknown input: {}", input.as_str());
                self.push(kind, message, expr_start + input.start()..expr_start + input.end());
            }
            self.label_reference(expr_start, ty, value);
        }
    }

    /// Check a `Type.value` pair whose matches are relative to `base`
    fn label_reference(&mut self, base: usize, ty: Match<'_>, value: Match<'_>) {
        match self.lookup(ty.as_str()) {
            TypeLookup::Found(label_type) => {
                if !label_type.has_value(value.as_str()) {
                    let message = format!(
                        "unknown label value of label type {}: {}",
                        ty.as_str(),
                        value.as_str()
                    );
                    self.push(
                        DiagnosticKind::UnknownLabelValue,
                        message,
                        base + value.start()..base + value.end(),
                    );
                }
            }
            TypeLookup::Missing => {
                let message = format!("unknown label type: {}", ty.as_str());
                self.push(DiagnosticKind::UnknownLabelType, message, base + ty.start()..base + ty.end());
            }
            TypeLookup::Unchecked => {}
        }
    }

    fn lookup(&self, name: &str) -> TypeLookup<'a> {
        match (self.catalog, self.policy) {
            (Some(catalog), _) => catalog.find(name).map_or(TypeLookup::Missing, TypeLookup::Found),
            (None, CatalogPolicy::ReportUnknown) => TypeLookup::Missing,
            (None, CatalogPolicy::Skip) => TypeLookup::Unchecked,
        }
    }

    fn parentheses(&mut self, expr_start: usize, expr: &str) {
        let mut depth = 0usize;
        for (offset, c) in expr.char_indices() {
            match c {
                '(' => depth += 1,
                ')' if depth == 0 => {
                    let at = expr_start + offset;
                    self.push(
                        DiagnosticKind::MissingOpeningParenthesis,
                        "missing opening parenthesis".to_string(),
                        at..at + 1,
                    );
                }
                ')' => depth -= 1,
                _ => {}
            }
        }
        if depth > 0 {
            self.whole_line(DiagnosticKind::MissingClosingParenthesis, "missing closing parenthesis");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfd_model::LabelValue;

    fn catalog() -> LabelTypeCatalog {
        LabelTypeCatalog::from_types(vec![
            LabelType::with_id("t1", "Sensitivity")
                .value(LabelValue::with_id("v1", "Low"))
                .value(LabelValue::with_id("v2", "High")),
            LabelType::with_id("t2", "Location").value(LabelValue::with_id("v3", "EU")),
        ])
        .unwrap()
    }

    fn validate(text: &str, inputs: &[&str]) -> Vec<Diagnostic> {
        let catalog = catalog();
        BehaviorValidator::new().validate_with(text, &AvailableInputs::from_names(inputs.iter().copied()), Some(&catalog))
    }

    fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        assert!(validate("# a comment\n\n   \n// another\n  # indented", &[]).is_empty());
    }

    #[test]
    fn unknown_statement_spans_line() {
        let d = validate("forward a\ndrop a", &["a"]);
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].message, "Unknown statement");
        assert_eq!(d[0].kind, DiagnosticKind::UnknownStatement);
        assert_eq!((d[0].line, d[0].columns()), (1, 0..6));
    }

    #[test]
    fn forward_valid_inputs() {
        assert!(validate("forward a, b", &["a", "b"]).is_empty());
        assert!(validate("forward a,b ,  c", &["a", "b", "c"]).is_empty());
    }

    #[test]
    fn forward_without_inputs() {
        for text in ["forward", "forward   ", "forward , ,"] {
            let d = validate(text, &["a"]);
            assert_eq!(messages(&d), vec!["forward needs at least one input"], "{text}");
            assert_eq!(d[0].kind, DiagnosticKind::EmptyForward);
        }
    }

    #[test]
    fn forward_duplicates_report_each_occurrence() {
        let d = validate("forward a, a", &["a"]);
        assert_eq!(messages(&d), vec!["duplicate input: a", "duplicate input: a"]);
        assert_eq!(d[0].columns(), 8..9);
        assert_eq!(d[1].columns(), 11..12);
    }

    #[test]
    fn duplicates_suppress_unknown_input_check() {
        let d = validate("forward x, b, x", &["b"]);
        assert_eq!(messages(&d), vec!["duplicate input: x", "duplicate input: x"]);
    }

    #[test]
    fn forward_unknown_input() {
        let d = validate("forward a, ghost", &["a"]);
        assert_eq!(messages(&d), vec!["invalid/unknown input: ghost"]);
        assert_eq!(d[0].columns(), 11..16);
        assert_eq!(
            d[0].kind,
            DiagnosticKind::UnknownInput {
                statement: StatementKind::Forward
            }
        );
    }

    #[test]
    fn forward_substring_names_do_not_collide() {
        assert!(validate("forward test", &["te", "test"]).is_empty());
        let d = validate("forward test, te", &["test"]);
        assert_eq!(messages(&d), vec!["invalid/unknown input: te"]);
        assert_eq!(d[0].columns(), 14..16);
    }

    #[test]
    fn unlabeled_inputs_never_match() {
        let inputs = AvailableInputs::new(vec![None, Some("a".into())]);
        let d = BehaviorValidator::new().validate_with("forward undefined, a", &inputs, None);
        assert_eq!(messages(&d), vec!["invalid/unknown input: undefined"]);
    }

    #[test]
    fn set_valid_statement() {
        assert!(validate("set Sensitivity.High = a.Sensitivity.High", &["a"]).is_empty());
        assert!(validate(
            "set Sensitivity.Low = !(a.Sensitivity.High || b.Location.EU) && TRUE",
            &["a", "b"]
        )
        .is_empty());
        assert!(validate("set Sensitivity.High = FALSE", &[]).is_empty());
    }

    #[test]
    fn set_grammar_violations() {
        for text in [
            "set Sensitivity = TRUE",
            "set Sensitivity.High TRUE",
            "set Sensitivity.High = a.b",
            "set Sensitivity.High = yes",
            "set Sensitivity.High = a.Sensitivity.High + 1",
        ] {
            let d = validate(text, &["a"]);
            assert_eq!(messages(&d), vec!["invalid set statement"], "{text}");
            assert_eq!(d[0].columns(), 0..text.len());
        }
    }

    #[test]
    fn set_unknown_target() {
        let d = validate("set Foo.Bar = TRUE", &[]);
        assert_eq!(messages(&d), vec!["unknown label type: Foo"]);
        assert_eq!(d[0].columns(), 4..7);

        let d = validate("set Sensitivity.Medium = TRUE", &[]);
        assert_eq!(messages(&d), vec!["unknown label value of label type Sensitivity: Medium"]);
        assert_eq!(d[0].columns(), 16..22);
    }

    #[test]
    fn set_unknown_references_in_expression() {
        let d = validate(
            "set Sensitivity.High = b.Sensitivity.High && a.Color.Red || a.Location.US",
            &["a"],
        );
        assert_eq!(
            messages(&d),
            vec![
                "invalid/unknown input: b",
                "unknown label type: Color",
                "unknown label value of label type Location: US",
            ]
        );
        assert_eq!(d[0].columns(), 23..24);
        assert_eq!(
            d[0].kind,
            DiagnosticKind::UnknownInput {
                statement: StatementKind::Set
            }
        );
        assert_eq!(d[1].columns(), 47..52);
        assert_eq!(d[2].columns(), 71..73);
    }

    #[test]
    fn set_input_substring_does_not_collide() {
        let d = validate("set Sensitivity.High = test.Sensitivity.High", &["te"]);
        assert_eq!(messages(&d), vec!["invalid/unknown input: test"]);
        assert!(validate("set Sensitivity.High = test.Sensitivity.High", &["te", "test"]).is_empty());
    }

    #[test]
    fn set_parentheses() {
        let d = validate("set Sensitivity.High = (a.Sensitivity.High", &["a"]);
        assert_eq!(messages(&d), vec!["missing closing parenthesis"]);

        let d = validate("set Sensitivity.High = a.Sensitivity.High) && TRUE)", &["a"]);
        assert_eq!(
            messages(&d),
            vec!["missing opening parenthesis", "missing opening parenthesis"]
        );
        assert_eq!(d[0].columns(), 41..42);
        assert_eq!(d[1].columns(), 50..51);
    }

    #[test]
    fn set_missing_expression() {
        for text in ["set Sensitivity.High =", "set Sensitivity.High =   "] {
            let d = validate(text, &[]);
            assert_eq!(messages(&d), vec!["missing expression"], "{text:?}");
        }
    }

    #[test]
    fn all_findings_on_a_line_are_collected() {
        let d = validate("set Foo.Bar = (x.Foo.Bar", &[]);
        assert_eq!(
            messages(&d),
            vec![
                "unknown label type: Foo",
                "missing closing parenthesis",
                "invalid/unknown input: x",
                "unknown label type: Foo",
            ]
        );
    }

    #[test]
    fn diagnostics_are_ordered_by_line() {
        let d = validate("forward ghost\n# ok\nset Foo.Bar = TRUE\nnope", &[]);
        let lines: Vec<usize> = d.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![0, 2, 3]);
    }

    #[test]
    fn indented_statements_keep_raw_columns() {
        let d = validate("   set Foo.Bar = TRUE", &[]);
        assert_eq!(d[0].columns(), 7..10);
        let d = validate("\tforward a, a", &["a"]);
        assert_eq!(d[0].columns(), 9..10);
    }

    #[test]
    fn windows_line_endings() {
        assert!(validate("forward a\r\nset Sensitivity.Low = TRUE\r\n", &["a"]).is_empty());
    }

    #[test]
    fn missing_catalog_policies() {
        let inputs = AvailableInputs::from_names(["a"]);
        let text = "set Sensitivity.High = a.Sensitivity.High";

        let d = BehaviorValidator::new().validate_with(text, &inputs, None);
        assert_eq!(
            messages(&d),
            vec!["unknown label type: Sensitivity", "unknown label type: Sensitivity"]
        );

        let skip = ValidatorConfig::new().with_catalog_policy(CatalogPolicy::Skip);
        assert!(BehaviorValidator::with_config(skip).validate_with(text, &inputs, None).is_empty());
    }

    #[test]
    fn custom_comment_prefix() {
        let config = ValidatorConfig::new().with_comment_prefixes([";"]);
        let validator = BehaviorValidator::with_config(config);
        let d = validator.validate_with("; note\n# not a comment", &AvailableInputs::default(), None);
        assert_eq!(messages(&d), vec!["Unknown statement"]);
        assert_eq!(d[0].line, 1);
    }
}
