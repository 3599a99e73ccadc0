//! Rename propagation into behavior text
//!
//! When a label type, a label value or an input is renamed elsewhere in the
//! diagram, every behavior referencing it has to follow. The rewrite is
//! positional: a name is only replaced where the statement grammar puts a
//! reference of that kind, so an input that happens to share its name with
//! a label type is left alone.
//!
//! | reference   | `set` target        | expression term        | `forward` list |
//! |-------------|---------------------|------------------------|----------------|
//! | label type  | `set Type.value`    | `input.Type.value`     | -              |
//! | label value | `set Type.value`    | `input.Type.value`     | -              |
//! | input       | -                   | `input.Type.value`     | `forward input`|

use crate::scan::{self, FORWARD, SET};
use dfd_model::{is_ident_char, InputRename, LabelRenames, LabelTypeRename, LabelValueRename};
use std::borrow::Cow;

/// New behavior text for one port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorUpdate<K> {
    /// Port the text belongs to
    pub port: K,
    /// Rewritten behavior text
    pub behavior: String,
}

/// Rewrites behavior text after renames
#[derive(Debug, Clone, Copy, Default)]
pub struct BehaviorRefactorer;

impl BehaviorRefactorer {
    /// Create refactorer
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Apply label type and label value renames
    ///
    /// Only `set` lines change. Type renames are applied first, all at once,
    /// then value renames. A value rename may name its type by the old or the
    /// new name of a type renamed in the same batch.
    #[must_use]
    pub fn apply_label_rename(
        &self,
        text: &str,
        type_renames: &[LabelTypeRename],
        value_renames: &[LabelValueRename],
    ) -> String {
        let type_rules: Vec<(&str, &str)> = type_renames
            .iter()
            .filter(|r| r.old_name != r.new_name)
            .map(|r| (r.old_name.as_str(), r.new_name.as_str()))
            .collect();
        let value_rules: Vec<(String, String)> = value_renames
            .iter()
            .filter(|r| r.old_text != r.new_text)
            .map(|r| {
                let type_name = current_type_name(r, type_renames);
                (format!("{type_name}.{}", r.old_text), format!("{type_name}.{}", r.new_text))
            })
            .collect();

        if type_rules.is_empty() && value_rules.is_empty() {
            return text.to_string();
        }
        tracing::debug!(
            "Applying {} label type and {} label value renames",
            type_rules.len(),
            value_rules.len()
        );

        let value_rules: Vec<(&str, &str)> = value_rules.iter().map(|(o, n)| (o.as_str(), n.as_str())).collect();
        map_lines(text, |line| {
            let Some(body) = scan::keyword_end(line, SET) else {
                return Cow::Borrowed(line);
            };
            let expr_start = line[body..].find('=').map_or(line.len(), |i| body + i + 1);
            let target = body + scan::indent(&line[body..]);

            let line = rewrite(line, body, &type_rules, |start, before, after| {
                after == Some('.') && (start == target || (start >= expr_start && before == Some('.')))
            });
            let line = rewrite(&line, body, &value_rules, |_, before, after| {
                !before.is_some_and(is_ident_char) && !after.is_some_and(|c| is_ident_char(c) || c == '.')
            })
            .into_owned();
            Cow::Owned(line)
        })
    }

    /// Apply every rename of a catalog diff
    #[must_use]
    pub fn apply_label_renames(&self, text: &str, renames: &LabelRenames) -> String {
        self.apply_label_rename(text, &renames.types, &renames.values)
    }

    /// Apply an input rename
    ///
    /// `forward` entries equal to `old` are replaced, keeping their
    /// surrounding whitespace; in `set` lines only the input segment of
    /// expression terms is replaced.
    #[must_use]
    pub fn apply_input_rename(&self, text: &str, old: &str, new: &str) -> String {
        let old = old.trim();
        let new = new.trim();
        if old.is_empty() || old == new {
            return text.to_string();
        }
        tracing::debug!("Applying input rename {} -> {}", old, new);

        let rules = [(old, new)];
        map_lines(text, |line| {
            if let Some(args) = scan::keyword_end(line, FORWARD) {
                return rename_forward_entry(line, args, old, new);
            }
            let Some(body) = scan::keyword_end(line, SET) else {
                return Cow::Borrowed(line);
            };
            let Some(eq) = line[body..].find('=') else {
                return Cow::Borrowed(line);
            };
            rewrite(line, body + eq + 1, &rules, |_, before, after| {
                after == Some('.') && !before.is_some_and(|c| is_ident_char(c) || c == '.')
            })
        })
    }

    /// Label renames for a set of ports, keeping only ports whose text changed
    pub fn label_rename_updates<K, I, S>(&self, ports: I, renames: &LabelRenames) -> Vec<BehaviorUpdate<K>>
    where
        I: IntoIterator<Item = (K, S)>,
        S: AsRef<str>,
    {
        collect_updates(ports, |text| self.apply_label_renames(text, renames))
    }

    /// Input rename for a set of ports, keeping only ports whose text changed
    pub fn input_rename_updates<K, I, S>(&self, ports: I, rename: &InputRename) -> Vec<BehaviorUpdate<K>>
    where
        I: IntoIterator<Item = (K, S)>,
        S: AsRef<str>,
    {
        collect_updates(ports, |text| {
            self.apply_input_rename(text, &rename.old_name, &rename.new_name)
        })
    }
}

fn collect_updates<K, I, S>(ports: I, apply: impl Fn(&str) -> String) -> Vec<BehaviorUpdate<K>>
where
    I: IntoIterator<Item = (K, S)>,
    S: AsRef<str>,
{
    ports
        .into_iter()
        .filter_map(|(port, text)| {
            let text = text.as_ref();
            let behavior = apply(text);
            (behavior != text).then_some(BehaviorUpdate { port, behavior })
        })
        .collect()
}

/// Type name a value rename refers to after the batch's type renames
fn current_type_name<'r>(rename: &'r LabelValueRename, type_renames: &'r [LabelTypeRename]) -> &'r str {
    type_renames
        .iter()
        .find(|t| t.label_type_id == rename.label_type_id && t.old_name == rename.label_type_name)
        .map_or(rename.label_type_name.as_str(), |t| t.new_name.as_str())
}

/// Rewrite each line, preserving line breaks
fn map_lines<'t>(text: &'t str, mut f: impl FnMut(&'t str) -> Cow<'t, str>) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&f(line));
    }
    out
}

/// Replace accepted occurrences of any rule's needle at or after `from`
///
/// All rules are matched against the original line, so `A -> B` and
/// `B -> A` in one batch swap names instead of collapsing them. `accept`
/// receives the match start, the characters around the match and decides
/// whether the occurrence is a reference of the right kind.
fn rewrite<'l>(
    line: &'l str,
    from: usize,
    rules: &[(&str, &str)],
    accept: impl Fn(usize, Option<char>, Option<char>) -> bool,
) -> Cow<'l, str> {
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut pos = from;

    while pos < line.len() {
        let hit = rules.iter().find(|(old, _)| {
            !old.is_empty()
                && line[pos..].starts_with(old)
                && accept(pos, scan::char_before(line, pos), scan::char_at(line, pos + old.len()))
        });
        if let Some((old, new)) = hit {
            let buf = out.get_or_insert_with(|| String::with_capacity(line.len()));
            buf.push_str(&line[copied..pos]);
            buf.push_str(new);
            pos += old.len();
            copied = pos;
        } else {
            pos += scan::char_at(line, pos).map_or(1, char::len_utf8);
        }
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&line[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(line),
    }
}

fn rename_forward_entry<'l>(line: &'l str, args: usize, old: &str, new: &str) -> Cow<'l, str> {
    if !line[args..].split(',').any(|entry| entry.trim() == old) {
        return Cow::Borrowed(line);
    }
    let entries: Vec<String> = line[args..]
        .split(',')
        .map(|entry| {
            if entry.trim() == old {
                let lead = entry.len() - entry.trim_start().len();
                let trail = entry.trim_end().len();
                format!("{}{new}{}", &entry[..lead], &entry[trail..])
            } else {
                entry.to_string()
            }
        })
        .collect();
    Cow::Owned(format!("{}{}", &line[..args], entries.join(",")))
}
