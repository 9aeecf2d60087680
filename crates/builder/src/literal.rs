//! Quoting of string literals and normalisation of attribute names.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How string literals are delimited inside predicate clauses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LiteralPolicy {
    /// Single quotes, or double quotes when the value itself contains a single
    /// quote. A value holding both quote characters is still double-quoted,
    /// which breaks the query; the builder records a
    /// [`BuildIssue::AmbiguousLiteral`](crate::BuildIssue::AmbiguousLiteral).
    #[default]
    Preserve,
    /// Same as [`LiteralPolicy::Preserve`] for ordinary values. Values holding
    /// both quote characters are split into a `concat(...)` call.
    Concat,
}

/// Result of quoting a literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedLiteral {
    pub text: String,
    pub ambiguous: bool,
}

impl QuotedLiteral {
    fn clean(text: String) -> Self {
        Self { text, ambiguous: false }
    }
}

pub fn quote_literal(value: &str, policy: LiteralPolicy) -> QuotedLiteral {
    let has_apostrophe = value.contains('\'');
    let has_quote = value.contains('"');
    match (has_apostrophe, has_quote, policy) {
        (false, _, _) => QuotedLiteral::clean(format!("'{value}'")),
        (true, false, _) => QuotedLiteral::clean(format!("\"{value}\"")),
        (true, true, LiteralPolicy::Preserve) => {
            QuotedLiteral { text: format!("\"{value}\""), ambiguous: true }
        }
        (true, true, LiteralPolicy::Concat) => QuotedLiteral::clean(concat_literal(value)),
    }
}

/// Splits `value` on apostrophes and glues the pieces back together with
/// `concat()`. Only called for values containing both quote characters, so
/// the call always has at least two arguments.
fn concat_literal(value: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (index, piece) in value.split('\'').enumerate() {
        if index > 0 {
            parts.push("\"'\"".to_owned());
        }
        if !piece.is_empty() {
            parts.push(format!("'{piece}'"));
        }
    }
    format!("concat({})", parts.join(","))
}

/// Prefixes `name` with `@` unless it already carries one.
pub fn attribute_name(name: &str) -> Cow<'_, str> {
    if name.starts_with('@') { Cow::Borrowed(name) } else { Cow::Owned(format!("@{name}")) }
}

/// Formats a number the way it appears in a comparison clause: integral values
/// without a fractional part, everything else in shortest round-trip form.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value.is_sign_positive() { "INF".to_owned() } else { "-INF".to_owned() }
    } else {
        format!("{value}")
    }
}
