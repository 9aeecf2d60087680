//! The fluent XPath expression builder.
//!
//! An [`XPathExpression`] collects predicate clauses and path segments for a
//! single tag and renders them into query text:
//!
//! ```
//! use xpathkit_builder::{Placement, XPathExpression};
//!
//! let email = XPathExpression::from("input").where_attribute("type", "email");
//! assert_eq!(email.render(), "//input[@type='email']");
//!
//! let logo_link = XPathExpression::from("a").where_child(
//!     XPathExpression::from("img").where_attribute_contains("src", "logo"),
//!     Placement::Predicate,
//! );
//! assert_eq!(logo_link.render(), "//a[./child::img[contains(@src,'logo')]]");
//! ```
//!
//! Builders never fail. Malformed input (a trailing `and`/`or`, a literal
//! holding both quote characters) is rendered verbatim by [`XPathExpression::render`]
//! and reported by [`XPathExpression::try_render`].

use crate::axis::{Axis, Placement, StepTarget};
use crate::error::{BuildIssue, RenderError};
use crate::literal::{LiteralPolicy, attribute_name, format_number, quote_literal};
use crate::predicate::{Connective, PredicateQueue, PredicateToken};
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

/// Prefix of the rooted rendering: select the tag anywhere in the document.
pub const ROOT_PREFIX: &str = "//";

/// Marker text probed by the sentinel text predicates.
pub const TEXT_SENTINEL: &str = "(default)";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XPathExpression {
    tag_name: String,
    predicates: PredicateQueue,
    path: Vec<String>,
    issues: Vec<BuildIssue>,
    literal_policy: LiteralPolicy,
}

impl From<&str> for XPathExpression {
    fn from(tag_name: &str) -> Self {
        Self::new(tag_name)
    }
}

impl From<String> for XPathExpression {
    fn from(tag_name: String) -> Self {
        Self::new(tag_name)
    }
}

impl XPathExpression {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self { tag_name: tag_name.into(), ..Self::default() }
    }

    /// Expression matching any element (`*`).
    pub fn from_any() -> Self {
        Self::new("*")
    }

    /// Expression without a tag, useful as a container for joins.
    pub fn from_empty() -> Self {
        Self::default()
    }

    pub fn with_literal_policy(mut self, policy: LiteralPolicy) -> Self {
        self.literal_policy = policy;
        self
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn root_prefix(&self) -> &'static str {
        ROOT_PREFIX
    }

    pub fn literal_policy(&self) -> LiteralPolicy {
        self.literal_policy
    }

    pub fn predicates(&self) -> &[PredicateToken] {
        self.predicates.tokens()
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn issues(&self) -> &[BuildIssue] {
        &self.issues
    }

    pub fn has_dangling_connective(&self) -> bool {
        self.predicates.has_dangling_connective()
    }

    // ---- rendering -------------------------------------------------------

    /// Rooted rendering, e.g. `//input[@type='email']`.
    pub fn render(&self) -> String {
        let mut out = String::from(ROOT_PREFIX);
        self.write_fragment(&mut out);
        out
    }

    /// Rendering without the root prefix, for embedding into other expressions.
    pub fn render_fragment(&self) -> String {
        let mut out = String::new();
        self.write_fragment(&mut out);
        out
    }

    pub fn try_render(&self) -> Result<String, RenderError> {
        self.check(self.render())
    }

    pub fn try_render_fragment(&self) -> Result<String, RenderError> {
        self.check(self.render_fragment())
    }

    fn write_fragment(&self, out: &mut String) {
        out.push_str(&self.tag_name);
        if let Some(predicate) = self.predicates.joined() {
            out.push('[');
            out.push_str(&predicate);
            out.push(']');
        }
        if !self.path.is_empty() {
            out.push('/');
            out.push_str(&self.path.join("/"));
        }
    }

    fn check(&self, query: String) -> Result<String, RenderError> {
        if let Some(connective) = self.predicates.trailing_connective() {
            return Err(RenderError::DanglingConnective { query, connective });
        }
        if !self.issues.is_empty() {
            return Err(RenderError::Malformed { query, issues: self.issues.clone() });
        }
        Ok(query)
    }

    // ---- internal helpers ------------------------------------------------

    fn clause(mut self, clause: String) -> Self {
        if self.predicates.push_clause(clause.as_str()) {
            tracing::trace!(tag = %self.tag_name, "default `and` inserted");
        }
        tracing::trace!(tag = %self.tag_name, %clause, "predicate clause appended");
        self
    }

    fn quote(&mut self, value: &str) -> String {
        let quoted = quote_literal(value, self.literal_policy);
        if quoted.ambiguous {
            tracing::debug!(literal = value, "literal holds both quote characters");
            self.issues.push(BuildIssue::AmbiguousLiteral { literal: value.to_owned() });
        }
        quoted.text
    }

    fn attribute_call(mut self, function: &str, name: &str, value: &str, negate: bool) -> Self {
        let literal = self.quote(value);
        let call = format!("{function}({},{literal})", attribute_name(name));
        self.clause(negated(call, negate))
    }

    fn text_call(mut self, function: &str, value: &str, negate: bool) -> Self {
        let literal = self.quote(value);
        let call = format!("{function}(text(),{literal})");
        self.clause(negated(call, negate))
    }

    fn connective(mut self, connective: Connective) -> Self {
        if !self.predicates.push_connective(connective) {
            tracing::debug!(tag = %self.tag_name, %connective, "connective ignored");
        }
        self
    }

    fn inherit(&mut self, target: &impl StepTarget) {
        self.issues.extend(target.inherited_issues());
    }

    // ---- attribute predicates -----------------------------------------------

    /// `@name`: the attribute is present.
    pub fn where_has_attribute(self, name: &str) -> Self {
        let clause = attribute_name(name).into_owned();
        self.clause(clause)
    }

    /// `not(@name)`: the attribute is absent.
    pub fn where_lacks_attribute(self, name: &str) -> Self {
        let clause = format!("not({})", attribute_name(name));
        self.clause(clause)
    }

    /// `@name='value'`
    pub fn where_attribute(mut self, name: &str, value: &str) -> Self {
        let literal = self.quote(value);
        let clause = format!("{}={literal}", attribute_name(name));
        self.clause(clause)
    }

    /// `not(@name='value')`
    pub fn where_not_attribute(mut self, name: &str, value: &str) -> Self {
        let literal = self.quote(value);
        let clause = format!("not({}={literal})", attribute_name(name));
        self.clause(clause)
    }

    pub fn where_greater_than(self, name: &str, value: i64) -> Self {
        let clause = format!("{}>{value}", attribute_name(name));
        self.clause(clause)
    }

    pub fn where_greater_or_equal(self, name: &str, value: i64) -> Self {
        let clause = format!("{}>={value}", attribute_name(name));
        self.clause(clause)
    }

    pub fn where_less_than(self, name: &str, value: i64) -> Self {
        let clause = format!("{}<{value}", attribute_name(name));
        self.clause(clause)
    }

    pub fn where_less_or_equal(self, name: &str, value: i64) -> Self {
        let clause = format!("{}<={value}", attribute_name(name));
        self.clause(clause)
    }

    pub fn where_attribute_contains(self, name: &str, value: &str) -> Self {
        self.attribute_call("contains", name, value, false)
    }

    pub fn where_attribute_not_contains(self, name: &str, value: &str) -> Self {
        self.attribute_call("contains", name, value, true)
    }

    pub fn where_attribute_starts_with(self, name: &str, value: &str) -> Self {
        self.attribute_call("starts-with", name, value, false)
    }

    pub fn where_attribute_not_starts_with(self, name: &str, value: &str) -> Self {
        self.attribute_call("starts-with", name, value, true)
    }

    /// `ends-with(@name,'value')`. XPath 2.0 only; XPath 1.0 engines such as
    /// `document.evaluate` in browsers reject it.
    pub fn where_attribute_ends_with(self, name: &str, value: &str) -> Self {
        self.attribute_call("ends-with", name, value, false)
    }

    /// Negated [`where_attribute_ends_with`](Self::where_attribute_ends_with). XPath 2.0 only.
    pub fn where_attribute_not_ends_with(self, name: &str, value: &str) -> Self {
        self.attribute_call("ends-with", name, value, true)
    }

    /// `matches(@name,'pattern')`. XPath 2.0 only.
    pub fn where_attribute_matches(self, name: &str, pattern: &str) -> Self {
        self.attribute_call("matches", name, pattern, false)
    }

    /// `not(matches(@name,'pattern'))`. XPath 2.0 only.
    pub fn where_attribute_not_matches(self, name: &str, pattern: &str) -> Self {
        self.attribute_call("matches", name, pattern, true)
    }

    /// `@*='value'`: any attribute carries the value.
    pub fn where_any(mut self, value: &str) -> Self {
        let clause = format!("@*={}", self.quote(value));
        self.clause(clause)
    }

    /// `not(@*='value')`
    pub fn where_not_any(mut self, value: &str) -> Self {
        let clause = format!("not(@*={})", self.quote(value));
        self.clause(clause)
    }

    // ---- text predicates ----------------------------------------------------

    pub fn where_text_equal(mut self, value: &str) -> Self {
        let clause = format!("text()={}", self.quote(value));
        self.clause(clause)
    }

    pub fn where_text_not_equal(mut self, value: &str) -> Self {
        let clause = format!("not(text()={})", self.quote(value));
        self.clause(clause)
    }

    pub fn where_text_contains(self, value: &str) -> Self {
        self.text_call("contains", value, false)
    }

    pub fn where_text_not_contains(self, value: &str) -> Self {
        self.text_call("contains", value, true)
    }

    pub fn where_text_starts_with(self, value: &str) -> Self {
        self.text_call("starts-with", value, false)
    }

    pub fn where_text_not_starts_with(self, value: &str) -> Self {
        self.text_call("starts-with", value, true)
    }

    /// XPath 2.0 only.
    pub fn where_text_ends_with(self, value: &str) -> Self {
        self.text_call("ends-with", value, false)
    }

    /// XPath 2.0 only.
    pub fn where_text_not_ends_with(self, value: &str) -> Self {
        self.text_call("ends-with", value, true)
    }

    /// XPath 2.0 only.
    pub fn where_text_matches(self, pattern: &str) -> Self {
        self.text_call("matches", pattern, false)
    }

    /// XPath 2.0 only.
    pub fn where_text_not_matches(self, pattern: &str) -> Self {
        self.text_call("matches", pattern, true)
    }

    pub fn where_text_greater_than(self, number: f64) -> Self {
        let clause = format!("number(text())>{}", format_number(number));
        self.clause(clause)
    }

    pub fn where_text_greater_or_equal(self, number: f64) -> Self {
        let clause = format!("number(text())>={}", format_number(number));
        self.clause(clause)
    }

    pub fn where_text_less_than(self, number: f64) -> Self {
        let clause = format!("number(text())<{}", format_number(number));
        self.clause(clause)
    }

    pub fn where_text_less_or_equal(self, number: f64) -> Self {
        let clause = format!("number(text())<={}", format_number(number));
        self.clause(clause)
    }

    /// `not(contains(text(), '(default)'))`: the text does not hold the
    /// [`TEXT_SENTINEL`] marker. This is not a generic emptiness test.
    pub fn where_text_without_sentinel(self) -> Self {
        let clause = format!("not(contains(text(), '{TEXT_SENTINEL}'))");
        self.clause(clause)
    }

    /// `contains(text(), '(default)')`: the text holds the [`TEXT_SENTINEL`] marker.
    pub fn where_text_with_sentinel(self) -> Self {
        let clause = format!("contains(text(), '{TEXT_SENTINEL}')");
        self.clause(clause)
    }

    /// Alias of [`where_text_without_sentinel`](Self::where_text_without_sentinel).
    /// Elements whose text is empty in the usual sense match too, but so does
    /// any text lacking the sentinel.
    pub fn where_text_is_empty(self) -> Self {
        self.where_text_without_sentinel()
    }

    /// Alias of [`where_text_with_sentinel`](Self::where_text_with_sentinel).
    pub fn where_text_is_not_empty(self) -> Self {
        self.where_text_with_sentinel()
    }

    // ---- string length ------------------------------------------------------

    pub fn where_text_length(self, length: usize) -> Self {
        self.clause(format!("string-length() = {length}"))
    }

    pub fn where_not_text_length(self, length: usize) -> Self {
        self.clause(format!("not(string-length() = {length})"))
    }

    pub fn where_text_length_greater_than(self, length: usize) -> Self {
        self.clause(format!("string-length() > {length}"))
    }

    /// Emits `not(string-length() >= n)`, which selects strings *shorter*
    /// than `n`. The negation is kept so existing queries keep matching the
    /// same elements. For an actual `>= n` test with `n > 0`, use
    /// [`where_text_length_greater_than`](Self::where_text_length_greater_than)
    /// with `n - 1`; `>= 0` always holds and needs no clause.
    pub fn where_text_length_greater_or_equal(self, length: usize) -> Self {
        self.clause(format!("not(string-length() >= {length})"))
    }

    pub fn where_text_length_less_than(self, length: usize) -> Self {
        self.clause(format!("string-length() < {length}"))
    }

    pub fn where_text_length_less_or_equal(self, length: usize) -> Self {
        self.clause(format!("string-length() <= {length}"))
    }

    // ---- position -----------------------------------------------------------

    /// `position() = n`, 1-based among the matched siblings.
    pub fn where_position(self, position: usize) -> Self {
        self.clause(format!("position() = {position}"))
    }

    pub fn where_not_position(self, position: usize) -> Self {
        self.clause(format!("not(position() = {position})"))
    }

    pub fn where_position_greater_than(self, position: usize) -> Self {
        self.clause(format!("position() > {position}"))
    }

    pub fn where_position_greater_or_equal(self, position: usize) -> Self {
        self.clause(format!("position() >= {position}"))
    }

    pub fn where_position_less_than(self, position: usize) -> Self {
        self.clause(format!("position() < {position}"))
    }

    pub fn where_position_less_or_equal(self, position: usize) -> Self {
        self.clause(format!("position() <= {position}"))
    }

    // ---- connectives --------------------------------------------------------

    /// Forces `and` before the next clause. No-op on an empty predicate or
    /// right after another connective.
    pub fn and(self) -> Self {
        self.connective(Connective::And)
    }

    /// Forces `or` before the next clause. No-op on an empty predicate or
    /// right after another connective.
    pub fn or(self) -> Self {
        self.connective(Connective::Or)
    }

    // ---- axes and composition -----------------------------------------------

    /// Adds an axis step, either as `./<axis>::<target>` predicate clause or
    /// as `<axis>::<target>` path segment.
    pub fn where_axis(mut self, axis: Axis, target: impl StepTarget, placement: Placement) -> Self {
        self.inherit(&target);
        let text = target.step_text();
        match placement {
            Placement::Predicate => {
                let clause = format!("./{axis}::{text}");
                self.clause(clause)
            }
            Placement::Path => {
                let segment = format!("{axis}::{text}");
                tracing::trace!(tag = %self.tag_name, %segment, "path segment appended");
                self.path.push(segment);
                self
            }
        }
    }

    pub fn where_parent(self, target: impl StepTarget, placement: Placement) -> Self {
        self.where_axis(Axis::Parent, target, placement)
    }

    pub fn where_ancestor(self, target: impl StepTarget, placement: Placement) -> Self {
        self.where_axis(Axis::Ancestor, target, placement)
    }

    pub fn where_preceding_sibling(self, target: impl StepTarget, placement: Placement) -> Self {
        self.where_axis(Axis::PrecedingSibling, target, placement)
    }

    pub fn where_following_sibling(self, target: impl StepTarget, placement: Placement) -> Self {
        self.where_axis(Axis::FollowingSibling, target, placement)
    }

    pub fn where_descendant(self, target: impl StepTarget, placement: Placement) -> Self {
        self.where_axis(Axis::Descendant, target, placement)
    }

    pub fn where_child(self, target: impl StepTarget, placement: Placement) -> Self {
        self.where_axis(Axis::Child, target, placement)
    }

    /// Appends the fragment of `other` as a path segment.
    pub fn join_path(mut self, other: impl StepTarget) -> Self {
        self.inherit(&other);
        self.path.push(other.step_text().into_owned());
        self
    }

    /// Appends the fragment of `other` as a predicate token. No connective is
    /// inserted; call [`and`](Self::and) or [`or`](Self::or) first when the
    /// predicate already holds a clause. An empty fragment still renders as
    /// `[]` but is recorded as [`BuildIssue::EmptyPredicate`].
    pub fn join_predicate(mut self, other: impl StepTarget) -> Self {
        self.inherit(&other);
        let clause = other.step_text().into_owned();
        if clause.trim().is_empty() {
            tracing::debug!(tag = %self.tag_name, "empty fragment joined as predicate");
            self.issues.push(BuildIssue::EmptyPredicate);
            self.predicates.push_raw(clause);
        } else if self.predicates.push_raw(clause.as_str()) {
            tracing::debug!(tag = %self.tag_name, %clause, "predicate joined without connective");
            self.issues.push(BuildIssue::MissingConnective { clause });
        }
        self
    }
}

fn negated(call: String, negate: bool) -> String {
    if negate { format!("not({call})") } else { call }
}

impl StepTarget for XPathExpression {
    fn step_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.render_fragment())
    }

    fn inherited_issues(&self) -> Vec<BuildIssue> {
        let mut issues = self.issues.clone();
        if self.has_dangling_connective() {
            issues.push(BuildIssue::EmbeddedDanglingConnective { fragment: self.render_fragment() });
        }
        issues
    }
}

impl Display for XPathExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
