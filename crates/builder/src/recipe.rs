//! JSON recipes describing a builder call chain.
//!
//! A recipe names the tag and lists the steps in the order the fluent calls
//! would be made:
//!
//! ```json
//! {
//!   "tag": "a",
//!   "steps": [
//!     { "op": "child", "target": { "tag": "img", "steps": [
//!         { "op": "attribute-contains", "name": "src", "value": "powerpoint" }
//!     ] } }
//!   ]
//! }
//! ```

use crate::axis::{Axis, Placement};
use crate::error::RecipeError;
use crate::expression::XPathExpression;
use crate::literal::LiteralPolicy;
use serde::{Deserialize, Serialize};
use std::io::Read;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Recipe {
    /// Tag selector; empty for a join-only expression, `*` for any element.
    #[serde(default)]
    pub tag: String,
    /// Quoting policy; nested recipes that leave it unset inherit the
    /// enclosing recipe's policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_policy: Option<LiteralPolicy>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Axis step target: a bare tag name or a nested recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    Tag(String),
    Expression(Box<Recipe>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    /// Presence test when `value` is omitted, equality otherwise.
    Attribute {
        name: String,
        #[serde(default)]
        value: Option<String>,
    },
    NotAttribute {
        name: String,
        #[serde(default)]
        value: Option<String>,
    },
    GreaterThan { name: String, value: i64 },
    GreaterOrEqual { name: String, value: i64 },
    LessThan { name: String, value: i64 },
    LessOrEqual { name: String, value: i64 },
    AttributeContains { name: String, value: String },
    AttributeNotContains { name: String, value: String },
    AttributeStartsWith { name: String, value: String },
    AttributeNotStartsWith { name: String, value: String },
    AttributeEndsWith { name: String, value: String },
    AttributeNotEndsWith { name: String, value: String },
    AttributeMatches { name: String, pattern: String },
    AttributeNotMatches { name: String, pattern: String },
    Any { value: String },
    NotAny { value: String },
    TextEqual { value: String },
    TextNotEqual { value: String },
    TextContains { value: String },
    TextNotContains { value: String },
    TextStartsWith { value: String },
    TextNotStartsWith { value: String },
    TextEndsWith { value: String },
    TextNotEndsWith { value: String },
    TextMatches { pattern: String },
    TextNotMatches { pattern: String },
    TextGreaterThan { value: f64 },
    TextGreaterOrEqual { value: f64 },
    TextLessThan { value: f64 },
    TextLessOrEqual { value: f64 },
    TextWithoutSentinel,
    TextWithSentinel,
    TextLength { length: usize },
    NotTextLength { length: usize },
    TextLengthGreaterThan { length: usize },
    TextLengthGreaterOrEqual { length: usize },
    TextLengthLessThan { length: usize },
    TextLengthLessOrEqual { length: usize },
    Position { position: usize },
    NotPosition { position: usize },
    PositionGreaterThan { position: usize },
    PositionGreaterOrEqual { position: usize },
    PositionLessThan { position: usize },
    PositionLessOrEqual { position: usize },
    And,
    Or,
    Parent {
        target: Target,
        #[serde(default)]
        placement: Placement,
    },
    Ancestor {
        target: Target,
        #[serde(default)]
        placement: Placement,
    },
    PrecedingSibling {
        target: Target,
        #[serde(default)]
        placement: Placement,
    },
    FollowingSibling {
        target: Target,
        #[serde(default)]
        placement: Placement,
    },
    Descendant {
        target: Target,
        #[serde(default)]
        placement: Placement,
    },
    Child {
        target: Target,
        #[serde(default)]
        placement: Placement,
    },
    JoinPath { expression: Recipe },
    JoinPredicate { expression: Recipe },
}

impl Recipe {
    pub fn from_json(json: &str) -> Result<Self, RecipeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, RecipeError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn build(&self) -> XPathExpression {
        self.build_with(LiteralPolicy::default())
    }

    /// Builds with `inherited` as the policy when the recipe sets none.
    pub fn build_with(&self, inherited: LiteralPolicy) -> XPathExpression {
        let policy = self.literal_policy.unwrap_or(inherited);
        let start = XPathExpression::new(self.tag.as_str()).with_literal_policy(policy);
        tracing::debug!(tag = %self.tag, steps = self.steps.len(), ?policy, "building expression from recipe");
        self.steps.iter().fold(start, |expression, step| apply(expression, step, policy))
    }
}

fn axis_step(
    expression: XPathExpression,
    axis: Axis,
    target: &Target,
    placement: Placement,
    policy: LiteralPolicy,
) -> XPathExpression {
    match target {
        Target::Tag(tag) => expression.where_axis(axis, tag, placement),
        Target::Expression(recipe) => {
            expression.where_axis(axis, recipe.build_with(policy), placement)
        }
    }
}

fn apply(expression: XPathExpression, step: &Step, policy: LiteralPolicy) -> XPathExpression {
    match step {
        Step::Attribute { name, value: Some(value) } => expression.where_attribute(name, value),
        Step::Attribute { name, value: None } => expression.where_has_attribute(name),
        Step::NotAttribute { name, value: Some(value) } => {
            expression.where_not_attribute(name, value)
        }
        Step::NotAttribute { name, value: None } => expression.where_lacks_attribute(name),
        Step::GreaterThan { name, value } => expression.where_greater_than(name, *value),
        Step::GreaterOrEqual { name, value } => expression.where_greater_or_equal(name, *value),
        Step::LessThan { name, value } => expression.where_less_than(name, *value),
        Step::LessOrEqual { name, value } => expression.where_less_or_equal(name, *value),
        Step::AttributeContains { name, value } => expression.where_attribute_contains(name, value),
        Step::AttributeNotContains { name, value } => {
            expression.where_attribute_not_contains(name, value)
        }
        Step::AttributeStartsWith { name, value } => {
            expression.where_attribute_starts_with(name, value)
        }
        Step::AttributeNotStartsWith { name, value } => {
            expression.where_attribute_not_starts_with(name, value)
        }
        Step::AttributeEndsWith { name, value } => expression.where_attribute_ends_with(name, value),
        Step::AttributeNotEndsWith { name, value } => {
            expression.where_attribute_not_ends_with(name, value)
        }
        Step::AttributeMatches { name, pattern } => {
            expression.where_attribute_matches(name, pattern)
        }
        Step::AttributeNotMatches { name, pattern } => {
            expression.where_attribute_not_matches(name, pattern)
        }
        Step::Any { value } => expression.where_any(value),
        Step::NotAny { value } => expression.where_not_any(value),
        Step::TextEqual { value } => expression.where_text_equal(value),
        Step::TextNotEqual { value } => expression.where_text_not_equal(value),
        Step::TextContains { value } => expression.where_text_contains(value),
        Step::TextNotContains { value } => expression.where_text_not_contains(value),
        Step::TextStartsWith { value } => expression.where_text_starts_with(value),
        Step::TextNotStartsWith { value } => expression.where_text_not_starts_with(value),
        Step::TextEndsWith { value } => expression.where_text_ends_with(value),
        Step::TextNotEndsWith { value } => expression.where_text_not_ends_with(value),
        Step::TextMatches { pattern } => expression.where_text_matches(pattern),
        Step::TextNotMatches { pattern } => expression.where_text_not_matches(pattern),
        Step::TextGreaterThan { value } => expression.where_text_greater_than(*value),
        Step::TextGreaterOrEqual { value } => expression.where_text_greater_or_equal(*value),
        Step::TextLessThan { value } => expression.where_text_less_than(*value),
        Step::TextLessOrEqual { value } => expression.where_text_less_or_equal(*value),
        Step::TextWithoutSentinel => expression.where_text_without_sentinel(),
        Step::TextWithSentinel => expression.where_text_with_sentinel(),
        Step::TextLength { length } => expression.where_text_length(*length),
        Step::NotTextLength { length } => expression.where_not_text_length(*length),
        Step::TextLengthGreaterThan { length } => {
            expression.where_text_length_greater_than(*length)
        }
        Step::TextLengthGreaterOrEqual { length } => {
            expression.where_text_length_greater_or_equal(*length)
        }
        Step::TextLengthLessThan { length } => expression.where_text_length_less_than(*length),
        Step::TextLengthLessOrEqual { length } => {
            expression.where_text_length_less_or_equal(*length)
        }
        Step::Position { position } => expression.where_position(*position),
        Step::NotPosition { position } => expression.where_not_position(*position),
        Step::PositionGreaterThan { position } => {
            expression.where_position_greater_than(*position)
        }
        Step::PositionGreaterOrEqual { position } => {
            expression.where_position_greater_or_equal(*position)
        }
        Step::PositionLessThan { position } => expression.where_position_less_than(*position),
        Step::PositionLessOrEqual { position } => {
            expression.where_position_less_or_equal(*position)
        }
        Step::And => expression.and(),
        Step::Or => expression.or(),
        Step::Parent { target, placement } => {
            axis_step(expression, Axis::Parent, target, *placement, policy)
        }
        Step::Ancestor { target, placement } => {
            axis_step(expression, Axis::Ancestor, target, *placement, policy)
        }
        Step::PrecedingSibling { target, placement } => {
            axis_step(expression, Axis::PrecedingSibling, target, *placement, policy)
        }
        Step::FollowingSibling { target, placement } => {
            axis_step(expression, Axis::FollowingSibling, target, *placement, policy)
        }
        Step::Descendant { target, placement } => {
            axis_step(expression, Axis::Descendant, target, *placement, policy)
        }
        Step::Child { target, placement } => {
            axis_step(expression, Axis::Child, target, *placement, policy)
        }
        Step::JoinPath { expression: other } => expression.join_path(other.build_with(policy)),
        Step::JoinPredicate { expression: other } => {
            expression.join_predicate(other.build_with(policy))
        }
    }
}
