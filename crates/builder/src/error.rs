use crate::predicate::Connective;
use thiserror::Error;

/// Problem recorded while building an expression. Building never fails; the
/// issues surface through [`XPathExpression::try_render`](crate::XPathExpression::try_render).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildIssue {
    #[error("literal {literal:?} contains both quote characters and cannot be delimited")]
    AmbiguousLiteral { literal: String },
    #[error("predicate `{clause}` was joined directly after another clause")]
    MissingConnective { clause: String },
    #[error("embedded expression `{fragment}` ends with a dangling connective")]
    EmbeddedDanglingConnective { fragment: String },
    #[error("an empty fragment was joined as a predicate")]
    EmptyPredicate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("predicate of `{query}` ends with a dangling `{connective}`")]
    DanglingConnective { query: String, connective: Connective },
    #[error("expression `{query}` is malformed: {}", summarize(.issues))]
    Malformed { query: String, issues: Vec<BuildIssue> },
}

fn summarize(issues: &[BuildIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("invalid recipe: {0}")]
    Parse(#[from] serde_json::Error),
}
