//! Fluent construction of XPath query strings.
//!
//! The builder only emits text. It never parses or evaluates XPath; the
//! rendered query is handed to whatever engine resolves elements (a WebDriver
//! session, `document.evaluate`, an accessibility tree).

pub mod axis;
pub mod error;
pub mod expression;
pub mod literal;
pub mod predicate;
pub mod recipe;

pub use axis::{Axis, Placement, StepTarget};
pub use error::{BuildIssue, RecipeError, RenderError};
pub use expression::{ROOT_PREFIX, TEXT_SENTINEL, XPathExpression};
pub use literal::{LiteralPolicy, QuotedLiteral, attribute_name, quote_literal};
pub use predicate::{Connective, PredicateQueue, PredicateToken, QueueState};
pub use recipe::{Recipe, Step, Target};
