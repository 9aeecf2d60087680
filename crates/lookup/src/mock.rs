//! Deterministic in-memory collaborators for tests and prototypes.
//!
//! ```
//! use xpathkit_builder::XPathExpression;
//! use xpathkit_lookup::LocatorExt;
//! use xpathkit_lookup::mock::{MockElement, MockLocator};
//!
//! let email = XPathExpression::from("input").where_attribute("type", "email");
//! let locator = MockLocator::new()
//!     .with_expression_match(&email, MockElement::new("input").with_attribute("type", "email"));
//!
//! assert!(locator.find_expression(&email).unwrap().is_some());
//! assert_eq!(locator.queries(), ["//input[@type='email']"]);
//! ```

use crate::error::LookupError;
use crate::locator::{ElementHandle, ElementLocator};
use crate::script::ScriptExecutor;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use xpathkit_builder::XPathExpression;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockElement {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
}

impl MockElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Self::default() }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

impl ElementHandle for MockElement {
    fn tag_name(&self) -> String {
        self.tag.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name.trim_start_matches('@')).cloned()
    }

    fn text(&self) -> String {
        self.text.clone()
    }
}

/// Answers queries from a fixed table keyed by the exact query string and
/// records every query it receives.
#[derive(Debug, Default)]
pub struct MockLocator {
    matches: HashMap<String, Vec<MockElement>>,
    failure: Option<String>,
    queries: RwLock<Vec<String>>,
}

impl MockLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_match(mut self, query: impl Into<String>, element: MockElement) -> Self {
        self.matches.entry(query.into()).or_default().push(element);
        self
    }

    pub fn with_expression_match(self, expression: &XPathExpression, element: MockElement) -> Self {
        self.with_match(expression.render(), element)
    }

    /// Every lookup fails with [`LookupError::Driver`].
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.read().expect("mock locator lock poisoned").clone()
    }

    fn record(&self, query: &str) -> Result<&[MockElement], LookupError> {
        self.queries.write().expect("mock locator lock poisoned").push(query.to_owned());
        if let Some(message) = &self.failure {
            return Err(LookupError::driver(message.clone()));
        }
        Ok(self.matches.get(query).map(Vec::as_slice).unwrap_or_default())
    }
}

impl ElementLocator for MockLocator {
    type Element = MockElement;

    fn find_one(&self, query: &str) -> Result<Option<MockElement>, LookupError> {
        Ok(self.record(query)?.first().cloned())
    }

    fn find_all(&self, query: &str) -> Result<Vec<MockElement>, LookupError> {
        Ok(self.record(query)?.to_vec())
    }
}

/// Returns the same JSON value for every script and records the scripts.
#[derive(Debug)]
pub struct MockExecutor {
    response: Value,
    scripts: RwLock<Vec<String>>,
}

impl MockExecutor {
    pub fn returning(response: Value) -> Self {
        Self { response, scripts: RwLock::new(Vec::new()) }
    }

    pub fn scripts(&self) -> Vec<String> {
        self.scripts.read().expect("mock executor lock poisoned").clone()
    }
}

impl ScriptExecutor for MockExecutor {
    fn execute(&self, script: &str) -> Result<Value, LookupError> {
        self.scripts.write().expect("mock executor lock poisoned").push(script.to_owned());
        Ok(self.response.clone())
    }
}
