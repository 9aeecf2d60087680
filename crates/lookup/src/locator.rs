//! Boundary traits for the collaborator that resolves rendered queries
//! against a live document.

use crate::error::LookupError;
use xpathkit_builder::XPathExpression;

/// Read access to a resolved element.
pub trait ElementHandle {
    fn tag_name(&self) -> String;
    fn attribute(&self, name: &str) -> Option<String>;
    fn text(&self) -> String;
}

/// Resolves rooted XPath query strings to elements.
pub trait ElementLocator {
    type Element: ElementHandle;

    /// First match in document order, `Ok(None)` when nothing matches.
    fn find_one(&self, query: &str) -> Result<Option<Self::Element>, LookupError>;

    /// All matches in document order; empty when nothing matches.
    fn find_all(&self, query: &str) -> Result<Vec<Self::Element>, LookupError>;
}

/// Lookups driven directly by an [`XPathExpression`].
pub trait LocatorExt: ElementLocator {
    fn find_expression(
        &self,
        expression: &XPathExpression,
    ) -> Result<Option<Self::Element>, LookupError> {
        let query = expression.render();
        tracing::debug!(%query, "resolving first match");
        self.find_one(&query)
    }

    fn find_all_expression(
        &self,
        expression: &XPathExpression,
    ) -> Result<Vec<Self::Element>, LookupError> {
        let query = expression.render();
        tracing::debug!(%query, "resolving all matches");
        let elements = self.find_all(&query)?;
        tracing::trace!(%query, count = elements.len(), "matches resolved");
        Ok(elements)
    }

    /// Like [`find_expression`](Self::find_expression) but a missing element
    /// is an error.
    fn require(&self, expression: &XPathExpression) -> Result<Self::Element, LookupError> {
        let query = expression.render();
        match self.find_one(&query)? {
            Some(element) => Ok(element),
            None => {
                tracing::warn!(%query, "required element not found");
                Err(LookupError::NotFound { query })
            }
        }
    }
}

impl<L: ElementLocator + ?Sized> LocatorExt for L {}
