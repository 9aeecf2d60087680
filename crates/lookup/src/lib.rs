//! Boundary between rendered XPath queries and whatever resolves them.
//!
//! The crate does not drive a browser. It defines the traits a driver
//! adapter implements ([`ElementLocator`], [`ElementHandle`],
//! [`ScriptExecutor`]), a few helpers that only need those traits, and
//! in-memory implementations in [`mock`].

pub mod element;
pub mod error;
pub mod locator;
pub mod mock;
pub mod script;

pub use element::{check_state, input_value};
pub use error::LookupError;
pub use locator::{ElementHandle, ElementLocator, LocatorExt};
pub use script::{ScriptExecutor, disable_alert, evaluate_all, evaluate_first, restore_alert};
