//! Ordered token queue behind the bracketed predicate of an expression.
//!
//! The queue is a two-state machine. After a clause it expects a connective
//! (or the end of the predicate); after a connective, or when empty, it expects
//! a clause. Appending a clause while a connective is expected inserts a
//! default `and` first.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Boolean connective between two predicate clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub const fn as_str(self) -> &'static str {
        match self {
            Connective::And => "and",
            Connective::Or => "or",
        }
    }
}

impl Display for Connective {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateToken {
    Clause(String),
    Connective(Connective),
}

impl PredicateToken {
    pub fn as_str(&self) -> &str {
        match self {
            PredicateToken::Clause(text) => text,
            PredicateToken::Connective(connective) => connective.as_str(),
        }
    }

    pub fn is_connective(&self) -> bool {
        matches!(self, PredicateToken::Connective(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    ExpectingClause,
    ExpectingConnective,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateQueue {
    tokens: Vec<PredicateToken>,
}

impl PredicateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> QueueState {
        match self.tokens.last() {
            Some(PredicateToken::Clause(_)) => QueueState::ExpectingConnective,
            Some(PredicateToken::Connective(_)) | None => QueueState::ExpectingClause,
        }
    }

    /// Appends a test clause. Returns `true` when a default `and` had to be
    /// inserted in front of it.
    pub fn push_clause(&mut self, clause: impl Into<String>) -> bool {
        let inserted = self.state() == QueueState::ExpectingConnective;
        if inserted {
            self.tokens.push(PredicateToken::Connective(Connective::And));
        }
        self.tokens.push(PredicateToken::Clause(clause.into()));
        inserted
    }

    /// Appends a clause as-is, without default connective insertion. Returns
    /// `true` when the clause now directly follows another clause.
    pub fn push_raw(&mut self, clause: impl Into<String>) -> bool {
        let adjacent = self.state() == QueueState::ExpectingConnective;
        self.tokens.push(PredicateToken::Clause(clause.into()));
        adjacent
    }

    /// Appends `connective` unless the queue is empty or already ends with a
    /// connective. Returns whether the token was appended.
    pub fn push_connective(&mut self, connective: Connective) -> bool {
        if self.state() == QueueState::ExpectingClause {
            return false;
        }
        self.tokens.push(PredicateToken::Connective(connective));
        true
    }

    pub fn trailing_connective(&self) -> Option<Connective> {
        match self.tokens.last() {
            Some(PredicateToken::Connective(connective)) => Some(*connective),
            _ => None,
        }
    }

    pub fn has_dangling_connective(&self) -> bool {
        self.trailing_connective().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens(&self) -> &[PredicateToken] {
        &self.tokens
    }

    /// Tokens joined by single spaces, or `None` for an empty queue.
    pub fn joined(&self) -> Option<String> {
        if self.tokens.is_empty() {
            return None;
        }
        let parts: Vec<&str> = self.tokens.iter().map(PredicateToken::as_str).collect();
        Some(parts.join(" "))
    }
}
