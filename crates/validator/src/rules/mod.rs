//! Rule declaration model: the canonical spec, its three producers, and the
//! confirmation normalizer.
//!
//! Three author-facing surface forms exist for one underlying representation:
//!
//! - a pipe-delimited DSL string (`"required|min:3|message:too short"`),
//! - a structured token list (`["required", "min:3"]`),
//! - the fluent [`RuleBuilder`].
//!
//! All of them normalize into [`Rules`] before evaluation; the engine never
//! dispatches on declaration shape.

mod builder;
mod confirmed;
mod parse;
mod rule;

pub use builder::RuleBuilder;
pub use confirmed::normalize_confirmed;
pub use parse::{parse_rules, parse_tokens};
pub use rule::{BoundKind, CheckFn, FormatKind, Rule, RuleKind, Rules, SetKind, TypeKind};

use crate::foundation::RuleError;

// ============================================================================
// DECLARATION (surface-form unifier)
// ============================================================================

/// One field's rule declaration in any of the three surface forms.
///
/// The engine resolves a declaration to canonical [`Rules`] up front; string
/// and token forms parse lazily at that point and surface [`RuleError`] for
/// malformed input.
#[derive(Debug, Clone)]
pub enum Declaration {
    /// Pipe-delimited DSL string.
    Line(String),
    /// Structured token list, one DSL segment per element.
    Tokens(Vec<String>),
    /// Already-canonical spec (builder output), passed through unchanged.
    Spec(Rules),
}

impl Declaration {
    /// Resolves the declaration to a canonical spec.
    pub fn to_rules(&self) -> Result<Rules, RuleError> {
        match self {
            Self::Line(input) => parse_rules(input),
            Self::Tokens(tokens) => parse_tokens(tokens),
            Self::Spec(rules) => Ok(rules.clone()),
        }
    }
}

impl From<&str> for Declaration {
    fn from(input: &str) -> Self {
        Self::Line(input.to_string())
    }
}

impl From<String> for Declaration {
    fn from(input: String) -> Self {
        Self::Line(input)
    }
}

impl From<Vec<String>> for Declaration {
    fn from(tokens: Vec<String>) -> Self {
        Self::Tokens(tokens)
    }
}

impl From<Vec<&str>> for Declaration {
    fn from(tokens: Vec<&str>) -> Self {
        Self::Tokens(tokens.into_iter().map(ToString::to_string).collect())
    }
}

impl From<Rules> for Declaration {
    fn from(rules: Rules) -> Self {
        Self::Spec(rules)
    }
}
