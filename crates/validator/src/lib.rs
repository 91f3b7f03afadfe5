//! # sift-validator
//!
//! A rule-based field validation engine: give it a bag of named values and a
//! per-field rule declaration, get back a structured, ordered report of which
//! fields violate which rules.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use sift_validator::{validate, Declaration, Declarations};
//! use serde_json::json;
//!
//! let data = serde_json::Map::from_iter([
//!     ("email".to_string(), json!("ada@example.com")),
//!     ("age".to_string(), json!(17)),
//! ]);
//! let rules = Declarations::from_iter([
//!     ("email".to_string(), Declaration::from("required|email")),
//!     ("age".to_string(), Declaration::from("required|int|min:18")),
//! ]);
//!
//! let report = validate(&data, &rules)?;
//! assert_eq!(report.messages("age"), Some(&["min:18".to_string()][..]));
//! # Ok::<(), sift_validator::RuleError>(())
//! ```
//!
//! ## Declaration forms
//!
//! Three author-facing forms normalize into one canonical spec:
//!
//! - **DSL string** — `"required|min:3|message:too short"`;
//! - **token list** — `["required", "min:3"]`;
//! - **builder** — [`RuleBuilder::new().required().min(3.0)`](RuleBuilder).
//!
//! ## Semantics worth knowing
//!
//! - *Empty* means `null` (or a missing key) or `""` — not `0`, `false`, or
//!   an empty collection. Empty values fail `required` and are exempt from
//!   every other rule.
//! - Malformed declarations (non-numeric `min`, bad regex) are construction
//!   errors ([`RuleError`]), never validation failures.
//! - Evaluation is deterministic and ordered: fields appear in declaration
//!   order, messages in rule order.

mod checks;
mod engine;
mod foundation;
mod rules;

pub mod prelude;

pub use engine::{check, validate, Declarations};
pub use foundation::{Error, Invalid, RuleError, ValidationErrors};
pub use rules::{
    normalize_confirmed, parse_rules, parse_tokens, BoundKind, CheckFn, Declaration, FormatKind,
    Rule, RuleBuilder, RuleKind, Rules, SetKind, TypeKind,
};
