//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use sift_validator::prelude::*;
//!
//! let rules = RuleBuilder::new().required().email().build()?;
//! ```

pub use crate::engine::{check, validate, Declarations};
pub use crate::foundation::{Error, Invalid, RuleError, ValidationErrors};
pub use crate::rules::{
    parse_rules, parse_tokens, CheckFn, Declaration, Rule, RuleBuilder, RuleKind, Rules,
};
