//! Confirmation normalizer.
//!
//! A bare `confirmed` marker on field `f` is shorthand for "must equal the
//! `f_confirmation` field". The engine runs this pass after parsing and
//! before evaluation, so evaluation only ever sees explicit `match` rules.

use crate::rules::rule::{Rule, RuleKind, Rules};

/// Sentinel target produced by some builder call paths (`.matches("confirmed")`)
/// as a second, historical way of expressing a confirmation rule.
const CONFIRMED_SENTINEL: &str = "confirmed";

/// Rewrites confirmation shorthand into explicit cross-field rules.
///
/// Every `Confirmed` marker becomes `match:{field}_confirmation`, preserving
/// its position and message override. A `match` whose target is literally
/// `"confirmed"` is rewritten the same way (compatibility shim). All other
/// rules pass through unchanged.
///
/// Pure and idempotent: the input spec is not mutated, and normalizing an
/// already-normalized spec returns an equal spec.
#[must_use]
pub fn normalize_confirmed(field: &str, rules: &Rules) -> Rules {
    rules
        .iter()
        .map(|rule| match rule.kind() {
            RuleKind::Confirmed => rewrite(field, rule),
            RuleKind::Matches { other } if other == CONFIRMED_SENTINEL => rewrite(field, rule),
            _ => rule.clone(),
        })
        .collect()
}

fn rewrite(field: &str, rule: &Rule) -> Rule {
    Rule::with_message(
        RuleKind::Matches {
            other: format!("{field}_confirmation"),
        },
        rule.message().map(ToString::to_string),
    )
}

// ============================================================================
// TESTS
// ============================================================================
