//! The pipe-delimited rule DSL parser.
//!
//! Grammar (bit-exact, callers hand-author these strings):
//!
//! ```text
//! rules   := segment ('|' segment)*
//! segment := name | name ':' params | 'message:' text
//! params  := value (',' value)*
//! ```
//!
//! Rule names are case-insensitive and alias-resolved (`integer` → `int`,
//! `float` → `decimal`, `bool` → `boolean`, `same` → `match`); the canonical
//! spec never retains an alias. Parameters are positional: the first one is
//! the threshold / other-field / pattern / format depending on the kind, and
//! `in` / `not_in` consume the whole list.
//!
//! Anything malformed — unknown name, non-numeric threshold, pattern that
//! does not compile, ill-formed date format, missing parameter — is a
//! [`RuleError`] at parse time. Bad declarations are programming errors and
//! never show up as validation failures.

use regex::Regex;

use crate::checks::datetime;
use crate::foundation::RuleError;
use crate::rules::rule::{BoundKind, FormatKind, RuleKind, Rules, SetKind, TypeKind};

/// Prefix that turns a segment into a message override instead of a rule.
const MESSAGE_PREFIX: &str = "message:";

/// Parses a pipe-delimited DSL string into a canonical spec.
///
/// Empty segments are dropped, every other segment is trimmed, and a
/// `message:` segment retroactively attaches its remainder (raw, unescaped)
/// to the rule parsed immediately before it. A `message:` segment with no
/// preceding rule is silently discarded.
///
/// # Examples
///
/// ```rust,ignore
/// let rules = sift_validator::parse_rules("required|min:3|message:too short")?;
/// assert_eq!(rules.len(), 2);
/// ```
pub fn parse_rules(input: &str) -> Result<Rules, RuleError> {
    let mut rules = Rules::new();
    for segment in input.split('|') {
        parse_segment(segment, &mut rules)?;
    }
    Ok(rules)
}

/// Parses a structured token list (one segment per element) with the same
/// per-segment semantics as the DSL string.
pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Rules, RuleError> {
    let mut rules = Rules::new();
    for token in tokens {
        parse_segment(token.as_ref(), &mut rules)?;
    }
    Ok(rules)
}

/// Parses one segment into `rules`, or attaches a message override.
fn parse_segment(segment: &str, rules: &mut Rules) -> Result<(), RuleError> {
    let segment = segment.trim();
    if segment.is_empty() {
        return Ok(());
    }

    if let Some(text) = segment.strip_prefix(MESSAGE_PREFIX) {
        // No-op on an empty spec: a leading message token has nothing to
        // attach to and is dropped.
        rules.set_last_message(text);
        return Ok(());
    }

    let kind = match segment.split_once(':') {
        Some((name, rest)) => {
            let params: Vec<&str> = rest.split(',').map(str::trim).collect();
            build_kind(name.trim(), &params)?
        }
        None => build_kind(segment, &[])?,
    };
    rules.push(kind);
    Ok(())
}

/// Resolves a (case-insensitive, possibly aliased) rule name and positional
/// parameters into a canonical kind.
fn build_kind(name: &str, params: &[&str]) -> Result<RuleKind, RuleError> {
    let name = name.to_ascii_lowercase();
    let kind = match name.as_str() {
        "required" => RuleKind::Required,
        "int" | "integer" => RuleKind::TypeOf(TypeKind::Int),
        "decimal" | "float" => RuleKind::TypeOf(TypeKind::Decimal),
        "boolean" | "bool" => RuleKind::TypeOf(TypeKind::Boolean),
        "email" => RuleKind::Format(FormatKind::Email),
        "url" => RuleKind::Format(FormatKind::Url),
        "domain" => RuleKind::Format(FormatKind::Domain),
        "ip" => RuleKind::Format(FormatKind::Ip),
        "date" => RuleKind::Format(FormatKind::Date),
        "json" => RuleKind::Format(FormatKind::Json),
        "min" => bound(BoundKind::Min, "min", params)?,
        "max" => bound(BoundKind::Max, "max", params)?,
        "match" | "same" => RuleKind::Matches {
            other: first_param("match", params)?.to_string(),
        },
        "regex" => {
            let pattern = first_param("regex", params)?;
            let compiled = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
                pattern: pattern.to_string(),
                source: Box::new(source),
            })?;
            RuleKind::Pattern(compiled)
        }
        "in" => set(SetKind::In, "in", params)?,
        "not_in" => set(SetKind::NotIn, "not_in", params)?,
        "date_format" => {
            let format = first_param("date_format", params)?;
            if !datetime::is_well_formed_format(format) {
                return Err(RuleError::InvalidDateFormat(format.to_string()));
            }
            RuleKind::DateFormat(format.to_string())
        }
        "confirmed" => RuleKind::Confirmed,
        _ => return Err(RuleError::UnknownRule(name)),
    };
    Ok(kind)
}

fn first_param<'a>(rule: &'static str, params: &[&'a str]) -> Result<&'a str, RuleError> {
    params
        .first()
        .copied()
        .filter(|p| !p.is_empty())
        .ok_or(RuleError::MissingParameter { rule })
}

fn bound(kind: BoundKind, rule: &'static str, params: &[&str]) -> Result<RuleKind, RuleError> {
    let raw = first_param(rule, params)?;
    let threshold: f64 = raw.parse().map_err(|_| RuleError::InvalidThreshold {
        rule,
        value: raw.to_string(),
    })?;
    Ok(RuleKind::Bound { kind, threshold })
}

fn set(kind: SetKind, rule: &'static str, params: &[&str]) -> Result<RuleKind, RuleError> {
    if params.is_empty() || params.iter().all(|p| p.is_empty()) {
        return Err(RuleError::MissingParameter { rule });
    }
    Ok(RuleKind::Set {
        kind,
        values: params.iter().map(ToString::to_string).collect(),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<RuleKind> {
        parse_rules(input)
            .unwrap()
            .iter()
            .map(|r| r.kind().clone())
            .collect()
    }

    #[test]
    fn bare_names_parse_without_parameters() {
        assert_eq!(
            kinds("required|email"),
            vec![
                RuleKind::Required,
                RuleKind::Format(FormatKind::Email),
            ]
        );
    }

    #[test]
    fn segments_are_trimmed_and_empties_dropped() {
        assert_eq!(
            kinds(" required | |int||"),
            vec![RuleKind::Required, RuleKind::TypeOf(TypeKind::Int)]
        );
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(kinds("REQUIRED|Email"), kinds("required|email"));
    }

    #[test]
    fn aliases_resolve_to_canonical_kinds() {
        assert_eq!(kinds("integer"), kinds("int"));
        assert_eq!(kinds("float"), kinds("decimal"));
        assert_eq!(kinds("bool"), kinds("boolean"));
        assert_eq!(kinds("same:other"), kinds("match:other"));
    }

    #[test]
    fn thresholds_parse_as_floats_at_parse_time() {
        assert_eq!(
            kinds("min:3|max:10.5"),
            vec![
                RuleKind::Bound {
                    kind: BoundKind::Min,
                    threshold: 3.0
                },
                RuleKind::Bound {
                    kind: BoundKind::Max,
                    threshold: 10.5
                },
            ]
        );
    }

    #[test]
    fn non_numeric_threshold_is_a_parse_error() {
        assert!(matches!(
            parse_rules("min:abc"),
            Err(RuleError::InvalidThreshold { rule: "min", .. })
        ));
    }

    #[test]
    fn in_and_not_in_take_the_full_parameter_list() {
        assert_eq!(
            kinds("in:red, green ,blue"),
            vec![RuleKind::Set {
                kind: SetKind::In,
                values: vec!["red".into(), "green".into(), "blue".into()],
            }]
        );
        assert_eq!(
            kinds("not_in:a,b"),
            vec![RuleKind::Set {
                kind: SetKind::NotIn,
                values: vec!["a".into(), "b".into()],
            }]
        );
    }

    #[test]
    fn message_token_attaches_to_preceding_rule() {
        let rules = parse_rules("required|message:give us a name|min:3").unwrap();
        let items: Vec<_> = rules.iter().collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].message(), Some("give us a name"));
        assert_eq!(items[1].message(), None);
    }

    #[test]
    fn message_remainder_is_raw_and_unescaped() {
        let rules = parse_rules("min:3|message:use 3+ chars, please: thanks").unwrap();
        let rule = rules.iter().next().unwrap();
        assert_eq!(rule.message(), Some("use 3+ chars, please: thanks"));
    }

    #[test]
    fn leading_message_token_is_silently_dropped() {
        let rules = parse_rules("message:orphan|required").unwrap();
        let items: Vec<_> = rules.iter().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].message(), None);
    }

    #[test]
    fn unknown_rule_fails_fast() {
        assert!(matches!(
            parse_rules("required|frobnicate"),
            Err(RuleError::UnknownRule(name)) if name == "frobnicate"
        ));
    }

    #[test]
    fn missing_parameter_fails_fast() {
        assert!(matches!(
            parse_rules("match:"),
            Err(RuleError::MissingParameter { rule: "match" })
        ));
        assert!(matches!(
            parse_rules("in:"),
            Err(RuleError::MissingParameter { rule: "in" })
        ));
    }

    #[test]
    fn bad_pattern_fails_fast() {
        assert!(matches!(
            parse_rules("regex:[unclosed"),
            Err(RuleError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn bad_date_format_fails_fast() {
        assert!(matches!(
            parse_rules("date_format:%Q"),
            Err(RuleError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn token_lists_parse_like_dsl_segments() {
        let from_tokens = parse_tokens(&["required", "min:3", "message:short"]).unwrap();
        let from_string = parse_rules("required|min:3|message:short").unwrap();
        assert_eq!(from_tokens, from_string);
    }

    #[test]
    fn round_trips_through_string_export() {
        let input = "required|min:3|message:too short|in:a,b|date_format:%Y-%m-%d";
        let rules = parse_rules(input).unwrap();
        assert_eq!(rules.to_rule_string(), input);
        assert_eq!(parse_rules(&rules.to_rule_string()).unwrap(), rules);
    }
}
