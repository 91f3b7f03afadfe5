//! Canonical rule representation.
//!
//! All three declaration surface forms (DSL string, token list, builder)
//! normalize into [`Rules`]: an ordered list of [`Rule`], each a [`RuleKind`]
//! plus an optional custom message override. Order is evaluation order and is
//! preserved exactly as declared.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// RULE KIND
// ============================================================================

/// Type checks with strict semantics (`boolean` rejects truthy strings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// Integer value or cleanly integer-parsing string.
    Int,
    /// Finite number or string parsing as one.
    Decimal,
    /// A genuine boolean value only.
    Boolean,
}

/// Well-known format grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    /// Email address.
    Email,
    /// Absolute URL with a host.
    Url,
    /// RFC 1123 hostname.
    Domain,
    /// IPv4 or IPv6 address.
    Ip,
    /// Calendar date under a permissive set of layouts.
    Date,
    /// Syntactically valid JSON text.
    Json,
}

/// Direction of a threshold comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundKind {
    /// Value (or its length) must be at least the threshold.
    Min,
    /// Value (or its length) must be at most the threshold.
    Max,
}

/// Membership test direction for `in` / `not_in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetKind {
    /// Value must be one of the candidates.
    In,
    /// Value must not be one of the candidates.
    NotIn,
}

/// A custom predicate rule: `(value, full data map) -> bool`.
///
/// Closures have no string form, so the DSL export of a spec containing one
/// serializes it as an empty segment (documented loss, see
/// [`Rules::to_rule_string`]).
#[derive(Clone)]
pub struct CheckFn(Arc<dyn Fn(&Value, &Map<String, Value>) -> bool + Send + Sync>);

impl CheckFn {
    /// Wraps a predicate callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Value, &Map<String, Value>) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    /// Invokes the predicate. `false` means the rule fails.
    #[must_use]
    pub fn call(&self, value: &Value, data: &Map<String, Value>) -> bool {
        (self.0)(value, data)
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for CheckFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CheckFn")
    }
}

/// One validation requirement, tagged by kind.
///
/// Kinds are immutable after construction; the only post-construction
/// mutation a spec allows is attaching a message override to its most
/// recently appended rule.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Fails iff the value is empty (`null`, missing, or `""`). The only
    /// rule that runs against empty values.
    Required,
    /// Strict type check.
    TypeOf(TypeKind),
    /// Format grammar check.
    Format(FormatKind),
    /// Numeric-or-length threshold comparison.
    Bound {
        /// Comparison direction.
        kind: BoundKind,
        /// Parsed at declaration time; never a string at evaluation time.
        threshold: f64,
    },
    /// Cross-field equality against another field in the same data map.
    Matches {
        /// Name of the other field.
        other: String,
    },
    /// Stringified value must match the compiled pattern.
    Pattern(Regex),
    /// Membership test against an ordered candidate list.
    Set {
        /// Membership direction.
        kind: SetKind,
        /// Candidates, in declaration order.
        values: Vec<String>,
    },
    /// Strict strftime round-trip check.
    DateFormat(String),
    /// First-class custom predicate.
    Custom(CheckFn),
    /// Transient marker; always rewritten to [`RuleKind::Matches`] targeting
    /// `{field}_confirmation` before evaluation.
    Confirmed,
}

impl PartialEq for RuleKind {
    fn eq(&self, other: &Self) -> bool {
        use RuleKind::{
            Bound, Confirmed, Custom, DateFormat, Format, Matches, Pattern, Required, Set, TypeOf,
        };
        match (self, other) {
            (Required, Required) | (Confirmed, Confirmed) => true,
            (TypeOf(a), TypeOf(b)) => a == b,
            (Format(a), Format(b)) => a == b,
            (
                Bound {
                    kind: a,
                    threshold: x,
                },
                Bound {
                    kind: b,
                    threshold: y,
                },
            ) => a == b && x == y,
            (Matches { other: a }, Matches { other: b }) => a == b,
            (Pattern(a), Pattern(b)) => a.as_str() == b.as_str(),
            (
                Set {
                    kind: a,
                    values: x,
                },
                Set {
                    kind: b,
                    values: y,
                },
            ) => a == b && x == y,
            (DateFormat(a), DateFormat(b)) => a == b,
            (Custom(a), Custom(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl RuleKind {
    /// Canonical rule name (aliases never survive normalization).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::TypeOf(TypeKind::Int) => "int",
            Self::TypeOf(TypeKind::Decimal) => "decimal",
            Self::TypeOf(TypeKind::Boolean) => "boolean",
            Self::Format(FormatKind::Email) => "email",
            Self::Format(FormatKind::Url) => "url",
            Self::Format(FormatKind::Domain) => "domain",
            Self::Format(FormatKind::Ip) => "ip",
            Self::Format(FormatKind::Date) => "date",
            Self::Format(FormatKind::Json) => "json",
            Self::Bound {
                kind: BoundKind::Min,
                ..
            } => "min",
            Self::Bound {
                kind: BoundKind::Max,
                ..
            } => "max",
            Self::Matches { .. } => "match",
            Self::Pattern(_) => "regex",
            Self::Set {
                kind: SetKind::In, ..
            } => "in",
            Self::Set {
                kind: SetKind::NotIn,
                ..
            } => "not_in",
            Self::DateFormat(_) => "date_format",
            Self::Custom(_) => "check",
            Self::Confirmed => "confirmed",
        }
    }

    /// Default error token recorded when the rule fails and no message
    /// override is attached. Parameters are embedded, e.g. `min:5`.
    ///
    /// This is the process-wide default-message table; it is pure data with
    /// no mutable state behind it.
    #[must_use]
    pub fn default_token(&self) -> String {
        match self {
            Self::Bound { threshold, .. } => {
                format!("{}:{}", self.name(), format_threshold(*threshold))
            }
            Self::Matches { other } => format!("match:{other}"),
            Self::Set { values, .. } => format!("{}:{}", self.name(), values.join(",")),
            Self::DateFormat(format) => format!("date_format:{format}"),
            _ => self.name().to_string(),
        }
    }

    /// DSL segment for this kind, used by the lossy string export.
    ///
    /// Custom predicates render as an empty segment.
    #[must_use]
    pub(crate) fn to_segment(&self) -> String {
        match self {
            Self::Pattern(pattern) => format!("regex:{pattern}"),
            Self::Custom(_) => String::new(),
            _ => self.default_token(),
        }
    }
}

/// Renders thresholds the way they are declared: `3`, not `3.0`.
fn format_threshold(threshold: f64) -> String {
    if threshold.fract() == 0.0 && threshold.abs() < 1e15 {
        format!("{}", threshold as i64)
    } else {
        threshold.to_string()
    }
}

// ============================================================================
// RULE
// ============================================================================

/// A [`RuleKind`] plus its optional message override.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    kind: RuleKind,
    message: Option<String>,
}

impl Rule {
    /// Creates a rule with no message override.
    #[must_use]
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Creates a rule carrying an optional override (used by the
    /// confirmation normalizer to preserve overrides across rewrites).
    #[must_use]
    pub fn with_message(kind: RuleKind, message: Option<String>) -> Self {
        Self { kind, message }
    }

    /// The rule's kind.
    #[must_use]
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// The custom message override, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The message recorded on failure: the override when present, else the
    /// kind's default token.
    #[must_use]
    pub fn failure_message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| self.kind.default_token())
    }
}

// ============================================================================
// RULES (canonical spec for one field)
// ============================================================================

/// Ordered rule list for one field — the canonical form every declaration
/// surface normalizes into.
///
/// Append-only: rules are pushed in declaration order and only the most
/// recently pushed rule can receive a message override afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rules {
    items: SmallVec<[Rule; 4]>,
}

impl Rules {
    /// Creates an empty spec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule with no override.
    pub fn push(&mut self, kind: RuleKind) {
        self.items.push(Rule::new(kind));
    }

    /// Appends a pre-built rule (override included).
    pub fn push_rule(&mut self, rule: Rule) {
        self.items.push(rule);
    }

    /// Attaches a message override to the most recently appended rule.
    ///
    /// On an empty spec this is a no-op, not an error — a trailing `message:`
    /// token with nothing before it is silently dropped.
    pub fn set_last_message(&mut self, message: impl Into<String>) {
        if let Some(last) = self.items.last_mut() {
            last.message = Some(message.into());
        }
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no rules were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates rules in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.items.iter()
    }

    /// Best-effort pipe-joined DSL form of this spec.
    ///
    /// Message overrides serialize as trailing `message:` tokens. Custom
    /// predicate rules serialize as empty segments (a closure has no string
    /// form), so the export is lossy for specs containing them: re-parsing
    /// drops the predicate, and a `message:` token that followed one attaches
    /// to the rule before it.
    #[must_use]
    pub fn to_rule_string(&self) -> String {
        let mut segments = Vec::with_capacity(self.items.len());
        for rule in &self.items {
            segments.push(rule.kind.to_segment());
            if let Some(message) = rule.message() {
                segments.push(format!("message:{message}"));
            }
        }
        segments.join("|")
    }
}

impl FromIterator<Rule> for Rules {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Rules {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tokens_embed_parameters() {
        let min = RuleKind::Bound {
            kind: BoundKind::Min,
            threshold: 5.0,
        };
        assert_eq!(min.default_token(), "min:5");

        let max = RuleKind::Bound {
            kind: BoundKind::Max,
            threshold: 2.5,
        };
        assert_eq!(max.default_token(), "max:2.5");

        let matches = RuleKind::Matches {
            other: "password_confirmation".into(),
        };
        assert_eq!(matches.default_token(), "match:password_confirmation");

        let set = RuleKind::Set {
            kind: SetKind::NotIn,
            values: vec!["a".into(), "b".into()],
        };
        assert_eq!(set.default_token(), "not_in:a,b");

        assert_eq!(RuleKind::Required.default_token(), "required");
    }

    #[test]
    fn failure_message_prefers_override() {
        let mut rules = Rules::new();
        rules.push(RuleKind::Required);
        rules.set_last_message("name is mandatory");
        let rule = rules.iter().next().unwrap();
        assert_eq!(rule.failure_message(), "name is mandatory");
    }

    #[test]
    fn set_last_message_on_empty_spec_is_noop() {
        let mut rules = Rules::new();
        rules.set_last_message("dropped");
        assert!(rules.is_empty());
    }

    #[test]
    fn set_last_message_only_touches_last_rule() {
        let mut rules = Rules::new();
        rules.push(RuleKind::Required);
        rules.push(RuleKind::Format(FormatKind::Email));
        rules.set_last_message("bad email");

        let items: Vec<_> = rules.iter().collect();
        assert_eq!(items[0].message(), None);
        assert_eq!(items[1].message(), Some("bad email"));
    }

    #[test]
    fn string_export_is_lossy_for_custom_rules() {
        let mut rules = Rules::new();
        rules.push(RuleKind::Required);
        rules.push(RuleKind::Custom(CheckFn::new(|_, _| true)));
        rules.push(RuleKind::TypeOf(TypeKind::Int));
        assert_eq!(rules.to_rule_string(), "required||int");
    }

    #[test]
    fn string_export_carries_messages() {
        let mut rules = Rules::new();
        rules.push(RuleKind::Bound {
            kind: BoundKind::Min,
            threshold: 3.0,
        });
        rules.set_last_message("too short");
        assert_eq!(rules.to_rule_string(), "min:3|message:too short");
    }

    #[test]
    fn pattern_kinds_compare_by_source() {
        let a = RuleKind::Pattern(Regex::new("^a+$").unwrap());
        let b = RuleKind::Pattern(Regex::new("^a+$").unwrap());
        let c = RuleKind::Pattern(Regex::new("^b+$").unwrap());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn custom_kinds_compare_by_identity() {
        let f = CheckFn::new(|_, _| true);
        let a = RuleKind::Custom(f.clone());
        let b = RuleKind::Custom(f);
        let c = RuleKind::Custom(CheckFn::new(|_, _| true));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
