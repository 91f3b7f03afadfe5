//! Fluent rule builder.
//!
//! Each call appends exactly one rule and returns the builder for further
//! chaining; [`RuleBuilder::message`] patches the most recently appended rule
//! only (a no-op on an empty builder). [`RuleBuilder::build`] materializes
//! the canonical spec — pattern compilation and date-format well-formedness
//! are checked there, so a chain itself never fails mid-way.

use regex::Regex;
use serde_json::{Map, Value};

use crate::checks::datetime;
use crate::foundation::RuleError;
use crate::rules::rule::{
    BoundKind, CheckFn, FormatKind, Rule, RuleKind, Rules, SetKind, TypeKind,
};

/// Entries whose validation is deferred to [`RuleBuilder::build`].
#[derive(Debug, Clone)]
enum Pending {
    Ready(RuleKind),
    Pattern(String),
    DateFormat(String),
}

/// Incrementally builds a [`Rules`] spec.
///
/// # Examples
///
/// ```rust,ignore
/// use sift_validator::RuleBuilder;
///
/// let rules = RuleBuilder::new()
///     .required()
///     .min(3.0).message("pick a longer name")
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleBuilder {
    items: Vec<(Pending, Option<String>)>,
}

impl RuleBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, pending: Pending) -> Self {
        self.items.push((pending, None));
        self
    }

    fn push_kind(self, kind: RuleKind) -> Self {
        self.push(Pending::Ready(kind))
    }

    /// Field must be present and non-empty.
    #[must_use]
    pub fn required(self) -> Self {
        self.push_kind(RuleKind::Required)
    }

    /// Value must be an integer (no implicit truncation of decimals).
    #[must_use]
    pub fn int(self) -> Self {
        self.push_kind(RuleKind::TypeOf(TypeKind::Int))
    }

    /// Alias for [`int`](Self::int); the spec retains the canonical kind.
    #[must_use]
    pub fn integer(self) -> Self {
        self.int()
    }

    /// Value must be a number or numeric string.
    #[must_use]
    pub fn decimal(self) -> Self {
        self.push_kind(RuleKind::TypeOf(TypeKind::Decimal))
    }

    /// Alias for [`decimal`](Self::decimal).
    #[must_use]
    pub fn float(self) -> Self {
        self.decimal()
    }

    /// Value must be a genuine boolean (truthy strings fail).
    #[must_use]
    pub fn boolean(self) -> Self {
        self.push_kind(RuleKind::TypeOf(TypeKind::Boolean))
    }

    /// Value must be an email address.
    #[must_use]
    pub fn email(self) -> Self {
        self.push_kind(RuleKind::Format(FormatKind::Email))
    }

    /// Value must be an absolute URL with a host.
    #[must_use]
    pub fn url(self) -> Self {
        self.push_kind(RuleKind::Format(FormatKind::Url))
    }

    /// Value must be an RFC 1123 hostname.
    #[must_use]
    pub fn domain(self) -> Self {
        self.push_kind(RuleKind::Format(FormatKind::Domain))
    }

    /// Value must be an IPv4 or IPv6 address.
    #[must_use]
    pub fn ip(self) -> Self {
        self.push_kind(RuleKind::Format(FormatKind::Ip))
    }

    /// Value must parse as a calendar date (permissive layouts).
    #[must_use]
    pub fn date(self) -> Self {
        self.push_kind(RuleKind::Format(FormatKind::Date))
    }

    /// Value must be syntactically valid JSON text.
    #[must_use]
    pub fn json(self) -> Self {
        self.push_kind(RuleKind::Format(FormatKind::Json))
    }

    /// Numeric values compare against the threshold; everything else
    /// compares its character length.
    #[must_use]
    pub fn min(self, threshold: f64) -> Self {
        self.push_kind(RuleKind::Bound {
            kind: BoundKind::Min,
            threshold,
        })
    }

    /// Upper-bound counterpart of [`min`](Self::min).
    #[must_use]
    pub fn max(self, threshold: f64) -> Self {
        self.push_kind(RuleKind::Bound {
            kind: BoundKind::Max,
            threshold,
        })
    }

    /// Value must strictly equal the other field's value.
    #[must_use]
    pub fn matches(self, other: impl Into<String>) -> Self {
        self.push_kind(RuleKind::Matches {
            other: other.into(),
        })
    }

    /// Alias for [`matches`](Self::matches).
    #[must_use]
    pub fn same(self, other: impl Into<String>) -> Self {
        self.matches(other)
    }

    /// Stringified value must match the pattern. Compilation happens in
    /// [`build`](Self::build).
    #[must_use]
    pub fn pattern(self, pattern: impl Into<String>) -> Self {
        self.push(Pending::Pattern(pattern.into()))
    }

    /// Value must be one of the candidates.
    #[must_use]
    pub fn one_of<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_kind(RuleKind::Set {
            kind: SetKind::In,
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Value must not be one of the candidates.
    #[must_use]
    pub fn not_one_of<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_kind(RuleKind::Set {
            kind: SetKind::NotIn,
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Stringified value must parse under the strftime format and survive a
    /// byte-for-byte re-serialization round trip. Format well-formedness is
    /// checked in [`build`](Self::build).
    #[must_use]
    pub fn date_format(self, format: impl Into<String>) -> Self {
        self.push(Pending::DateFormat(format.into()))
    }

    /// First-class custom predicate over `(value, full data map)`.
    #[must_use]
    pub fn check<F>(self, callback: F) -> Self
    where
        F: Fn(&Value, &Map<String, Value>) -> bool + Send + Sync + 'static,
    {
        self.push_kind(RuleKind::Custom(CheckFn::new(callback)))
    }

    /// Cross-field confirmation marker; the engine rewrites it into a
    /// `match` against `{field}_confirmation`.
    #[must_use]
    pub fn confirmed(self) -> Self {
        self.push_kind(RuleKind::Confirmed)
    }

    /// Attaches a message override to the most recently appended rule.
    ///
    /// On an empty builder this is a no-op, not an error.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        if let Some((_, slot)) = self.items.last_mut() {
            *slot = Some(message.into());
        }
        self
    }

    /// Materializes the canonical spec, compiling deferred patterns and
    /// checking date formats.
    pub fn build(self) -> Result<Rules, RuleError> {
        let mut rules = Rules::new();
        for (pending, message) in self.items {
            let kind = match pending {
                Pending::Ready(kind) => kind,
                Pending::Pattern(pattern) => {
                    let compiled =
                        Regex::new(&pattern).map_err(|source| RuleError::InvalidPattern {
                            pattern,
                            source: Box::new(source),
                        })?;
                    RuleKind::Pattern(compiled)
                }
                Pending::DateFormat(format) => {
                    if !datetime::is_well_formed_format(&format) {
                        return Err(RuleError::InvalidDateFormat(format));
                    }
                    RuleKind::DateFormat(format)
                }
            };
            rules.push_rule(Rule::with_message(kind, message));
        }
        Ok(rules)
    }

    /// Materializes straight to the best-effort DSL string form.
    ///
    /// Lossy for custom predicates — see [`Rules::to_rule_string`].
    pub fn into_rule_string(self) -> Result<String, RuleError> {
        Ok(self.build()?.to_rule_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================
