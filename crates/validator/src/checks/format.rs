//! Format grammar checks: email, URL, domain, IP, JSON text.

use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;
use url::Url;

/// WHATWG-style email grammar with a required dotted domain. Deliberately
/// stricter than RFC 5322 (no quoted local parts, no address literals).
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^[A-Za-z0-9.!\#$%&'*+/=?^_`{|}~-]+
        @
        [A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?
        (?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+
        $",
    )
    .expect("email grammar compiles")
});

#[must_use]
pub(crate) fn is_email(input: &str) -> bool {
    EMAIL.is_match(input)
}

/// Absolute URL with a host; scheme-relative and bare-hostname inputs fail.
#[must_use]
pub(crate) fn is_url(input: &str) -> bool {
    Url::parse(input).map(|url| url.has_host()).unwrap_or(false)
}

/// RFC 1123 hostname rules:
///
/// - total length 1..=253 (excluding an optional trailing dot),
/// - labels 1..=63 characters from `[A-Za-z0-9-]`,
/// - labels never start or end with a hyphen.
#[must_use]
pub(crate) fn is_domain(input: &str) -> bool {
    let hostname = input.strip_suffix('.').unwrap_or(input);
    if hostname.is_empty() || hostname.len() > 253 {
        return false;
    }
    hostname.split('.').all(valid_label)
}

fn valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// IPv4 or IPv6 address.
#[must_use]
pub(crate) fn is_ip(input: &str) -> bool {
    input.parse::<IpAddr>().is_ok()
}

/// Syntactically valid JSON text (RFC 8259), primitives included.
#[must_use]
pub(crate) fn is_json(input: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(input).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("user@example.com", true)]
    #[case("first.last+tag@sub.example.org", true)]
    #[case("user@localhost", false)] // no dotted domain
    #[case("not-an-email", false)]
    #[case("a@b@c.com", false)]
    #[case("user@-bad.com", false)]
    fn email(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_email(input), expected);
    }

    #[rstest]
    #[case("https://example.com/path?q=1", true)]
    #[case("ftp://files.example.org", true)]
    #[case("example.com", false)] // no scheme
    #[case("not-a-url", false)]
    #[case("http://", false)]
    fn url(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_url(input), expected);
    }

    #[rstest]
    #[case("example.com", true)]
    #[case("localhost", true)]
    #[case("example.com.", true)] // FQDN trailing dot
    #[case("sub.example-site.co.uk", true)]
    #[case("-bad.com", false)]
    #[case("a..b", false)]
    #[case("", false)]
    fn domain(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_domain(input), expected);
    }

    #[rstest]
    #[case("127.0.0.1", true)]
    #[case("::1", true)]
    #[case("2001:db8::ff00:42:8329", true)]
    #[case("999.1.1.1", false)]
    #[case("example.com", false)]
    fn ip(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_ip(input), expected);
    }

    #[rstest]
    #[case(r#"{"a": [1, 2]}"#, true)]
    #[case("[1,2,3]", true)]
    #[case("42", true)]
    #[case("null", true)]
    #[case(r#"{"a": 1"#, false)]
    #[case("undefined", false)]
    fn json(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_json(input), expected);
    }
}
