//! Field validation for member registration
//!
//! Rules are plain functions evaluated eagerly, in declaration order, against a
//! `NewMemberInput`. Every field is checked (no short-circuiting) and failures
//! are collected into a field -> message map. When several rules fail for the
//! same field the last one's message is kept.

use std::collections::BTreeMap;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::domains::member::data::NewMemberInput;
use crate::domains::member::models::CreateMember;

pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const PHONE_NUMBER: &str = "phoneNumber";

const NAME_MIN_LEN: usize = 1;
const NAME_MAX_LEN: usize = 25;
const PHONE_MIN_LEN: usize = 10;
const PHONE_MAX_LEN: usize = 12;
const PHONE_MAX_INTEGER_DIGITS: usize = 12;
const EMAIL_MAX_LOCAL_LEN: usize = 64;
const EMAIL_MAX_DOMAIN_LEN: usize = 255;
const EMAIL_MAX_LABEL_LEN: usize = 63;

// Local-part characters outside quotes: RFC 5322 atext plus non-ASCII
const LOCAL_ATOM_CHAR: &str = r"[-A-Za-z0-9!#$%&'*+/=?^_`{|}~\x{80}-\x{FFFF}]";

// Inside a quoted string: atext, specials and space, or a backslash-escaped `\` or `"`
const LOCAL_QUOTED_CHAR: &str =
    r#"(?:[-A-Za-z0-9!#$%&'*.(),<>\[\]:; @+/=?^_`{|}~\x{80}-\x{FFFF}]|\\\\|\\")"#;

lazy_static! {
    // Dot-separated words, each an atom or a quoted string
    static ref EMAIL_LOCAL_PART: Regex = {
        let word = format!(r#"(?:{atom}+|"{quoted}+")"#, atom = LOCAL_ATOM_CHAR, quoted = LOCAL_QUOTED_CHAR);
        Regex::new(&format!(r"^{word}(?:\.{word})*$", word = word)).unwrap()
    };

    // Hostname label: alphanumeric (internationalized allowed), hyphens only on the inside
    static ref EMAIL_DOMAIN_LABEL: Regex = Regex::new(
        r"^[A-Za-z0-9\x{80}-\x{FFFF}](?:[-A-Za-z0-9\x{80}-\x{FFFF}]*[A-Za-z0-9\x{80}-\x{FFFF}])?$"
    ).unwrap();
}

// =============================================================================
// Violations
// =============================================================================

/// Field name -> message, at most one message per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Record a violation, replacing any earlier message for the same field
    pub fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

// =============================================================================
// Rules
// =============================================================================

struct Rule {
    field: &'static str,
    value: fn(&NewMemberInput) -> Option<&str>,
    check: fn(Option<&str>) -> bool,
    message: &'static str,
}

static RULES: &[Rule] = &[
    // name
    Rule {
        field: NAME,
        value: name_of,
        check: is_present,
        message: "must not be null",
    },
    Rule {
        field: NAME,
        value: name_of,
        check: name_length_ok,
        message: "size must be between 1 and 25",
    },
    Rule {
        field: NAME,
        value: name_of,
        check: has_no_digits,
        message: "Must not contain numbers",
    },
    // email
    Rule {
        field: EMAIL,
        value: email_of,
        check: is_present,
        message: "must not be null",
    },
    Rule {
        field: EMAIL,
        value: email_of,
        check: is_non_empty,
        message: "must not be empty",
    },
    Rule {
        field: EMAIL,
        value: email_of,
        check: email_syntax_ok,
        message: "must be a well-formed email address",
    },
    // phoneNumber
    Rule {
        field: PHONE_NUMBER,
        value: phone_number_of,
        check: is_present,
        message: "must not be null",
    },
    Rule {
        field: PHONE_NUMBER,
        value: phone_number_of,
        check: phone_length_ok,
        message: "size must be between 10 and 12",
    },
    Rule {
        field: PHONE_NUMBER,
        value: phone_number_of,
        check: phone_numeric_bounds_ok,
        message: "numeric value out of bounds (<12 digits>.<0 digits> expected)",
    },
    Rule {
        field: PHONE_NUMBER,
        value: phone_number_of,
        check: is_all_digits,
        message: "Must contain only numbers",
    },
];

/// Check a registration candidate against every field rule.
///
/// Returns an empty map when the candidate is valid.
pub fn validate(candidate: &NewMemberInput) -> FieldErrors {
    let mut errors = FieldErrors::default();

    for rule in RULES {
        if !(rule.check)((rule.value)(candidate)) {
            errors.insert(rule.field, rule.message);
        }
    }

    errors
}

/// Validate a candidate and, if it passes, turn it into insertable fields
pub fn validate_new_member(candidate: NewMemberInput) -> Result<CreateMember, FieldErrors> {
    let errors = validate(&candidate);

    match (candidate.name, candidate.email, candidate.phone_number) {
        (Some(name), Some(email), Some(phone_number)) if errors.is_empty() => Ok(CreateMember {
            name,
            email,
            phone_number,
        }),
        _ => Err(errors),
    }
}

fn name_of(candidate: &NewMemberInput) -> Option<&str> {
    candidate.name.as_deref()
}

fn email_of(candidate: &NewMemberInput) -> Option<&str> {
    candidate.email.as_deref()
}

fn phone_number_of(candidate: &NewMemberInput) -> Option<&str> {
    candidate.phone_number.as_deref()
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some()
}

fn is_non_empty(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.is_empty())
}

fn char_len_between(value: Option<&str>, min: usize, max: usize) -> bool {
    value.map_or(true, |s| (min..=max).contains(&s.chars().count()))
}

fn name_length_ok(value: Option<&str>) -> bool {
    char_len_between(value, NAME_MIN_LEN, NAME_MAX_LEN)
}

fn phone_length_ok(value: Option<&str>) -> bool {
    char_len_between(value, PHONE_MIN_LEN, PHONE_MAX_LEN)
}

fn has_no_digits(value: Option<&str>) -> bool {
    value.map_or(true, |s| !s.chars().any(|c| c.is_ascii_digit()))
}

fn is_all_digits(value: Option<&str>) -> bool {
    value.map_or(true, |s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
}

fn email_syntax_ok(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.is_empty() || is_well_formed_email(s))
}

fn phone_numeric_bounds_ok(value: Option<&str>) -> bool {
    value.map_or(true, |s| within_numeric_bounds(s, PHONE_MAX_INTEGER_DIGITS, 0))
}

/// Whether `value` is a plain decimal number with at most `max_integer`
/// significant integer digits and `max_fraction` significant fraction digits.
fn within_numeric_bounds(value: &str, max_integer: usize, max_fraction: usize) -> bool {
    let unsigned = value.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(value);
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    if integer.is_empty() && fraction.is_empty() {
        return false;
    }
    if !integer.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return false;
    }

    let integer_digits = integer.trim_start_matches('0').len();
    let fraction_digits = fraction.trim_end_matches('0').len();

    integer_digits <= max_integer && fraction_digits <= max_fraction
}

/// Lengths are counted in characters; every accepted character is in the BMP.
fn is_well_formed_email(value: &str) -> bool {
    // A quoted local part may itself contain '@'; the domain never does
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };

    local.chars().count() <= EMAIL_MAX_LOCAL_LEN
        && EMAIL_LOCAL_PART.is_match(local)
        && is_well_formed_domain(domain)
}

fn is_well_formed_domain(domain: &str) -> bool {
    if let Some(literal) = domain.strip_prefix('[').and_then(|d| d.strip_suffix(']')) {
        return is_ip_literal(literal);
    }

    domain.chars().count() <= EMAIL_MAX_DOMAIN_LEN
        && domain.split('.').all(|label| {
            label.chars().count() <= EMAIL_MAX_LABEL_LEN && EMAIL_DOMAIN_LABEL.is_match(label)
        })
}

/// `[192.0.2.1]`, `[2001:db8::1]` or `[IPv6:2001:db8::1]`
fn is_ip_literal(literal: &str) -> bool {
    match literal.strip_prefix("IPv6:") {
        Some(v6) => v6.parse::<Ipv6Addr>().is_ok(),
        None => literal.parse::<Ipv4Addr>().is_ok() || literal.parse::<Ipv6Addr>().is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, email: &str, phone: &str) -> NewMemberInput {
        NewMemberInput::new(name, email, phone)
    }

    #[test]
    fn valid_candidate_has_no_errors() {
        let errors = validate(&input("Jane Doe", "jane@example.com", "0987654321"));
        assert!(errors.is_empty(), "unexpected errors: {}", errors);
    }

    #[test]
    fn name_with_digits_is_rejected() {
        let errors = validate(&input("Jane123", "jane@example.com", "0987654321"));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(NAME), Some("Must not contain numbers"));
    }

    #[test]
    fn name_length_bounds() {
        let max = "a".repeat(25);
        assert!(validate(&input(&max, "a@b.com", "0987654321")).is_empty());

        let too_long = "a".repeat(26);
        let errors = validate(&input(&too_long, "a@b.com", "0987654321"));
        assert_eq!(errors.get(NAME), Some("size must be between 1 and 25"));

        let errors = validate(&input("", "a@b.com", "0987654321"));
        assert_eq!(errors.get(NAME), Some("size must be between 1 and 25"));
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        // 25 characters, more than 25 bytes
        let name = "é".repeat(25);
        assert!(validate(&input(&name, "a@b.com", "0987654321")).is_empty());
    }

    #[test]
    fn name_length_counts_astral_characters_once() {
        // 25 emoji are 50 UTF-16 units but 25 characters
        let name = "😀".repeat(25);
        assert!(validate(&input(&name, "a@b.com", "0987654321")).is_empty());

        let name = "😀".repeat(26);
        let errors = validate(&input(&name, "a@b.com", "0987654321"));
        assert_eq!(errors.get(NAME), Some("size must be between 1 and 25"));
    }

    #[test]
    fn email_local_part_limit_counts_characters() {
        let at_limit = format!("{}@example.com", "é".repeat(64));
        assert!(!validate(&input("Jane", &at_limit, "0987654321")).contains(EMAIL));

        let over_limit = format!("{}@example.com", "é".repeat(65));
        assert!(validate(&input("Jane", &over_limit, "0987654321")).contains(EMAIL));
    }

    #[test]
    fn non_digit_phone_reports_pattern_message() {
        // Fails size, numeric bounds and pattern; the pattern message is kept
        let errors = validate(&input("Jane Doe", "jane@example.com", "invalid-phone"));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(PHONE_NUMBER), Some("Must contain only numbers"));
    }

    #[test]
    fn short_digit_phone_reports_size_message() {
        let errors = validate(&input("Jane Doe", "jane@example.com", "12345"));
        assert_eq!(errors.get(PHONE_NUMBER), Some("size must be between 10 and 12"));
    }

    #[test]
    fn thirteen_digit_phone_reports_numeric_bounds_message() {
        let errors = validate(&input("Jane Doe", "jane@example.com", "1234567890123"));
        assert_eq!(
            errors.get(PHONE_NUMBER),
            Some("numeric value out of bounds (<12 digits>.<0 digits> expected)")
        );
    }

    #[test]
    fn phone_length_bounds_are_inclusive() {
        assert!(validate(&input("Jane", "a@b.com", "1234567890")).is_empty());
        assert!(validate(&input("Jane", "a@b.com", "123456789012")).is_empty());
    }

    #[test]
    fn empty_email_reports_not_empty() {
        let errors = validate(&input("Jane Doe", "", "0987654321"));
        assert_eq!(errors.get(EMAIL), Some("must not be empty"));
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in [
            "plainaddress",
            "@example.com",
            "jane@",
            "jane@@example.com",
            "jane.@example.com",
            "jane..doe@example.com",
            "jane@-example.com",
            "jane@example..com",
            "jane@example.com.",
            "jane doe@example.com",
            "jane@[999.0.0.1]",
            "jane@[example.com]",
            "\"jane@example.com",
            "\"jane\"doe\"@example.com",
            "jane@exämple-.com",
        ] {
            let errors = validate(&input("Jane Doe", email, "0987654321"));
            assert_eq!(
                errors.get(EMAIL),
                Some("must be a well-formed email address"),
                "expected {:?} to be rejected",
                email
            );
        }
    }

    #[test]
    fn well_formed_emails_are_accepted() {
        for email in [
            "jane@example.com",
            "jane.doe+tag@sub.example.co.uk",
            "o'brien@example.org",
            "user@localhost",
            "josé@example.com",
            "jane@exämple.com",
            "jane@[127.0.0.1]",
            "jane@[IPv6:2001:db8::1]",
            "\"jane doe\"@example.com",
            "\"jane@home\"@example.com",
            "\"jane\\\"q\"@example.com",
        ] {
            let errors = validate(&input("Jane Doe", email, "0987654321"));
            assert!(!errors.contains(EMAIL), "expected {:?} to be accepted", email);
        }
    }

    #[test]
    fn missing_fields_are_reported() {
        let errors = validate(&NewMemberInput::default());

        assert_eq!(errors.get(NAME), Some("must not be null"));
        // not-empty runs after not-null and also fails on a missing value
        assert_eq!(errors.get(EMAIL), Some("must not be empty"));
        assert_eq!(errors.get(PHONE_NUMBER), Some("must not be null"));
    }

    #[test]
    fn all_violated_fields_are_reported_together() {
        let errors = validate(&input("R2D2", "not-an-email", "555"));

        assert_eq!(errors.len(), 3);
        assert!(errors.contains(NAME));
        assert!(errors.contains(EMAIL));
        assert!(errors.contains(PHONE_NUMBER));
    }

    #[test]
    fn validate_new_member_yields_insertable_fields() {
        let create = validate_new_member(input("Jane Doe", "jane@example.com", "0987654321"))
            .unwrap();

        assert_eq!(create.name, "Jane Doe");
        assert_eq!(create.email, "jane@example.com");
        assert_eq!(create.phone_number, "0987654321");
    }

    #[test]
    fn validate_new_member_returns_violations() {
        let errors = validate_new_member(input("Jane Doe", "jane@example.com", "invalid-phone"))
            .unwrap_err();

        assert_eq!(errors.get(PHONE_NUMBER), Some("Must contain only numbers"));
    }

    #[test]
    fn numeric_bounds_ignore_leading_zeros() {
        assert!(within_numeric_bounds("0000123456789012", 12, 0));
        assert!(!within_numeric_bounds("1234567890123", 12, 0));
        assert!(!within_numeric_bounds("12.5", 12, 0));
        assert!(within_numeric_bounds("12.0", 12, 0));
        assert!(!within_numeric_bounds("", 12, 0));
        assert!(!within_numeric_bounds("12a", 12, 0));
    }

    #[test]
    fn display_lists_each_field() {
        let errors = validate(&input("Jane123", "jane@example.com", "abc"));
        let rendered = errors.to_string();

        assert!(rendered.contains("name: Must not contain numbers"));
        assert!(rendered.contains("phoneNumber: Must contain only numbers"));
    }
}
