// Credential shape validation
// Decision: Email shape is a configurable policy, not a hard-coded ".com" check
// Decision: Both fields are always checked so the caller can show every error at once

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Shown when the email does not match the configured policy
pub const INVALID_EMAIL_MESSAGE: &str = "Please provide a valid email address";

/// Minimum password length used when nothing is configured
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// local@domain.tld, no whitespace, no second '@', non-empty final label
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s.]+$";

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// Form field an error message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Email,
    Password,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level error messages, serialized as `{"email": "...", "password": "..."}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field error map
    pub fn single(field: Field, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Which email addresses are accepted at signup and login
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EmailPolicy {
    /// Any `local@domain.tld` shaped address
    #[default]
    Basic,
    /// Basic shape plus one of the listed suffixes (e.g. ".com")
    AllowedSuffixes(Vec<String>),
}

impl EmailPolicy {
    /// Parse `basic` or `suffix:.com,.org`; anything unrecognised falls back to basic
    pub fn from_str(s: &str) -> Self {
        let s = s.trim();
        match s.split_once(':') {
            Some((kind, list)) if kind.eq_ignore_ascii_case("suffix") => {
                let suffixes: Vec<String> = list
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if suffixes.is_empty() {
                    EmailPolicy::Basic
                } else {
                    EmailPolicy::AllowedSuffixes(suffixes)
                }
            }
            _ => EmailPolicy::Basic,
        }
    }

    pub fn accepts(&self, email: &str) -> bool {
        if email.is_empty() || !email_regex().is_match(email) {
            return false;
        }
        match self {
            EmailPolicy::Basic => true,
            EmailPolicy::AllowedSuffixes(suffixes) => {
                suffixes.iter().any(|suffix| email.ends_with(suffix.as_str()))
            }
        }
    }
}

/// Shape rules for submitted credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPolicy {
    pub email: EmailPolicy,
    pub min_password_length: usize,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            email: EmailPolicy::Basic,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

impl CredentialPolicy {
    pub fn password_message(&self) -> String {
        format!(
            "Password should be at least {} characters long",
            self.min_password_length
        )
    }

    /// Check both fields independently; an empty map means the input is acceptable
    pub fn validate(&self, email: &str, password: &str) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if !self.email.accepts(email) {
            errors.insert(Field::Email, INVALID_EMAIL_MESSAGE);
        }

        if password.trim().chars().count() < self.min_password_length {
            errors.insert(Field::Password, self.password_message());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_policy_accepts_common_domains() {
        let policy = EmailPolicy::Basic;
        for email in [
            "user@example.com",
            "first.last@example.org",
            "someone@mail.example.co.uk",
            "x+tag@sub.domain.io",
        ] {
            assert!(policy.accepts(email), "{email} should be accepted");
        }
    }

    #[test]
    fn test_basic_policy_rejects_bad_shapes() {
        let policy = EmailPolicy::Basic;
        for email in [
            "",
            "plainaddress",
            "@example.com",
            "user@",
            "user@localhost",
            "user@example.",
            "user@@example.com",
            "user name@example.com",
            "user@exa mple.com",
        ] {
            assert!(!policy.accepts(email), "{email:?} should be rejected");
        }
    }

    #[test]
    fn test_suffix_policy() {
        let policy = EmailPolicy::from_str("suffix:.com");
        assert_eq!(policy, EmailPolicy::AllowedSuffixes(vec![".com".to_string()]));
        assert!(policy.accepts("user@example.com"));
        assert!(!policy.accepts("user@example.org"));
        assert!(!policy.accepts("user.com"));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(EmailPolicy::from_str("basic"), EmailPolicy::Basic);
        assert_eq!(EmailPolicy::from_str(""), EmailPolicy::Basic);
        assert_eq!(EmailPolicy::from_str("suffix:"), EmailPolicy::Basic);
        assert_eq!(
            EmailPolicy::from_str("SUFFIX: .com , .org"),
            EmailPolicy::AllowedSuffixes(vec![".com".to_string(), ".org".to_string()])
        );
    }

    #[test]
    fn test_password_length_is_trimmed() {
        let policy = CredentialPolicy::default();
        assert!(policy.validate("a@b.io", "12345678").is_empty());
        let errors = policy.validate("a@b.io", "   1234567   ");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(Field::Password),
            Some("Password should be at least 8 characters long")
        );
    }

    #[test]
    fn test_both_fields_reported() {
        let errors = CredentialPolicy::default().validate("nope", "short");
        assert!(errors.contains(Field::Email));
        assert!(errors.contains(Field::Password));
        assert_eq!(errors.get(Field::Email), Some(INVALID_EMAIL_MESSAGE));
    }

    #[test]
    fn test_field_errors_serialize_as_map() {
        let mut errors = FieldErrors::single(Field::Password, "too short");
        errors.insert(Field::Email, "bad");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"email": "bad", "password": "too short"}));
    }
}
