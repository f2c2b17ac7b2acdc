use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Record;

// ascii word characters, same as the classic `\w` email check
static EMAIL_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$",
    )
    .expect("email pattern compiles")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValidationFailure {
    EmptyName,
    EmptyEmail,
    MalformedEmail,
}

impl ValidationFailure {
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyName => "Name cannot be empty",
            Self::EmptyEmail => "Email cannot be empty",
            Self::MalformedEmail => "Enter a valid email id. Ex: 'example@xmail.com'",
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

pub fn is_non_empty(value: &str) -> bool {
    !value.is_empty()
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_FORMAT.is_match(value)
}

// every failing reason is reported, not just the first
pub fn validate(record: &Record) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();
    if !is_non_empty(&record.name) {
        failures.push(ValidationFailure::EmptyName);
    }
    if !is_non_empty(&record.email) {
        failures.push(ValidationFailure::EmptyEmail);
    } else if !is_valid_email(&record.email) {
        failures.push(ValidationFailure::MalformedEmail);
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("aaron.miles@mailinator.co.uk"));
        assert!(is_valid_email("first-last@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("bad"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@b.c"));
        assert!(!is_valid_email("a@b.company"));
        assert!(!is_valid_email("a..b@c.com"));
        assert!(!is_valid_email("é@b.com"));
    }

    #[test]
    fn empty_email_is_not_also_malformed() {
        let record = Record::new("1", "Ann", "", "admin");
        assert_eq!(validate(&record), vec![ValidationFailure::EmptyEmail]);
    }

    #[test]
    fn reports_every_failing_field() {
        let record = Record::new("1", "", "bad", "admin");
        assert_eq!(
            validate(&record),
            vec![ValidationFailure::EmptyName, ValidationFailure::MalformedEmail]
        );
        let record = Record::new("1", "", "", "admin");
        assert_eq!(
            validate(&record),
            vec![ValidationFailure::EmptyName, ValidationFailure::EmptyEmail]
        );
    }
}
