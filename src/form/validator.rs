//! Predicate rules evaluated at the input boundary.
//!
//! Every rule is pure. Text rules look at the trimmed value, so whitespace
//! never counts towards "required" or a length bound.

use std::sync::LazyLock;

use regex::Regex;

use crate::form::value::FieldValue;

// Something, an @, something, a dot, something. No whitespace anywhere.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\S+@\S+\.\S+$").expect("EMAIL_REGEX: invalid regex pattern")
});

/// A single validation rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Validator {
    /// Non-empty after trimming.
    Require,
    /// At least `n` characters after trimming.
    MinLength(usize),
    /// At most `n` characters after trimming.
    MaxLength(usize),
    /// Parses as a number `>=` the bound.
    Min(f64),
    /// Parses as a number `<=` the bound.
    Max(f64),
    /// Conventional `local@domain.tld` shape.
    Email,
    /// A file has been picked.
    File,
}

/// Values a [`Validator`] knows how to inspect.
pub trait ValidatedValue {
    /// Text content, or `None` for non-text values such as files.
    fn as_text(&self) -> Option<&str>;

    /// Whether the value carries anything at all.
    fn is_present(&self) -> bool;
}

impl ValidatedValue for str {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }

    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl ValidatedValue for String {
    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }

    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl ValidatedValue for FieldValue {
    fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text.as_str()),
            FieldValue::File(_) => None,
        }
    }

    fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::File(upload) => upload.is_some(),
        }
    }
}

impl Validator {
    pub fn check<V: ValidatedValue + ?Sized>(&self, value: &V) -> bool {
        match self {
            // Text never satisfies the file rule, whatever it spells.
            Validator::File => value.as_text().is_none() && value.is_present(),
            rule => value.as_text().is_some_and(|text| rule.check_text(text)),
        }
    }

    fn check_text(&self, text: &str) -> bool {
        let trimmed = text.trim();
        match *self {
            Validator::Require => !trimmed.is_empty(),
            Validator::MinLength(min) => trimmed.chars().count() >= min,
            Validator::MaxLength(max) => trimmed.chars().count() <= max,
            Validator::Min(min) => trimmed.parse::<f64>().is_ok_and(|n| n >= min),
            Validator::Max(max) => trimmed.parse::<f64>().is_ok_and(|n| n <= max),
            Validator::Email => EMAIL_REGEX.is_match(text),
            Validator::File => false,
        }
    }
}

/// AND of every rule against `value`. An empty rule list accepts anything.
pub fn validate<V: ValidatedValue + ?Sized>(value: &V, validators: &[Validator]) -> bool {
    validators.iter().all(|validator| validator.check(value))
}
