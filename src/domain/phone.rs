//! PhoneNumber value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Shortest subscriber number we accept, in digits.
const MIN_DIGITS: usize = 7;

/// E.164 caps a full international number at 15 digits.
const MAX_DIGITS: usize = 15;

/// A phone number that has passed validation and may be submitted for
/// registration.
///
/// Formatting is kept as written; only the shape is checked.
///
/// # Example
///
/// ```
/// use identity_client::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("+1 (555) 123-4567").unwrap();
/// assert_eq!(phone.digits_only(), "15551234567");
/// assert!(phone.is_international());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber, validating the format.
    ///
    /// # Validation Rules
    ///
    /// - Between 7 and 15 digits
    /// - Can contain: digits, spaces, hyphens, parentheses, periods
    /// - A leading `+` is allowed, nowhere else
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the phone format is invalid.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let phone = phone.into();

        if !Self::is_valid(&phone) {
            return Err(ValidationError::InvalidPhone(phone));
        }

        Ok(Self(phone))
    }

    fn is_valid(phone: &str) -> bool {
        let trimmed = phone.trim();
        let body = trimmed.strip_prefix('+').unwrap_or(trimmed);

        let allowed = body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '.'));
        if !allowed {
            return false;
        }

        let digits = body.chars().filter(|c| c.is_ascii_digit()).count();
        (MIN_DIGITS..=MAX_DIGITS).contains(&digits)
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Get the phone number with only digits (no formatting).
    pub fn digits_only(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    /// Whether the number was written with a leading `+` country prefix.
    pub fn is_international(&self) -> bool {
        self.0.trim_start().starts_with('+')
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        PhoneNumber::new(value)
    }
}
