//! Phone number type used as the checkout messaging destination.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains something other than digits and separators.
    #[error("phone number contains invalid character '{0}'")]
    InvalidCharacter(char),
    /// Too few digits.
    #[error("phone number must have at least {min} digits")]
    TooShort {
        /// Minimum allowed digit count.
        min: usize,
    },
    /// Too many digits.
    #[error("phone number must have at most {max} digits")]
    TooLong {
        /// Maximum allowed digit count.
        max: usize,
    },
}

/// An international phone number, stored as digits only.
///
/// Messaging deep links expect the number without `+`, spaces or dashes
/// (`https://wa.me/56912345678`), so parsing strips those separators.
///
/// ## Constraints
///
/// - A single leading `+` is allowed
/// - Spaces, dashes, dots and parentheses are ignored
/// - 7-15 digits (E.164 maximum)
///
/// ## Examples
///
/// ```
/// use vitrina_core::PhoneNumber;
///
/// let phone = PhoneNumber::parse("+56 9 1234 5678").unwrap();
/// assert_eq!(phone.as_str(), "56912345678");
///
/// assert!(PhoneNumber::parse("").is_err());
/// assert!(PhoneNumber::parse("call me").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Minimum digit count.
    pub const MIN_DIGITS: usize = 7;
    /// Maximum digit count (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `PhoneNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Contains characters other than digits, separators or a leading `+`
    /// - Has fewer than 7 or more than 15 digits
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let mut digits = String::with_capacity(body.len());
        for c in body.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                other => return Err(PhoneError::InvalidCharacter(other)),
            }
        }

        if digits.len() < Self::MIN_DIGITS {
            return Err(PhoneError::TooShort {
                min: Self::MIN_DIGITS,
            });
        }
        if digits.len() > Self::MAX_DIGITS {
            return Err(PhoneError::TooLong {
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(digits))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}", self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_separators() {
        let phone = PhoneNumber::parse("+56 (9) 1234-5678").unwrap();
        assert_eq!(phone.as_str(), "56912345678");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(PhoneNumber::parse("   "), Err(PhoneError::Empty));
    }

    #[test]
    fn test_parse_invalid_character() {
        assert_eq!(
            PhoneNumber::parse("5691234x678"),
            Err(PhoneError::InvalidCharacter('x'))
        );
        // Only a single leading plus is accepted
        assert_eq!(
            PhoneNumber::parse("++56912345678"),
            Err(PhoneError::InvalidCharacter('+'))
        );
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            PhoneNumber::parse("12345"),
            Err(PhoneError::TooShort { .. })
        ));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            PhoneNumber::parse(&"1".repeat(16)),
            Err(PhoneError::TooLong { .. })
        ));
    }

    #[test]
    fn test_display_has_plus() {
        let phone = PhoneNumber::parse("56912345678").unwrap();
        assert_eq!(phone.to_string(), "+56912345678");
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = PhoneNumber::parse("+56912345678").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"56912345678\"");

        let parsed: PhoneNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }

    #[test]
    fn test_from_str() {
        let phone: PhoneNumber = "5691234 5678".parse().unwrap();
        assert_eq!(phone.as_str(), "56912345678");
    }
}
