//! Customer phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input is not exactly ten digits long.
    #[error("phone number must be exactly 10 digits (got {got})")]
    WrongLength {
        /// Number of characters in the input.
        got: usize,
    },
    /// The input contains a character that is not a decimal digit.
    #[error("phone number must contain only digits")]
    NonDigit,
}

/// A ten-digit customer phone number.
///
/// The order form accepts exactly ten decimal digits and nothing else - no
/// country code, no separators. This mirrors the checkout validation the
/// shop runs before handing the order to the messaging link.
///
/// ## Examples
///
/// ```
/// use patisserie_core::PhoneNumber;
///
/// assert!(PhoneNumber::parse("1234567890").is_ok());
/// assert!(PhoneNumber::parse("12345").is_err());        // too short
/// assert!(PhoneNumber::parse("12345678901").is_err());  // too long
/// assert!(PhoneNumber::parse("12345abcde").is_err());   // not digits
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Number of digits a phone number must have.
    pub const DIGITS: usize = 10;

    /// Parse a `PhoneNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, is not exactly ten
    /// characters, or contains a non-digit character.
    pub fn parse(s: &str) -> Result<Self, PhoneNumberError> {
        if s.is_empty() {
            return Err(PhoneNumberError::Empty);
        }

        if s.len() != Self::DIGITS {
            return Err(PhoneNumberError::WrongLength { got: s.len() });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneNumberError::NonDigit);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhoneNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
