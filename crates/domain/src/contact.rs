//! Guest contact value objects.
//!
//! Error variants carry input lengths rather than the raw values so that
//! contact details never end up in error metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use tableside_shared::{ErrorCode, ErrorEnvelope};

/// Validation failures for guest contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// `Email` is empty after trimming.
    EmptyEmail {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// `Email` is not structurally `local@domain.tld`.
    InvalidEmail {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// `Phone` violates the allowed pattern.
    InvalidPhone {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// `GuestName` is empty after trimming.
    EmptyGuestName {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
}

impl ContactError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyEmail { .. } | Self::InvalidEmail { .. } => {
                ErrorCode::new("domain", "invalid_email")
            },
            Self::InvalidPhone { .. } => ErrorCode::new("domain", "invalid_phone"),
            Self::EmptyGuestName { .. } => ErrorCode::new("domain", "invalid_guest_name"),
        }
    }
}

impl fmt::Display for ContactError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail { .. } => formatter.write_str("Email must be non-empty"),
            Self::InvalidEmail { .. } => {
                formatter.write_str("Email must be structured as local@domain.tld")
            },
            Self::InvalidPhone { .. } => {
                formatter.write_str("Phone must be a digit followed by at least six digits or dashes")
            },
            Self::EmptyGuestName { .. } => formatter.write_str("GuestName must be non-empty"),
        }
    }
}

impl std::error::Error for ContactError {}

impl From<ContactError> for ErrorEnvelope {
    fn from(error: ContactError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());

        match error {
            ContactError::EmptyEmail { input_length }
            | ContactError::InvalidEmail { input_length }
            | ContactError::InvalidPhone { input_length }
            | ContactError::EmptyGuestName { input_length } => {
                envelope.with_metadata("input_length", input_length.to_string())
            },
        }
    }
}

/// A structurally valid, lowercased email address.
///
/// Deserialization reparses the wire string, so malformed addresses are
/// rejected instead of bypassing [`Email::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(Box<str>);

impl Email {
    /// Parse an `Email` from user input.
    ///
    /// The input is trimmed and lowercased before validation.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, ContactError> {
        let raw = input.as_ref();
        let Some(trimmed) = trimmed_non_empty(raw) else {
            return Err(ContactError::EmptyEmail {
                input_length: raw.len(),
            });
        };

        if !is_valid_email(trimmed) {
            return Err(ContactError::InvalidEmail {
                input_length: raw.len(),
            });
        }

        Ok(Self(trimmed.to_ascii_lowercase().into_boxed_str()))
    }

    /// Access the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the underlying string.
    #[must_use]
    pub fn into_inner(self) -> Box<str> {
        self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for Email {
    type Error = ContactError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0.into()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A validated phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(Box<str>);

impl Phone {
    /// Parse a `Phone` from user input.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, ContactError> {
        let raw = input.as_ref();
        let trimmed = raw.trim();
        if !is_valid_phone(trimmed) {
            return Err(ContactError::InvalidPhone {
                input_length: raw.len(),
            });
        }

        Ok(Self(trimmed.to_owned().into_boxed_str()))
    }

    /// Access the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the underlying string.
    #[must_use]
    pub fn into_inner(self) -> Box<str> {
        self.0
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for Phone {
    type Error = ContactError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0.into()
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A non-empty guest name, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GuestName(Box<str>);

impl GuestName {
    /// Parse a `GuestName` from user input.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, ContactError> {
        let raw = input.as_ref();
        let Some(trimmed) = trimmed_non_empty(raw) else {
            return Err(ContactError::EmptyGuestName {
                input_length: raw.len(),
            });
        };

        Ok(Self(trimmed.to_owned().into_boxed_str()))
    }

    /// Access the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the underlying string.
    #[must_use]
    pub fn into_inner(self) -> Box<str> {
        self.0
    }
}

impl AsRef<str> for GuestName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for GuestName {
    type Error = ContactError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<GuestName> for String {
    fn from(name: GuestName) -> Self {
        name.0.into()
    }
}

impl fmt::Display for GuestName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A guest with validated contact details.
///
/// Each field has its own type, so swapping an email into the name slot is
/// a compile-time error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Guest name.
    pub name: GuestName,
    /// Contact email address.
    pub email: Email,
    /// Contact phone number.
    pub phone: Phone,
}

impl Customer {
    /// Build a customer from already-validated contact details.
    #[must_use]
    pub const fn new(name: GuestName, email: Email, phone: Phone) -> Self {
        Self { name, email, phone }
    }
}

fn trimmed_non_empty(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

fn is_valid_email(candidate: &str) -> bool {
    let mut parts = candidate.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }

    if domain.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !host.is_empty() && !tld.is_empty()
}

fn is_valid_phone(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_digit() {
        return false;
    }

    let rest = chars.as_str();
    rest.len() >= 6 && rest.chars().all(|ch| ch.is_ascii_digit() || ch == '-')
}
