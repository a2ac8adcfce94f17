//! Dining tables and seating.
//!
//! `Table` is an entity: it has an identity (`TableNumber`) and a lifecycle,
//! unlike the value objects elsewhere in this crate. The guests-never-exceed-
//! capacity invariant is enforced by the type itself; there is no public way
//! to set the seated count directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use tableside_shared::{ErrorCode, ErrorEnvelope};

/// Validation failures for tables and seating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// Table number must be positive (tables are numbered from 1).
    InvalidTableNumber {
        /// Raw value that failed validation.
        value: i64,
    },
    /// Capacity must be positive.
    NonPositiveCapacity {
        /// Raw value that failed validation.
        value: i64,
    },
    /// A party size must be positive.
    NonPositiveGuestCount {
        /// Raw value that failed validation.
        value: i64,
    },
    /// Seating the party would exceed the table capacity.
    ExceedsCapacity {
        /// Requested party size.
        requested: i64,
        /// Guests already seated.
        seated: u32,
        /// Table capacity.
        capacity: u32,
    },
}

impl TableError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidTableNumber { .. } => ErrorCode::new("domain", "invalid_table_number"),
            Self::NonPositiveCapacity { .. } => ErrorCode::new("domain", "invalid_capacity"),
            Self::NonPositiveGuestCount { .. } => ErrorCode::new("domain", "invalid_guest_count"),
            Self::ExceedsCapacity { .. } => ErrorCode::new("domain", "exceeds_capacity"),
        }
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTableNumber { .. } => formatter.write_str("TableNumber must be >= 1"),
            Self::NonPositiveCapacity { .. } => formatter.write_str("Capacity must be positive"),
            Self::NonPositiveGuestCount { .. } => {
                formatter.write_str("Guest count must be positive")
            },
            Self::ExceedsCapacity { .. } => formatter.write_str("Exceeds table capacity"),
        }
    }
}

impl std::error::Error for TableError {}

impl From<TableError> for ErrorEnvelope {
    fn from(error: TableError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());

        match error {
            TableError::InvalidTableNumber { value }
            | TableError::NonPositiveCapacity { value }
            | TableError::NonPositiveGuestCount { value } => {
                envelope.with_metadata("value", value.to_string())
            },
            TableError::ExceedsCapacity {
                requested,
                seated,
                capacity,
            } => envelope
                .with_metadata("requested", requested.to_string())
                .with_metadata("seated", seated.to_string())
                .with_metadata("capacity", capacity.to_string()),
        }
    }
}

/// Identity of a dining table.
///
/// Deserialization runs the same range check as [`TableNumber::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TableNumber(u32);

impl TableNumber {
    /// Validate and build a table number from a raw value.
    pub const fn new(value: i64) -> Result<Self, TableError> {
        if value < 1 || value > u32::MAX as i64 {
            return Err(TableError::InvalidTableNumber { value });
        }

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "range checked above"
        )]
        let value = value as u32;
        Ok(Self(value))
    }

    /// Returns the table number as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for TableNumber {
    type Error = TableError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TableNumber> for i64 {
    fn from(number: TableNumber) -> Self {
        Self::from(number.0)
    }
}

impl fmt::Display for TableNumber {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A dining table with enforced seating invariants.
///
/// Deserialization rebuilds the table through [`Table::new`] and
/// [`Table::seat_guests`], so a wire value with more guests than seats is
/// rejected rather than materialized in a broken state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TableRecord")]
pub struct Table {
    number: TableNumber,
    capacity: u32,
    seated: u32,
}

/// Raw wire shape for [`Table`], validated on the way in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableRecord {
    number: TableNumber,
    capacity: u32,
    seated: u32,
}

impl TryFrom<TableRecord> for Table {
    type Error = TableError;

    fn try_from(record: TableRecord) -> Result<Self, Self::Error> {
        let mut table = Self::new(record.number, i64::from(record.capacity))?;
        if record.seated > 0 {
            table.seat_guests(i64::from(record.seated))?;
        }

        Ok(table)
    }
}

impl Table {
    /// Create an empty table with a positive capacity.
    pub const fn new(number: TableNumber, capacity: i64) -> Result<Self, TableError> {
        if capacity < 1 || capacity > u32::MAX as i64 {
            return Err(TableError::NonPositiveCapacity { value: capacity });
        }

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "range checked above"
        )]
        let capacity = capacity as u32;
        Ok(Self {
            number,
            capacity,
            seated: 0,
        })
    }

    /// Returns the table identity.
    #[must_use]
    pub const fn number(&self) -> TableNumber {
        self.number
    }

    /// Returns the table capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the number of guests currently seated.
    #[must_use]
    pub const fn seated(&self) -> u32 {
        self.seated
    }

    /// Returns the number of free seats.
    #[must_use]
    pub const fn available_seats(&self) -> u32 {
        self.capacity - self.seated
    }

    /// Seat a party at the table.
    pub const fn seat_guests(&mut self, count: i64) -> Result<(), TableError> {
        if count < 1 {
            return Err(TableError::NonPositiveGuestCount { value: count });
        }

        if count > self.available_seats() as i64 {
            return Err(TableError::ExceedsCapacity {
                requested: count,
                seated: self.seated,
                capacity: self.capacity,
            });
        }

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "bounded by available seats above"
        )]
        let count = count as u32;
        self.seated += count;
        Ok(())
    }

    /// Clear the table when the party leaves.
    pub const fn clear(&mut self) {
        self.seated = 0;
    }
}
