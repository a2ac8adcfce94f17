//! Orders, order identity, and line quantities.

use crate::contact::Customer;
use crate::money::{Money, MoneyError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use tableside_shared::{ErrorCode, ErrorEnvelope};

/// Hard upper bound for items per order line (a business rule, not a
/// technical limit).
pub const MAX_QUANTITY: i64 = 100;

/// Validation failures for orders and their parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Quantity is zero or negative.
    NonPositiveQuantity {
        /// Raw value that failed validation.
        value: i64,
    },
    /// Quantity exceeds the per-order maximum.
    QuantityExceedsMaximum {
        /// Raw value that failed validation.
        value: i64,
        /// Maximum allowed quantity.
        max: i64,
    },
    /// `OrderId` violates the `ORD-` + digits format.
    InvalidOrderId {
        /// Trimmed order id that failed validation.
        input: String,
    },
    /// Derived order id is invalid (invariant violation).
    DerivedOrderIdInvalid {
        /// Candidate order id that failed validation.
        candidate: String,
    },
    /// Order has no lines to total.
    EmptyOrder,
    /// A money operation failed while pricing the order.
    Pricing(MoneyError),
}

impl OrderError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::NonPositiveQuantity { .. } | Self::QuantityExceedsMaximum { .. } => {
                ErrorCode::new("domain", "invalid_quantity")
            },
            Self::InvalidOrderId { .. } | Self::DerivedOrderIdInvalid { .. } => {
                ErrorCode::new("domain", "invalid_order_id")
            },
            Self::EmptyOrder => ErrorCode::new("domain", "empty_order"),
            // Pricing errors convert through `MoneyError` directly.
            Self::Pricing(_) => ErrorCode::new("domain", "order_pricing"),
        }
    }

    const fn is_invariant(&self) -> bool {
        matches!(self, Self::DerivedOrderIdInvalid { .. })
    }
}

impl fmt::Display for OrderError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveQuantity { .. } => formatter.write_str("Quantity must be positive"),
            Self::QuantityExceedsMaximum { .. } => {
                formatter.write_str("Quantity exceeds maximum per order")
            },
            Self::InvalidOrderId { .. } => {
                formatter.write_str("OrderId must be ORD- followed by at least five digits")
            },
            Self::DerivedOrderIdInvalid { .. } => {
                formatter.write_str("Derived order id is invalid (this is a bug).")
            },
            Self::EmptyOrder => formatter.write_str("Order has no lines"),
            Self::Pricing(error) => error.fmt(formatter),
        }
    }
}

impl std::error::Error for OrderError {}

impl From<MoneyError> for OrderError {
    fn from(error: MoneyError) -> Self {
        Self::Pricing(error)
    }
}

impl From<OrderError> for ErrorEnvelope {
    fn from(error: OrderError) -> Self {
        if let OrderError::Pricing(pricing) = error {
            return pricing.into();
        }

        let envelope = if error.is_invariant() {
            Self::invariant(error.error_code(), error.to_string())
        } else {
            Self::expected(error.error_code(), error.to_string())
        };

        match error {
            OrderError::NonPositiveQuantity { value } => {
                envelope.with_metadata("value", value.to_string())
            },
            OrderError::QuantityExceedsMaximum { value, max } => envelope
                .with_metadata("value", value.to_string())
                .with_metadata("max", max.to_string()),
            OrderError::InvalidOrderId { input } => envelope.with_metadata("input", input),
            OrderError::DerivedOrderIdInvalid { candidate } => {
                envelope.with_metadata("candidate", candidate)
            },
            OrderError::EmptyOrder | OrderError::Pricing(_) => envelope,
        }
    }
}

/// A whole number of items on an order line, in 1..=100.
///
/// Deserialization runs the same bounds check as [`Quantity::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Quantity(u32);

impl Quantity {
    /// Validate and build a quantity from a raw value.
    pub const fn new(value: i64) -> Result<Self, OrderError> {
        if value <= 0 {
            return Err(OrderError::NonPositiveQuantity { value });
        }

        if value > MAX_QUANTITY {
            return Err(OrderError::QuantityExceedsMaximum {
                value,
                max: MAX_QUANTITY,
            });
        }

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "range checked above"
        )]
        let value = value as u32;
        Ok(Self(value))
    }

    /// Returns the quantity as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = OrderError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for i64 {
    fn from(quantity: Quantity) -> Self {
        Self::from(quantity.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Identifier for an order.
///
/// Deserialization reparses the wire string, so malformed ids are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(Box<str>);

impl OrderId {
    /// Parse an `OrderId` from user input.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, OrderError> {
        let trimmed = input.as_ref().trim();
        if !is_valid_order_id(trimmed) {
            return Err(OrderError::InvalidOrderId {
                input: trimmed.to_owned(),
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

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for OrderId {
    type Error = OrderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0.into()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Inputs required to derive a deterministic order id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderIdInput {
    /// Stable identifier for the ordering channel (till, terminal, site).
    pub channel: Box<str>,
    /// Monotonic sequence number within the channel.
    pub sequence: u64,
}

impl OrderIdInput {
    /// Construct inputs for deriving an order id.
    pub fn new(channel: impl Into<Box<str>>, sequence: u64) -> Self {
        Self {
            channel: channel.into(),
            sequence,
        }
    }
}

/// Derive a deterministic, well-formed order identifier.
pub fn derive_order_id(input: &OrderIdInput) -> Result<OrderId, OrderError> {
    let mut hasher = Sha256::new();
    hasher.update(input.channel.as_bytes());
    hasher.update(b":");
    hasher.update(input.sequence.to_string().as_bytes());
    let hash = hasher.finalize();

    let mut value: u64 = 0;
    for byte in hash.iter().take(8) {
        value = (value << 8) | u64::from(*byte);
    }
    let digits = value % 1_000_000_000_000;
    let candidate = format!("ORD-{digits:012}");

    OrderId::parse(candidate.as_str()).map_err(|_| OrderError::DerivedOrderIdInvalid { candidate })
}

/// A single priced line on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Menu item name.
    pub item: Box<str>,
    /// Price per item.
    pub unit_price: Money,
    /// Number of items.
    pub quantity: Quantity,
}

impl OrderLine {
    /// Construct an order line from validated parts.
    pub fn new(item: impl Into<Box<str>>, unit_price: Money, quantity: Quantity) -> Self {
        Self {
            item: item.into(),
            unit_price,
            quantity,
        }
    }

    /// Price of the whole line (unit price times quantity).
    pub fn line_total(&self) -> Result<Money, MoneyError> {
        self.unit_price.multiply(self.quantity)
    }
}

/// An order placed by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: OrderId,
    customer: Customer,
    lines: Vec<OrderLine>,
}

impl Order {
    /// Open a new, empty order for a customer.
    #[must_use]
    pub const fn new(id: OrderId, customer: Customer) -> Self {
        Self {
            id,
            customer,
            lines: Vec::new(),
        }
    }

    /// Returns the order identity.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Returns the ordering customer.
    #[must_use]
    pub const fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Returns the order lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Append a line to the order.
    pub fn add_line(&mut self, line: OrderLine) {
        self.lines.push(line);
    }

    /// Total price across all lines.
    ///
    /// Fails for an empty order, on currency mismatch between lines, or when
    /// the sum exceeds the money maximum.
    pub fn total(&self) -> Result<Money, OrderError> {
        let mut lines = self.lines.iter();
        let Some(first) = lines.next() else {
            return Err(OrderError::EmptyOrder);
        };

        let mut total = first.line_total()?;
        for line in lines {
            total = total.add(line.line_total()?)?;
        }

        Ok(total)
    }
}

fn is_valid_order_id(candidate: &str) -> bool {
    let Some(digits) = candidate.strip_prefix("ORD-") else {
        return false;
    };

    digits.len() >= 5 && digits.chars().all(|ch| ch.is_ascii_digit())
}
