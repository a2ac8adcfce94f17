//! Money stored in the smallest currency unit.

use crate::order::Quantity;
use serde::{Deserialize, Serialize};
use std::fmt;
use tableside_shared::{ErrorCode, ErrorEnvelope};

/// Hard upper bound for any single amount, in cents (10,000 major units).
pub const MAX_MONEY_CENTS: i64 = 1_000_000;

/// Validation and arithmetic failures for money values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyError {
    /// Amount is negative.
    NegativeAmount {
        /// Offending amount in cents.
        cents: i64,
    },
    /// Amount exceeds the business maximum.
    ExceedsMaximum {
        /// Offending amount in cents.
        cents: i64,
        /// Maximum allowed amount in cents.
        max: i64,
    },
    /// Arithmetic across two different currencies.
    CurrencyMismatch {
        /// Currency of the left operand.
        left: Currency,
        /// Currency of the right operand.
        right: Currency,
    },
}

impl MoneyError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::NegativeAmount { .. } => ErrorCode::new("domain", "negative_amount"),
            Self::ExceedsMaximum { .. } => ErrorCode::new("domain", "amount_exceeds_maximum"),
            Self::CurrencyMismatch { .. } => ErrorCode::new("domain", "currency_mismatch"),
        }
    }
}

impl fmt::Display for MoneyError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount { .. } => formatter.write_str("amount cannot be negative"),
            Self::ExceedsMaximum { .. } => formatter.write_str("amount exceeds maximum"),
            Self::CurrencyMismatch { .. } => {
                formatter.write_str("cannot combine amounts in different currencies")
            },
        }
    }
}

impl std::error::Error for MoneyError {}

impl From<MoneyError> for ErrorEnvelope {
    fn from(error: MoneyError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());

        match error {
            MoneyError::NegativeAmount { cents } => {
                envelope.with_metadata("cents", cents.to_string())
            },
            MoneyError::ExceedsMaximum { cents, max } => envelope
                .with_metadata("cents", cents.to_string())
                .with_metadata("max", max.to_string()),
            MoneyError::CurrencyMismatch { left, right } => envelope
                .with_metadata("left", left.to_string())
                .with_metadata("right", right.to_string()),
        }
    }
}

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// United States dollar.
    Usd,
    /// Euro.
    Eur,
    /// Pound sterling.
    Gbp,
}

impl Currency {
    /// Returns the canonical ISO code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }

    /// Returns the display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// An amount of money in a single currency.
///
/// Always stored in cents, the smallest unit, so dollars-vs-cents ambiguity
/// and floating-point drift cannot arise. Deserialization goes through
/// [`Money::from_cents`], so out-of-range wire values are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "MoneyRecord")]
pub struct Money {
    cents: i64,
    currency: Currency,
}

/// Raw wire shape for [`Money`], validated on the way in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoneyRecord {
    cents: i64,
    currency: Currency,
}

impl TryFrom<MoneyRecord> for Money {
    type Error = MoneyError;

    fn try_from(record: MoneyRecord) -> Result<Self, Self::Error> {
        Self::from_cents(record.cents, record.currency)
    }
}

impl Money {
    /// Validate and build an amount from cents.
    pub const fn from_cents(cents: i64, currency: Currency) -> Result<Self, MoneyError> {
        if cents < 0 {
            return Err(MoneyError::NegativeAmount { cents });
        }

        if cents > MAX_MONEY_CENTS {
            return Err(MoneyError::ExceedsMaximum {
                cents,
                max: MAX_MONEY_CENTS,
            });
        }

        Ok(Self { cents, currency })
    }

    /// Validate and build an amount from whole major units (dollars, euros, pounds).
    pub const fn from_major_units(units: i64, currency: Currency) -> Result<Self, MoneyError> {
        Self::from_cents(units.saturating_mul(100), currency)
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Add another amount in the same currency.
    pub const fn add(self, other: Self) -> Result<Self, MoneyError> {
        if !matches!(
            (self.currency, other.currency),
            (Currency::Usd, Currency::Usd)
                | (Currency::Eur, Currency::Eur)
                | (Currency::Gbp, Currency::Gbp)
        ) {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            });
        }

        // Both operands are bounded by the maximum, so the sum cannot overflow.
        Self::from_cents(self.cents + other.cents, self.currency)
    }

    /// Scale the amount by an item quantity.
    pub const fn multiply(self, quantity: Quantity) -> Result<Self, MoneyError> {
        Self::from_cents(self.cents * quantity.get() as i64, self.currency)
    }

    /// Render the amount with its currency symbol, e.g. `$12.50`.
    #[must_use]
    pub fn format(&self) -> String {
        format!(
            "{}{}.{:02}",
            self.currency.symbol(),
            self.cents / 100,
            self.cents % 100
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;

    #[test]
    fn from_cents_rejects_negative_amounts() {
        let error = Money::from_cents(-50, Currency::Usd).err();
        assert_eq!(error, Some(MoneyError::NegativeAmount { cents: -50 }));
    }

    #[test]
    fn from_cents_rejects_amounts_above_maximum() {
        let error = Money::from_cents(MAX_MONEY_CENTS + 1, Currency::Usd).err();
        assert!(matches!(error, Some(MoneyError::ExceedsMaximum { .. })));
    }

    #[test]
    fn from_major_units_scales_to_cents() -> Result<(), MoneyError> {
        let price = Money::from_major_units(12, Currency::Usd)?;
        assert_eq!(price.cents(), 1_200);
        assert_eq!(price.format(), "$12.00");
        Ok(())
    }

    #[test]
    fn from_major_units_rejects_huge_inputs() {
        assert!(Money::from_major_units(i64::MAX, Currency::Usd).is_err());
        assert!(Money::from_major_units(10_001, Currency::Usd).is_err());
    }

    #[test]
    fn add_rejects_currency_mismatch() -> Result<(), MoneyError> {
        let dollars = Money::from_cents(1_250, Currency::Usd)?;
        let euros = Money::from_cents(1_850, Currency::Eur)?;

        let error = dollars.add(euros).err();
        assert_eq!(
            error,
            Some(MoneyError::CurrencyMismatch {
                left: Currency::Usd,
                right: Currency::Eur,
            })
        );
        Ok(())
    }

    #[test]
    fn add_sums_cents_in_same_currency() -> Result<(), MoneyError> {
        let burger = Money::from_cents(1_250, Currency::Usd)?;
        let pizza = Money::from_cents(1_850, Currency::Usd)?;

        let total = burger.add(pizza)?;
        assert_eq!(total.cents(), 3_100);
        assert_eq!(total.format(), "$31.00");
        Ok(())
    }

    #[test]
    fn format_pads_cent_remainders() -> Result<(), MoneyError> {
        let amount = Money::from_cents(1_205, Currency::Gbp)?;
        assert_eq!(amount.format(), "£12.05");

        let small = Money::from_cents(9, Currency::Eur)?;
        assert_eq!(small.format(), "€0.09");
        Ok(())
    }

    #[test]
    fn currency_serializes_as_iso_code() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&Currency::Usd)?;
        assert_eq!(json, r#""USD""#);
        Ok(())
    }

    #[test]
    fn deserialization_revalidates_amounts() -> Result<(), Box<dyn std::error::Error>> {
        assert!(serde_json::from_str::<Money>(r#"{"cents":-50,"currency":"USD"}"#).is_err());
        assert!(
            serde_json::from_str::<Money>(r#"{"cents":2000000,"currency":"USD"}"#).is_err()
        );

        let amount: Money = serde_json::from_str(r#"{"cents":1250,"currency":"USD"}"#)?;
        assert_eq!(amount, Money::from_cents(1_250, Currency::Usd)?);
        Ok(())
    }

    proptest! {
        #[test]
        fn valid_cent_amounts_round_trip(cents in 0i64..=MAX_MONEY_CENTS) {
            let Ok(amount) = Money::from_cents(cents, Currency::Usd) else {
                return Err(TestCaseError::fail("bounded amount should be valid"));
            };
            prop_assert_eq!(amount.cents(), cents);
        }

        #[test]
        fn addition_is_commutative_within_bounds(
            (left, right) in (0i64..=500_000, 0i64..=500_000)
        ) {
            let Ok(left) = Money::from_cents(left, Currency::Usd) else {
                return Err(TestCaseError::fail("bounded amount should be valid"));
            };
            let Ok(right) = Money::from_cents(right, Currency::Usd) else {
                return Err(TestCaseError::fail("bounded amount should be valid"));
            };

            prop_assert_eq!(left.add(right), right.add(left));
        }
    }
}
