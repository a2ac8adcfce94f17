//! Clock hours and recurring daily time windows.

use serde::{Deserialize, Serialize};
use std::fmt;
use tableside_shared::{ErrorCode, ErrorEnvelope};

/// Validation failures for clock hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoursError {
    /// Hour is outside the inclusive [0, 23] range.
    InvalidHour {
        /// Raw value that failed validation.
        value: i64,
    },
}

impl fmt::Display for HoursError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHour { value } => {
                write!(formatter, "hour must be in 0-23, got {value}")
            },
        }
    }
}

impl std::error::Error for HoursError {}

impl From<HoursError> for ErrorEnvelope {
    fn from(error: HoursError) -> Self {
        match error {
            HoursError::InvalidHour { value } => Self::expected(
                ErrorCode::new("domain", "invalid_hour"),
                error.to_string(),
            )
            .with_metadata("value", value.to_string()),
        }
    }
}

/// A validated point on the 24-hour clock.
///
/// Deserialization runs the same range check as [`Hour::new`], so a wire
/// value like `200` is rejected instead of smuggled past the constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Hour(u8);

impl Hour {
    /// Validate and build an hour from a raw value.
    pub const fn new(value: i64) -> Result<Self, HoursError> {
        if value < 0 || value > 23 {
            return Err(HoursError::InvalidHour { value });
        }

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "range checked above"
        )]
        let value = value as u8;
        Ok(Self(value))
    }

    /// Returns the hour as a plain integer.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Hour {
    type Error = HoursError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hour> for i64 {
    fn from(hour: Hour) -> Self {
        Self::from(hour.0)
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A recurring daily open interval, half-open on the closing side.
///
/// The opening hour counts as open, the closing hour counts as already
/// closed. `opens_at == closes_at` denotes a window that is never open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    opens_at: Hour,
    closes_at: Hour,
}

impl TimeWindow {
    /// Build a window from two validated hours.
    ///
    /// No cross-field validation applies; either bound may be the larger.
    #[must_use]
    pub const fn new(opens_at: Hour, closes_at: Hour) -> Self {
        Self {
            opens_at,
            closes_at,
        }
    }

    /// Validate both bounds and build a window from raw values.
    pub const fn from_raw(opens_at: i64, closes_at: i64) -> Result<Self, HoursError> {
        let opens_at = match Hour::new(opens_at) {
            Ok(hour) => hour,
            Err(error) => return Err(error),
        };
        let closes_at = match Hour::new(closes_at) {
            Ok(hour) => hour,
            Err(error) => return Err(error),
        };

        Ok(Self::new(opens_at, closes_at))
    }

    /// Returns the opening hour.
    #[must_use]
    pub const fn opens_at(&self) -> Hour {
        self.opens_at
    }

    /// Returns the closing hour.
    #[must_use]
    pub const fn closes_at(&self) -> Hour {
        self.closes_at
    }

    /// Returns true when the window spans midnight.
    #[must_use]
    pub const fn crosses_midnight(&self) -> bool {
        self.opens_at.0 > self.closes_at.0
    }

    /// Returns true when the window can never be open.
    #[must_use]
    pub const fn is_never_open(&self) -> bool {
        self.opens_at.0 == self.closes_at.0
    }

    /// Returns true when the window is open at the queried hour.
    ///
    /// The clock is circular: a window that spans midnight is the union of
    /// two arcs, one ending at 24 and one starting at 0. A single linear
    /// comparison only works when `opens_at <= closes_at`.
    #[must_use]
    pub const fn is_open_at(&self, hour: Hour) -> bool {
        let hour = hour.0;
        if self.opens_at.0 <= self.closes_at.0 {
            hour >= self.opens_at.0 && hour < self.closes_at.0
        } else {
            hour >= self.opens_at.0 || hour < self.closes_at.0
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}-{}", self.opens_at, self.closes_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;

    #[test]
    fn hour_accepts_full_clock_range() -> Result<(), HoursError> {
        for value in 0..=23 {
            let hour = Hour::new(value)?;
            #[allow(clippy::cast_possible_truncation, reason = "test range is 0-23")]
            let expected = value as u8;
            assert_eq!(hour.get(), expected);
        }
        Ok(())
    }

    #[test]
    fn hour_rejects_out_of_range_values() {
        for value in [-1, -5, 24, 25, 100, i64::MIN, i64::MAX] {
            let error = Hour::new(value).err();
            assert_eq!(error, Some(HoursError::InvalidHour { value }));
        }
    }

    #[test]
    fn window_propagates_invalid_bounds() {
        assert!(matches!(
            TimeWindow::from_raw(25, 6),
            Err(HoursError::InvalidHour { value: 25 })
        ));
        assert!(matches!(
            TimeWindow::from_raw(22, -5),
            Err(HoursError::InvalidHour { value: -5 })
        ));
    }

    #[test]
    fn daytime_window_uses_half_open_bounds() -> Result<(), HoursError> {
        let window = TimeWindow::from_raw(9, 17)?;
        assert!(!window.crosses_midnight());

        for value in 9..=16 {
            assert!(window.is_open_at(Hour::new(value)?));
        }
        for value in (0..=8).chain(17..=23) {
            assert!(!window.is_open_at(Hour::new(value)?));
        }
        Ok(())
    }

    #[test]
    fn overnight_window_spans_midnight() -> Result<(), HoursError> {
        let window = TimeWindow::from_raw(22, 6)?;
        assert!(window.crosses_midnight());

        assert!(window.is_open_at(Hour::new(2)?));
        assert!(window.is_open_at(Hour::new(22)?));
        assert!(!window.is_open_at(Hour::new(12)?));
        assert!(!window.is_open_at(Hour::new(6)?));
        assert!(!window.is_open_at(Hour::new(21)?));
        Ok(())
    }

    #[test]
    fn equal_bounds_mean_never_open() -> Result<(), HoursError> {
        let window = TimeWindow::from_raw(5, 5)?;
        assert!(window.is_never_open());

        for value in 0..=23 {
            assert!(!window.is_open_at(Hour::new(value)?));
        }
        Ok(())
    }

    #[test]
    fn queries_are_pure() -> Result<(), HoursError> {
        let first = TimeWindow::from_raw(22, 6)?;
        let second = TimeWindow::from_raw(22, 6)?;
        let hour = Hour::new(2)?;

        assert_eq!(first, second);
        assert_eq!(first.is_open_at(hour), second.is_open_at(hour));
        assert_eq!(first.is_open_at(hour), first.is_open_at(hour));
        Ok(())
    }

    #[test]
    fn window_serializes_with_camel_case_fields() -> Result<(), Box<dyn std::error::Error>> {
        let window = TimeWindow::from_raw(22, 6)?;
        let json = serde_json::to_string(&window)?;
        assert_eq!(json, r#"{"opensAt":22,"closesAt":6}"#);
        Ok(())
    }

    #[test]
    fn deserialization_revalidates_hours() -> Result<(), serde_json::Error> {
        assert!(serde_json::from_str::<Hour>("200").is_err());
        assert!(serde_json::from_str::<Hour>("-1").is_err());
        assert!(serde_json::from_str::<TimeWindow>(r#"{"opensAt":25,"closesAt":6}"#).is_err());

        let hour: Hour = serde_json::from_str("7")?;
        assert_eq!(hour.get(), 7);
        Ok(())
    }

    proptest! {
        #[test]
        fn swapped_bounds_partition_the_clock((opens, closes, hour) in distinct_window_and_hour()) {
            let Ok(window) = TimeWindow::from_raw(opens, closes) else {
                return Err(TestCaseError::fail("window bounds should be valid"));
            };
            let Ok(swapped) = TimeWindow::from_raw(closes, opens) else {
                return Err(TestCaseError::fail("window bounds should be valid"));
            };
            let Ok(hour) = Hour::new(hour) else {
                return Err(TestCaseError::fail("hour should be valid"));
            };

            // Swapping the bounds yields the complementary window, so every
            // hour belongs to exactly one of the two.
            prop_assert_ne!(window.is_open_at(hour), swapped.is_open_at(hour));
        }

        #[test]
        fn open_hour_count_matches_modular_width((opens, closes) in (0i64..24, 0i64..24)) {
            let Ok(window) = TimeWindow::from_raw(opens, closes) else {
                return Err(TestCaseError::fail("window bounds should be valid"));
            };

            let mut open_hours = 0;
            for value in 0..24 {
                let Ok(hour) = Hour::new(value) else {
                    return Err(TestCaseError::fail("hour should be valid"));
                };
                if window.is_open_at(hour) {
                    open_hours += 1;
                }
            }

            prop_assert_eq!(open_hours, (closes - opens).rem_euclid(24));
        }
    }

    fn distinct_window_and_hour() -> impl Strategy<Value = (i64, i64, i64)> {
        (0i64..24, 0i64..24, 0i64..24)
            .prop_filter("bounds must differ", |(opens, closes, _)| opens != closes)
    }
}
