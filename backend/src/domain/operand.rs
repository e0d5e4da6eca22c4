//! Exact decimal operand stored as `NUMERIC(10, 2)`.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fractional digits kept for every operand and result.
pub const OPERAND_SCALE: u32 = 2;

/// Total significant digits available in storage.
pub const OPERAND_PRECISION: u32 = 10;

/// Exclusive bound on the magnitude of an operand: `10^(10 - 2)`.
const OPERAND_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Validation failures raised when building an [`Operand`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperandError {
    /// Input could not be parsed as a decimal number.
    #[error("operand is not a decimal number: {value}")]
    NotANumber {
        /// Raw input.
        value: String,
    },
    /// More fractional digits than storage keeps.
    #[error("operand has more than two fractional digits: {value}")]
    TooManyFractionalDigits {
        /// Offending value.
        value: Decimal,
    },
    /// Magnitude does not fit `NUMERIC(10, 2)`.
    #[error("operand exceeds ten significant digits: {value}")]
    OutOfRange {
        /// Offending value.
        value: Decimal,
    },
}

/// Exact decimal with two fractional digits and magnitude below `10^8`.
///
/// ## Invariants
/// - The inner value always carries scale 2, so `10` displays as `10.00`.
/// - `|value| < 100_000_000`.
///
/// # Examples
/// ```
/// use calculator_backend::domain::Operand;
///
/// let value: Operand = "10.5".parse().expect("valid operand");
/// assert_eq!(value.to_string(), "10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "Decimal", into = "Decimal")]
#[schema(value_type = String, example = "14.00")]
pub struct Operand(Decimal);

impl Operand {
    /// Zero with storage scale.
    pub const ZERO: Self = Self(Decimal::from_parts(0, 0, 0, false, OPERAND_SCALE));

    /// Validate an exact decimal without rounding.
    ///
    /// # Errors
    /// Rejects values with more than two fractional digits or a magnitude of
    /// `10^8` or more.
    pub fn new(value: Decimal) -> Result<Self, OperandError> {
        let normalized = value.normalize();
        if normalized.scale() > OPERAND_SCALE {
            return Err(OperandError::TooManyFractionalDigits { value });
        }
        Self::with_storage_scale(normalized)
    }

    /// Round `value` half away from zero to two fractional digits.
    ///
    /// Mirrors PostgreSQL's coercion into `NUMERIC(10, 2)`.
    ///
    /// # Errors
    /// Returns [`OperandError::OutOfRange`] when the rounded value does not
    /// fit the storage precision.
    pub fn rounded(value: Decimal) -> Result<Self, OperandError> {
        let rounded =
            value.round_dp_with_strategy(OPERAND_SCALE, RoundingStrategy::MidpointAwayFromZero);
        Self::with_storage_scale(rounded)
    }

    fn with_storage_scale(value: Decimal) -> Result<Self, OperandError> {
        if value.abs() >= OPERAND_LIMIT {
            return Err(OperandError::OutOfRange { value });
        }
        let mut scaled = value;
        scaled.rescale(OPERAND_SCALE);
        Ok(Self(scaled))
    }

    /// Underlying decimal value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// True when the value is exactly zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Operand {
    type Err = OperandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = Decimal::from_str_exact(trimmed)
            .or_else(|err| {
                if trimmed.contains(['e', 'E']) {
                    Decimal::from_scientific(trimmed)
                } else {
                    Err(err)
                }
            })
            .map_err(|_| OperandError::NotANumber {
                value: s.to_owned(),
            })?;
        Self::new(value)
    }
}

impl TryFrom<Decimal> for Operand {
    type Error = OperandError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Operand> for Decimal {
    fn from(value: Operand) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    //! Operand validation and storage scale.
    use super::*;
    use rstest::rstest;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str_exact(raw).expect("fixture decimal")
    }

    #[rstest]
    #[case("10", "10.00")]
    #[case("10.5", "10.50")]
    #[case("-0.01", "-0.01")]
    #[case("  4.00 ", "4.00")]
    #[case("99999999.99", "99999999.99")]
    #[case("1.500", "1.50")]
    fn parses_and_displays_with_two_digits(#[case] raw: &str, #[case] expected: &str) {
        let operand: Operand = raw.parse().expect("valid operand");
        assert_eq!(operand.to_string(), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("1,5")]
    fn rejects_non_numbers(#[case] raw: &str) {
        let error = raw.parse::<Operand>().expect_err("not a number");
        assert!(matches!(error, OperandError::NotANumber { .. }));
    }

    #[rstest]
    fn rejects_excess_fractional_digits() {
        let error = "1.005".parse::<Operand>().expect_err("three digits");
        assert!(matches!(error, OperandError::TooManyFractionalDigits { .. }));
    }

    #[rstest]
    #[case("1.5e2", "150.00")]
    #[case("2.5E-1", "0.25")]
    fn accepts_exponent_notation(#[case] raw: &str, #[case] expected: &str) {
        let operand: Operand = raw.parse().expect("valid operand");
        assert_eq!(operand.to_string(), expected);
    }

    #[rstest]
    fn exponent_notation_reports_fractional_digits() {
        let error = "1e-7".parse::<Operand>().expect_err("seven digits");
        assert!(matches!(error, OperandError::TooManyFractionalDigits { .. }));
    }

    #[rstest]
    #[case("100000000")]
    #[case("-100000000.00")]
    fn rejects_values_outside_precision(#[case] raw: &str) {
        let error = raw.parse::<Operand>().expect_err("too large");
        assert!(matches!(error, OperandError::OutOfRange { .. }));
    }

    #[rstest]
    #[case("2.345", "2.35")]
    #[case("-2.345", "-2.35")]
    #[case("2.344", "2.34")]
    #[case("3.3333333333", "3.33")]
    fn rounded_uses_half_away_from_zero(#[case] raw: &str, #[case] expected: &str) {
        let operand = Operand::rounded(dec(raw)).expect("in range");
        assert_eq!(operand.to_string(), expected);
    }

    #[rstest]
    fn rounded_rejects_overflowing_results() {
        let error = Operand::rounded(dec("99999999.995")).expect_err("rounds to 10^8");
        assert!(matches!(error, OperandError::OutOfRange { .. }));
    }

    #[rstest]
    fn serde_round_trips_as_string() {
        let operand: Operand = "14".parse().expect("valid");
        let json = serde_json::to_string(&operand).expect("serialise");
        assert_eq!(json, "\"14.00\"");
        let back: Operand = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, operand);
    }

    #[rstest]
    fn zero_constant_has_storage_scale() {
        assert_eq!(Operand::ZERO.to_string(), "0.00");
        assert!(Operand::ZERO.is_zero());
    }
}
