//! Calculation evaluator.
//!
//! Applies a registered operation to two operands. Evaluation is pure: the
//! same inputs always produce the same [`Operand`] or the same
//! [`CalculationError`], with no I/O and no shared state.

use super::operand::Operand;
use super::operation::{OperationKind, list_supported};

/// Domain errors raised by the registry and the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalculationError {
    /// The requested tag is not registered.
    #[error("Unsupported operation: {requested}. Supported operations: {}", .supported.join(", "))]
    UnsupportedOperation {
        /// Tag supplied by the caller.
        requested: String,
        /// Registered tags in registration order.
        supported: Vec<String>,
    },
    /// DIVIDE with a divisor of exactly zero.
    #[error("Cannot divide by zero")]
    DivisionByZero,
    /// The result does not fit `NUMERIC(10, 2)` or overflowed during
    /// arithmetic.
    #[error("Result is outside the supported range")]
    ResultOutOfRange,
}

impl CalculationError {
    /// Build [`CalculationError::UnsupportedOperation`] for `requested`.
    pub fn unsupported(requested: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            requested: requested.into(),
            supported: list_supported().into_iter().map(str::to_owned).collect(),
        }
    }

    /// Stable snake_case reason used in error details.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::UnsupportedOperation { .. } => "unsupported_operation",
            Self::DivisionByZero => "division_by_zero",
            Self::ResultOutOfRange => "result_out_of_range",
        }
    }
}

/// Evaluate `a <kind> b`, rounding to the storage scale.
///
/// # Errors
/// - [`CalculationError::DivisionByZero`] when dividing by zero, `0 / 0`
///   included.
/// - [`CalculationError::ResultOutOfRange`] when the rounded result needs more
///   than ten significant digits.
///
/// # Examples
/// ```
/// use calculator_backend::domain::{Operand, OperationKind, evaluate};
///
/// let a: Operand = "10.00".parse().expect("valid");
/// let b: Operand = "4.00".parse().expect("valid");
/// let result = evaluate(a, b, OperationKind::Divide).expect("non-zero divisor");
/// assert_eq!(result.to_string(), "2.50");
/// ```
pub fn evaluate(a: Operand, b: Operand, kind: OperationKind) -> Result<Operand, CalculationError> {
    let exact = (kind.behavior())(a.value(), b.value())?;
    Operand::rounded(exact).map_err(|_| CalculationError::ResultOutOfRange)
}

/// Resolve `tag` through the registry, then evaluate.
///
/// # Errors
/// Propagates [`CalculationError::UnsupportedOperation`] unchanged, plus the
/// errors documented on [`evaluate`].
pub fn evaluate_tag(a: Operand, b: Operand, tag: &str) -> Result<Operand, CalculationError> {
    let kind = OperationKind::parse(tag)?;
    evaluate(a, b, kind)
}

#[cfg(test)]
mod tests {
    //! Evaluator scenarios and edge cases.
    use super::*;
    use rstest::{fixture, rstest};

    fn operand(raw: &str) -> Operand {
        raw.parse().expect("fixture operand")
    }

    #[fixture]
    fn ten() -> Operand {
        operand("10.00")
    }

    #[fixture]
    fn four() -> Operand {
        operand("4.00")
    }

    #[rstest]
    #[case(OperationKind::Add, "14.00")]
    #[case(OperationKind::Subtract, "6.00")]
    #[case(OperationKind::Multiply, "40.00")]
    #[case(OperationKind::Divide, "2.50")]
    fn evaluates_reference_scenarios(
        ten: Operand,
        four: Operand,
        #[case] kind: OperationKind,
        #[case] expected: &str,
    ) {
        let result = evaluate(ten, four, kind).expect("evaluation succeeds");
        assert_eq!(result.to_string(), expected);
    }

    #[rstest]
    #[case("5.00")]
    #[case("0.00")]
    #[case("-3.25")]
    fn divide_by_zero_fails(#[case] dividend: &str) {
        let error = evaluate(operand(dividend), Operand::ZERO, OperationKind::Divide)
            .expect_err("zero divisor");
        assert_eq!(error, CalculationError::DivisionByZero);
    }

    #[rstest]
    fn divide_rounds_repeating_fraction() {
        let result =
            evaluate(operand("10.00"), operand("3.00"), OperationKind::Divide).expect("divides");
        assert_eq!(result.to_string(), "3.33");
    }

    #[rstest]
    fn divide_rounds_midpoint_away_from_zero() {
        let result =
            evaluate(operand("-0.05"), operand("2.00"), OperationKind::Divide).expect("divides");
        assert_eq!(result.to_string(), "-0.03");
    }

    #[rstest]
    fn multiply_rounds_fractional_product() {
        let result =
            evaluate(operand("0.05"), operand("0.05"), OperationKind::Multiply).expect("in range");
        assert_eq!(result.to_string(), "0.00");
    }

    #[rstest]
    fn result_beyond_storage_precision_fails() {
        let error = evaluate(
            operand("99999999.99"),
            operand("99999999.99"),
            OperationKind::Multiply,
        )
        .expect_err("product too large");
        assert_eq!(error, CalculationError::ResultOutOfRange);
    }

    #[rstest]
    #[case("10.00", "4.00")]
    #[case("-3.25", "4.10")]
    #[case("0.01", "-0.01")]
    #[case("99999999.99", "0.00")]
    #[case("-99999999.99", "1.50")]
    #[case("0.05", "0.05")]
    #[case("12.34", "-56.78")]
    fn algebraic_properties_hold(#[case] a: &str, #[case] b: &str) {
        let (a, b) = (operand(a), operand(b));

        for kind in [
            OperationKind::Add,
            OperationKind::Subtract,
            OperationKind::Multiply,
            OperationKind::Divide,
        ] {
            assert_eq!(evaluate(a, b, kind), evaluate(a, b, kind), "{kind} is deterministic");
        }

        assert_eq!(
            evaluate(a, b, OperationKind::Add),
            evaluate(b, a, OperationKind::Add)
        );
        assert_eq!(
            evaluate(a, b, OperationKind::Multiply),
            evaluate(b, a, OperationKind::Multiply)
        );
        assert_eq!(
            evaluate(a, b, OperationKind::Subtract).map(Operand::value),
            evaluate(b, a, OperationKind::Subtract).map(|r| -r.value())
        );

        let one = operand("1.00");
        for x in [a, b] {
            assert_eq!(
                evaluate(x, one, OperationKind::Multiply).map(Operand::value),
                Ok(x.value())
            );
            assert_eq!(
                evaluate(x, one, OperationKind::Divide).map(Operand::value),
                Ok(x.value())
            );
        }
    }

    #[rstest]
    fn evaluate_tag_propagates_unsupported_operation(ten: Operand, four: Operand) {
        let error = evaluate_tag(ten, four, "POWER").expect_err("unknown tag");
        let CalculationError::UnsupportedOperation {
            requested,
            supported,
        } = error
        else {
            panic!("expected UnsupportedOperation");
        };
        assert_eq!(requested, "POWER");
        assert_eq!(supported, vec!["ADD", "SUBTRACT", "MULTIPLY", "DIVIDE"]);
    }

    #[rstest]
    fn evaluate_tag_matches_evaluate(ten: Operand, four: Operand) {
        assert_eq!(
            evaluate_tag(ten, four, "SUBTRACT"),
            evaluate(ten, four, OperationKind::Subtract)
        );
    }

    #[rstest]
    #[case(CalculationError::unsupported("X"), "unsupported_operation")]
    #[case(CalculationError::DivisionByZero, "division_by_zero")]
    #[case(CalculationError::ResultOutOfRange, "result_out_of_range")]
    fn reasons_are_stable(#[case] error: CalculationError, #[case] expected: &str) {
        assert_eq!(error.reason(), expected);
    }
}
