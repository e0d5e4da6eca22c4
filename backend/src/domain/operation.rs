//! Operation registry.
//!
//! Maps the four supported operation tags onto pure binary functions over
//! [`Operand`]. The registry is a constant table over the closed
//! [`OperationKind`] enum; there is no runtime registration.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::evaluator::CalculationError;

/// Binary numeric function backing an operation.
///
/// Functions receive exact decimals and return the exact (unrounded) result.
/// Overflow and division by zero surface as [`CalculationError`] values.
pub type BinaryOp = fn(Decimal, Decimal) -> Result<Decimal, CalculationError>;

/// Closed set of supported arithmetic operations.
///
/// Tags are case-sensitive: only `ADD`, `SUBTRACT`, `MULTIPLY`, and `DIVIDE`
/// are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    /// `a + b`
    Add,
    /// `a - b`
    Subtract,
    /// `a * b`
    Multiply,
    /// `a / b`, rejecting a zero divisor.
    Divide,
}

/// Registry in registration order. `list_supported` and the unsupported
/// operation message both read from this table.
const REGISTRY: [(OperationKind, BinaryOp); 4] = [
    (OperationKind::Add, add),
    (OperationKind::Subtract, subtract),
    (OperationKind::Multiply, multiply),
    (OperationKind::Divide, divide),
];

fn add(a: Decimal, b: Decimal) -> Result<Decimal, CalculationError> {
    a.checked_add(b).ok_or(CalculationError::ResultOutOfRange)
}

fn subtract(a: Decimal, b: Decimal) -> Result<Decimal, CalculationError> {
    a.checked_sub(b).ok_or(CalculationError::ResultOutOfRange)
}

fn multiply(a: Decimal, b: Decimal) -> Result<Decimal, CalculationError> {
    a.checked_mul(b).ok_or(CalculationError::ResultOutOfRange)
}

fn divide(a: Decimal, b: Decimal) -> Result<Decimal, CalculationError> {
    if b.is_zero() {
        return Err(CalculationError::DivisionByZero);
    }
    a.checked_div(b).ok_or(CalculationError::ResultOutOfRange)
}

impl OperationKind {
    /// Wire and storage tag for the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Subtract => "SUBTRACT",
            Self::Multiply => "MULTIPLY",
            Self::Divide => "DIVIDE",
        }
    }

    /// Binary function implementing this operation.
    #[must_use]
    pub const fn behavior(self) -> BinaryOp {
        match self {
            Self::Add => add,
            Self::Subtract => subtract,
            Self::Multiply => multiply,
            Self::Divide => divide,
        }
    }

    /// Parse a tag, reporting the supported set on failure.
    ///
    /// # Examples
    /// ```
    /// use calculator_backend::domain::{CalculationError, OperationKind};
    ///
    /// assert_eq!(OperationKind::parse("DIVIDE"), Ok(OperationKind::Divide));
    /// assert!(matches!(
    ///     OperationKind::parse("add"),
    ///     Err(CalculationError::UnsupportedOperation { .. })
    /// ));
    /// ```
    pub fn parse(tag: &str) -> Result<Self, CalculationError> {
        REGISTRY
            .iter()
            .map(|(kind, _)| *kind)
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| CalculationError::unsupported(tag))
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Look up the binary function registered for `tag`.
///
/// # Errors
/// Returns [`CalculationError::UnsupportedOperation`] for any tag outside the
/// registry, including case variants such as `"add"`.
pub fn lookup(tag: &str) -> Result<BinaryOp, CalculationError> {
    OperationKind::parse(tag).map(OperationKind::behavior)
}

/// Registered tags in registration order.
#[must_use]
pub fn list_supported() -> Vec<&'static str> {
    REGISTRY.iter().map(|(kind, _)| kind.as_str()).collect()
}
