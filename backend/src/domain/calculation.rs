//! Calculation records.
//!
//! A record pairs two operands and an operation with the result evaluated at
//! creation time. Records are append/delete only.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::evaluator::{CalculationError, evaluate};
use super::operand::Operand;
use super::operation::OperationKind;
use super::user::UserId;

/// Surrogate key of a calculation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = i64, example = 1)]
pub struct CalculationId(i64);

impl CalculationId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier for storage.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CalculationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated request to evaluate and store a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationDraft {
    /// Left operand.
    pub a: Operand,
    /// Right operand.
    pub b: Operand,
    /// Operation to apply.
    pub kind: OperationKind,
    /// Optional owner.
    pub user_id: Option<UserId>,
}

/// Evaluated calculation ready for insertion.
///
/// Built only through [`NewCalculation::evaluate`], so `result` always equals
/// `kind` applied to `(a, b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCalculation {
    a: Operand,
    b: Operand,
    kind: OperationKind,
    result: Operand,
    user_id: Option<UserId>,
    created_at: DateTime<Utc>,
}

impl NewCalculation {
    /// Evaluate `draft` and stamp it with `created_at`.
    ///
    /// # Errors
    /// Propagates [`CalculationError`] from the evaluator.
    ///
    /// # Examples
    /// ```
    /// use calculator_backend::domain::{CalculationDraft, NewCalculation, OperationKind};
    ///
    /// let draft = CalculationDraft {
    ///     a: "10".parse().expect("valid"),
    ///     b: "4".parse().expect("valid"),
    ///     kind: OperationKind::Add,
    ///     user_id: None,
    /// };
    /// let new = NewCalculation::evaluate(draft, chrono::Utc::now()).expect("evaluates");
    /// assert_eq!(new.result().to_string(), "14.00");
    /// ```
    pub fn evaluate(
        draft: CalculationDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CalculationError> {
        let CalculationDraft {
            a,
            b,
            kind,
            user_id,
        } = draft;
        let result = evaluate(a, b, kind)?;
        Ok(Self {
            a,
            b,
            kind,
            result,
            user_id,
            created_at,
        })
    }

    /// Left operand.
    #[must_use]
    pub const fn a(&self) -> Operand {
        self.a
    }

    /// Right operand.
    #[must_use]
    pub const fn b(&self) -> Operand {
        self.b
    }

    /// Operation applied.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Evaluated result.
    #[must_use]
    pub const fn result(&self) -> Operand {
        self.result
    }

    /// Owner, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Stored calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    /// Surrogate key.
    pub id: CalculationId,
    /// Left operand.
    pub a: Operand,
    /// Right operand.
    pub b: Operand,
    /// Operation applied.
    #[serde(rename = "type")]
    pub kind: OperationKind,
    /// Result evaluated at creation time.
    pub result: Operand,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Owner, if any.
    pub user_id: Option<UserId>,
}

/// Offset/limit window over the calculation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    offset: i64,
    limit: i64,
}

/// Largest page a caller may request.
pub const PAGE_LIMIT_MAX: i64 = 100;
/// Page size used when the caller does not pick one.
pub const PAGE_LIMIT_DEFAULT: i64 = 100;

/// Rejected pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// `offset` below zero.
    #[error("offset must not be negative")]
    NegativeOffset,
    /// `limit` outside `1..=100`.
    #[error("limit must be between 1 and 100")]
    LimitOutOfRange,
}

impl PageRequest {
    /// Validate `offset >= 0` and `1 <= limit <= 100`.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] for values outside those bounds.
    pub const fn new(offset: i64, limit: i64) -> Result<Self, PageRequestError> {
        if offset < 0 {
            return Err(PageRequestError::NegativeOffset);
        }
        if limit < 1 || limit > PAGE_LIMIT_MAX {
            return Err(PageRequestError::LimitOutOfRange);
        }
        Ok(Self { offset, limit })
    }

    /// Rows to skip.
    #[must_use]
    pub const fn offset(self) -> i64 {
        self.offset
    }

    /// Maximum rows to return.
    #[must_use]
    pub const fn limit(self) -> i64 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: PAGE_LIMIT_DEFAULT,
        }
    }
}
