//! Driving port for calculation writes.

use async_trait::async_trait;

use crate::domain::{Calculation, CalculationDraft, CalculationId, Error};

/// Create and delete calculation records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationCommand: Send + Sync {
    /// Evaluate `draft` and persist the result.
    ///
    /// Evaluation failures surface as `invalid_request` (unsupported
    /// operation) or `unprocessable` (division by zero, result out of range);
    /// an unknown owner surfaces as `not_found`.
    async fn create(&self, draft: CalculationDraft) -> Result<Calculation, Error>;

    /// Delete a record; `not_found` when it does not exist.
    async fn delete(&self, id: CalculationId) -> Result<(), Error>;
}
