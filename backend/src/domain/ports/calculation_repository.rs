//! Port abstraction for calculation persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Calculation, CalculationId, NewCalculation, PageRequest, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by calculation repository adapters.
    pub enum CalculationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "calculation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "calculation repository query failed: {message}",
        /// The owning user referenced by an insert does not exist.
        UnknownUser { user_id: i64 } =>
            "calculation owner {user_id} does not exist",
    }
}

/// Storage for calculation records.
///
/// Records are append/delete only. Absence is reported as `None` or `false`
/// rather than an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationRepository: Send + Sync {
    /// Persist an evaluated calculation and return the stored record.
    async fn insert(
        &self,
        calculation: &NewCalculation,
    ) -> Result<Calculation, CalculationRepositoryError>;

    /// Fetch a record by id.
    async fn find_by_id(
        &self,
        id: CalculationId,
    ) -> Result<Option<Calculation>, CalculationRepositoryError>;

    /// List records ordered by id within the requested window.
    async fn list(&self, page: PageRequest) -> Result<Vec<Calculation>, CalculationRepositoryError>;

    /// List every record owned by `user_id`, ordered by id.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Calculation>, CalculationRepositoryError>;

    /// Delete a record. Returns `false` when no row matched.
    async fn delete(&self, id: CalculationId) -> Result<bool, CalculationRepositoryError>;
}
