//! Driving port for calculation reads.

use async_trait::async_trait;

use crate::domain::{Calculation, CalculationId, Error, PageRequest, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationQuery: Send + Sync {
    /// Fetch one record; `not_found` when missing.
    async fn get(&self, id: CalculationId) -> Result<Calculation, Error>;

    /// Page through all records.
    async fn list(&self, page: PageRequest) -> Result<Vec<Calculation>, Error>;

    /// All records owned by `user_id`; `not_found` when the user is missing.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Calculation>, Error>;
}
