//! Calculation domain service.
//!
//! Implements [`CalculationCommand`] and [`CalculationQuery`] over the
//! calculation and user repositories. Evaluation happens here, before
//! anything reaches storage.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;

use crate::domain::ports::{
    CalculationCommand, CalculationQuery, CalculationRepository, CalculationRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    Calculation, CalculationDraft, CalculationError, CalculationId, Error, NewCalculation,
    PageRequest, UserId,
};

const CALCULATION_NOT_FOUND: &str = "Calculation not found";
const USER_NOT_FOUND: &str = "User not found";

/// Calculation service implementing the calculation driving ports.
#[derive(Clone)]
pub struct CalculationService<C, U> {
    calculations: Arc<C>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<C, U> CalculationService<C, U> {
    /// Create a new service with the given repositories and clock.
    pub fn new(calculations: Arc<C>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            calculations,
            users,
            clock,
        }
    }
}

impl From<CalculationError> for Error {
    fn from(error: CalculationError) -> Self {
        let message = error.to_string();
        let reason = error.reason();
        match error {
            CalculationError::UnsupportedOperation {
                requested,
                supported,
            } => Error::invalid_request(message).with_details(json!({
                "field": "type",
                "code": reason,
                "requested": requested,
                "supported": supported,
            })),
            CalculationError::DivisionByZero | CalculationError::ResultOutOfRange => {
                Error::unprocessable(message).with_details(json!({ "code": reason }))
            }
        }
    }
}

fn map_calculation_repository_error(error: CalculationRepositoryError) -> Error {
    match error {
        CalculationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("calculation repository unavailable: {message}"))
        }
        CalculationRepositoryError::Query { message } => {
            Error::internal(format!("calculation repository error: {message}"))
        }
        CalculationRepositoryError::UnknownUser { user_id } => {
            Error::not_found(USER_NOT_FOUND).with_details(json!({
                "field": "userId",
                "code": "unknown_user",
                "value": user_id,
            }))
        }
    }
}

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        other => Error::internal(format!("user repository error: {other}")),
    }
}

#[async_trait]
impl<C, U> CalculationCommand for CalculationService<C, U>
where
    C: CalculationRepository,
    U: UserRepository,
{
    async fn create(&self, draft: CalculationDraft) -> Result<Calculation, Error> {
        let new = NewCalculation::evaluate(draft, self.clock.utc())?;
        let record = self
            .calculations
            .insert(&new)
            .await
            .map_err(map_calculation_repository_error)?;
        tracing::debug!(id = %record.id, kind = %record.kind, "calculation stored");
        Ok(record)
    }

    async fn delete(&self, id: CalculationId) -> Result<(), Error> {
        let deleted = self
            .calculations
            .delete(id)
            .await
            .map_err(map_calculation_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(CALCULATION_NOT_FOUND))
        }
    }
}

#[async_trait]
impl<C, U> CalculationQuery for CalculationService<C, U>
where
    C: CalculationRepository,
    U: UserRepository,
{
    async fn get(&self, id: CalculationId) -> Result<Calculation, Error> {
        self.calculations
            .find_by_id(id)
            .await
            .map_err(map_calculation_repository_error)?
            .ok_or_else(|| Error::not_found(CALCULATION_NOT_FOUND))
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Calculation>, Error> {
        self.calculations
            .list(page)
            .await
            .map_err(map_calculation_repository_error)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Calculation>, Error> {
        let owner = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?;
        if owner.is_none() {
            return Err(Error::not_found(USER_NOT_FOUND));
        }
        self.calculations
            .list_for_user(user_id)
            .await
            .map_err(map_calculation_repository_error)
    }
}

#[cfg(test)]
#[path = "calculation_service_tests.rs"]
mod tests;
