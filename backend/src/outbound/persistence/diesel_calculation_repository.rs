//! PostgreSQL-backed `CalculationRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CalculationRepository, CalculationRepositoryError};
use crate::domain::{
    Calculation, CalculationId, NewCalculation, Operand, OperationKind, PageRequest, UserId,
};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{CalculationRow, NewCalculationRow};
use super::pool::{DbPool, PoolError};
use super::schema::calculations;

/// Diesel-backed implementation of the `CalculationRepository` port.
#[derive(Clone)]
pub struct DieselCalculationRepository {
    pool: DbPool,
}

impl DieselCalculationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CalculationRepositoryError {
    map_basic_pool_error(error, CalculationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CalculationRepositoryError {
    map_basic_diesel_error(
        error,
        CalculationRepositoryError::query,
        CalculationRepositoryError::connection,
    )
}

fn map_insert_error(
    error: diesel::result::Error,
    calculation: &NewCalculation,
) -> CalculationRepositoryError {
    match (constraint_violation(&error), calculation.user_id()) {
        (Some(ConstraintViolation::ForeignKey(_)), Some(user_id)) => {
            CalculationRepositoryError::unknown_user(user_id.as_i64())
        }
        _ => map_diesel_error(error),
    }
}

/// Convert a database row into a domain record.
///
/// Rows are written only through this adapter, so a failure here means the
/// table was edited out of band.
fn row_to_calculation(row: CalculationRow) -> Result<Calculation, CalculationRepositoryError> {
    let corrupt = |what: &str| {
        CalculationRepositoryError::query(format!("calculation {} has invalid {what}", row.id))
    };
    let kind = OperationKind::parse(&row.operation_type).map_err(|_| corrupt("type"))?;
    let a = Operand::try_from(row.a).map_err(|_| corrupt("operand a"))?;
    let b = Operand::try_from(row.b).map_err(|_| corrupt("operand b"))?;
    let result = Operand::try_from(row.result).map_err(|_| corrupt("result"))?;
    let user_id = row
        .user_id
        .map(UserId::new)
        .transpose()
        .map_err(|_| corrupt("user_id"))?;
    Ok(Calculation {
        id: CalculationId::new(row.id),
        a,
        b,
        kind,
        result,
        created_at: row.created_at,
        user_id,
    })
}

fn rows_to_calculations(
    rows: Vec<CalculationRow>,
) -> Result<Vec<Calculation>, CalculationRepositoryError> {
    rows.into_iter().map(row_to_calculation).collect()
}

#[async_trait]
impl CalculationRepository for DieselCalculationRepository {
    async fn insert(
        &self,
        calculation: &NewCalculation,
    ) -> Result<Calculation, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCalculationRow {
            a: calculation.a().value(),
            b: calculation.b().value(),
            operation_type: calculation.kind().as_str(),
            result: calculation.result().value(),
            created_at: calculation.created_at(),
            user_id: calculation.user_id().map(UserId::as_i64),
        };

        let row: CalculationRow = diesel::insert_into(calculations::table)
            .values(&new_row)
            .returning(CalculationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, calculation))?;

        row_to_calculation(row)
    }

    async fn find_by_id(
        &self,
        id: CalculationId,
    ) -> Result<Option<Calculation>, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CalculationRow> = calculations::table
            .find(id.as_i64())
            .select(CalculationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_calculation).transpose()
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Calculation>, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CalculationRow> = calculations::table
            .order(calculations::id.asc())
            .offset(page.offset())
            .limit(page.limit())
            .select(CalculationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_calculations(rows)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Calculation>, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CalculationRow> = calculations::table
            .filter(calculations::user_id.eq(user_id.as_i64()))
            .order(calculations::id.asc())
            .select(CalculationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_calculations(rows)
    }

    async fn delete(&self, id: CalculationId) -> Result<bool, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(calculations::table.find(id.as_i64()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
