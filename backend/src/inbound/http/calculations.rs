//! Calculation API handlers.
//!
//! ```text
//! POST   /api/v1/calculations {"a":"10.00","b":"4.00","type":"ADD"}
//! GET    /api/v1/calculations?offset=0&limit=100
//! GET    /api/v1/calculations/{id}
//! GET    /api/v1/calculations/user/{userId}
//! DELETE /api/v1/calculations/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Calculation, CalculationDraft, CalculationId, Error, OperationKind, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, OperandInput, parse_operand, parse_page, parse_user_id,
};

const A_FIELD: FieldName = FieldName::new("a");
const B_FIELD: FieldName = FieldName::new("b");
const USER_ID_FIELD: FieldName = FieldName::new("userId");

/// Request body for `POST /api/v1/calculations`.
///
/// Operands may be decimal strings or JSON numbers; strings avoid any binary
/// floating point on the client side.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCalculationRequest {
    #[schema(value_type = String, example = "10.00")]
    pub a: OperandInput,
    #[schema(value_type = String, example = "4.00")]
    pub b: OperandInput,
    /// Operation tag; see `GET /api/v1/operations`.
    #[serde(rename = "type")]
    #[schema(example = "ADD")]
    pub operation_type: String,
    /// Owner; defaults to the session user when omitted.
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl CreateCalculationRequest {
    fn into_draft(self, session_user: Option<UserId>) -> Result<CalculationDraft, Error> {
        let a = parse_operand(&self.a, A_FIELD)?;
        let b = parse_operand(&self.b, B_FIELD)?;
        let kind = OperationKind::parse(&self.operation_type)?;
        let user_id = match self.user_id {
            Some(raw) => Some(parse_user_id(raw, USER_ID_FIELD)?),
            None => session_user,
        };
        Ok(CalculationDraft {
            a,
            b,
            kind,
            user_id,
        })
    }
}

/// Pagination query for `GET /api/v1/calculations`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCalculationsQuery {
    /// Rows to skip (default 0). `skip` is accepted as an alias.
    #[serde(alias = "skip")]
    pub offset: Option<i64>,
    /// Page size, 1 to 100 (default 100).
    pub limit: Option<i64>,
}

/// Evaluate and store a calculation.
#[utoipa::path(
    post,
    path = "/api/v1/calculations",
    request_body = CreateCalculationRequest,
    responses(
        (status = 201, description = "Calculation stored", body = Calculation),
        (status = 400, description = "Invalid operand or unsupported operation", body = Error),
        (status = 404, description = "Owner does not exist", body = Error),
        (status = 422, description = "Division by zero or result out of range", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["calculations"],
    operation_id = "createCalculation",
    security([])
)]
#[post("/calculations")]
pub async fn create_calculation(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateCalculationRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft(session.user_id()?)?;
    let record = state.calculations.create(draft).await?;
    Ok(HttpResponse::Created().json(record))
}

/// List calculations ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/calculations",
    params(ListCalculationsQuery),
    responses(
        (status = 200, description = "Calculations", body = [Calculation]),
        (status = 400, description = "Invalid pagination", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["calculations"],
    operation_id = "listCalculations",
    security([])
)]
#[get("/calculations")]
pub async fn list_calculations(
    state: web::Data<HttpState>,
    query: web::Query<ListCalculationsQuery>,
) -> ApiResult<web::Json<Vec<Calculation>>> {
    let ListCalculationsQuery { offset, limit } = query.into_inner();
    let page = parse_page(offset, limit)?;
    let records = state.calculations_query.list(page).await?;
    Ok(web::Json(records))
}

/// Fetch one calculation.
#[utoipa::path(
    get,
    path = "/api/v1/calculations/{id}",
    params(("id" = i64, Path, description = "Calculation id")),
    responses(
        (status = 200, description = "Calculation", body = Calculation),
        (status = 404, description = "Calculation not found", body = Error)
    ),
    tags = ["calculations"],
    operation_id = "getCalculation",
    security([])
)]
#[get("/calculations/{id}")]
pub async fn get_calculation(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Calculation>> {
    let id = CalculationId::new(path.into_inner());
    let record = state.calculations_query.get(id).await?;
    Ok(web::Json(record))
}

/// List every calculation owned by a user.
#[utoipa::path(
    get,
    path = "/api/v1/calculations/user/{userId}",
    params(("userId" = i64, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Calculations owned by the user", body = [Calculation]),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["calculations"],
    operation_id = "listUserCalculations",
    security([])
)]
#[get("/calculations/user/{user_id}")]
pub async fn list_user_calculations(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<Calculation>>> {
    // Ids are positive, so anything else cannot name an existing user.
    let user_id = UserId::new(path.into_inner()).map_err(|_| Error::not_found("User not found"))?;
    let records = state.calculations_query.list_for_user(user_id).await?;
    Ok(web::Json(records))
}

/// Delete a calculation.
#[utoipa::path(
    delete,
    path = "/api/v1/calculations/{id}",
    params(("id" = i64, Path, description = "Calculation id")),
    responses(
        (status = 204, description = "Calculation deleted"),
        (status = 404, description = "Calculation not found", body = Error)
    ),
    tags = ["calculations"],
    operation_id = "deleteCalculation",
    security([])
)]
#[delete("/calculations/{id}")]
pub async fn delete_calculation(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .calculations
        .delete(CalculationId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "calculations_tests.rs"]
mod tests;
