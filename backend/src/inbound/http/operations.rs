//! Operation registry endpoint.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::list_supported;

/// Supported operation tags in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationsResponse {
    #[schema(example = json!(["ADD", "SUBTRACT", "MULTIPLY", "DIVIDE"]))]
    pub operations: Vec<String>,
}

/// List the operation tags `POST /api/v1/calculations` accepts.
#[utoipa::path(
    get,
    path = "/api/v1/operations",
    responses((status = 200, description = "Supported operations", body = OperationsResponse)),
    tags = ["calculations"],
    operation_id = "listOperations",
    security([])
)]
#[get("/operations")]
pub async fn list_operations() -> web::Json<OperationsResponse> {
    web::Json(OperationsResponse {
        operations: list_supported().into_iter().map(str::to_owned).collect(),
    })
}
