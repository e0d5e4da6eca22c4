//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `inbound::http` together with the
//! request, response, and error schemas they reference. Swagger UI serves it
//! in debug builds and `cargo run --bin openapi-dump` prints it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Calculation, Error, ErrorCode, OperationKind, User};
use crate::inbound::http::calculations::CreateCalculationRequest;
use crate::inbound::http::operations::OperationsResponse;
use crate::inbound::http::users::{
    ChangePasswordRequest, LoginRequest, MessageResponse, RegisterRequest,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or /api/v1/users/register.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Calculator backend API",
        description = "Exact two-decimal arithmetic with persisted calculation records and user accounts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::calculations::create_calculation,
        crate::inbound::http::calculations::list_calculations,
        crate::inbound::http::calculations::get_calculation,
        crate::inbound::http::calculations::list_user_calculations,
        crate::inbound::http::calculations::delete_calculation,
        crate::inbound::http::operations::list_operations,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::change_password,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Calculation,
        CreateCalculationRequest,
        OperationKind,
        OperationsResponse,
        User,
        RegisterRequest,
        LoginRequest,
        ChangePasswordRequest,
        MessageResponse,
        Error,
        ErrorCode
    )),
    tags(
        (name = "calculations", description = "Evaluate, store, and browse calculations"),
        (name = "users", description = "Registration, login, and account management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
