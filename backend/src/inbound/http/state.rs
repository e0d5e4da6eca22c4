//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CalculationCommand, CalculationQuery, LoginService, UserAccounts};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub calculations: Arc<dyn CalculationCommand>,
    pub calculations_query: Arc<dyn CalculationQuery>,
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn UserAccounts>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub calculations: Arc<dyn CalculationCommand>,
    pub calculations_query: Arc<dyn CalculationQuery>,
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn UserAccounts>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// A single service usually backs both calculation ports:
    ///
    /// ```ignore
    /// let service = Arc::new(CalculationService::new(calculations, users, clock));
    /// let state = HttpState::new(HttpStatePorts {
    ///     calculations: service.clone(),
    ///     calculations_query: service,
    ///     login: accounts.clone(),
    ///     accounts,
    /// });
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            calculations,
            calculations_query,
            login,
            accounts,
        } = ports;
        Self {
            calculations,
            calculations_query,
            login,
            accounts,
        }
    }
}
