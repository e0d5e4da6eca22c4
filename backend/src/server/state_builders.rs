//! Wiring of Diesel repositories and the Argon2 hasher into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use calculator_backend::domain::{CalculationService, UserAccountService};
use calculator_backend::inbound::http::state::{HttpState, HttpStatePorts};
use calculator_backend::outbound::persistence::{
    DbPool, DieselCalculationRepository, DieselUserRepository,
};
use calculator_backend::outbound::security::Argon2CredentialHasher;

/// Build handler state backed by `pool`.
///
/// One [`CalculationService`] serves both calculation ports and one
/// [`UserAccountService`] serves login and account management.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let calculations = Arc::new(CalculationService::new(
        Arc::new(DieselCalculationRepository::new(pool.clone())),
        Arc::clone(&users),
        Arc::clone(&clock),
    ));
    let accounts = Arc::new(UserAccountService::new(
        users,
        Arc::new(Argon2CredentialHasher::new()),
        clock,
    ));
    web::Data::new(HttpState::new(HttpStatePorts {
        calculations: calculations.clone(),
        calculations_query: calculations,
        login: accounts.clone(),
        accounts,
    }))
}
