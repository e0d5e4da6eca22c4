//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`CredentialHasher`]) are implemented by
//! outbound adapters. Driving ports ([`CalculationCommand`],
//! [`CalculationQuery`], [`LoginService`], [`UserAccounts`]) are implemented
//! by domain services and consumed by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod calculation_command;
mod calculation_query;
mod calculation_repository;
mod credential_hasher;
mod login_service;
mod user_accounts;
mod user_repository;

#[cfg(test)]
pub use calculation_command::MockCalculationCommand;
pub use calculation_command::CalculationCommand;
#[cfg(test)]
pub use calculation_query::MockCalculationQuery;
pub use calculation_query::CalculationQuery;
#[cfg(test)]
pub use calculation_repository::MockCalculationRepository;
pub use calculation_repository::{CalculationRepository, CalculationRepositoryError};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use user_accounts::MockUserAccounts;
pub use user_accounts::UserAccounts;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
