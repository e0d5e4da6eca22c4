//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Connections come from a `bb8` pool through `diesel-async`; schema
//! changes ship as embedded migrations.
//!
//! ```ignore
//! use calculator_backend::outbound::persistence::{
//!     DbPool, DieselCalculationRepository, PoolConfig,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/calculator")).await?;
//! let repo = DieselCalculationRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_calculation_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_calculation_repository::DieselCalculationRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
