//! Embedded PostgreSQL provisioning for repository suites.
//!
//! Every suite shares one cluster per test binary and gets a fresh database
//! migrated with the same embedded migrations the server applies at startup.

use calculator_backend::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;

use super::format_postgres_error;

/// Create a temporary database with all migrations applied.
pub fn provision_migrated_database() -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|err| format!("start cluster: {err:?}"))?;
    let database = cluster
        .create_temporary_database()
        .map_err(|err| format!("create database: {err:?}"))?;
    apply_migrations(database.url()).map_err(|err| err.to_string())?;
    Ok(database)
}

/// Small pool for a single test database.
pub fn test_pool(runtime: &Runtime, url: &str) -> Result<DbPool, String> {
    let config = PoolConfig::new(url).with_max_size(2).with_min_idle(Some(1));
    runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())
}

/// Drop `table` to simulate schema loss.
pub fn drop_table(url: &str, table: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("DROP TABLE IF EXISTS {table} CASCADE;"))
        .map_err(|err| format_postgres_error(&err))
}
