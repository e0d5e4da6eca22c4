//! Backend entry-point: loads settings, prepares the database, and serves the
//! REST API.

mod server;

use std::io;
use std::path::Path;

use actix_web::cookie::Key;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use calculator_backend::inbound::http::health::HealthState;
use calculator_backend::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use calculator_backend::settings::Settings;
use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = Settings::load()
        .map_err(|err| io::Error::other(format!("failed to load settings: {err}")))?;

    if settings.run_migrations() {
        run_migrations(settings.database_url.clone()).await?;
    }

    let pool_config = PoolConfig::new(settings.database_url.clone())
        .with_max_size(settings.db_max_connections())
        .with_min_idle(Some(settings.db_min_idle()));
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|err| io::Error::other(err.to_string()))?;
    let (connections, idle) = pool.connections();
    info!(connections, idle, "database pool ready");

    let key = load_session_key(&settings.session_key_file(), settings.session_allow_ephemeral())?;
    let bind_addr = settings.bind_addr();
    let config = ServerConfig::new(key, settings.session_cookie_secure(), bind_addr, pool);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}

async fn run_migrations(database_url: String) -> io::Result<()> {
    let applied = tokio::task::spawn_blocking(move || apply_migrations(&database_url))
        .await
        .map_err(|err| io::Error::other(format!("migration task failed: {err}")))?
        .map_err(|err| io::Error::other(err.to_string()))?;
    info!(applied, "database migrations applied");
    Ok(())
}

fn load_session_key(path: &Path, allow_ephemeral: bool) -> io::Result<Key> {
    match std::fs::read(path) {
        Ok(bytes) => Key::try_derive_from(&bytes).map_err(|err| {
            io::Error::other(format!(
                "session key at {} is unusable: {err}",
                path.display()
            ))
        }),
        Err(e) if cfg!(debug_assertions) || allow_ephemeral => {
            warn!(path = %path.display(), error = %e, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(e) => Err(io::Error::other(format!(
            "failed to read session key at {}: {e}",
            path.display()
        ))),
    }
}
