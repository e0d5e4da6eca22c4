//! Application settings loaded via OrthoConfig.
//!
//! Values come from `CALCULATOR_*` environment variables, an optional
//! configuration file, and command-line flags, in increasing precedence.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_MIN_IDLE: u32 = 2;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Runtime configuration for the calculator server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CALCULATOR")]
pub struct Settings {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Listen address; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<SocketAddr>,
    /// Pool size upper bound.
    pub db_max_connections: Option<u32>,
    /// Idle connections kept open.
    pub db_min_idle: Option<u32>,
    /// File holding the session cookie key material.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`; defaults to `true`.
    pub session_cookie_secure: Option<bool>,
    /// Fall back to a random session key when the key file is unreadable;
    /// defaults to `false`.
    pub session_allow_ephemeral: Option<bool>,
    /// Apply pending migrations at startup; defaults to `true`.
    pub run_migrations: Option<bool>,
}

impl Settings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn db_min_idle(&self) -> u32 {
        self.db_min_idle.unwrap_or(DEFAULT_DB_MIN_IDLE)
    }

    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    pub fn session_cookie_secure(&self) -> bool {
        self.session_cookie_secure.unwrap_or(true)
    }

    pub fn session_allow_ephemeral(&self) -> bool {
        self.session_allow_ephemeral.unwrap_or(false)
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }
}
