//! HTTP inbound adapter exposing REST endpoints.

pub mod calculations;
pub mod error;
pub mod health;
pub mod operations;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::{ApiResult, json_config, path_config, query_config};
