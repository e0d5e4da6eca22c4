//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without importing the
//! backing infrastructure.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown usernames and wrong passwords both yield `unauthorized` with
    /// the same message.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
