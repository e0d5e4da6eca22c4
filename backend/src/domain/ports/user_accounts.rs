//! Driving port for account management.

use async_trait::async_trait;

use crate::domain::{Error, PasswordChange, Registration, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Create an account; `conflict` when the username or email is taken.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Load the account behind a session; `unauthorized` when it vanished.
    async fn current_user(&self, user_id: UserId) -> Result<User, Error>;

    /// Replace the password after verifying the current one.
    async fn change_password(&self, user_id: UserId, change: PasswordChange) -> Result<(), Error>;
}
