//! Account and authentication domain service.
//!
//! Implements [`LoginService`] and [`UserAccounts`]. Credential hashing runs
//! on the blocking pool so Argon2 never stalls an actix worker.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use zeroize::Zeroizing;

use crate::domain::ports::{
    CredentialHasher, CredentialHasherError, LoginService, UserAccounts, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    Error, LoginCredentials, NewUser, PasswordChange, PasswordHash, Registration, User, UserId,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const UNKNOWN_USER_PASSWORD: &str = "unknown-user-placeholder";

/// Account service implementing the login and account driving ports.
#[derive(Clone)]
pub struct UserAccountService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
    unknown_user_hash: Arc<OnceLock<PasswordHash>>,
}

impl<R, H> UserAccountService<R, H> {
    /// Create a new service with the given repository, hasher, and clock.
    pub fn new(users: Arc<R>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            clock,
            unknown_user_hash: Arc::new(OnceLock::new()),
        }
    }
}

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateUsername { username } => {
            Error::conflict("Username already registered").with_details(json!({
                "field": "username",
                "code": "duplicate_username",
                "value": username,
            }))
        }
        UserRepositoryError::DuplicateEmail { email } => {
            Error::conflict("Email already registered").with_details(json!({
                "field": "email",
                "code": "duplicate_email",
                "value": email,
            }))
        }
    }
}

fn map_hasher_error(error: CredentialHasherError) -> Error {
    Error::internal(error.to_string())
}

fn invalid_credentials() -> Error {
    Error::unauthorized(INVALID_CREDENTIALS)
}

impl<R, H> UserAccountService<R, H>
where
    R: UserRepository,
    H: CredentialHasher + 'static,
{
    async fn hash_password(&self, password: &str) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("credential hashing task failed: {err}")))?
            .map_err(map_hasher_error)
    }

    /// Hash checked when the username is unknown, so failed logins cost one
    /// verification whether or not the account exists.
    async fn unknown_user_hash(&self) -> Result<PasswordHash, Error> {
        if let Some(hash) = self.unknown_user_hash.get() {
            return Ok(hash.clone());
        }
        let hash = self.hash_password(UNKNOWN_USER_PASSWORD).await?;
        Ok(self.unknown_user_hash.get_or_init(|| hash).clone())
    }

    async fn verify_password(&self, password: &str, hash: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| Error::internal(format!("credential check task failed: {err}")))?
            .map_err(map_hasher_error)
    }
}

#[async_trait]
impl<R, H> LoginService for UserAccountService<R, H>
where
    R: UserRepository,
    H: CredentialHasher + 'static,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Some(account) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_repository_error)?
        else {
            let hash = self.unknown_user_hash().await?;
            self.verify_password(credentials.password(), hash).await?;
            return Err(invalid_credentials());
        };

        if !self
            .verify_password(credentials.password(), account.password_hash)
            .await?
        {
            return Err(invalid_credentials());
        }
        Ok(account.user.id())
    }
}

#[async_trait]
impl<R, H> UserAccounts for UserAccountService<R, H>
where
    R: UserRepository,
    H: CredentialHasher + 'static,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let password_hash = self.hash_password(registration.password()).await?;
        let new_user = NewUser {
            username: registration.username().clone(),
            email: registration.email().clone(),
            password_hash,
            created_at: self.clock.utc(),
        };
        let account = self
            .users
            .insert(&new_user)
            .await
            .map_err(map_user_repository_error)?;
        tracing::info!(user_id = %account.user.id(), "user registered");
        Ok(account.user)
    }

    async fn current_user(&self, user_id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .map(|account| account.user)
            .ok_or_else(|| Error::unauthorized("session user no longer exists"))
    }

    async fn change_password(&self, user_id: UserId, change: PasswordChange) -> Result<(), Error> {
        let account = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::unauthorized("session user no longer exists"))?;

        if !self
            .verify_password(change.current(), account.password_hash)
            .await?
        {
            return Err(Error::unauthorized("Current password is incorrect"));
        }

        let replacement = self.hash_password(change.replacement()).await?;
        let updated = self
            .users
            .update_password_hash(user_id, &replacement)
            .await
            .map_err(map_user_repository_error)?;
        if !updated {
            return Err(Error::unauthorized("session user no longer exists"));
        }
        tracing::info!(user_id = %user_id, "password changed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_account_service_tests.rs"]
mod tests;
