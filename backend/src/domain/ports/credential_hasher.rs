//! Port for one-way credential hashing.
//!
//! Hashing is CPU-bound and synchronous; services call it from
//! `tokio::task::spawn_blocking`.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hashers.
    pub enum CredentialHasherError {
        /// Producing a new hash failed.
        Hash { message: String } => "credential hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored credential hash is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    fn hash(&self, password: &str) -> Result<PasswordHash, CredentialHasherError>;

    /// Check `password` against a stored hash. A mismatch is `Ok(false)`.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, CredentialHasherError>;
}
