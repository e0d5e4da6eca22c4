//! Argon2id implementation of the `CredentialHasher` port.
//!
//! Hashes are stored as PHC strings, so parameters and salt travel with the
//! hash and older hashes stay verifiable if the defaults change.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash as PhcHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;

use crate::domain::PasswordHash;
use crate::domain::ports::{CredentialHasher, CredentialHasherError};

/// Argon2id hasher with the crate's default parameters.
#[derive(Default, Clone)]
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
}

impl Argon2CredentialHasher {
    /// Hasher using Argon2id v19 with default cost parameters.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, CredentialHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| CredentialHasherError::hash(err.to_string()))?;
        Ok(PasswordHash::new(encoded.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, CredentialHasherError> {
        let parsed = PhcHash::new(hash.as_str())
            .map_err(|err| CredentialHasherError::malformed_hash(err.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialHasherError::malformed_hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2CredentialHasher {
        Argon2CredentialHasher::new()
    }

    #[rstest]
    fn hash_produces_argon2id_phc_string(hasher: Argon2CredentialHasher) {
        let hash = hasher.hash("testpass123").expect("hash");
        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(!hash.as_str().contains("testpass123"));
    }

    #[rstest]
    fn hashes_are_salted(hasher: Argon2CredentialHasher) {
        let first = hasher.hash("testpass123").expect("hash");
        let second = hasher.hash("testpass123").expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("testpass123", true)]
    #[case("testpass124", false)]
    #[case("", false)]
    fn verify_checks_password(
        hasher: Argon2CredentialHasher,
        #[case] candidate: &str,
        #[case] expected: bool,
    ) {
        let hash = hasher.hash("testpass123").expect("hash");
        assert_eq!(hasher.verify(candidate, &hash).expect("verify"), expected);
    }

    #[rstest]
    fn verify_rejects_malformed_hash(hasher: Argon2CredentialHasher) {
        let error = hasher
            .verify("testpass123", &PasswordHash::new("not-a-phc-string"))
            .expect_err("malformed");
        assert!(matches!(error, CredentialHasherError::MalformedHash { .. }));
    }
}
