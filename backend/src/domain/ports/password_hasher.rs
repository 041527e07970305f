//! Port for one-way password hashing and verification.

use crate::domain::user::PasswordHashString;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by hashing adapters.
    pub enum PasswordHashError {
        /// Hashing or hash parsing failed.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// One-way, salted password hashing.
///
/// `verify` reports a mismatch as `Ok(false)`, not an error: a wrong password
/// is an expected outcome, a broken hash is not.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash(&self, password: &str) -> Result<PasswordHashString, PasswordHashError>;

    /// Check a plaintext password against a stored hash.
    fn verify(
        &self,
        password: &str,
        hash: &PasswordHashString,
    ) -> Result<bool, PasswordHashError>;
}

/// Transparent "hasher" for unit tests.
///
/// Stores the password behind a recognisable prefix so service tests can run
/// without Argon2 work. Never wired into a real server.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

const FIXTURE_PREFIX: &str = "plain$";

impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHashString, PasswordHashError> {
        Ok(PasswordHashString::new(format!("{FIXTURE_PREFIX}{password}")))
    }

    fn verify(
        &self,
        password: &str,
        hash: &PasswordHashString,
    ) -> Result<bool, PasswordHashError> {
        match hash.as_str().strip_prefix(FIXTURE_PREFIX) {
            Some(stored) => Ok(stored == password),
            None => Err(PasswordHashError::hashing("unrecognised fixture hash")),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn fixture_hash_verifies_round_trip() {
        let hasher = FixturePasswordHasher;
        let hash = hasher.hash("secret").expect("hashing succeeds");
        assert!(hasher.verify("secret", &hash).expect("verify succeeds"));
        assert!(!hasher.verify("other", &hash).expect("verify succeeds"));
    }

    #[test]
    fn fixture_rejects_foreign_hash_formats() {
        let hasher = FixturePasswordHasher;
        let err = hasher
            .verify("secret", &PasswordHashString::new("$argon2id$real"))
            .expect_err("foreign format must error");
        assert!(matches!(err, PasswordHashError::Hashing { .. }));
    }
}
