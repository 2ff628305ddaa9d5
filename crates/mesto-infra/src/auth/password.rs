//! Password hashing backed by Argon2.
//!
//! Signup hashes with a fresh random salt per call; signin verifies the
//! stored PHC string. A stored hash that fails to parse is a server-side
//! fault and surfaces as an error, never as "wrong password".

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error as HashError, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use mesto_core::ports::{AuthError, PasswordService};

#[derive(Default)]
pub struct Argon2PasswordService {
    hasher: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .hasher
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        match self.hasher.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(AuthError::HashingError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_the_original_password_only() {
        let service = Argon2PasswordService::new();

        let hash = service.hash("correct-horse-battery").unwrap();

        assert!(service.verify("correct-horse-battery", &hash).unwrap());
        assert!(!service.verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn equal_passwords_hash_differently() {
        let service = Argon2PasswordService::new();

        let a = service.hash("same-password").unwrap();
        let b = service.hash("same-password").unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn corrupt_stored_hash_is_an_error_not_a_mismatch() {
        let service = Argon2PasswordService::new();

        let result = service.verify("anything", "not-a-phc-string");

        assert!(matches!(result, Err(AuthError::HashingError(_))));
    }
}
