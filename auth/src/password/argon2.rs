use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Credential hasher for account passwords.
///
/// Argon2id with a fresh random salt per hash; the PHC string it produces
/// carries the parameters and salt needed to verify later.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// PHC string format hash
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`, never an error.
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
