// Password hashing and verification service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::auth::error::AuthError;

/// Argon2id hasher with a fixed work factor.
///
/// Digests are PHC strings, so the salt and parameters travel with the hash
/// and old digests still verify after the work factor changes.
#[derive(Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    /// Default memory cost in KiB
    pub const DEFAULT_MEMORY_KIB: u32 = Params::DEFAULT_M_COST;

    /// Create a hasher with the given time cost (iterations) and default memory cost
    pub fn new(time_cost: u32) -> Result<Self, AuthError> {
        Self::with_memory_cost(Self::DEFAULT_MEMORY_KIB, time_cost)
    }

    /// Create a hasher with explicit memory (KiB) and time costs
    pub fn with_memory_cost(memory_kib: u32, time_cost: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, time_cost, Params::DEFAULT_P_COST, None)
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a password with a fresh random salt
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))
    }

    /// Verify a password against a stored digest.
    /// A mismatch is `Ok(false)`; only an unusable digest is an error.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::PasswordHashError(e.to_string())),
        }
    }
}
