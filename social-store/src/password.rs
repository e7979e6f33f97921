//! Password hashing and verification using Argon2id

use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};

use crate::error::{StoreError, StoreResult};

/// Hash a password using Argon2id
/// Returns the PHC string stored in `users.password`
pub fn hash_password(password: &str) -> StoreResult<String> {
    let salt = SaltString::generate(rand::thread_rng());

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StoreError::PasswordHash(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Check a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> StoreResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| StoreError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
