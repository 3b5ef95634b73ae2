//! One-way password hashing and verification.
//!
//! Hashes are Argon2id in PHC string format; the salt is embedded in the
//! output value so verification is self-contained.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum PasswordError {
    #[error("Hashing error: {0}")]
    Hash(String),
}

/// Hash `password` with a fresh random salt.
///
/// Fails only on internal error (entropy source or hasher failure), never
/// on the password content.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| PasswordError::Hash(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Hash(e.to_string()))?;

    let argon2 = Argon2::default();
    let phc = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?
        .to_string();

    Ok(phc)
}

/// Verify `password` against a stored PHC string.
///
/// Never fails: a mismatch, an empty hash, or a malformed hash all return
/// false.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
