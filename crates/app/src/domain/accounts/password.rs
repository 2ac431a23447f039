//! Password hashing.
//!
//! Argon2id with a random salt, stored as a PHC string.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
};
use rand::RngCore;

use crate::domain::accounts::errors::AccountsServiceError;

pub(crate) fn hash_password(password: &str) -> Result<String, AccountsServiceError> {
    let mut salt_bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|error| AccountsServiceError::PasswordHash(error.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|error| AccountsServiceError::PasswordHash(error.to_string()))
}

pub(crate) fn verify_password(password: &str, hash: &str) -> Result<bool, AccountsServiceError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|error| AccountsServiceError::PasswordHash(error.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
