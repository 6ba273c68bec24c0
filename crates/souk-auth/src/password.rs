//! Password hashing and verification using Argon2
//!
//! Uses the argon2id variant with default parameters. Hashes are stored in
//! PHC string format, salt included.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AuthError;

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Unavailable(format!("password hashing failed: {e}")))
}

/// Verify a password against a stored PHC hash
///
/// Returns `false` both for a mismatch and for an unparseable stored hash;
/// the distinction is logged server-side but never exposed.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(cause = %e, "stored password hash is malformed");
            return false;
        }
    };

    Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
}
