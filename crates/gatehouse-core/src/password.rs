// Password hashing using Argon2id
// Decision: Use Argon2id as it's the recommended algorithm for password hashing
// Decision: Use default parameters which are secure for most use cases
// Decision: verify never errors; a malformed stored hash simply fails verification

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{AuthError, Result};

/// Hash a password using Argon2id
///
/// The returned PHC string embeds algorithm, parameters and salt, so it can be
/// verified later without any other state.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::password_hash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!("Failed to parse password hash: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
