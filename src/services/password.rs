use ring::digest::SHA256_OUTPUT_LEN;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use std::num::NonZeroU32;

const SALT_LEN: usize = 16;
static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

#[derive(thiserror::Error, Debug)]
pub enum PasswordError {
    #[error("Failed to generate salt")]
    SaltGeneration,

    #[error("Iteration count must be positive")]
    InvalidIterations,
}

/// A salted PBKDF2-HMAC-SHA256 password hash.
#[derive(Clone)]
pub struct PasswordHash {
    iterations: NonZeroU32,
    salt: [u8; SALT_LEN],
    hash: [u8; SHA256_OUTPUT_LEN],
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHash")
            .field("iterations", &self.iterations)
            .field("salt", &hex::encode(self.salt))
            .finish_non_exhaustive()
    }
}

/// Hashes a password with a fresh random salt.
pub fn hash_password(password: &str, iterations: u32) -> Result<PasswordHash, PasswordError> {
    let iterations = NonZeroU32::new(iterations).ok_or(PasswordError::InvalidIterations)?;

    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| PasswordError::SaltGeneration)?;

    let mut hash = [0u8; SHA256_OUTPUT_LEN];
    pbkdf2::derive(ALGORITHM, iterations, &salt, password.as_bytes(), &mut hash);

    Ok(PasswordHash {
        iterations,
        salt,
        hash,
    })
}

/// Checks a password against a stored hash. The comparison is constant-time.
pub fn verify_password(password: &str, stored: &PasswordHash) -> bool {
    pbkdf2::verify(
        ALGORITHM,
        stored.iterations,
        &stored.salt,
        password.as_bytes(),
        &stored.hash,
    )
    .is_ok()
}
