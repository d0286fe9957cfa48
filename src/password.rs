//! Password hashing: argon2id, stored as PHC strings.

use std::sync::OnceLock;

use argon2::Argon2;
use log::error;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

pub use password_hash::Error;

/// Hash a plain password with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
}

/// Check `password` against a stored PHC string.
///
/// `Ok(false)` is a mismatch. `Err` means `pwhash` itself is unusable.
pub fn verify_password(password: &str, pwhash: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(pwhash)?;

    // params (memory, iterations, parallelism) come from the PHC string
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

static DUMMY: OnceLock<Option<String>> = OnceLock::new();

/// Burn the same work as a real verification, for lookups that found nobody.
pub fn verify_dummy(password: &str) {
    let dummy = DUMMY.get_or_init(|| {
        hash_password("credcheck-dummy")
            .map_err(|e| error!("couldn't create dummy hash: {e}"))
            .ok()
    });

    if let Some(dummy) = dummy {
        let _ = verify_password(password, dummy);

        #[cfg(test)]
        if let Ok(mut checks) = test::DUMMY_CHECKS.lock() {
            checks.push(password.into());
        }
    }
}
