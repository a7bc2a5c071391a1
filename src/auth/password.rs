use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::config::AdminCredentials;

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Parameters are taken from the PHC string, not from `Argon2::default()`.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Exact, case-sensitive match on the username plus an Argon2 password check.
/// The password is verified even when the username is wrong so both failure
/// paths cost the same.
pub fn check_credentials(
    admin: &AdminCredentials,
    username: &str,
    password: &str,
) -> anyhow::Result<bool> {
    if username.is_empty() || password.is_empty() {
        return Ok(false);
    }
    let username_ok = username == admin.username;
    let password_ok = verify_password(password, &admin.password_hash)?;
    Ok(username_ok && password_ok)
}

/// Cheap-to-verify hash of `"test-password"`, computed once per test binary.
#[cfg(test)]
pub(crate) fn test_password_hash() -> &'static str {
    use argon2::{Algorithm, Params, Version};
    use std::sync::OnceLock;

    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| {
        let params = Params::new(8, 1, 1, None).unwrap();
        let salt = SaltString::generate(&mut OsRng);
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(b"test-password", &salt)
            .unwrap()
            .to_string()
    })
}
