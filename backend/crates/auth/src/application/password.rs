//! Password hashing off the async runtime
//!
//! Argon2 takes tens of milliseconds of CPU per call, so both directions
//! run on the blocking thread pool.

use platform::password::{ClearTextPassword, HashedPassword};

use crate::application::config::AuthConfig;
use crate::error::AuthResult;

pub(crate) async fn hash_password(
    config: &AuthConfig,
    password: ClearTextPassword,
) -> AuthResult<HashedPassword> {
    let pepper = config.password_pepper.clone();
    let hashed = tokio::task::spawn_blocking(move || {
        password.hash(pepper.as_deref().map(Vec::as_slice))
    })
    .await??;
    Ok(hashed)
}

pub(crate) async fn verify_password(
    config: &AuthConfig,
    hash: HashedPassword,
    password: ClearTextPassword,
) -> AuthResult<bool> {
    let pepper = config.password_pepper.clone();
    let valid = tokio::task::spawn_blocking(move || {
        hash.verify(&password, pepper.as_deref().map(Vec::as_slice))
    })
    .await?;
    Ok(valid)
}
