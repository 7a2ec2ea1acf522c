//! # Authentication Module
//!
//! Operator endpoints (opening and closing slots, listing and deciding
//! reservations) are guarded by a single admin password. The password is
//! hashed with Argon2 once at startup; requests present it as
//! `Authorization: Bearer <password>` and are verified against the hash.

use std::sync::Arc;

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{PasswordHash, SaltString, rand_core::OsRng},
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use eyre::{Result, eyre};

use crate::{ApiState, middleware::error_handling::AppError};

/// Hashes a password using the Argon2 algorithm
///
/// # Example
///
/// ```
/// let hashed = reservation_api::middleware::auth::hash_password("secret").unwrap();
/// assert!(hashed.starts_with("$argon2"));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `password` against a PHC-format hash produced by [`hash_password`].
pub fn verify_password(password_hash: &str, password: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|e| eyre!("Invalid password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Extractor that only succeeds for admin requests.
///
/// When no admin password is configured every request is admitted.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AdminAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(password_hash) = state.admin_password_hash.as_deref() else {
            return Ok(AdminAccess);
        };

        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("admin credentials required".to_string()))?;

        if verify_password(password_hash, token)? {
            Ok(AdminAccess)
        } else {
            Err(AppError::Unauthorized("invalid admin credentials".to_string()))
        }
    }
}
