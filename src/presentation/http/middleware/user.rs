use axum::http::{HeaderMap, header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::presentation::http::errors::AppError;

/// Claims issued by the authentication service for a signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub user_id: String,
    pub exp: usize,
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

pub fn extract_cookie_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

pub fn decode_optional_user_claims(headers: &HeaderMap, config: &Config) -> Option<UserClaims> {
    let token = extract_cookie_token(headers, &config.auth_cookie_name)
        .or_else(|| extract_bearer_token(headers))?;
    decode::<UserClaims>(
        &token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::new(config.jwt_algorithm),
    )
    .ok()
    .map(|d| d.claims)
}

pub fn decode_required_user_claims(
    headers: &HeaderMap,
    config: &Config,
) -> Result<UserClaims, AppError> {
    decode_optional_user_claims(headers, config)
        .filter(|claims| !claims.user_id.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Missing or invalid token".to_string()))
}
