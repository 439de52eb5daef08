use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::error::AppError;
use crate::logger::redact;
use crate::services::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Supplier,
    Manager,
    Consumer,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

/// The caller, attached to request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub subject: String,
    pub role: Role,
}

impl AuthUser {
    pub fn require_role(&self, role: Role) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!("{:?} role required", role).to_lowercase()))
        }
    }
}

pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();

    let user = if let Some(provided) = headers.get(API_KEY_HEADER).and_then(|h| h.to_str().ok()) {
        match state.config.api_key.as_deref() {
            Some(expected) if verify_api_key(provided, expected) => AuthUser {
                subject: "api-key".to_string(),
                role: Role::Manager,
            },
            _ => {
                tracing::warn!(key = %redact(provided), "rejected api key");
                return Err(AppError::Unauthorized);
            }
        }
    } else {
        let token = headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let claims = validate_jwt(token, &state.config.jwt_secret).map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            AppError::Unauthorized
        })?;
        AuthUser {
            subject: claims.sub,
            role: claims.role,
        }
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

pub fn verify_api_key(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Validate a JWT token with the given secret.
/// Returns the decoded claims or an error.
pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let data = decode::<Claims>(token, &key, &Validation::new(Algorithm::HS256))?;
    Ok(data.claims)
}

/// Sign a token for `subject`, valid for `ttl_secs` from now.
pub fn issue_token(
    subject: &str,
    role: Role,
    secret: &str,
    ttl_secs: usize,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp().max(0) as usize;
    let claims = Claims {
        sub: subject.to_string(),
        role,
        iat: now,
        exp: now + ttl_secs,
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
}
