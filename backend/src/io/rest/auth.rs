//! Bearer tokens and the request extractor that turns them into a [`Caller`].

use std::convert::Infallible;

use anyhow::Result;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Caller;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Owner identity
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies HS256 session tokens
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Token for `user_id` and its expiry in seconds since the epoch
    pub fn issue(&self, user_id: &str) -> Result<(String, i64)> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok((token, claims.exp))
    }

    /// Owner identity carried by a valid, unexpired token
    pub fn verify(&self, token: &str) -> Result<String> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))?;
        Ok(data.claims.sub)
    }
}

/// Resolves the `Authorization: Bearer` header. A missing or invalid token
/// yields an anonymous caller; the services reject it where it matters.
#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let Some(token) = token else {
            return Ok(Caller::anonymous());
        };

        match state.tokens.verify(token) {
            Ok(user_id) => Ok(Caller::authenticated(user_id)),
            Err(e) => {
                debug!("Ignoring invalid bearer token: {}", e);
                Ok(Caller::anonymous())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_verifies() {
        let issuer = TokenIssuer::new("secret", 1);

        let (token, expires_at) = issuer.issue("user-1").unwrap();

        assert_eq!(issuer.verify(&token).unwrap(), "user-1");
        assert!(expires_at > Utc::now().timestamp());
    }

    #[test]
    fn test_token_from_another_secret_is_rejected() {
        let (token, _) = TokenIssuer::new("secret", 1).issue("user-1").unwrap();

        assert!(TokenIssuer::new("other", 1).verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Far enough in the past to clear the default leeway
        let issuer = TokenIssuer::new("secret", -2);
        let (token, _) = issuer.issue("user-1").unwrap();

        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(TokenIssuer::new("secret", 1).verify("not.a.token").is_err());
    }
}
