use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{config::JwtConfig, error::ApiError, state::AppState};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
    pub iat: usize,
    pub iss: String,
    pub aud: String,
    pub kind: TokenKind,
}

/// Both failures mean "unauthenticated" to the caller; the split exists so
/// logs can tell an expired session from a tampered or malformed token.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            issuer,
            audience,
            access_ttl_hours,
            refresh_ttl_days,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            access_ttl: Duration::from_secs((access_ttl_hours as u64) * 3600),
            refresh_ttl: Duration::from_secs((refresh_ttl_days as u64) * 86_400),
        }
    }
}

impl JwtKeys {
    fn sign_with_kind(&self, user_id: Uuid, kind: TokenKind) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let exp = now + TimeDuration::seconds(ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            kind,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, kind = ?kind, "jwt signed");
        Ok(token)
    }

    pub fn sign_access(&self, user_id: Uuid) -> anyhow::Result<String> {
        self.sign_with_kind(user_id, TokenKind::Access)
    }
    pub fn sign_refresh(&self, user_id: Uuid) -> anyhow::Result<String> {
        self.sign_with_kind(user_id, TokenKind::Refresh)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;
        debug!(user_id = %data.claims.sub, kind = ?data.claims.kind, "jwt verified");
        Ok(data.claims)
    }

    /// Refresh tokens mint new access tokens; an access token presented
    /// here is rejected outright.
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.verify(token)?;
        if claims.kind != TokenKind::Refresh {
            return Err(TokenError::Invalid);
        }
        Ok(claims)
    }
}

/// Extracts the authenticated subject from `Authorization: Bearer <token>`.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized("Invalid Authorization header"))?;

        let claims = match keys.verify(token) {
            Ok(c) => c,
            Err(TokenError::Expired) => {
                warn!("expired token");
                return Err(ApiError::Unauthorized("Token expired"));
            }
            Err(TokenError::Invalid) => {
                warn!("invalid token");
                return Err(ApiError::Unauthorized("Invalid token"));
            }
        };

        if claims.kind != TokenKind::Access {
            return Err(ApiError::Unauthorized("Access token required"));
        }

        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        let state = AppState::fake();
        JwtKeys::from_ref(&state)
    }

    #[tokio::test]
    async fn sign_and_verify_access_token() {
        let keys = make_keys();
        let user_id = Uuid::new_v4();
        let token = keys.sign_access(user_id).expect("sign access");
        let claims = keys.verify(&token).expect("verify token");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-audience");
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[tokio::test]
    async fn sign_and_verify_refresh_token() {
        let keys = make_keys();
        let user_id = Uuid::new_v4();
        let token = keys.sign_refresh(user_id).expect("sign refresh");
        let claims = keys.verify_refresh(&token).expect("verify refresh");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.kind, TokenKind::Refresh);
    }

    #[tokio::test]
    async fn verify_refresh_rejects_access_token() {
        let keys = make_keys();
        let token = keys.sign_access(Uuid::new_v4()).expect("sign access");
        assert_eq!(keys.verify_refresh(&token).unwrap_err(), TokenError::Invalid);
    }

    #[tokio::test]
    async fn verify_reports_expired_tokens_distinctly() {
        let keys = make_keys();
        let now = OffsetDateTime::now_utc();
        // Expired well past the validation leeway.
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: (now - TimeDuration::hours(2)).unix_timestamp() as usize,
            exp: (now - TimeDuration::hours(1)).unix_timestamp() as usize,
            iss: keys.issuer.clone(),
            aud: keys.audience.clone(),
            kind: TokenKind::Access,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).expect("encode");
        assert_eq!(keys.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[tokio::test]
    async fn verify_rejects_garbage_tokens() {
        let keys = make_keys();
        assert_eq!(
            keys.verify("not.a.token").unwrap_err(),
            TokenError::Invalid
        );
    }

    #[tokio::test]
    async fn verify_rejects_a_tampered_signature() {
        let keys = make_keys();
        let mut token = keys.sign_access(Uuid::new_v4()).expect("sign access");
        let flipped = if token.ends_with('A') { 'B' } else { 'A' };
        token.pop();
        token.push(flipped);
        assert_eq!(keys.verify(&token).unwrap_err(), TokenError::Invalid);
    }
}
