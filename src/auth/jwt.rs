use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::users::model::User;

/// JWT payload used for authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,     // user ID
    pub email: String, // informational only, never trusted over the store
    pub iat: i64,      // issued at (unix timestamp)
    pub exp: i64,      // expires at (unix timestamp)
    pub iss: String,
    pub aud: String,
}

/// Bad signature, wrong issuer/audience, malformed or expired: one outcome.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid or expired token")]
    Invalid,
}

/// Signing and verification keys, built once from the process secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl: Duration::from_secs(cfg.ttl_minutes.max(0) as u64 * 60),
        }
    }

    /// Configured lifetime of access tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn sign_access(&self, user: &User) -> anyhow::Result<String> {
        self.sign(user, self.ttl)
    }

    pub fn sign(&self, user: &User, ttl: Duration) -> anyhow::Result<String> {
        self.sign_at(user, ttl, OffsetDateTime::now_utc())
    }

    pub fn sign_at(&self, user: &User, ttl: Duration, now: OffsetDateTime) -> anyhow::Result<String> {
        let iat = now.unix_timestamp();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            iat,
            exp: iat + ttl.as_secs() as i64,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(user_id = %user.id, exp = claims.exp, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, OffsetDateTime::now_utc())
    }

    /// Expiry is checked here against `now` instead of inside jsonwebtoken,
    /// so callers control the clock.
    pub fn verify_at(&self, token: &str, now: OffsetDateTime) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));

        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| {
                debug!(error = %e, "jwt rejected");
                TokenError::Invalid
            })?
            .claims;

        if claims.exp <= now.unix_timestamp() {
            debug!(user_id = %claims.sub, exp = claims.exp, "jwt expired");
            return Err(TokenError::Invalid);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str, issuer: &str, audience: &str) -> JwtKeys {
        JwtKeys::from_config(&JwtConfig {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_minutes: 60,
        })
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            name: None,
            password_hash: String::new(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn sign_and_verify_access_token() {
        let keys = make_keys("dev-secret", "test-issuer", "test-aud");
        let user = user();
        let token = keys.sign_access(&user).expect("sign access");
        let claims = keys.verify(&token).expect("verify token");
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn one_second_token_expires_once_elapsed() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let issued = OffsetDateTime::now_utc();
        let token = keys
            .sign_at(&user(), Duration::from_secs(1), issued)
            .expect("sign");

        assert!(keys.verify_at(&token, issued).is_ok());
        let later = issued + time::Duration::seconds(1);
        assert_eq!(keys.verify_at(&token, later).unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let good = make_keys("secret-a", "iss", "aud");
        let bad = make_keys("secret-b", "iss", "aud");
        let token = good.sign_access(&user()).expect("sign");
        assert_eq!(bad.verify(&token).unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn verify_rejects_wrong_issuer_or_audience() {
        let good = make_keys("same-secret", "good-iss", "good-aud");
        let other_iss = make_keys("same-secret", "bad-iss", "good-aud");
        let other_aud = make_keys("same-secret", "good-iss", "bad-aud");
        let token = good.sign_access(&user()).expect("sign");
        assert!(other_iss.verify(&token).is_err());
        assert!(other_aud.verify(&token).is_err());
    }

    #[test]
    fn tampered_and_garbage_tokens_fail_the_same_way() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let token = keys.sign_access(&user()).expect("sign");
        let other = keys.sign_access(&user()).expect("sign");
        let (body, _) = token.rsplit_once('.').unwrap();
        let (_, foreign_sig) = other.rsplit_once('.').unwrap();
        let spliced = format!("{body}.{foreign_sig}");

        assert_eq!(keys.verify(&spliced).unwrap_err(), TokenError::Invalid);
        assert_eq!(keys.verify("not.a.jwt").unwrap_err(), TokenError::Invalid);
        assert_eq!(keys.verify("").unwrap_err(), TokenError::Invalid);
    }
}
