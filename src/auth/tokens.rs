/**
 * Session Tokens
 *
 * JWT issuance and verification for user sessions. The service is
 * constructed once at startup from configuration and cloned into the
 * application state; there is no process-global secret.
 *
 * Tokens are stateless: nothing is stored server-side and nothing can
 * be revoked. The only termination mechanisms are expiry and the
 * client discarding its cookie.
 */

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::users::model::Role;

/// Default token lifetime: one hour.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// Fallback signing key for development. Using it is a logged security
/// weakness, not a startup failure.
const DEV_FALLBACK_SECRET: &str = "your_jwt_secret_key_please_change_in_production";

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    pub email: String,
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Signs and verifies session tokens with a process-wide key.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    lifetime_secs: i64,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, lifetime_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            lifetime_secs,
        }
    }

    /// Build the service from an optional configured secret. A missing
    /// secret falls back to the development key and logs the weakness.
    pub fn with_dev_fallback(secret: Option<String>, lifetime_secs: i64) -> Self {
        match secret {
            Some(secret) => Self::new(secret, lifetime_secs),
            None => {
                tracing::warn!(
                    "JWT_SECRET is not set; using the built-in development key. \
                     Tokens are forgeable until a real secret is configured."
                );
                Self::new(DEV_FALLBACK_SECRET, lifetime_secs)
            }
        }
    }

    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime_secs
    }

    /// Issue a signed token for the given identity, expiring after the
    /// configured lifetime.
    pub fn issue(
        &self,
        user_id: i64,
        email: &str,
        role: Role,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            email: email.to_owned(),
            role,
            iat: now,
            exp: now + self.lifetime_secs,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Validate signature and expiry and return the claims. Signature
    /// mismatch, malformed structure, and expiry all fail the same way;
    /// callers must treat every failure as "not authenticated".
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )?;
        Ok(data.claims)
    }
}
