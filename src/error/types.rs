/**
 * API Error Types
 *
 * This module defines the error taxonomy for the Acquisitions API.
 * Every failure a handler, service, or middleware can produce is a
 * variant here, and each variant owns its HTTP status code and the
 * message clients are allowed to see.
 *
 * # Error Categories
 *
 * - `Validation` - request payload failed field-level validation (400)
 * - `EmailAlreadyExists` - signup with an email that is taken (409)
 * - `InvalidCredentials` - sign-in failed; deliberately does not say
 *   whether the email or the password was wrong (401)
 * - `Unauthenticated` - missing, invalid, or expired session token;
 *   deliberately indistinguishable to the client (401)
 * - `Forbidden` - authenticated but not allowed by policy (403)
 * - `NotFound` - the addressed resource does not exist (404)
 * - `Hashing` / `TokenIssue` / `Store` - internal failures (500)
 *
 * Client-facing messages stay generic; the full error (including the
 * source) is logged server-side when the response is built.
 */

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::users::store::StoreError;

/// A single field-level validation failure, reported back to the client
/// inside a 400 response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending request field
    pub field: &'static str,
    /// What was wrong with it
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All errors the API can surface to an HTTP client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request payload failed validation; `details` lists each bad field.
    #[error("validation failed")]
    Validation { details: Vec<FieldError> },

    /// Signup attempted with an email that already has an account.
    #[error("email already exists")]
    EmailAlreadyExists,

    /// Sign-in failed. Covers both unknown email and wrong password so
    /// clients cannot enumerate accounts.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No usable session token on the request. Covers missing cookie,
    /// bad signature, malformed token, and expiry alike.
    #[error("authentication required")]
    Unauthenticated,

    /// The authenticated principal is not allowed to do this.
    #[error("access denied")]
    Forbidden,

    /// The addressed resource does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The password hashing primitive failed (not a mismatch).
    #[error("password hashing failed")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Signing a session token failed.
    #[error("token signing failed")]
    TokenIssue(#[source] jsonwebtoken::errors::Error),

    /// The user store failed in a way that is not a domain error.
    #[error("user store failure")]
    Store(#[source] StoreError),
}

impl ApiError {
    /// Build a `Validation` error from collected field errors.
    pub fn validation(details: Vec<FieldError>) -> Self {
        Self::Validation { details }
    }

    /// Build a `Validation` error for a single field.
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            details: vec![FieldError::new(field, message)],
        }
    }

    pub fn token_issue(source: jsonwebtoken::errors::Error) -> Self {
        Self::TokenIssue(source)
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::EmailAlreadyExists => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Hashing(_) | Self::TokenIssue(_) | Self::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message clients see. Internal failures all collapse to the
    /// same generic string; the source error only goes to the log.
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation { .. } => "Validation failed".to_string(),
            Self::EmailAlreadyExists => "Email already exists".to_string(),
            Self::InvalidCredentials => "Invalid email or password".to_string(),
            Self::Unauthenticated => "Authentication required".to_string(),
            Self::Forbidden => "Access denied".to_string(),
            Self::NotFound(resource) => format!("{resource} not found"),
            Self::Hashing(_) | Self::TokenIssue(_) | Self::Store(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

/// Storage-level unique violations carry domain meaning: a duplicate
/// email discovered at insert time is the same condition as one found
/// by the pre-check, and must produce the same 409.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => Self::EmailAlreadyExists,
            other => Self::Store(other),
        }
    }
}
