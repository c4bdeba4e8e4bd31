/**
 * Access Control Middleware
 *
 * Derives the authenticated principal from the session cookie and
 * enforces role/ownership policies before handlers run.
 *
 * # Stages
 *
 * 1. Extract the token from the session cookie; absent → 401
 * 2. Verify it; any failure (signature, structure, expiry) → 401,
 *    with one client-facing message for all causes
 * 3. Attach the resulting `Principal` to the request extensions
 * 4. Policy gates: `require_admin` as a route layer, and
 *    `ensure_owner_or_admin` called by handlers that know the
 *    resource's owning user id
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::cookies;
use crate::error::ApiError;
use crate::server::state::AppState;
use crate::users::model::Role;

/// Authenticated identity for the current request. Attached by
/// `authenticate` and dropped with the request.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Authentication middleware. Rejects the request with 401 unless a
/// valid session token is present; otherwise attaches the principal
/// and continues.
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request.uri().path().to_owned();

    let token = cookies::get(&jar).ok_or_else(|| {
        tracing::warn!(path = %path, "request without session cookie");
        ApiError::Unauthenticated
    })?;

    // Signature, structure, and expiry failures all land here; the log
    // keeps the cause, the client only learns "not authenticated".
    let claims = state.tokens.verify(&token).map_err(|err| {
        tracing::warn!(path = %path, error = %err, "session token rejected");
        ApiError::Unauthenticated
    })?;

    let principal = Principal {
        user_id: claims.sub,
        email: claims.email,
        role: claims.role,
    };
    tracing::debug!(email = %principal.email, path = %path, "request authenticated");
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Extractor handing handlers the principal `authenticate` attached.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                tracing::error!("principal missing from request extensions; route not behind authenticate?");
                ApiError::Unauthenticated
            })
    }
}

/// AdminOnly policy gate, applied as a route layer after `authenticate`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let principal = request
        .extensions()
        .get::<Principal>()
        .cloned()
        .ok_or(ApiError::Unauthenticated)?;

    if !principal.is_admin() {
        tracing::warn!(email = %principal.email, "admin-only route refused");
        return Err(ApiError::Forbidden);
    }

    tracing::info!(email = %principal.email, "admin access granted");
    Ok(next.run(request).await)
}

/// OwnerOrAdmin policy: the principal may act on the resource if they
/// are an admin or the resource belongs to them. Identity comparison is
/// numeric; ids never pass through strings.
pub fn ensure_owner_or_admin(principal: &Principal, resource_user_id: i64) -> Result<(), ApiError> {
    if principal.is_admin() || principal.user_id == resource_user_id {
        return Ok(());
    }
    tracing::warn!(
        email = %principal.email,
        resource_user_id,
        "owner-or-admin policy refused"
    );
    Err(ApiError::Forbidden)
}
