/**
 * Sign-in Handler
 *
 * POST /api/auth/sign-in
 *
 * Verifies credentials and establishes a session. Unknown email and
 * wrong password produce the same 401; only the server log knows
 * which it was.
 */

use axum::{extract::State, response::Json};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::handlers::types::{AuthResponse, SigninRequest};
use crate::auth::{cookies, service};
use crate::error::ApiError;
use crate::server::state::AppState;

pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<SigninRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    tracing::info!(email = %request.email, "sign-in request");

    request.validate()?;
    let user = service::authenticate_user(state.store.as_ref(), &request.email, &request.password)
        .await?;

    let token = state
        .tokens
        .issue(user.id, &user.email, user.role)
        .map_err(ApiError::token_issue)?;
    let jar = cookies::set(jar, token, &state.session);

    tracing::info!(email = %user.email, id = user.id, "user signed in successfully");

    Ok((
        jar,
        Json(AuthResponse {
            message: "User signed in successfully".to_string(),
            user,
        }),
    ))
}
