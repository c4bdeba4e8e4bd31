/**
 * Sign-up Handler
 *
 * POST /api/auth/sign-up
 *
 * # Registration Process
 *
 * 1. Validate name, email, password, and optional role
 * 2. Create the account through the auth service (pre-check, hash,
 *    insert; duplicates surface as 409)
 * 3. Issue a session token and set it as the session cookie
 * 4. Return 201 with the created user, never the password hash
 */

use axum::{extract::State, http::StatusCode, response::Json};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::auth::{cookies, service};
use crate::error::ApiError;
use crate::server::state::AppState;

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>), ApiError> {
    tracing::info!(email = %request.email, "sign-up request");

    let new_user = request.validate()?;
    let user = service::create_user(state.store.as_ref(), new_user).await?;

    let token = state
        .tokens
        .issue(user.id, &user.email, user.role)
        .map_err(ApiError::token_issue)?;
    let jar = cookies::set(jar, token, &state.session);

    tracing::info!(email = %user.email, id = user.id, "user registered successfully");

    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user,
        }),
    ))
}
