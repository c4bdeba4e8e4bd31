/**
 * Sign-out Handler
 *
 * POST /api/auth/sign-out
 *
 * Expires the session cookie. Tokens are stateless, so there is
 * nothing to revoke server-side; a client that kept the raw token can
 * use it until expiry.
 */

use axum::response::Json;
use axum_extra::extract::cookie::CookieJar;

use crate::auth::cookies;

pub async fn signout(jar: CookieJar) -> (CookieJar, Json<serde_json::Value>) {
    let jar = cookies::clear(jar);
    tracing::info!("user signed out");
    (
        jar,
        Json(serde_json::json!({ "message": "User signed out successfully" })),
    )
}
