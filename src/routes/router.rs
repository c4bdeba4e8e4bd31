/**
 * Router Configuration
 *
 * Assembles the full application router:
 *
 * - `GET /health`, `GET /api`       - informational, unauthenticated,
 *                                     permissive edge policy
 * - `POST /api/auth/sign-up|in|out` - auth endpoints, strict edge policy
 * - `/api/users` CRUD               - authenticated; listing is
 *                                     admin-only, by-id routes enforce
 *                                     owner-or-admin in their handlers
 * - anything else                   - JSON 404
 *
 * Outer layers: request tracing, permissive CORS, and the security
 * response headers.
 */

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::auth::handlers::{signin, signout, signup};
use crate::middleware::auth::{authenticate, require_admin};
use crate::middleware::edge::edge_protect;
use crate::server::state::AppState;
use crate::users::handlers::{delete_user, fetch_all_users, fetch_user_by_id, update_user};

/// Create the application router with all routes and layers configured.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .merge(meta_routes(&state))
        .nest("/api/auth", auth_routes(&state))
        .nest("/api/users", user_routes(&state))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    router.with_state(state)
}

/// Health and API index, behind the permissive edge policy.
fn meta_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api", get(api_index))
        .layer(axum::middleware::from_fn_with_state(
            (state.edge.clone(), state.policies.health.clone()),
            edge_protect,
        ))
}

/// Authentication endpoints, behind the strict edge policy.
fn auth_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(signup))
        .route("/sign-in", post(signin))
        .route("/sign-out", post(signout))
        .layer(axum::middleware::from_fn_with_state(
            (state.edge.clone(), state.policies.auth.clone()),
            edge_protect,
        ))
}

/// User CRUD. Layer order, outermost first: edge protection,
/// authentication, then the admin-only gate on the list route.
fn user_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(fetch_all_users).layer(axum::middleware::from_fn(require_admin)),
        )
        .route(
            "/{id}",
            get(fetch_user_by_id).put(update_user).delete(delete_user),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            authenticate,
        ))
        .layer(axum::middleware::from_fn_with_state(
            (state.edge.clone(), state.policies.api.clone()),
            edge_protect,
        ))
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime": state.started.elapsed().as_secs_f64(),
    }))
}

async fn api_index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to the Acquisitions API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /api/auth/sign-up",
            "POST /api/auth/sign-in",
            "POST /api/auth/sign-out",
            "GET /api/users",
            "GET /api/users/{id}",
            "PUT /api/users/{id}",
            "DELETE /api/users/{id}",
        ],
    }))
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Route/Endpoint not found" })),
    )
}
