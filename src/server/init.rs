/**
 * Server Initialization
 *
 * Builds the Axum application: configuration, database, state, router.
 *
 * # Initialization Steps
 *
 * 1. Read `AppConfig` from the environment
 * 2. Connect to PostgreSQL and run migrations (startup fails if the
 *    database is unreachable; there is nothing to serve without it)
 * 3. Construct the token service and session settings from config
 * 4. Assemble `AppState` and the router
 */

use std::sync::Arc;

use axum::Router;

use crate::auth::cookies::SessionSettings;
use crate::auth::tokens::TokenService;
use crate::middleware::edge::EdgePolicies;
use crate::routes::create_router;
use crate::server::config::{connect_database, AppConfig, BootError};
use crate::server::state::AppState;
use crate::users::store::{PgUserStore, UserStore};

/// Create the application router, ready to serve.
pub async fn create_app() -> Result<Router, BootError> {
    tracing::info!("initializing Acquisitions API server");

    let config = AppConfig::from_env()?;

    let pool = connect_database(&config.database_url).await?;
    let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));

    let tokens =
        TokenService::with_dev_fallback(config.jwt_secret.clone(), config.token_lifetime_secs);
    let session = SessionSettings {
        secure: config.production,
        max_age_secs: config.token_lifetime_secs,
    };

    let state = AppState::new(store, tokens, session, EdgePolicies::default());

    tracing::info!(
        production = config.production,
        token_lifetime_secs = config.token_lifetime_secs,
        "application state initialized"
    );

    Ok(create_router(state))
}
