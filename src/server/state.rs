/**
 * Application State
 *
 * The state container shared by every handler and middleware. All of
 * it is established once at startup and read-only afterwards; the only
 * interior mutability is the edge guard's request counters.
 *
 * `FromRef` implementations let handlers extract just the part they
 * need instead of the whole state.
 */

use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;

use crate::auth::cookies::SessionSettings;
use crate::auth::tokens::TokenService;
use crate::middleware::edge::{EdgeGuard, EdgePolicies};
use crate::users::store::UserStore;

#[derive(Clone)]
pub struct AppState {
    /// User persistence; `PgUserStore` in production
    pub store: Arc<dyn UserStore>,

    /// Session token signing and verification
    pub tokens: TokenService,

    /// Session cookie attributes
    pub session: SessionSettings,

    /// Shared edge-protection counters
    pub edge: EdgeGuard,

    /// Per-route-group edge policies
    pub policies: EdgePolicies,

    /// Process start, for the health endpoint's uptime
    pub started: Instant,
}

impl AppState {
    pub fn new(
        store: Arc<dyn UserStore>,
        tokens: TokenService,
        session: SessionSettings,
        policies: EdgePolicies,
    ) -> Self {
        Self {
            store,
            tokens,
            session,
            edge: EdgeGuard::new(),
            policies,
            started: Instant::now(),
        }
    }
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
