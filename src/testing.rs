//! Test Support
//!
//! In-memory user store and request helpers shared by the unit and
//! router tests. The in-memory store honors the same contract as
//! `PgUserStore`, including the duplicate-email signal, so the whole
//! HTTP surface can be exercised without PostgreSQL.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use chrono::Utc;
use tower::ServiceExt;

use crate::auth::cookies::{SessionSettings, SESSION_COOKIE};
use crate::auth::service;
use crate::auth::tokens::TokenService;
use crate::middleware::edge::EdgePolicies;
use crate::server::state::AppState;
use crate::users::model::{NewUser, NewUserRecord, PublicUser, Role, User, UserChanges};
use crate::users::store::{StoreError, UserStore};

/// A User-Agent the bot detector accepts.
pub const BROWSER_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/125.0";

const TEST_SECRET: &str = "test-secret";

/// In-memory `UserStore` with the same observable behavior as the
/// Postgres implementation.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn insert(&self, record: NewUserRecord) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|user| user.email == record.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let now = Utc::now();
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: record.name,
            email: record.email,
            password_hash: record.password_hash,
            role: record.role,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_by_id(
        &self,
        id: i64,
        changes: UserChanges,
    ) -> Result<Option<User>, StoreError> {
        let mut users = self.users.lock().unwrap();
        if let Some(email) = &changes.email {
            if users.iter().any(|user| user.email == *email && user.id != id) {
                return Err(StoreError::DuplicateEmail);
            }
        }
        let Some(user) = users.iter_mut().find(|user| user.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let mut users = self.users.lock().unwrap();
        let position = users.iter().position(|user| user.id == id);
        Ok(position.map(|index| users.remove(index)))
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.lock().unwrap().clone())
    }
}

/// Application state over an empty in-memory store with the default
/// edge policies.
pub fn test_state() -> AppState {
    test_state_with_policies(EdgePolicies::default())
}

pub fn test_state_with_policies(policies: EdgePolicies) -> AppState {
    AppState::new(
        Arc::new(InMemoryUserStore::new()),
        TokenService::new(TEST_SECRET, 3600),
        SessionSettings {
            secure: false,
            max_age_secs: 3600,
        },
        policies,
    )
}

/// Create a user directly through the auth service, bypassing HTTP.
pub async fn seed_user(state: &AppState, name: &str, email: &str, password: &str, role: Role) -> PublicUser {
    service::create_user(
        state.store.as_ref(),
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        },
    )
    .await
    .expect("seeding a user should succeed")
}

/// A `Cookie` header value carrying a fresh session token for `user`.
pub fn session_cookie_for(state: &AppState, user: &PublicUser) -> String {
    let token = state
        .tokens
        .issue(user.id, &user.email, user.role)
        .expect("issuing a test token should succeed");
    format!("{SESSION_COOKIE}={token}")
}

/// Request builder preloaded with a browser User-Agent.
pub fn request(method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::USER_AGENT, BROWSER_UA)
}

pub fn with_json(
    builder: axum::http::request::Builder,
    body: &serde_json::Value,
) -> Request<Body> {
    builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn without_body(builder: axum::http::request::Builder) -> Request<Body> {
    builder.body(Body::empty()).unwrap()
}

/// Drive one request through the router.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("router should be infallible")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
