/**
 * Edge Protection Middleware
 *
 * Pre-core request filtering: fixed-window rate limiting, User-Agent
 * bot detection, and sign-up email screening. Each route group runs
 * under its own policy; auth routes get the strictest one.
 *
 * The core never sees a denied request. Denials map to:
 * - 429 when the rate limit is exceeded
 * - 403 when the client looks automated
 * - 400 when a screened email is malformed or disposable
 *
 * A failure inside this layer itself (a poisoned lock, an unreadable
 * body) fails open: availability beats filtering.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};

use crate::auth::handlers::types::is_well_formed_email;

/// Largest body the email screen will buffer.
const SCREEN_BODY_LIMIT: usize = 64 * 1024;

/// User-Agent fragments that mark automated clients.
const AUTOMATED_UA_MARKERS: &[&str] = &[
    "bot", "crawler", "spider", "curl", "wget", "python-requests", "scrapy", "headless",
];

/// Throwaway email providers refused at sign-up.
const DISPOSABLE_DOMAINS: &[&str] = &[
    "mailinator.com",
    "guerrillamail.com",
    "10minutemail.com",
    "tempmail.com",
    "yopmail.com",
    "discard.email",
];

/// Filtering rules for one route group.
#[derive(Debug, Clone)]
pub struct EdgePolicy {
    /// Key prefix so each policy counts its own windows
    pub name: &'static str,
    pub window_secs: u64,
    pub max_requests: u32,
    pub detect_bots: bool,
    /// Screen the `email` field of JSON bodies
    pub screen_email: bool,
}

impl EdgePolicy {
    /// Auth routes: 5 attempts per 15 minutes, no bots, emails screened.
    pub fn auth() -> Self {
        Self {
            name: "auth",
            window_secs: 15 * 60,
            max_requests: 5,
            detect_bots: true,
            screen_email: true,
        }
    }

    /// General API routes: 60 requests per minute, no bots.
    pub fn api() -> Self {
        Self {
            name: "api",
            window_secs: 60,
            max_requests: 60,
            detect_bots: true,
            screen_email: false,
        }
    }

    /// Health and informational routes: permissive, monitors welcome.
    pub fn health() -> Self {
        Self {
            name: "health",
            window_secs: 60,
            max_requests: 300,
            detect_bots: false,
            screen_email: false,
        }
    }
}

/// The per-route policies a server runs with.
#[derive(Debug, Clone)]
pub struct EdgePolicies {
    pub auth: EdgePolicy,
    pub api: EdgePolicy,
    pub health: EdgePolicy,
}

impl Default for EdgePolicies {
    fn default() -> Self {
        Self {
            auth: EdgePolicy::auth(),
            api: EdgePolicy::api(),
            health: EdgePolicy::health(),
        }
    }
}

struct Window {
    started: Instant,
    count: u32,
}

/// Shared fixed-window request counters, keyed by policy and client.
#[derive(Clone, Default)]
pub struct EdgeGuard {
    windows: Arc<Mutex<HashMap<String, Window>>>,
}

impl EdgeGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the request against its window. Returns false when the
    /// window is already full.
    fn admit(&self, key: String, window_secs: u64, max_requests: u32) -> bool {
        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            // A poisoned counter map fails open.
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = Instant::now();
        let window = windows.entry(key).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(window.started).as_secs() >= window_secs {
            window.started = now;
            window.count = 0;
        }
        if window.count >= max_requests {
            return false;
        }
        window.count += 1;
        true
    }
}

/// Best-effort client identity: proxy headers first, then a shared
/// fallback bucket.
fn client_key(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    if let Some(real_ip) = headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
    {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }
    "local".to_string()
}

fn looks_automated(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    AUTOMATED_UA_MARKERS.iter().any(|marker| ua.contains(marker))
}

fn is_disposable(email: &str) -> bool {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    let domain = domain.to_ascii_lowercase();
    DISPOSABLE_DOMAINS.iter().any(|known| *known == domain)
}

fn deny(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": error, "message": message })),
    )
        .into_response()
}

/// Edge protection middleware; wire with
/// `middleware::from_fn_with_state((guard, policy), edge_protect)`.
pub async fn edge_protect(
    State((guard, policy)): State<(EdgeGuard, EdgePolicy)>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_key(request.headers());
    let path = request.uri().path().to_owned();

    if !guard.admit(
        format!("{}:{}", policy.name, client),
        policy.window_secs,
        policy.max_requests,
    ) {
        tracing::warn!(client = %client, path = %path, policy = policy.name, "edge: rate limit exceeded");
        return deny(
            StatusCode::TOO_MANY_REQUESTS,
            "Too Many Requests",
            "Rate limit exceeded. Please try again later.",
        );
    }

    if policy.detect_bots {
        if let Some(user_agent) = request
            .headers()
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
        {
            if looks_automated(user_agent) {
                tracing::warn!(client = %client, path = %path, user_agent, "edge: automated client denied");
                return deny(
                    StatusCode::FORBIDDEN,
                    "Forbidden",
                    "Automated requests are not allowed.",
                );
            }
        }
    }

    if policy.screen_email {
        match screen_email(request).await {
            Ok(request) => next.run(request).await,
            Err(response) => response,
        }
    } else {
        next.run(request).await
    }
}

/// Inspect the `email` field of a JSON body before the core sees it.
/// The body is buffered and handed back intact; requests without a
/// parsable JSON body or an email field pass through untouched, since
/// handler validation owns those cases.
async fn screen_email(request: Request) -> Result<Request, Response> {
    let (parts, body) = request.into_parts();

    let bytes: Bytes = match axum::body::to_bytes(body, SCREEN_BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "edge: request body unreadable");
            return Err(deny(
                StatusCode::BAD_REQUEST,
                "Bad Request",
                "Request body could not be read.",
            ));
        }
    };

    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&bytes) {
        if let Some(email) = value.get("email").and_then(|v| v.as_str()) {
            if !is_well_formed_email(email) {
                tracing::warn!(email, "edge: malformed email denied");
                return Err(deny(
                    StatusCode::BAD_REQUEST,
                    "Invalid Email",
                    "Please provide a valid email address.",
                ));
            }
            if is_disposable(email) {
                tracing::warn!(email, "edge: disposable email denied");
                return Err(deny(
                    StatusCode::BAD_REQUEST,
                    "Invalid Email",
                    "Please provide a valid email address.",
                ));
            }
        }
    }

    Ok(Request::from_parts(parts, Body::from(bytes)))
}
