//! Route Configuration Module
//!
//! Assembles every HTTP route into the application router.
//!
//! # Routes
//!
//! - `GET /health` - liveness probe with uptime
//! - `GET /api` - service description
//! - `POST /api/auth/sign-up` - registration (sets session cookie)
//! - `POST /api/auth/sign-in` - authentication (sets session cookie)
//! - `POST /api/auth/sign-out` - clears the session cookie
//! - `GET /api/users` - list users (admin only)
//! - `GET|PUT|DELETE /api/users/{id}` - single user (owner or admin)
//! - anything else - JSON 404

/// Main router creation
pub mod router;

pub use router::create_router;
