//! Middleware Module
//!
//! Request-processing layers that run ahead of the handlers.
//!
//! - **`edge`** - rate limiting, bot detection, email screening; the
//!   outermost gate, applied per route group with its own policy
//! - **`auth`** - session verification and the role/ownership policy
//!   gates, applied to protected routes

pub mod auth;
pub mod edge;

pub use auth::{authenticate, ensure_owner_or_admin, require_admin, CurrentUser, Principal};
pub use edge::{edge_protect, EdgeGuard, EdgePolicies, EdgePolicy};
