//! Acquisitions API
//!
//! A small HTTP backend providing user sign-up/sign-in/sign-out and
//! CRUD on user records, backed by PostgreSQL, with JWT session
//! cookies, role-based access control, and an edge-protection layer
//! (rate limiting, bot detection, email screening).
//!
//! # Architecture
//!
//! ```text
//! request → edge protection → authentication → policy gates → handler
//!                                                 │
//!                                    auth service / user store
//! ```
//!
//! - **`auth`** - password hashing, session tokens, cookie transport,
//!   signup/sign-in business rules, auth endpoint handlers
//! - **`users`** - user model, the `UserStore` persistence seam and its
//!   PostgreSQL implementation, CRUD handlers
//! - **`middleware`** - edge protection and access control
//! - **`routes`** - router assembly and the informational endpoints
//! - **`server`** - configuration, shared state, app initialization
//! - **`error`** - the API error taxonomy and its HTTP mapping
//!
//! # Security Model
//!
//! Sessions are stateless JWTs carried in an HTTP-only cookie named
//! `token`; there is no server-side revocation, so lifetimes are short
//! (one hour by default). Passwords are bcrypt-hashed. Authorization
//! is role-based: listing users requires the admin role, and the by-id
//! routes permit the record's owner or any admin, with role changes
//! restricted to admins in every case.

/// Authentication: hashing, tokens, cookies, handlers
pub mod auth;

/// API error taxonomy
pub mod error;

/// Edge protection and access control middleware
pub mod middleware;

/// Router assembly
pub mod routes;

/// Configuration, state, and app initialization
pub mod server;

/// User model, store, and CRUD handlers
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ApiError;
pub use routes::create_router;
pub use server::{create_app, AppState};
