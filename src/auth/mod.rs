//! Authentication Module
//!
//! Credential hashing, session tokens, cookie transport, and the
//! business rules for signing users up and in.
//!
//! # Module Structure
//!
//! ```
//! auth/
//! ├── mod.rs       - Module exports
//! ├── password.rs  - bcrypt hashing and verification
//! ├── tokens.rs    - JWT issuance and verification
//! ├── cookies.rs   - Session cookie transport
//! ├── service.rs   - Signup and sign-in business rules
//! └── handlers/    - HTTP handlers for the auth endpoints
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Sign-up**: validate → create account (hash, insert) → issue
//!    token → set session cookie → 201
//! 2. **Sign-in**: validate → verify credentials → issue token → set
//!    session cookie → 200
//! 3. **Sign-out**: expire the session cookie → 200
//!
//! Protected routes go through `middleware::auth`, which reads the
//! cookie back, verifies the token, and attaches the principal.
//!
//! # Security
//!
//! - Passwords are bcrypt-hashed before storage and never returned
//! - Tokens are stateless JWTs with a one-hour default lifetime
//! - Sign-in failures never reveal whether the email exists

/// bcrypt hashing and verification
pub mod password;

/// JWT issuance and verification
pub mod tokens;

/// Session cookie transport
pub mod cookies;

/// Signup and sign-in business rules
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use cookies::{SessionSettings, SESSION_COOKIE};
pub use handlers::{signin, signout, signup};
pub use tokens::{Claims, TokenService, DEFAULT_TOKEN_LIFETIME_SECS};
