//! Authentication Handlers
//!
//! HTTP handlers for the authentication endpoints.
//!
//! # Module Structure
//!
//! ```
//! handlers/
//! ├── mod.rs      - Handler exports
//! ├── types.rs    - Request/response types and validation
//! ├── signup.rs   - POST /api/auth/sign-up
//! ├── signin.rs   - POST /api/auth/sign-in
//! └── signout.rs  - POST /api/auth/sign-out
//! ```

/// Request and response types
pub mod types;

/// Sign-up handler
pub mod signup;

/// Sign-in handler
pub mod signin;

/// Sign-out handler
pub mod signout;

pub use signin::signin;
pub use signout::signout;
pub use signup::signup;
pub use types::{AuthResponse, SigninRequest, SignupRequest};
