//! API Error Module
//!
//! Defines the error taxonomy for the whole API and its HTTP mapping.
//!
//! # Module Structure
//!
//! ```
//! error/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - Error type definitions and status mapping
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! Handlers return `Result<_, ApiError>`; the `IntoResponse` impl turns
//! each variant into the right status code and a minimal JSON body, and
//! logs the underlying cause server-side.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{ApiError, FieldError};
