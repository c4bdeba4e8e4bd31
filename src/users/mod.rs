//! Users Module
//!
//! User records end to end: the domain model, the persistence seam and
//! its PostgreSQL implementation, and the CRUD handlers.
//!
//! # Module Structure
//!
//! ```
//! users/
//! ├── mod.rs      - Module exports
//! ├── model.rs    - Role, User, PublicUser, patch types
//! ├── store.rs    - UserStore trait and PgUserStore
//! └── handlers.rs - /api/users HTTP handlers
//! ```

/// Domain types for user records
pub mod model;

/// Persistence trait and PostgreSQL implementation
pub mod store;

/// HTTP handlers for user CRUD
pub mod handlers;

pub use model::{NewUser, PublicUser, Role, User, UserPatch};
pub use store::{PgUserStore, StoreError, UserStore};
