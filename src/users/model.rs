/**
 * User Model
 *
 * Domain types for user records. The stored `User` carries the password
 * hash and never crosses the HTTP boundary; `PublicUser` is the shape
 * responses use.
 */

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User role, stored lowercase in the database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Parse a stored or submitted role string. Anything outside the
    /// known set is rejected rather than coerced.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user row as the store holds it.
#[derive(Debug, Clone)]
pub struct User {
    /// Surrogate key, assigned by the store at creation
    pub id: i64,
    pub name: String,
    /// Globally unique, compared exactly as stored
    pub email: String,
    /// bcrypt digest, never returned to clients
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Drop the password hash for anything that leaves the server.
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Client-safe projection of a user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated signup input, password still in the clear. Produced by
/// request validation and consumed by the auth service, which hashes
/// the password before anything is persisted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Insert record handed to the store; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Validated partial update. Each field is `Some` only when the client
/// asked to change it; an all-`None` patch is rejected during request
/// validation, before the store is involved.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.role.is_none()
    }
}

/// Store-level counterpart of `UserPatch`: the plaintext password has
/// been replaced with its hash.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}
