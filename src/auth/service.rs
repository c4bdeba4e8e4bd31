/**
 * Auth Service
 *
 * Business rules for account creation and credential verification,
 * orchestrating the password hasher and the user store.
 *
 * # Security
 *
 * - `create_user` pre-checks the email so callers get a domain error
 *   instead of a raw constraint violation; the store's unique
 *   constraint remains the backstop for concurrent signups and is
 *   collapsed into the same error.
 * - `authenticate_user` reports one error for "no such account" and
 *   "wrong password". The log distinguishes them; the client never can.
 */

use crate::auth::password::{hash_password, verify_password};
use crate::error::ApiError;
use crate::users::model::{NewUser, NewUserRecord, PublicUser};
use crate::users::store::UserStore;

/// Create an account and return its client-safe projection.
pub async fn create_user(store: &dyn UserStore, new_user: NewUser) -> Result<PublicUser, ApiError> {
    if store.find_by_email(&new_user.email).await?.is_some() {
        tracing::warn!(email = %new_user.email, "signup rejected: email already registered");
        return Err(ApiError::EmailAlreadyExists);
    }

    let password_hash = hash_password(&new_user.password)?;

    let record = NewUserRecord {
        name: new_user.name,
        email: new_user.email,
        password_hash,
        role: new_user.role,
    };

    // Two signups can both pass the pre-check; the unique constraint
    // decides the race and maps back to EmailAlreadyExists.
    let user = store.insert(record).await?;

    tracing::info!(email = %user.email, id = user.id, role = %user.role, "user created");
    Ok(user.into_public())
}

/// Verify credentials and return the account's client-safe projection.
pub async fn authenticate_user(
    store: &dyn UserStore,
    email: &str,
    password: &str,
) -> Result<PublicUser, ApiError> {
    let user = match store.find_by_email(email).await? {
        Some(user) => user,
        None => {
            tracing::warn!(email, "sign-in rejected: unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(password, &user.password_hash)? {
        tracing::warn!(email, "sign-in rejected: wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    tracing::info!(email, id = user.id, "user authenticated");
    Ok(user.into_public())
}
