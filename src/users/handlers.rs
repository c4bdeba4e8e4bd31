/**
 * User CRUD Handlers
 *
 * HTTP handlers for the /api/users routes. All of them run behind the
 * authentication middleware; the list endpoint additionally sits
 * behind the admin-only route layer, and the by-id endpoints enforce
 * the owner-or-admin policy themselves.
 *
 * # Update Authorization
 *
 * Checks run in a fixed order: payload validation (400), existence
 * (404), role-change gate (403, admin only), ownership gate (403).
 * A non-admin owner may change their own name, email, and password,
 * but never their own role.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::error::ApiError;
use crate::middleware::auth::{ensure_owner_or_admin, CurrentUser};
use crate::server::state::AppState;
use crate::users::model::{PublicUser, UserChanges, UserPatch};
use crate::users::store::UserStore;

/// Update request body. Every field is optional; role is validated
/// against the known set rather than deserialized blindly.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl UpdateUserRequest {
    /// Validate present fields and reject an all-absent patch.
    fn validate(self) -> Result<UserPatch, ApiError> {
        use crate::auth::handlers::types::{
            validate_email, validate_name, validate_password, validate_role,
        };

        let mut details = Vec::new();

        if self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.role.is_none()
        {
            return Err(ApiError::invalid_field(
                "body",
                "Request body must contain at least one field to update",
            ));
        }

        if let Some(name) = &self.name {
            if let Some(err) = validate_name(name) {
                details.push(err);
            }
        }
        if let Some(email) = &self.email {
            if let Some(err) = validate_email(email) {
                details.push(err);
            }
        }
        if let Some(password) = &self.password {
            if let Some(err) = validate_password(password) {
                details.push(err);
            }
        }
        let role = match self.role.as_deref() {
            None => None,
            Some(raw) => match validate_role(raw) {
                Ok(role) => Some(role),
                Err(err) => {
                    details.push(err);
                    None
                }
            },
        };

        if !details.is_empty() {
            return Err(ApiError::validation(details));
        }

        Ok(UserPatch {
            name: self.name.map(|name| name.trim().to_string()),
            email: self.email,
            password: self.password,
            role,
        })
    }
}

/// GET /api/users - admin only (enforced by the route layer).
pub async fn fetch_all_users(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    tracing::info!(requested_by = %principal.email, "fetching all users");

    let users: Vec<PublicUser> = state
        .store
        .list_all()
        .await?
        .into_iter()
        .map(|user| user.into_public())
        .collect();

    Ok(Json(serde_json::json!({
        "message": "All users fetched successfully",
        "users": users,
        "count": users.len(),
    })))
}

/// GET /api/users/{id} - owner or admin.
pub async fn fetch_user_by_id(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    ensure_owner_or_admin(&principal, id)?;

    tracing::info!(id, requested_by = %principal.email, "fetching user");

    let user = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(serde_json::json!({
        "message": "User fetched successfully",
        "user": user.into_public(),
    })))
}

/// PUT /api/users/{id} - owner or admin; role changes admin only.
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let patch = request.validate()?;

    if state.store.find_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound("User"));
    }

    // Role changes are an admin-only operation, even on one's own
    // account.
    if patch.role.is_some() && !principal.is_admin() {
        tracing::warn!(id, requested_by = %principal.email, "role change refused for non-admin");
        return Err(ApiError::Forbidden);
    }

    ensure_owner_or_admin(&principal, id)?;

    if let Some(new_role) = patch.role {
        tracing::info!(
            id,
            admin = %principal.email,
            role = %new_role,
            "admin changing user role"
        );
    }

    let password_hash = match &patch.password {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };
    let changes = UserChanges {
        name: patch.name,
        email: patch.email,
        password_hash,
        role: patch.role,
    };

    let updated = state
        .store
        .update_by_id(id, changes)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    tracing::info!(id, updated_by = %principal.email, "user updated successfully");

    Ok(Json(serde_json::json!({
        "message": "User updated successfully",
        "user": updated.into_public(),
    })))
}

/// DELETE /api/users/{id} - owner or admin.
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    ensure_owner_or_admin(&principal, id)?;

    tracing::info!(id, requested_by = %principal.email, "deleting user");

    let deleted = state
        .store
        .delete_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    tracing::info!(id, email = %deleted.email, "user deleted successfully");

    Ok(Json(serde_json::json!({
        "message": "User deleted successfully",
        "user": deleted.into_public(),
    })))
}
