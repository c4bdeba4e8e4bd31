/**
 * User Store
 *
 * Persistence interface for user records and its PostgreSQL
 * implementation. The trait is the seam the auth service and the CRUD
 * handlers program against; `PgUserStore` is what production wires in.
 *
 * # Uniqueness
 *
 * The store owns the email uniqueness invariant. A violation of the
 * unique constraint surfaces as `StoreError::DuplicateEmail` so the
 * auth service can collapse the insert-time race into the same error
 * the pre-check produces.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;

use crate::users::model::{NewUserRecord, Role, User, UserChanges};

/// Postgres error code for a unique-constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Failures the store can report.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The email column's unique constraint was violated.
    #[error("a user with this email already exists")]
    DuplicateEmail,

    /// A stored role value is outside the known set.
    #[error("corrupt user record: unknown role {0:?}")]
    CorruptRole(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence operations for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn insert(&self, record: NewUserRecord) -> Result<User, StoreError>;

    /// Apply the provided changes to one user. Absent fields keep their
    /// stored value; `updated_at` refreshes on every call. Returns
    /// `None` when no row has that id.
    async fn update_by_id(&self, id: i64, changes: UserChanges)
        -> Result<Option<User>, StoreError>;

    /// Returns the deleted record, or `None` when no row has that id.
    async fn delete_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn list_all(&self) -> Result<Vec<User>, StoreError>;
}

/// Raw row shape; `role` decodes as text and is validated on the way
/// into the domain type.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, StoreError> {
        let role = Role::parse(&self.role).ok_or_else(|| StoreError::CorruptRole(self.role.clone()))?;
        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn map_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::DuplicateEmail;
        }
    }
    StoreError::Database(err)
}

/// PostgreSQL-backed user store.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn insert(&self, record: NewUserRecord) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(record.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        row.into_user()
    }

    async fn update_by_id(
        &self,
        id: i64,
        changes: UserChanges,
    ) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                role = COALESCE($5, role),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.password_hash.as_deref())
        .bind(changes.role.map(Role::as_str))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_insert_error)?;

        row.map(UserRow::into_user).transpose()
    }

    async fn delete_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, name, email, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, role, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }
}
