/**
 * Server Configuration
 *
 * Loads process-wide configuration from the environment once at
 * startup. Everything downstream (token service, cookie settings,
 * store) is constructed from the resulting value; nothing reads the
 * environment after boot.
 *
 * # Variables
 *
 * - `DATABASE_URL`  - required; the server refuses to start without a
 *   store to serve from
 * - `JWT_SECRET`    - optional; absent falls back to a logged
 *   development key
 * - `JWT_EXPIRES_IN`- token lifetime in seconds, default 3600
 * - `APP_ENV`       - "production" turns on Secure cookies
 * - `SERVER_PORT`   - listen port, default 3000
 */

use sqlx::PgPool;
use thiserror::Error;

use crate::auth::tokens::DEFAULT_TOKEN_LIFETIME_SECS;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,
}

/// Failures that can abort server startup.
#[derive(Debug, Error)]
pub enum BootError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("database connection failed: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Process-wide configuration, read once and treated as read-only.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    /// Absent means the development fallback key will be used
    pub jwt_secret: Option<String>,
    pub token_lifetime_secs: i64,
    /// Production hardens cookie attributes
    pub production: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|raw| raw.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let jwt_secret = std::env::var("JWT_SECRET").ok();

        let token_lifetime_secs = match std::env::var("JWT_EXPIRES_IN") {
            Ok(raw) => match raw.parse::<i64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        "JWT_EXPIRES_IN is not a positive integer; using the default lifetime"
                    );
                    DEFAULT_TOKEN_LIFETIME_SECS
                }
            },
            Err(_) => DEFAULT_TOKEN_LIFETIME_SECS,
        };

        let production = std::env::var("APP_ENV")
            .map(|env| env == "production")
            .unwrap_or(false);

        Ok(Self {
            port,
            database_url,
            jwt_secret,
            token_lifetime_secs,
            production,
        })
    }
}

/// Connect to the database and bring the schema up to date.
pub async fn connect_database(database_url: &str) -> Result<PgPool, BootError> {
    tracing::info!("connecting to database");
    let pool = PgPool::connect(database_url).await?;

    tracing::info!("running database migrations");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("database ready");

    Ok(pool)
}
