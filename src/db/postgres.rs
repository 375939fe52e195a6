use async_trait::async_trait;
use sqlx::migrate::MigrateError;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::db::models::UserRecord;
use crate::db::UserStore;
use crate::error::StoreError;

const SELECT_BY_USERNAME: &str = r#"
    SELECT id, username, email, password_hash, salt, hash_iterations, created_at
    FROM users
    WHERE username = $1
"#;

const INSERT_USER: &str = r#"
    INSERT INTO users (id, username, email, password_hash, salt, hash_iterations, created_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
"#;

/// PostgreSQL-backed user store.
///
/// Each call checks out one pooled connection and holds it only for the
/// duration of that call; the guard returns it to the pool on every exit
/// path. Checkout is bounded by `acquire_timeout`.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = pool_options(config)
            .connect_with(connect_options(config))
            .await?;

        info!(
            "Connected to {}:{}/{} as {}",
            config.host, config.port, config.name, config.user
        );
        Ok(Self { pool })
    }

    /// Build the pool without opening a connection; the first query connects.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let pool = pool_options(config).connect_lazy_with(connect_options(config));
        Self { pool }
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.name)
        .username(&config.user);

    match &config.password {
        Some(password) => options.password(password),
        None => options,
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
}

fn map_insert_error(err: sqlx::Error, username: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::duplicate(username)
        }
        _ => err.into(),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let record = sqlx::query_as::<_, UserRecord>(SELECT_BY_USERNAME)
            .bind(username)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(record)
    }

    async fn insert(&self, record: &UserRecord) -> Result<u64, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(INSERT_USER)
            .bind(record.id)
            .bind(&record.username)
            .bind(&record.email)
            .bind(&record.password_hash)
            .bind(&record.salt)
            .bind(record.hash_iterations)
            .bind(record.created_at)
            .execute(&mut *conn)
            .await
            .map_err(|err| map_insert_error(err, &record.username))?;

        Ok(result.rows_affected())
    }
}
