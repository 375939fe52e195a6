use thiserror::Error;

/// Failures surfaced by the credential gateway.
///
/// "Wrong password" is not an error for [`authenticate`](crate::CredentialGateway::authenticate);
/// it only becomes [`StoreError::AuthenticationFailed`] through
/// [`login`](crate::CredentialGateway::login).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Username already registered: {username}")]
    DuplicateUser { username: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Authentication failed")]
    AuthenticationFailed,
}

impl StoreError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        StoreError::InvalidInput(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        StoreError::Unavailable(msg.into())
    }

    pub fn duplicate(username: impl Into<String>) -> Self {
        StoreError::DuplicateUser {
            username: username.into(),
        }
    }

    /// Only store-level failures are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

// Uniqueness violations are mapped by the insert path itself, which knows the username.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                StoreError::Unavailable("timed out acquiring a database connection".to_string())
            }
            _ => StoreError::Unavailable(err.to_string()),
        }
    }
}

/// Process-level errors: startup, configuration and migrations.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::MigrationError(err.to_string())
    }
}
