pub mod auth;
pub mod config;
pub mod db;
pub mod error;

use std::sync::Arc;

pub use error::{AppError, StoreError};
pub type Result<T> = std::result::Result<T, AppError>;
pub use crate::config::Settings;

pub use auth::{CredentialGateway, PasswordHasher};
pub use db::{MemoryUserStore, PgUserStore, UserProfile, UserRecord, UserStore};

/// Application state shared across all components
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub gateway: Arc<CredentialGateway<PgUserStore>>,
}

impl AppState {
    pub async fn new(config: Settings) -> Result<Self> {
        let store = PgUserStore::connect(&config.database).await?;
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Settings, store: PgUserStore) -> Self {
        let hasher = PasswordHasher::new(config.hashing.iterations);
        Self {
            config: Arc::new(config),
            gateway: Arc::new(CredentialGateway::new(store, hasher)),
        }
    }

    pub async fn migrate(&self) -> Result<()> {
        self.gateway.store().migrate().await?;
        Ok(())
    }

    pub async fn shutdown(&self) {
        self.gateway.store().close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_settings() -> Settings {
        let mut config = Settings::new_for_test().expect("Failed to load test config");
        // nothing listens on port 1
        config.database.port = 1;
        config.database.acquire_timeout_secs = 1;
        config
    }

    #[tokio::test]
    async fn test_app_state_creation_fails_without_store() {
        let state = AppState::new(unreachable_settings()).await;

        assert!(state.is_err());
        if let Err(e) = state {
            assert!(matches!(e, AppError::Store(StoreError::Unavailable(_))));
        }
    }

    #[tokio::test]
    async fn test_app_state_clone() {
        let config = unreachable_settings();
        let store = PgUserStore::connect_lazy(&config.database);
        let state = AppState::with_store(config, store);

        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.config, &cloned.config));
        assert!(Arc::ptr_eq(&state.gateway, &cloned.gateway));
        assert_eq!(state.config.hashing.iterations, 1000);
    }
}
