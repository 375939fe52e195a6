//! Persistence for user identity records.
//!
//! [`UserStore`] is the seam between the gateway and the database. It has two
//! implementations: [`PgUserStore`] for PostgreSQL and [`MemoryUserStore`] for
//! tests and store-less runs.

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;

use crate::error::StoreError;

pub use memory::MemoryUserStore;
pub use models::{UserProfile, UserRecord};
pub use postgres::PgUserStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a record by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Insert one record and return the number of rows created. A taken
    /// username is reported as [`StoreError::DuplicateUser`].
    async fn insert(&self, record: &UserRecord) -> Result<u64, StoreError>;
}
