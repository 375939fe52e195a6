use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::db::models::UserRecord;
use crate::db::UserStore;
use crate::error::StoreError;

/// In-process user store keyed by username. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, username: &str) -> Option<UserRecord> {
        self.users.read().await.get(username).cloned()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.record(username).await)
    }

    async fn insert(&self, record: &UserRecord) -> Result<u64, StoreError> {
        let mut users = self.users.write().await;
        match users.entry(record.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::duplicate(&record.username)),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(1)
            }
        }
    }
}
