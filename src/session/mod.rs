mod credentials;
mod storage;

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::config::Config;

pub use credentials::{CredentialPair, CredentialStore, TOKENS_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Client-side state shared by every dispatch flow: the stored credential
/// pair and the last known position.
///
/// Locks are only taken for a synchronous snapshot, never across an await.
pub struct SessionContext {
    credentials: CredentialStore,
    last_coordinate: RwLock<Option<Coordinate>>,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            credentials: CredentialStore::new(storage),
            last_coordinate: RwLock::new(None),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Session whose credentials persist in the file at `TOKEN_STORE_PATH`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(FileStorage::new(&config.token_store_path)))
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn last_coordinate(&self) -> Option<Coordinate> {
        *self.last_coordinate.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_last_coordinate(&self, coordinate: Coordinate) {
        *self.last_coordinate.write().unwrap_or_else(|e| e.into_inner()) = Some(coordinate);
    }
}
