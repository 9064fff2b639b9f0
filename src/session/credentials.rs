use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::storage::KeyValueStorage;
use crate::error::ClientError;

pub const TOKENS_KEY: &str = "tokens";

/// Opaque bearer tokens issued by the primary backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    #[serde(default)]
    pub access: String,
    #[serde(default)]
    pub refresh: String,
}

impl CredentialPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}

/// Credential pair persisted JSON-encoded under [`TOKENS_KEY`].
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Returns the stored pair. Missing, unreadable or corrupted entries
    /// all read as `None`; a corrupted entry is dropped from storage.
    pub fn load(&self) -> Option<CredentialPair> {
        let raw = match self.storage.get(TOKENS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored credentials");
                return None;
            }
        };

        match serde_json::from_str::<Option<CredentialPair>>(&raw) {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!(error = %e, "Stored credentials are corrupted, discarding");
                if let Err(e) = self.storage.remove(TOKENS_KEY) {
                    tracing::warn!(error = %e, "Failed to discard corrupted credentials");
                }
                None
            }
        }
    }

    pub fn save(&self, pair: &CredentialPair) -> Result<(), ClientError> {
        let encoded = serde_json::to_string(pair).map_err(|e| ClientError::Storage(e.to_string()))?;
        self.storage.set(TOKENS_KEY, &encoded)
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        self.storage.remove(TOKENS_KEY)
    }

    /// Non-empty access token, if any. Requests without one go out
    /// unauthenticated.
    pub fn access_token(&self) -> Option<String> {
        self.load()
            .map(|pair| pair.access)
            .filter(|access| !access.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.load()
            .map(|pair| pair.refresh)
            .filter(|refresh| !refresh.is_empty())
    }
}
