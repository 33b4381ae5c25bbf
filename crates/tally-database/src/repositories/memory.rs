//! In-memory credential store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use tally_core::error::AppError;
use tally_core::result::AppResult;
use tally_core::traits::{AccountStore, CredentialStore};
use tally_core::types::{Credential, normalize_email};

/// Credential store held in a concurrent map, keyed by normalized email.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credentials: DashMap<String, Credential>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the credential for `email`.
    pub fn insert(&self, email: &str, password_hash: impl Into<String>) {
        let credential = Credential::new(email, password_hash);
        debug!(email = %credential.email, "Credential stored");
        self.credentials.insert(credential.email.clone(), credential);
    }

    /// Remove the credential for `email`. Returns `true` if one existed.
    pub fn remove(&self, email: &str) -> bool {
        self.credentials.remove(&normalize_email(email)).is_some()
    }

    /// Number of stored credentials.
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Credential>> {
        Ok(self
            .credentials
            .get(&normalize_email(email))
            .map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl AccountStore for MemoryCredentialStore {
    async fn create(&self, email: &str, password_hash: &str) -> AppResult<Credential> {
        let credential = Credential::new(email, password_hash);
        match self.credentials.entry(credential.email.clone()) {
            Entry::Occupied(_) => Err(AppError::validation("Email already in use")),
            Entry::Vacant(slot) => {
                slot.insert(credential.clone());
                debug!(email = %credential.email, "Account created");
                Ok(credential)
            }
        }
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> AppResult<bool> {
        match self.credentials.get_mut(&normalize_email(email)) {
            Some(mut entry) => {
                entry.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
