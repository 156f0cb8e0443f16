//! In-memory [`UserStore`].

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use chrono::Utc;

use crate::auth::secret_hash::hash_password;
use crate::prelude::*;

use super::{CredentialRecord, StorageError, UserStore};

#[derive(Debug)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, CredentialRecord>>,
    next_id: AtomicI64,
    closed: AtomicBool,
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            closed: AtomicBool::new(false),
        }
    }
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record with an already hashed password.
    pub fn insert(
        &self,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> std::result::Result<CredentialRecord, StorageError> {
        let username = username.into();
        let mut users = self.users.write().map_err(|_| StorageError::Poisoned)?;
        if users.contains_key(&username) {
            return Err(StorageError::UsernameTaken);
        }

        let record = CredentialRecord {
            user_id: self.next_id.fetch_add(1, Ordering::Relaxed),
            username: username.clone(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        };
        users.insert(username, record.clone());
        Ok(record)
    }

    /// Hashes `password` and stores the record.
    pub fn insert_with_password(
        &self,
        username: impl Into<String>,
        password: &str,
    ) -> Result<CredentialRecord> {
        let hash = hash_password(password)?;
        Ok(self.insert(username, hash)?)
    }

    fn ensure_open(&self) -> std::result::Result<(), StorageError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StorageError::Closed);
        }
        Ok(())
    }
}

impl UserStore for MemoryUserStore {
    fn find_by_username(&self, username: &str) -> std::result::Result<CredentialRecord, StorageError> {
        self.ensure_open()?;
        self.users
            .read()
            .map_err(|_| StorageError::Poisoned)?
            .get(username)
            .cloned()
            .ok_or(StorageError::UserNotFound)
    }

    fn ping(&self) -> std::result::Result<(), StorageError> {
        self.ensure_open()
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
