/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Persisted key-value session store
//!
//! The API layer only ever touches one key, [`AUTH_TOKEN_KEY`]: it reads it
//! before every request and removes it when the service rejects the session.
//! Writing the token after a successful login is up to the caller.

use crate::constants::AUTH_TOKEN_KEY;
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Key-value storage that outlives a single client
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reads the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Stores `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Deletes `key`; deleting a missing key is not an error
    async fn remove(&self, key: &str) -> Result<(), AppError>;

    /// Reads the session token, treating an empty value as absent
    async fn auth_token(&self) -> Result<Option<String>, AppError> {
        Ok(self
            .get(AUTH_TOKEN_KEY)
            .await?
            .filter(|token| !token.is_empty()))
    }

    /// Whether a session token is currently stored
    async fn is_authenticated(&self) -> bool {
        matches!(self.auth_token().await, Ok(Some(_)))
    }
}

/// Session store that lives as long as the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding a session token
    pub fn with_token(token: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(AUTH_TOKEN_KEY.to_string(), token.into());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Session store persisted as a JSON object in a file
///
/// The file is read on first use and rewritten after every change. A missing,
/// blank or corrupt file is an empty store; a corrupt one is replaced on the
/// next change.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: Mutex<Option<BTreeMap<String, String>>>,
}

impl FileSessionStore {
    /// Creates a store backed by `path`; nothing is read until first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(None),
        }
    }

    /// File backing this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, AppError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => match serde_json::from_str(&text) {
                Ok(entries) => Ok(entries),
                Err(e) => {
                    warn!(
                        "Session file {} is unreadable ({}), starting empty",
                        self.path.display(),
                        e
                    );
                    Ok(BTreeMap::new())
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Session file {} not found, starting empty", self.path.display());
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let text = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut guard = self.entries.lock().await;
        if guard.is_none() {
            *guard = Some(self.load().await?);
        }
        Ok(guard.as_ref().and_then(|entries| entries.get(key).cloned()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut guard = self.entries.lock().await;
        let mut entries = match guard.take() {
            Some(entries) => entries,
            None => self.load().await?,
        };
        entries.insert(key.to_string(), value.to_string());
        let persisted = self.persist(&entries).await;
        *guard = Some(entries);
        persisted
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut guard = self.entries.lock().await;
        let mut entries = match guard.take() {
            Some(entries) => entries,
            None => self.load().await?,
        };
        let persisted = if entries.remove(key).is_some() {
            self.persist(&entries).await
        } else {
            Ok(())
        };
        *guard = Some(entries);
        persisted
    }
}
