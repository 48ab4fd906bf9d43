//! Key/value stores for the score ledger

use rocksdb::{Options, DB};
use std::collections::HashMap;
use std::path::Path;

use crate::config::StorageConfig;
use crate::errors::StorageError;

/// Minimal string store the ledger persists through
pub trait ScoreStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// RocksDB-backed store
pub struct RocksScoreStore {
    db: DB,
}

impl RocksScoreStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DB::open(&opts, path.as_ref())
            .map_err(|e| StorageError::DatabaseOpenFailed(e.to_string()))?;
        Ok(Self { db })
    }

    pub fn new_with_config(config: &StorageConfig) -> Result<Self, StorageError> {
        Self::new(&config.data_directory)
    }
}

impl ScoreStore for RocksScoreStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let bytes = self
            .db
            .get(key.as_bytes())
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        // Invalid UTF-8 is passed through lossily so the ledger treats it as corrupt
        Ok(bytes.map(|b| String::from_utf8_lossy(&b).into_owned()))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db
            .put(key.as_bytes(), value.as_bytes())
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }
}

/// Volatile store, used when persistence is off or unavailable
#[derive(Debug, Default, Clone)]
pub struct MemoryScoreStore {
    values: HashMap<String, String>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl ScoreStore for MemoryScoreStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Open the configured store, falling back to memory when the database
/// cannot be opened
pub fn open_store(config: &StorageConfig) -> Box<dyn ScoreStore> {
    if config.in_memory {
        return Box::new(MemoryScoreStore::new());
    }

    match RocksScoreStore::new_with_config(config) {
        Ok(store) => {
            tracing::debug!(path = %config.data_directory, "Opened score store");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!(
                path = %config.data_directory,
                error = %e,
                "Score store unavailable, keeping score in memory"
            );
            Box::new(MemoryScoreStore::new())
        }
    }
}
