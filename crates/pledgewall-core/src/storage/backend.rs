//! Key-value backends the pledge store persists through.

use std::collections::HashMap;

use parking_lot::Mutex;
use sled::{Db, Tree};

use super::StorageConfig;
use crate::error::Error;

/// Tree name for stored values.
const VALUES_TREE: &str = "values";

/// A string key-value store.
///
/// Values are replaced wholesale; a `set` either lands completely or not at all.
pub trait KeyValueStore {
    /// Read the value under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), Error>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        (**self).remove(key)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    values: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory backend.
///
/// Read and write failures can be switched on to exercise degraded paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail.
    pub fn fail_reads(&self, fail: bool) {
        self.state.lock().fail_reads = fail;
    }

    /// Make every subsequent write or remove fail.
    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }

    /// Peek at a stored value, bypassing injected failures.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.state.lock().values.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let state = self.state.lock();
        if state.fail_reads {
            return Err(Error::StorageUnavailable("memory store reads disabled".into()));
        }
        Ok(state.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(Error::StorageWrite("memory store writes disabled".into()));
        }
        state.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(Error::StorageWrite("memory store writes disabled".into()));
        }
        state.values.remove(key);
        Ok(())
    }
}

/// On-disk backend wrapping sled.
pub struct SledStore {
    /// The underlying sled database.
    db: Db,

    /// Tree holding the values.
    values: Tree,

    flush_on_write: bool,
}

impl SledStore {
    /// Open or create a store with the given configuration.
    pub fn open(config: StorageConfig) -> Result<Self, Error> {
        let db = config.to_sled_config().open()?;
        let values = db.open_tree(VALUES_TREE)?;

        Ok(Self {
            db,
            values,
            flush_on_write: config.flush_on_write,
        })
    }

    /// Check if the database was recovered from a previous crash.
    pub fn was_recovered(&self) -> bool {
        self.db.was_recovered()
    }

    /// Flush all pending writes to disk.
    pub fn flush(&self) -> Result<(), Error> {
        self.db.flush()?;
        Ok(())
    }

    fn maybe_flush(&self) -> Result<(), Error> {
        if self.flush_on_write {
            self.values.flush()?;
        }
        Ok(())
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        match self.values.get(key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|e| Error::Deserialization(e.to_string())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.values.insert(key.as_bytes(), value.as_bytes())?;
        self.maybe_flush()
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.values.remove(key.as_bytes())?;
        self.maybe_flush()
    }
}
