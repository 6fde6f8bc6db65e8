//! Storage configuration.

use std::path::PathBuf;

/// Default key the pledge collection is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "climate_pledges";

/// Default number of sample pledges written into an empty store.
pub const DEFAULT_SEED_COUNT: usize = 75;

/// Default look-back window for sample pledge timestamps.
pub const DEFAULT_SEED_WINDOW_DAYS: u32 = 90;

/// Configuration for the sled-backed key-value store.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path to the database directory.
    pub path: PathBuf,

    /// Page cache capacity in bytes.
    pub cache_capacity: u64,

    /// Flush interval in milliseconds. None disables background flushing.
    pub flush_every_ms: Option<u64>,

    /// Flush synchronously after every write.
    pub flush_on_write: bool,

    /// Enable zstd compression.
    pub compression: bool,

    /// Temporary database (deleted on drop).
    pub temporary: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./pledgewall_data"),
            cache_capacity: 16 * 1024 * 1024, // 16MB
            flush_every_ms: Some(1000),
            flush_on_write: true,
            compression: true,
            temporary: false,
        }
    }
}

impl StorageConfig {
    /// Create a new configuration with the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Create a temporary configuration for testing.
    pub fn temporary() -> Self {
        Self {
            path: PathBuf::from(""),
            temporary: true,
            ..Default::default()
        }
    }

    /// Convert to sled configuration.
    pub(crate) fn to_sled_config(&self) -> sled::Config {
        let mut config = sled::Config::new()
            .cache_capacity(self.cache_capacity)
            .use_compression(self.compression)
            .flush_every_ms(self.flush_every_ms);

        if self.temporary {
            config = config.temporary(true);
        } else {
            config = config.path(&self.path);
        }

        config
    }
}

/// Behavior of the pledge store itself.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Key the serialized collection lives under.
    pub storage_key: String,

    /// Number of sample pledges written by `initialize`.
    pub seed_count: usize,

    /// Sample timestamps fall within this many days before now.
    pub seed_window_days: u32,

    /// Fixed RNG seed for sample data. None draws from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_count: DEFAULT_SEED_COUNT,
            seed_window_days: DEFAULT_SEED_WINDOW_DAYS,
            rng_seed: None,
        }
    }
}

impl StoreConfig {
    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the number of sample pledges.
    pub fn with_seed_count(mut self, count: usize) -> Self {
        self.seed_count = count;
        self
    }

    /// Set the sample timestamp window.
    pub fn with_seed_window_days(mut self, days: u32) -> Self {
        self.seed_window_days = days;
        self
    }

    /// Make sample data reproducible.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}
