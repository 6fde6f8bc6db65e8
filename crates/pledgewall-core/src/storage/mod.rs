//! Storage layer for the pledge wall.
//!
//! The whole pledge collection is serialized into one versioned JSON
//! document and stored under a single key of a [`KeyValueStore`].

mod backend;
mod config;
mod document;
mod engine;

pub use backend::{KeyValueStore, MemoryStore, SledStore};
pub use config::{
    StorageConfig, StoreConfig, DEFAULT_SEED_COUNT, DEFAULT_SEED_WINDOW_DAYS, DEFAULT_STORAGE_KEY,
};
pub use document::{PledgeDocument, DOCUMENT_VERSION, LEGACY_VERSION};
pub use engine::PledgeStore;
