//! Pledgewall Core - Pledge validation, storage, and statistics.
//!
//! This crate provides the data side of the climate pledge wall: the fixed
//! catalogs, form validators, the pledge store and read-side queries.

pub mod catalog;
pub mod constraint;
pub mod error;
pub mod query;
pub mod seed;
pub mod storage;

pub use catalog::{
    stars_for, Commitment, CommitmentTheme, Pledge, PledgeDraft, PledgeId, ProfileType,
    PublicPledge, COMMITMENT_THEMES, INDIAN_STATES,
};
pub use constraint::{FieldCheck, FormField, FormValidation, PledgeForm};
pub use error::{Error, ValidationError};
pub use query::{PledgeFilter, PledgeStats, Pagination, WallPage, WallQuery};
pub use seed::SampleGenerator;
pub use storage::{
    KeyValueStore, MemoryStore, PledgeStore, SledStore, StorageConfig, StoreConfig,
};
