//! Read-side queries over the pledge collection.
//!
//! Everything here is pure: callers pass the collection from
//! [`PledgeStore::list`](crate::storage::PledgeStore::list).

mod filter;
mod stats;
mod wall;

pub use filter::PledgeFilter;
pub use stats::{PledgeStats, DEFAULT_TARGET_PLEDGES};
pub use wall::{describe_age, unique_states, Pagination, WallPage, WallQuery, DEFAULT_PER_PAGE};
