//! Fixed catalogs and the pledge record schema.
//!
//! The catalog holds the closed sets a pledge draws from (profile types,
//! commitments, states) and the persisted record shape.

mod commitment;
mod pledge;
mod profile;
mod states;

pub use commitment::{Commitment, CommitmentTheme, COMMITMENT_THEMES};
pub use pledge::{stars_for, stored_instant, Pledge, PledgeDraft, PledgeId, PublicPledge};
pub use profile::ProfileType;
pub use states::{is_known_state, INDIAN_STATES};
