//! Aggregate pledge statistics.

use serde::Serialize;

use crate::catalog::{Pledge, ProfileType};

/// Campaign goal the progress bar measures against.
pub const DEFAULT_TARGET_PLEDGES: u64 = 1_000_000;

/// One workshop is counted for every this many pledges.
const PLEDGES_PER_WORKSHOP: u64 = 10;

/// Headline counts for the impact dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PledgeStats {
    pub total: u64,
    pub students: u64,
    pub working_professionals: u64,
    pub others: u64,
    /// Derived, never stored: `total / 10` rounded down.
    pub workshops: u64,
}

impl PledgeStats {
    /// Count a collection in a single pass.
    pub fn from_pledges<'a, I>(pledges: I) -> Self
    where
        I: IntoIterator<Item = &'a Pledge>,
    {
        let mut stats = pledges.into_iter().fold(Self::default(), |mut acc, pledge| {
            acc.total += 1;
            match pledge.profile_type {
                ProfileType::Student => acc.students += 1,
                ProfileType::WorkingProfessional => acc.working_professionals += 1,
                ProfileType::Other => acc.others += 1,
            }
            acc
        });
        stats.workshops = stats.total / PLEDGES_PER_WORKSHOP;
        stats
    }

    /// Share of `target` reached, as a percentage capped at 100.
    pub fn progress_percent(&self, target: u64) -> f64 {
        if target == 0 {
            return 100.0;
        }
        (self.total as f64 / target as f64 * 100.0).min(100.0)
    }
}
