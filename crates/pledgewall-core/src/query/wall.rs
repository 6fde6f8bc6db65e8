//! Public wall queries: filtering, pagination and display helpers.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{Pledge, PublicPledge};

use super::PledgeFilter;

/// Pledges shown per wall page.
pub const DEFAULT_PER_PAGE: usize = 50;

/// Page selection, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// Select a page at the default size.
    pub fn page(page: usize) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }
}

/// A filtered, paginated view of the wall.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WallQuery {
    pub filter: PledgeFilter,
    pub pagination: Pagination,
}

impl WallQuery {
    pub fn new(filter: PledgeFilter, pagination: Pagination) -> Self {
        Self { filter, pagination }
    }

    /// Run the query over a most-recent-first collection.
    ///
    /// The requested page is clamped into range; an empty result is page 1 of 0.
    pub fn execute(&self, pledges: &[Pledge]) -> WallPage {
        let per_page = self.pagination.per_page.max(1);
        let matches: Vec<&Pledge> = pledges.iter().filter(|p| self.filter.matches(p)).collect();
        let total_matches = matches.len();
        let total_pages = total_matches.div_ceil(per_page);
        let page = self.pagination.page.clamp(1, total_pages.max(1));

        let pledges = matches
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .map(Pledge::to_public)
            .collect();

        WallPage {
            pledges,
            total_matches,
            page,
            per_page,
            total_pages,
        }
    }
}

/// One page of public pledges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallPage {
    pub pledges: Vec<PublicPledge>,
    /// Matches across all pages.
    pub total_matches: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl WallPage {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// States that appear on the wall, sorted and de-duplicated.
pub fn unique_states(pledges: &[Pledge]) -> Vec<String> {
    pledges
        .iter()
        .map(|p| p.state.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Relative label for when a pledge was taken.
///
/// `Today`, `Yesterday` and `N days ago` within a week, then a short date
/// such as `5 Mar 2024`.
pub fn describe_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - timestamp).num_days().abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        _ => timestamp.format("%-d %b %Y").to_string(),
    }
}
