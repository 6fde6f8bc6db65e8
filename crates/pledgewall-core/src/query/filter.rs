//! Wall filters.

use crate::catalog::{Pledge, ProfileType};

/// Narrowing criteria for the public wall. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PledgeFilter {
    /// Case-insensitive substring of the name or id.
    pub search: Option<String>,
    pub profile_type: Option<ProfileType>,
    /// Exact state name.
    pub state: Option<String>,
}

impl PledgeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_profile_type(mut self, profile_type: ProfileType) -> Self {
        self.profile_type = Some(profile_type);
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Whether any criterion is set.
    pub fn is_active(&self) -> bool {
        self.search_term().is_some() || self.profile_type.is_some() || self.state.is_some()
    }

    /// Check one pledge against every set criterion.
    pub fn matches(&self, pledge: &Pledge) -> bool {
        if let Some(term) = self.search_term() {
            let term = term.to_lowercase();
            let hit = pledge.name.to_lowercase().contains(&term)
                || pledge.id.as_str().to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        if let Some(profile_type) = self.profile_type {
            if pledge.profile_type != profile_type {
                return false;
            }
        }
        if let Some(state) = &self.state {
            if &pledge.state != state {
                return false;
            }
        }
        true
    }

    /// An empty search string behaves as no search.
    fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Commitment, PledgeDraft, PledgeId};
    use chrono::Utc;

    fn pledge(n: usize, name: &str, state: &str, profile_type: ProfileType) -> Pledge {
        Pledge::from_draft(
            PledgeId::from_sequence(n),
            PledgeDraft {
                name: name.to_string(),
                email: "x@example.com".to_string(),
                mobile: "9812345678".to_string(),
                state: state.to_string(),
                profile_type,
                commitments: vec![Commitment::SaveElectricity],
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = PledgeFilter::new();
        assert!(!filter.is_active());
        assert!(filter.matches(&pledge(1, "Asha Rao", "Karnataka", ProfileType::Student)));

        let filter = PledgeFilter::new().with_search("");
        assert!(!filter.is_active());
    }

    #[test]
    fn test_search_name_or_id_case_insensitive() {
        let p = pledge(42, "Asha Rao", "Karnataka", ProfileType::Student);
        assert!(PledgeFilter::new().with_search("asha").matches(&p));
        assert!(PledgeFilter::new().with_search("RAO").matches(&p));
        assert!(PledgeFilter::new().with_search("clp-0042").matches(&p));
        assert!(!PledgeFilter::new().with_search("Kabir").matches(&p));
    }

    #[test]
    fn test_profile_and_state_combine() {
        let p = pledge(1, "Asha Rao", "Karnataka", ProfileType::Student);
        let filter = PledgeFilter::new()
            .with_profile_type(ProfileType::Student)
            .with_state("Karnataka");
        assert!(filter.is_active());
        assert!(filter.matches(&p));

        let filter = filter.with_state("Kerala");
        assert!(!filter.matches(&p));

        let filter = PledgeFilter::new().with_profile_type(ProfileType::Other);
        assert!(!filter.matches(&p));
    }
}
