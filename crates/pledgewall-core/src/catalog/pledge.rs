//! The pledge record and its derived fields.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Commitment, ProfileType};

/// Prefix shared by every pledge id.
const ID_PREFIX: &str = "CLP-";

/// Fractional digits kept in stored timestamps.
const TIMESTAMP_DIGITS: u16 = 3;

/// Truncate an instant to the precision it is stored with.
pub fn stored_instant(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.trunc_subsecs(TIMESTAMP_DIGITS)
}

/// Pledge identifier of the form `CLP-0042`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PledgeId(String);

impl PledgeId {
    /// Build the id for a sequence number, zero-padded to four digits.
    ///
    /// Numbers past 9999 simply grow wider.
    pub fn from_sequence(number: usize) -> Self {
        Self(format!("{}{:04}", ID_PREFIX, number))
    }

    /// The numeric part of the id, if it has one.
    pub fn sequence(&self) -> Option<usize> {
        self.0.strip_prefix(ID_PREFIX)?.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PledgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PledgeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Star rating for a number of commitments.
///
/// Seven or more earn 5 stars, four or more earn 4, anything else 3.
pub fn stars_for(commitment_count: usize) -> u8 {
    if commitment_count >= 7 {
        5
    } else if commitment_count >= 4 {
        4
    } else {
        3
    }
}

/// A validated submission, ready to be stored.
///
/// Only produced by [`crate::constraint::PledgeForm::into_draft`] in normal
/// use; the fields are public so fixtures can build drafts directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PledgeDraft {
    pub name: String,
    pub email: String,
    /// Ten digits, no separators.
    pub mobile: String,
    pub state: String,
    pub profile_type: ProfileType,
    pub commitments: Vec<Commitment>,
}

/// A stored pledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pledge {
    pub id: PledgeId,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub state: String,
    pub profile_type: ProfileType,
    pub commitments: Vec<Commitment>,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub stars: u8,
}

impl Pledge {
    /// Materialize a draft with its generated fields.
    ///
    /// The timestamp is truncated to milliseconds so the record matches what
    /// is read back from storage.
    pub fn from_draft(id: PledgeId, draft: PledgeDraft, timestamp: DateTime<Utc>) -> Self {
        let stars = stars_for(draft.commitments.len());
        Self {
            id,
            name: draft.name,
            email: draft.email,
            mobile: draft.mobile,
            state: draft.state,
            profile_type: draft.profile_type,
            commitments: draft.commitments,
            timestamp: stored_instant(timestamp),
            stars,
        }
    }

    /// The projection shown on the public wall.
    pub fn to_public(&self) -> PublicPledge {
        PublicPledge {
            id: self.id.clone(),
            name: self.name.clone(),
            state: self.state.clone(),
            profile_type: self.profile_type,
            commitments: self.commitments.clone(),
            timestamp: self.timestamp,
            stars: self.stars,
        }
    }
}

/// A pledge without contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPledge {
    pub id: PledgeId,
    pub name: String,
    pub state: String,
    pub profile_type: ProfileType,
    pub commitments: Vec<Commitment>,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub stars: u8,
}

/// RFC 3339 timestamps with millisecond precision and a `Z` suffix, so the
/// textual form sorts the same way as the instant.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
