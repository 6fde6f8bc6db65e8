//! Participant profile types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who is taking the pledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProfileType {
    /// Enrolled student.
    Student,
    /// Employed professional.
    #[serde(rename = "Working Professional")]
    WorkingProfessional,
    /// Anyone else.
    Other,
}

impl ProfileType {
    /// All profile types in display order.
    pub const ALL: [ProfileType; 3] = [
        ProfileType::Student,
        ProfileType::WorkingProfessional,
        ProfileType::Other,
    ];

    /// The label stored and displayed for this profile type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Student => "Student",
            ProfileType::WorkingProfessional => "Working Professional",
            ProfileType::Other => "Other",
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileType {
    type Err = String;

    /// Parses the exact stored label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileType::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown profile type: {}", s))
    }
}
