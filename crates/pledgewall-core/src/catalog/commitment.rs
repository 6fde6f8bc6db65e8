//! The commitment catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One sustainability action a participant can commit to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Commitment {
    #[serde(rename = "Save electricity")]
    SaveElectricity,
    #[serde(rename = "Use renewable energy")]
    UseRenewableEnergy,
    #[serde(rename = "Reduce water usage")]
    ReduceWaterUsage,
    #[serde(rename = "Use public transport")]
    UsePublicTransport,
    #[serde(rename = "Eat plant-based meals")]
    EatPlantBasedMeals,
    #[serde(rename = "Reduce food waste")]
    ReduceFoodWaste,
    #[serde(rename = "Recycle & compost")]
    RecycleAndCompost,
    #[serde(rename = "Avoid single-use plastics")]
    AvoidSingleUsePlastics,
    #[serde(rename = "Spread climate awareness")]
    SpreadClimateAwareness,
}

impl Commitment {
    /// The full catalog in display order.
    pub const ALL: [Commitment; 9] = [
        Commitment::SaveElectricity,
        Commitment::UseRenewableEnergy,
        Commitment::ReduceWaterUsage,
        Commitment::UsePublicTransport,
        Commitment::EatPlantBasedMeals,
        Commitment::ReduceFoodWaste,
        Commitment::RecycleAndCompost,
        Commitment::AvoidSingleUsePlastics,
        Commitment::SpreadClimateAwareness,
    ];

    /// The catalog statement for this commitment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::SaveElectricity => "Save electricity",
            Commitment::UseRenewableEnergy => "Use renewable energy",
            Commitment::ReduceWaterUsage => "Reduce water usage",
            Commitment::UsePublicTransport => "Use public transport",
            Commitment::EatPlantBasedMeals => "Eat plant-based meals",
            Commitment::ReduceFoodWaste => "Reduce food waste",
            Commitment::RecycleAndCompost => "Recycle & compost",
            Commitment::AvoidSingleUsePlastics => "Avoid single-use plastics",
            Commitment::SpreadClimateAwareness => "Spread climate awareness",
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Commitment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Commitment::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown commitment: {}", s))
    }
}

/// A titled group of related commitments, as laid out on the form.
#[derive(Debug, Clone, Copy)]
pub struct CommitmentTheme {
    pub title: &'static str,
    pub commitments: [Commitment; 3],
}

/// Commitment themes in form order.
pub const COMMITMENT_THEMES: [CommitmentTheme; 3] = [
    CommitmentTheme {
        title: "Energy & Resources",
        commitments: [
            Commitment::SaveElectricity,
            Commitment::UseRenewableEnergy,
            Commitment::ReduceWaterUsage,
        ],
    },
    CommitmentTheme {
        title: "Transportation & Food",
        commitments: [
            Commitment::UsePublicTransport,
            Commitment::EatPlantBasedMeals,
            Commitment::ReduceFoodWaste,
        ],
    },
    CommitmentTheme {
        title: "Waste & Advocacy",
        commitments: [
            Commitment::RecycleAndCompost,
            Commitment::AvoidSingleUsePlastics,
            Commitment::SpreadClimateAwareness,
        ],
    },
];
