//! Sample pledges for populating an empty wall.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{stars_for, stored_instant, Commitment, Pledge, PledgeId, ProfileType};
use crate::storage::{DEFAULT_SEED_COUNT, DEFAULT_SEED_WINDOW_DAYS};

const SAMPLE_NAMES: [&str; 30] = [
    "Aarav Sharma",
    "Ananya Patel",
    "Arjun Kumar",
    "Diya Singh",
    "Ishaan Verma",
    "Kavya Reddy",
    "Rohan Gupta",
    "Saanvi Iyer",
    "Vihaan Mehta",
    "Aisha Khan",
    "Dev Nair",
    "Isha Joshi",
    "Kabir Malhotra",
    "Myra Kapoor",
    "Advait Desai",
    "Navya Rao",
    "Reyansh Bose",
    "Siya Agarwal",
    "Vivaan Pillai",
    "Zara Saxena",
    "Aditya Chawla",
    "Kiara Trivedi",
    "Arnav Kulkarni",
    "Priya Menon",
    "Ayaan Shah",
    "Avni Choudhury",
    "Dhruv Banerjee",
    "Tanvi Pandey",
    "Shivansh Jain",
    "Anvi Shetty",
];

const SAMPLE_STATES: [&str; 15] = [
    "Maharashtra",
    "Delhi",
    "Karnataka",
    "Tamil Nadu",
    "Gujarat",
    "Rajasthan",
    "Kerala",
    "West Bengal",
    "Telangana",
    "Uttar Pradesh",
    "Madhya Pradesh",
    "Haryana",
    "Punjab",
    "Andhra Pradesh",
    "Odisha",
];

const MIN_SAMPLE_COMMITMENTS: usize = 3;

/// Generates plausible prior pledges.
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    count: usize,
    window_days: u32,
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_COUNT, DEFAULT_SEED_WINDOW_DAYS)
    }
}

impl SampleGenerator {
    pub fn new(count: usize, window_days: u32) -> Self {
        Self { count, window_days }
    }

    /// Produce the batch, newest first.
    ///
    /// Ids follow generation order (`CLP-0001` upward), so after sorting by
    /// timestamp they are no longer sequential down the list.
    pub fn generate<R: Rng>(&self, rng: &mut R, now: DateTime<Utc>) -> Vec<Pledge> {
        let now = stored_instant(now);
        let mut pledges: Vec<Pledge> = (1..=self.count)
            .map(|n| self.sample(rng, n, now))
            .collect();
        pledges.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        pledges
    }

    fn sample<R: Rng>(&self, rng: &mut R, n: usize, now: DateTime<Utc>) -> Pledge {
        let take = rng.gen_range(MIN_SAMPLE_COMMITMENTS..=Commitment::ALL.len());
        let mut commitments = Commitment::ALL.to_vec();
        commitments.shuffle(rng);
        commitments.truncate(take);

        let days_ago = if self.window_days == 0 {
            0
        } else {
            rng.gen_range(0..self.window_days)
        };

        Pledge {
            id: PledgeId::from_sequence(n),
            name: SAMPLE_NAMES[rng.gen_range(0..SAMPLE_NAMES.len())].to_string(),
            email: format!("user{}@example.com", n),
            mobile: format!("98{:08}", rng.gen_range(0..100_000_000u32)),
            state: SAMPLE_STATES[rng.gen_range(0..SAMPLE_STATES.len())].to_string(),
            profile_type: ProfileType::ALL[rng.gen_range(0..ProfileType::ALL.len())],
            stars: stars_for(commitments.len()),
            commitments,
            timestamp: now - Duration::days(i64::from(days_ago)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::is_known_state;
    use crate::constraint::{validate_email, validate_mobile, validate_name};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generates_requested_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let pledges = SampleGenerator::default().generate(&mut rng, Utc::now());
        assert_eq!(pledges.len(), 75);
    }

    #[test]
    fn test_samples_are_well_formed() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(11);
        let pledges = SampleGenerator::new(200, 90).generate(&mut rng, now);

        for pledge in &pledges {
            assert!(validate_name(&pledge.name).is_valid());
            assert!(validate_email(&pledge.email).is_valid());
            assert!(validate_mobile(&pledge.mobile).is_valid());
            assert!(is_known_state(&pledge.state));
            assert!((3..=9).contains(&pledge.commitments.len()));
            assert_eq!(pledge.stars, stars_for(pledge.commitments.len()));

            let mut unique = pledge.commitments.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), pledge.commitments.len());

            let age = now - pledge.timestamp;
            assert!(age >= Duration::zero() && age < Duration::days(90));
        }
    }

    #[test]
    fn test_sorted_newest_first() {
        let mut rng = StdRng::seed_from_u64(3);
        let pledges = SampleGenerator::new(50, 90).generate(&mut rng, Utc::now());
        assert!(pledges
            .windows(2)
            .all(|pair| pair[0].timestamp >= pair[1].timestamp));
    }

    #[test]
    fn test_ids_cover_sequence() {
        let mut rng = StdRng::seed_from_u64(5);
        let pledges = SampleGenerator::new(20, 30).generate(&mut rng, Utc::now());
        let mut seqs: Vec<usize> = pledges.iter().filter_map(|p| p.id.sequence()).collect();
        seqs.sort_unstable();
        assert_eq!(seqs, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_batch() {
        let now = Utc::now();
        let a = SampleGenerator::new(10, 90).generate(&mut StdRng::seed_from_u64(9), now);
        let b = SampleGenerator::new(10, 90).generate(&mut StdRng::seed_from_u64(9), now);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_window_stamps_now() {
        let now = Utc::now();
        let pledges = SampleGenerator::new(5, 0).generate(&mut StdRng::seed_from_u64(1), now);
        assert!(pledges.iter().all(|p| p.timestamp == stored_instant(now)));
    }
}
