//! The pledge store.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{KeyValueStore, PledgeDocument, StoreConfig};
use crate::catalog::{Pledge, PledgeDraft, PledgeId};
use crate::error::Error;
use crate::query::{PledgeStats, WallPage, WallQuery};
use crate::seed::SampleGenerator;

/// Owns the persisted pledge collection.
///
/// The whole collection lives under one key and is rewritten on every
/// change. Operations are synchronous and assume a single writer.
pub struct PledgeStore<B> {
    backend: B,
    config: StoreConfig,
}

impl<B: KeyValueStore> PledgeStore<B> {
    /// Create a store with the default configuration.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    pub fn with_config(backend: B, config: StoreConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Seed sample pledges if nothing is stored yet.
    ///
    /// Existing data is never overwritten, even if it does not parse.
    /// Failures are logged and skipped. Returns whether seeding happened.
    pub fn initialize(&self) -> bool {
        let mut rng = match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.initialize_with(&mut rng, Utc::now())
    }

    /// [`initialize`](Self::initialize) with an explicit random source and clock.
    pub fn initialize_with<R: Rng>(&self, rng: &mut R, now: DateTime<Utc>) -> bool {
        let key = &self.config.storage_key;
        match self.backend.get(key) {
            Ok(Some(existing)) if !existing.is_empty() => {
                debug!(key = %key, "store already populated, skipping seed");
                return false;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(key = %key, error = %e, "store unavailable, skipping seed");
                return false;
            }
        }

        let generator = SampleGenerator::new(self.config.seed_count, self.config.seed_window_days);
        let pledges = generator.generate(rng, now);
        let count = pledges.len();

        match self.write(PledgeDocument::new(pledges)) {
            Ok(()) => {
                info!(key = %key, count, "seeded sample pledges");
                true
            }
            Err(e) => {
                warn!(key = %key, error = %e, "failed to write sample pledges");
                false
            }
        }
    }

    /// All pledges, most recent first.
    ///
    /// Missing, unreadable or corrupted data reads as an empty wall.
    pub fn list(&self) -> Vec<Pledge> {
        match self.read() {
            Ok(Some(doc)) => doc.pledges,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %self.config.storage_key, error = %e, "failed to read pledges");
                Vec::new()
            }
        }
    }

    /// Look up a single pledge by id.
    pub fn find(&self, id: &PledgeId) -> Option<Pledge> {
        self.list().into_iter().find(|p| &p.id == id)
    }

    /// Store a new pledge stamped with the current time.
    pub fn create(&self, draft: PledgeDraft) -> Result<Pledge, Error> {
        self.create_at(draft, Utc::now())
    }

    /// Store a new pledge with an explicit timestamp.
    ///
    /// The id is `CLP-` plus the collection length + 1, advanced past any id
    /// already taken. The pledge is prepended and the whole collection is
    /// written back. Unparseable stored data is replaced; a document from a
    /// newer version or an unreadable backend is left alone and reported.
    pub fn create_at(&self, draft: PledgeDraft, timestamp: DateTime<Utc>) -> Result<Pledge, Error> {
        let mut pledges = match self.read() {
            Ok(Some(doc)) => doc.pledges,
            Ok(None) => Vec::new(),
            Err(Error::Deserialization(reason)) => {
                let discarded_bytes = self.stored_len();
                warn!(
                    key = %self.config.storage_key,
                    reason = %reason,
                    discarded_bytes,
                    "discarding corrupted pledge data"
                );
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let id = next_id(&pledges);
        let pledge = Pledge::from_draft(id, draft, timestamp);
        pledges.insert(0, pledge.clone());

        self.write(PledgeDocument::new(pledges))
            .map_err(|e| match e {
                Error::StorageWrite(_) => e,
                other => Error::StorageWrite(other.to_string()),
            })?;

        info!(
            id = %pledge.id,
            stars = pledge.stars,
            commitments = pledge.commitments.len(),
            "pledge created"
        );
        Ok(pledge)
    }

    /// Aggregate counts over the current collection.
    pub fn stats(&self) -> PledgeStats {
        PledgeStats::from_pledges(&self.list())
    }

    /// Run a wall query over the current collection.
    pub fn wall(&self, query: &WallQuery) -> WallPage {
        query.execute(&self.list())
    }

    /// Remove every pledge.
    pub fn clear(&self) -> Result<(), Error> {
        self.backend.remove(&self.config.storage_key)?;
        info!(key = %self.config.storage_key, "pledges cleared");
        Ok(())
    }

    fn read(&self) -> Result<Option<PledgeDocument>, Error> {
        let raw = match self.backend.get(&self.config.storage_key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };
        let doc = PledgeDocument::from_json(&raw)?;
        if doc.is_legacy() {
            debug!(key = %self.config.storage_key, "read unversioned pledge data");
        }
        Ok(Some(doc))
    }

    fn stored_len(&self) -> usize {
        match self.backend.get(&self.config.storage_key) {
            Ok(Some(raw)) => raw.len(),
            _ => 0,
        }
    }

    fn write(&self, doc: PledgeDocument) -> Result<(), Error> {
        let json = doc.to_json()?;
        self.backend.set(&self.config.storage_key, &json)
    }
}

/// Next id: collection length + 1, skipping numbers already in use.
fn next_id(pledges: &[Pledge]) -> PledgeId {
    let mut number = pledges.len() + 1;
    loop {
        let id = PledgeId::from_sequence(number);
        if !pledges.iter().any(|p| p.id == id) {
            return id;
        }
        number += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Commitment, ProfileType};
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Timelike};

    fn draft(commitments: usize) -> PledgeDraft {
        PledgeDraft {
            name: "Asha Rao".to_string(),
            email: "asha@gmail.com".to_string(),
            mobile: "9876543210".to_string(),
            state: "Karnataka".to_string(),
            profile_type: ProfileType::Student,
            commitments: Commitment::ALL[..commitments].to_vec(),
        }
    }

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_list_empty_store() {
        let store = PledgeStore::new(MemoryStore::new());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_create_prepends_and_derives() {
        let store = PledgeStore::new(MemoryStore::new());
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();

        let first = store.create_at(draft(2), ts).unwrap();
        let second = store.create_at(draft(7), ts).unwrap();

        assert_eq!(first.id.as_str(), "CLP-0001");
        assert_eq!(first.stars, 3);
        assert_eq!(second.id.as_str(), "CLP-0002");
        assert_eq!(second.stars, 5);

        let pledges = store.list();
        assert_eq!(pledges.len(), 2);
        assert_eq!(pledges[0], second);
        assert_eq!(pledges[1], first);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let store = PledgeStore::new(MemoryStore::new());
        let now = Utc::now();

        assert!(store.initialize_with(&mut seeded_rng(), now));
        assert_eq!(store.list().len(), 75);

        assert!(!store.initialize_with(&mut seeded_rng(), now));
        assert!(!store.initialize());
        assert_eq!(store.list().len(), 75);
    }

    #[test]
    fn test_create_after_seed_continues_sequence() {
        let store = PledgeStore::with_config(
            MemoryStore::new(),
            StoreConfig::default().with_seed_count(10),
        );
        store.initialize_with(&mut seeded_rng(), Utc::now());

        let pledge = store.create(draft(4)).unwrap();
        assert_eq!(pledge.id.as_str(), "CLP-0011");
        assert_eq!(pledge.stars, 4);
        assert_eq!(store.list()[0].id, pledge.id);
    }

    #[test]
    fn test_initialize_skips_when_unreadable() {
        let backend = MemoryStore::new();
        backend.fail_reads(true);
        let store = PledgeStore::new(&backend);

        assert!(!store.initialize());
        assert!(store.list().is_empty());
        backend.fail_reads(false);
        assert!(backend.raw("climate_pledges").is_none());
    }

    #[test]
    fn test_initialize_swallows_write_failure() {
        let backend = MemoryStore::new();
        backend.fail_writes(true);
        let store = PledgeStore::new(&backend);

        assert!(!store.initialize());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_corrupted_data_reads_empty_and_is_not_reseeded() {
        let backend = MemoryStore::new();
        backend.set("climate_pledges", "{not json").unwrap();
        let store = PledgeStore::new(&backend);

        assert!(store.list().is_empty());
        assert!(!store.initialize());
        assert_eq!(backend.raw("climate_pledges").as_deref(), Some("{not json"));
    }

    #[test]
    fn test_create_replaces_corrupted_data() {
        let backend = MemoryStore::new();
        backend.set("climate_pledges", "garbage").unwrap();
        let store = PledgeStore::new(&backend);

        let pledge = store.create(draft(1)).unwrap();
        assert_eq!(pledge.id.as_str(), "CLP-0001");
        assert_eq!(store.list(), vec![pledge]);
    }

    #[test]
    fn test_created_record_matches_listed_record() {
        let store = PledgeStore::new(MemoryStore::new());
        let ts = Utc
            .with_ymd_and_hms(2024, 6, 1, 19, 54, 33)
            .unwrap()
            .with_nanosecond(608_727_629)
            .unwrap();

        let at = store.create_at(draft(2), ts).unwrap();
        assert_eq!(at, store.list().remove(0));

        let now = store.create(draft(5)).unwrap();
        assert_eq!(now, store.list().remove(0));
        assert_eq!(store.find(&now.id), Some(now));
    }

    #[test]
    fn test_seeded_records_match_generator() {
        let store = PledgeStore::with_config(
            MemoryStore::new(),
            StoreConfig::default().with_seed_count(20),
        );
        let now = Utc::now();
        store.initialize_with(&mut seeded_rng(), now);

        let generated = SampleGenerator::new(20, 90).generate(&mut seeded_rng(), now);
        assert_eq!(store.list(), generated);
    }

    #[test]
    fn test_create_replaces_record_outside_catalog() {
        let backend = MemoryStore::new();
        let legacy = r#"[{"id":"CLP-0001","name":"Old Entry","email":"old@example.com","mobile":"9876543210","state":"Goa","profileType":"Student","commitments":["Plant trees"],"timestamp":"2023-01-01T00:00:00.000Z","stars":3}]"#;
        backend.set("climate_pledges", legacy).unwrap();
        let store = PledgeStore::new(&backend);

        assert!(store.list().is_empty());
        assert!(!store.initialize());
        assert_eq!(backend.raw("climate_pledges").as_deref(), Some(legacy));
        assert_eq!(store.stored_len(), legacy.len());

        let pledge = store.create(draft(1)).unwrap();
        assert_eq!(pledge.id.as_str(), "CLP-0001");
        assert_eq!(store.list(), vec![pledge]);
    }

    #[test]
    fn test_create_refuses_newer_document() {
        let backend = MemoryStore::new();
        let newer = r#"{"version":99,"pledges":[]}"#;
        backend.set("climate_pledges", newer).unwrap();
        let store = PledgeStore::new(&backend);

        let err = store.create(draft(1)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion { found: 99, .. }));
        assert_eq!(backend.raw("climate_pledges").as_deref(), Some(newer));
    }

    #[test]
    fn test_create_write_failure_is_retryable() {
        let backend = MemoryStore::new();
        let store = PledgeStore::new(&backend);
        store.create(draft(1)).unwrap();

        backend.fail_writes(true);
        let err = store.create(draft(2)).unwrap_err();
        assert!(matches!(err, Error::StorageWrite(_)));
        assert!(err.is_retryable());
        assert_eq!(store.list().len(), 1);

        backend.fail_writes(false);
        let retried = store.create(draft(2)).unwrap();
        assert_eq!(retried.id.as_str(), "CLP-0002");
    }

    #[test]
    fn test_create_when_unreadable_does_not_clobber() {
        let backend = MemoryStore::new();
        let store = PledgeStore::new(&backend);
        store.create(draft(1)).unwrap();

        backend.fail_reads(true);
        assert!(store.create(draft(1)).is_err());
        backend.fail_reads(false);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_clear_then_stats_zero() {
        let store = PledgeStore::new(MemoryStore::new());
        store.initialize_with(&mut seeded_rng(), Utc::now());
        assert_eq!(store.stats().total, 75);

        store.clear().unwrap();
        assert!(store.list().is_empty());
        assert_eq!(store.stats(), PledgeStats::default());
    }

    #[test]
    fn test_next_id_skips_taken() {
        let ts = Utc::now();
        let pledges = vec![
            Pledge::from_draft(PledgeId::from_sequence(2), draft(1), ts),
            Pledge::from_draft(PledgeId::from_sequence(3), draft(1), ts),
        ];
        assert_eq!(next_id(&pledges).as_str(), "CLP-0004");
        assert_eq!(next_id(&pledges[..1]).as_str(), "CLP-0003");
        assert_eq!(next_id(&[]).as_str(), "CLP-0001");
    }

    #[test]
    fn test_find_by_id() {
        let store = PledgeStore::new(MemoryStore::new());
        let pledge = store.create(draft(3)).unwrap();
        assert_eq!(store.find(&pledge.id), Some(pledge));
        assert_eq!(store.find(&PledgeId::from("CLP-9999")), None);
    }
}
