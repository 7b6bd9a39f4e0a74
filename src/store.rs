//! Candidate store.
//!
//! Owns the candidate pairings in an arena and derives, once, the index
//! maps the model builders iterate over:
//!
//! | Index | Key | Used by |
//! |-------|-----|---------|
//! | by nurse | `nurse_id` | no-double-booking family |
//! | by slot | [`ShiftSlotKey`] | ward staffing family |
//! | by bucket | ([`BucketKey`]) nurse × fortnight | minimum hours family |
//!
//! All indices are ordered maps, so iteration order (and therefore the
//! order of emitted constraints) is a pure function of the input.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::DataIntegrityError;
use crate::fortnight::FortnightBucketizer;
use crate::models::{CandidatePairing, ShiftSlotKey};
use crate::validation::validate_candidates;

/// Position of a pairing in the store's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CandidateId(usize);

impl CandidateId {
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One nurse's fortnight bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey {
    pub nurse_id: String,
    pub fortnight: i64,
}

/// Validated, indexed, read-only candidate set.
#[derive(Debug, Clone)]
pub struct CandidateStore {
    candidates: Vec<CandidatePairing>,
    fortnights: Vec<i64>,
    bucketizer: Option<FortnightBucketizer>,
    by_nurse: BTreeMap<String, Vec<CandidateId>>,
    by_slot: BTreeMap<ShiftSlotKey, Vec<CandidateId>>,
    by_bucket: BTreeMap<BucketKey, Vec<CandidateId>>,
}

impl CandidateStore {
    /// Validates and indexes `candidates`.
    ///
    /// # Errors
    /// [`DataIntegrityError`] listing every duplicate (nurse, slot) pair,
    /// negative or non-finite duration, non-finite score and empty id.
    pub fn new(candidates: Vec<CandidatePairing>) -> Result<Self, DataIntegrityError> {
        validate_candidates(&candidates).map_err(DataIntegrityError::new)?;

        let bucketizer = FortnightBucketizer::from_dates(candidates.iter().map(|c| c.date));
        let fortnights: Vec<i64> = match bucketizer {
            Some(b) => candidates.iter().map(|c| b.bucket(c.date)).collect(),
            None => Vec::new(),
        };

        let mut by_nurse: BTreeMap<String, Vec<CandidateId>> = BTreeMap::new();
        let mut by_slot: BTreeMap<ShiftSlotKey, Vec<CandidateId>> = BTreeMap::new();
        let mut by_bucket: BTreeMap<BucketKey, Vec<CandidateId>> = BTreeMap::new();

        for (i, c) in candidates.iter().enumerate() {
            let id = CandidateId(i);
            by_nurse.entry(c.nurse_id.clone()).or_default().push(id);
            by_slot.entry(c.slot_key()).or_default().push(id);
            by_bucket
                .entry(BucketKey {
                    nurse_id: c.nurse_id.clone(),
                    fortnight: fortnights[i],
                })
                .or_default()
                .push(id);
        }

        Ok(Self {
            candidates,
            fortnights,
            bucketizer,
            by_nurse,
            by_slot,
            by_bucket,
        })
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The pairing stored at `id`.
    ///
    /// # Panics
    /// If `id` did not come from this store.
    #[inline]
    pub fn get(&self, id: CandidateId) -> &CandidatePairing {
        &self.candidates[id.0]
    }

    /// Fortnight index of the pairing at `id`.
    #[inline]
    pub fn fortnight_of(&self, id: CandidateId) -> i64 {
        self.fortnights[id.0]
    }

    /// The bucketizer anchored at this dataset's minimum date.
    pub fn bucketizer(&self) -> Option<&FortnightBucketizer> {
        self.bucketizer.as_ref()
    }

    /// All pairings in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (CandidateId, &CandidatePairing)> {
        self.candidates
            .iter()
            .enumerate()
            .map(|(i, c)| (CandidateId(i), c))
    }

    pub fn candidates(&self) -> &[CandidatePairing] {
        &self.candidates
    }

    /// Pairings per nurse, in nurse id order.
    pub fn by_nurse(&self) -> impl Iterator<Item = (&str, &[CandidateId])> {
        self.by_nurse.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Pairings per shift slot, in slot order.
    pub fn by_slot(&self) -> impl Iterator<Item = (&ShiftSlotKey, &[CandidateId])> {
        self.by_slot.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Pairings per (nurse, fortnight) bucket.
    pub fn by_bucket(&self) -> impl Iterator<Item = (&BucketKey, &[CandidateId])> {
        self.by_bucket.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn nurse_count(&self) -> usize {
        self.by_nurse.len()
    }

    pub fn slot_count(&self) -> usize {
        self.by_slot.len()
    }

    pub fn bucket_count(&self) -> usize {
        self.by_bucket.len()
    }
}
