//! The owned store of proof records.

use std::collections::BTreeMap;

use causeway_bridge_primitives::{buf::Buf32, roles::Principal, time::Timestamp};
use tracing::{debug, info, warn};

use crate::{
    errors::{RegistryError, RegistryResult},
    record::ProofRecord,
    verifier::ProofVerifier,
};

/// An append-only registry of proof records with a subject index.
///
/// The registry is pure mechanics: capability gating for submission and verification happens at
/// the bridge entry points that own this store.
#[derive(Clone, Debug, Default)]
pub struct ProofRegistry {
    records: BTreeMap<Buf32, ProofRecord>,
    /// Subject id -> record ids, in submission order.
    by_subject: BTreeMap<Buf32, Vec<Buf32>>,
}

impl ProofRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an unverified record, keyed by its content-derived identifier.
    #[allow(clippy::too_many_arguments)]
    pub fn submit(
        &mut self,
        circuit_id: Buf32,
        proof_blob: Vec<u8>,
        public_inputs: Vec<Buf32>,
        subject_id: Buf32,
        submitted_by: Principal,
        submitted_at_height: u64,
        submitted_at: Timestamp,
    ) -> RegistryResult<Buf32> {
        let id = ProofRecord::derive_id(
            &circuit_id,
            &proof_blob,
            &public_inputs,
            &subject_id,
            submitted_at_height,
        );
        if self.records.contains_key(&id) {
            return Err(RegistryError::DuplicateSubmission(id));
        }

        self.records.insert(
            id,
            ProofRecord {
                id,
                circuit_id,
                subject_id,
                proof_blob,
                public_inputs,
                submitted_by,
                submitted_at_height,
                submitted_at,
                verified: false,
                verified_by: None,
                verified_at: None,
            },
        );
        self.by_subject.entry(subject_id).or_default().push(id);

        info!(record=%id, subject=%subject_id, by=%submitted_by, "proof record submitted");
        Ok(id)
    }

    /// Runs the external verifier over a record and marks it verified on success.
    ///
    /// A negative verifier result leaves the record unverified so the caller may retry, or
    /// resubmit corrected content under a fresh identifier.
    pub fn verify_record<V: ProofVerifier>(
        &mut self,
        id: Buf32,
        verifier: &V,
        verified_by: Principal,
        now: Timestamp,
    ) -> RegistryResult<()> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(RegistryError::NotFound(id))?;
        if record.verified {
            return Err(RegistryError::AlreadyVerified(id));
        }

        if !verifier.verify(record.circuit_id, &record.proof_blob, &record.public_inputs) {
            warn!(record=%id, subject=%record.subject_id, "verifier rejected proof");
            return Err(RegistryError::InvalidProof(id));
        }

        record.verified = true;
        record.verified_by = Some(verified_by);
        record.verified_at = Some(now);
        info!(record=%id, subject=%record.subject_id, by=%verified_by, "proof record verified");
        Ok(())
    }

    /// True iff at least one record for the subject has been verified.
    pub fn is_verified(&self, subject_id: Buf32) -> bool {
        self.by_subject
            .get(&subject_id)
            .is_some_and(|ids| {
                ids.iter().any(|id| {
                    self.records
                        .get(id)
                        .is_some_and(|record| record.verified)
                })
            })
    }

    /// Looks up a record by identifier.
    pub fn record(&self, id: Buf32) -> Option<&ProofRecord> {
        self.records.get(&id)
    }

    /// Returns the records submitted for a subject, in submission order.
    pub fn records_for_subject(&self, subject_id: Buf32) -> Vec<&ProofRecord> {
        let Some(ids) = self.by_subject.get(&subject_id) else {
            debug!(subject=%subject_id, "no proof records for subject");
            return Vec::new();
        };
        ids.iter().filter_map(|id| self.records.get(id)).collect()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no record has been submitted yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts or rejects everything, per construction.
    struct StubVerifier(bool);

    impl ProofVerifier for StubVerifier {
        fn verify(&self, _circuit_id: Buf32, _blob: &[u8], _inputs: &[Buf32]) -> bool {
            self.0
        }
    }

    fn principal(n: u8) -> Principal {
        Principal::new(Buf32::new([n; 32]))
    }

    fn submit_one(registry: &mut ProofRegistry, subject: Buf32, height: u64) -> Buf32 {
        registry
            .submit(
                Buf32::new([1; 32]),
                b"proof-bytes".to_vec(),
                vec![Buf32::new([2; 32])],
                subject,
                principal(7),
                height,
                1_700_000_000,
            )
            .unwrap()
    }

    #[test]
    fn submit_then_verify() {
        let mut registry = ProofRegistry::new();
        let subject = Buf32::new([5; 32]);
        let id = submit_one(&mut registry, subject, 10);

        assert!(!registry.is_verified(subject));
        registry
            .verify_record(id, &StubVerifier(true), principal(8), 1_700_000_100)
            .unwrap();
        assert!(registry.is_verified(subject));

        let record = registry.record(id).unwrap();
        assert!(record.verified);
        assert_eq!(record.verified_by, Some(principal(8)));
        assert_eq!(record.verified_at, Some(1_700_000_100));
    }

    #[test]
    fn duplicate_submission_rejected() {
        let mut registry = ProofRegistry::new();
        let subject = Buf32::new([5; 32]);
        submit_one(&mut registry, subject, 10);

        let err = registry
            .submit(
                Buf32::new([1; 32]),
                b"proof-bytes".to_vec(),
                vec![Buf32::new([2; 32])],
                subject,
                principal(9), // a different submitter does not change the identifier
                10,
                1_700_000_500,
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateSubmission(_)));

        // Same content at a later height is a fresh record.
        submit_one(&mut registry, subject, 11);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn verify_unknown_record() {
        let mut registry = ProofRegistry::new();
        let err = registry
            .verify_record(Buf32::new([9; 32]), &StubVerifier(true), principal(1), 0)
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }

    #[test]
    fn verify_happens_exactly_once() {
        let mut registry = ProofRegistry::new();
        let subject = Buf32::new([5; 32]);
        let id = submit_one(&mut registry, subject, 10);

        registry
            .verify_record(id, &StubVerifier(true), principal(1), 0)
            .unwrap();
        let err = registry
            .verify_record(id, &StubVerifier(true), principal(1), 0)
            .unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyVerified(_)));
    }

    #[test]
    fn rejected_proof_stays_unverified_and_retryable() {
        let mut registry = ProofRegistry::new();
        let subject = Buf32::new([5; 32]);
        let id = submit_one(&mut registry, subject, 10);

        let err = registry
            .verify_record(id, &StubVerifier(false), principal(1), 0)
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidProof(_)));
        assert!(!registry.is_verified(subject));
        assert!(!registry.record(id).unwrap().verified);

        // A retry against a now-accepting verifier succeeds.
        registry
            .verify_record(id, &StubVerifier(true), principal(1), 0)
            .unwrap();
        assert!(registry.is_verified(subject));
    }

    #[test]
    fn subject_index_tracks_submissions() {
        let mut registry = ProofRegistry::new();
        let subject = Buf32::new([5; 32]);
        let other = Buf32::new([6; 32]);

        let a = submit_one(&mut registry, subject, 10);
        let b = submit_one(&mut registry, subject, 11);
        submit_one(&mut registry, other, 10);

        let records = registry.records_for_subject(subject);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, a);
        assert_eq!(records[1].id, b);
        assert!(registry.records_for_subject(Buf32::new([9; 32])).is_empty());
    }
}
