//! Interfaces to the clinical data store and the concept dictionary.
//!
//! Every calculation receives its store explicitly. The loader crate's
//! in-memory store implements both traits; tests use small fakes.

use aihd_types::{ConceptId, Observation, Patient, PatientId};

use crate::error::StoreError;

/// Read-only access to patient and observation records.
///
/// Implementations must be shareable across threads so that independent
/// report buckets can be evaluated concurrently.
pub trait ClinicalDataStore: Send + Sync {
    /// Returns the ids of every non-voided patient.
    fn patient_ids(&self) -> Result<Vec<PatientId>, StoreError>;

    /// Returns the demographic record of a patient, or `None` if unknown.
    fn patient(&self, id: PatientId) -> Result<Option<Patient>, StoreError>;

    /// Returns all observations of `concept` for `patient`, ordered by
    /// recorded time.
    fn observations(
        &self,
        patient: PatientId,
        concept: ConceptId,
    ) -> Result<Vec<Observation>, StoreError>;
}

/// Resolves clinical terms to concept identifiers.
pub trait ConceptDictionary {
    /// Looks up a concept by key. Returns `None` when nothing matches.
    fn lookup(&self, key: &str) -> Option<ConceptId>;
}
