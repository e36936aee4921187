//! Identifier types.
//!
//! Patients, concepts and observations are all keyed by unsigned 64-bit
//! integers assigned by the clinical data store.

/// Identifier of a patient record.
///
/// Unique per patient and stable for the lifetime of the record. Never reused.
///
/// # Examples
///
/// ```
/// use aihd_types::PatientId;
///
/// let patient: PatientId = 1042;
/// ```
pub type PatientId = u64;

/// Identifier of a concept in the concept dictionary.
pub type ConceptId = u64;

/// Internal record identifier of an observation.
///
/// Assigned in insertion order by the data store, so a larger id means the
/// row was written later.
pub type ObsId = u64;
