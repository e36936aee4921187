//! Patient cohorts.

use std::collections::BTreeSet;

use aihd_types::PatientId;

use crate::error::EvalResult;
use crate::store::ClinicalDataStore;

/// A set of patient ids. Iteration order is ascending id.
pub type Cohort = BTreeSet<PatientId>;

/// Returns every non-voided patient known to the store.
pub fn all_patients<S>(store: &S) -> EvalResult<Cohort>
where
    S: ClinicalDataStore + ?Sized,
{
    Ok(store.patient_ids()?.into_iter().collect())
}
