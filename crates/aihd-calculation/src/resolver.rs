//! Most recent observation of a concept, per patient.

use aihd_types::{ConceptId, Observation};

use crate::cohort::Cohort;
use crate::context::TemporalContext;
use crate::error::EvalResult;
use crate::result::{CalculationResult, CalculationResultMap};
use crate::store::ClinicalDataStore;

/// Calculation name attached to resolver results.
pub const LAST_OBS: &str = "last_obs";

/// Resolves, for each patient of `cohort`, the latest observation of
/// `concept` recorded no later than the context's reference instant.
///
/// Voided observations are ignored. When two observations share the same
/// recorded time, the one with the higher record id wins. Patients without
/// a qualifying observation are absent from the returned map.
pub fn last_observation<S>(
    store: &S,
    concept: ConceptId,
    cohort: &Cohort,
    context: &TemporalContext,
) -> EvalResult<CalculationResultMap<Observation>>
where
    S: ClinicalDataStore + ?Sized,
{
    let mut results = CalculationResultMap::with_capacity(cohort.len());

    for &patient in cohort {
        let observations = store.observations(patient, concept)?;
        if let Some(latest) = select_latest(observations, context) {
            results.insert(patient, CalculationResult::new(latest, LAST_OBS));
        }
    }

    Ok(results)
}

/// Picks the latest non-voided observation at or before the reference instant.
fn select_latest(
    observations: Vec<Observation>,
    context: &TemporalContext,
) -> Option<Observation> {
    let now = context.now();
    observations
        .into_iter()
        .filter(|obs| !obs.voided && obs.recorded <= now)
        .max_by_key(|obs| (obs.recorded, obs.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{coded_obs_result_for_patient, obs_result_for_patient};
    use crate::testing::{at, date, make_patient, FakeStore};
    use aihd_types::ObsValue;

    const QUESTION: ConceptId = 100;
    const OTHER_QUESTION: ConceptId = 200;

    fn context() -> TemporalContext {
        TemporalContext::end_of_day(date(2024, 3, 1))
    }

    fn cohort(ids: &[u64]) -> Cohort {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_picks_latest_observation() {
        let store = FakeStore::new()
            .with_patient(make_patient(1, None, None))
            .with_coded_obs(1, QUESTION, 10, at(2024, 1, 1))
            .with_coded_obs(1, QUESTION, 11, at(2024, 2, 1))
            .with_coded_obs(1, QUESTION, 12, at(2023, 12, 1));

        let map = last_observation(&store, QUESTION, &cohort(&[1]), &context()).unwrap();
        assert_eq!(coded_obs_result_for_patient(&map, 1), Some(11));
    }

    #[test]
    fn test_ignores_observations_after_reference_instant() {
        let store = FakeStore::new()
            .with_coded_obs(1, QUESTION, 10, at(2024, 2, 1))
            .with_coded_obs(1, QUESTION, 11, at(2024, 3, 2));

        let map = last_observation(&store, QUESTION, &cohort(&[1]), &context()).unwrap();
        assert_eq!(coded_obs_result_for_patient(&map, 1), Some(10));
    }

    #[test]
    fn test_patients_without_observations_are_absent() {
        let store = FakeStore::new()
            .with_coded_obs(1, QUESTION, 10, at(2024, 1, 1))
            .with_coded_obs(2, OTHER_QUESTION, 10, at(2024, 1, 1))
            .with_coded_obs(3, QUESTION, 10, at(2024, 6, 1));

        let map = last_observation(&store, QUESTION, &cohort(&[1, 2, 3, 4]), &context()).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains(1));
        assert!(!map.contains(2));
        assert!(!map.contains(3));
        assert!(!map.contains(4));
    }

    #[test]
    fn test_only_cohort_members_are_resolved() {
        let store = FakeStore::new()
            .with_coded_obs(1, QUESTION, 10, at(2024, 1, 1))
            .with_coded_obs(2, QUESTION, 10, at(2024, 1, 1));

        let map = last_observation(&store, QUESTION, &cohort(&[2]), &context()).unwrap();
        assert_eq!(map.patients().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_equal_times_break_on_highest_record_id() {
        let recorded = at(2024, 1, 1);
        let store = FakeStore::new()
            .with_obs(Observation {
                id: 9,
                patient_id: 1,
                concept_id: QUESTION,
                recorded,
                value: ObsValue::Coded(20),
                voided: false,
            })
            .with_obs(Observation {
                id: 4,
                patient_id: 1,
                concept_id: QUESTION,
                recorded,
                value: ObsValue::Coded(21),
                voided: false,
            });

        let map = last_observation(&store, QUESTION, &cohort(&[1]), &context()).unwrap();
        let obs = obs_result_for_patient(&map, 1).unwrap();
        assert_eq!(obs.id, 9);
        assert_eq!(obs.value_coded(), Some(20));
    }

    #[test]
    fn test_voided_observations_are_skipped() {
        let store = FakeStore::new()
            .with_coded_obs(1, QUESTION, 10, at(2024, 1, 1))
            .with_obs(Observation {
                id: 50,
                patient_id: 1,
                concept_id: QUESTION,
                recorded: at(2024, 2, 1),
                value: ObsValue::Coded(99),
                voided: true,
            });

        let map = last_observation(&store, QUESTION, &cohort(&[1]), &context()).unwrap();
        assert_eq!(coded_obs_result_for_patient(&map, 1), Some(10));
    }

    #[test]
    fn test_empty_cohort() {
        let store = FakeStore::new().with_coded_obs(1, QUESTION, 10, at(2024, 1, 1));
        let map = last_observation(&store, QUESTION, &Cohort::new(), &context()).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_store_failure_propagates() {
        let store = FakeStore::failing();
        let result = last_observation(&store, QUESTION, &cohort(&[1]), &context());
        assert!(result.is_err());
    }
}
