//! Demographic filters over cohorts.

use aihd_types::Sex;

use crate::cohort::Cohort;
use crate::context::TemporalContext;
use crate::error::EvalResult;
use crate::store::ClinicalDataStore;

/// Keeps the patients who are alive as of the context's reference date.
///
/// Patients unknown to the store are dropped.
pub fn filter_alive<S>(store: &S, cohort: &Cohort, context: &TemporalContext) -> EvalResult<Cohort>
where
    S: ClinicalDataStore + ?Sized,
{
    let today = context.today();
    let mut alive = Cohort::new();

    for &id in cohort {
        if let Some(patient) = store.patient(id)? {
            if !patient.is_dead_on(today) {
                alive.insert(id);
            }
        }
    }

    Ok(alive)
}

/// Keeps the patients recorded with `sex`.
///
/// Patients of unknown sex are never included, whichever sex is requested.
pub fn filter_by_sex<S>(store: &S, cohort: &Cohort, sex: Sex) -> EvalResult<Cohort>
where
    S: ClinicalDataStore + ?Sized,
{
    let mut matching = Cohort::new();

    for &id in cohort {
        if let Some(patient) = store.patient(id)? {
            if patient.sex == Some(sex) {
                matching.insert(id);
            }
        }
    }

    Ok(matching)
}

/// Keeps the male patients.
pub fn male<S>(store: &S, cohort: &Cohort) -> EvalResult<Cohort>
where
    S: ClinicalDataStore + ?Sized,
{
    filter_by_sex(store, cohort, Sex::Male)
}

/// Keeps the female patients.
pub fn female<S>(store: &S, cohort: &Cohort) -> EvalResult<Cohort>
where
    S: ClinicalDataStore + ?Sized,
{
    filter_by_sex(store, cohort, Sex::Female)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date, make_patient, FakeStore};
    use aihd_types::Patient;

    fn context() -> TemporalContext {
        TemporalContext::end_of_day(date(2024, 3, 1))
    }

    fn dead(id: u64, death_date: Option<chrono::NaiveDate>) -> Patient {
        Patient {
            dead: true,
            death_date,
            ..make_patient(id, Some(Sex::Male), None)
        }
    }

    fn store() -> FakeStore {
        FakeStore::new()
            .with_patient(make_patient(1, Some(Sex::Male), None))
            .with_patient(make_patient(2, Some(Sex::Female), None))
            .with_patient(make_patient(3, None, None))
            .with_patient(dead(4, None))
            .with_patient(dead(5, Some(date(2024, 2, 1))))
            .with_patient(dead(6, Some(date(2024, 5, 1))))
    }

    fn everyone() -> Cohort {
        (1..=7).collect()
    }

    #[test]
    fn test_filter_alive() {
        let alive = filter_alive(&store(), &everyone(), &context()).unwrap();
        assert_eq!(alive.into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 6]);
    }

    #[test]
    fn test_filter_alive_is_idempotent() {
        let store = store();
        let once = filter_alive(&store, &everyone(), &context()).unwrap();
        let twice = filter_alive(&store, &once, &context()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sex_partitions_are_disjoint() {
        let store = store();
        let males = male(&store, &everyone()).unwrap();
        let females = female(&store, &everyone()).unwrap();

        assert!(males.is_disjoint(&females));
        assert!(!males.contains(&3));
        assert!(!females.contains(&3));
        assert_eq!(females.into_iter().collect::<Vec<_>>(), vec![2]);
        assert_eq!(males.into_iter().collect::<Vec<_>>(), vec![1, 4, 5, 6]);
    }

    #[test]
    fn test_empty_cohort() {
        let store = store();
        assert!(filter_alive(&store, &Cohort::new(), &context()).unwrap().is_empty());
        assert!(male(&store, &Cohort::new()).unwrap().is_empty());
    }
}
