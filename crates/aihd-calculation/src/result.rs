//! Calculation results and null-safe extraction.
//!
//! A [`CalculationResultMap`] only ever holds patients of the cohort it
//! was computed for. A patient missing from the map simply has no result;
//! the extraction helpers return `None` for it instead of failing.

use std::collections::hash_map::{self, HashMap};

use aihd_types::{ConceptId, Observation, PatientId};

/// The result of one calculation for one patient.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult<T> {
    value: Option<T>,
    calculation: &'static str,
}

impl<T> CalculationResult<T> {
    /// Creates a result carrying `value`.
    pub fn new(value: T, calculation: &'static str) -> Self {
        Self {
            value: Some(value),
            calculation,
        }
    }

    /// Creates a result that carries no value.
    pub fn empty(calculation: &'static str) -> Self {
        Self {
            value: None,
            calculation,
        }
    }

    /// Returns the value, if any.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Returns true if the result carries no value.
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Name of the calculation that produced this result.
    pub fn calculation(&self) -> &'static str {
        self.calculation
    }
}

/// Per-patient results of one calculation over a cohort.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResultMap<T> {
    results: HashMap<PatientId, CalculationResult<T>>,
}

impl<T> Default for CalculationResultMap<T> {
    fn default() -> Self {
        Self {
            results: HashMap::new(),
        }
    }
}

impl<T> CalculationResultMap<T> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map sized for `capacity` patients.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: HashMap::with_capacity(capacity),
        }
    }

    /// Stores the result for a patient, replacing any previous one.
    pub fn insert(&mut self, patient: PatientId, result: CalculationResult<T>) {
        self.results.insert(patient, result);
    }

    /// Returns the result for a patient.
    pub fn get(&self, patient: PatientId) -> Option<&CalculationResult<T>> {
        self.results.get(&patient)
    }

    /// Returns true if the map holds a result for `patient`.
    pub fn contains(&self, patient: PatientId) -> bool {
        self.results.contains_key(&patient)
    }

    /// Number of patients with a result.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if no patient has a result.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterates over patients and their results in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, PatientId, CalculationResult<T>> {
        self.results.iter()
    }

    /// Iterates over the patients that have a result.
    pub fn patients(&self) -> impl Iterator<Item = PatientId> + '_ {
        self.results.keys().copied()
    }
}

impl<'a, T> IntoIterator for &'a CalculationResultMap<T> {
    type Item = (&'a PatientId, &'a CalculationResult<T>);
    type IntoIter = hash_map::Iter<'a, PatientId, CalculationResult<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Returns the value computed for `patient`, if any.
pub fn result_for_patient<T>(map: &CalculationResultMap<T>, patient: PatientId) -> Option<&T> {
    map.get(patient).and_then(CalculationResult::value)
}

/// Returns the observation stored for `patient`, if any.
pub fn obs_result_for_patient(
    map: &CalculationResultMap<Observation>,
    patient: PatientId,
) -> Option<&Observation> {
    result_for_patient(map, patient)
}

/// Returns the coded answer of the observation stored for `patient`.
///
/// `None` when the patient has no result or the observation is not coded.
pub fn coded_obs_result_for_patient(
    map: &CalculationResultMap<Observation>,
    patient: PatientId,
) -> Option<ConceptId> {
    obs_result_for_patient(map, patient).and_then(Observation::value_coded)
}

/// Returns the numeric value of the observation stored for `patient`.
pub fn numeric_obs_result_for_patient(
    map: &CalculationResultMap<Observation>,
    patient: PatientId,
) -> Option<f64> {
    obs_result_for_patient(map, patient).and_then(Observation::value_numeric)
}

/// Returns the text value of the observation stored for `patient`.
pub fn text_obs_result_for_patient(
    map: &CalculationResultMap<Observation>,
    patient: PatientId,
) -> Option<&str> {
    obs_result_for_patient(map, patient).and_then(Observation::value_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aihd_types::ObsValue;
    use chrono::NaiveDate;

    fn make_obs(patient: PatientId, value: ObsValue) -> Observation {
        Observation {
            id: patient * 10,
            patient_id: patient,
            concept_id: 5000,
            recorded: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            value,
            voided: false,
        }
    }

    fn sample_map() -> CalculationResultMap<Observation> {
        let mut map = CalculationResultMap::new();
        map.insert(1, CalculationResult::new(make_obs(1, ObsValue::Coded(42)), "test"));
        map.insert(2, CalculationResult::new(make_obs(2, ObsValue::Numeric(7.5)), "test"));
        map.insert(3, CalculationResult::new(make_obs(3, ObsValue::Text("x".into())), "test"));
        map.insert(4, CalculationResult::empty("test"));
        map
    }

    #[test]
    fn test_missing_patient_yields_none() {
        let map = sample_map();
        assert!(obs_result_for_patient(&map, 99).is_none());
        assert!(coded_obs_result_for_patient(&map, 99).is_none());
    }

    #[test]
    fn test_empty_result_yields_none() {
        let map = sample_map();
        assert!(map.contains(4));
        assert!(map.get(4).unwrap().is_empty());
        assert!(obs_result_for_patient(&map, 4).is_none());
        assert!(coded_obs_result_for_patient(&map, 4).is_none());
    }

    #[test]
    fn test_typed_extraction() {
        let map = sample_map();
        assert_eq!(coded_obs_result_for_patient(&map, 1), Some(42));
        assert_eq!(coded_obs_result_for_patient(&map, 2), None);
        assert_eq!(numeric_obs_result_for_patient(&map, 2), Some(7.5));
        assert_eq!(text_obs_result_for_patient(&map, 3), Some("x"));
        assert_eq!(obs_result_for_patient(&map, 1).map(|o| o.id), Some(10));
    }

    #[test]
    fn test_map_bookkeeping() {
        let map = sample_map();
        assert_eq!(map.len(), 4);
        assert!(!map.is_empty());
        let mut patients: Vec<_> = map.patients().collect();
        patients.sort_unstable();
        assert_eq!(patients, vec![1, 2, 3, 4]);
        assert_eq!(map.get(1).map(CalculationResult::calculation), Some("test"));
    }
}
