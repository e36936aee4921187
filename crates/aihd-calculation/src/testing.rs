//! In-memory fakes shared by the unit tests of this crate.

use std::collections::{BTreeMap, HashMap};

use aihd_types::{ConceptId, ObsValue, Observation, Patient, PatientId, Sex};
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::StoreError;
use crate::store::{ClinicalDataStore, ConceptDictionary};

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(12, 0, 0).unwrap()
}

pub(crate) fn make_patient(id: PatientId, sex: Option<Sex>, birth: Option<NaiveDate>) -> Patient {
    Patient {
        id,
        sex,
        birth_date: birth,
        dead: false,
        death_date: None,
        voided: false,
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeStore {
    patients: BTreeMap<PatientId, Patient>,
    observations: Vec<Observation>,
    failing: bool,
}

impl FakeStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A store whose every query fails.
    pub(crate) fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub(crate) fn with_patient(mut self, patient: Patient) -> Self {
        self.patients.insert(patient.id, patient);
        self
    }

    pub(crate) fn with_coded_obs(
        mut self,
        patient: PatientId,
        concept: ConceptId,
        answer: ConceptId,
        recorded: NaiveDateTime,
    ) -> Self {
        let id = self.observations.len() as u64 + 1;
        self.observations.push(Observation {
            id,
            patient_id: patient,
            concept_id: concept,
            recorded,
            value: ObsValue::Coded(answer),
            voided: false,
        });
        self
    }

    pub(crate) fn with_obs(mut self, obs: Observation) -> Self {
        self.observations.push(obs);
        self
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable("fake store offline".into()));
        }
        Ok(())
    }
}

impl ClinicalDataStore for FakeStore {
    fn patient_ids(&self) -> Result<Vec<PatientId>, StoreError> {
        self.check()?;
        Ok(self
            .patients
            .values()
            .filter(|p| !p.voided)
            .map(|p| p.id)
            .collect())
    }

    fn patient(&self, id: PatientId) -> Result<Option<Patient>, StoreError> {
        self.check()?;
        Ok(self.patients.get(&id).cloned())
    }

    fn observations(
        &self,
        patient: PatientId,
        concept: ConceptId,
    ) -> Result<Vec<Observation>, StoreError> {
        self.check()?;
        let mut found: Vec<Observation> = self
            .observations
            .iter()
            .filter(|o| o.patient_id == patient && o.concept_id == concept)
            .cloned()
            .collect();
        found.sort_by_key(|o| o.recorded);
        Ok(found)
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeDictionary {
    terms: HashMap<String, ConceptId>,
}

impl FakeDictionary {
    pub(crate) fn with_terms<'a>(terms: impl IntoIterator<Item = (&'a str, ConceptId)>) -> Self {
        Self {
            terms: terms
                .into_iter()
                .map(|(term, id)| (term.to_string(), id))
                .collect(),
        }
    }
}

impl ConceptDictionary for FakeDictionary {
    fn lookup(&self, key: &str) -> Option<ConceptId> {
        self.terms.get(key).copied()
    }
}
