//! In-memory clinical data store.
//!
//! Holds the parsed patient, observation and concept extracts and serves
//! them to the calculation engine through [`ClinicalDataStore`] and
//! [`ConceptDictionary`].
//!
//! ```ignore
//! let files = discover_data_files("/path/to/extract")?;
//! let mut store = ClinicalStore::new();
//! store.load_all(&files, &LoadConfig::default())?;
//!
//! let concepts = ReportConcepts::resolve(&store)?;
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

#[cfg(feature = "parallel")]
use std::fs::File;
#[cfg(feature = "parallel")]
use std::io::{BufRead, BufReader};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use aihd_calculation::{ClinicalDataStore, ConceptDictionary, StoreError};
use aihd_types::{ConceptId, ConceptRecord, Observation, Patient, PatientId};

use crate::parser::ExtractParser;
#[cfg(feature = "parallel")]
use crate::parser::{check_columns, ExtractRecord};
#[cfg(feature = "parallel")]
use crate::types::LoadError;
use crate::types::{DataFiles, LoadConfig, LoadResult, LoadStats};

/// In-memory store for an AIHD extract.
///
/// Observations are indexed by patient and concept, and kept ordered by
/// recorded time (then id) within each index entry.
#[derive(Default)]
pub struct ClinicalStore {
    /// Patients indexed by id.
    patients: HashMap<PatientId, Patient>,
    /// Observations indexed by (patient, concept).
    observations: HashMap<(PatientId, ConceptId), Vec<Observation>>,
    /// Concepts indexed by id.
    concepts: HashMap<ConceptId, ConceptRecord>,
    /// Active concepts indexed by uuid.
    concepts_by_uuid: HashMap<String, ConceptId>,
    /// Active concepts indexed by lower-cased name.
    concepts_by_name: HashMap<String, ConceptId>,
}

impl std::fmt::Debug for ClinicalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClinicalStore")
            .field("patients", &self.patients.len())
            .field("observations", &self.observation_count())
            .field("concepts", &self.concepts.len())
            .field("concepts_by_uuid", &self.concepts_by_uuid.len())
            .field("concepts_by_name", &self.concepts_by_name.len())
            .finish()
    }
}

impl ClinicalStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads concepts from a concept extract file.
    pub fn load_concepts<P: AsRef<Path>>(
        &mut self,
        path: P,
        config: LoadConfig,
    ) -> LoadResult<LoadStats> {
        let parser = ExtractParser::<_, ConceptRecord>::from_path(path, config)?;
        parser.parse_batched(|batch| {
            self.insert_concepts(batch);
            Ok(())
        })
    }

    /// Loads patients from a patient extract file.
    pub fn load_patients<P: AsRef<Path>>(
        &mut self,
        path: P,
        config: LoadConfig,
    ) -> LoadResult<LoadStats> {
        let parser = ExtractParser::<_, Patient>::from_path(path, config)?;
        parser.parse_batched(|batch| {
            self.insert_patients(batch);
            Ok(())
        })
    }

    /// Loads observations from an observation extract file.
    pub fn load_observations<P: AsRef<Path>>(
        &mut self,
        path: P,
        config: LoadConfig,
    ) -> LoadResult<LoadStats> {
        let parser = ExtractParser::<_, Observation>::from_path(path, config)?;
        parser.parse_batched(|batch| {
            self.insert_observations(batch);
            Ok(())
        })
    }

    /// Loads observations using parallel parsing.
    ///
    /// Reads all lines into memory, then parses them with rayon. The first
    /// malformed line aborts the load.
    #[cfg(feature = "parallel")]
    pub fn load_observations_parallel<P: AsRef<Path>>(
        &mut self,
        path: P,
        config: LoadConfig,
    ) -> LoadResult<LoadStats> {
        let (observations, stats) = parse_lines_parallel::<Observation, _>(path, &config)?;
        self.insert_observations(observations);
        Ok(stats)
    }

    /// Loads every file of a discovered extract.
    ///
    /// Concepts are loaded first, then patients, then observations.
    pub fn load_all(&mut self, files: &DataFiles, config: &LoadConfig) -> LoadResult<()> {
        if let Some(ref concept_path) = files.concept_file {
            self.load_concepts(concept_path, config.clone())?;
        }

        if let Some(ref patient_path) = files.patient_file {
            self.load_patients(patient_path, config.clone())?;
        }

        if let Some(ref observation_path) = files.observation_file {
            self.load_observations(observation_path, config.clone())?;
        }

        Ok(())
    }

    /// Loads every file of a discovered extract, parsing observations in
    /// parallel.
    #[cfg(feature = "parallel")]
    pub fn load_all_parallel(&mut self, files: &DataFiles, config: &LoadConfig) -> LoadResult<()> {
        if let Some(ref concept_path) = files.concept_file {
            self.load_concepts(concept_path, config.clone())?;
        }

        if let Some(ref patient_path) = files.patient_file {
            self.load_patients(patient_path, config.clone())?;
        }

        if let Some(ref observation_path) = files.observation_file {
            self.load_observations_parallel(observation_path, config.clone())?;
        }

        Ok(())
    }

    /// Bulk inserts concepts.
    ///
    /// Retired concepts are stored but never indexed by uuid or name. When
    /// two active concepts share a name, the first one inserted wins.
    pub fn insert_concepts(&mut self, concepts: impl IntoIterator<Item = ConceptRecord>) {
        for concept in concepts {
            if !concept.retired {
                self.concepts_by_uuid
                    .entry(concept.uuid.trim().to_string())
                    .or_insert(concept.id);
                self.concepts_by_name
                    .entry(concept.name.trim().to_lowercase())
                    .or_insert(concept.id);
            }
            self.concepts.insert(concept.id, concept);
        }
    }

    /// Bulk inserts patients. A later record replaces an earlier one with
    /// the same id.
    pub fn insert_patients(&mut self, patients: impl IntoIterator<Item = Patient>) {
        for patient in patients {
            self.patients.insert(patient.id, patient);
        }
    }

    /// Bulk inserts observations.
    pub fn insert_observations(&mut self, observations: impl IntoIterator<Item = Observation>) {
        let mut touched = HashSet::new();
        for obs in observations {
            let key = (obs.patient_id, obs.concept_id);
            self.observations.entry(key).or_default().push(obs);
            touched.insert(key);
        }

        for key in touched {
            if let Some(list) = self.observations.get_mut(&key) {
                list.sort_by_key(|obs| (obs.recorded, obs.id));
            }
        }
    }

    // Query methods

    /// Gets a patient by id.
    pub fn get_patient(&self, id: PatientId) -> Option<&Patient> {
        self.patients.get(&id)
    }

    /// Gets a concept by id.
    pub fn get_concept(&self, id: ConceptId) -> Option<&ConceptRecord> {
        self.concepts.get(&id)
    }

    /// Returns the observations of `concept` for `patient`, oldest first.
    pub fn get_observations(&self, patient: PatientId, concept: ConceptId) -> &[Observation] {
        self.observations
            .get(&(patient, concept))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the number of patients in the store.
    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    /// Returns the number of observations in the store.
    pub fn observation_count(&self) -> usize {
        self.observations.values().map(Vec::len).sum()
    }

    /// Returns the number of concepts in the store.
    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    fn active_concept(&self, id: ConceptId) -> Option<ConceptId> {
        self.concepts
            .get(&id)
            .filter(|concept| !concept.retired)
            .map(|concept| concept.id)
    }
}

impl ClinicalDataStore for ClinicalStore {
    fn patient_ids(&self) -> Result<Vec<PatientId>, StoreError> {
        let mut ids: Vec<PatientId> = self
            .patients
            .values()
            .filter(|patient| !patient.voided)
            .map(|patient| patient.id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn patient(&self, id: PatientId) -> Result<Option<Patient>, StoreError> {
        Ok(self.patients.get(&id).cloned())
    }

    fn observations(
        &self,
        patient: PatientId,
        concept: ConceptId,
    ) -> Result<Vec<Observation>, StoreError> {
        Ok(self.get_observations(patient, concept).to_vec())
    }
}

impl ConceptDictionary for ClinicalStore {
    /// Looks up an active concept by uuid, then by name (ignoring case),
    /// then by numeric id.
    fn lookup(&self, key: &str) -> Option<ConceptId> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }

        if let Some(&id) = self.concepts_by_uuid.get(key) {
            return Some(id);
        }

        if let Some(&id) = self.concepts_by_name.get(&key.to_lowercase()) {
            return Some(id);
        }

        key.parse::<ConceptId>()
            .ok()
            .and_then(|id| self.active_concept(id))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PARALLEL PARSING HELPER FUNCTIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// Reads all lines from a file, splitting off the header row.
#[cfg(feature = "parallel")]
fn read_lines_with_header<P: AsRef<Path>>(path: P) -> LoadResult<(String, Vec<String>)> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header = lines.next().transpose()?.unwrap_or_default();
    let body = lines
        .filter(|line| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((header, body))
}

/// Parses the lines of a tab-delimited extract file in parallel.
#[cfg(feature = "parallel")]
fn parse_lines_parallel<T, P>(path: P, config: &LoadConfig) -> LoadResult<(Vec<T>, LoadStats)>
where
    T: ExtractRecord + Send,
    P: AsRef<Path>,
{
    let (header, lines) = read_lines_with_header(path)?;
    let header = split_line(&header);
    check_columns::<T>(&header)?;
    let expected = header.len();

    let parsed = lines
        .par_iter()
        .enumerate()
        .map(|(i, line)| {
            let record = split_line(line);
            if record.len() != expected {
                return Err(LoadError::RowLength {
                    record: i + 1,
                    expected,
                    found: record.len(),
                });
            }
            T::from_record(&record)
        })
        .collect::<LoadResult<Vec<T>>>()?;

    let total_records = parsed.len();
    let records: Vec<T> = parsed
        .into_iter()
        .filter(|record| record.passes_filter(config))
        .collect();

    let stats = LoadStats {
        total_records,
        loaded_records: records.len(),
        skipped_records: total_records - records.len(),
    };

    Ok((records, stats))
}

#[cfg(feature = "parallel")]
fn split_line(line: &str) -> csv::StringRecord {
    csv::StringRecord::from(line.split('\t').collect::<Vec<_>>())
}
