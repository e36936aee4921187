//! # aihd-calculation
//!
//! Patient calculations and demographic aggregation for AIHD reports.
//!
//! Every calculation is a function of a cohort of patient ids, a
//! [`TemporalContext`] and an explicitly passed [`ClinicalDataStore`]:
//!
//! - [`last_observation`] resolves the most recent observation of a concept
//!   for each patient;
//! - [`ClassificationRule`] turns that observation's coded answer into a
//!   label using an ordered, first-match-wins rule list;
//! - [`filter_alive`] and [`filter_by_sex`] partition cohorts;
//! - [`count_in_range`] and [`count_total`] count distinct patients whose
//!   latest visit status matches a [`StatusRule`].
//!
//! [`DiabeticHypertensionReport`] ties these together into the flat named
//! counts consumed by the report page.
//!
//! ## Features
//!
//! - `parallel` (default): Enables [`DiabeticHypertensionReport::evaluate_parallel`]
//!   via rayon.
//! - `serde` (default): Enables serialization of [`ReportCounts`] as a flat
//!   JSON object.
//!
//! ## Usage
//!
//! ```ignore
//! use aihd_calculation::{DiabeticHypertensionReport, ReportConcepts, TemporalContext};
//!
//! let concepts = ReportConcepts::resolve(&dictionary)?;
//! let report = DiabeticHypertensionReport::new(concepts);
//! let counts = report.evaluate(&store, &TemporalContext::current())?;
//! println!("{}", counts.get("diabeticMale19To35").unwrap_or(0));
//! ```

#![warn(missing_docs)]

mod aggregate;
mod cohort;
mod context;
mod error;
mod filters;
mod metadata;
mod report;
mod resolver;
mod result;
mod rules;
mod store;

#[cfg(test)]
mod testing;

pub use aggregate::{count_in_range, count_total, matching_patients, StatusRule};
pub use cohort::{all_patients, Cohort};
pub use context::TemporalContext;
pub use error::{CalculationError, EvalResult, StoreError};
pub use filters::{female, filter_alive, filter_by_sex, male};
pub use metadata::ReportConcepts;
pub use report::{DiabeticHypertensionReport, ReportCounts, SexPartitions};
pub use resolver::{last_observation, LAST_OBS};
pub use result::{
    coded_obs_result_for_patient, numeric_obs_result_for_patient, obs_result_for_patient,
    result_for_patient, text_obs_result_for_patient, CalculationResult, CalculationResultMap,
};
pub use rules::{
    count_labels, hypertension_type_rule, label_for_patient, AnswerRule, ClassificationRule,
    HypertensionTypeConcepts, Label, PatientCalculation,
};
pub use store::{ClinicalDataStore, ConceptDictionary};

// Re-export aihd-types for convenience
pub use aihd_types;
