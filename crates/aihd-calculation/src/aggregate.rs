//! Counting patients by visit status and age.
//!
//! A [`StatusRule`] merges two independently recorded answers ("new" and
//! "known" patient) to one visit type question into a single category.
//! Counts are taken over a set of patient ids, so a patient contributes at
//! most once to any bucket.

use std::collections::BTreeSet;

use aihd_types::{AgeRange, ConceptId, PatientId};

use crate::cohort::Cohort;
use crate::context::TemporalContext;
use crate::error::EvalResult;
use crate::resolver::last_observation;
use crate::result::coded_obs_result_for_patient;
use crate::store::ClinicalDataStore;

/// A visit type question and the two answers that put a patient in the
/// category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRule {
    /// Prefix of the report keys produced for this rule, e.g. `diabetic`.
    pub key: &'static str,
    /// The visit type question.
    pub question: ConceptId,
    /// Answer recorded on a patient's first visit.
    pub new_answer: ConceptId,
    /// Answer recorded on follow-up visits.
    pub known_answer: ConceptId,
}

impl StatusRule {
    /// Returns true if `answer` is either of the rule's answers.
    pub fn matches(&self, answer: ConceptId) -> bool {
        answer == self.new_answer || answer == self.known_answer
    }
}

/// Returns the patients of `cohort` whose latest answer to the rule's
/// question matches, restricted to `range` when one is given.
///
/// Ages are taken on the context's reference date. A matching patient
/// without a known birth date is kept only when `range` is `None`.
pub fn matching_patients<S>(
    store: &S,
    rule: &StatusRule,
    cohort: &Cohort,
    context: &TemporalContext,
    range: Option<AgeRange>,
) -> EvalResult<BTreeSet<PatientId>>
where
    S: ClinicalDataStore + ?Sized,
{
    let answers = last_observation(store, rule.question, cohort, context)?;
    let today = context.today();
    let mut matched = BTreeSet::new();

    for &patient in cohort {
        let Some(answer) = coded_obs_result_for_patient(&answers, patient) else {
            continue;
        };
        if !rule.matches(answer) {
            continue;
        }

        if let Some(range) = range {
            let age = store.patient(patient)?.and_then(|p| p.age_on(today));
            if !age.is_some_and(|age| range.contains(age)) {
                continue;
            }
        }

        matched.insert(patient);
    }

    Ok(matched)
}

/// Counts the matching patients of `cohort` whose age lies in `range`.
pub fn count_in_range<S>(
    store: &S,
    rule: &StatusRule,
    cohort: &Cohort,
    context: &TemporalContext,
    range: AgeRange,
) -> EvalResult<usize>
where
    S: ClinicalDataStore + ?Sized,
{
    Ok(matching_patients(store, rule, cohort, context, Some(range))?.len())
}

/// Counts the matching patients of `cohort`, whatever their age.
pub fn count_total<S>(
    store: &S,
    rule: &StatusRule,
    cohort: &Cohort,
    context: &TemporalContext,
) -> EvalResult<usize>
where
    S: ClinicalDataStore + ?Sized,
{
    Ok(matching_patients(store, rule, cohort, context, None)?.len())
}
