//! Classification rules.
//!
//! A classification rule looks at the most recent answer a patient has to
//! one question concept and maps it to a label. The mapping is an ordered
//! list of `(answers, label)` pairs evaluated first-match-wins, so changing
//! the order of [`ClassificationRule::when_any`] calls changes the result.

use std::collections::BTreeMap;
use std::fmt;

use aihd_types::{ConceptId, HypertensionType, PatientId};

use crate::cohort::Cohort;
use crate::context::TemporalContext;
use crate::error::EvalResult;
use crate::resolver::last_observation;
use crate::result::{
    coded_obs_result_for_patient, result_for_patient, CalculationResult, CalculationResultMap,
};
use crate::store::ClinicalDataStore;

/// A calculation evaluated over a whole cohort under one temporal context.
pub trait PatientCalculation: Send + Sync {
    /// The per-patient value produced.
    type Output;

    /// Name recorded on every result this calculation produces.
    fn name(&self) -> &'static str;

    /// Evaluates the calculation for every patient of `cohort`.
    fn evaluate<S>(
        &self,
        store: &S,
        cohort: &Cohort,
        context: &TemporalContext,
    ) -> EvalResult<CalculationResultMap<Self::Output>>
    where
        S: ClinicalDataStore + ?Sized;
}

/// A closed set of classification labels.
///
/// `Default` is the "no applicable classification" label.
pub trait Label: Copy + Eq + Ord + Default + fmt::Debug + Send + Sync {
    /// The code used for this label in existing reports.
    fn code(self) -> &'static str;
}

impl Label for HypertensionType {
    fn code(self) -> &'static str {
        HypertensionType::code(self)
    }
}

/// One entry of a rule list: any of `answers` yields `label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRule<L> {
    /// Answer concepts that select this entry.
    pub answers: Vec<ConceptId>,
    /// Label assigned on a match.
    pub label: L,
}

/// Maps the latest coded answer to one question onto a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRule<L> {
    name: &'static str,
    question: ConceptId,
    rules: Vec<AnswerRule<L>>,
}

impl<L: Label> ClassificationRule<L> {
    /// Creates a rule over `question` with no entries yet.
    pub fn new(name: &'static str, question: ConceptId) -> Self {
        Self {
            name,
            question,
            rules: Vec::new(),
        }
    }

    /// Appends an entry. Entries are tried in the order they were added.
    pub fn when_any(mut self, answers: &[ConceptId], label: L) -> Self {
        self.rules.push(AnswerRule {
            answers: answers.to_vec(),
            label,
        });
        self
    }

    /// The question concept this rule reads.
    pub fn question(&self) -> ConceptId {
        self.question
    }

    /// The entries, in evaluation order.
    pub fn rules(&self) -> &[AnswerRule<L>] {
        &self.rules
    }

    /// Returns the label of the first entry containing `answer`, or the
    /// default label when there is no answer or no entry matches.
    pub fn classify_answer(&self, answer: Option<ConceptId>) -> L {
        let Some(answer) = answer else {
            return L::default();
        };
        self.rules
            .iter()
            .find(|rule| rule.answers.contains(&answer))
            .map(|rule| rule.label)
            .unwrap_or_default()
    }
}

impl<L: Label> PatientCalculation for ClassificationRule<L> {
    type Output = L;

    fn name(&self) -> &'static str {
        self.name
    }

    /// Every patient of `cohort` receives a result, unclassified patients
    /// included.
    fn evaluate<S>(
        &self,
        store: &S,
        cohort: &Cohort,
        context: &TemporalContext,
    ) -> EvalResult<CalculationResultMap<L>>
    where
        S: ClinicalDataStore + ?Sized,
    {
        let answers = last_observation(store, self.question, cohort, context)?;
        let mut results = CalculationResultMap::with_capacity(cohort.len());

        for &patient in cohort {
            let label = self.classify_answer(coded_obs_result_for_patient(&answers, patient));
            results.insert(patient, CalculationResult::new(label, self.name));
        }

        Ok(results)
    }
}

/// Returns the label computed for `patient`, or the default label.
pub fn label_for_patient<L: Label>(map: &CalculationResultMap<L>, patient: PatientId) -> L {
    result_for_patient(map, patient).copied().unwrap_or_default()
}

/// Counts how many patients received each label.
pub fn count_labels<L: Label>(map: &CalculationResultMap<L>) -> BTreeMap<L, usize> {
    let mut counts = BTreeMap::new();
    for (_, result) in map {
        let label = result.value().copied().unwrap_or_default();
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// Concepts read by the hypertension type rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HypertensionTypeConcepts {
    /// The hypertension type question.
    pub question: ConceptId,
    /// Mild hypertension answer.
    pub mild: ConceptId,
    /// Moderate hypertension answer.
    pub moderate: ConceptId,
    /// Severe hypertension answer.
    pub severe: ConceptId,
    /// Pre-eclampsia answer.
    pub preeclampsia: ConceptId,
}

/// Builds the hypertension type rule: mild, moderate or severe answers are
/// [`HypertensionType::Hypertension`], pre-eclampsia is
/// [`HypertensionType::Preeclampsia`].
pub fn hypertension_type_rule(
    concepts: &HypertensionTypeConcepts,
) -> ClassificationRule<HypertensionType> {
    ClassificationRule::new("hypertension_type", concepts.question)
        .when_any(
            &[concepts.mild, concepts.moderate, concepts.severe],
            HypertensionType::Hypertension,
        )
        .when_any(&[concepts.preeclampsia], HypertensionType::Preeclampsia)
}
