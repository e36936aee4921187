//! Resolution of the dictionary terms a report needs.
//!
//! All terms are looked up once, before any cohort is evaluated. A term
//! that does not resolve is a configuration error.

use aihd_types::{well_known, ConceptId};

use crate::aggregate::StatusRule;
use crate::error::{CalculationError, EvalResult};
use crate::rules::HypertensionTypeConcepts;
use crate::store::ConceptDictionary;

/// Concept identifiers used by the diabetic and hypertension report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConcepts {
    /// New or known diabetic patient.
    pub diabetic: StatusRule,
    /// New or known hypertensive patient.
    pub hypertension: StatusRule,
    /// Hypertension type question and answers.
    pub hypertension_type: HypertensionTypeConcepts,
}

impl ReportConcepts {
    /// Looks up every term in `dictionary`.
    ///
    /// # Errors
    /// Returns [`CalculationError::Configuration`] naming every term that
    /// could not be resolved.
    pub fn resolve<D>(dictionary: &D) -> EvalResult<Self>
    where
        D: ConceptDictionary + ?Sized,
    {
        let mut terms = TermLookup::new(dictionary);

        let diabetic = StatusRule {
            key: "diabetic",
            question: terms.get(well_known::DIABETIC_VISIT_TYPE),
            new_answer: terms.get(well_known::NEW_DIABETIC_PATIENT),
            known_answer: terms.get(well_known::KNOWN_DIABETIC_PATIENT),
        };
        let hypertension = StatusRule {
            key: "hypertension",
            question: terms.get(well_known::HYPERTENSION_VISIT_TYPE),
            new_answer: terms.get(well_known::NEW_HYPERTENSION_PATIENT),
            known_answer: terms.get(well_known::KNOWN_HYPERTENSION_PATIENT),
        };
        let hypertension_type = HypertensionTypeConcepts {
            question: terms.get(well_known::HYPERTENSION_TYPE),
            mild: terms.get(well_known::MILD_HYPERTENSION),
            moderate: terms.get(well_known::MODERATE_HYPERTENSION),
            severe: terms.get(well_known::SEVERE_HYPERTENSION),
            preeclampsia: terms.get(well_known::PREECLAMPSIA),
        };

        terms.finish()?;

        Ok(Self {
            diabetic,
            hypertension,
            hypertension_type,
        })
    }

    /// The status rules counted by the report, in key order.
    pub fn status_rules(&self) -> [&StatusRule; 2] {
        [&self.diabetic, &self.hypertension]
    }
}

/// Collects lookups and remembers every term that failed.
struct TermLookup<'a, D: ?Sized> {
    dictionary: &'a D,
    missing: Vec<String>,
}

impl<'a, D: ConceptDictionary + ?Sized> TermLookup<'a, D> {
    fn new(dictionary: &'a D) -> Self {
        Self {
            dictionary,
            missing: Vec::new(),
        }
    }

    /// Returns the concept id, or 0 after recording the term as missing.
    fn get(&mut self, term: &str) -> ConceptId {
        match self.dictionary.lookup(term) {
            Some(id) => id,
            None => {
                self.missing.push(term.to_string());
                0
            }
        }
    }

    fn finish(self) -> EvalResult<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(CalculationError::Configuration {
                terms: self.missing,
            })
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::testing::FakeDictionary;

    pub(crate) fn full_dictionary() -> FakeDictionary {
        FakeDictionary::with_terms([
            (well_known::DIABETIC_VISIT_TYPE, 10),
            (well_known::NEW_DIABETIC_PATIENT, 11),
            (well_known::KNOWN_DIABETIC_PATIENT, 12),
            (well_known::HYPERTENSION_VISIT_TYPE, 20),
            (well_known::NEW_HYPERTENSION_PATIENT, 21),
            (well_known::KNOWN_HYPERTENSION_PATIENT, 22),
            (well_known::HYPERTENSION_TYPE, 30),
            (well_known::MILD_HYPERTENSION, 31),
            (well_known::MODERATE_HYPERTENSION, 32),
            (well_known::SEVERE_HYPERTENSION, 33),
            (well_known::PREECLAMPSIA, 34),
        ])
    }

    #[test]
    fn test_resolve_all_terms() {
        let concepts = ReportConcepts::resolve(&full_dictionary()).unwrap();
        assert_eq!(concepts.diabetic.question, 10);
        assert_eq!(concepts.diabetic.known_answer, 12);
        assert_eq!(concepts.hypertension.new_answer, 21);
        assert_eq!(concepts.hypertension_type.preeclampsia, 34);
        assert_eq!(
            concepts.status_rules().map(|rule| rule.key),
            ["diabetic", "hypertension"]
        );
    }

    #[test]
    fn test_missing_terms_are_all_reported() {
        let dictionary = FakeDictionary::with_terms([(well_known::DIABETIC_VISIT_TYPE, 10)]);
        let err = ReportConcepts::resolve(&dictionary).unwrap_err();

        match err {
            CalculationError::Configuration { terms } => {
                assert_eq!(terms.len(), 10);
                assert!(terms.contains(&well_known::PREECLAMPSIA.to_string()));
                assert!(!terms.contains(&well_known::DIABETIC_VISIT_TYPE.to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
