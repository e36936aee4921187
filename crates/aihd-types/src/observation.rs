//! Clinical observation record.

use chrono::NaiveDateTime;

use crate::{ConceptId, ObsId, PatientId};

/// The value carried by an observation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ObsValue {
    /// A coded answer referencing another concept.
    Coded(ConceptId),
    /// A numeric measurement.
    Numeric(f64),
    /// Free text.
    Text(String),
    /// No value recorded.
    Empty,
}

/// A clinical fact recorded about a patient.
///
/// Several observations of the same concept may exist per patient; reports
/// only ever look at the most recent one.
///
/// # Examples
///
/// ```
/// use aihd_types::{Observation, ObsValue};
/// use chrono::NaiveDate;
///
/// let obs = Observation {
///     id: 1,
///     patient_id: 12,
///     concept_id: 5089,
///     recorded: NaiveDate::from_ymd_opt(2024, 1, 1)
///         .unwrap()
///         .and_hms_opt(9, 30, 0)
///         .unwrap(),
///     value: ObsValue::Coded(1065),
///     voided: false,
/// };
///
/// assert_eq!(obs.value_coded(), Some(1065));
/// assert_eq!(obs.value_numeric(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    /// Internal record identifier.
    pub id: ObsId,
    /// The patient the observation is about.
    pub patient_id: PatientId,
    /// The question concept that was observed.
    pub concept_id: ConceptId,
    /// When the observation was recorded.
    pub recorded: NaiveDateTime,
    /// The recorded value.
    pub value: ObsValue,
    /// Whether the record has been voided.
    pub voided: bool,
}

impl Observation {
    /// Returns the coded answer, if this is a coded observation.
    pub fn value_coded(&self) -> Option<ConceptId> {
        match self.value {
            ObsValue::Coded(id) => Some(id),
            _ => None,
        }
    }

    /// Returns the numeric value, if this is a numeric observation.
    pub fn value_numeric(&self) -> Option<f64> {
        match self.value {
            ObsValue::Numeric(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the text value, if this is a text observation.
    pub fn value_text(&self) -> Option<&str> {
        match &self.value {
            ObsValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if the observation carries any value.
    pub fn has_value(&self) -> bool {
        !matches!(self.value, ObsValue::Empty)
    }
}
