//! Concept dictionary entry.

use crate::ConceptId;

/// A concept from the concept dictionary extract.
///
/// # Examples
///
/// ```
/// use aihd_types::ConceptRecord;
///
/// let concept = ConceptRecord {
///     id: 1065,
///     uuid: "1065AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA".to_string(),
///     name: "New hypertension patient".to_string(),
///     retired: false,
/// };
///
/// assert!(concept.matches_name("new HYPERTENSION patient"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConceptRecord {
    /// Primary key of the concept.
    pub id: ConceptId,
    /// Globally unique identifier.
    pub uuid: String,
    /// Preferred name.
    pub name: String,
    /// Whether the concept has been retired.
    pub retired: bool,
}

impl ConceptRecord {
    /// Returns true if `name` equals this concept's name, ignoring case
    /// and surrounding whitespace.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}
