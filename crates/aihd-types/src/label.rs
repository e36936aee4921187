//! Classification labels.
//!
//! Each classification rule produces a closed set of labels. The short
//! codes used by existing reports are only exposed through [`code`] and
//! serde.
//!
//! [`code`]: HypertensionType::code

/// Hypertension sub-category derived from the most recent hypertension
/// type observation.
///
/// # Examples
///
/// ```
/// use aihd_types::HypertensionType;
///
/// assert_eq!(HypertensionType::Hypertension.code(), "e");
/// assert_eq!(HypertensionType::from_code("f"), Some(HypertensionType::Preeclampsia));
/// assert_eq!(HypertensionType::default().code(), "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HypertensionType {
    /// No applicable classification.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = ""))]
    Unclassified,
    /// Mild, moderate or severe hypertension.
    #[cfg_attr(feature = "serde", serde(rename = "e"))]
    Hypertension,
    /// Pre-eclampsia.
    #[cfg_attr(feature = "serde", serde(rename = "f"))]
    Preeclampsia,
}

impl HypertensionType {
    /// Every label, unclassified first.
    pub const ALL: [Self; 3] = [Self::Unclassified, Self::Hypertension, Self::Preeclampsia];

    /// Returns the report code for this label.
    pub fn code(self) -> &'static str {
        match self {
            Self::Unclassified => "",
            Self::Hypertension => "e",
            Self::Preeclampsia => "f",
        }
    }

    /// Parses a report code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.code() == code)
    }
}
