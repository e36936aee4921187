//! Well-known dictionary terms and report age bands.
//!
//! The terms are the keys the concept dictionary is queried with when a
//! report is prepared. A dictionary may resolve them by uuid, name or
//! numeric id, so deployments can point these at their own concept names.
//!
//! # Examples
//!
//! ```
//! use aihd_types::well_known;
//!
//! assert_eq!(well_known::REPORT_AGE_BANDS.len(), 5);
//! assert_eq!(well_known::REPORT_AGE_BANDS[1].0, "6To18");
//! ```

use crate::AgeRange;

// =============================================================================
// Visit type questions and answers
// =============================================================================

/// Question recording whether a diabetic visit is for a new or known patient.
pub const DIABETIC_VISIT_TYPE: &str = "Diabetic visit type";

/// Answer: first diabetic visit.
pub const NEW_DIABETIC_PATIENT: &str = "New diabetic patient";

/// Answer: follow-up of a known diabetic.
pub const KNOWN_DIABETIC_PATIENT: &str = "Known diabetic patient";

/// Question recording whether a hypertension visit is for a new or known patient.
pub const HYPERTENSION_VISIT_TYPE: &str = "Hypertension visit type";

/// Answer: first hypertension visit.
pub const NEW_HYPERTENSION_PATIENT: &str = "New hypertension patient";

/// Answer: follow-up of a known hypertensive.
pub const KNOWN_HYPERTENSION_PATIENT: &str = "Known hypertension patient";

// =============================================================================
// Hypertension type question and answers
// =============================================================================

/// Question recording the hypertension type diagnosed.
pub const HYPERTENSION_TYPE: &str = "Hypertension type";

/// Answer: mild hypertension.
pub const MILD_HYPERTENSION: &str = "Mild hypertension";

/// Answer: moderate hypertension.
pub const MODERATE_HYPERTENSION: &str = "Moderate hypertension";

/// Answer: severe hypertension.
pub const SEVERE_HYPERTENSION: &str = "Severe hypertension";

/// Answer: pre-eclampsia.
pub const PREECLAMPSIA: &str = "Pre-eclampsia";

// =============================================================================
// Age bands
// =============================================================================

/// Age bands of the diabetic and hypertension summary, keyed by the suffix
/// used in report bucket names.
///
/// The last two bands share age 60; existing reports count a 60-year-old in
/// both.
pub const REPORT_AGE_BANDS: [(&str, AgeRange); 5] = [
    ("ZeroTo5", AgeRange::new(0, 5)),
    ("6To18", AgeRange::new(6, 18)),
    ("19To35", AgeRange::new(19, 35)),
    ("36To60", AgeRange::new(36, 60)),
    ("60To120", AgeRange::new(60, 120)),
];

/// Bucket suffix of the unfiltered-by-age total.
pub const TOTALS_SUFFIX: &str = "Totals";
