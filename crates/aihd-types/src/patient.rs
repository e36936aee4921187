//! Patient demographic record.

use chrono::{Datelike, NaiveDate};

use crate::PatientId;

/// Administrative sex of a patient.
///
/// The data store records gender as `M` or `F`. Any other code is treated
/// as unknown and kept as `None` on the [`Patient`], so that such patients
/// fall into neither partition.
///
/// # Examples
///
/// ```
/// use aihd_types::Sex;
///
/// assert_eq!(Sex::from_code("M"), Some(Sex::Male));
/// assert_eq!(Sex::from_code("f"), Some(Sex::Female));
/// assert_eq!(Sex::from_code("U"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sex {
    /// Recorded as `M`.
    #[cfg_attr(feature = "serde", serde(rename = "M"))]
    Male,
    /// Recorded as `F`.
    #[cfg_attr(feature = "serde", serde(rename = "F"))]
    Female,
}

impl Sex {
    /// Parses a gender code. Matching is case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "M" | "m" => Some(Self::Male),
            "F" | "f" => Some(Self::Female),
            _ => None,
        }
    }

    /// Returns the gender code stored for this sex.
    pub fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }

    /// Returns the capitalised name used in report keys.
    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// A patient from the demographic extract.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patient {
    /// Unique identifier for this patient.
    pub id: PatientId,
    /// Recorded sex, `None` when the gender code is missing or unrecognised.
    pub sex: Option<Sex>,
    /// Date of birth, if known.
    pub birth_date: Option<NaiveDate>,
    /// Whether the patient has been marked as deceased.
    pub dead: bool,
    /// Date of death, if recorded.
    pub death_date: Option<NaiveDate>,
    /// Whether the record has been voided (logically deleted).
    pub voided: bool,
}

impl Patient {
    /// Returns the age in completed years on `date`.
    ///
    /// The year count is decremented when the birthday has not yet been
    /// reached in `date`'s year. Returns `None` when the birth date is
    /// unknown or lies after `date`.
    ///
    /// # Examples
    ///
    /// ```
    /// use aihd_types::Patient;
    /// use chrono::NaiveDate;
    ///
    /// let patient = Patient {
    ///     id: 1,
    ///     sex: None,
    ///     birth_date: NaiveDate::from_ymd_opt(2000, 6, 15),
    ///     dead: false,
    ///     death_date: None,
    ///     voided: false,
    /// };
    ///
    /// let before_birthday = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
    /// let on_birthday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    /// assert_eq!(patient.age_on(before_birthday), Some(23));
    /// assert_eq!(patient.age_on(on_birthday), Some(24));
    /// ```
    pub fn age_on(&self, date: NaiveDate) -> Option<u32> {
        let birth = self.birth_date?;
        if birth > date {
            return None;
        }

        let mut years = date.year() - birth.year();
        if (date.month(), date.day()) < (birth.month(), birth.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }

    /// Returns true if the patient is deceased as of `date`.
    ///
    /// A patient flagged dead without a recorded death date counts as dead
    /// on every date. A recorded death date after `date` means the patient
    /// was still alive on `date`.
    pub fn is_dead_on(&self, date: NaiveDate) -> bool {
        if !self.dead {
            return false;
        }
        match self.death_date {
            Some(death) => death <= date,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_patient(birth: Option<NaiveDate>) -> Patient {
        Patient {
            id: 7,
            sex: Some(Sex::Female),
            birth_date: birth,
            dead: false,
            death_date: None,
            voided: false,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sex_codes() {
        assert_eq!(Sex::from_code(" M "), Some(Sex::Male));
        assert_eq!(Sex::from_code("F"), Some(Sex::Female));
        assert_eq!(Sex::from_code(""), None);
        assert_eq!(Sex::from_code("O"), None);
        assert_eq!(Sex::Male.code(), "M");
        assert_eq!(Sex::Female.label(), "Female");
    }

    #[test]
    fn test_age_on_birthday_boundary() {
        let patient = make_patient(Some(date(2017, 3, 1)));
        assert_eq!(patient.age_on(date(2024, 2, 29)), Some(6));
        assert_eq!(patient.age_on(date(2024, 3, 1)), Some(7));
        assert_eq!(patient.age_on(date(2017, 3, 1)), Some(0));
    }

    #[test]
    fn test_age_unknown_or_future_birth() {
        assert_eq!(make_patient(None).age_on(date(2024, 1, 1)), None);
        let unborn = make_patient(Some(date(2025, 1, 1)));
        assert_eq!(unborn.age_on(date(2024, 1, 1)), None);
    }

    #[test]
    fn test_is_dead_on() {
        let mut patient = make_patient(Some(date(1950, 1, 1)));
        assert!(!patient.is_dead_on(date(2024, 1, 1)));

        patient.dead = true;
        assert!(patient.is_dead_on(date(2024, 1, 1)));

        patient.death_date = Some(date(2024, 2, 1));
        assert!(!patient.is_dead_on(date(2024, 1, 31)));
        assert!(patient.is_dead_on(date(2024, 2, 1)));
    }
}
