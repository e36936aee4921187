//! Patient demographic file parser.
//!
//! Parses `patient*.txt` extract files.

use aihd_types::{Patient, Sex};
use csv::StringRecord;

use crate::parser::{parse, ExtractRecord};
use crate::types::LoadResult;

/// Expected columns in a patient file.
const PATIENT_COLUMNS: &[&str] = &[
    "patientId",
    "gender",
    "birthdate",
    "dead",
    "deathDate",
    "voided",
];

impl ExtractRecord for Patient {
    const EXPECTED_COLUMNS: &'static [&'static str] = PATIENT_COLUMNS;

    fn from_record(record: &StringRecord) -> LoadResult<Self> {
        Ok(Patient {
            id: parse::id(record.get(0).unwrap_or(""))?,
            sex: Sex::from_code(record.get(1).unwrap_or("")),
            birth_date: parse::optional_date(record.get(2).unwrap_or(""))?,
            dead: parse::boolean(record.get(3).unwrap_or(""))?,
            death_date: parse::optional_date(record.get(4).unwrap_or(""))?,
            voided: parse::boolean(record.get(5).unwrap_or(""))?,
        })
    }

    fn is_voided(&self) -> bool {
        self.voided
    }
}
