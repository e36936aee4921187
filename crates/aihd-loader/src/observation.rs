//! Observation file parser.
//!
//! Parses `obs*.txt` extract files. A row carries at most one of a coded,
//! numeric or text value; when several are filled the coded value wins,
//! then the numeric one.

use aihd_types::{ObsValue, Observation};
use csv::StringRecord;

use crate::parser::{parse, ExtractRecord};
use crate::types::LoadResult;

/// Expected columns in an observation file.
const OBSERVATION_COLUMNS: &[&str] = &[
    "obsId",
    "personId",
    "conceptId",
    "obsDatetime",
    "valueCoded",
    "valueNumeric",
    "valueText",
    "voided",
];

impl ExtractRecord for Observation {
    const EXPECTED_COLUMNS: &'static [&'static str] = OBSERVATION_COLUMNS;

    fn from_record(record: &StringRecord) -> LoadResult<Self> {
        let coded = parse::optional_id(record.get(4).unwrap_or(""))?;
        let numeric = parse::optional_number(record.get(5).unwrap_or(""))?;
        let text = parse::optional_text(record.get(6).unwrap_or(""));

        let value = match (coded, numeric, text) {
            (Some(concept), _, _) => ObsValue::Coded(concept),
            (None, Some(n), _) => ObsValue::Numeric(n),
            (None, None, Some(t)) => ObsValue::Text(t),
            (None, None, None) => ObsValue::Empty,
        };

        Ok(Observation {
            id: parse::id(record.get(0).unwrap_or(""))?,
            patient_id: parse::id(record.get(1).unwrap_or(""))?,
            concept_id: parse::id(record.get(2).unwrap_or(""))?,
            recorded: parse::datetime(record.get(3).unwrap_or(""))?,
            value,
            voided: parse::boolean(record.get(7).unwrap_or(""))?,
        })
    }

    fn is_voided(&self) -> bool {
        self.voided
    }
}
