//! Concept dictionary file parser.
//!
//! Parses `concept*.txt` extract files.

use aihd_types::ConceptRecord;
use csv::StringRecord;

use crate::parser::{parse, ExtractRecord};
use crate::types::LoadResult;

/// Expected columns in a concept file.
const CONCEPT_COLUMNS: &[&str] = &["conceptId", "uuid", "name", "retired"];

impl ExtractRecord for ConceptRecord {
    const EXPECTED_COLUMNS: &'static [&'static str] = CONCEPT_COLUMNS;

    fn from_record(record: &StringRecord) -> LoadResult<Self> {
        Ok(ConceptRecord {
            id: parse::id(record.get(0).unwrap_or(""))?,
            uuid: record.get(1).unwrap_or("").trim().to_string(),
            name: record.get(2).unwrap_or("").trim().to_string(),
            retired: parse::boolean(record.get(3).unwrap_or(""))?,
        })
    }

    fn is_voided(&self) -> bool {
        self.retired
    }
}
