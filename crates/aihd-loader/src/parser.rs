//! Generic extract file parser.
//!
//! Provides a streaming parser for tab-delimited extract files with a
//! header row.

use std::fs::File;
use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::types::{LoadConfig, LoadError, LoadResult, LoadStats};

/// Trait for types that can be parsed from extract records.
pub trait ExtractRecord: Sized {
    /// Expected column names for this record type.
    const EXPECTED_COLUMNS: &'static [&'static str];

    /// Parse a record from a CSV StringRecord.
    fn from_record(record: &StringRecord) -> LoadResult<Self>;

    /// Returns true if the record has been voided or retired.
    fn is_voided(&self) -> bool;

    /// Returns true if this record passes the given filter config.
    fn passes_filter(&self, config: &LoadConfig) -> bool {
        config.include_voided || !self.is_voided()
    }
}

/// Checks a header row against the columns expected for `T`.
pub(crate) fn check_columns<T: ExtractRecord>(headers: &StringRecord) -> LoadResult<()> {
    let expected = T::EXPECTED_COLUMNS;

    if headers.len() < expected.len() {
        return Err(LoadError::InvalidHeader {
            expected: expected.len(),
            found: headers.len(),
        });
    }

    for (i, expected_col) in expected.iter().enumerate() {
        let found = headers.get(i).unwrap_or("");
        // Handle UTF-8 BOM at start of file
        let found = found.trim_start_matches('\u{feff}');
        if found != *expected_col {
            return Err(LoadError::UnexpectedColumn {
                position: i,
                expected: expected_col.to_string(),
                found: found.to_string(),
            });
        }
    }

    Ok(())
}

/// A streaming parser for extract files.
///
/// Reads record-by-record to avoid loading entire files into memory.
pub struct ExtractParser<R: Read, T: ExtractRecord> {
    reader: Reader<R>,
    config: LoadConfig,
    stats: LoadStats,
    _marker: PhantomData<T>,
}

impl<T: ExtractRecord> ExtractParser<BufReader<File>, T> {
    /// Creates a new parser from a file path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or has invalid headers.
    pub fn from_path<P: AsRef<Path>>(path: P, config: LoadConfig) -> LoadResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), config)
    }
}

impl<R: Read, T: ExtractRecord> ExtractParser<R, T> {
    /// Creates a new parser from a reader.
    pub fn from_reader(reader: R, config: LoadConfig) -> LoadResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(false)
            .quoting(false)
            .trim(csv::Trim::None)
            .from_reader(reader);

        Self::validate_headers(&mut csv_reader)?;

        Ok(Self {
            reader: csv_reader,
            config,
            stats: LoadStats::default(),
            _marker: PhantomData,
        })
    }

    /// Validates that the file has the expected column headers.
    fn validate_headers(reader: &mut Reader<R>) -> LoadResult<()> {
        check_columns::<T>(reader.headers()?)
    }

    /// Returns the statistics gathered so far.
    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    /// Parses all records into a Vec, applying filters.
    ///
    /// Stops at the first malformed record.
    pub fn parse_all(self) -> LoadResult<Vec<T>> {
        self.collect()
    }

    /// Parses records in batches, calling the callback for each batch.
    ///
    /// Returns the statistics for the whole file.
    pub fn parse_batched<F>(mut self, mut callback: F) -> LoadResult<LoadStats>
    where
        F: FnMut(Vec<T>) -> LoadResult<()>,
    {
        let batch_size = self.config.batch_size.max(1);
        let mut batch = Vec::with_capacity(batch_size);

        while let Some(record) = self.next() {
            batch.push(record?);
            if batch.len() >= batch_size {
                callback(std::mem::replace(&mut batch, Vec::with_capacity(batch_size)))?;
            }
        }

        // Process remaining records
        if !batch.is_empty() {
            callback(batch)?;
        }

        Ok(self.stats)
    }
}

impl<R: Read, T: ExtractRecord> Iterator for ExtractParser<R, T> {
    type Item = LoadResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    // Skip empty records
                    if record.is_empty() || record.iter().all(|f| f.trim().is_empty()) {
                        continue;
                    }

                    self.stats.total_records += 1;
                    match T::from_record(&record) {
                        Ok(parsed) => {
                            if parsed.passes_filter(&self.config) {
                                self.stats.loaded_records += 1;
                                return Some(Ok(parsed));
                            }
                            self.stats.skipped_records += 1;
                            continue;
                        }
                        Err(e) => return Some(Err(e)),
                    }
                }
                Ok(false) => return None, // End of file
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Helper functions for parsing extract field values.
///
/// The `optional_*` variants treat an empty (or whitespace-only) cell as
/// absent.
pub mod parse {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    use super::{LoadError, LoadResult};

    const DATE_FORMAT: &str = "%Y-%m-%d";
    const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Parses an unsigned identifier.
    pub fn id(value: &str) -> LoadResult<u64> {
        value.trim().parse::<u64>().map_err(|_| LoadError::InvalidId {
            value: value.to_string(),
        })
    }

    /// Parses an identifier that may be blank.
    pub fn optional_id(value: &str) -> LoadResult<Option<u64>> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        id(value).map(Some)
    }

    /// Parses a boolean from "0" or "1".
    pub fn boolean(value: &str) -> LoadResult<bool> {
        match value.trim() {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(LoadError::InvalidBoolean {
                value: value.to_string(),
            }),
        }
    }

    /// Parses a `YYYY-MM-DD` date.
    pub fn date(value: &str) -> LoadResult<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| LoadError::InvalidDate {
            value: value.to_string(),
        })
    }

    /// Parses a date that may be blank.
    pub fn optional_date(value: &str) -> LoadResult<Option<NaiveDate>> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        date(value).map(Some)
    }

    /// Parses a `YYYY-MM-DD HH:MM:SS` date-time. A bare date is read as
    /// midnight.
    pub fn datetime(value: &str) -> LoadResult<NaiveDateTime> {
        let trimmed = value.trim();
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT) {
            return Ok(parsed);
        }
        date(trimmed)
            .map(|d| d.and_time(NaiveTime::MIN))
            .map_err(|_| LoadError::InvalidDate {
                value: value.to_string(),
            })
    }

    /// Parses a floating point number that may be blank.
    pub fn optional_number(value: &str) -> LoadResult<Option<f64>> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<f64>()
            .map(Some)
            .map_err(|_| LoadError::InvalidNumber {
                value: value.to_string(),
            })
    }

    /// Returns the cell as text, or `None` when blank.
    pub fn optional_text(value: &str) -> Option<String> {
        if value.trim().is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}
