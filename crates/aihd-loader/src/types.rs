//! Loader-specific types for extract file processing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading extract files.
#[derive(Error, Debug)]
pub enum LoadError {
    /// I/O error reading an extract file.
    #[error("IO error reading extract file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid identifier.
    #[error("Invalid identifier: {value}")]
    InvalidId {
        /// The invalid value that was encountered.
        value: String,
    },

    /// Invalid date or date-time.
    #[error("Invalid date: {value}")]
    InvalidDate {
        /// The invalid date value.
        value: String,
    },

    /// Invalid boolean value.
    #[error("Invalid boolean value: {value} (expected 0 or 1)")]
    InvalidBoolean {
        /// The invalid boolean value.
        value: String,
    },

    /// Invalid numeric value.
    #[error("Invalid numeric value: {value}")]
    InvalidNumber {
        /// The invalid numeric value.
        value: String,
    },

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Required file missing from the extract directory.
    #[error("Required extract file not found: {file_type} in {directory}")]
    RequiredFileMissing {
        /// The type of file that was missing.
        file_type: String,
        /// The directory that was searched.
        directory: String,
    },

    /// Invalid header - column count mismatch.
    #[error("Invalid header: expected {expected} columns, found {found}")]
    InvalidHeader {
        /// Expected column count.
        expected: usize,
        /// Found column count.
        found: usize,
    },

    /// A data row whose field count differs from the header's.
    #[error("Row {record} has {found} fields, expected {expected}")]
    RowLength {
        /// Position of the data row, starting at 1.
        record: usize,
        /// Field count of the header.
        expected: usize,
        /// Field count of the row.
        found: usize,
    },

    /// Unexpected column name.
    #[error("Unexpected column '{found}' at position {position}, expected '{expected}'")]
    UnexpectedColumn {
        /// The column position.
        position: usize,
        /// Expected column name.
        expected: String,
        /// Found column name.
        found: String,
    },
}

/// Result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Configuration for extract parsing.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Whether voided or retired records are kept.
    pub include_voided: bool,
    /// Batch size for processing (affects memory usage).
    pub batch_size: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            include_voided: false,
            batch_size: 10_000,
        }
    }
}

/// Statistics from loading an extract file.
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Total records read from file.
    pub total_records: usize,
    /// Records kept in the store.
    pub loaded_records: usize,
    /// Records skipped because they were voided.
    pub skipped_records: usize,
}

impl LoadStats {
    /// Returns the percentage of records that were kept.
    pub fn load_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.loaded_records as f64 / self.total_records as f64) * 100.0
        }
    }
}

/// Discovered extract files in a data directory.
#[derive(Debug, Clone, Default)]
pub struct DataFiles {
    /// Path to the concept dictionary file.
    pub concept_file: Option<PathBuf>,
    /// Path to the patient file.
    pub patient_file: Option<PathBuf>,
    /// Path to the observation file.
    pub observation_file: Option<PathBuf>,
    /// Extract date taken from a filename suffix (YYYYMMDD).
    pub extract_date: Option<String>,
}

impl DataFiles {
    /// Creates a new empty DataFiles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if all required files are present.
    pub fn has_required_files(&self) -> bool {
        self.concept_file.is_some() && self.patient_file.is_some() && self.observation_file.is_some()
    }

    /// Returns a list of missing required files.
    pub fn missing_files(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.concept_file.is_none() {
            missing.push("Concept");
        }
        if self.patient_file.is_none() {
            missing.push("Patient");
        }
        if self.observation_file.is_none() {
            missing.push("Observation");
        }
        missing
    }
}
