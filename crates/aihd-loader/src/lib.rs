//! # aihd-loader
//!
//! Parser and in-memory store for AIHD extract files.
//!
//! An extract is a directory of three tab-delimited files with a header
//! row: `concept*.txt`, `patient*.txt` and `obs*.txt`. The loaded
//! [`ClinicalStore`] implements the calculation engine's
//! [`ClinicalDataStore`](aihd_calculation::ClinicalDataStore) and
//! [`ConceptDictionary`](aihd_calculation::ConceptDictionary) traits.
//!
//! ## Features
//!
//! - `parallel` (default): Enables parallel observation parsing via rayon.
//!
//! ## Usage
//!
//! ```ignore
//! use aihd_loader::{discover_data_files, ClinicalStore, LoadConfig};
//!
//! let files = discover_data_files("/path/to/extract")?;
//! let mut store = ClinicalStore::new();
//! store.load_all(&files, &LoadConfig::default())?;
//! println!("{} patients", store.patient_count());
//! ```

#![warn(missing_docs)]

mod concept;
mod loader;
mod observation;
mod parser;
mod patient;
mod store;
mod types;

pub use loader::discover_data_files;
pub use parser::{parse, ExtractParser, ExtractRecord};
pub use store::ClinicalStore;
pub use types::{DataFiles, LoadConfig, LoadError, LoadResult, LoadStats};

// Re-export aihd-types for convenience
pub use aihd_types;
