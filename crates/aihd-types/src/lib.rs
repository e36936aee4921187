//! # aihd-types
//!
//! Type definitions for AIHD patient, observation and concept records.
//!
//! This crate provides the plain data structures shared by the calculation
//! engine, the extract loader and the report service.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!
//! ## Usage
//!
//! ```rust
//! use aihd_types::{AgeRange, Patient, Sex};
//! use chrono::NaiveDate;
//!
//! let patient = Patient {
//!     id: 1,
//!     sex: Sex::from_code("M"),
//!     birth_date: NaiveDate::from_ymd_opt(2017, 1, 15),
//!     dead: false,
//!     death_date: None,
//!     voided: false,
//! };
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let age = patient.age_on(today).unwrap();
//! assert!(AgeRange::new(6, 18).contains(age));
//! ```

#![warn(missing_docs)]

mod age;
mod concept;
mod ids;
mod label;
mod observation;
mod patient;
pub mod well_known;

// Re-export all public types at crate root
pub use age::AgeRange;
pub use concept::ConceptRecord;
pub use ids::{ConceptId, ObsId, PatientId};
pub use label::HypertensionType;
pub use observation::{ObsValue, Observation};
pub use patient::{Patient, Sex};
