//! # aihd-service
//!
//! Command-line runner for the AIHD diabetic and hypertension report.
//!
//! The `aihd-report` binary reads its configuration from the environment,
//! loads an extract with the aihd-loader crate, evaluates the report with
//! the aihd-calculation crate and prints the bucket counts as JSON.

#![warn(missing_docs)]

mod config;
mod runner;

pub use config::{ConfigError, ServiceConfig, DATA_PATH_VAR, PARALLEL_VAR, REPORT_DATE_VAR};
pub use runner::{load_store, ReportRunner};
