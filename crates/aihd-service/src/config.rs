//! Service configuration read from the environment.

use std::path::PathBuf;

use aihd_calculation::TemporalContext;
use aihd_loader::LoadConfig;
use chrono::{Local, NaiveDate};
use thiserror::Error;

const DEFAULT_DATA_PATH: &str = "./data";

/// Environment variable naming the extract directory.
pub const DATA_PATH_VAR: &str = "AIHD_DATA_PATH";
/// Environment variable holding the report date (`YYYY-MM-DD`).
pub const REPORT_DATE_VAR: &str = "AIHD_REPORT_DATE";
/// Environment variable enabling parallel loading and evaluation.
pub const PARALLEL_VAR: &str = "AIHD_PARALLEL";

/// Errors in the service configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The report date is not a `YYYY-MM-DD` date.
    #[error("Invalid report date in {var}: {value} (expected YYYY-MM-DD)")]
    InvalidReportDate {
        /// The variable that was read.
        var: &'static str,
        /// The invalid value.
        value: String,
    },

    /// A flag is neither true nor false.
    #[error("Invalid flag in {var}: {value} (expected 1, 0, true or false)")]
    InvalidFlag {
        /// The variable that was read.
        var: &'static str,
        /// The invalid value.
        value: String,
    },
}

/// Runtime configuration of the report runner.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding the extract files.
    pub data_path: PathBuf,
    /// The day the report is run for.
    pub report_date: NaiveDate,
    /// Whether to load and evaluate in parallel.
    pub parallel: bool,
    /// Extract parsing options.
    pub load: LoadConfig,
}

impl ServiceConfig {
    /// Reads the configuration from the process environment.
    ///
    /// The report date defaults to today in local time.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok(), Local::now().date_naive())
    }

    /// Reads the configuration through `lookup`, falling back to `today`
    /// when no report date is set. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F, today: NaiveDate) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let data_path = read(DATA_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let report_date = match read(REPORT_DATE_VAR) {
            Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
                ConfigError::InvalidReportDate {
                    var: REPORT_DATE_VAR,
                    value,
                }
            })?,
            None => today,
        };

        let parallel = match read(PARALLEL_VAR) {
            Some(value) => parse_flag(PARALLEL_VAR, value)?,
            None => false,
        };

        Ok(Self {
            data_path,
            report_date,
            parallel,
            load: LoadConfig::default(),
        })
    }

    /// The reference instant: the last second of the report date.
    pub fn context(&self) -> TemporalContext {
        TemporalContext::end_of_day(self.report_date)
    }
}

fn parse_flag(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn config_from(vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|var| env.get(var).cloned(), today())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.data_path, PathBuf::from("./data"));
        assert_eq!(config.report_date, today());
        assert!(!config.parallel);
        assert!(!config.load.include_voided);
    }

    #[test]
    fn test_values_from_environment() {
        let config = config_from(&[
            (DATA_PATH_VAR, "/srv/extract"),
            (REPORT_DATE_VAR, "2023-12-31"),
            (PARALLEL_VAR, "TRUE"),
        ])
        .unwrap();

        assert_eq!(config.data_path, PathBuf::from("/srv/extract"));
        assert_eq!(config.report_date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert!(config.parallel);
        assert_eq!(config.context().now().to_string(), "2023-12-31 23:59:59");
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config_from(&[(DATA_PATH_VAR, " "), (REPORT_DATE_VAR, "")]).unwrap();
        assert_eq!(config.data_path, PathBuf::from("./data"));
        assert_eq!(config.report_date, today());
    }

    #[test]
    fn test_invalid_values() {
        let err = config_from(&[(REPORT_DATE_VAR, "01/03/2024")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidReportDate {
                var: REPORT_DATE_VAR,
                value: "01/03/2024".to_string(),
            }
        );

        let err = config_from(&[(PARALLEL_VAR, "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFlag { .. }));
        assert!(err.to_string().contains("AIHD_PARALLEL"));
    }
}
