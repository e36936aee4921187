//! Error types for report evaluation.

use thiserror::Error;

/// A failure reported by the clinical data store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A query could not be answered.
    #[error("data store query failed: {0}")]
    Query(String),

    /// The store could not be reached.
    #[error("data store unavailable: {0}")]
    Unavailable(String),
}

/// Errors that abort a report evaluation.
#[derive(Error, Debug)]
pub enum CalculationError {
    /// One or more dictionary terms did not resolve to a concept.
    #[error("unresolved concept terms: {}", terms.join(", "))]
    Configuration {
        /// Every term that failed to resolve.
        terms: Vec<String>,
    },

    /// The data store failed while the cohort was being evaluated.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for calculation operations.
pub type EvalResult<T> = Result<T, CalculationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_lists_terms() {
        let err = CalculationError::Configuration {
            terms: vec!["Hypertension type".to_string(), "Pre-eclampsia".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unresolved concept terms: Hypertension type, Pre-eclampsia"
        );
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err: CalculationError = StoreError::Unavailable("connection reset".into()).into();
        assert_eq!(err.to_string(), "data store unavailable: connection reset");
    }
}
