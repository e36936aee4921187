//! Loads an extract and runs the report over it.

use std::collections::BTreeMap;
use std::path::Path;

use aihd_calculation::{
    DiabeticHypertensionReport, EvalResult, ReportConcepts, ReportCounts, TemporalContext,
};
use aihd_loader::{discover_data_files, ClinicalStore, LoadConfig, LoadResult};
use aihd_types::HypertensionType;
use tracing::info;

/// Discovers and loads the extract under `path`.
pub fn load_store<P: AsRef<Path>>(
    path: P,
    config: &LoadConfig,
    parallel: bool,
) -> LoadResult<ClinicalStore> {
    let files = discover_data_files(path)?;
    info!("Discovered extract files: {:?}", files.extract_date);

    let mut store = ClinicalStore::new();
    if parallel {
        #[cfg(feature = "parallel")]
        store.load_all_parallel(&files, config)?;
        #[cfg(not(feature = "parallel"))]
        {
            tracing::warn!("Parallel loading requested but not compiled in");
            store.load_all(&files, config)?;
        }
    } else {
        store.load_all(&files, config)?;
    }

    info!(
        "Loaded {} concepts, {} patients, {} observations",
        store.concept_count(),
        store.patient_count(),
        store.observation_count()
    );

    Ok(store)
}

/// A loaded store together with the report resolved against it.
#[derive(Debug)]
pub struct ReportRunner {
    store: ClinicalStore,
    report: DiabeticHypertensionReport,
}

impl ReportRunner {
    /// Resolves the report's concepts against the store's dictionary.
    ///
    /// # Errors
    /// Fails with a configuration error when any report term is missing.
    pub fn new(store: ClinicalStore) -> EvalResult<Self> {
        let concepts = ReportConcepts::resolve(&store)?;
        Ok(Self {
            store,
            report: DiabeticHypertensionReport::new(concepts),
        })
    }

    /// Returns a reference to the store.
    pub fn store(&self) -> &ClinicalStore {
        &self.store
    }

    /// Returns the resolved report.
    pub fn report(&self) -> &DiabeticHypertensionReport {
        &self.report
    }

    /// Evaluates every report bucket.
    pub fn run(&self, context: &TemporalContext, parallel: bool) -> EvalResult<ReportCounts> {
        info!("Evaluating report as of {}", context.now());

        if parallel {
            #[cfg(feature = "parallel")]
            return self.report.evaluate_parallel(&self.store, context);
            #[cfg(not(feature = "parallel"))]
            tracing::warn!("Parallel evaluation requested but not compiled in");
        }

        self.report.evaluate(&self.store, context)
    }

    /// Counts the alive patients per hypertension type.
    pub fn hypertension_types(
        &self,
        context: &TemporalContext,
    ) -> EvalResult<BTreeMap<HypertensionType, usize>> {
        self.report.hypertension_types(&self.store, context)
    }
}
