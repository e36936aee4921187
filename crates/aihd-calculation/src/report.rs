//! Diabetic and hypertension patient summary.
//!
//! Counts alive patients with a new or known diabetic visit and a new or
//! known hypertension visit, split by sex and age band. Keys follow the
//! pattern `{rule}{Sex}{band}`, e.g. `diabeticMale19To35` or
//! `hypertensionFemaleTotals`.

use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use aihd_types::{well_known, AgeRange, HypertensionType, Sex};

use crate::aggregate::{count_in_range, count_total, StatusRule};
use crate::cohort::{all_patients, Cohort};
use crate::context::TemporalContext;
use crate::error::EvalResult;
use crate::filters::{filter_alive, filter_by_sex};
use crate::metadata::ReportConcepts;
use crate::rules::{count_labels, hypertension_type_rule, PatientCalculation};
use crate::store::ClinicalDataStore;

/// Named bucket counts, serialized as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct ReportCounts(BTreeMap<String, usize>);

impl ReportCounts {
    /// Returns the count of a bucket.
    pub fn get(&self, key: &str) -> Option<usize> {
        self.0.get(key).copied()
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no buckets.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over buckets in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(key, count)| (key.as_str(), *count))
    }
}

impl FromIterator<(String, usize)> for ReportCounts {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Alive patients split by sex.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SexPartitions {
    /// Alive male patients.
    pub male: Cohort,
    /// Alive female patients.
    pub female: Cohort,
}

impl SexPartitions {
    /// Returns the partition for `sex`.
    pub fn get(&self, sex: Sex) -> &Cohort {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }
}

/// One cell of the report.
#[derive(Debug, Clone)]
struct Bucket<'a> {
    key: String,
    rule: &'a StatusRule,
    sex: Sex,
    range: Option<AgeRange>,
}

/// The diabetic and hypertension summary report.
#[derive(Debug, Clone)]
pub struct DiabeticHypertensionReport {
    concepts: ReportConcepts,
}

impl DiabeticHypertensionReport {
    /// Creates the report over already resolved concepts.
    pub fn new(concepts: ReportConcepts) -> Self {
        Self { concepts }
    }

    /// The concepts the report reads.
    pub fn concepts(&self) -> &ReportConcepts {
        &self.concepts
    }

    /// Every bucket key, in evaluation order.
    pub fn bucket_keys(&self) -> Vec<String> {
        self.buckets().into_iter().map(|bucket| bucket.key).collect()
    }

    fn buckets(&self) -> Vec<Bucket<'_>> {
        let mut buckets = Vec::new();
        for rule in self.concepts.status_rules() {
            for sex in [Sex::Male, Sex::Female] {
                for (suffix, range) in well_known::REPORT_AGE_BANDS {
                    buckets.push(Bucket {
                        key: format!("{}{}{}", rule.key, sex.label(), suffix),
                        rule,
                        sex,
                        range: Some(range),
                    });
                }
                buckets.push(Bucket {
                    key: format!("{}{}{}", rule.key, sex.label(), well_known::TOTALS_SUFFIX),
                    rule,
                    sex,
                    range: None,
                });
            }
        }
        buckets
    }

    /// Returns the alive patients of the store, split by sex.
    pub fn partition<S>(store: &S, context: &TemporalContext) -> EvalResult<SexPartitions>
    where
        S: ClinicalDataStore + ?Sized,
    {
        let everyone = all_patients(store)?;
        let alive = filter_alive(store, &everyone, context)?;
        let partitions = SexPartitions {
            male: filter_by_sex(store, &alive, Sex::Male)?,
            female: filter_by_sex(store, &alive, Sex::Female)?,
        };

        info!(
            patients = everyone.len(),
            alive = alive.len(),
            male = partitions.male.len(),
            female = partitions.female.len(),
            "partitioned cohort"
        );

        Ok(partitions)
    }

    fn count_bucket<S>(
        store: &S,
        bucket: &Bucket<'_>,
        partitions: &SexPartitions,
        context: &TemporalContext,
    ) -> EvalResult<(String, usize)>
    where
        S: ClinicalDataStore + ?Sized,
    {
        let cohort = partitions.get(bucket.sex);
        let count = match bucket.range {
            Some(range) => count_in_range(store, bucket.rule, cohort, context, range)?,
            None => count_total(store, bucket.rule, cohort, context)?,
        };
        debug!(bucket = %bucket.key, count, "evaluated bucket");
        Ok((bucket.key.clone(), count))
    }

    /// Evaluates every bucket, one after another.
    ///
    /// # Errors
    /// Any store failure aborts the evaluation; no partial counts are returned.
    pub fn evaluate<S>(&self, store: &S, context: &TemporalContext) -> EvalResult<ReportCounts>
    where
        S: ClinicalDataStore + ?Sized,
    {
        let partitions = Self::partition(store, context)?;
        self.buckets()
            .iter()
            .map(|bucket| Self::count_bucket(store, bucket, &partitions, context))
            .collect()
    }

    /// Evaluates the buckets concurrently using rayon.
    ///
    /// Produces the same counts as [`evaluate`](Self::evaluate).
    #[cfg(feature = "parallel")]
    pub fn evaluate_parallel<S>(
        &self,
        store: &S,
        context: &TemporalContext,
    ) -> EvalResult<ReportCounts>
    where
        S: ClinicalDataStore + ?Sized,
    {
        let partitions = Self::partition(store, context)?;
        let counts: Vec<(String, usize)> = self
            .buckets()
            .par_iter()
            .map(|bucket| Self::count_bucket(store, bucket, &partitions, context))
            .collect::<EvalResult<_>>()?;
        Ok(counts.into_iter().collect())
    }

    /// Classifies the alive patients by hypertension type and counts each
    /// label.
    pub fn hypertension_types<S>(
        &self,
        store: &S,
        context: &TemporalContext,
    ) -> EvalResult<BTreeMap<HypertensionType, usize>>
    where
        S: ClinicalDataStore + ?Sized,
    {
        let everyone = all_patients(store)?;
        let alive = filter_alive(store, &everyone, context)?;
        let rule = hypertension_type_rule(&self.concepts.hypertension_type);
        let labels = rule.evaluate(store, &alive, context)?;
        Ok(count_labels(&labels))
    }
}
