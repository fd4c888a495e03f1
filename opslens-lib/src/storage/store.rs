use crate::Result;
use crate::metrics::{MetricKey, MetricSet, Unit};
use crate::runs::{Artifacts, Run, RunId, RunRecord};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// One stored metric of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metric {
    pub key: MetricKey,
    pub value: f64,
    pub unit: Option<Unit>,
}

/// The average of a metric over the runs of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyValue {
    pub day: NaiveDate,
    pub value: f64,
}

/// Persistence for runs, their metrics, and their artifacts.
///
/// Lookups of unknown runs yield `None` or empty collections rather than errors.
pub trait Store: Send + Sync {
    /// Record a new run.
    ///
    /// # Errors
    ///
    /// Fails if a run with the same id already exists or the write fails.
    fn create_run(&self, run: &Run) -> Result<()>;

    /// Insert or replace metrics of an existing run.
    ///
    /// # Errors
    ///
    /// Fails if the run does not exist or the write fails.
    fn upsert_metrics(&self, run_id: RunId, metrics: &MetricSet) -> Result<()>;

    /// Insert or replace artifacts of an existing run.
    ///
    /// # Errors
    ///
    /// Fails if the run does not exist or the write fails.
    fn upsert_artifacts(&self, run_id: RunId, artifacts: &Artifacts) -> Result<()>;

    /// # Errors
    ///
    /// Fails if the store cannot be read.
    fn get_run(&self, run_id: RunId) -> Result<Option<Run>>;

    /// The metrics of a run sorted by key name, with their units.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be read.
    fn get_metrics(&self, run_id: RunId) -> Result<Vec<Metric>>;

    /// # Errors
    ///
    /// Fails if the store cannot be read.
    fn get_artifact(&self, run_id: RunId, name: &str) -> Result<Option<String>>;

    /// Up to `limit` runs, newest first.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be read.
    fn list_runs(&self, limit: usize) -> Result<Vec<Run>>;

    /// Daily averages of `key` over the runs of `host` created at or after `since`, oldest day first.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be read.
    fn metric_time_series(&self, host: &str, key: MetricKey, since: DateTime<Utc>) -> Result<Vec<DailyValue>>;

    /// # Errors
    ///
    /// Fails if the store cannot be read.
    fn metrics_map(&self, run_id: RunId) -> Result<MetricSet>;

    /// Persist everything a parse produced.
    ///
    /// Implementations override this so readers never observe the run without its metrics.
    ///
    /// # Errors
    ///
    /// Fails if any part of the write fails.
    fn commit(&self, record: &RunRecord) -> Result<()> {
        self.create_run(&record.run)?;
        self.upsert_metrics(record.run.id, &record.metrics)?;
        self.upsert_artifacts(record.run.id, &record.artifacts)
    }
}
