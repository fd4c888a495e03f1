use super::queries::{daily_series, metric_rows, newest_first};
use super::{DailyValue, Metric, Store};
use crate::Result;
use crate::archive::BundleFile;
use crate::metrics::{MetricKey, MetricSet};
use crate::runs::{Artifacts, Run, RunId, RunRecord};
use chrono::{DateTime, Utc};
use core::str::FromStr;
use ohno::{app_err, bail};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A [`Store`] that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<RunId, RunRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<RunId, RunRecord>>> {
        self.records.read().map_err(|e| app_err!("memory store lock poisoned: {e}"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<RunId, RunRecord>>> {
        self.records.write().map_err(|e| app_err!("memory store lock poisoned: {e}"))
    }

    fn update(&self, run_id: RunId, f: impl FnOnce(&mut RunRecord)) -> Result<()> {
        let mut records = self.write()?;
        let record = records.get_mut(&run_id).ok_or_else(|| app_err!("run '{run_id}' not found"))?;
        f(record);
        Ok(())
    }
}

impl Store for MemoryStore {
    fn create_run(&self, run: &Run) -> Result<()> {
        let mut records = self.write()?;
        if records.contains_key(&run.id) {
            bail!("run '{}' already exists", run.id);
        }

        let record = RunRecord {
            run: run.clone(),
            metrics: MetricSet::new(),
            artifacts: Artifacts::new(),
        };
        let _ = records.insert(run.id, record);
        Ok(())
    }

    fn upsert_metrics(&self, run_id: RunId, metrics: &MetricSet) -> Result<()> {
        self.update(run_id, |record| record.metrics.extend(metrics.clone()))
    }

    fn upsert_artifacts(&self, run_id: RunId, artifacts: &Artifacts) -> Result<()> {
        self.update(run_id, |record| record.artifacts.extend(artifacts.clone()))
    }

    fn get_run(&self, run_id: RunId) -> Result<Option<Run>> {
        Ok(self.read()?.get(&run_id).map(|record| record.run.clone()))
    }

    fn get_metrics(&self, run_id: RunId) -> Result<Vec<Metric>> {
        Ok(self.read()?.get(&run_id).map(|record| metric_rows(&record.metrics)).unwrap_or_default())
    }

    fn get_artifact(&self, run_id: RunId, name: &str) -> Result<Option<String>> {
        let Ok(file) = BundleFile::from_str(name) else {
            return Ok(None);
        };

        Ok(self
            .read()?
            .get(&run_id)
            .and_then(|record| record.artifacts.get(file))
            .map(ToString::to_string))
    }

    fn list_runs(&self, limit: usize) -> Result<Vec<Run>> {
        Ok(newest_first(self.read()?.values().map(|record| &record.run), limit))
    }

    fn metric_time_series(&self, host: &str, key: MetricKey, since: DateTime<Utc>) -> Result<Vec<DailyValue>> {
        Ok(daily_series(self.read()?.values(), host, key, since))
    }

    fn metrics_map(&self, run_id: RunId) -> Result<MetricSet> {
        Ok(self.read()?.get(&run_id).map(|record| record.metrics.clone()).unwrap_or_default())
    }

    fn commit(&self, record: &RunRecord) -> Result<()> {
        let mut records = self.write()?;
        if records.contains_key(&record.run.id) {
            bail!("run '{}' already exists", record.run.id);
        }

        let _ = records.insert(record.run.id, record.clone());
        Ok(())
    }
}
