use super::queries::{daily_series, metric_rows, newest_first};
use super::run_document::RunDocument;
use super::store_lock::acquire_store_lock;
use super::{DailyValue, Metric, Store};
use crate::Result;
use crate::archive::BundleFile;
use crate::metrics::{MetricKey, MetricSet};
use crate::runs::{Artifacts, Run, RunId, RunRecord};
use chrono::{DateTime, Utc};
use core::str::FromStr;
use ohno::{IntoAppError, app_err, bail};
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

/// Log target for the JSON store
const LOG_TARGET: &str = "     store";

const RUNS_DIR: &str = "runs";

/// A [`Store`] keeping one JSON document per run under a root directory.
///
/// Documents live at `<root>/runs/<run-id>.json`. Each write replaces a whole
/// document through a rename, and writers serialize through an advisory lock
/// on `<root>/store.lock`.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Open the store rooted at `root`, creating its directories if needed.
    ///
    /// # Errors
    ///
    /// Fails if the directories cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let runs = root.join(RUNS_DIR);
        fs::create_dir_all(&runs).into_app_err_with(|| format!("creating store directory '{}'", runs.display()))?;

        log::debug!(target: LOG_TARGET, "Opened store at '{}'", root.display());
        Ok(Self { root })
    }

    fn run_path(&self, run_id: RunId) -> PathBuf {
        self.root.join(RUNS_DIR).join(format!("{run_id}.json"))
    }

    fn load(&self, run_id: RunId) -> Result<Option<RunRecord>> {
        let path = self.run_path(run_id);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).into_app_err_with(|| format!("opening run document '{}'", path.display())),
        };

        let document: RunDocument = serde_json::from_reader(BufReader::new(file))
            .into_app_err_with(|| format!("parsing run document '{}'", path.display()))?;
        Ok(Some(document.into_record()))
    }

    /// Every readable run document. Unreadable documents are skipped.
    fn load_all(&self) -> Result<Vec<RunRecord>> {
        let dir = self.root.join(RUNS_DIR);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e).into_app_err_with(|| format!("listing store directory '{}'", dir.display())),
        };

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.into_app_err_with(|| format!("listing store directory '{}'", dir.display()))?;
            let file_name = entry.file_name();
            let Some(run_id) = file_name
                .to_str()
                .and_then(|name| name.strip_suffix(".json"))
                .and_then(|stem| RunId::from_str(stem).ok())
            else {
                continue;
            };

            match self.load(run_id) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => log::warn!(target: LOG_TARGET, "Skipping unreadable run document: {e:#}"),
            }
        }

        log::trace!(target: LOG_TARGET, "Loaded {} run documents", records.len());
        Ok(records)
    }

    fn write(&self, record: &RunRecord) -> Result<()> {
        let path = self.run_path(record.run.id);
        let temp_path = path.with_extension("json.tmp");

        let file = File::create(&temp_path).into_app_err_with(|| format!("creating run document '{}'", temp_path.display()))?;
        let mut writer = BufWriter::new(file);
        let document = RunDocument::from_record(record);

        #[cfg(debug_assertions)]
        let result = serde_json::to_writer_pretty(&mut writer, &document);
        #[cfg(not(debug_assertions))]
        let result = serde_json::to_writer(&mut writer, &document);

        result.into_app_err_with(|| format!("writing run document '{}'", temp_path.display()))?;
        writer
            .flush()
            .into_app_err_with(|| format!("flushing run document '{}'", temp_path.display()))?;
        drop(writer);

        fs::rename(&temp_path, &path).into_app_err_with(|| format!("replacing run document '{}'", path.display()))?;
        log::debug!(target: LOG_TARGET, "Wrote run document '{}'", path.display());
        Ok(())
    }

    fn update(&self, run_id: RunId, f: impl FnOnce(&mut RunRecord)) -> Result<()> {
        let _lock = acquire_store_lock(&self.root)?;
        let mut record = self.load(run_id)?.ok_or_else(|| app_err!("run '{run_id}' not found"))?;
        f(&mut record);
        self.write(&record)
    }

    fn insert(&self, record: &RunRecord) -> Result<()> {
        let _lock = acquire_store_lock(&self.root)?;
        if self.run_path(record.run.id).exists() {
            bail!("run '{}' already exists", record.run.id);
        }

        self.write(record)
    }
}

impl Store for JsonStore {
    fn create_run(&self, run: &Run) -> Result<()> {
        self.insert(&RunRecord {
            run: run.clone(),
            metrics: MetricSet::new(),
            artifacts: Artifacts::new(),
        })
    }

    fn upsert_metrics(&self, run_id: RunId, metrics: &MetricSet) -> Result<()> {
        self.update(run_id, |record| record.metrics.extend(metrics.clone()))
    }

    fn upsert_artifacts(&self, run_id: RunId, artifacts: &Artifacts) -> Result<()> {
        self.update(run_id, |record| record.artifacts.extend(artifacts.clone()))
    }

    fn get_run(&self, run_id: RunId) -> Result<Option<Run>> {
        Ok(self.load(run_id)?.map(|record| record.run))
    }

    fn get_metrics(&self, run_id: RunId) -> Result<Vec<Metric>> {
        Ok(self.load(run_id)?.map(|record| metric_rows(&record.metrics)).unwrap_or_default())
    }

    fn get_artifact(&self, run_id: RunId, name: &str) -> Result<Option<String>> {
        let Ok(file) = BundleFile::from_str(name) else {
            return Ok(None);
        };

        Ok(self
            .load(run_id)?
            .and_then(|record| record.artifacts.get(file).map(ToString::to_string)))
    }

    fn list_runs(&self, limit: usize) -> Result<Vec<Run>> {
        let records = self.load_all()?;
        Ok(newest_first(records.iter().map(|record| &record.run), limit))
    }

    fn metric_time_series(&self, host: &str, key: MetricKey, since: DateTime<Utc>) -> Result<Vec<DailyValue>> {
        let records = self.load_all()?;
        Ok(daily_series(records.iter(), host, key, since))
    }

    fn metrics_map(&self, run_id: RunId) -> Result<MetricSet> {
        Ok(self.load(run_id)?.map(|record| record.metrics).unwrap_or_default())
    }

    fn commit(&self, record: &RunRecord) -> Result<()> {
        self.insert(record)
    }
}
