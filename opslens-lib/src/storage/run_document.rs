use crate::archive::BundleFile;
use crate::metrics::{MetricSet, Unit};
use crate::runs::{Artifacts, Run, RunRecord};
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Log target for run documents
const LOG_TARGET: &str = "     store";

/// On-disk representation of a run.
///
/// Names are kept as plain strings so that documents written by other
/// versions still load; names that are not recognized are dropped.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunDocument {
    run: Run,

    #[serde(default)]
    metrics: BTreeMap<String, StoredMetric>,

    #[serde(default)]
    artifacts: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct StoredMetric {
    value: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<Unit>,
}

impl RunDocument {
    pub fn from_record(record: &RunRecord) -> Self {
        let metrics = record
            .metrics
            .iter()
            .map(|(key, value)| (key.name().to_string(), StoredMetric { value, unit: key.unit() }))
            .collect();

        let artifacts = record
            .artifacts
            .iter()
            .map(|(file, content)| (file.file_name().to_string(), content.to_string()))
            .collect();

        Self {
            run: record.run.clone(),
            metrics,
            artifacts,
        }
    }

    pub fn into_record(self) -> RunRecord {
        let run_id = self.run.id;
        let metrics = MetricSet::from_named(self.metrics.into_iter().map(|(name, stored)| (name, stored.value)));

        let mut artifacts = Artifacts::new();
        for (name, content) in self.artifacts {
            match BundleFile::from_str(&name) {
                Ok(file) => artifacts.insert(file, &content),
                Err(_) => log::warn!(target: LOG_TARGET, "Ignoring unknown artifact '{name}' of run {run_id}"),
            }
        }

        RunRecord {
            run: self.run,
            metrics,
            artifacts,
        }
    }
}
